// Example: windowing a large list and reacting to scroll.
use renderprobe::{WindowOptions, compute_window};

fn main() {
    let options = WindowOptions::new(1_000_000, 24)
        .with_viewport_extent(800)
        .with_overscan(4);

    for scroll_offset in [0u64, 12_000, 11_999_976] {
        let w = compute_window(&options.with_scroll_offset(scroll_offset));
        println!(
            "offset={scroll_offset}: visible [{}, {}], realized [{}, {}], render_offset={}",
            w.start_index, w.end_index, w.overscan_start, w.overscan_end, w.render_offset
        );
    }

    let w = compute_window(&options.with_scroll_offset(12_000));
    let mut realized = Vec::new();
    w.collect_visible_indices(&mut realized);
    println!("realized {} of {} items", realized.len(), 1_000_000);
}
