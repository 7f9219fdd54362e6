// Example: a simulated dashboard session driven through a registry.
use renderprobe::{Snapshot, Value};
use renderprobe_adapter::{MonitorOptions, ProbeEvent, Registry};

fn snap(pairs: &[(&str, u64)]) -> Snapshot {
    let mut map = Snapshot::new();
    for (key, value) in pairs {
        map.insert(key.to_string(), Value::from(*value));
    }
    map
}

fn main() {
    let defaults = MonitorOptions::new().with_sink(|event: &ProbeEvent<'_>| match event {
        ProbeEvent::Alert(alert) => println!("[alert] {}: {}", alert.source, alert.message),
        ProbeEvent::Classification(record) => {
            println!("[render] {} {:?}", record.tracked_id, record.reason)
        }
        ProbeEvent::Operation {
            operation_id,
            duration_ms,
        } => println!("[op] {operation_id} {duration_ms}ms"),
    });
    let mut registry = Registry::new(defaults);

    let main = registry.get_or_create("main");
    main.mount("ItemList", 0);

    let mut now_ms = 0u64;
    for frame in 0..10u64 {
        main.start_operation("frame", now_ms);
        now_ms += if frame == 4 { 25 } else { 8 };
        main.end_operation("frame", now_ms);

        // Inputs only change every other frame.
        main.classify_render("ItemList", snap(&[("page", frame / 2)]), now_ms);
        now_ms += 10;
    }
    main.teardown("ItemList", now_ms);

    let mut components = Vec::new();
    main.collect_component_performance(&mut components);
    for c in &components {
        println!(
            "{}: {} updates, {} unnecessary, lifetime {:?}",
            c.tracked_id, c.update_count, c.unnecessary_renders, c.total_lifetime_ms
        );
    }
    println!("score={}", main.performance_score());
}
