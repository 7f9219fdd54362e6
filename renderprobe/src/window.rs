use core::cmp;

/// Inputs for [`compute_window`].
///
/// All extents and offsets are in the same caller-defined unit (pixels, rows,
/// ...). Inputs are unsigned, so negative values are unrepresentable; a zero
/// `item_extent` is clamped defensively to an empty window rather than
/// treated as an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct WindowOptions {
    /// Number of items in the collection.
    pub total_items: usize,
    /// Uniform extent of a single item in the scroll axis. Must be > 0 for a
    /// non-empty window.
    pub item_extent: u64,
    /// Extent of the visible viewport in the scroll axis.
    pub viewport_extent: u64,
    /// Current scroll offset.
    pub scroll_offset: u64,
    /// Extra items realized on each side of the visible range to reduce
    /// flicker during fast scrolling.
    pub overscan: usize,
}

impl WindowOptions {
    pub fn new(total_items: usize, item_extent: u64) -> Self {
        Self {
            total_items,
            item_extent,
            viewport_extent: 0,
            scroll_offset: 0,
            overscan: 0,
        }
    }

    pub fn with_viewport_extent(mut self, viewport_extent: u64) -> Self {
        self.viewport_extent = viewport_extent;
        self
    }

    pub fn with_scroll_offset(mut self, scroll_offset: u64) -> Self {
        self.scroll_offset = scroll_offset;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }
}

/// The minimal index range to realize for a viewport, derived and immutable.
///
/// `start_index`/`end_index` are the clamped visible bounds (inclusive) and
/// `overscan_start`/`overscan_end` the same bounds widened by overscan. All
/// four are meaningful only when `visible_count > 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct WindowResult {
    /// Total extent of the collection (`total_items * item_extent`).
    pub total_extent: u64,
    /// First visible index (inclusive).
    pub start_index: usize,
    /// Last visible index (inclusive).
    pub end_index: usize,
    /// First realized index after overscan widening.
    pub overscan_start: usize,
    /// Last realized index after overscan widening.
    pub overscan_end: usize,
    /// Offset of the first realized item (`overscan_start * item_extent`).
    pub render_offset: u64,
    /// Number of realized indexes; `0` means an empty window.
    pub visible_count: usize,
}

impl WindowResult {
    fn empty(total_extent: u64) -> Self {
        Self {
            total_extent,
            start_index: 0,
            end_index: 0,
            overscan_start: 0,
            overscan_end: 0,
            render_offset: 0,
            visible_count: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.visible_count == 0
    }

    /// Iterates over the realized indexes without allocating.
    pub fn for_each_visible_index(&self, mut f: impl FnMut(usize)) {
        if self.visible_count == 0 {
            return;
        }
        for i in self.overscan_start..=self.overscan_end {
            f(i);
        }
    }

    /// Returns an iterator over the realized indexes.
    pub fn visible_indices(&self) -> impl Iterator<Item = usize> + use<> {
        let (start, len) = if self.visible_count == 0 {
            (0, 0)
        } else {
            (self.overscan_start, self.visible_count)
        };
        (start..).take(len)
    }

    /// Collects the realized indexes into `out` (clears `out` first).
    ///
    /// For maximum performance, prefer [`Self::for_each_visible_index`] and
    /// reuse a scratch buffer in your adapter.
    pub fn collect_visible_indices(&self, out: &mut alloc::vec::Vec<usize>) {
        out.clear();
        self.for_each_visible_index(|i| out.push(i));
    }
}

/// Computes the minimal index range to render for the given geometry.
///
/// Runs in O(1) with no iteration over items:
/// - `start_index = scroll_offset / item_extent`, clamped to the collection
/// - `end_index = (scroll_offset + viewport_extent) / item_extent`, clamped
/// - overscan widens both bounds, clamped to `[0, total_items - 1]`
/// - `render_offset = overscan_start * item_extent`
///
/// `total_items == 0`, `viewport_extent == 0` or `item_extent == 0` produce
/// an empty window with `render_offset = 0`. This is a pure function with no
/// failure mode.
pub fn compute_window(options: &WindowOptions) -> WindowResult {
    let total_extent = (options.total_items as u64).saturating_mul(options.item_extent);
    if options.total_items == 0 || options.viewport_extent == 0 || options.item_extent == 0 {
        ptrace!(
            total_items = options.total_items,
            viewport_extent = options.viewport_extent,
            "compute_window: empty"
        );
        return WindowResult::empty(total_extent);
    }

    let last = (options.total_items - 1) as u64;
    let start_index = cmp::min(options.scroll_offset / options.item_extent, last) as usize;
    let scroll_end = options.scroll_offset.saturating_add(options.viewport_extent);
    let end_index = cmp::min(scroll_end / options.item_extent, last) as usize;

    let overscan_start = start_index.saturating_sub(options.overscan);
    let overscan_end = cmp::min(end_index.saturating_add(options.overscan), last as usize);
    let render_offset = (overscan_start as u64).saturating_mul(options.item_extent);

    WindowResult {
        total_extent,
        start_index,
        end_index,
        overscan_start,
        overscan_end,
        render_offset,
        visible_count: overscan_end - overscan_start + 1,
    }
}
