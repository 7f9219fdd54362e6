use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }
}

fn snap(value: Value) -> Snapshot {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object snapshot, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// equality

#[test]
fn deep_equal_compares_scalars_by_value() {
    assert!(deep_equal(&json!(null), &json!(null)));
    assert!(deep_equal(&json!(true), &json!(true)));
    assert!(!deep_equal(&json!(true), &json!(false)));
    assert!(deep_equal(&json!("a"), &json!("a")));
    assert!(!deep_equal(&json!("a"), &json!("b")));
    assert!(deep_equal(&json!(3), &json!(3)));
    // Integer and float spellings of the same number are equal.
    assert!(deep_equal(&json!(1), &json!(1.0)));
    assert!(!deep_equal(&json!(1), &json!(1.5)));
}

#[test]
fn deep_equal_distinguishes_runtime_shapes() {
    assert!(!deep_equal(&json!([1, 2]), &json!({"0": 1, "1": 2})));
    assert!(!deep_equal(&json!("1"), &json!(1)));
    assert!(!deep_equal(&json!(null), &json!(0)));
}

#[test]
fn deep_equal_recurses_into_sequences_and_mappings() {
    let a = json!({"user": {"name": "ada", "tags": [1, 2, 3]}, "page": 2});
    let b = json!({"page": 2, "user": {"tags": [1, 2, 3], "name": "ada"}});
    assert!(deep_equal(&a, &b));

    let c = json!({"page": 2, "user": {"tags": [1, 2, 4], "name": "ada"}});
    assert!(!deep_equal(&a, &c));

    assert!(!deep_equal(&json!([1, 2]), &json!([1, 2, 3])));
    assert!(!deep_equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
}

#[test]
fn deep_equal_slices_compares_length_then_elements() {
    let a = [json!(1), json!({"k": [true]})];
    let b = [json!(1), json!({"k": [true]})];
    let c = [json!(1)];
    let d = [json!(1), json!({"k": [false]})];
    assert!(deep_equal_slices(&a, &b));
    assert!(!deep_equal_slices(&a, &c));
    assert!(!deep_equal_slices(&a, &d));
    assert!(deep_equal_slices(&[], &[]));
}

#[test]
fn changed_keys_is_precise_per_key() {
    let baseline = snap(json!({"count": 1, "label": "x", "items": [1, 2]}));
    let same = snap(json!({"count": 1, "label": "x", "items": [1, 2]}));
    assert!(changed_keys(&baseline, &same).is_empty());

    let one_change = snap(json!({"count": 2, "label": "x", "items": [1, 2]}));
    assert_eq!(changed_keys(&baseline, &one_change), ["count"]);

    let added = snap(json!({"count": 1, "label": "x", "items": [1, 2], "extra": 0}));
    assert_eq!(changed_keys(&baseline, &added), ["extra"]);

    let removed = snap(json!({"count": 1, "label": "x"}));
    assert_eq!(changed_keys(&baseline, &removed), ["items"]);
}

// ---------------------------------------------------------------------------
// window

#[test]
fn window_worked_example() {
    let options = WindowOptions::new(1000, 80)
        .with_viewport_extent(600)
        .with_scroll_offset(1600)
        .with_overscan(5);
    let w = compute_window(&options);
    assert_eq!(w.total_extent, 80_000);
    assert_eq!(w.start_index, 20);
    assert_eq!(w.end_index, 27);
    assert_eq!(w.overscan_start, 15);
    assert_eq!(w.overscan_end, 32);
    assert_eq!(w.render_offset, 1200);
    assert_eq!(w.visible_count, 18);
    assert!(!w.is_empty());
}

#[test]
fn window_is_empty_without_items_or_viewport() {
    let w = compute_window(&WindowOptions::new(0, 80).with_viewport_extent(600));
    assert!(w.is_empty());
    assert_eq!(w.render_offset, 0);
    assert_eq!(w.visible_indices().count(), 0);

    let w = compute_window(&WindowOptions::new(100, 80).with_scroll_offset(10));
    assert!(w.is_empty());

    // Zero item extent is clamped to an empty window rather than an error.
    let w = compute_window(&WindowOptions::new(100, 0).with_viewport_extent(600));
    assert!(w.is_empty());
    assert_eq!(w.total_extent, 0);
}

#[test]
fn window_overscan_clamps_at_list_edges() {
    let w = compute_window(
        &WindowOptions::new(100, 10)
            .with_viewport_extent(50)
            .with_overscan(4),
    );
    assert_eq!(w.start_index, 0);
    assert_eq!(w.overscan_start, 0);
    assert_eq!(w.render_offset, 0);

    let w = compute_window(
        &WindowOptions::new(100, 10)
            .with_viewport_extent(50)
            .with_scroll_offset(10_000)
            .with_overscan(4),
    );
    assert_eq!(w.end_index, 99);
    assert_eq!(w.overscan_end, 99);
    assert!(w.overscan_start <= 99);
}

#[test]
fn window_bounds_hold_for_random_geometry() {
    let mut rng = Lcg::new(0xC0FFEE);
    for _ in 0..500 {
        let total_items = rng.gen_range_usize(0, 5_000);
        let item_extent = rng.gen_range_u64(1, 200);
        let viewport_extent = rng.gen_range_u64(0, 3_000);
        let scroll_offset = rng.gen_range_u64(0, 1_000_000);
        let overscan = rng.gen_range_usize(0, 20);

        let w = compute_window(
            &WindowOptions::new(total_items, item_extent)
                .with_viewport_extent(viewport_extent)
                .with_scroll_offset(scroll_offset)
                .with_overscan(overscan),
        );

        if total_items == 0 || viewport_extent == 0 {
            assert!(w.is_empty());
            assert_eq!(w.render_offset, 0);
            continue;
        }

        assert!(!w.is_empty());
        assert!(w.overscan_start <= w.start_index);
        assert!(w.start_index <= w.end_index);
        assert!(w.end_index <= w.overscan_end);
        assert!(w.overscan_end < total_items);
        assert_eq!(w.visible_count, w.overscan_end - w.overscan_start + 1);
        assert_eq!(w.render_offset, w.overscan_start as u64 * item_extent);
        w.for_each_visible_index(|i| assert!(i < total_items));
    }
}

#[test]
fn window_collect_matches_iterator() {
    let w = compute_window(
        &WindowOptions::new(50, 10)
            .with_viewport_extent(35)
            .with_scroll_offset(105)
            .with_overscan(2),
    );
    let mut collected = Vec::new();
    w.collect_visible_indices(&mut collected);
    let iterated: Vec<usize> = w.visible_indices().collect();
    assert_eq!(collected, iterated);
    assert_eq!(collected.first().copied(), Some(w.overscan_start));
    assert_eq!(collected.last().copied(), Some(w.overscan_end));
}

// ---------------------------------------------------------------------------
// memo

#[test]
fn deps_cache_runs_factory_once_for_equal_deps() {
    let calls = AtomicUsize::new(0);
    let mut cache = DepsCache::new();

    // Structurally equal but freshly allocated dependency lists.
    let first = [json!({"page": 1, "filters": ["a", "b"]})];
    let second = [json!({"page": 1, "filters": ["a", "b"]})];

    let v1 = *cache.get_or_compute(
        &first,
        || {
            calls.fetch_add(1, Ordering::Relaxed);
            42u32
        },
        0,
    );
    let v2 = *cache.get_or_compute(
        &second,
        || {
            calls.fetch_add(1, Ordering::Relaxed);
            43u32
        },
        10,
    );

    assert_eq!(v1, 42);
    assert_eq!(v2, 42);
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert_eq!(cache.entry().map(|e| e.created_at_ms()), Some(0));
}

#[test]
fn deps_cache_recomputes_when_a_nested_leaf_changes() {
    let calls = AtomicUsize::new(0);
    let mut cache = DepsCache::new();

    let deps = [json!({"user": {"id": 7, "roles": ["admin"]}})];
    cache.get_or_compute(
        &deps,
        || {
            calls.fetch_add(1, Ordering::Relaxed);
            "a"
        },
        0,
    );

    let changed = [json!({"user": {"id": 7, "roles": ["viewer"]}})];
    let v = *cache.get_or_compute(
        &changed,
        || {
            calls.fetch_add(1, Ordering::Relaxed);
            "b"
        },
        5,
    );

    assert_eq!(v, "b");
    assert_eq!(calls.load(Ordering::Relaxed), 2);
    assert_eq!(cache.entry().map(|e| e.created_at_ms()), Some(5));
}

#[test]
fn deps_cache_keeps_previous_entry_when_factory_fails() {
    let mut cache = DepsCache::new();
    let old = [json!(1)];
    let new = [json!(2)];

    cache
        .try_get_or_compute::<&str>(&old, || Ok(10u32), 0)
        .unwrap();

    let err = cache.try_get_or_compute::<&str>(&new, || Err("boom"), 5);
    assert_eq!(err.unwrap_err(), "boom");
    // No partial entry was committed.
    assert_eq!(cache.value(), Some(&10));

    // The previous dependencies still hit without recomputation.
    let v = *cache
        .try_get_or_compute::<&str>(&old, || Err("must not run"), 10)
        .unwrap();
    assert_eq!(v, 10);
}

#[test]
fn stable_ref_keeps_reference_for_equal_values() {
    let mut stable = StableRef::new();
    let a = stable.adopt(json!({"rows": [1, 2, 3]}));
    let b = stable.adopt(json!({"rows": [1, 2, 3]}));
    assert!(Arc::ptr_eq(&a, &b));

    let c = stable.adopt(json!({"rows": [1, 2, 3, 4]}));
    assert!(!Arc::ptr_eq(&a, &c));
    assert!(stable.current().is_some_and(|cur| Arc::ptr_eq(cur, &c)));
}

#[test]
fn debounce_collapses_rapid_changes_into_one_computation() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls2 = Arc::clone(&calls);
    let mut cache = DebouncedCache::new(100, move |deps: &[Value]| {
        calls2.fetch_add(1, Ordering::Relaxed);
        deps.to_vec()
    });

    cache.set_deps(&[json!(1)], 0);
    cache.set_deps(&[json!(2)], 30);
    cache.set_deps(&[json!(3)], 60);

    assert!(cache.tick(100).is_none()); // deadline re-armed to 160
    assert!(cache.value().is_none());
    assert_eq!(cache.tick(160).map(|v| v.clone()), Some(alloc::vec![json!(3)]));
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert!(!cache.has_pending());
}

#[test]
fn debounce_returns_previous_value_until_commit() {
    let mut cache = DebouncedCache::new(50, |deps: &[Value]| deps.len());
    cache.set_deps(&[json!(1)], 0);
    cache.tick(50);
    assert_eq!(cache.value(), Some(&1));

    cache.set_deps(&[json!(1), json!(2)], 60);
    assert!(cache.has_pending());
    assert_eq!(cache.value(), Some(&1)); // previous committed value
    cache.tick(110);
    assert_eq!(cache.value(), Some(&2));
}

#[test]
fn debounce_ignores_unchanged_deps_and_supports_cancel() {
    let mut cache = DebouncedCache::new(50, |deps: &[Value]| deps.len());
    cache.set_deps(&[json!("a")], 0);
    cache.tick(50);

    // Re-reporting the committed deps is not a change.
    cache.set_deps(&[json!("a")], 70);
    assert!(!cache.has_pending());

    cache.set_deps(&[json!("b")], 80);
    // Same pending deps do not re-arm the deadline.
    cache.set_deps(&[json!("b")], 100);
    assert_eq!(cache.tick(130).copied(), Some(1));

    cache.set_deps(&[json!("c")], 140);
    cache.cancel_pending();
    assert!(cache.tick(500).is_none());
    assert_eq!(cache.value(), Some(&1));
}

#[test]
fn memo_evicts_least_recently_used_entry() {
    let mut memo: Memo<&str, u32> = Memo::new(MemoOptions::new().with_capacity(2));
    memo.get_or_compute_with("a", || 1);
    memo.get_or_compute_with("b", || 2);
    // Touch "a" so "b" becomes the least recently used entry.
    memo.get_or_compute_with("a", || 0);
    memo.get_or_compute_with("c", || 3);

    assert_eq!(memo.len(), 2);
    assert!(memo.contains_key(&"a"));
    assert!(!memo.contains_key(&"b"));
    assert!(memo.contains_key(&"c"));
}

#[test]
fn memo_computes_once_per_live_key() {
    let calls = AtomicUsize::new(0);
    let mut memo: Memo<u32, u32> = Memo::new(MemoOptions::new());
    for _ in 0..5 {
        let v = *memo.get_or_compute_with(7, || {
            calls.fetch_add(1, Ordering::Relaxed);
            49
        });
        assert_eq!(v, 49);
    }
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn memoized_fn_caches_by_selected_key() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls2 = Arc::clone(&calls);
    let mut square = MemoizedFn::new(
        MemoOptions::new().with_capacity(16),
        move |n: &u64| {
            calls2.fetch_add(1, Ordering::Relaxed);
            n * n
        },
        |n: &u64| *n,
    );

    assert_eq!(square.call(&12), 144);
    assert_eq!(square.call(&12), 144);
    assert_eq!(square.call(&3), 9);
    assert_eq!(calls.load(Ordering::Relaxed), 2);
    assert_eq!(square.len(), 2);

    square.clear();
    assert!(square.is_empty());
}

// ---------------------------------------------------------------------------
// profiler

#[test]
fn profiler_aggregates_durations() {
    let mut profiler = Profiler::new(ProfilerOptions::new());
    let mut alerts = AlertLog::new();

    profiler.start("render", 0);
    assert_eq!(profiler.end("render", 10, &mut alerts), 10);
    profiler.start("render", 100);
    assert_eq!(profiler.end("render", 102, &mut alerts), 2);

    let stats = profiler.stats("render").unwrap();
    assert_eq!(stats.count, 2);
    assert_eq!(stats.total_ms, 12);
    assert_eq!(stats.min_ms, 2);
    assert_eq!(stats.max_ms, 10);
    assert_eq!(stats.average_ms(), 6.0);
    assert_eq!(stats.history.iter().copied().collect::<Vec<_>>(), [10, 2]);
    assert_eq!(profiler.all_stats().len(), 1);
    assert!(alerts.is_empty());
}

#[test]
fn profiler_end_without_start_degrades_to_warning() {
    let mut profiler = Profiler::new(ProfilerOptions::new());
    let mut alerts = AlertLog::new();

    assert_eq!(profiler.end("ghost", 50, &mut alerts), 0);
    assert_eq!(alerts.len(), 1);
    let alert = alerts.iter().next().unwrap();
    assert_eq!(alert.severity, Severity::Warning);
    assert_eq!(alert.source, "ghost");
    assert_eq!(alert.timestamp_ms, 50);
    assert!(profiler.stats("ghost").is_none());
}

#[test]
fn profiler_flags_operations_over_frame_budget() {
    let mut profiler = Profiler::new(ProfilerOptions::new());
    let mut alerts = AlertLog::new();

    // Exactly at the budget is fine.
    profiler.start("paint", 0);
    profiler.end("paint", 16, &mut alerts);
    assert!(alerts.is_empty());

    profiler.start("paint", 100);
    profiler.end("paint", 120, &mut alerts);
    assert_eq!(alerts.len(), 1);
    let mut by_source = Vec::new();
    alerts.collect_by_source("paint", &mut by_source);
    assert_eq!(by_source.len(), 1);
    assert_eq!(by_source[0].severity, Severity::Warning);
}

#[test]
fn profiler_start_overwrites_open_record() {
    let mut profiler = Profiler::new(ProfilerOptions::new());
    let mut alerts = AlertLog::new();

    profiler.start("fetch", 0);
    profiler.start("fetch", 10); // last write wins
    assert_eq!(profiler.open_count(), 1);
    assert_eq!(profiler.end("fetch", 15, &mut alerts), 5);
    assert_eq!(profiler.open_count(), 0);
}

#[test]
fn profiler_history_is_bounded() {
    let mut profiler = Profiler::new(ProfilerOptions::new().with_history_cap(3));
    let mut alerts = AlertLog::new();
    for i in 0..5u64 {
        profiler.start("op", i * 100);
        profiler.end("op", i * 100 + i, &mut alerts);
    }
    let stats = profiler.stats("op").unwrap();
    assert_eq!(stats.count, 5);
    assert_eq!(stats.history.iter().copied().collect::<Vec<_>>(), [2, 3, 4]);
}

#[test]
fn profiler_clear_scopes_to_one_id_or_all() {
    let mut profiler = Profiler::new(ProfilerOptions::new());
    let mut alerts = AlertLog::new();
    profiler.start("a", 0);
    profiler.end("a", 1, &mut alerts);
    profiler.start("b", 0);
    profiler.end("b", 1, &mut alerts);

    profiler.clear("a");
    assert!(profiler.stats("a").is_none());
    assert!(profiler.stats("b").is_some());

    profiler.clear_all();
    assert!(profiler.all_stats().is_empty());
}

// ---------------------------------------------------------------------------
// classifier & lifecycle

#[test]
fn classifier_is_deterministic_over_repeated_snapshots() {
    let mut classifier = RenderClassifier::new(ClassifierOptions::new());
    let mut alerts = AlertLog::new();
    let snapshot = snap(json!({"count": 1, "label": "x"}));

    let first = classifier.classify("List", snapshot.clone(), 0, &mut alerts);
    assert_eq!(first.reason, RenderReason::First);
    assert!(first.changed_keys.is_empty());
    assert!(alerts.is_empty());

    let second = classifier.classify("List", snapshot.clone(), 10, &mut alerts);
    assert_eq!(second.reason, RenderReason::Unnecessary);
    assert!(second.changed_keys.is_empty());
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts.iter().next().unwrap().source, "List");

    let third = classifier.classify(
        "List",
        snap(json!({"count": 2, "label": "x"})),
        20,
        &mut alerts,
    );
    assert_eq!(third.reason, RenderReason::Necessary);
    assert_eq!(third.changed_keys, ["count"]);
    assert_eq!(alerts.len(), 1);
}

#[test]
fn classifier_treats_new_and_removed_keys_as_changed() {
    let mut classifier = RenderClassifier::new(ClassifierOptions::new());
    let mut alerts = AlertLog::new();

    classifier.classify("Card", snap(json!({"a": 1})), 0, &mut alerts);
    let grown = classifier.classify("Card", snap(json!({"a": 1, "b": 2})), 5, &mut alerts);
    assert_eq!(grown.reason, RenderReason::Necessary);
    assert_eq!(grown.changed_keys, ["b"]);

    let shrunk = classifier.classify("Card", snap(json!({"a": 1})), 10, &mut alerts);
    assert_eq!(shrunk.reason, RenderReason::Necessary);
    assert_eq!(shrunk.changed_keys, ["b"]);
}

#[test]
fn classifier_tracks_ids_independently() {
    let mut classifier = RenderClassifier::new(ClassifierOptions::new());
    let mut alerts = AlertLog::new();
    let snapshot = snap(json!({"v": 1}));

    let a = classifier.classify("A", snapshot.clone(), 0, &mut alerts);
    let b = classifier.classify("B", snapshot.clone(), 0, &mut alerts);
    assert_eq!(a.reason, RenderReason::First);
    assert_eq!(b.reason, RenderReason::First);
    assert_eq!(classifier.tracked_count(), 2);
}

#[test]
fn classification_history_is_bounded() {
    let mut classifier = RenderClassifier::new(ClassifierOptions::new().with_history_cap(3));
    let mut alerts = AlertLog::with_capacity(1000);
    for i in 0..6u64 {
        classifier.classify("Row", snap(json!({"i": i / 2})), i, &mut alerts);
    }
    let history = classifier.history("Row").unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history.front().unwrap().timestamp_ms, 3);
    assert_eq!(history.back().unwrap().timestamp_ms, 5);
}

#[test]
fn lifecycle_records_mount_updates_and_teardown() {
    let mut lifecycle = LifecycleTracker::new();
    lifecycle.record_update("Panel", 100); // implicit mount
    lifecycle.record_update("Panel", 150);
    lifecycle.mount("Panel", 999); // no-op for a known id

    let entry = lifecycle.entry("Panel").unwrap();
    assert_eq!(entry.mounted_ms, 100);
    assert_eq!(entry.update_count, 2);
    assert_eq!(entry.total_lifetime_ms, None);

    assert_eq!(lifecycle.teardown("Panel", 600), Some(500));
    assert_eq!(
        lifecycle.entry("Panel").unwrap().total_lifetime_ms,
        Some(500)
    );
    assert_eq!(lifecycle.teardown("Ghost", 600), None);
}

// ---------------------------------------------------------------------------
// alerts

#[test]
fn alert_log_keeps_the_most_recent_entries() {
    let mut log = AlertLog::with_capacity(100);
    for i in 0..150u64 {
        log.push(Alert::warning("src", alloc::format!("alert {i}"), i));
    }
    assert_eq!(log.len(), 100);
    assert_eq!(log.iter().next().unwrap().timestamp_ms, 50);
    assert_eq!(log.iter().last().unwrap().timestamp_ms, 149);
}

#[test]
fn alert_log_queries_never_fail() {
    let mut log = AlertLog::new();
    let mut out = Vec::new();
    log.collect_by_source("unknown", &mut out);
    assert!(out.is_empty());

    log.push(Alert::warning("a", "m", 0));
    log.push(Alert::error("b", "m", 1));
    log.collect_by_source("b", &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].severity, Severity::Error);

    log.clear();
    assert!(log.is_empty());
    log.collect_by_source("a", &mut out);
    assert!(out.is_empty());
}

#[test]
fn alert_log_notifies_observer_on_push() {
    let seen = Arc::new(AtomicUsize::new(0));
    let seen2 = Arc::clone(&seen);
    let mut log = AlertLog::new();
    log.set_on_alert(Some(move |_: &Alert| {
        seen2.fetch_add(1, Ordering::Relaxed);
    }));
    log.push(Alert::warning("s", "m", 0));
    log.push(Alert::warning("s", "m", 1));
    assert_eq!(seen.load(Ordering::Relaxed), 2);
}

// ---------------------------------------------------------------------------
// score

#[test]
fn score_is_perfect_without_recorded_operations() {
    let stats: IdMap<StatsAggregate> = IdMap::new();
    assert_eq!(performance_score(&stats, &ScoreOptions::new()), 100);
}

#[test]
fn score_collapses_when_everything_is_slow_and_hot() {
    let mut profiler = Profiler::new(ProfilerOptions::new());
    let mut alerts = AlertLog::with_capacity(10_000);
    for op in ["layout", "paint"] {
        for i in 0..60u64 {
            profiler.start(op, i * 10_000);
            profiler.end(op, i * 10_000 + 1_000, &mut alerts);
        }
    }
    // Slow fraction 1 (-40), global average far over budget (-30),
    // high-frequency fraction 1 (-20).
    assert_eq!(
        performance_score(profiler.all_stats(), &ScoreOptions::new()),
        10
    );
}

#[test]
fn score_deducts_proportionally_for_mixed_workloads() {
    let mut profiler = Profiler::new(ProfilerOptions::new());
    let mut alerts = AlertLog::new();
    profiler.start("slow", 0);
    profiler.end("slow", 32, &mut alerts);
    profiler.start("fast", 0);
    profiler.end("fast", 1, &mut alerts);

    // Half the operations are slow (-20); the global average (16.5ms) sits
    // 3.125% over budget (-0.9375); nothing is high-frequency.
    assert_eq!(
        performance_score(profiler.all_stats(), &ScoreOptions::new()),
        79
    );
}

#[test]
fn score_honors_custom_thresholds() {
    let mut stats: IdMap<StatsAggregate> = IdMap::new();
    stats.insert(
        alloc::string::String::from("op"),
        StatsAggregate {
            count: 60,
            total_ms: 3_000, // 50ms average
            min_ms: 50,
            max_ms: 50,
            history: alloc::collections::VecDeque::new(),
        },
    );

    // Slow and hot under the defaults.
    assert_eq!(performance_score(&stats, &ScoreOptions::new()), 10);

    // Within budget once the thresholds are raised.
    let relaxed = ScoreOptions::new()
        .with_slow_threshold_ms(100)
        .with_high_frequency_calls(100);
    assert_eq!(performance_score(&stats, &relaxed), 100);
}
