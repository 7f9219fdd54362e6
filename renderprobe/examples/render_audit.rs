// Example: profiling operations and classifying renders.
use renderprobe::{
    AlertLog, ClassifierOptions, Profiler, ProfilerOptions, RenderClassifier, ScoreOptions,
    performance_score,
};
use serde_json::json;

fn main() {
    let mut profiler = Profiler::new(ProfilerOptions::new());
    let mut classifier = RenderClassifier::new(ClassifierOptions::new());
    let mut alerts = AlertLog::new();

    // Simulated frames at 10ms ticks; the "paint" pass blows the 16ms budget
    // on every third frame.
    let mut now_ms = 0u64;
    for frame in 0..30u64 {
        profiler.start("paint", now_ms);
        now_ms += if frame % 3 == 0 { 22 } else { 6 };
        profiler.end("paint", now_ms, &mut alerts);

        // The list re-renders every frame but its inputs only change when the
        // page flips.
        let snapshot = match json!({"page": frame / 10, "selected": 7}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        classifier.classify("ItemList", snapshot, now_ms, &mut alerts);
        now_ms += 10;
    }

    let stats = profiler.stats("paint").unwrap();
    println!(
        "paint: count={} avg={:.1}ms min={}ms max={}ms",
        stats.count,
        stats.average_ms(),
        stats.min_ms,
        stats.max_ms
    );

    let history = classifier.history("ItemList").unwrap();
    let unnecessary = history
        .iter()
        .filter(|r| r.reason == renderprobe::RenderReason::Unnecessary)
        .count();
    println!(
        "ItemList: {} of the last {} renders were unnecessary",
        unnecessary,
        history.len()
    );

    println!("alerts={}", alerts.len());
    println!(
        "score={}",
        performance_score(profiler.all_stats(), &ScoreOptions::new())
    );
}
