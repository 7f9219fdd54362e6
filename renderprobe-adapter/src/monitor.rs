use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use renderprobe::{
    Alert, AlertLog, ClassificationRecord, ClassifierOptions, IdMap, LifecycleTracker, Profiler,
    ProfilerOptions, RenderClassifier, RenderReason, ScoreOptions, Snapshot, StatsAggregate,
    performance_score,
};

use crate::sink::{InstrumentationSink, ProbeEvent};

/// Configuration for [`Monitor`].
#[derive(Clone)]
pub struct MonitorOptions {
    pub profiler: ProfilerOptions,
    pub classifier: ClassifierOptions,
    pub score: ScoreOptions,
    /// Capacity of the monitor's alert log.
    pub alert_capacity: usize,
    /// Receives every event the monitor produces. `None` keeps the monitor
    /// pull-only.
    pub sink: Option<InstrumentationSink>,
}

impl MonitorOptions {
    pub fn new() -> Self {
        Self {
            profiler: ProfilerOptions::new(),
            classifier: ClassifierOptions::new(),
            score: ScoreOptions::new(),
            alert_capacity: AlertLog::DEFAULT_CAPACITY,
            sink: None,
        }
    }

    pub fn with_profiler(mut self, profiler: ProfilerOptions) -> Self {
        self.profiler = profiler;
        self
    }

    pub fn with_classifier(mut self, classifier: ClassifierOptions) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_score(mut self, score: ScoreOptions) -> Self {
        self.score = score;
        self
    }

    pub fn with_alert_capacity(mut self, alert_capacity: usize) -> Self {
        self.alert_capacity = alert_capacity;
        self
    }

    pub fn with_sink(mut self, sink: impl Fn(&ProbeEvent<'_>) + Send + Sync + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for MonitorOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MonitorOptions")
            .field("profiler", &self.profiler)
            .field("classifier", &self.classifier)
            .field("score", &self.score)
            .field("alert_capacity", &self.alert_capacity)
            .field("has_sink", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}

/// Per-tracked-unit summary produced by [`Monitor::collect_component_performance`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ComponentPerformance {
    pub tracked_id: String,
    pub update_count: u64,
    pub mounted_ms: u64,
    pub total_lifetime_ms: Option<u64>,
    /// Unnecessary renders among the retained classification history.
    pub unnecessary_renders: usize,
    /// The retained classification records, oldest first.
    pub recent: Vec<ClassificationRecord>,
}

/// One profiler, classifier, lifecycle tracker and alert log behind a single
/// facade.
///
/// A monitor does not hold any UI objects and never reads a clock. Hosts drive
/// it by calling:
/// - `start_operation` / `end_operation` around timed work
/// - `classify_render` with each render's input snapshot
/// - `mount` / `teardown` at unit lifecycle boundaries
///
/// Every alert, classification and finished operation is pushed to the
/// configured [`InstrumentationSink`], if any; all state also stays queryable
/// in place.
#[derive(Clone)]
pub struct Monitor {
    profiler: Profiler,
    classifier: RenderClassifier,
    lifecycle: LifecycleTracker,
    alerts: AlertLog,
    score: ScoreOptions,
    sink: Option<InstrumentationSink>,
}

impl Monitor {
    pub fn new(options: MonitorOptions) -> Self {
        let mut alerts = AlertLog::with_capacity(options.alert_capacity);
        if let Some(sink) = options.sink.clone() {
            alerts.set_on_alert(Some(move |alert: &Alert| {
                sink(&ProbeEvent::Alert(alert));
            }));
        }
        Self {
            profiler: Profiler::new(options.profiler),
            classifier: RenderClassifier::new(options.classifier),
            lifecycle: LifecycleTracker::new(),
            alerts,
            score: options.score,
            sink: options.sink,
        }
    }

    /// Opens a timing record for `operation_id`.
    pub fn start_operation(&mut self, operation_id: &str, now_ms: u64) {
        self.profiler.start(operation_id, now_ms);
    }

    /// Closes the open record for `operation_id` and returns its duration.
    ///
    /// Degrades to a warning alert and `0` when no record is open. The
    /// finished operation is pushed to the sink either way.
    pub fn end_operation(&mut self, operation_id: &str, now_ms: u64) -> u64 {
        let duration_ms = self.profiler.end(operation_id, now_ms, &mut self.alerts);
        if let Some(sink) = &self.sink {
            sink(&ProbeEvent::Operation {
                operation_id,
                duration_ms,
            });
        }
        duration_ms
    }

    /// Registers `tracked_id` as mounted; a no-op for a known id.
    pub fn mount(&mut self, tracked_id: &str, now_ms: u64) {
        self.lifecycle.mount(tracked_id, now_ms);
    }

    /// Classifies one render of `tracked_id` and counts it as an update.
    pub fn classify_render(
        &mut self,
        tracked_id: &str,
        snapshot: Snapshot,
        now_ms: u64,
    ) -> ClassificationRecord {
        self.lifecycle.record_update(tracked_id, now_ms);
        let record = self
            .classifier
            .classify(tracked_id, snapshot, now_ms, &mut self.alerts);
        if let Some(sink) = &self.sink {
            sink(&ProbeEvent::Classification(&record));
        }
        record
    }

    /// Records the teardown of `tracked_id` and returns its total lifetime.
    pub fn teardown(&mut self, tracked_id: &str, now_ms: u64) -> Option<u64> {
        self.lifecycle.teardown(tracked_id, now_ms)
    }

    pub fn stats(&self, operation_id: &str) -> Option<&StatsAggregate> {
        self.profiler.stats(operation_id)
    }

    pub fn all_stats(&self) -> &IdMap<StatsAggregate> {
        self.profiler.all_stats()
    }

    pub fn alerts(&self) -> &AlertLog {
        &self.alerts
    }

    /// Collects the alerts raised by `source` into `out` (clears `out` first).
    pub fn collect_alerts_by_source(&self, source: &str, out: &mut Vec<Alert>) {
        self.alerts.collect_by_source(source, out);
    }

    /// The 0-100 health number over everything profiled so far.
    pub fn performance_score(&self) -> u32 {
        performance_score(self.profiler.all_stats(), &self.score)
    }

    /// Collects one [`ComponentPerformance`] per tracked unit into `out`,
    /// sorted by tracked id (clears `out` first).
    pub fn collect_component_performance(&self, out: &mut Vec<ComponentPerformance>) {
        out.clear();
        self.lifecycle.for_each_entry(|tracked_id, entry| {
            let (unnecessary_renders, recent) = match self.classifier.history(tracked_id) {
                Some(history) => (
                    history
                        .iter()
                        .filter(|r| r.reason == RenderReason::Unnecessary)
                        .count(),
                    history.iter().cloned().collect(),
                ),
                None => (0, Vec::new()),
            };
            out.push(ComponentPerformance {
                tracked_id: String::from(tracked_id),
                update_count: entry.update_count,
                mounted_ms: entry.mounted_ms,
                total_lifetime_ms: entry.total_lifetime_ms,
                unnecessary_renders,
                recent,
            });
        });
        out.sort_by(|a, b| a.tracked_id.cmp(&b.tracked_id));
    }

    pub fn profiler(&self) -> &Profiler {
        &self.profiler
    }

    pub fn classifier(&self) -> &RenderClassifier {
        &self.classifier
    }

    pub fn lifecycle(&self) -> &LifecycleTracker {
        &self.lifecycle
    }

    /// Resets all recorded state; configuration and sink stay in place.
    pub fn clear(&mut self) {
        self.profiler.clear_all();
        self.classifier.clear_all();
        self.lifecycle.clear();
        self.alerts.clear();
    }
}

impl Default for Monitor {
    fn default() -> Self {
        Self::new(MonitorOptions::new())
    }
}

impl core::fmt::Debug for Monitor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Monitor")
            .field("profiler", &self.profiler)
            .field("classifier", &self.classifier)
            .field("lifecycle", &self.lifecycle)
            .field("alerts", &self.alerts)
            .field("has_sink", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}
