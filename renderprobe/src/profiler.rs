use alloc::borrow::ToOwned;
use alloc::collections::VecDeque;
use alloc::format;

use crate::alerts::{Alert, AlertLog};
use crate::key::IdMap;

/// Configuration for [`Profiler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProfilerOptions {
    /// Durations above this raise a warning alert. The default is one 60fps
    /// frame budget.
    pub slow_threshold_ms: u64,
    /// Number of recent samples kept per operation; the oldest sample is
    /// evicted first.
    pub history_cap: usize,
}

impl ProfilerOptions {
    pub const DEFAULT_SLOW_THRESHOLD_MS: u64 = 16;
    pub const DEFAULT_HISTORY_CAP: usize = 64;

    pub fn new() -> Self {
        Self {
            slow_threshold_ms: Self::DEFAULT_SLOW_THRESHOLD_MS,
            history_cap: Self::DEFAULT_HISTORY_CAP,
        }
    }

    pub fn with_slow_threshold_ms(mut self, slow_threshold_ms: u64) -> Self {
        self.slow_threshold_ms = slow_threshold_ms;
        self
    }

    pub fn with_history_cap(mut self, history_cap: usize) -> Self {
        self.history_cap = history_cap.max(1);
        self
    }
}

impl Default for ProfilerOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Bounded rolling duration statistics for one named operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct StatsAggregate {
    pub count: u64,
    pub total_ms: u64,
    pub min_ms: u64,
    pub max_ms: u64,
    /// The most recent durations, oldest first.
    pub history: VecDeque<u64>,
}

impl StatsAggregate {
    pub fn average_ms(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_ms as f64 / self.count as f64
        }
    }

    fn record(&mut self, duration_ms: u64, history_cap: usize) {
        if self.count == 0 {
            self.min_ms = duration_ms;
            self.max_ms = duration_ms;
        } else {
            self.min_ms = self.min_ms.min(duration_ms);
            self.max_ms = self.max_ms.max(duration_ms);
        }
        self.count = self.count.saturating_add(1);
        self.total_ms = self.total_ms.saturating_add(duration_ms);
        if self.history.len() >= history_cap {
            self.history.pop_front();
        }
        self.history.push_back(duration_ms);
    }
}

/// Times paired start/end events and aggregates duration statistics per
/// named operation.
///
/// At most one record is open per operation id: a second `start` for the same
/// id overwrites the prior one (last write wins, no nesting by id). `end`
/// without a matching `start` never fails; it degrades to a warning alert and
/// a zero duration, preserving availability of the dashboard over strict
/// correctness.
#[derive(Clone, Debug)]
pub struct Profiler {
    options: ProfilerOptions,
    open: IdMap<u64>,
    stats: IdMap<StatsAggregate>,
}

impl Profiler {
    pub fn new(options: ProfilerOptions) -> Self {
        Self {
            options,
            open: IdMap::new(),
            stats: IdMap::new(),
        }
    }

    pub fn options(&self) -> &ProfilerOptions {
        &self.options
    }

    /// Opens a timing record for `operation_id`.
    pub fn start(&mut self, operation_id: &str, now_ms: u64) {
        ptrace!(operation_id, now_ms, "Profiler::start");
        if self.open.insert(operation_id.to_owned(), now_ms).is_some() {
            pdebug!(operation_id, "start overwrote an open record");
        }
    }

    /// Closes the open record for `operation_id` and returns its duration.
    ///
    /// If no record is open, appends one warning alert and returns `0`.
    pub fn end(&mut self, operation_id: &str, now_ms: u64, alerts: &mut AlertLog) -> u64 {
        let Some(started_ms) = self.open.remove(operation_id) else {
            pwarn!(operation_id, "end without matching start");
            alerts.push(Alert::warning(
                operation_id,
                format!("`end` called without a matching `start` for `{operation_id}`"),
                now_ms,
            ));
            return 0;
        };

        let duration_ms = now_ms.saturating_sub(started_ms);
        let history_cap = self.options.history_cap;
        self.stats
            .entry(operation_id.to_owned())
            .or_default()
            .record(duration_ms, history_cap);

        if duration_ms > self.options.slow_threshold_ms {
            alerts.push(Alert::warning(
                operation_id,
                format!(
                    "`{operation_id}` took {duration_ms}ms (budget {}ms)",
                    self.options.slow_threshold_ms
                ),
                now_ms,
            ));
        }

        duration_ms
    }

    pub fn stats(&self, operation_id: &str) -> Option<&StatsAggregate> {
        self.stats.get(operation_id)
    }

    pub fn all_stats(&self) -> &IdMap<StatsAggregate> {
        &self.stats
    }

    /// Number of operations with an open (started but not ended) record.
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// Clears one operation's data (both the open record and the aggregate).
    pub fn clear(&mut self, operation_id: &str) {
        self.open.remove(operation_id);
        self.stats.remove(operation_id);
    }

    pub fn clear_all(&mut self) {
        self.open.clear();
        self.stats.clear();
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new(ProfilerOptions::new())
    }
}
