use crate::key::IdMap;
use crate::profiler::StatsAggregate;

/// Configuration for [`performance_score`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreOptions {
    /// Average durations above this count an operation as slow.
    pub slow_threshold_ms: u64,
    /// Call counts above this count an operation as high-frequency.
    pub high_frequency_calls: u64,
}

impl ScoreOptions {
    pub const DEFAULT_SLOW_THRESHOLD_MS: u64 = 16;
    pub const DEFAULT_HIGH_FREQUENCY_CALLS: u64 = 50;

    pub fn new() -> Self {
        Self {
            slow_threshold_ms: Self::DEFAULT_SLOW_THRESHOLD_MS,
            high_frequency_calls: Self::DEFAULT_HIGH_FREQUENCY_CALLS,
        }
    }

    pub fn with_slow_threshold_ms(mut self, slow_threshold_ms: u64) -> Self {
        self.slow_threshold_ms = slow_threshold_ms;
        self
    }

    pub fn with_high_frequency_calls(mut self, high_frequency_calls: u64) -> Self {
        self.high_frequency_calls = high_frequency_calls;
        self
    }
}

impl Default for ScoreOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// A single 0-100 number summarizing the profiled operations.
///
/// Starting from 100:
/// - up to 40 points are deducted proportional to the fraction of operations
///   whose average duration exceeds the slow threshold,
/// - up to 30 points proportional to how far the global average duration
///   exceeds the threshold (capped at one full threshold of excess),
/// - up to 20 points proportional to the fraction of operations whose call
///   count exceeds the high-frequency cutoff.
///
/// Floored at 0, rounded to the nearest integer. No recorded operations means
/// a score of 100.
pub fn performance_score(stats: &IdMap<StatsAggregate>, options: &ScoreOptions) -> u32 {
    let operations = stats.len();
    if operations == 0 {
        return 100;
    }

    let threshold = options.slow_threshold_ms.max(1) as f64;
    let mut slow = 0usize;
    let mut high_frequency = 0usize;
    let mut total_ms = 0u64;
    let mut total_count = 0u64;
    for aggregate in stats.values() {
        if aggregate.average_ms() > threshold {
            slow += 1;
        }
        if aggregate.count > options.high_frequency_calls {
            high_frequency += 1;
        }
        total_ms = total_ms.saturating_add(aggregate.total_ms);
        total_count = total_count.saturating_add(aggregate.count);
    }

    let global_average = if total_count == 0 {
        0.0
    } else {
        total_ms as f64 / total_count as f64
    };

    let mut score = 100.0;
    score -= 40.0 * (slow as f64 / operations as f64);
    score -= 30.0 * ((global_average - threshold) / threshold).clamp(0.0, 1.0);
    score -= 20.0 * (high_frequency as f64 / operations as f64);
    if score < 0.0 {
        score = 0.0;
    }

    // Round to nearest; `f64::round` is unavailable without `std`.
    (score + 0.5) as u32
}
