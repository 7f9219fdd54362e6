use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

/// How serious an alert is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A single diagnostics entry raised by the profiler or classifier.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Alert {
    pub severity: Severity,
    pub message: String,
    /// The operation or tracked id that raised the alert.
    pub source: String,
    pub timestamp_ms: u64,
}

impl Alert {
    pub fn warning(source: impl Into<String>, message: impl Into<String>, now_ms: u64) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            source: source.into(),
            timestamp_ms: now_ms,
        }
    }

    pub fn error(source: impl Into<String>, message: impl Into<String>, now_ms: u64) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            source: source.into(),
            timestamp_ms: now_ms,
        }
    }
}

/// A callback fired for every alert appended to an [`AlertLog`].
pub type OnAlertCallback = Arc<dyn Fn(&Alert) + Send + Sync>;

/// An append-only bounded alert log with FIFO eviction.
///
/// When the log is full, appending evicts the oldest entry, so the log always
/// holds the most recent alerts. Queries on an empty log or an unknown source
/// return empty results.
#[derive(Clone)]
pub struct AlertLog {
    entries: VecDeque<Alert>,
    capacity: usize,
    on_alert: Option<OnAlertCallback>,
}

impl AlertLog {
    pub const DEFAULT_CAPACITY: usize = 100;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
            on_alert: None,
        }
    }

    /// Sets an observer fired for every appended alert (after rotation).
    pub fn set_on_alert(&mut self, on_alert: Option<impl Fn(&Alert) + Send + Sync + 'static>) {
        self.on_alert = on_alert.map(|f| Arc::new(f) as _);
    }

    pub fn push(&mut self, alert: Alert) {
        pwarn!(
            source = alert.source.as_str(),
            message = alert.message.as_str(),
            "alert"
        );
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(alert);
        if let Some(cb) = &self.on_alert {
            if let Some(alert) = self.entries.back() {
                cb(alert);
            }
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all alerts, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.entries.iter()
    }

    pub fn for_each_by_source(&self, source: &str, mut f: impl FnMut(&Alert)) {
        for alert in &self.entries {
            if alert.source == source {
                f(alert);
            }
        }
    }

    /// Collects the alerts raised by `source` into `out` (clears `out` first).
    pub fn collect_by_source(&self, source: &str, out: &mut Vec<Alert>) {
        out.clear();
        self.for_each_by_source(source, |alert| out.push(alert.clone()));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for AlertLog {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for AlertLog {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AlertLog")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
