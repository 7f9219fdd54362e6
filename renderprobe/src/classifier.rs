use alloc::borrow::ToOwned;
use alloc::collections::VecDeque;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::alerts::{Alert, AlertLog};
use crate::equality::{Snapshot, changed_keys};
use crate::key::IdMap;

/// Why a render happened, as far as the classifier can tell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderReason {
    /// First snapshot seen for this tracked id.
    First,
    /// At least one tracked input changed.
    Necessary,
    /// No tracked input changed; the render was avoidable.
    Unnecessary,
}

/// The classification of one render of one tracked unit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ClassificationRecord {
    pub tracked_id: String,
    pub reason: RenderReason,
    /// The snapshot keys whose values differ from the previous snapshot,
    /// sorted by key.
    pub changed_keys: Vec<String>,
    pub timestamp_ms: u64,
}

/// Configuration for [`RenderClassifier`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassifierOptions {
    /// Number of recent classification records kept per tracked id.
    pub history_cap: usize,
}

impl ClassifierOptions {
    pub const DEFAULT_HISTORY_CAP: usize = 20;

    pub fn new() -> Self {
        Self {
            history_cap: Self::DEFAULT_HISTORY_CAP,
        }
    }

    pub fn with_history_cap(mut self, history_cap: usize) -> Self {
        self.history_cap = history_cap.max(1);
        self
    }
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Compares successive input snapshots per tracked unit and classifies each
/// render as first/necessary/unnecessary.
///
/// Each snapshot key is compared independently against the stored baseline
/// (per-key value equality, not whole-snapshot equality), so the changed-keys
/// list is precise. Keys that appear or disappear on a known tracked id count
/// as changed. The baseline is replaced on every call.
#[derive(Clone, Debug)]
pub struct RenderClassifier {
    options: ClassifierOptions,
    baselines: IdMap<Snapshot>,
    history: IdMap<VecDeque<ClassificationRecord>>,
}

impl RenderClassifier {
    pub fn new(options: ClassifierOptions) -> Self {
        Self {
            options,
            baselines: IdMap::new(),
            history: IdMap::new(),
        }
    }

    pub fn options(&self) -> &ClassifierOptions {
        &self.options
    }

    /// Classifies one render of `tracked_id` against the stored baseline.
    ///
    /// An unnecessary render (no changed keys) appends one warning alert with
    /// the tracked id as its source.
    pub fn classify(
        &mut self,
        tracked_id: &str,
        snapshot: Snapshot,
        now_ms: u64,
        alerts: &mut AlertLog,
    ) -> ClassificationRecord {
        let (reason, changed) = match self.baselines.get(tracked_id) {
            None => (RenderReason::First, Vec::new()),
            Some(baseline) => {
                let changed = changed_keys(baseline, &snapshot);
                if changed.is_empty() {
                    (RenderReason::Unnecessary, changed)
                } else {
                    (RenderReason::Necessary, changed)
                }
            }
        };

        if reason == RenderReason::Unnecessary {
            pwarn!(tracked_id, "unnecessary render");
            alerts.push(Alert::warning(
                tracked_id,
                format!("`{tracked_id}` re-rendered with no changed inputs"),
                now_ms,
            ));
        } else {
            ptrace!(tracked_id, changed = changed.len(), "classified render");
        }

        self.baselines.insert(tracked_id.to_owned(), snapshot);

        let record = ClassificationRecord {
            tracked_id: tracked_id.to_owned(),
            reason,
            changed_keys: changed,
            timestamp_ms: now_ms,
        };
        let history = self.history.entry(tracked_id.to_owned()).or_default();
        if history.len() >= self.options.history_cap {
            history.pop_front();
        }
        history.push_back(record.clone());
        record
    }

    /// The rolling classification history for `tracked_id`, oldest first.
    pub fn history(&self, tracked_id: &str) -> Option<&VecDeque<ClassificationRecord>> {
        self.history.get(tracked_id)
    }

    pub fn baseline(&self, tracked_id: &str) -> Option<&Snapshot> {
        self.baselines.get(tracked_id)
    }

    pub fn tracked_count(&self) -> usize {
        self.baselines.len()
    }

    pub fn for_each_history(
        &self,
        mut f: impl FnMut(&str, &VecDeque<ClassificationRecord>),
    ) {
        for (id, history) in self.history.iter() {
            f(id, history);
        }
    }

    pub fn clear(&mut self, tracked_id: &str) {
        self.baselines.remove(tracked_id);
        self.history.remove(tracked_id);
    }

    pub fn clear_all(&mut self) {
        self.baselines.clear();
        self.history.clear();
    }
}

impl Default for RenderClassifier {
    fn default() -> Self {
        Self::new(ClassifierOptions::new())
    }
}

/// Mount/update/teardown bookkeeping for one tracked unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct LifecycleEntry {
    pub mounted_ms: u64,
    pub update_count: u64,
    /// Set by [`LifecycleTracker::teardown`].
    pub total_lifetime_ms: Option<u64>,
}

/// Companion to [`RenderClassifier`], keyed by tracked id.
#[derive(Clone, Debug, Default)]
pub struct LifecycleTracker {
    entries: IdMap<LifecycleEntry>,
}

impl LifecycleTracker {
    pub fn new() -> Self {
        Self {
            entries: IdMap::new(),
        }
    }

    /// Records the mount time on first registration; later calls are no-ops.
    pub fn mount(&mut self, tracked_id: &str, now_ms: u64) {
        self.entries
            .entry(tracked_id.to_owned())
            .or_insert(LifecycleEntry {
                mounted_ms: now_ms,
                update_count: 0,
                total_lifetime_ms: None,
            });
    }

    /// Increments the update count, mounting the id first if unseen.
    pub fn record_update(&mut self, tracked_id: &str, now_ms: u64) {
        let entry = self
            .entries
            .entry(tracked_id.to_owned())
            .or_insert(LifecycleEntry {
                mounted_ms: now_ms,
                update_count: 0,
                total_lifetime_ms: None,
            });
        entry.update_count = entry.update_count.saturating_add(1);
    }

    /// Records and returns the total lifetime of `tracked_id`.
    ///
    /// Returns `None` for an unknown id.
    pub fn teardown(&mut self, tracked_id: &str, now_ms: u64) -> Option<u64> {
        let entry = self.entries.get_mut(tracked_id)?;
        let lifetime = now_ms.saturating_sub(entry.mounted_ms);
        entry.total_lifetime_ms = Some(lifetime);
        pdebug!(tracked_id, lifetime, "teardown");
        Some(lifetime)
    }

    pub fn entry(&self, tracked_id: &str) -> Option<&LifecycleEntry> {
        self.entries.get(tracked_id)
    }

    pub fn for_each_entry(&self, mut f: impl FnMut(&str, &LifecycleEntry)) {
        for (id, entry) in self.entries.iter() {
            f(id, entry);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
