use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;

use renderprobe::IdMap;

use crate::monitor::{Monitor, MonitorOptions};

/// Named monitors with explicit ownership.
///
/// A host creates one registry where it wants instrumentation scoped (per
/// window, per test, per embedded dashboard) instead of sharing a process-wide
/// singleton. Monitors created through the registry inherit its default
/// options, including the sink.
pub struct Registry {
    defaults: MonitorOptions,
    monitors: IdMap<Monitor>,
}

impl Registry {
    pub fn new(defaults: MonitorOptions) -> Self {
        Self {
            defaults,
            monitors: IdMap::new(),
        }
    }

    pub fn defaults(&self) -> &MonitorOptions {
        &self.defaults
    }

    /// Returns the monitor named `name`, creating it from the registry
    /// defaults first when absent.
    pub fn get_or_create(&mut self, name: &str) -> &mut Monitor {
        self.monitors
            .entry(name.to_owned())
            .or_insert_with(|| Monitor::new(self.defaults.clone()))
    }

    pub fn monitor(&self, name: &str) -> Option<&Monitor> {
        self.monitors.get(name)
    }

    pub fn monitor_mut(&mut self, name: &str) -> Option<&mut Monitor> {
        self.monitors.get_mut(name)
    }

    /// Removes and returns the monitor named `name`.
    pub fn remove(&mut self, name: &str) -> Option<Monitor> {
        self.monitors.remove(name)
    }

    /// Collects all monitor names into `out`, sorted (clears `out` first).
    pub fn collect_names(&self, out: &mut Vec<String>) {
        out.clear();
        out.extend(self.monitors.keys().cloned());
        out.sort();
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    pub fn clear(&mut self) {
        self.monitors.clear();
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(MonitorOptions::new())
    }
}

impl core::fmt::Debug for Registry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("defaults", &self.defaults)
            .field("monitors", &self.monitors.len())
            .finish_non_exhaustive()
    }
}
