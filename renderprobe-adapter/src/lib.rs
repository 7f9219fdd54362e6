//! Host-facing utilities for the `renderprobe` crate.
//!
//! The `renderprobe` crate is UI-agnostic and focuses on the core math and state. This crate
//! provides the small, framework-neutral pieces a host usually wraps around it:
//!
//! - [`Monitor`]: one profiler, classifier, lifecycle tracker and alert log bundled behind a
//!   single facade, with an optional instrumentation sink
//! - [`ProbeEvent`] / [`InstrumentationSink`]: a push channel for alerts, classifications and
//!   finished operations
//! - [`Registry`]: named monitors with explicit ownership (no global state)
//!
//! This crate is intentionally framework-agnostic (no DOM/TUI bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod monitor;
mod registry;
mod sink;


pub use monitor::{ComponentPerformance, Monitor, MonitorOptions};
pub use registry::Registry;
pub use sink::{InstrumentationSink, ProbeEvent};
