//! A headless render-performance instrumentation and windowing engine.
//!
//! For host-side utilities (monitors, registries, instrumentation sinks), see the
//! `renderprobe-adapter` crate.
//!
//! This crate focuses on the core facts a UI layer needs to render large ordered
//! collections efficiently and to audit its own render behavior: minimal visible
//! index ranges, dependency-keyed memoization with structural invalidation,
//! bounded rolling duration statistics per named operation, and classification of
//! repeated computations as necessary or unnecessary.
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - collection length, item extent, viewport extent and scroll offset
//! - dependency lists / input snapshots as `serde_json::Value` trees
//! - timestamps (`now_ms`) for everything that is timed
//!
//! The engine never reads a clock and never calls back into host code except
//! through explicitly configured callbacks. It computes facts; the host decides
//! what to do with them.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod alerts;
mod classifier;
mod equality;
mod key;
mod memo;
mod profiler;
mod score;
mod window;

#[cfg(test)]
mod tests;

pub use alerts::{Alert, AlertLog, OnAlertCallback, Severity};
pub use classifier::{
    ClassificationRecord, ClassifierOptions, LifecycleEntry, LifecycleTracker, RenderClassifier,
    RenderReason,
};
pub use equality::{DeepEq, Snapshot, changed_keys, deep_equal, deep_equal_slices};
pub use memo::{
    CacheEntry, DebouncedCache, DebouncedFactory, DepsCache, Memo, MemoOptions, MemoizedFn,
    StableRef,
};
pub use profiler::{Profiler, ProfilerOptions, StatsAggregate};
pub use score::{ScoreOptions, performance_score};
pub use window::{WindowOptions, WindowResult, compute_window};

pub use key::IdMap;
#[doc(hidden)]
pub use key::MemoKey;

/// Re-exported so hosts can build snapshots and dependency lists without naming
/// `serde_json` themselves.
pub use serde_json::Value;
