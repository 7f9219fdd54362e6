use alloc::string::String;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

/// Map from a tracked/operation id to its per-id state.
///
/// `HashMap` under `std`, `BTreeMap` otherwise.
#[cfg(feature = "std")]
pub type IdMap<V> = HashMap<String, V>;
/// Map from a tracked/operation id to its per-id state.
///
/// `HashMap` under `std`, `BTreeMap` otherwise.
#[cfg(not(feature = "std"))]
pub type IdMap<V> = BTreeMap<String, V>;

#[cfg(feature = "std")]
pub(crate) type MemoMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type MemoMap<K, V> = BTreeMap<K, V>;

#[cfg(feature = "std")]
#[doc(hidden)]
pub trait MemoKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq + Clone> MemoKey for K {}

#[cfg(not(feature = "std"))]
#[doc(hidden)]
pub trait MemoKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<K: Ord + Clone> MemoKey for K {}
