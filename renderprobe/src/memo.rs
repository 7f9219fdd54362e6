use alloc::sync::Arc;
use alloc::vec::Vec;

use serde_json::Value;

use crate::equality::{DeepEq, deep_equal_slices};
use crate::key::{MemoKey, MemoMap};

/// A cached value together with the dependency snapshot that produced it.
///
/// Owned exclusively by the cache instance that created it; replaced, never
/// mutated, when dependencies change.
#[derive(Clone, Debug)]
pub struct CacheEntry<T> {
    deps: Vec<Value>,
    value: T,
    created_at_ms: u64,
}

impl<T> CacheEntry<T> {
    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn deps(&self) -> &[Value] {
        &self.deps
    }

    pub fn created_at_ms(&self) -> u64 {
        self.created_at_ms
    }
}

/// A dependency-keyed single-entry cache.
///
/// Holds the value produced by the last-seen dependency snapshot; the factory
/// runs exactly once per distinct snapshot (compared with
/// [`deep_equal_slices`][crate::deep_equal_slices], so structurally-equal but
/// freshly allocated dependency lists still hit).
#[derive(Clone, Debug, Default)]
pub struct DepsCache<T> {
    entry: Option<CacheEntry<T>>,
}

impl<T> DepsCache<T> {
    pub fn new() -> Self {
        Self { entry: None }
    }

    /// Returns the cached value if `deps` is deep-equal to the last-seen
    /// dependency snapshot, otherwise computes, stores and returns a new one.
    pub fn get_or_compute(
        &mut self,
        deps: &[Value],
        factory: impl FnOnce() -> T,
        now_ms: u64,
    ) -> &T {
        match self.try_get_or_compute::<core::convert::Infallible>(
            deps,
            || Ok(factory()),
            now_ms,
        ) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Fallible variant of [`Self::get_or_compute`].
    ///
    /// If the factory fails, no new entry is committed: the error propagates
    /// to the caller and the previous entry (if any) stays in place, so a
    /// later call with the previous dependencies still hits.
    pub fn try_get_or_compute<E>(
        &mut self,
        deps: &[Value],
        factory: impl FnOnce() -> Result<T, E>,
        now_ms: u64,
    ) -> Result<&T, E> {
        let entry = match self.entry.take() {
            Some(entry) if deep_equal_slices(&entry.deps, deps) => {
                ptrace!("deps cache hit");
                entry
            }
            prev => {
                pdebug!(deps = deps.len(), "deps cache miss");
                match factory() {
                    Ok(value) => CacheEntry {
                        deps: deps.to_vec(),
                        value,
                        created_at_ms: now_ms,
                    },
                    Err(err) => {
                        self.entry = prev;
                        return Err(err);
                    }
                }
            }
        };
        Ok(&self.entry.insert(entry).value)
    }

    pub fn value(&self) -> Option<&T> {
        self.entry.as_ref().map(|e| &e.value)
    }

    pub fn entry(&self) -> Option<&CacheEntry<T>> {
        self.entry.as_ref()
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}

/// Keeps a previously cached reference alive as long as fresh values stay
/// structurally equal to it.
///
/// Downstream consumers that compare by reference (`Arc::ptr_eq`) then stop
/// treating structurally-identical values as "changed".
#[derive(Clone, Debug, Default)]
pub struct StableRef<T> {
    current: Option<Arc<T>>,
}

impl<T: DeepEq> StableRef<T> {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Returns the previously cached reference if `next` is deep-equal to it,
    /// otherwise adopts `next` as the new reference.
    pub fn adopt(&mut self, next: T) -> Arc<T> {
        if let Some(current) = &self.current {
            if current.deep_eq(&next) {
                return Arc::clone(current);
            }
        }
        let next = Arc::new(next);
        self.current = Some(Arc::clone(&next));
        next
    }

    pub fn current(&self) -> Option<&Arc<T>> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

/// The deferred computation scheduled by a [`DebouncedCache`].
pub type DebouncedFactory<T> = Arc<dyn Fn(&[Value]) -> T + Send + Sync>;

#[derive(Clone, Debug)]
struct Pending {
    deps: Vec<Value>,
    deadline_ms: u64,
}

/// A trailing-edge debounced dependency cache.
///
/// Like the rest of the engine, this holds no timer of its own: the host
/// reports dependency changes via [`Self::set_deps`] and drives time by
/// calling [`Self::tick`] each frame/timer tick. Every dependency change
/// before the delay elapses replaces the pending computation and re-arms the
/// deadline (last-writer-wins; at most one pending computation per cache).
/// [`Self::value`] returns the previously committed value until the delayed
/// computation resolves.
#[derive(Clone)]
pub struct DebouncedCache<T> {
    factory: DebouncedFactory<T>,
    delay_ms: u64,
    committed: Option<CacheEntry<T>>,
    pending: Option<Pending>,
}

impl<T> DebouncedCache<T> {
    pub fn new(delay_ms: u64, factory: impl Fn(&[Value]) -> T + Send + Sync + 'static) -> Self {
        Self {
            factory: Arc::new(factory),
            delay_ms,
            committed: None,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Reports the current dependencies.
    ///
    /// Unchanged dependencies (deep-equal to the pending ones, or to the
    /// committed ones when nothing is pending) are not a change and do not
    /// re-arm the deadline.
    pub fn set_deps(&mut self, deps: &[Value], now_ms: u64) {
        if let Some(pending) = &self.pending {
            if deep_equal_slices(&pending.deps, deps) {
                return;
            }
        } else if let Some(committed) = &self.committed {
            if deep_equal_slices(&committed.deps, deps) {
                return;
            }
        }
        ptrace!(now_ms, "debounce re-armed");
        self.pending = Some(Pending {
            deps: deps.to_vec(),
            deadline_ms: now_ms.saturating_add(self.delay_ms),
        });
    }

    /// Advances the cache. Commits and returns the pending computation once
    /// its deadline has passed, otherwise returns `None`.
    pub fn tick(&mut self, now_ms: u64) -> Option<&T> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|p| now_ms >= p.deadline_ms);
        if !due {
            return None;
        }
        self.commit(now_ms)
    }

    /// Commits the pending computation immediately, ignoring the deadline.
    pub fn flush(&mut self, now_ms: u64) -> Option<&T> {
        if self.pending.is_none() {
            return None;
        }
        self.commit(now_ms)
    }

    fn commit(&mut self, now_ms: u64) -> Option<&T> {
        let pending = self.pending.take()?;
        pdebug!(now_ms, "debounce committed");
        let value = (self.factory)(&pending.deps);
        let entry = self.committed.insert(CacheEntry {
            deps: pending.deps,
            value,
            created_at_ms: now_ms,
        });
        Some(&entry.value)
    }

    /// The last committed value, if any.
    pub fn value(&self) -> Option<&T> {
        self.committed.as_ref().map(|e| &e.value)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    pub fn clear(&mut self) {
        self.pending = None;
        self.committed = None;
    }
}

impl<T> core::fmt::Debug for DebouncedCache<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DebouncedCache")
            .field("delay_ms", &self.delay_ms)
            .field("has_committed", &self.committed.is_some())
            .field("has_pending", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}

/// Configuration for [`Memo`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoOptions {
    /// Maximum number of cached entries. The least-recently-used entry is
    /// evicted when the cache is full.
    pub capacity: usize,
}

impl MemoOptions {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

impl Default for MemoOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
struct Slot<V> {
    value: V,
    last_used: u64,
}

/// A general-purpose bounded keyed cache with least-recently-used eviction.
///
/// The caller supplies the key (the equivalent of a `keySelector`); values are
/// computed at most once per live key.
#[derive(Clone, Debug)]
pub struct Memo<K, V> {
    map: MemoMap<K, Slot<V>>,
    capacity: usize,
    tick: u64,
}

impl<K: MemoKey, V> Memo<K, V> {
    pub fn new(options: MemoOptions) -> Self {
        Self {
            map: MemoMap::new(),
            capacity: options.capacity.max(1),
            tick: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Returns the cached value for `key`, computing and inserting it first
    /// when absent. Insertion into a full cache evicts the least-recently-used
    /// entry.
    pub fn get_or_compute_with(&mut self, key: K, f: impl FnOnce() -> V) -> &V {
        self.tick = self.tick.saturating_add(1);
        let tick = self.tick;
        if !self.map.contains_key(&key) && self.map.len() >= self.capacity {
            self.evict_lru();
        }
        let slot = self.map.entry(key).or_insert_with(|| Slot {
            value: f(),
            last_used: 0,
        });
        slot.last_used = tick;
        &slot.value
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    fn evict_lru(&mut self) {
        // Linear scan; the capacity bound keeps this cheap.
        let victim = self
            .map
            .iter()
            .min_by_key(|(_, slot)| slot.last_used)
            .map(|(key, _)| key.clone());
        if let Some(key) = victim {
            pdebug!("memo evicted LRU entry");
            self.map.remove(&key);
        }
    }
}

/// `memoize(fn, key_selector)`: wraps a function with a bounded keyed cache.
///
/// `key_selector` maps the argument to the cache key (Rust has no implicit
/// argument-tuple hashing, so the selector is required). Values are cloned
/// out of the cache on every call.
#[derive(Clone)]
pub struct MemoizedFn<A, K, V> {
    cache: Memo<K, V>,
    f: Arc<dyn Fn(&A) -> V + Send + Sync>,
    key_selector: Arc<dyn Fn(&A) -> K + Send + Sync>,
}

impl<A, K: MemoKey, V: Clone> MemoizedFn<A, K, V> {
    pub fn new(
        options: MemoOptions,
        f: impl Fn(&A) -> V + Send + Sync + 'static,
        key_selector: impl Fn(&A) -> K + Send + Sync + 'static,
    ) -> Self {
        Self {
            cache: Memo::new(options),
            f: Arc::new(f),
            key_selector: Arc::new(key_selector),
        }
    }

    pub fn call(&mut self, arg: &A) -> V {
        let key = (self.key_selector)(arg);
        let f = Arc::clone(&self.f);
        self.cache.get_or_compute_with(key, || f(arg)).clone()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl<A, K, V> core::fmt::Debug for MemoizedFn<A, K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MemoizedFn")
            .field("len", &self.cache.map.len())
            .finish_non_exhaustive()
    }
}
