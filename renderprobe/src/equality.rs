use alloc::string::String;
use alloc::vec::Vec;

use serde_json::{Number, Value};

/// An ordered mapping from key name to an opaque value, representing a
/// computation's current inputs (e.g. component props/state).
///
/// Keys are expected to be stable across calls for the same tracked unit.
pub type Snapshot = serde_json::Map<String, Value>;

/// Structural value comparison.
///
/// - Scalars compare by value. Numbers are widened to `f64` when their integer
///   representations differ, so `1` and `1.0` are equal.
/// - Arrays compare length first, then element-wise (recursively).
/// - Objects compare key-set equality, then value-wise (recursively), ignoring
///   key order.
/// - Two values of different runtime shape (an array vs. an object, a string
///   vs. a number, ...) are unequal.
///
/// Recursion is unbounded in depth. Cyclic structures are unsupported by
/// design; `serde_json::Value` trees cannot be cyclic, so the precondition
/// holds by construction.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(a, b)| deep_equal(a, b))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, va)| y.get(k).is_some_and(|vb| deep_equal(va, vb)))
        }
        _ => false,
    }
}

/// Element-wise [`deep_equal`] over two dependency lists.
///
/// Lists of different length are unequal.
pub fn deep_equal_slices(a: &[Value], b: &[Value]) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(a, b)| deep_equal(a, b))
}

fn numbers_equal(x: &Number, y: &Number) -> bool {
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return a == b;
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Returns the keys whose values differ between `baseline` and `current`.
///
/// Each key is compared independently (per-key value equality), so the result
/// is a precise changed-keys list rather than a single yes/no over the whole
/// snapshot. Keys present on only one side count as changed. The output is
/// sorted by key.
pub fn changed_keys(baseline: &Snapshot, current: &Snapshot) -> Vec<String> {
    let mut out = Vec::new();
    for (key, cur) in current {
        match baseline.get(key) {
            Some(prev) if deep_equal(prev, cur) => {}
            _ => out.push(key.clone()),
        }
    }
    for key in baseline.keys() {
        if !current.contains_key(key) {
            out.push(key.clone());
        }
    }
    out.sort_unstable();
    out
}

/// Structural equality at the type level, for values the memoization layer can
/// hold behind a stable reference.
pub trait DeepEq {
    fn deep_eq(&self, other: &Self) -> bool;
}

impl DeepEq for Value {
    fn deep_eq(&self, other: &Self) -> bool {
        deep_equal(self, other)
    }
}

impl DeepEq for Vec<Value> {
    fn deep_eq(&self, other: &Self) -> bool {
        deep_equal_slices(self, other)
    }
}

impl DeepEq for Snapshot {
    fn deep_eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, va)| other.get(k).is_some_and(|vb| deep_equal(va, vb)))
    }
}
