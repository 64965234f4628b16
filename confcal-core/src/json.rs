//! Total accessors over untyped JSON.
//!
//! Upstream agenda data is inconsistent: ids are sometimes numbers, optional
//! records are sometimes `null` or a bare string. Every accessor here treats a
//! type mismatch exactly like a missing value and never panics.

use serde_json::{Map, Value};

pub trait JsonExt {
    /// Child value under `key`, if `self` is an object holding it.
    fn field(&self, key: &str) -> Option<&Value>;

    /// Child object under `key`.
    fn object(&self, key: &str) -> Option<&Map<String, Value>>;

    /// String under `key`, or `""` when absent or not a string.
    fn str_or_empty(&self, key: &str) -> &str;

    /// String under `key` with integral numbers rendered as text.
    fn key_string(&self, key: &str) -> Option<String>;
}

impl JsonExt for Value {
    fn field(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    fn object(&self, key: &str) -> Option<&Map<String, Value>> {
        self.field(key).and_then(Value::as_object)
    }

    fn str_or_empty(&self, key: &str) -> &str {
        self.field(key).and_then(Value::as_str).unwrap_or("")
    }

    fn key_string(&self, key: &str) -> Option<String> {
        self.field(key).and_then(value_as_key)
    }
}

/// Render a scalar usable as a lookup key: strings as-is, integers as decimal.
pub fn value_as_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => n
            .as_i64()
            .map(|i| i.to_string())
            .or_else(|| n.as_u64().map(|u| u.to_string())),
        _ => None,
    }
}

/// Read an integral number of seconds. Floats are accepted only when they
/// carry no fractional part.
pub fn value_as_epoch(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}
