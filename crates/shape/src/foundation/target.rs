//! The per-call accumulator and the success value of a check.

use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::sync::Arc;

// ============================================================================
// TARGET
// ============================================================================

/// Sink an object-shape check writes its resolved fields into.
///
/// Cloning a `Target` clones the handle, not the map: branches of an `Or`
/// evaluated against the same target all write into one object. `And`
/// gives each branch a [`fork`](Target::fork) and merges them back in
/// declaration order.
/// Sibling field tasks of one shape own disjoint keys, so the lock is only
/// ever taken for short, non-overlapping writes and never across an await.
#[derive(Debug, Clone, Default)]
pub struct Target {
    fields: Arc<Mutex<Map<String, Value>>>,
}

impl Target {
    /// An empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn from_map(map: Map<String, Value>) -> Self {
        Self {
            fields: Arc::new(Mutex::new(map)),
        }
    }

    /// Accumulator for a nested field.
    ///
    /// Seeded with a copy of what this target already holds under `key`
    /// when that is an object, empty otherwise.
    #[must_use]
    pub fn child(&self, key: &str) -> Self {
        let seed = self
            .fields
            .lock()
            .get(key)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        Self::from_map(seed)
    }

    /// Detached copy of the whole accumulator.
    ///
    /// Writes to the fork stay invisible here until [`Target::merge`].
    #[must_use]
    pub fn fork(&self) -> Self {
        Self::from_map(self.fields.lock().clone())
    }

    /// Folds `other` into this target.
    ///
    /// New keys are appended after existing ones, existing keys keep their
    /// position. Objects present on both sides merge key by key.
    pub fn merge(&self, other: &Self) {
        let incoming = other.fields.lock().clone();
        merge_objects(&mut self.fields.lock(), incoming);
    }

    /// Writes one field.
    pub fn insert(&self, key: impl Into<String>, value: Value) {
        self.fields.lock().insert(key.into(), value);
    }

    /// Reads one field.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.fields.lock().get(key).cloned()
    }

    /// Whether `key` has been written.
    pub fn contains(&self, key: &str) -> bool {
        self.fields.lock().contains_key(key)
    }

    /// The accumulated object as it stands now.
    pub fn snapshot(&self) -> Value {
        Value::Object(self.fields.lock().clone())
    }
}

fn merge_objects(into: &mut Map<String, Value>, from: Map<String, Value>) {
    for (key, value) in from {
        match value {
            Value::Object(incoming) => match into.get_mut(&key) {
                Some(Value::Object(existing)) => merge_objects(existing, incoming),
                _ => {
                    into.insert(key, Value::Object(incoming));
                }
            },
            other => {
                into.insert(key, other);
            }
        }
    }
}

// ============================================================================
// RESOLVED VALUE
// ============================================================================

/// Success value of a check.
///
/// `defaulted` is set when the value was substituted by a `Maybe` default,
/// so the object-shape checker keeps it even when it is falsy and the
/// input never had the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: Value,
    pub defaulted: bool,
}

impl Resolved {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            defaulted: false,
        }
    }

    pub fn defaulted(value: Value) -> Self {
        Self {
            value,
            defaulted: true,
        }
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Target write rule: keep a field that resolved to something truthy,
    /// that came from a default, or whose key was present in the input.
    pub(crate) fn should_write(&self, key_present: bool) -> bool {
        key_present || self.defaulted || is_truthy(&self.value)
    }
}

impl From<Value> for Resolved {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

/// Loose truthiness: `null`, `false`, `0`, and `""` are falsy, everything
/// else (including empty arrays and objects) is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clones_share_storage() {
        let target = Target::new();
        let alias = target.clone();
        alias.insert("a", json!(1));
        assert_eq!(target.get("a"), Some(json!(1)));
        assert_eq!(target.snapshot(), json!({ "a": 1 }));
    }

    #[test]
    fn child_is_seeded_but_detached() {
        let target = Target::new();
        target.insert("address", json!({ "city": "Oslo" }));

        let child = target.child("address");
        assert_eq!(child.get("city"), Some(json!("Oslo")));

        child.insert("zip", json!("0150"));
        assert_eq!(target.get("address"), Some(json!({ "city": "Oslo" })));
    }

    #[test]
    fn child_of_non_object_is_empty() {
        let target = Target::new();
        target.insert("name", json!("bob"));
        assert_eq!(target.child("name").snapshot(), json!({}));
        assert_eq!(target.child("missing").snapshot(), json!({}));
    }

    #[test]
    fn snapshot_keeps_insertion_order() {
        let target = Target::new();
        target.insert("z", json!(1));
        target.insert("a", json!(2));
        assert_eq!(target.snapshot().to_string(), r#"{"z":1,"a":2}"#);
    }

    #[test]
    fn fork_is_detached_until_merged() {
        let target = Target::new();
        target.insert("a", json!(1));

        let fork = target.fork();
        fork.insert("b", json!(2));
        assert!(!target.contains("b"));

        target.merge(&fork);
        assert_eq!(target.snapshot().to_string(), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn merge_combines_nested_objects() {
        let target = Target::new();
        target.insert("address", json!({ "city": "Oslo" }));

        let first = target.fork();
        first.insert("address", json!({ "city": "Oslo", "zip": "0150" }));
        let second = target.fork();
        second.insert("address", json!({ "city": "Oslo", "street": "Main" }));

        target.merge(&first);
        target.merge(&second);
        assert_eq!(
            target.get("address"),
            Some(json!({ "city": "Oslo", "zip": "0150", "street": "Main" }))
        );
    }

    #[test]
    fn truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(-1), json!("0"), json!([]), json!({})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }

    #[test]
    fn write_rule() {
        assert!(!Resolved::new(json!(null)).should_write(false));
        assert!(Resolved::new(json!(null)).should_write(true));
        assert!(Resolved::new(json!("x")).should_write(false));
        assert!(Resolved::defaulted(json!(0)).should_write(false));
    }
}
