//! Generic traversal over loosely-shaped JSON documents
//!
//! Loot table definitions have no fixed schema: item references can sit at
//! any depth, inside objects or arrays. `walk` visits every node of the
//! tagged union (object, array, scalar) so callers only decide what to do
//! with the nodes they care about.

use serde_json::Value;
use std::collections::BTreeSet;

/// Callbacks invoked by [`walk`]
///
/// Both methods default to doing nothing, so a visitor only overrides the
/// node kind it needs.
pub trait Visitor {
    /// Called for every `key: value` pair of every object, before the value
    /// itself is walked.
    fn visit_entry(&mut self, _key: &str, _value: &Value) {}

    /// Called for every non-container value (string, number, bool, null).
    fn visit_scalar(&mut self, _value: &Value) {}
}

/// Walk a document depth-first, calling the visitor on every node
pub fn walk<V: Visitor + ?Sized>(value: &Value, visitor: &mut V) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                visitor.visit_entry(key, child);
                walk(child, visitor);
            }
        }
        Value::Array(items) => {
            for child in items {
                walk(child, visitor);
            }
        }
        scalar => visitor.visit_scalar(scalar),
    }
}

struct KeyCollector<'a> {
    key: &'a str,
    found: BTreeSet<String>,
}

impl Visitor for KeyCollector<'_> {
    fn visit_entry(&mut self, key: &str, value: &Value) {
        if key == self.key {
            if let Value::String(s) = value {
                self.found.insert(s.clone());
            }
        }
    }
}

/// Collect every string stored under `key`, at any nesting depth
///
/// Non-string values under the key are ignored. The result is sorted and
/// deduplicated.
pub fn collect_strings_for_key(value: &Value, key: &str) -> BTreeSet<String> {
    let mut collector = KeyCollector {
        key,
        found: BTreeSet::new(),
    };
    walk(value, &mut collector);
    collector.found
}
