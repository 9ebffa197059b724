//! Serializable mirror of a state tree.

use std::collections::BTreeMap;

use bindkit_input::StateTree;
use serde::{Deserialize, Serialize};

/// Persisted form of one binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingRecord {
    /// Bound key identifiers.
    pub keys: Vec<String>,
}

/// Persisted form of a whole registry: state → binding → record.
pub type StateTreeRecord = BTreeMap<String, BTreeMap<String, BindingRecord>>;

pub(crate) fn to_record(tree: &StateTree) -> StateTreeRecord {
    tree.iter()
        .map(|(state, bindings)| {
            let bindings = bindings
                .iter()
                .map(|(name, keys)| {
                    let record = BindingRecord {
                        keys: keys.as_slice().to_vec(),
                    };
                    (name.clone(), record)
                })
                .collect();
            (state.clone(), bindings)
        })
        .collect()
}

/// Duplicate keys in a record collapse into one.
pub(crate) fn from_record(record: StateTreeRecord) -> StateTree {
    record
        .into_iter()
        .map(|(state, bindings)| {
            let bindings = bindings
                .into_iter()
                .map(|(name, record)| (name, record.keys.into_iter().collect()))
                .collect();
            (state, bindings)
        })
        .collect()
}
