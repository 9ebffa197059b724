//! RON adapter.

use bindkit_core::{Error, Result};
use bindkit_input::{PersistenceAdapter, StateTree};
use ron::ser::PrettyConfig;

use crate::record::{from_record, to_record, StateTreeRecord};

/// Reads and writes bindings as RON (Rusty Object Notation).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RonAdapter;

impl PersistenceAdapter for RonAdapter {
    fn serialize(&self, tree: &StateTree) -> Result<String> {
        ron::ser::to_string_pretty(&to_record(tree), PrettyConfig::default())
            .map_err(|e| Error::Serialization(format!("failed to encode bindings: {e}")))
    }

    fn deserialize(&self, text: &str) -> Result<StateTree> {
        let record: StateTreeRecord = ron::from_str(text)
            .map_err(|e| Error::Serialization(format!("invalid bindings file: {e}")))?;
        Ok(from_record(record))
    }
}
