//! JSON adapter.

use bindkit_core::{Error, Result};
use bindkit_input::{PersistenceAdapter, StateTree};

use crate::record::{from_record, to_record, StateTreeRecord};

/// Reads and writes bindings as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonAdapter {
    pretty: bool,
}

impl JsonAdapter {
    /// Indented output.
    #[must_use]
    pub const fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Single-line output.
    #[must_use]
    pub const fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonAdapter {
    fn default() -> Self {
        Self::pretty()
    }
}

impl PersistenceAdapter for JsonAdapter {
    fn serialize(&self, tree: &StateTree) -> Result<String> {
        let record = to_record(tree);
        let text = if self.pretty {
            serde_json::to_string_pretty(&record)
        } else {
            serde_json::to_string(&record)
        };
        text.map_err(|e| Error::Serialization(format!("failed to encode bindings: {e}")))
    }

    fn deserialize(&self, text: &str) -> Result<StateTree> {
        let record: StateTreeRecord = serde_json::from_str(text)
            .map_err(|e| Error::Serialization(format!("invalid bindings file: {e}")))?;
        Ok(from_record(record))
    }
}
