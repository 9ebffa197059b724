//! Saving and loading key mappings.
//!
//! Only key sets persist. Callbacks are behavior, not data: they are stripped
//! when a registry is snapshotted, and bindings restored from a file start
//! with empty callback lists. Register callbacks again after loading.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use bindkit_core::{Error, KeySet, Result};
use tracing::info;

use crate::registry::Registry;

/// Callback-free form of a registry: state name → binding name → keys.
pub type StateTree = BTreeMap<String, BTreeMap<String, KeySet>>;

/// Text codec for [`StateTree`]s.
///
/// The registry itself knows no encoding; implementations live in their own
/// crate and are handed to [`Registry::save`] and [`Registry::load`].
pub trait PersistenceAdapter {
    /// Encode a tree.
    fn serialize(&self, tree: &StateTree) -> Result<String>;

    /// Decode a tree. Malformed input is an error, never a partial tree.
    fn deserialize(&self, text: &str) -> Result<StateTree>;
}

/// Check that a tree has no empty state, binding or key names.
///
/// Applied both before saving and after loading, so anything [`Registry::save`]
/// writes can be read back by [`Registry::load`]. Whitespace is a valid name
/// (some hosts name the space bar `" "`).
pub fn validate_tree(tree: &StateTree) -> Result<()> {
    for (state, bindings) in tree {
        if state.is_empty() {
            return Err(Error::InvalidData("state name cannot be empty".into()));
        }
        for (binding, keys) in bindings {
            if binding.is_empty() {
                return Err(Error::InvalidData(format!(
                    "binding name cannot be empty (state '{state}')"
                )));
            }
            if keys.iter().any(|key| key.is_empty()) {
                return Err(Error::InvalidData(format!(
                    "empty key in binding '{state}.{binding}'"
                )));
            }
        }
    }
    Ok(())
}

impl Registry {
    /// Copy the state tree without callbacks.
    #[must_use]
    pub fn snapshot(&self) -> StateTree {
        self.states
            .iter()
            .map(|(state, bindings)| {
                let bindings = bindings
                    .iter()
                    .map(|(name, binding)| (name.clone(), binding.keys().clone()))
                    .collect();
                (state.clone(), bindings)
            })
            .collect()
    }

    /// Replace the whole state tree.
    ///
    /// Every binding is recreated with empty callback lists; missing mouse
    /// bindings are added back. The active state and motion callbacks are
    /// kept.
    pub fn restore(&mut self, tree: StateTree) {
        self.clear_states();
        for (state, bindings) in tree {
            if bindings.is_empty() {
                self.states.entry(state).or_default();
                continue;
            }
            for (name, keys) in bindings {
                self.binding(&state, &name).bind_many(keys);
            }
        }
        self.mouse().ensure_bindings();
    }

    /// Encode the key mappings with `adapter` and write them to `path`.
    ///
    /// Nothing is written if the tree holds a name [`Registry::load`] would
    /// reject.
    pub fn save(&self, path: impl AsRef<Path>, adapter: &impl PersistenceAdapter) -> Result<()> {
        let path = path.as_ref();
        let tree = self.snapshot();
        validate_tree(&tree)?;
        let text = adapter.serialize(&tree)?;
        fs::write(path, text)?;
        info!("Bindings saved: {}", path.display());
        Ok(())
    }

    /// Read key mappings from `path` and replace the state tree with them.
    ///
    /// On any error the registry is left untouched.
    pub fn load(&mut self, path: impl AsRef<Path>, adapter: &impl PersistenceAdapter) -> Result<()> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let tree = adapter.deserialize(&text)?;
        validate_tree(&tree)?;
        self.restore(tree);
        info!("Bindings loaded: {}", path.display());
        Ok(())
    }
}
