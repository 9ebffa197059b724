//! Registry of states and their bindings.

use std::fmt;

use bindkit_core::constants::ALL_STATE;
use glam::Vec2;
use hashbrown::HashMap;
use tracing::debug;

use crate::binding::{Binding, BindingId, SharedButtonCallback};
use crate::mouse::{Mouse, SharedMotionCallback};

/// Bindings of a single state, by binding name.
pub(crate) type StateBindings = HashMap<String, Binding>;

/// Registry of input bindings grouped by state.
///
/// A (state, binding) name pair identifies exactly one [`Binding`]. Bindings
/// are created on first reference and live until the registry is dropped or
/// its tree is replaced by [`Registry::restore`].
///
/// Bindings in the reserved [`ALL_STATE`] receive every event; bindings in
/// other states only receive events while their state is active.
///
/// # Usage
///
/// ```ignore
/// let mut controls = Registry::new();
///
/// controls
///     .bind("space", "gameplay", "jump")
///     .on_press(|_, _| println!("jump"));
///
/// controls.state("menu").bind("escape", "back").on_press(|controls, _| {
///     controls.set_active_state("gameplay");
/// });
///
/// controls.set_active_state("menu");
///
/// // In the host's key handler
/// controls.handle_key_press("escape", false);
/// ```
pub struct Registry {
    /// Bindings by state name, then binding name.
    pub(crate) states: HashMap<String, StateBindings>,
    /// State whose bindings currently receive dispatch, besides `"all"`.
    pub(crate) active_state: Option<String>,
    /// Pointer-motion callbacks, fired regardless of state.
    pub(crate) motion: Vec<SharedMotionCallback>,
    /// Last known pointer position, `None` until a pointer event arrives.
    pub(crate) cursor: Option<Vec2>,
    next_id: u64,
}

impl Registry {
    /// Create a registry with the standard mouse bindings pre-registered.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.mouse().ensure_bindings();
        registry
    }

    /// Create a registry through a builder.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    fn empty() -> Self {
        Self {
            states: HashMap::new(),
            active_state: None,
            motion: Vec::new(),
            cursor: None,
            next_id: 0,
        }
    }

    /// Get the binding at (`state`, `binding`), creating it (and its state)
    /// if absent.
    ///
    /// The flag is `true` only if the binding itself was created by this call.
    pub fn binding_entry(&mut self, state: &str, binding: &str) -> (&mut Binding, bool) {
        let next_id = &mut self.next_id;
        let bindings = self.states.entry_ref(state).or_insert_with(|| {
            debug!(state, "Created state");
            HashMap::new()
        });

        let mut created = false;
        let entry = bindings.entry_ref(binding).or_insert_with(|| {
            created = true;
            *next_id += 1;
            debug!(state, binding, id = *next_id, "Created binding");
            Binding::new(BindingId(*next_id))
        });
        (entry, created)
    }

    /// Get the binding at (`state`, `binding`), creating it if absent.
    pub fn binding(&mut self, state: &str, binding: &str) -> &mut Binding {
        self.binding_entry(state, binding).0
    }

    /// Look up a binding without creating it.
    #[must_use]
    pub fn get_binding(&self, state: &str, binding: &str) -> Option<&Binding> {
        self.states.get(state)?.get(binding)
    }

    /// Look up a binding mutably without creating it.
    pub fn get_binding_mut(&mut self, state: &str, binding: &str) -> Option<&mut Binding> {
        self.states.get_mut(state)?.get_mut(binding)
    }

    /// Returns `true` if `state` has been created.
    #[must_use]
    pub fn has_state(&self, state: &str) -> bool {
        self.states.contains_key(state)
    }

    /// Returns `true` if `binding` exists within `state`.
    #[must_use]
    pub fn has_binding(&self, state: &str, binding: &str) -> bool {
        self.states
            .get(state)
            .is_some_and(|bindings| bindings.contains_key(binding))
    }

    /// Bind a key to (`state`, `binding`), creating the binding if absent.
    pub fn bind(&mut self, key: impl Into<String>, state: &str, binding: &str) -> &mut Binding {
        self.binding(state, binding).bind(key)
    }

    /// Bind several keys to (`state`, `binding`).
    pub fn bind_many(
        &mut self,
        keys: impl IntoIterator<Item = impl Into<String>>,
        state: &str,
        binding: &str,
    ) -> &mut Binding {
        self.binding(state, binding).bind_many(keys)
    }

    /// A view of this registry fixed to one state.
    pub fn state(&mut self, state: impl Into<String>) -> StateScope<'_> {
        StateScope {
            registry: self,
            state: state.into(),
        }
    }

    /// Pointer convenience bindings and motion callbacks.
    pub fn mouse(&mut self) -> Mouse<'_> {
        Mouse::new(self)
    }

    /// Set the active state.
    ///
    /// The state does not need to exist; its bindings simply receive events
    /// once they are created.
    pub fn set_active_state(&mut self, state: impl Into<String>) {
        let state = state.into();
        debug!(
            from = self.active_state.as_deref().unwrap_or("<none>"),
            to = %state,
            "Switched active state"
        );
        self.active_state = Some(state);
    }

    /// Clear the active state, leaving only `"all"` bindings live.
    pub fn clear_active_state(&mut self) {
        debug!("Cleared active state");
        self.active_state = None;
    }

    /// The active state, if any.
    #[must_use]
    pub fn active_state(&self) -> Option<&str> {
        self.active_state.as_deref()
    }

    /// Returns `true` if bindings in `state` currently receive dispatch.
    #[must_use]
    pub fn is_state_live(&self, state: &str) -> bool {
        state == ALL_STATE || self.active_state.as_deref() == Some(state)
    }

    /// Names of all created states.
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }

    /// Bindings of `state` with their names. Empty if the state does not exist.
    pub fn bindings_in<'a>(&'a self, state: &str) -> impl Iterator<Item = (&'a str, &'a Binding)> {
        self.states
            .get(state)
            .into_iter()
            .flat_map(|bindings| bindings.iter().map(|(name, b)| (name.as_str(), b)))
    }

    /// Last known pointer position, or the origin before any pointer event.
    #[must_use]
    pub fn cursor(&self) -> Vec2 {
        self.cursor.unwrap_or(Vec2::ZERO)
    }

    /// Bindings in live states that contain `key`.
    pub(crate) fn matching_bindings<'a>(
        &'a self,
        key: &'a str,
    ) -> impl Iterator<Item = &'a Binding> + 'a {
        self.states
            .iter()
            .filter(|(state, _)| self.is_state_live(state))
            .flat_map(|(_, bindings)| bindings.values())
            .filter(move |binding| binding.is_bound_to(key))
    }

    /// Press callbacks to invoke for `key`, collected before any of them runs.
    pub(crate) fn press_snapshot(&self, key: &str, is_repeat: bool) -> Vec<SharedButtonCallback> {
        self.matching_bindings(key)
            .flat_map(|binding| binding.press_callbacks(is_repeat))
            .collect()
    }

    /// Release callbacks to invoke for `key`, collected before any of them runs.
    pub(crate) fn release_snapshot(&self, key: &str) -> Vec<SharedButtonCallback> {
        self.matching_bindings(key)
            .flat_map(Binding::release_callbacks)
            .collect()
    }

    /// Drop every state and binding. Motion callbacks and the active state are kept.
    pub(crate) fn clear_states(&mut self) {
        self.states.clear();
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("states", &self.states)
            .field("active_state", &self.active_state)
            .field("motion", &self.motion.len())
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

/// A view of a [`Registry`] fixed to one state.
///
/// Saves repeating the state name when configuring many bindings at once.
#[derive(Debug)]
pub struct StateScope<'a> {
    registry: &'a mut Registry,
    state: String,
}

impl StateScope<'_> {
    /// Name of the scoped state.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.state
    }

    /// Get or create a binding in this state.
    pub fn binding(&mut self, binding: &str) -> &mut Binding {
        self.registry.binding(&self.state, binding)
    }

    /// Bind a key to a binding in this state.
    pub fn bind(&mut self, key: impl Into<String>, binding: &str) -> &mut Binding {
        self.registry.bind(key, &self.state, binding)
    }

    /// Bind several keys to a binding in this state.
    pub fn bind_many(
        &mut self,
        keys: impl IntoIterator<Item = impl Into<String>>,
        binding: &str,
    ) -> &mut Binding {
        self.registry.bind_many(keys, &self.state, binding)
    }

    /// Make this state the active one.
    pub fn activate(&mut self) {
        self.registry.set_active_state(self.state.clone());
    }
}

/// Builder for creating a registry with a fluent API.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    bindings: Vec<(String, String, Vec<String>)>,
    active_state: Option<String>,
}

impl RegistryBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a key to (`state`, `binding`).
    #[must_use]
    pub fn bind(
        self,
        key: impl Into<String>,
        state: impl Into<String>,
        binding: impl Into<String>,
    ) -> Self {
        self.bind_many([key], state, binding)
    }

    /// Bind several keys to (`state`, `binding`).
    #[must_use]
    pub fn bind_many(
        mut self,
        keys: impl IntoIterator<Item = impl Into<String>>,
        state: impl Into<String>,
        binding: impl Into<String>,
    ) -> Self {
        self.bindings.push((
            state.into(),
            binding.into(),
            keys.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Set the initially active state.
    #[must_use]
    pub fn with_active_state(mut self, state: impl Into<String>) -> Self {
        self.active_state = Some(state.into());
        self
    }

    /// Build the registry.
    #[must_use]
    pub fn build(self) -> Registry {
        let mut registry = Registry::new();
        for (state, binding, keys) in self.bindings {
            registry.bind_many(keys, &state, &binding);
        }
        if let Some(state) = self.active_state {
            registry.set_active_state(state);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_or_create_is_idempotent() {
        let mut registry = Registry::new();

        let (first, created) = registry.binding_entry("gameplay", "jump");
        let first_id = first.id();
        assert!(created);

        let (second, created) = registry.binding_entry("gameplay", "jump");
        assert!(!created);
        assert_eq!(second.id(), first_id);
    }

    #[test]
    fn same_slot_same_instance() {
        let mut registry = Registry::new();
        let first: *const Binding = registry.binding("gameplay", "jump");
        let second: *const Binding = registry.binding("gameplay", "jump");
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn new_binding_in_existing_state_reports_created() {
        let mut registry = Registry::new();
        registry.binding("gameplay", "jump");

        let (_, created) = registry.binding_entry("gameplay", "crouch");
        assert!(created);
        assert!(registry.has_binding("gameplay", "crouch"));
    }

    #[test]
    fn existence_checks_take_state_explicitly() {
        let mut registry = Registry::new();
        registry.binding("menu", "back");

        assert!(registry.has_state("menu"));
        assert!(!registry.has_state("gameplay"));
        assert!(registry.has_binding("menu", "back"));
        assert!(!registry.has_binding("gameplay", "back"));
        assert!(!registry.has_binding("nowhere", "back"));
    }

    #[test]
    fn lookup_miss_does_not_create() {
        let registry = Registry::new();
        assert!(registry.get_binding("gameplay", "jump").is_none());
        assert!(!registry.has_state("gameplay"));
        assert_eq!(registry.bindings_in("gameplay").count(), 0);
    }

    #[test]
    fn get_binding_mut_does_not_create() {
        let mut registry = Registry::new();
        assert!(registry.get_binding_mut("gameplay", "jump").is_none());
        assert!(!registry.has_state("gameplay"));

        registry.binding("gameplay", "jump");
        registry.get_binding_mut("gameplay", "jump").unwrap().bind("space");
        assert!(registry.get_binding("gameplay", "jump").unwrap().is_bound_to("space"));
    }

    #[test]
    fn binding_ids_increase() {
        let mut registry = Registry::empty();
        let first = registry.binding("gameplay", "jump").id();
        let second = registry.binding("gameplay", "crouch").id();
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
        assert_eq!(second.to_string(), "#2");
    }

    #[test]
    fn same_binding_name_in_different_states() {
        let mut registry = Registry::new();
        let menu = registry.bind("escape", "menu", "back").id();
        let gameplay = registry.bind("backspace", "gameplay", "back").id();
        assert_ne!(menu, gameplay);
        assert!(registry.get_binding("menu", "back").unwrap().is_bound_to("escape"));
        assert!(!registry.get_binding("menu", "back").unwrap().is_bound_to("backspace"));
    }

    #[test]
    fn state_scope() {
        let mut registry = Registry::new();
        {
            let mut gameplay = registry.state("gameplay");
            assert_eq!(gameplay.name(), "gameplay");
            gameplay.bind("space", "jump");
            gameplay.bind_many(["w", "up"], "forward");
            gameplay.binding("crouch").bind("c");
            gameplay.activate();
        }

        assert_eq!(registry.active_state(), Some("gameplay"));
        assert_eq!(registry.bindings_in("gameplay").count(), 3);
        assert!(registry.get_binding("gameplay", "forward").unwrap().is_bound_to("up"));
    }

    #[test]
    fn active_state_unvalidated() {
        let mut registry = Registry::new();
        registry.set_active_state("not_created_yet");
        assert_eq!(registry.active_state(), Some("not_created_yet"));
        assert!(!registry.has_state("not_created_yet"));

        assert!(registry.is_state_live("not_created_yet"));
        assert!(registry.is_state_live(ALL_STATE));
        assert!(!registry.is_state_live("menu"));

        registry.clear_active_state();
        assert_eq!(registry.active_state(), None);
        assert!(registry.is_state_live(ALL_STATE));
    }

    #[test]
    fn switching_state_keeps_bindings() {
        let mut registry = Registry::new();
        let id = registry.bind("space", "gameplay", "jump").id();

        registry.set_active_state("menu");
        registry.set_active_state("gameplay");
        assert_eq!(registry.get_binding("gameplay", "jump").unwrap().id(), id);
    }

    #[test]
    fn builder() {
        let registry = Registry::builder()
            .bind("space", "gameplay", "jump")
            .bind("w", "gameplay", "jump")
            .bind_many(["escape", "backspace"], "menu", "back")
            .with_active_state("menu")
            .build();

        assert_eq!(registry.active_state(), Some("menu"));
        assert_eq!(registry.get_binding("gameplay", "jump").unwrap().keys().len(), 2);
        assert_eq!(registry.get_binding("menu", "back").unwrap().keys().len(), 2);
        // Mouse bindings are pre-registered
        assert!(registry.has_state(ALL_STATE));
    }
}
