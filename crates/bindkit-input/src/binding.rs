//! Bindings: named actions mapped to keys, carrying press/release callbacks.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use bindkit_core::KeySet;
use glam::Vec2;

use crate::registry::Registry;

/// Callback invoked when a bound key or button is pressed or released.
///
/// Receives the registry so handlers can rebind keys or switch states, and
/// the pointer position at the time of the event.
pub type ButtonCallback = dyn FnMut(&mut Registry, Vec2);

pub(crate) type SharedButtonCallback = Rc<RefCell<ButtonCallback>>;

/// Identity of a binding within its registry.
///
/// Assigned once when the binding is created and never reused, so two
/// lookups of the same (state, binding) slot always yield the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(pub(crate) u64);

impl BindingId {
    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BindingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A press handler together with its repeat sensitivity.
#[derive(Clone)]
pub(crate) struct PressEntry {
    pub(crate) callback: SharedButtonCallback,
    /// Fire on key-repeat auto-fire as well as the initial press.
    pub(crate) listen_to_repeat: bool,
}

/// A logical action bound to one or more keys.
///
/// Bindings are owned by a [`Registry`] and obtained through it; callbacks
/// accumulate for the lifetime of the binding.
pub struct Binding {
    id: BindingId,
    keys: KeySet,
    on_press: Vec<PressEntry>,
    on_release: Vec<SharedButtonCallback>,
}

impl Binding {
    pub(crate) const fn new(id: BindingId) -> Self {
        Self {
            id,
            keys: KeySet::new(),
            on_press: Vec::new(),
            on_release: Vec::new(),
        }
    }

    /// Identity of this binding.
    #[must_use]
    pub const fn id(&self) -> BindingId {
        self.id
    }

    /// Keys currently bound.
    #[must_use]
    pub const fn keys(&self) -> &KeySet {
        &self.keys
    }

    /// Returns `true` if `key` triggers this binding.
    #[must_use]
    pub fn is_bound_to(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Bind a key. Binding a key that is already bound is a no-op.
    pub fn bind(&mut self, key: impl Into<String>) -> &mut Self {
        self.keys.insert(key);
        self
    }

    /// Bind several keys.
    pub fn bind_many(&mut self, keys: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.keys.extend(keys);
        self
    }

    /// Unbind a key. Unbinding a key that is not bound is a no-op.
    pub fn unbind(&mut self, key: &str) -> &mut Self {
        self.keys.remove(key);
        self
    }

    /// Unbind several keys.
    pub fn unbind_many<'k>(&mut self, keys: impl IntoIterator<Item = &'k str>) -> &mut Self {
        for key in keys {
            self.keys.remove(key);
        }
        self
    }

    /// Remove every bound key. Callbacks are kept.
    pub fn clear_keys(&mut self) -> &mut Self {
        self.keys.clear();
        self
    }

    /// Register a press callback that ignores key-repeat.
    pub fn on_press(&mut self, callback: impl FnMut(&mut Registry, Vec2) + 'static) -> &mut Self {
        self.on_press_with(callback, false)
    }

    /// Register a press callback that also fires on key-repeat.
    pub fn on_press_repeating(
        &mut self,
        callback: impl FnMut(&mut Registry, Vec2) + 'static,
    ) -> &mut Self {
        self.on_press_with(callback, true)
    }

    /// Register a press callback with explicit repeat sensitivity.
    pub fn on_press_with(
        &mut self,
        callback: impl FnMut(&mut Registry, Vec2) + 'static,
        listen_to_repeat: bool,
    ) -> &mut Self {
        let callback: SharedButtonCallback = Rc::new(RefCell::new(callback));
        self.on_press.push(PressEntry {
            callback,
            listen_to_repeat,
        });
        self
    }

    /// Register a release callback.
    pub fn on_release(&mut self, callback: impl FnMut(&mut Registry, Vec2) + 'static) -> &mut Self {
        let callback: SharedButtonCallback = Rc::new(RefCell::new(callback));
        self.on_release.push(callback);
        self
    }

    /// Number of registered press callbacks.
    #[must_use]
    pub fn press_callback_count(&self) -> usize {
        self.on_press.len()
    }

    /// Number of registered release callbacks.
    #[must_use]
    pub fn release_callback_count(&self) -> usize {
        self.on_release.len()
    }

    /// Press callbacks that should fire for an event with the given repeat flag.
    pub(crate) fn press_callbacks(
        &self,
        is_repeat: bool,
    ) -> impl Iterator<Item = SharedButtonCallback> + '_ {
        self.on_press
            .iter()
            .filter(move |entry| !is_repeat || entry.listen_to_repeat)
            .map(|entry| Rc::clone(&entry.callback))
    }

    pub(crate) fn release_callbacks(&self) -> impl Iterator<Item = SharedButtonCallback> + '_ {
        self.on_release.iter().map(Rc::clone)
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("id", &self.id)
            .field("keys", &self.keys)
            .field("on_press", &self.on_press.len())
            .field("on_release", &self.on_release.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding() -> Binding {
        Binding::new(BindingId(1))
    }

    #[test]
    fn bind_and_unbind() {
        let mut jump = binding();
        jump.bind("space").bind("w");
        assert!(jump.is_bound_to("space"));
        assert!(jump.is_bound_to("w"));

        jump.unbind("w");
        assert!(!jump.is_bound_to("w"));
        assert_eq!(jump.keys().len(), 1);
    }

    #[test]
    fn double_bind_is_noop() {
        let mut jump = binding();
        jump.bind("space").bind("space").bind_many(["space", "up"]);
        assert_eq!(jump.keys().iter().collect::<Vec<_>>(), ["space", "up"]);
    }

    #[test]
    fn unbind_missing_key() {
        let mut jump = binding();
        jump.bind("space");
        jump.unbind("q").unbind_many(["x", "y"]);
        assert!(jump.is_bound_to("space"));
    }

    #[test]
    fn clear_keys_keeps_callbacks() {
        let mut fire = binding();
        fire.bind_many(["mouse_l", "f"])
            .on_press(|_, _| {})
            .on_release(|_, _| {});

        fire.clear_keys();
        assert!(fire.keys().is_empty());
        assert_eq!(fire.press_callback_count(), 1);
        assert_eq!(fire.release_callback_count(), 1);
    }

    #[test]
    fn repeat_filter() {
        let mut walk = binding();
        walk.on_press(|_, _| {})
            .on_press_repeating(|_, _| {})
            .on_press_with(|_, _| {}, false);

        assert_eq!(walk.press_callbacks(false).count(), 3);
        assert_eq!(walk.press_callbacks(true).count(), 1);
    }

    #[test]
    fn debug_shows_counts() {
        let mut jump = binding();
        jump.bind("space").on_press(|_, _| {});
        let text = format!("{jump:?}");
        assert!(text.contains("on_press: 1"));
        assert!(text.contains("\"space\""));
    }
}
