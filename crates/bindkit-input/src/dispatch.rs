//! Routing raw input events to binding callbacks.
//!
//! Every entry point first collects the callbacks that should fire, then
//! invokes them in order with mutable access to the registry. Callbacks may
//! rebind keys, add bindings or switch states while an event is being
//! dispatched; such changes take effect from the next event on.

use glam::Vec2;
use tracing::{trace, warn};

use crate::binding::SharedButtonCallback;
use crate::mouse::{MouseButton, SharedMotionCallback, WheelDirection};
use crate::registry::Registry;

/// A discrete event delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key went down, or auto-fired while held.
    KeyPress { key: String, is_repeat: bool },
    /// A key went up.
    KeyRelease { key: String },
    /// A pointer button went down.
    PointerPress { position: Vec2, button: MouseButton },
    /// A pointer button went up.
    PointerRelease { position: Vec2, button: MouseButton },
    /// The wheel scrolled vertically; positive is up.
    Wheel { position: Vec2, delta_y: f32 },
    /// The pointer moved.
    PointerMove { position: Vec2, delta: Vec2 },
}

impl InputEvent {
    /// Initial press of `key`.
    pub fn press(key: impl Into<String>) -> Self {
        Self::KeyPress {
            key: key.into(),
            is_repeat: false,
        }
    }

    /// Auto-repeat press of a held `key`.
    pub fn repeat(key: impl Into<String>) -> Self {
        Self::KeyPress {
            key: key.into(),
            is_repeat: true,
        }
    }

    /// Release of `key`.
    pub fn release(key: impl Into<String>) -> Self {
        Self::KeyRelease { key: key.into() }
    }
}

impl Registry {
    /// Dispatch any [`InputEvent`]. Returns the number of callbacks invoked.
    pub fn dispatch(&mut self, event: &InputEvent) -> usize {
        match event {
            InputEvent::KeyPress { key, is_repeat } => self.handle_key_press(key, *is_repeat),
            InputEvent::KeyRelease { key } => self.handle_key_release(key),
            InputEvent::PointerPress { position, button } => {
                self.handle_pointer_press(position.x, position.y, *button)
            }
            InputEvent::PointerRelease { position, button } => {
                self.handle_pointer_release(position.x, position.y, *button)
            }
            InputEvent::Wheel { position, delta_y } => {
                self.handle_wheel(position.x, position.y, *delta_y)
            }
            InputEvent::PointerMove { position, delta } => {
                self.handle_pointer_move(position.x, position.y, delta.x, delta.y)
            }
        }
    }

    /// Handle a key press at the last known pointer position.
    ///
    /// Callbacks registered without repeat sensitivity are skipped when
    /// `is_repeat` is set.
    pub fn handle_key_press(&mut self, key: &str, is_repeat: bool) -> usize {
        self.handle_key_press_at(key, is_repeat, self.cursor())
    }

    /// Handle a key press with an explicit position.
    pub fn handle_key_press_at(&mut self, key: &str, is_repeat: bool, position: Vec2) -> usize {
        let callbacks = self.press_snapshot(key, is_repeat);
        trace!(key, is_repeat, callbacks = callbacks.len(), "Dispatching press");
        self.invoke_buttons(key, callbacks, position)
    }

    /// Handle a key release at the last known pointer position.
    pub fn handle_key_release(&mut self, key: &str) -> usize {
        self.handle_key_release_at(key, self.cursor())
    }

    /// Handle a key release with an explicit position.
    pub fn handle_key_release_at(&mut self, key: &str, position: Vec2) -> usize {
        let callbacks = self.release_snapshot(key);
        trace!(key, callbacks = callbacks.len(), "Dispatching release");
        self.invoke_buttons(key, callbacks, position)
    }

    /// Handle a pointer button press.
    pub fn handle_pointer_press(&mut self, x: f32, y: f32, button: MouseButton) -> usize {
        let position = Vec2::new(x, y);
        self.cursor = Some(position);
        self.handle_key_press_at(button.key_id(), false, position)
    }

    /// Handle a pointer button release.
    pub fn handle_pointer_release(&mut self, x: f32, y: f32, button: MouseButton) -> usize {
        let position = Vec2::new(x, y);
        self.cursor = Some(position);
        self.handle_key_release_at(button.key_id(), position)
    }

    /// Handle a vertical wheel scroll as a press followed by a release of the
    /// matching wheel key. A zero delta dispatches nothing.
    ///
    /// Like every pointer event, this records the position as the cursor.
    pub fn handle_wheel(&mut self, x: f32, y: f32, delta_y: f32) -> usize {
        let position = Vec2::new(x, y);
        self.cursor = Some(position);
        let Some(direction) = WheelDirection::from_delta(delta_y) else {
            return 0;
        };
        self.handle_key_press_at(direction.key_id(), false, position)
            + self.handle_key_release_at(direction.key_id(), position)
    }

    /// Handle pointer motion. Every motion callback fires, whatever the
    /// active state.
    pub fn handle_pointer_move(&mut self, x: f32, y: f32, delta_x: f32, delta_y: f32) -> usize {
        let position = Vec2::new(x, y);
        let delta = Vec2::new(delta_x, delta_y);
        self.cursor = Some(position);

        let callbacks: Vec<SharedMotionCallback> = self.motion.clone();
        let mut fired = 0;
        for callback in callbacks {
            let Ok(mut callback) = callback.try_borrow_mut() else {
                warn!("Skipped motion callback already running");
                continue;
            };
            (*callback)(self, position, delta);
            fired += 1;
        }
        fired
    }

    fn invoke_buttons(
        &mut self,
        key: &str,
        callbacks: Vec<SharedButtonCallback>,
        position: Vec2,
    ) -> usize {
        let mut fired = 0;
        for callback in callbacks {
            // A handler that dispatches the same key again would re-enter itself
            let Ok(mut callback) = callback.try_borrow_mut() else {
                warn!(key, "Skipped callback already running");
                continue;
            };
            (*callback)(self, position);
            fired += 1;
        }
        fired
    }
}
