//! Pointer buttons, wheel directions and the mouse convenience view.

use std::cell::RefCell;
use std::rc::Rc;

use bindkit_core::constants::{
    ALL_STATE, MOUSE_LEFT, MOUSE_MIDDLE, MOUSE_RIGHT, MOUSE_WHEEL_DOWN, MOUSE_WHEEL_UP,
};
use glam::Vec2;
use winit::event::MouseButton as WinitMouseButton;

use crate::binding::Binding;
use crate::registry::Registry;

/// Callback invoked on pointer motion with the new position and the delta.
pub type MotionCallback = dyn FnMut(&mut Registry, Vec2, Vec2);

pub(crate) type SharedMotionCallback = Rc<RefCell<MotionCallback>>;

/// Pointer button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// All buttons with a synthetic key id.
    pub const ALL: [Self; 3] = [Self::Left, Self::Middle, Self::Right];

    /// Synthetic key id dispatched for this button.
    #[must_use]
    pub const fn key_id(self) -> &'static str {
        match self {
            Self::Left => MOUSE_LEFT,
            Self::Middle => MOUSE_MIDDLE,
            Self::Right => MOUSE_RIGHT,
        }
    }
}

impl TryFrom<WinitMouseButton> for MouseButton {
    type Error = ();

    fn try_from(button: WinitMouseButton) -> Result<Self, Self::Error> {
        match button {
            WinitMouseButton::Left => Ok(Self::Left),
            WinitMouseButton::Middle => Ok(Self::Middle),
            WinitMouseButton::Right => Ok(Self::Right),
            WinitMouseButton::Back | WinitMouseButton::Forward | WinitMouseButton::Other(_) => {
                Err(())
            }
        }
    }
}

/// Scroll wheel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelDirection {
    Up,
    Down,
}

impl WheelDirection {
    /// Direction of a vertical scroll delta, `None` for zero.
    #[must_use]
    pub fn from_delta(delta_y: f32) -> Option<Self> {
        if delta_y > 0.0 {
            Some(Self::Up)
        } else if delta_y < 0.0 {
            Some(Self::Down)
        } else {
            None
        }
    }

    /// Synthetic key id dispatched for this direction.
    #[must_use]
    pub const fn key_id(self) -> &'static str {
        match self {
            Self::Up => MOUSE_WHEEL_UP,
            Self::Down => MOUSE_WHEEL_DOWN,
        }
    }
}

/// Pointer convenience view over a [`Registry`].
///
/// Exposes one binding per pointer button and wheel direction in the
/// `"all"` state, named after (and bound to) its synthetic key id, plus
/// registration of pointer-motion callbacks.
///
/// ```ignore
/// controls.mouse().left().on_press(|_, pos| println!("click at {pos}"));
/// controls.mouse().on_move(|_, pos, delta| println!("{pos} moved by {delta}"));
/// ```
#[derive(Debug)]
pub struct Mouse<'a> {
    registry: &'a mut Registry,
}

impl<'a> Mouse<'a> {
    pub(crate) fn new(registry: &'a mut Registry) -> Self {
        Self { registry }
    }

    /// Binding for a pointer button.
    pub fn button(&mut self, button: MouseButton) -> &mut Binding {
        self.slot(button.key_id())
    }

    /// Binding for a wheel direction.
    pub fn wheel(&mut self, direction: WheelDirection) -> &mut Binding {
        self.slot(direction.key_id())
    }

    /// Binding for the left button.
    pub fn left(&mut self) -> &mut Binding {
        self.button(MouseButton::Left)
    }

    /// Binding for the middle button.
    pub fn middle(&mut self) -> &mut Binding {
        self.button(MouseButton::Middle)
    }

    /// Binding for the right button.
    pub fn right(&mut self) -> &mut Binding {
        self.button(MouseButton::Right)
    }

    /// Binding for the wheel scrolled up.
    pub fn wheel_up(&mut self) -> &mut Binding {
        self.wheel(WheelDirection::Up)
    }

    /// Binding for the wheel scrolled down.
    pub fn wheel_down(&mut self) -> &mut Binding {
        self.wheel(WheelDirection::Down)
    }

    /// Register a pointer-motion callback.
    ///
    /// Motion callbacks ignore states and fire for every motion event.
    pub fn on_move(&mut self, callback: impl FnMut(&mut Registry, Vec2, Vec2) + 'static) -> &mut Self {
        let callback: SharedMotionCallback = Rc::new(RefCell::new(callback));
        self.registry.motion.push(callback);
        self
    }

    /// Number of registered motion callbacks.
    #[must_use]
    pub fn move_callback_count(&self) -> usize {
        self.registry.motion.len()
    }

    /// Create any missing pointer binding. Existing ones are left untouched,
    /// so keys a user unbound stay unbound.
    pub(crate) fn ensure_bindings(&mut self) {
        for button in MouseButton::ALL {
            self.button(button);
        }
        self.wheel(WheelDirection::Up);
        self.wheel(WheelDirection::Down);
    }

    fn slot(&mut self, key: &str) -> &mut Binding {
        let (binding, created) = self.registry.binding_entry(ALL_STATE, key);
        if created {
            binding.bind(key);
        }
        binding
    }
}
