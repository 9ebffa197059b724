//! Wiring winit events into a registry.

use glam::Vec2;
use winit::dpi::PhysicalPosition;
use winit::event::{DeviceEvent, ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::PhysicalKey;

use crate::keyboard::key_name;
use crate::mouse::MouseButton;
use crate::registry::Registry;

/// Pixels per wheel line when a device reports pixel deltas.
const PIXELS_PER_LINE: f64 = 100.0;

/// Vertical scroll in lines; positive is up.
#[allow(clippy::cast_possible_truncation)]
fn scroll_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
    }
}

/// Motion from the previous cursor position. The first position ever seen
/// has no motion.
fn cursor_delta(previous: Option<Vec2>, position: Vec2) -> Vec2 {
    previous.map_or(Vec2::ZERO, |previous| position - previous)
}

#[allow(clippy::cast_possible_truncation)]
fn to_vec2(position: PhysicalPosition<f64>) -> Vec2 {
    Vec2::new(position.x as f32, position.y as f32)
}

impl Registry {
    /// Process a window event.
    ///
    /// Returns `true` if the event is an input event the registry handles,
    /// whether or not any callback fired.
    ///
    /// ```ignore
    /// fn on_event(&mut self, event: &WindowEvent) -> bool {
    ///     self.controls.process_window_event(event)
    /// }
    /// ```
    pub fn process_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return false;
                };
                let key = key_name(code);
                match event.state {
                    ElementState::Pressed => self.handle_key_press(&key, event.repeat),
                    ElementState::Released => self.handle_key_release(&key),
                };
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                let position = to_vec2(*position);
                let delta = cursor_delta(self.cursor, position);
                self.handle_pointer_move(position.x, position.y, delta.x, delta.y);
                true
            }
            WindowEvent::MouseInput { button, state, .. } => {
                let Ok(button) = MouseButton::try_from(*button) else {
                    return false;
                };
                let Vec2 { x, y } = self.cursor();
                match state {
                    ElementState::Pressed => self.handle_pointer_press(x, y, button),
                    ElementState::Released => self.handle_pointer_release(x, y, button),
                };
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let Vec2 { x, y } = self.cursor();
                self.handle_wheel(x, y, scroll_lines(*delta));
                true
            }
            _ => false,
        }
    }

    /// Process a device event (for raw mouse motion).
    ///
    /// Raw motion is reported at the current cursor position, which suits
    /// locked-cursor controls where the window cursor does not move.
    #[allow(clippy::cast_possible_truncation)]
    pub fn process_device_event(&mut self, event: &DeviceEvent) -> bool {
        if let DeviceEvent::MouseMotion { delta } = event {
            let Vec2 { x, y } = self.cursor();
            self.handle_pointer_move(x, y, delta.0 as f32, delta.1 as f32);
            return true;
        }
        false
    }
}
