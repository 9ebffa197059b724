//! Callback-based input bindings for bindkit.
//!
//! This crate lets an application name logical actions ("bindings"), map
//! them to physical keys and pointer buttons, attach press and release
//! callbacks, and group bindings into states so that only the relevant ones
//! fire.
//!
//! # Core Types
//!
//! - [`Registry`]: Owns every state and binding, tracks the active state and dispatches events
//! - [`Binding`]: A set of keys plus ordered press/release callbacks
//! - [`StateScope`]: A registry view fixed to one state
//! - [`Mouse`]: Pointer button/wheel bindings in the `"all"` state and motion callbacks
//! - [`PersistenceAdapter`]: Text codec used by [`Registry::save`] and [`Registry::load`]
//!
//! # Usage
//!
//! ```ignore
//! use bindkit_input::Registry;
//!
//! let mut controls = Registry::builder()
//!     .bind("space", "gameplay", "jump")
//!     .bind_many(["w", "up"], "gameplay", "forward")
//!     .bind("escape", "menu", "back")
//!     .with_active_state("gameplay")
//!     .build();
//!
//! controls.binding("gameplay", "jump").on_press(|_, _| {
//!     // Jump
//! });
//!
//! // Held keys auto-fire only to callbacks that opt in
//! controls.binding("gameplay", "forward").on_press_repeating(|_, _| {
//!     // Keep walking
//! });
//!
//! // Callbacks may reconfigure the registry
//! controls.state("gameplay").bind("escape", "pause").on_press(|controls, _| {
//!     controls.set_active_state("menu");
//! });
//!
//! controls.mouse().left().on_press(|_, pos| {
//!     // Fires in every state
//! });
//!
//! // In the host's event handler
//! fn on_event(controls: &mut Registry, event: &WindowEvent) -> bool {
//!     controls.process_window_event(event)
//! }
//! ```
//!
//! # Dispatch Rules
//!
//! A key event reaches every binding containing the key in the active state
//! and in the reserved `"all"` state. Within a binding, callbacks fire in
//! registration order; the order across bindings is unspecified.

mod binding;
mod dispatch;
mod keyboard;
mod mouse;
mod persistence;
mod registry;
mod window;

pub use binding::{Binding, BindingId, ButtonCallback};
pub use dispatch::InputEvent;
pub use keyboard::key_name;
pub use mouse::{MotionCallback, Mouse, MouseButton, WheelDirection};
pub use persistence::{validate_tree, PersistenceAdapter, StateTree};
pub use registry::{Registry, RegistryBuilder, StateScope};

pub use bindkit_core::constants::ALL_STATE;
pub use bindkit_core::{Error, KeySet, Result};

// Re-export winit types commonly used with input
pub use winit::event::{DeviceEvent, WindowEvent};
pub use winit::keyboard::KeyCode;
