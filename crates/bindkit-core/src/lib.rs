//! Core types and utilities for bindkit.
//!
//! This crate provides the foundational pieces shared by the other crates:
//! - The [`KeySet`] collection of key identifiers
//! - Reserved state names and synthetic pointer key identifiers
//! - Common error types

pub mod error;
pub mod keyset;

pub use error::{Error, Result};
pub use keyset::KeySet;

/// Reserved names and identifiers.
pub mod constants {
    /// State whose bindings receive dispatch regardless of the active state.
    pub const ALL_STATE: &str = "all";

    /// Synthetic key id for the left pointer button.
    pub const MOUSE_LEFT: &str = "mouse_l";
    /// Synthetic key id for the middle pointer button.
    pub const MOUSE_MIDDLE: &str = "mouse_m";
    /// Synthetic key id for the right pointer button.
    pub const MOUSE_RIGHT: &str = "mouse_r";
    /// Synthetic key id for the wheel scrolled up.
    pub const MOUSE_WHEEL_UP: &str = "mouse_wu";
    /// Synthetic key id for the wheel scrolled down.
    pub const MOUSE_WHEEL_DOWN: &str = "mouse_wd";

    /// All synthetic pointer key ids.
    pub const MOUSE_KEYS: [&str; 5] = [
        MOUSE_LEFT,
        MOUSE_MIDDLE,
        MOUSE_RIGHT,
        MOUSE_WHEEL_UP,
        MOUSE_WHEEL_DOWN,
    ];
}
