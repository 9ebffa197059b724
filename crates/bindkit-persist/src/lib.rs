//! Persistence adapters for bindkit.
//!
//! Both adapters write the same document shape:
//!
//! ```text
//! { <state>: { <binding>: { keys: [<key>, ...] } } }
//! ```
//!
//! Nothing else survives a save/load round trip; callbacks must be
//! registered again after loading.

mod json;
mod record;
mod ron_format;

pub use json::JsonAdapter;
pub use record::{BindingRecord, StateTreeRecord};
pub use ron_format::RonAdapter;
