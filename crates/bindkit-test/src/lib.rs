//! Test harness for bindkit.
//!
//! Provides callback recorders, scripted event replay and log setup for
//! integration tests.

pub mod harness;

pub use harness::{init_logging, temp_path, Call, EventScript, Recorder};
