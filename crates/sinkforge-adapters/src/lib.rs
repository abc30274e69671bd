//! Infrastructure adapters for sinkforge.
//!
//! This crate implements the ports defined in
//! `sinkforge-core::application::ports`. It contains all external
//! dependencies and I/O operations.

pub mod store;

// Re-export commonly used adapters
pub use store::{MemoryConfigStore, YamlConfigStore, SINK_GROUPS_FILE, SOURCE_GROUPS_FILE};
