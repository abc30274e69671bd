//! ConfigStore implementations: YAML files on disk, and an in-memory store
//! for tests.

mod banner;
pub mod memory;
pub mod yaml;

pub use memory::MemoryConfigStore;
pub use yaml::{YamlConfigStore, SINK_GROUPS_FILE, SOURCE_GROUPS_FILE};
