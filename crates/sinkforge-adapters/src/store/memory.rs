//! Thread-safe in-memory store for tests and embedding.

use std::sync::{Arc, RwLock};

use sinkforge_core::{
    application::{ports::ConfigStore, ApplicationError},
    domain::{SinkGroups, SourceGroups},
};

/// In-memory [`ConfigStore`]. Cloning shares the underlying documents.
#[derive(Clone, Default)]
pub struct MemoryConfigStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    source_groups: SourceGroups,
    sink_groups: SinkGroups,
    sink_file_present: bool,
    saves: usize,
}

impl MemoryConfigStore {
    pub fn new(source_groups: SourceGroups) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                source_groups,
                ..Inner::default()
            })),
        }
    }

    /// Seed both documents; the sink document counts as an existing file.
    pub fn with_sink_groups(source_groups: SourceGroups, sink_groups: SinkGroups) -> Self {
        let store = Self::new(source_groups);
        {
            let mut inner = store.inner.write().unwrap_or_else(|e| e.into_inner());
            inner.sink_groups = sink_groups;
            inner.sink_file_present = true;
        }
        store
    }

    /// Snapshot of the current sink document.
    pub fn sink_groups(&self) -> SinkGroups {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .sink_groups
            .clone()
    }

    /// Number of saves observed, for asserting write behavior.
    pub fn save_count(&self) -> usize {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).saves
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load_source_groups(&self) -> Result<SourceGroups, ApplicationError> {
        let inner = self.inner.read().map_err(|_| ApplicationError::StoreLock)?;
        Ok(inner.source_groups.clone())
    }

    fn load_sink_groups(&self) -> Result<SinkGroups, ApplicationError> {
        let inner = self.inner.read().map_err(|_| ApplicationError::StoreLock)?;
        Ok(inner.sink_groups.clone())
    }

    fn sink_file_exists(&self) -> bool {
        self.inner
            .read()
            .map(|inner| inner.sink_file_present)
            .unwrap_or(false)
    }

    fn save_sink_groups(
        &self,
        sink_groups: &SinkGroups,
        _source_groups: &SourceGroups,
    ) -> Result<(), ApplicationError> {
        let mut inner = self.inner.write().map_err(|_| ApplicationError::StoreLock)?;
        inner.sink_groups = sink_groups.clone();
        inner.sink_file_present = true;
        inner.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let store = MemoryConfigStore::new(SourceGroups::new());
        let other = store.clone();

        let sinks: SinkGroups =
            serde_yaml::from_str("warehouse:\n  source_group: a\n  servers: {}\n").unwrap();
        store.save_sink_groups(&sinks, &SourceGroups::new()).unwrap();

        assert!(other.sink_file_exists());
        assert_eq!(other.sink_groups(), sinks);
        assert_eq!(other.save_count(), 1);
    }

    #[test]
    fn sink_file_absent_until_first_save() {
        let store = MemoryConfigStore::new(SourceGroups::new());
        assert!(!store.sink_file_exists());
        assert!(store.load_sink_groups().unwrap().is_empty());
    }
}
