//! YAML file store for the two documents.

use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use sinkforge_core::{
    application::{ports::ConfigStore, ApplicationError},
    domain::{SinkGroups, SourceGroups},
};

use crate::store::banner::render_banner;

pub const SOURCE_GROUPS_FILE: &str = "source-groups.yaml";
pub const SINK_GROUPS_FILE: &str = "sink-groups.yaml";

/// Production store: both documents as YAML files in a project directory.
///
/// Only the sink file is ever written. Saves serialize the whole document
/// with a regenerated summary banner, so key order in the file follows
/// document order in memory.
#[derive(Debug, Clone)]
pub struct YamlConfigStore {
    source_path: PathBuf,
    sink_path: PathBuf,
}

impl YamlConfigStore {
    /// Store over the conventional file names inside `project_dir`.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        let dir = project_dir.as_ref();
        Self {
            source_path: dir.join(SOURCE_GROUPS_FILE),
            sink_path: dir.join(SINK_GROUPS_FILE),
        }
    }

    /// Store over explicit file paths.
    pub fn with_paths(source_path: impl Into<PathBuf>, sink_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            sink_path: sink_path.into(),
        }
    }

    pub fn sink_path(&self) -> &Path {
        &self.sink_path
    }

    fn load_yaml<T>(&self, path: &Path) -> Result<T, ApplicationError>
    where
        T: DeserializeOwned + Default,
    {
        let raw = std::fs::read_to_string(path).map_err(|e| map_read_error(path, e))?;
        // An existing-but-empty file is an empty document, not a parse error.
        if raw.trim().is_empty() {
            return Ok(T::default());
        }
        serde_yaml::from_str(&raw).map_err(|e| ApplicationError::ConfigParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

impl ConfigStore for YamlConfigStore {
    fn load_source_groups(&self) -> Result<SourceGroups, ApplicationError> {
        self.load_yaml(&self.source_path)
    }

    fn load_sink_groups(&self) -> Result<SinkGroups, ApplicationError> {
        self.load_yaml(&self.sink_path)
    }

    fn sink_file_exists(&self) -> bool {
        self.sink_path.exists()
    }

    #[instrument(skip_all, fields(path = %self.sink_path.display()))]
    fn save_sink_groups(
        &self,
        sink_groups: &SinkGroups,
        source_groups: &SourceGroups,
    ) -> Result<(), ApplicationError> {
        let body =
            serde_yaml::to_string(sink_groups).map_err(|e| ApplicationError::ConfigWrite {
                path: self.sink_path.clone(),
                reason: e.to_string(),
            })?;
        let content = format!("{}{body}", render_banner(sink_groups, source_groups));

        std::fs::write(&self.sink_path, content).map_err(|e| ApplicationError::ConfigWrite {
            path: self.sink_path.clone(),
            reason: e.to_string(),
        })?;
        debug!(groups = sink_groups.len(), "wrote sink document");
        Ok(())
    }
}

fn map_read_error(path: &Path, e: io::Error) -> ApplicationError {
    if e.kind() == io::ErrorKind::NotFound {
        ApplicationError::ConfigNotFound {
            path: path.to_path_buf(),
        }
    } else {
        ApplicationError::ConfigRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
