//! Driven (output) ports.

use crate::application::ApplicationError;
use crate::domain::{SinkGroups, SourceGroups};

/// Storage for the two interlinked documents.
///
/// The source document is read-only from this tool's point of view — it is
/// owned by the source-side tooling. Only the sink document is ever written,
/// and writes replace the whole document (the store is responsible for
/// regenerating any derived annotations from the current source document).
pub trait ConfigStore: Send + Sync {
    /// Load the source-group document. Missing file is an error: sink
    /// operations are meaningless without the upstream document.
    fn load_source_groups(&self) -> Result<SourceGroups, ApplicationError>;

    /// Load the sink-group document. Missing file is an error here; callers
    /// that treat absence as an empty document check [`sink_file_exists`]
    /// first.
    ///
    /// [`sink_file_exists`]: ConfigStore::sink_file_exists
    fn load_sink_groups(&self) -> Result<SinkGroups, ApplicationError>;

    fn sink_file_exists(&self) -> bool;

    /// Persist the sink document. The source document is passed alongside so
    /// the store can annotate the output with resolved summaries.
    fn save_sink_groups(
        &self,
        sink_groups: &SinkGroups,
        source_groups: &SourceGroups,
    ) -> Result<(), ApplicationError>;
}
