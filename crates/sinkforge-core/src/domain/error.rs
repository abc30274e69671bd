//! Domain errors: business-rule violations over the two documents.
//!
//! Three families, matching the error taxonomy:
//! - **Validation** — a structural rule is violated (bad `source_ref`
//!   format, unknown linked source group, dangling reference).
//! - **NotFound** — a named sink group, server, or source group is absent.
//! - **Conflict** — a mutation precondition fails (target exists, server
//!   still referenced, inherited group removal). Conflicts are always
//!   checked before any mutation; mutation functions never partially apply.

use thiserror::Error;

use crate::domain::source::SourcePattern;
use crate::error::ErrorCategory;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ── Validation ─────────────────────────────────────────────────────────
    #[error("invalid source_ref '{reference}': {reason}")]
    InvalidSourceRef { reference: String, reason: String },

    #[error("unknown source group '{group}' (available: {})", .available.join(", "))]
    UnknownSourceGroup {
        group: String,
        available: Vec<String>,
    },

    #[error("source group '{group}' has no server '{server}'")]
    UnknownSourceServer { group: String, server: String },

    #[error("cannot resolve source_ref '{reference}': sink group has no linked source group")]
    MissingSourceGroup { reference: String },

    #[error("no source groups are defined; cannot link a sink group")]
    NoSourceGroups,

    #[error("invalid pattern '{pattern}'")]
    InvalidPattern { pattern: String },

    // ── NotFound ───────────────────────────────────────────────────────────
    #[error("sink group '{name}' does not exist")]
    GroupNotFound { name: String },

    #[error("sink group '{group}' has no server '{server}'")]
    ServerNotFound { group: String, server: String },

    // ── Conflict ───────────────────────────────────────────────────────────
    #[error("sink group '{name}' already exists")]
    GroupExists { name: String },

    #[error("server '{server}' already exists in sink group '{group}'")]
    ServerExists { group: String, server: String },

    #[error(
        "server '{server}' in sink group '{group}' is still referenced by: {}",
        .services.join(", ")
    )]
    ServerInUse {
        group: String,
        server: String,
        services: Vec<String>,
    },

    #[error("sink group '{name}' is inherited; refusing to remove an auto-derived mapping")]
    InheritedGroupRemoval { name: String },

    #[error(
        "source group '{group}' has pattern '{pattern}'; only db-shared groups support inheritance"
    )]
    PatternNotInheritable {
        group: String,
        pattern: SourcePattern,
    },

    #[error("sink group '{name}': db-shared sink groups must be environment-aware")]
    EnvironmentAwareRequired { name: String },
}

impl DomainError {
    /// Error category for exit-code mapping and CLI styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidSourceRef { .. }
            | Self::UnknownSourceGroup { .. }
            | Self::UnknownSourceServer { .. }
            | Self::MissingSourceGroup { .. }
            | Self::NoSourceGroups
            | Self::InvalidPattern { .. }
            | Self::EnvironmentAwareRequired { .. } => ErrorCategory::Validation,

            Self::GroupNotFound { .. } | Self::ServerNotFound { .. } => ErrorCategory::NotFound,

            Self::GroupExists { .. }
            | Self::ServerExists { .. }
            | Self::ServerInUse { .. }
            | Self::InheritedGroupRemoval { .. }
            | Self::PatternNotInheritable { .. } => ErrorCategory::Conflict,
        }
    }
}
