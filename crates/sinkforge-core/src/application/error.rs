//! Application layer errors.
//!
//! These represent orchestration and storage failures, not business-rule
//! violations. Business-rule errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A required document file is missing.
    #[error("configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// A document file could not be read.
    #[error("failed to read {path}: {reason}")]
    ConfigRead { path: PathBuf, reason: String },

    /// A document file exists but is not valid YAML for its schema.
    #[error("failed to parse {path}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    /// Writing the sink document failed.
    #[error("failed to write {path}: {reason}")]
    ConfigWrite { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned).
    #[error("configuration store is unavailable")]
    StoreLock,
}

impl ApplicationError {
    /// User-actionable suggestions for CLI display.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigNotFound { path } => vec![
                format!("Expected a file at: {}", path.display()),
                "Check --project-dir points at the configuration directory".into(),
            ],
            Self::ConfigParse { path, .. } => vec![
                format!("Fix the YAML in: {}", path.display()),
                "Generated sections should not be hand-edited; rerun the tool instead".into(),
            ],
            Self::ConfigRead { .. } | Self::ConfigWrite { .. } => vec![
                "Check file permissions on the configuration directory".into(),
            ],
            Self::StoreLock => vec!["Try again in a moment".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigNotFound { .. } => ErrorCategory::NotFound,
            Self::ConfigParse { .. } => ErrorCategory::Parse,
            Self::ConfigRead { .. } | Self::ConfigWrite { .. } | Self::StoreLock => {
                ErrorCategory::Internal
            }
        }
    }
}
