//! Comprehensive error handling for the sinkforge CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Proper error chaining
//! - Exit code mapping

use std::path::PathBuf;
use std::{error::Error, fmt::Write as _};

use owo_colors::OwoColorize;
use thiserror::Error;

use sinkforge_core::error::CoreError;

// Re-export so callers only need `use crate::error::*`.
pub use sinkforge_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Comprehensive CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input (validation failed at the CLI layer).
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// A scan file could not be read or parsed.
    #[error("Failed to load scan file {path}: {reason}")]
    ScanFile { path: PathBuf, reason: String },

    /// The sink document failed validation.
    #[error("Validation failed: {errors} error(s), {warnings} warning(s)")]
    ValidationFailed { errors: usize, warnings: usize },

    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error propagated from `sinkforge-core`.
    ///
    /// Wrapped here so that the CLI can attach suggestions drawn from the
    /// core error's category without touching core internals.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message } => vec![
                format!("Check your input: {}", message),
                "Use --help for usage information".into(),
            ],

            Self::ScanFile { path, .. } => vec![
                format!("Check the scan file: {}", path.display()),
                "Expected a JSON or YAML array of database records".into(),
                "Each record needs at least 'service' and 'name' fields".into(),
            ],

            Self::ValidationFailed { .. } => vec![
                "The findings are listed above".into(),
                "Fix the document and rerun: sinkforge validate".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                "Check the config file path passed with --config".into(),
            ],

            Self::Core(core) => {
                let mut suggestions = match core {
                    CoreError::Domain(err) => err_suggestions_domain(err),
                    CoreError::Application(err) => err.suggestions(),
                };
                if suggestions.is_empty() {
                    suggestions.push("Run 'sinkforge list' to see the current sink groups".into());
                }
                suggestions
            }

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Ensure the project directory exists".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::ScanFile { .. } => ErrorCategory::UserError,
            Self::ValidationFailed { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Conflict => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Parse => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        let _ = write!(output, "\n{} {}\n\n", "✗".red().bold(), "Error:".red().bold());
        let _ = writeln!(output, "  {}", self.to_string().red());

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                let _ = write!(output, "\n  {} {}\n", "→".dimmed(), err.to_string().dimmed());
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            let _ = write!(output, "\n{}\n", "Suggestions:".yellow().bold());
            for suggestion in suggestions {
                let _ = writeln!(output, "  {suggestion}");
            }
        }

        if !verbose {
            output.push('\n');
            let _ = writeln!(
                output,
                "{} {}",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            );
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`] — no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        let _ = write!(out, "\nError: {self}\n");

        if verbose {
            let mut src = std::error::Error::source(self);
            while let Some(err) = src {
                let _ = writeln!(out, "  Caused by: {err}");
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                let _ = writeln!(out, "  {s}");
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Suggestion text for domain errors, written in CLI vocabulary.
fn err_suggestions_domain(err: &sinkforge_core::domain::DomainError) -> Vec<String> {
    use sinkforge_core::domain::DomainError;

    match err {
        DomainError::UnknownSourceGroup { available, .. } => {
            let mut out = vec!["Available source groups:".to_string()];
            if available.is_empty() {
                out.push("  (none; check source-groups.yaml)".into());
            } else {
                for group in available {
                    out.push(format!("  • {group}"));
                }
            }
            out
        }
        DomainError::UnknownSourceServer { group, .. } => vec![
            format!("Check the servers listed under source group '{group}'"),
            "source_ref must name a server of the linked source group".into(),
        ],
        DomainError::GroupNotFound { .. } => {
            vec!["List the existing sink groups: sinkforge list".into()]
        }
        DomainError::ServerInUse { services, .. } => vec![
            format!("Still referenced by: {}", services.join(", ")),
            "Re-run 'sinkforge sources update' against another server first".into(),
        ],
        DomainError::InheritedGroupRemoval { .. } => vec![
            "Inherited sink groups track their source group and cannot be removed".into(),
            "Remove the source group upstream instead".into(),
        ],
        DomainError::PatternNotInheritable { .. } => vec![
            "Only db-shared source groups support inheritance".into(),
            "Use 'sinkforge standalone' for per-tenant sinks".into(),
        ],
        DomainError::EnvironmentAwareRequired { .. } => {
            vec!["Pass --environment-aware when creating a db-shared sink group".into()]
        }
        _ => Vec::new(),
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments, conflicts).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use sinkforge_core::application::ApplicationError;
    use sinkforge_core::domain::DomainError;

    #[test]
    fn domain_conflict_maps_to_user_error_exit_2() {
        let err = CliError::Core(CoreError::Domain(DomainError::GroupExists {
            name: "sink_asma".into(),
        }));
        assert_eq!(err.category(), ErrorCategory::UserError);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn not_found_exits_3() {
        let err = CliError::Core(CoreError::Domain(DomainError::GroupNotFound {
            name: "ghost".into(),
        }));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn parse_failure_exits_4() {
        let err = CliError::Core(CoreError::Application(ApplicationError::ConfigParse {
            path: "sink-groups.yaml".into(),
            reason: "bad indent".into(),
        }));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn unknown_source_group_suggests_alternatives() {
        let err = CliError::Core(CoreError::Domain(DomainError::UnknownSourceGroup {
            group: "azma".into(),
            available: vec!["asma".into()],
        }));
        let text = err.format_plain(false);
        assert!(text.contains("• asma"));
    }

    #[test]
    fn plain_format_has_no_ansi() {
        let err = CliError::InvalidInput {
            message: "bad flag".into(),
        };
        assert!(!err.format_plain(false).contains('\u{1b}'));
    }
}
