//! Top-level error type and the category taxonomy shared by every layer.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

pub type CoreResult<T> = Result<T, CoreError>;

/// Any failure the core can produce, one layer per variant.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl CoreError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(err) => err.category(),
            Self::Application(err) => err.category(),
        }
    }
}

/// Coarse classification used for exit codes and CLI styling. Defined once
/// here; each layer's error type maps itself into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A document or input violates a rule the operator can fix.
    Validation,
    /// A mutation precondition failed; the documents were not touched.
    Conflict,
    /// A named group, server, or file is absent.
    NotFound,
    /// A document could not be parsed.
    Parse,
    /// Unexpected internal failure.
    Internal,
}
