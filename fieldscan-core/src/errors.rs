//! errors.rs - Custom error types for the fieldscan-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific error types that callers (such as the HTTP layer) can match on
//! to decide between a "not found" answer and a fatal failure.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All error types raised by the `fieldscan-core` library.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FieldscanError {
    #[error("Failed to compile pattern rule '{0}': {1}")]
    RuleCompilationError(String, regex::Error),

    #[error("Rule '{0}': pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("No report named '{0}' is configured")]
    UnknownReport(String),

    /// A storage collaborator could not answer. This is the only fatal class
    /// during report generation; it aborts the whole request.
    #[error("Collaborator '{collaborator}' is unavailable: {message}")]
    Unavailable {
        collaborator: &'static str,
        message: String,
    },

    #[error("Failed to render report template: {0}")]
    TemplateError(String),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}

impl FieldscanError {
    /// Convenience constructor for collaborator failures.
    pub fn unavailable(collaborator: &'static str, message: impl Into<String>) -> Self {
        FieldscanError::Unavailable {
            collaborator,
            message: message.into(),
        }
    }
}
