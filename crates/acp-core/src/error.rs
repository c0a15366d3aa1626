//! # Error Hierarchy
//!
//! Operational errors for the linter. These never describe a corpus policy
//! problem (those are [`Finding`](crate::Finding)s); they describe a run that
//! could not start: a malformed primitive, a bad configuration, an
//! unreadable corpus root.
//!
//! - [`ValidationError`] rejects malformed corpus-coordinate newtypes and
//!   carries the rejected input.
//! - [`AcpError`] is the top-level error surfaced to the binary.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the linter.
#[derive(Error, Debug)]
pub enum AcpError {
    /// A corpus coordinate failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The lint configuration is unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// The corpus root cannot be used.
    #[error("corpus root {path} is not usable: {reason}")]
    CorpusRoot {
        /// The rejected root directory.
        path: PathBuf,
        /// Why it was rejected.
        reason: String,
    },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Validation errors for domain primitive newtypes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Version tag is empty or whitespace-only.
    #[error("invalid version tag: must be non-empty")]
    EmptyVersionTag,

    /// Version tag contains characters that would escape the corpus layout.
    #[error("invalid version tag: \"{0}\" (path separators and dot segments are not allowed)")]
    InvalidVersionTag(String),

    /// Spec family name is empty or whitespace-only.
    #[error("invalid spec family: must be non-empty")]
    EmptySpecFamily,

    /// Spec family name contains characters outside `[A-Za-z0-9_.-]` or
    /// starts with a dot.
    #[error("invalid spec family: \"{0}\" (expected letters, digits, '_', '-' or '.', not starting with '.')")]
    InvalidSpecFamily(String),
}
