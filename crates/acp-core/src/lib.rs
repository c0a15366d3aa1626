#![deny(missing_docs)]

//! # acp-core — Foundational Types for the ACP Spec Linter
//!
//! This crate defines the types every other crate in the workspace shares.
//! It has no internal crate dependencies, only `serde`, `serde_json` and
//! `thiserror` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for corpus coordinates.** A [`VersionTag`] and a
//!    [`SpecFamily`] are distinct types validated at construction, so a
//!    family name can never be passed where a version is expected.
//!
//! 2. **Findings are data, not log lines.** Every rule produces [`Finding`]
//!    values with a structured [`FindingContext`]. The [`Report`] folds them
//!    into two append-only lists and derives the run [`Outcome`].
//!
//! 3. **Structured errors.** [`ValidationError`] for malformed primitives,
//!    [`AcpError`] for runs that cannot start. Derived with `thiserror`, no
//!    `.unwrap()` outside tests.

pub mod error;
pub mod family;
pub mod finding;
pub mod report;
pub mod version;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{AcpError, ValidationError};
pub use family::{ArtifactKind, SpecFamily};
pub use finding::{Finding, FindingContext, RuleId, Severity, Violation};
pub use report::{Outcome, Report};
pub use version::{VersionTag, UNRELEASED};
