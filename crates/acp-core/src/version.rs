//! # Version Tags
//!
//! A spec corpus is published as a sequence of dated revisions
//! (`2025-09-29`, `2026-01-16`, ...) plus one mutable head, `unreleased`,
//! which is still being edited and therefore receives the stricter
//! authoring rules (descriptions and examples everywhere).
//!
//! ## Ordering
//!
//! Dated tags compare lexicographically, which is chronological for ISO
//! dates. The unreleased tag always sorts after every dated tag.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The tag of the actively-edited head revision.
pub const UNRELEASED: &str = "unreleased";

/// An identifier for one revision of the spec corpus.
///
/// # Validation
///
/// Must be non-empty and must not contain path separators or be a dot
/// segment, since the tag is used as a directory name in the corpus layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionTag(String);

impl VersionTag {
    /// Create a version tag, validating that it is a single path segment.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyVersionTag`] for blank input and
    /// [`ValidationError::InvalidVersionTag`] for tags that would escape the
    /// corpus directory.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let tag = raw.trim();
        if tag.is_empty() {
            return Err(ValidationError::EmptyVersionTag);
        }
        if tag.contains(['/', '\\']) || tag == "." || tag == ".." {
            return Err(ValidationError::InvalidVersionTag(raw));
        }
        Ok(Self(tag.to_string()))
    }

    /// The `unreleased` head tag.
    pub fn unreleased() -> Self {
        Self(UNRELEASED.to_string())
    }

    /// Access the tag string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the actively-edited head revision.
    pub fn is_unreleased(&self) -> bool {
        self.0 == UNRELEASED
    }
}

impl Ord for VersionTag {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_unreleased(), other.is_unreleased()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for VersionTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl TryFrom<String> for VersionTag {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VersionTag> for String {
    fn from(tag: VersionTag) -> Self {
        tag.0
    }
}

impl FromStr for VersionTag {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for VersionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
