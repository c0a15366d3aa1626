//! # Spec Families & Artifact Kinds
//!
//! A [`SpecFamily`] names one logical API surface (checkout flow, payment
//! delegation, webhooks). Each family may publish a JSON-Schema artifact,
//! an OpenAPI artifact, and an example set per version; [`ArtifactKind`]
//! distinguishes the three.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The name of a logical API surface, e.g. `agentic_checkout`.
///
/// # Validation
///
/// Family names are embedded in artifact file names
/// (`schema.<family>.json`), so they are restricted to ASCII letters,
/// digits, `_`, `-` and `.`, and must not start with a dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SpecFamily(String);

impl SpecFamily {
    /// Create a family name, validating its character set.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptySpecFamily`] for blank input and
    /// [`ValidationError::InvalidSpecFamily`] for disallowed characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let name = value.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptySpecFamily);
        }
        let allowed = name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !allowed || name.starts_with('.') {
            return Err(ValidationError::InvalidSpecFamily(name));
        }
        Ok(Self(name))
    }

    /// Access the family name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SpecFamily {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SpecFamily> for String {
    fn from(family: SpecFamily) -> Self {
        family.0
    }
}

impl std::str::FromStr for SpecFamily {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for SpecFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The three artifact kinds a family can publish per version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    /// `spec/<version>/json-schema/schema.<family>.json`
    JsonSchema,
    /// `spec/<version>/openapi/openapi.<family>.yaml`
    #[serde(rename = "openapi")]
    OpenApi,
    /// `examples/<version>/examples.<family>.json`
    Examples,
}

impl ArtifactKind {
    /// Stable lowercase name, matching the corpus directory names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JsonSchema => "json-schema",
            Self::OpenApi => "openapi",
            Self::Examples => "examples",
        }
    }

    /// Human-facing label used in finding messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::JsonSchema => "JSON Schema",
            Self::OpenApi => "OpenAPI",
            Self::Examples => "Examples",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_family_valid() {
        let family = SpecFamily::new("agentic_checkout").unwrap();
        assert_eq!(family.as_str(), "agentic_checkout");
        assert!(SpecFamily::new("delegate-payment.v2").is_ok());
    }

    #[test]
    fn spec_family_rejects_empty() {
        assert_eq!(SpecFamily::new(""), Err(ValidationError::EmptySpecFamily));
        assert_eq!(SpecFamily::new("  "), Err(ValidationError::EmptySpecFamily));
    }

    #[test]
    fn spec_family_rejects_bad_characters() {
        assert!(SpecFamily::new("check out").is_err());
        assert!(SpecFamily::new("a/b").is_err());
        assert!(SpecFamily::new(".hidden").is_err());
    }

    #[test]
    fn spec_family_orders_by_name() {
        let a = SpecFamily::new("agentic_checkout").unwrap();
        let b = SpecFamily::new("delegate_payment").unwrap();
        assert!(a < b);
    }

    #[test]
    fn artifact_kind_names() {
        assert_eq!(ArtifactKind::JsonSchema.as_str(), "json-schema");
        assert_eq!(ArtifactKind::OpenApi.to_string(), "openapi");
        assert_eq!(ArtifactKind::OpenApi.label(), "OpenAPI");
        assert_eq!(
            serde_json::to_string(&ArtifactKind::OpenApi).unwrap(),
            "\"openapi\""
        );
        assert_eq!(
            serde_json::to_string(&ArtifactKind::JsonSchema).unwrap(),
            "\"json-schema\""
        );
    }
}
