//! # Lint Configuration
//!
//! The constants a run is parameterised by: known versions, the unreleased
//! head, the prohibited-definition table, the monetary field names, and the
//! example route table. [`LintConfig::default`] carries the built-in values;
//! a YAML file may override any section and inherits the rest.
//!
//! ```yaml
//! versions: [2026-01-30, unreleased]
//! prohibited:
//!   agentic_checkout: [Refund]
//! amount_fields: [total, tax]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use acp_core::{AcpError, SpecFamily, VersionTag};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resolver::RouteTable;

/// Known corpus versions, oldest first.
pub const DEFAULT_VERSIONS: [&str; 5] = [
    "2025-09-29",
    "2025-12-12",
    "2026-01-16",
    "2026-01-30",
    "unreleased",
];

/// Property names that carry monetary amounts in minor units.
pub const DEFAULT_AMOUNT_FIELDS: [&str; 8] = [
    "base_amount",
    "discount",
    "subtotal",
    "tax",
    "total",
    "amount",
    "max_amount",
    "unit_amount",
];

/// Error loading or applying a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file cannot be read.
    #[error("cannot read config {path}: {source}")]
    Read {
        /// Config file path.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for [`LintConfig`].
    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The version list is empty.
    #[error("no versions configured")]
    NoVersions,

    /// The unreleased tag is not among the configured versions.
    #[error("unreleased version \"{0}\" is not among the configured versions")]
    UnknownUnreleased(VersionTag),

    /// A requested version is not configured.
    #[error("unknown version \"{0}\"")]
    UnknownVersion(VersionTag),
}

impl From<ConfigError> for AcpError {
    fn from(err: ConfigError) -> Self {
        AcpError::Config(err.to_string())
    }
}

/// Everything a lint run is parameterised by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    /// Versions to lint, in run order.
    pub versions: Vec<VersionTag>,
    /// The head version that receives the authoring rules.
    pub unreleased: VersionTag,
    /// Definitions that must not appear in a family's JSON Schema.
    pub prohibited: BTreeMap<SpecFamily, Vec<String>>,
    /// Property names that must be typed `integer`.
    pub amount_fields: Vec<String>,
    /// Example-to-definition routes.
    pub routes: RouteTable,
}

impl Default for LintConfig {
    fn default() -> Self {
        let versions = DEFAULT_VERSIONS
            .iter()
            .filter_map(|v| VersionTag::new(*v).ok())
            .collect();
        let prohibited = SpecFamily::new("agentic_checkout")
            .map(|family| BTreeMap::from([(family, vec!["Refund".to_string()])]))
            .unwrap_or_default();
        Self {
            versions,
            unreleased: VersionTag::unreleased(),
            prohibited,
            amount_fields: DEFAULT_AMOUNT_FIELDS.iter().map(|f| f.to_string()).collect(),
            routes: RouteTable::builtin(),
        }
    }
}

impl LintConfig {
    /// Parse YAML, filling omitted sections from the defaults, and check it.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML configuration file.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Reject configurations a run cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.versions.is_empty() {
            return Err(ConfigError::NoVersions);
        }
        if !self.versions.contains(&self.unreleased) {
            return Err(ConfigError::UnknownUnreleased(self.unreleased.clone()));
        }
        Ok(())
    }

    /// The configured versions restricted to `requested`, in configured
    /// order. An empty request selects every version.
    pub fn select_versions(&self, requested: &[VersionTag]) -> Result<Vec<VersionTag>, ConfigError> {
        if let Some(unknown) = requested.iter().find(|v| !self.versions.contains(v)) {
            return Err(ConfigError::UnknownVersion(unknown.clone()));
        }
        if requested.is_empty() {
            return Ok(self.versions.clone());
        }
        Ok(self
            .versions
            .iter()
            .filter(|v| requested.contains(v))
            .cloned()
            .collect())
    }

    /// Whether `name` is a monetary amount field.
    pub fn is_amount_field(&self, name: &str) -> bool {
        self.amount_fields.iter().any(|f| f == name)
    }

    /// Definitions prohibited in `family`.
    pub fn prohibited_for(&self, family: &SpecFamily) -> &[String] {
        self.prohibited.get(family).map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(s: &str) -> VersionTag {
        VersionTag::new(s).unwrap()
    }

    #[test]
    fn defaults_match_builtin_constants() {
        let config = LintConfig::default();
        assert_eq!(config.versions.len(), 5);
        assert_eq!(config.versions.last(), Some(&VersionTag::unreleased()));
        assert!(config.validate().is_ok());
        assert!(config.is_amount_field("unit_amount"));
        assert!(!config.is_amount_field("quantity"));
        let checkout = SpecFamily::new("agentic_checkout").unwrap();
        assert_eq!(config.prohibited_for(&checkout), ["Refund"]);
        let webhooks = SpecFamily::new("webhooks").unwrap();
        assert!(config.prohibited_for(&webhooks).is_empty());
        assert_eq!(config.routes, RouteTable::builtin());
    }

    #[test]
    fn yaml_overrides_sections_and_inherits_the_rest() {
        let config = LintConfig::from_yaml_str(
            "versions: [2026-01-30, unreleased]\namount_fields: [total]\n",
        )
        .unwrap();
        assert_eq!(config.versions, [tag("2026-01-30"), tag("unreleased")]);
        assert_eq!(config.amount_fields, ["total"]);
        assert_eq!(config.routes, RouteTable::builtin());
        assert_eq!(config.prohibited, LintConfig::default().prohibited);
    }

    #[test]
    fn yaml_routes_replace_the_builtin_table() {
        let config = LintConfig::from_yaml_str(
            "routes:\n  - family: delegate_payment\n    pattern: { prefix: delegate_payment_error_ }\n    definition: Error\n",
        )
        .unwrap();
        let delegate = SpecFamily::new("delegate_payment").unwrap();
        assert_eq!(config.routes.routes().len(), 1);
        assert_eq!(
            config.routes.resolve(&delegate, "delegate_payment_error_declined"),
            Some("Error")
        );
        assert_eq!(config.routes.resolve(&delegate, "delegate_payment_request"), None);
    }

    #[test]
    fn unreleased_must_be_configured() {
        let err = LintConfig::from_yaml_str("versions: [2026-01-30]\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownUnreleased(_)));
    }

    #[test]
    fn empty_versions_rejected() {
        let err = LintConfig::from_yaml_str("versions: []\n").unwrap_err();
        assert!(matches!(err, ConfigError::NoVersions));
    }

    #[test]
    fn unknown_keys_and_bad_tags_rejected() {
        assert!(matches!(
            LintConfig::from_yaml_str("verisons: []\n"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            LintConfig::from_yaml_str("versions: [\"../up\", unreleased]\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn select_versions_keeps_configured_order() {
        let config = LintConfig::default();
        let selected = config
            .select_versions(&[tag("unreleased"), tag("2025-09-29")])
            .unwrap();
        assert_eq!(selected, [tag("2025-09-29"), tag("unreleased")]);
        assert_eq!(config.select_versions(&[]).unwrap(), config.versions);
    }

    #[test]
    fn select_unknown_version_fails() {
        let config = LintConfig::default();
        let err = config.select_versions(&[tag("2030-01-01")]).unwrap_err();
        assert_eq!(err.to_string(), "unknown version \"2030-01-01\"");
    }

    #[test]
    fn config_error_converts_to_acp_error() {
        let err: AcpError = ConfigError::NoVersions.into();
        assert!(matches!(err, AcpError::Config(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = LintConfig::from_yaml_file(Path::new("/nonexistent/acp-lint.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
