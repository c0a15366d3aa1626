//! # Rule Set
//!
//! Independent checks over a [`CorpusSnapshot`]. Each rule returns its
//! findings; rules never read each other's output, and the order they run
//! in only decides the order findings are reported in.
//!
//! Rules never fail: a malformed or missing artifact is either reported by
//! the syntax rules or skipped, and every other problem is a [`Finding`].

use acp_core::{Finding, RuleId};
use acp_schema::{CorpusSnapshot, VersionSnapshot};

use crate::config::LintConfig;

pub mod amount;
pub mod conformance;
pub mod descriptions;
pub mod examples;
pub mod prohibited;
pub mod required;
pub mod syntax;

pub use amount::AmountTypeRule;
pub use conformance::ExampleConformanceRule;
pub use descriptions::{FieldDescriptionRule, OpenApiDescriptionRule};
pub use examples::{ModelExampleRule, OpenApiExampleRule};
pub use prohibited::ProhibitedSchemaRule;
pub use required::RequiredConsistencyRule;
pub use syntax::{JsonSchemaSyntaxRule, OpenApiSyntaxRule};

/// One consistency check.
pub trait Rule {
    /// Stable identifier, also the reporting order key.
    fn id(&self) -> RuleId;

    /// Check the corpus and return every finding, in deterministic order.
    fn check(&self, corpus: &CorpusSnapshot, config: &LintConfig) -> Vec<Finding>;
}

/// Every rule, in execution order.
pub fn all() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(JsonSchemaSyntaxRule),
        Box::new(OpenApiSyntaxRule),
        Box::new(ProhibitedSchemaRule),
        Box::new(AmountTypeRule),
        Box::new(FieldDescriptionRule),
        Box::new(ModelExampleRule),
        Box::new(OpenApiDescriptionRule),
        Box::new(OpenApiExampleRule),
        Box::new(ExampleConformanceRule),
        Box::new(RequiredConsistencyRule),
    ]
}

/// The unreleased version's snapshot, when it was loaded.
pub(crate) fn unreleased<'a>(
    corpus: &'a CorpusSnapshot,
    config: &LintConfig,
) -> Option<&'a VersionSnapshot> {
    corpus.version(&config.unreleased)
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Snapshot builders shared by the rule tests.

    use acp_core::{SpecFamily, VersionTag};
    use acp_schema::{
        Artifact, CorpusSnapshot, ExampleSet, FamilyArtifacts, JsonSchemaDocument, OpenApiDocument,
        VersionSnapshot,
    };
    use serde_json::Value;

    pub fn tag(s: &str) -> VersionTag {
        VersionTag::new(s).unwrap()
    }

    pub fn family(s: &str) -> SpecFamily {
        SpecFamily::new(s).unwrap()
    }

    pub fn json_schema(value: Value) -> Artifact<JsonSchemaDocument> {
        Artifact::Parsed(JsonSchemaDocument::from_value(value).unwrap())
    }

    pub fn openapi(value: Value) -> Artifact<OpenApiDocument> {
        Artifact::Parsed(OpenApiDocument::from_value(value).unwrap())
    }

    pub fn examples(value: Value) -> Artifact<ExampleSet> {
        Artifact::Parsed(ExampleSet::from_value(value).unwrap())
    }

    /// A snapshot with a single (version, family) pair.
    pub fn single(version: &str, name: &str, artifacts: FamilyArtifacts) -> CorpusSnapshot {
        CorpusSnapshot::new(vec![VersionSnapshot::new(tag(version)).with_family(family(name), artifacts)])
    }

    /// A snapshot with only a JSON Schema for one (version, family) pair.
    pub fn schema_only(version: &str, name: &str, schema: Value) -> CorpusSnapshot {
        single(
            version,
            name,
            FamilyArtifacts {
                json_schema: json_schema(schema),
                ..FamilyArtifacts::default()
            },
        )
    }

    /// A snapshot with only an OpenAPI document for one (version, family) pair.
    pub fn openapi_only(version: &str, name: &str, document: Value) -> CorpusSnapshot {
        single(
            version,
            name,
            FamilyArtifacts {
                openapi: openapi(document),
                ..FamilyArtifacts::default()
            },
        )
    }

    pub fn messages(findings: &[acp_core::Finding]) -> Vec<&str> {
        findings.iter().map(|f| f.message.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_rules_run_in_rule_id_order() {
        let ids: Vec<RuleId> = all().iter().map(|r| r.id()).collect();
        assert_eq!(ids, RuleId::ALL);
    }
}
