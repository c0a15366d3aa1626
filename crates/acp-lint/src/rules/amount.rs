//! Amount typing: money is an integer count of minor units, never a float
//! or a string.
//!
//! Every direct property of every JSON Schema definition and every OpenAPI
//! component schema whose name is a configured amount field must declare
//! exactly `"type": "integer"`. A property whose type lives behind `$ref` or
//! a composition keyword is not checked here. A union such as
//! `["integer", "null"]` is not `integer` and is reported.

use acp_core::{ArtifactKind, Finding, FindingContext, RuleId, SpecFamily, VersionTag};
use acp_schema::{CorpusSnapshot, SchemaNode};
use serde_json::Value;

use super::Rule;
use crate::config::LintConfig;

/// Amount fields are typed `integer` in both artifact kinds, in every version.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmountTypeRule;

/// Where the schemas being checked came from.
#[derive(Debug, Clone, Copy)]
enum Source {
    JsonSchema,
    OpenApi,
}

impl AmountTypeRule {
    fn check_schema(
        &self,
        config: &LintConfig,
        (version, family): (&VersionTag, &SpecFamily),
        source: Source,
        name: &str,
        schema: &Value,
        findings: &mut Vec<Finding>,
    ) {
        let Some(node) = SchemaNode::new(schema) else {
            return;
        };
        for (field, property) in node.properties() {
            if !config.is_amount_field(field) || property.is_indirect() {
                continue;
            }
            let declared = property.declared_type();
            if declared.is_some_and(|t| t.is("integer")) {
                continue;
            }
            let rendered = declared.map_or_else(|| "undefined".to_string(), |t| t.to_string());
            let (message, kind) = match source {
                Source::JsonSchema => (
                    format!("Amount field \"{field}\" in {name} has type \"{rendered}\" instead of \"integer\""),
                    ArtifactKind::JsonSchema,
                ),
                Source::OpenApi => (
                    format!(
                        "Amount field \"{field}\" in {name} (OpenAPI) has type \"{rendered}\" instead of \"integer\""
                    ),
                    ArtifactKind::OpenApi,
                ),
            };
            let mut context = FindingContext::scoped(version, family)
                .artifact(kind)
                .schema(name)
                .field(field);
            if let Some(t) = declared {
                context = context.field_type(t.to_string());
            }
            findings.push(Finding::error(self.id(), message, context));
        }
    }
}

impl Rule for AmountTypeRule {
    fn id(&self) -> RuleId {
        RuleId::AmountType
    }

    fn check(&self, corpus: &CorpusSnapshot, config: &LintConfig) -> Vec<Finding> {
        let mut findings = Vec::new();

        for snapshot in corpus.versions() {
            for (family, artifacts) in snapshot.families() {
                let Some(doc) = artifacts.json_schema.parsed() else {
                    continue;
                };
                let before = findings.len();
                for (name, def) in doc.definitions() {
                    let coords = (snapshot.version(), family);
                    self.check_schema(config, coords, Source::JsonSchema, name, def, &mut findings);
                }
                if findings.len() == before {
                    tracing::info!("Field types correct in {}/{family}", snapshot.version());
                }
            }
        }

        for snapshot in corpus.versions() {
            for (family, artifacts) in snapshot.families() {
                let Some(doc) = artifacts.openapi.parsed() else {
                    continue;
                };
                let before = findings.len();
                for (name, schema) in doc.schemas() {
                    let coords = (snapshot.version(), family);
                    self.check_schema(config, coords, Source::OpenApi, name, schema, &mut findings);
                }
                if findings.len() == before {
                    tracing::info!("Field types correct in OpenAPI {}/{family}", snapshot.version());
                }
            }
        }

        findings
    }
}
