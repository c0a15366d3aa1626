//! Description coverage for the unreleased version.
//!
//! JSON Schema: every definition carries a description, and the tree walker
//! (no exemptions beyond enum/const/composition) finds no undescribed typed
//! node. OpenAPI: the walker runs over every component schema with the
//! top-level and `$ref` exemptions.

use acp_core::{ArtifactKind, Finding, FindingContext, RuleId};
use acp_schema::{missing_descriptions, CorpusSnapshot, FieldPath, SchemaNode, WalkOptions};

use super::{unreleased, Rule};
use crate::config::LintConfig;

/// Unreleased JSON Schema definitions and their fields are described.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldDescriptionRule;

impl Rule for FieldDescriptionRule {
    fn id(&self) -> RuleId {
        RuleId::FieldDescription
    }

    fn check(&self, corpus: &CorpusSnapshot, config: &LintConfig) -> Vec<Finding> {
        let Some(snapshot) = unreleased(corpus, config) else {
            return Vec::new();
        };
        let version = snapshot.version();
        let mut findings = Vec::new();

        for (family, artifacts) in snapshot.families() {
            let Some(doc) = artifacts.json_schema.parsed() else {
                continue;
            };
            let context = || FindingContext::scoped(version, family).artifact(ArtifactKind::JsonSchema);
            let mut paths = Vec::new();

            for (name, def) in doc.definitions() {
                let Some(node) = SchemaNode::new(def) else {
                    continue;
                };
                if node.description().is_none() {
                    findings.push(Finding::error(
                        self.id(),
                        format!("Model \"{name}\" is missing a description"),
                        context().model(name),
                    ));
                }
                paths.extend(missing_descriptions(def, FieldPath::root(name), WalkOptions::JSON_SCHEMA));
            }

            if paths.is_empty() {
                tracing::info!("All fields have descriptions in {version}/{family}");
            }
            findings.extend(paths.into_iter().map(|path| {
                Finding::error(
                    self.id(),
                    format!("Field is missing description: {path}"),
                    context().schema(path.label()).field(path.to_string()),
                )
            }));
        }
        findings
    }
}

/// Unreleased OpenAPI component schemas have described fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenApiDescriptionRule;

impl Rule for OpenApiDescriptionRule {
    fn id(&self) -> RuleId {
        RuleId::OpenApiDescription
    }

    fn check(&self, corpus: &CorpusSnapshot, config: &LintConfig) -> Vec<Finding> {
        let Some(snapshot) = unreleased(corpus, config) else {
            return Vec::new();
        };
        let version = snapshot.version();
        let mut findings = Vec::new();

        for (family, artifacts) in snapshot.families() {
            let Some(doc) = artifacts.openapi.parsed() else {
                continue;
            };
            let paths: Vec<FieldPath> = doc
                .schemas()
                .flat_map(|(name, schema)| {
                    missing_descriptions(schema, FieldPath::root(name), WalkOptions::OPENAPI)
                })
                .collect();

            if paths.is_empty() {
                tracing::info!("All OpenAPI fields have descriptions in {version}/{family}");
            }
            findings.extend(paths.into_iter().map(|path| {
                Finding::error(
                    self.id(),
                    format!("OpenAPI field is missing description: {path}"),
                    FindingContext::scoped(version, family)
                        .artifact(ArtifactKind::OpenApi)
                        .schema(path.label())
                        .field(path.to_string()),
                )
            }));
        }
        findings
    }
}
