//! Example coverage for the unreleased version: every JSON Schema definition
//! and every top-level OpenAPI object schema carries `example` or
//! `examples`.

use acp_core::{ArtifactKind, Finding, FindingContext, RuleId};
use acp_schema::{CorpusSnapshot, SchemaNode};

use super::{unreleased, Rule};
use crate::config::LintConfig;

/// Unreleased JSON Schema definitions carry an example.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelExampleRule;

impl Rule for ModelExampleRule {
    fn id(&self) -> RuleId {
        RuleId::ModelExample
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
            let before = findings.len();
            for (name, def) in doc.definitions() {
                if SchemaNode::new(def).is_some_and(|node| !node.has_example()) {
                    findings.push(Finding::error(
                        self.id(),
                        format!("Model \"{name}\" is missing an example"),
                        FindingContext::scoped(version, family)
                            .artifact(ArtifactKind::JsonSchema)
                            .model(name),
                    ));
                }
            }
            if findings.len() == before {
                tracing::info!("All models have examples in {version}/{family}");
            }
        }
        findings
    }
}

/// Unreleased top-level OpenAPI object schemas carry an example, unless
/// their meaning lives in a reference, an enumeration or a composition.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenApiExampleRule;

impl OpenApiExampleRule {
    fn needs_example(node: SchemaNode<'_>) -> bool {
        if node.has_example() || !node.declared_type().is_some_and(|t| t.is("object")) {
            return false;
        }
        // `const` alone does not exempt a schema.
        !(node.is_indirect() || node.has_enum())
    }
}

impl Rule for OpenApiExampleRule {
    fn id(&self) -> RuleId {
        RuleId::OpenApiExample
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
            let before = findings.len();
            for (name, schema) in doc.schemas() {
                if SchemaNode::new(schema).is_some_and(Self::needs_example) {
                    findings.push(Finding::error(
                        self.id(),
                        format!("OpenAPI schema \"{name}\" is missing an example"),
                        FindingContext::scoped(version, family)
                            .artifact(ArtifactKind::OpenApi)
                            .schema(name),
                    ));
                }
            }
            if findings.len() == before {
                tracing::info!("All OpenAPI schemas have examples in {version}/{family}");
            }
        }
        findings
    }
}
