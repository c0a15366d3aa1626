//! Required-field consistency between the two artifact kinds.
//!
//! A definition published under the same name in a family's JSON Schema
//! `$defs` and OpenAPI `components.schemas` should agree on its `required`
//! list. Disagreements are advisory: the two artifacts are edited by hand
//! and drift is worth surfacing, not blocking on.

use std::collections::BTreeSet;

use acp_core::{ArtifactKind, Finding, FindingContext, RuleId};
use acp_schema::{CorpusSnapshot, SchemaNode};

use super::Rule;
use crate::config::LintConfig;

/// `required` lists agree between JSON Schema and OpenAPI.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredConsistencyRule;

fn required_set(node: Option<SchemaNode<'_>>) -> BTreeSet<&str> {
    node.map(|n| n.required().into_iter().collect()).unwrap_or_default()
}

impl Rule for RequiredConsistencyRule {
    fn id(&self) -> RuleId {
        RuleId::RequiredConsistency
    }

    fn check(&self, corpus: &CorpusSnapshot, _config: &LintConfig) -> Vec<Finding> {
        let mut findings = Vec::new();

        for snapshot in corpus.versions() {
            let version = snapshot.version();
            for (family, artifacts) in snapshot.families() {
                let (Some(schema), Some(openapi)) =
                    (artifacts.json_schema.parsed(), artifacts.openapi.parsed())
                else {
                    continue;
                };
                for (name, def) in schema.definitions() {
                    let Some(component) = openapi.schema(name) else {
                        continue;
                    };
                    let in_schema = required_set(SchemaNode::new(def));
                    let in_openapi = required_set(SchemaNode::new(component));

                    let one_sided = in_schema
                        .difference(&in_openapi)
                        .map(|field| (field, ArtifactKind::JsonSchema, ArtifactKind::OpenApi))
                        .chain(
                            in_openapi
                                .difference(&in_schema)
                                .map(|field| (field, ArtifactKind::OpenApi, ArtifactKind::JsonSchema)),
                        );
                    for (field, requires, omits) in one_sided {
                        findings.push(Finding::warning(
                            self.id(),
                            format!(
                                "Field \"{field}\" of \"{name}\" is required in {} but not in {} for {version}/{family}",
                                requires.label(),
                                omits.label()
                            ),
                            FindingContext::scoped(version, family)
                                .artifact(requires)
                                .schema(name)
                                .field(*field),
                        ));
                    }
                }
            }
        }
        findings
    }
}
