//! Prohibited definitions: some concepts belong to one family only (refunds
//! live in the webhook family), so their definitions must not appear in the
//! JSON Schema of any other family listed in the prohibited table.

use acp_core::{ArtifactKind, Finding, FindingContext, RuleId};
use acp_schema::CorpusSnapshot;

use super::Rule;
use crate::config::LintConfig;

/// No family's JSON Schema defines a name prohibited for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProhibitedSchemaRule;

impl Rule for ProhibitedSchemaRule {
    fn id(&self) -> RuleId {
        RuleId::ProhibitedSchema
    }

    fn check(&self, corpus: &CorpusSnapshot, config: &LintConfig) -> Vec<Finding> {
        let mut findings = Vec::new();
        for snapshot in corpus.versions() {
            let version = snapshot.version();
            for (family, names) in &config.prohibited {
                let Some(doc) = snapshot
                    .family(family)
                    .and_then(|artifacts| artifacts.json_schema.parsed())
                else {
                    continue;
                };
                let before = findings.len();
                for name in names.iter().filter(|name| doc.has_definition(name)) {
                    findings.push(Finding::error(
                        self.id(),
                        format!("Prohibited schema \"{name}\" found in {family}"),
                        FindingContext::scoped(version, family)
                            .artifact(ArtifactKind::JsonSchema)
                            .schema(name.as_str())
                            .reason(format!("{name} should only be in webhook spec, not {family}")),
                    ));
                }
                if findings.len() == before {
                    tracing::info!("No prohibited schemas in {version}/{family}");
                }
            }
        }
        findings
    }
}
