//! Example conformance: every example the route table resolves must satisfy
//! its target definition.
//!
//! Runs for every version and family with a parsed JSON Schema and an
//! example set. Resolution gaps (no matching route, a route naming a
//! definition the document lacks, a definition that does not compile) are
//! skipped without a finding.

use acp_core::{ArtifactKind, Finding, FindingContext, RuleId};
use acp_schema::{document_base, Artifact, ConformanceOracle, CorpusSnapshot, Verdict};

use super::Rule;
use crate::config::LintConfig;

/// Named examples conform to the definition they resolve to.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExampleConformanceRule;

impl Rule for ExampleConformanceRule {
    fn id(&self) -> RuleId {
        RuleId::ExampleConformance
    }

    fn check(&self, corpus: &CorpusSnapshot, config: &LintConfig) -> Vec<Finding> {
        let mut findings = Vec::new();

        for snapshot in corpus.versions() {
            let version = snapshot.version();
            for (family, artifacts) in snapshot.families() {
                let Some(schema) = artifacts.json_schema.parsed() else {
                    continue;
                };
                let examples = match &artifacts.examples {
                    Artifact::Parsed(examples) => examples,
                    Artifact::Missing => {
                        tracing::debug!(%version, %family, "no example set");
                        continue;
                    }
                    Artifact::Malformed(err) => {
                        findings.push(Finding::error(
                            self.id(),
                            format!("Invalid examples file for {version}/{family}: {err}"),
                            FindingContext::scoped(version, family).artifact(ArtifactKind::Examples),
                        ));
                        continue;
                    }
                };

                let mut oracle = ConformanceOracle::new(schema, document_base(schema, version, family));
                for (name, payload) in examples.iter() {
                    let Some(definition) = config.routes.resolve(family, name) else {
                        tracing::debug!(%version, %family, example = name, "no route for example");
                        continue;
                    };
                    match oracle.check(definition, payload) {
                        Ok(Verdict::Conforms) => {}
                        Ok(Verdict::Violations(violations)) => findings.push(Finding::error(
                            self.id(),
                            format!("Example \"{name}\" does not validate against schema"),
                            FindingContext::scoped(version, family)
                                .artifact(ArtifactKind::Examples)
                                .schema(definition)
                                .example(name)
                                .errors(violations),
                        )),
                        Err(gap) => {
                            tracing::debug!(%version, %family, example = name, reason = %gap, "skipping example");
                        }
                    }
                }
                tracing::info!("Examples validated for {version}/{family}");
            }
        }
        findings
    }
}
