//! Syntax rules: every present artifact parses and declares its mandatory
//! top-level keys.
//!
//! These two rules are the only ones that report artifact load state.
//! Malformed files are errors; absent files and absent version directories
//! are advisory warnings. Every other rule skips such artifacts silently, so
//! each load problem is reported exactly once.

use acp_core::{ArtifactKind, Finding, FindingContext, RuleId};
use acp_schema::{Artifact, CorpusSnapshot};

use super::Rule;
use crate::config::LintConfig;

/// JSON Schema documents parse and declare `$schema`. Also reports
/// configured versions with no `spec/<version>` directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaSyntaxRule;

impl Rule for JsonSchemaSyntaxRule {
    fn id(&self) -> RuleId {
        RuleId::JsonSchemaSyntax
    }

    fn check(&self, corpus: &CorpusSnapshot, _config: &LintConfig) -> Vec<Finding> {
        let mut findings = Vec::new();
        for snapshot in corpus.versions() {
            let version = snapshot.version();
            if !snapshot.is_present() {
                findings.push(Finding::warning(
                    self.id(),
                    format!("No spec artifacts found for version {version}"),
                    FindingContext::for_version(version),
                ));
                continue;
            }
            for (family, artifacts) in snapshot.families() {
                let context =
                    FindingContext::scoped(version, family).artifact(ArtifactKind::JsonSchema);
                match &artifacts.json_schema {
                    Artifact::Parsed(doc) if doc.declares_dialect() => {
                        tracing::info!("Valid JSON Schema: {version}/{family}");
                    }
                    Artifact::Parsed(_) => findings.push(Finding::error(
                        self.id(),
                        format!("Missing $schema in {version}/{family}"),
                        context,
                    )),
                    Artifact::Malformed(err) => findings.push(Finding::error(
                        self.id(),
                        format!("Invalid JSON in {version}/{family}: {err}"),
                        context,
                    )),
                    Artifact::Missing => findings.push(Finding::warning(
                        self.id(),
                        format!("JSON Schema not found for {version}/{family}"),
                        context,
                    )),
                }
            }
        }
        findings
    }
}

/// OpenAPI documents parse and declare `openapi`, `info`, `paths`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenApiSyntaxRule;

impl Rule for OpenApiSyntaxRule {
    fn id(&self) -> RuleId {
        RuleId::OpenApiSyntax
    }

    fn check(&self, corpus: &CorpusSnapshot, _config: &LintConfig) -> Vec<Finding> {
        let mut findings = Vec::new();
        for snapshot in corpus.versions() {
            let version = snapshot.version();
            for (family, artifacts) in snapshot.families() {
                let context = FindingContext::scoped(version, family).artifact(ArtifactKind::OpenApi);
                match &artifacts.openapi {
                    Artifact::Parsed(doc) => {
                        let missing = doc.missing_top_level_keys();
                        if missing.is_empty() {
                            tracing::info!("Valid OpenAPI: {version}/{family}");
                        } else {
                            findings.push(Finding::error(
                                self.id(),
                                format!(
                                    "Invalid OpenAPI structure in {version}/{family}: missing {}",
                                    missing.join(", ")
                                ),
                                context,
                            ));
                        }
                    }
                    Artifact::Malformed(err) => findings.push(Finding::error(
                        self.id(),
                        format!("Invalid YAML in {version}/{family}: {err}"),
                        context,
                    )),
                    Artifact::Missing => findings.push(Finding::warning(
                        self.id(),
                        format!("OpenAPI not found for {version}/{family}"),
                        context,
                    )),
                }
            }
        }
        findings
    }
}
