//! # Linter
//!
//! Folds the output of every rule, in order, into one [`Report`]. Rules are
//! pure functions of the snapshot and configuration, so the fold carries no
//! hidden state and the same snapshot always yields the same report.
//!
//! [`lint_corpus`] is the full pipeline used by the binary: validate the
//! configuration, select versions, load a [`CorpusSnapshot`] from disk, run.

use std::path::Path;

use acp_core::{AcpError, Report, VersionTag};
use acp_schema::{Corpus, CorpusSnapshot};

use crate::config::LintConfig;
use crate::rules::{self, Rule};

/// Runs a rule set over corpus snapshots.
pub struct Linter {
    config: LintConfig,
    rules: Vec<Box<dyn Rule>>,
}

impl std::fmt::Debug for Linter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Linter")
            .field("config", &self.config)
            .field("rules", &self.rules.iter().map(|r| r.id()).collect::<Vec<_>>())
            .finish()
    }
}

impl Linter {
    /// A linter running every built-in rule.
    pub fn new(config: LintConfig) -> Self {
        Self::with_rules(config, rules::all())
    }

    /// A linter running only the given rules, in the given order.
    pub fn with_rules(config: LintConfig, rules: Vec<Box<dyn Rule>>) -> Self {
        Self { config, rules }
    }

    /// The configuration rules are checked against.
    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Run every rule over the snapshot.
    pub fn run(&self, corpus: &CorpusSnapshot) -> Report {
        let mut report = Report::new();
        for rule in &self.rules {
            tracing::info!(rule = %rule.id(), "running check");
            let findings = rule.check(corpus, &self.config);
            tracing::debug!(rule = %rule.id(), findings = findings.len(), "check finished");
            report.extend(findings);
        }
        report
    }
}

/// Lint the corpus under `root`.
///
/// `versions` restricts the run to a subset of the configured versions; an
/// empty slice means all of them. Fails only on operational problems: an
/// invalid configuration, an unknown version, or an unusable root.
pub fn lint_corpus(root: &Path, config: &LintConfig, versions: &[VersionTag]) -> Result<Report, AcpError> {
    config.validate()?;
    let selected = config.select_versions(versions)?;

    if !root.is_dir() {
        return Err(AcpError::CorpusRoot {
            path: root.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }
    let corpus = Corpus::new(root);
    if !corpus.root().join("spec").is_dir() {
        return Err(AcpError::CorpusRoot {
            path: root.to_path_buf(),
            reason: "no spec/ directory".to_string(),
        });
    }

    tracing::info!(root = %root.display(), versions = selected.len(), "loading corpus");
    let snapshot = corpus.snapshot(&selected);
    Ok(Linter::new(config.clone()).run(&snapshot))
}
