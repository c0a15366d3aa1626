//! # Lint Subcommand
//!
//! Runs every consistency rule over the corpus and reports the findings.
//!
//! Text output writes each finding to stderr as `ERROR: ...` or
//! `WARNING: ...` followed by its context, then a summary on stdout. JSON
//! output writes one document with the outcome and both finding lists.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use acp_core::{Finding, Outcome, Report, VersionTag};
use acp_lint::{lint_corpus, LintConfig};

use crate::OutputFormat;

/// Arguments for the `acp lint` subcommand.
#[derive(Args, Debug, Default)]
pub struct LintArgs {
    /// Corpus root, the directory holding `spec/` and `examples/`.
    /// Defaults to the repository root found from the current directory.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// YAML file overriding the built-in versions, prohibited definitions,
    /// amount fields or example routes.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Lint only this version. Repeat to select several.
    #[arg(long = "version", value_name = "TAG")]
    pub versions: Vec<String>,

    /// Report format.
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Execute the lint subcommand.
///
/// Returns exit code: 0 on success, 1 when any error was found. Operational
/// failures are returned as `Err`.
pub fn run_lint(args: &LintArgs, repo_root: &Path) -> Result<u8> {
    let root = args.root.clone().unwrap_or_else(|| repo_root.to_path_buf());

    let config = match &args.config {
        Some(path) => {
            let path = crate::resolve_path(path, repo_root);
            LintConfig::from_yaml_file(&path)
                .with_context(|| format!("failed to load lint config {}", path.display()))?
        }
        None => LintConfig::default(),
    };

    let versions = args
        .versions
        .iter()
        .map(|v| VersionTag::new(v.as_str()))
        .collect::<Result<Vec<_>, _>>()
        .context("invalid --version")?;

    let report = lint_corpus(&root, &config, &versions)
        .with_context(|| format!("cannot lint corpus at {}", root.display()))?;

    tracing::info!(
        errors = report.error_count(),
        warnings = report.warning_count(),
        "lint finished"
    );

    let written = match args.format {
        OutputFormat::Text => print_text(&report, &mut io::stdout().lock(), &mut io::stderr().lock()),
        OutputFormat::Json => print_json(&report, &mut io::stdout().lock()),
    };
    written.context("failed to write report")?;

    Ok(report.exit_code())
}

/// Write findings to `err` in the order the rules recorded them, and the
/// summary to `out`.
pub fn print_text(report: &Report, out: &mut impl Write, err: &mut impl Write) -> io::Result<()> {
    for finding in report.findings() {
        print_finding(finding, err)?;
    }

    writeln!(out, "Validation Summary:")?;
    if report.outcome() == Outcome::Pass {
        writeln!(out, "All validations passed! No errors or warnings.")?;
        return Ok(());
    }
    if report.warning_count() > 0 {
        writeln!(out, "{} warning(s)", report.warning_count())?;
    }
    if report.error_count() > 0 {
        writeln!(out, "{} error(s)", report.error_count())?;
        writeln!(out)?;
        writeln!(out, "Validation FAILED. Please fix the errors above.")?;
    } else {
        writeln!(out)?;
        writeln!(out, "Validation passed with warnings.")?;
    }
    Ok(())
}

fn print_finding(finding: &Finding, err: &mut impl Write) -> io::Result<()> {
    writeln!(err, "{}: {}", finding.severity.label(), finding.message)?;
    if !finding.context.is_empty() {
        let pretty = serde_json::to_string_pretty(&finding.context).map_err(io::Error::from)?;
        writeln!(err, "  Context: {}", pretty.replace('\n', "\n  "))?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    outcome: Outcome,
    errors: &'a [Finding],
    warnings: &'a [Finding],
}

/// Write the report as one pretty-printed JSON document.
pub fn print_json(report: &Report, out: &mut impl Write) -> io::Result<()> {
    let doc = JsonReport {
        outcome: report.outcome(),
        errors: report.errors(),
        warnings: report.warnings(),
    };
    serde_json::to_writer_pretty(&mut *out, &doc).map_err(io::Error::from)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use acp_core::{ArtifactKind, FindingContext, RuleId, SpecFamily};

    fn sample_report() -> Report {
        let version = VersionTag::unreleased();
        let family = SpecFamily::new("agentic_checkout").unwrap();
        vec![
            Finding::warning(
                RuleId::OpenApiSyntax,
                "OpenAPI not found for unreleased/agentic_checkout",
                FindingContext::scoped(&version, &family).artifact(ArtifactKind::OpenApi),
            ),
            Finding::error(
                RuleId::AmountType,
                "Amount field \"tax\" in LineItem has type \"string\" instead of \"integer\"",
                FindingContext::scoped(&version, &family)
                    .schema("LineItem")
                    .field("tax")
                    .field_type("string"),
            ),
        ]
        .into_iter()
        .collect()
    }

    fn render(report: &Report) -> (String, String) {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        print_text(report, &mut out, &mut err).unwrap();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn clean_report_prints_pass_line_only() {
        let (out, err) = render(&Report::new());
        assert_eq!(out, "Validation Summary:\nAll validations passed! No errors or warnings.\n");
        assert!(err.is_empty());
    }

    #[test]
    fn findings_print_in_recorded_order_with_context() {
        let (out, err) = render(&sample_report());
        let error_at = err.find("ERROR: Amount field").unwrap();
        let warning_at = err.find("WARNING: OpenAPI not found").unwrap();
        assert!(warning_at < error_at);
        assert!(err.contains("  Context: {\n    \"version\": \"unreleased\""));
        assert!(err.contains("\"type\": \"string\""));
        assert!(out.contains("1 warning(s)\n1 error(s)\n"));
        assert!(out.ends_with("Validation FAILED. Please fix the errors above.\n"));
    }

    #[test]
    fn warnings_only_pass() {
        let report: Report = sample_report()
            .warnings()
            .iter()
            .cloned()
            .collect();
        let (out, _) = render(&report);
        assert!(out.ends_with("1 warning(s)\n\nValidation passed with warnings.\n"));
    }

    #[test]
    fn json_report_carries_outcome_and_findings() {
        let mut out = Vec::new();
        print_json(&sample_report(), &mut out).unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(doc["outcome"], "fail");
        assert_eq!(doc["errors"][0]["rule"], RuleId::AmountType.as_str());
        assert_eq!(doc["errors"][0]["context"]["field"], "tax");
        assert_eq!(doc["warnings"][0]["severity"], "warning");
        assert!(doc["warnings"][0]["context"].get("schema").is_none());
    }

    #[test]
    fn run_lint_on_a_clean_corpus_returns_zero() {
        let dir = tempfile::tempdir().unwrap();
        let schema_dir = dir.path().join("spec/unreleased/json-schema");
        std::fs::create_dir_all(&schema_dir).unwrap();
        std::fs::write(
            schema_dir.join("schema.webhooks.json"),
            r#"{"$schema": "https://json-schema.org/draft/2020-12/schema", "$defs": {}}"#,
        )
        .unwrap();
        std::fs::create_dir_all(dir.path().join("spec/unreleased/openapi")).unwrap();
        std::fs::write(
            dir.path().join("spec/unreleased/openapi/openapi.webhooks.yaml"),
            "openapi: 3.1.0\ninfo: {title: Webhooks, version: unreleased}\npaths: {}\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("lint.yaml"), "versions: [unreleased]\n").unwrap();

        let args = LintArgs {
            config: Some(PathBuf::from("lint.yaml")),
            format: OutputFormat::Json,
            ..LintArgs::default()
        };
        assert_eq!(run_lint(&args, dir.path()).unwrap(), 0);
    }

    #[test]
    fn run_lint_reports_operational_errors() {
        let dir = tempfile::tempdir().unwrap();
        let args = LintArgs::default();
        let err = run_lint(&args, dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("no spec/ directory"));

        std::fs::create_dir(dir.path().join("spec")).unwrap();
        let args = LintArgs {
            versions: vec!["1999-01-01".into()],
            ..LintArgs::default()
        };
        let err = run_lint(&args, dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("unknown version"));
    }
}
