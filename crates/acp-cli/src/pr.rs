//! # PR Check Subcommand
//!
//! Checks a pull-request title and description against the repository
//! templates. Meant to run in CI, where the title and body arrive through
//! `PR_TITLE` and `PR_BODY`.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;

use acp_lint::{check_pull_request, PrCheck};

use crate::OutputFormat;

/// Arguments for the `acp pr-check` subcommand.
#[derive(Args, Debug, Default)]
pub struct PrCheckArgs {
    /// Pull-request title.
    #[arg(long, env = "PR_TITLE", default_value = "")]
    pub title: String,

    /// Pull-request description body.
    #[arg(long, env = "PR_BODY", default_value = "", hide_env_values = true)]
    pub body: String,

    /// Report format.
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Execute the pr-check subcommand.
///
/// Returns exit code: 0 when the PR matches its template, 1 otherwise.
pub fn run_pr_check(args: &PrCheckArgs) -> Result<u8> {
    let check = check_pull_request(&args.title, &args.body);
    tracing::debug!(template = ?check.template, problems = check.problems.len(), "checked PR description");

    let written = match args.format {
        OutputFormat::Text => print_text(&check, &mut io::stdout().lock(), &mut io::stderr().lock()),
        OutputFormat::Json => print_json(&check, &mut io::stdout().lock()),
    };
    written.context("failed to write PR check result")?;

    Ok(check.exit_code())
}

/// Problems go to `err`, the success line to `out`.
pub fn print_text(check: &PrCheck, out: &mut impl Write, err: &mut impl Write) -> io::Result<()> {
    if check.is_clean() {
        return writeln!(out, "PR title and description validation passed.");
    }
    writeln!(err, "PR description validation failed:")?;
    writeln!(err)?;
    for problem in &check.problems {
        writeln!(err, "  • {problem}")?;
    }
    writeln!(err)?;
    writeln!(err, "Please update the PR title and/or description to match the template.")
}

/// Write the check as one pretty-printed JSON document.
pub fn print_json(check: &PrCheck, out: &mut impl Write) -> io::Result<()> {
    let doc = serde_json::json!({
        "passed": check.is_clean(),
        "template": check.template,
        "problems": check.problems.iter().map(|p| p.to_string()).collect::<Vec<_>>(),
    });
    serde_json::to_writer_pretty(&mut *out, &doc).map_err(io::Error::from)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(check: &PrCheck) -> (String, String) {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        print_text(check, &mut out, &mut err).unwrap();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn empty_body_fails_with_bulleted_problem() {
        let check = check_pull_request("Clarify tax rounding", "");
        let (out, err) = render(&check);
        assert!(out.is_empty());
        assert_eq!(
            err,
            "PR description validation failed:\n\n  • PR description (body) is empty.\n\n\
             Please update the PR title and/or description to match the template.\n"
        );
        assert_eq!(check.exit_code(), 1);
    }

    #[test]
    fn json_lists_problem_text() {
        let check = check_pull_request("short", "## 🔧 Type of Change\n## 📝 Description\n");
        let mut out = Vec::new();
        print_json(&check, &mut out).unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(doc["passed"], false);
        assert_eq!(doc["template"], "minor");
        assert_eq!(doc["problems"][0], "PR title is too short (minimum 10 characters).");
    }

    #[test]
    fn run_pr_check_returns_problem_exit_code() {
        let args = PrCheckArgs {
            title: "Clarify tax rounding".into(),
            body: "no template here".into(),
            format: OutputFormat::Json,
        };
        assert_eq!(run_pr_check(&args).unwrap(), 1);
    }
}
