//! Integration test: drive the subcommand handlers against on-disk corpora
//! and check the exit codes the binary would return.

use std::fs;
use std::path::{Path, PathBuf};

use acp_cli::lint::{run_lint, LintArgs};
use acp_cli::pr::{run_pr_check, PrCheckArgs};
use acp_cli::{resolve_repo_root, OutputFormat};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn json_args(config: &str) -> LintArgs {
    LintArgs {
        config: Some(PathBuf::from(config)),
        format: OutputFormat::Json,
        ..LintArgs::default()
    }
}

#[test]
fn prohibited_definition_fails_the_run() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "spec/2026-01-30/json-schema/schema.agentic_checkout.json",
        r#"{"$schema": "https://json-schema.org/draft/2020-12/schema", "$defs": {"Refund": {}}}"#,
    );
    write(dir.path(), "lint.yaml", "versions: [2026-01-30, unreleased]\n");

    let root = resolve_repo_root(&dir.path().join("spec/2026-01-30")).unwrap();
    assert_eq!(run_lint(&json_args("lint.yaml"), &root).unwrap(), 1);
}

#[test]
fn warnings_alone_exit_zero() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "spec/2026-01-30/json-schema/schema.delegate_payment.json",
        r#"{"$schema": "https://json-schema.org/draft/2020-12/schema", "$defs": {}}"#,
    );
    write(dir.path(), "lint.yaml", "versions: [2026-01-30, unreleased]\n");

    // Missing OpenAPI and a missing unreleased directory are both advisory.
    assert_eq!(run_lint(&json_args("lint.yaml"), dir.path()).unwrap(), 0);
}

#[test]
fn config_overrides_prohibited_table() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "spec/unreleased/json-schema/schema.agentic_checkout.json",
        r#"{"$schema": "https://json-schema.org/draft/2020-12/schema", "$defs": {"Refund": {"description": "A refund.", "example": {}}}}"#,
    );
    write(dir.path(), "lint.yaml", "versions: [unreleased]\nprohibited: {}\n");

    assert_eq!(run_lint(&json_args("lint.yaml"), dir.path()).unwrap(), 0);
}

#[test]
fn config_with_routes_section_loads() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "spec/unreleased/json-schema/schema.delegate_payment.json",
        r#"{"$schema": "https://json-schema.org/draft/2020-12/schema", "$defs": {"Error": {"type": "object", "description": "An error.", "example": {}, "required": ["code"]}}}"#,
    );
    write(
        dir.path(),
        "examples/unreleased/examples.delegate_payment.json",
        r#"{"declined_card": {"message": "no code"}}"#,
    );
    write(
        dir.path(),
        "lint.yaml",
        "versions: [unreleased]\nroutes:\n  - family: delegate_payment\n    pattern: { prefix: declined_ }\n    definition: Error\n",
    );

    // Only the configured route sends `declined_card` to `Error`, which it violates.
    assert_eq!(run_lint(&json_args("lint.yaml"), dir.path()).unwrap(), 1);
}

#[test]
fn malformed_config_is_an_operational_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("spec")).unwrap();
    write(dir.path(), "lint.yaml", "versions: [unreleased]\nunknown_key: 1\n");

    let err = run_lint(&json_args("lint.yaml"), dir.path()).unwrap_err();
    assert!(format!("{err:#}").contains("failed to load lint config"));
}

#[test]
fn pr_check_passes_a_complete_minor_description() {
    let body = [
        "## 🔧 Type of Change\n- [x] Documentation",
        "## 📝 Description\nClarifies that totals are integers in minor units.",
        "## 🎯 Motivation and Context\nImplementers kept sending decimal strings.",
        "## 🧪 Testing\nRan the consistency linter.",
        "## 📸 Screenshots / Examples\nN/A",
        "## ✅ Checklist\n- [x] Done",
        "## 🔍 Scope Verification\n- [x] Minor",
        "## 📚 Additional Notes\nNone.",
    ]
    .join("\n\n");
    let args = PrCheckArgs {
        title: "Clarify amount units".into(),
        body,
        format: OutputFormat::Text,
    };
    assert_eq!(run_pr_check(&args).unwrap(), 0);
}
