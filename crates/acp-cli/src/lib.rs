//! # acp-cli — Command-Line Interface for the ACP Spec Corpus
//!
//! Provides the `acp` binary.
//!
//! ## Subcommands
//!
//! - `acp lint`: cross-artifact consistency and authoring-policy checks over
//!   every configured version of the corpus.
//! - `acp pr-check`: pull-request title and description check against the
//!   Minor Improvement and SEP templates.
//!
//! ```bash
//! acp lint
//! acp lint --version unreleased --format json
//! acp -vv lint --root ../agentic-commerce-protocol --config lint.yaml
//! PR_TITLE="Clarify tax rounding" PR_BODY="$(cat body.md)" acp pr-check
//! ```
//!
//! ## Exit Codes
//!
//! | code | meaning |
//! |------|---------|
//! | 0 | passed, possibly with warnings |
//! | 1 | at least one error finding or PR problem |
//! | 2 | operational failure: bad configuration, unusable corpus root |
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; every check lives in `acp-lint`.
//! - Findings are printed by the reporters, not logged.

pub mod lint;
pub mod pr;

use std::path::{Path, PathBuf};

/// Exit code for operational failures, distinct from policy failures.
pub const EXIT_OPERATIONAL: u8 = 2;

/// Output format shared by the subcommands.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable findings on stderr, summary on stdout.
    #[default]
    Text,
    /// One JSON document on stdout.
    Json,
}

/// Walk up from `start` to the first directory containing `spec/`.
pub fn resolve_repo_root(start: &Path) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        if dir.join("spec").is_dir() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}

/// Resolve a path that may be relative to the repository root.
///
/// Absolute paths are returned as-is. A relative path that exists under
/// `repo_root` resolves there; otherwise it stays relative to the current
/// directory.
pub fn resolve_path(path: &Path, repo_root: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let repo_relative = repo_root.join(path);
    if repo_relative.exists() {
        repo_relative
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_root_is_found_from_a_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("spec").join("unreleased").join("openapi");
        std::fs::create_dir_all(&nested).unwrap();
        assert_eq!(resolve_repo_root(&nested).as_deref(), Some(dir.path()));
    }

    #[test]
    fn repo_root_absent_without_spec_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        // Ancestors of the temp dir are outside our control; only check that
        // the temp dir itself is not chosen.
        assert_ne!(resolve_repo_root(&nested).as_deref(), Some(dir.path()));
    }

    #[test]
    fn resolve_path_prefers_repo_relative_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("lint.yaml"), "versions: [unreleased]\n").unwrap();
        assert_eq!(
            resolve_path(Path::new("lint.yaml"), dir.path()),
            dir.path().join("lint.yaml")
        );
        assert_eq!(
            resolve_path(Path::new("missing.yaml"), dir.path()),
            PathBuf::from("missing.yaml")
        );
        let absolute = dir.path().join("elsewhere.yaml");
        assert_eq!(resolve_path(&absolute, Path::new("/unused")), absolute);
    }
}
