//! # acp CLI entry point
//!
//! Parses command-line arguments, initialises tracing and dispatches to the
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use acp_cli::lint::{run_lint, LintArgs};
use acp_cli::pr::{run_pr_check, PrCheckArgs};
use acp_cli::{resolve_repo_root, EXIT_OPERATIONAL};

/// ACP spec tooling.
///
/// Lints the multi-version spec corpus for consistency between JSON Schema,
/// OpenAPI and example artifacts, and checks pull-request descriptions.
#[derive(Parser, Debug)]
#[command(name = "acp", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log line format. `RUST_LOG` overrides the verbosity level.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check the spec corpus for cross-artifact consistency.
    Lint(LintArgs),

    /// Check a pull-request title and description against the templates.
    PrCheck(PrCheckArgs),
}

fn init_tracing(verbose: u8, format: LogFormat) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_format);

    tracing::debug!("acp CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Commands::Lint(args) => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            let repo_root = resolve_repo_root(&cwd).unwrap_or_else(|| {
                tracing::warn!("Could not locate repository root; using current directory");
                cwd.clone()
            });
            tracing::debug!(repo_root = %repo_root.display(), "resolved repository root");
            run_lint(&args, &repo_root)
        }
        Commands::PrCheck(args) => run_pr_check(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_OPERATIONAL)
        }
    }
}
