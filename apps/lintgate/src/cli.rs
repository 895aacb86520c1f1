//! CLI argument parsing via `clap`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "lintgate",
    version,
    about = "Pylint and black build gates",
    long_about = "Lintgate — run pylint and black over a Python project's top-level packages and turn their exit status into a pass/fail build signal.\n\nConfiguration precedence: CLI > lintgate.toml > defaults.",
    after_help = "Examples:\n  lintgate lint --pylint-rcfile=pylintrc --pylint-minimum-score=9.5\n  lintgate black --black-line-length=100\n  lintgate packages",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[arg(short, long, global = true, action = clap::ArgAction::SetTrue, help = "Enable debug logging (tool output of clean runs included)")]
    pub verbose: bool,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Args, Clone, Default)]
/// Options shared by the gate subcommands.
pub struct CommonArgs {
    #[arg(long, help = "Repository root (default: current dir)")]
    pub repo_root: Option<String>,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
    #[arg(long = "package", help = "Top-level package to check; repeatable (default: discovered)")]
    pub packages: Vec<String>,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current lintgate version.")]
    Version,
    /// Run pylint and gate on its status and score
    #[command(
        about = "Run pylint on the top-level packages",
        long_about = "Run pylint once per top-level package. Fatal and error messages always fail; other findings fail only when the score is below the minimum.",
        after_help = "Examples:\n  lintgate lint\n  lintgate lint --pylint-minimum-score=8 --output json"
    )]
    Lint {
        #[command(flatten)]
        common: CommonArgs,
        #[arg(long, value_name = "PATH", help = "Path to pylint config file (default: pylintrc)")]
        pylint_rcfile: Option<String>,
        #[arg(long, value_name = "0..10", allow_hyphen_values = true, help = "The minimum allowable score for passing builds (default: 10)")]
        pylint_minimum_score: Option<String>,
        #[arg(long, value_name = "PATH", help = "Pylint executable (default: active virtualenv, then PATH)")]
        pylint_executable: Option<PathBuf>,
    },
    /// Run black in check mode
    #[command(
        about = "Run black --check on the top-level packages",
        long_about = "Run black in check-only mode once per top-level package. Any non-zero exit fails the build.",
        after_help = "Examples:\n  lintgate black\n  lintgate black --black-line-length=88"
    )]
    Black {
        #[command(flatten)]
        common: CommonArgs,
        #[arg(long, value_name = "INT", allow_hyphen_values = true, help = "Override the line length black allows (default: 100)")]
        black_line_length: Option<String>,
        #[arg(long, value_name = "PATH", help = "Black executable (default: active virtualenv, then PATH)")]
        black_executable: Option<PathBuf>,
    },
    /// List the packages the gates would check
    #[command(
        about = "List top-level packages",
        long_about = "Print the resolved package set, one name per line, in processing order."
    )]
    Packages {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lint_with_equals_syntax() {
        let cli = Cli::try_parse_from([
            "lintgate",
            "lint",
            "--pylint-rcfile=ci/pylintrc",
            "--pylint-minimum-score=-1",
            "--package",
            "a",
            "--package",
            "b",
        ])
        .unwrap();
        match cli.cmd {
            Commands::Lint {
                common,
                pylint_rcfile,
                pylint_minimum_score,
                ..
            } => {
                assert_eq!(pylint_rcfile.as_deref(), Some("ci/pylintrc"));
                // range is checked by the option resolver, not by clap
                assert_eq!(pylint_minimum_score.as_deref(), Some("-1"));
                assert_eq!(common.packages, vec!["a", "b"]);
            }
            _ => panic!("expected lint"),
        }
    }

    #[test]
    fn test_parse_black_and_global_verbose() {
        let cli =
            Cli::try_parse_from(["lintgate", "black", "--black-line-length=88", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.cmd {
            Commands::Black {
                black_line_length, ..
            } => assert_eq!(black_line_length.as_deref(), Some("88")),
            _ => panic!("expected black"),
        }
    }
}
