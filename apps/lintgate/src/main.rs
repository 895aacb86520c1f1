//! Lintgate CLI binary entry point.
//! Delegates to the library for lint/black gates and prints results.

use clap::Parser;
use lintgate::cli::{Cli, Commands, CommonArgs};
use lintgate::config::{self, Effective, Overrides};
use lintgate::models::RunReport;
use lintgate::runner::{ExecutableResolver, ProcessRunner};
use lintgate::{commands, output, utils, GateError};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Resolve the effective config or exit with the configuration status.
fn effective_or_exit(common: &CommonArgs, overrides: Overrides) -> Effective {
    let cli = Overrides {
        repo_root: common.repo_root.clone(),
        output: common.output.clone(),
        ..overrides
    };
    match config::resolve_effective(&cli) {
        Ok(eff) => {
            if eff.config_path.is_none() && eff.output != "json" {
                eprintln!(
                    "{} {}",
                    utils::note_prefix(),
                    "No lintgate.toml found; using defaults."
                );
            }
            eff
        }
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            std::process::exit(e.exit_code());
        }
    }
}

fn finish(eff: &Effective, report: RunReport, res: Result<(), GateError>) {
    output::print_report(&report, &eff.output);
    if let Err(e) = res {
        error!("{}", e);
        std::process::exit(e.exit_code());
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Lint {
            common,
            pylint_rcfile,
            pylint_minimum_score,
            pylint_executable,
        } => {
            let eff = effective_or_exit(
                &common,
                Overrides {
                    rcfile: pylint_rcfile,
                    minimum_score: pylint_minimum_score,
                    pylint_executable,
                    ..Default::default()
                },
            );
            let resolver = ExecutableResolver::from_env(eff.pylint_executable.clone());
            let (report, res) = commands::lint(&eff, &common.packages, &resolver, &mut ProcessRunner);
            finish(&eff, report, res);
        }
        Commands::Black {
            common,
            black_line_length,
            black_executable,
        } => {
            let eff = effective_or_exit(
                &common,
                Overrides {
                    line_length: black_line_length,
                    black_executable,
                    ..Default::default()
                },
            );
            let resolver = ExecutableResolver::from_env(eff.black_executable.clone());
            let (report, res) = commands::black(&eff, &common.packages, &resolver, &mut ProcessRunner);
            finish(&eff, report, res);
        }
        Commands::Packages { common } => {
            let eff = effective_or_exit(&common, Overrides::default());
            let set = commands::package_set(&eff, &common.packages);
            if eff.output == "json" {
                let names: Vec<&str> = set.iter().collect();
                println!("{}", serde_json::json!({ "packages": names }));
            } else {
                for name in set.iter() {
                    println!("{}", name);
                }
            }
        }
    }
}
