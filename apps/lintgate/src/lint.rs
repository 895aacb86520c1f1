//! Pylint gate.
//!
//! Runs pylint once per top-level package and turns each run's exit status
//! and score into pass/fail. The first failing package stops the run.
//!
//! Interpretation of one run, in priority order:
//! - exit code 0: clean, the score is never consulted;
//! - fatal bit: unconditional failure;
//! - error bit: unconditional failure;
//! - any other positive code: gradeable, the reported score must reach the
//!   configured minimum.

use crate::error::GateError;
use crate::models::{PackageReport, PackageStatus, RunReport};
use crate::options::LintOptions;
use crate::packages::PackageSet;
use crate::runner::{Invocation, ToolCommand, ToolRunner};
use crate::severity::{self, Severity};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info};

/// Classification of a run that did not fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Clean,
    Graded(f64),
}

fn score_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"rated at (-?[0-9]+(?:\.[0-9]+)?)/10").expect("score pattern is valid")
    })
}

/// Extract the score from a pylint report, if present.
pub fn parse_score(report: &str) -> Option<f64> {
    score_re()
        .captures(report)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Build the pylint command line for one package.
pub fn lint_command(program: &Path, root: &Path, package: &str, opts: &LintOptions) -> ToolCommand {
    ToolCommand::new(program)
        .arg(package)
        .arg(format!("--rcfile={}", opts.rcfile.display()))
        .current_dir(root)
}

/// Classify one pylint run. Logs the captured report as a side effect.
pub fn interpret(package: &str, inv: &Invocation, minimum: f64) -> Result<Verdict, GateError> {
    if inv.is_clean() {
        // no messages; what's left is summary information
        for line in inv.output.lines() {
            debug!("{}", line);
        }
        return Ok(Verdict::Clean);
    }
    for line in inv.output.lines() {
        info!("{}", line);
    }

    let code = inv.exit_code;
    match severity::most_severe(code) {
        Some(Severity::Fatal) => {
            return Err(GateError::FatalFinding {
                package: package.to_string(),
            })
        }
        Some(Severity::Error) => {
            return Err(GateError::ErrorFinding {
                package: package.to_string(),
            })
        }
        _ => {}
    }
    if code <= 0 {
        return Err(GateError::UnexpectedStatus {
            package: package.to_string(),
            code,
        });
    }

    let score = parse_score(&inv.output).ok_or_else(|| GateError::UnparsableReport {
        package: package.to_string(),
        code,
    })?;
    if score < minimum {
        return Err(GateError::InsufficientScore {
            package: package.to_string(),
            score,
            minimum,
        });
    }
    info!("Pylint score: {}", score);
    Ok(Verdict::Graded(score))
}

/// Run the lint gate over `packages` in order, recording each run in
/// `report`. Stops at the first failure.
pub fn run_lint(
    root: &Path,
    program: &Path,
    packages: &PackageSet,
    opts: &LintOptions,
    runner: &mut dyn ToolRunner,
    report: &mut RunReport,
) -> Result<(), GateError> {
    for package in packages.iter() {
        let cmd = lint_command(program, root, package, opts);
        info!("Running command: {}", cmd);
        let inv = runner.run(&cmd)?;
        let verdict = interpret(package, &inv, opts.minimum_score);
        let (status, score) = match &verdict {
            Ok(Verdict::Clean) => (PackageStatus::Clean, None),
            Ok(Verdict::Graded(s)) => (PackageStatus::Passed, Some(*s)),
            Err(_) => (PackageStatus::Failed, parse_score(&inv.output)),
        };
        report.packages.push(PackageReport {
            package: package.to_string(),
            exit_code: inv.exit_code,
            severities: severity::decode(inv.exit_code),
            score,
            status,
        });
        verdict?;
    }
    Ok(())
}
