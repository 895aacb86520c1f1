//! Black format check.
//!
//! Runs `black --check` once per top-level package. Only the exit code
//! matters: any non-zero status means at least one file would be
//! reformatted (or black could not parse it), and the run stops there.

use crate::error::GateError;
use crate::models::{PackageReport, PackageStatus, RunReport};
use crate::options::BlackOptions;
use crate::packages::PackageSet;
use crate::runner::{ToolCommand, ToolRunner};
use std::path::Path;
use tracing::{debug, info};

/// Build the black command line for one package.
pub fn black_command(program: &Path, root: &Path, package: &str, opts: &BlackOptions) -> ToolCommand {
    ToolCommand::new(program)
        .arg(package)
        .arg("--line-length")
        .arg(opts.line_length.to_string())
        .arg("--check")
        .current_dir(root)
}

/// Run the format check over `packages` in order, recording each run in
/// `report`. Stops at the first package black would reformat.
pub fn run_black(
    root: &Path,
    program: &Path,
    packages: &PackageSet,
    opts: &BlackOptions,
    runner: &mut dyn ToolRunner,
    report: &mut RunReport,
) -> Result<(), GateError> {
    for package in packages.iter() {
        let cmd = black_command(program, root, package, opts);
        info!("Running command: {}", cmd);
        let inv = runner.run(&cmd)?;
        let clean = inv.is_clean();
        for line in inv.output.lines() {
            if clean {
                debug!("{}", line);
            } else {
                info!("{}", line);
            }
        }
        report.packages.push(PackageReport {
            package: package.to_string(),
            exit_code: inv.exit_code,
            severities: Vec::new(),
            score: None,
            status: if clean {
                PackageStatus::Clean
            } else {
                PackageStatus::Failed
            },
        });
        if !clean {
            return Err(GateError::NotFormatted {
                package: package.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::testing::{capture_logs, logged_at, ScriptedRunner};
    use crate::runner::Invocation;

    fn run(packages: &[&str], replies: Vec<Invocation>) -> (ScriptedRunner, RunReport, Result<(), GateError>) {
        let mut runner = ScriptedRunner::new(replies);
        let mut report = RunReport::new("black");
        let res = run_black(
            Path::new("/repo"),
            Path::new("black"),
            &PackageSet::from_names(packages.iter().copied()),
            &BlackOptions { line_length: 100 },
            &mut runner,
            &mut report,
        );
        (runner, report, res)
    }

    #[test]
    fn test_black_command_shape() {
        let cmd = black_command(
            Path::new("black"),
            Path::new("/repo"),
            "rates_etl",
            &BlackOptions { line_length: 88 },
        );
        assert_eq!(
            cmd.argv(),
            vec!["black", "rates_etl", "--line-length", "88", "--check"]
        );
    }

    #[test]
    fn test_line_length_passed_through_unchecked() {
        let cmd = black_command(
            Path::new("black"),
            Path::new("/repo"),
            "pkg",
            &BlackOptions { line_length: -3 },
        );
        assert_eq!(cmd.args[2], "-3");
    }

    #[test]
    fn test_failed_check_logs_output_at_info() {
        let logs = capture_logs(|| {
            let (_, _, res) = run(&["a"], vec![Invocation::new(1, "would reformat a/x.py")]);
            assert!(res.is_err());
        });
        assert!(logged_at(&logs, "INFO", "would reformat a/x.py"), "{:?}", logs);
        assert!(
            logged_at(&logs, "INFO", "Running command: ['black', 'a', '--line-length', '100', '--check']"),
            "{:?}",
            logs
        );

        let logs = capture_logs(|| {
            let (_, _, res) = run(&["a"], vec![Invocation::new(0, "All done!")]);
            assert!(res.is_ok());
        });
        assert!(logged_at(&logs, "DEBUG", "All done!"), "{:?}", logs);
    }

    #[test]
    fn test_clean_exit_passes_whatever_the_output() {
        let (runner, report, res) = run(
            &["a", "b"],
            vec![
                Invocation::new(0, "would reformat a/x.py"),
                Invocation::new(0, "All done!"),
            ],
        );
        assert!(res.is_ok());
        assert_eq!(runner.packages_run(), vec!["a", "b"]);
        assert!(report.packages.iter().all(|p| p.status == PackageStatus::Clean));
    }

    #[test]
    fn test_non_zero_exit_fails_and_stops() {
        let (runner, report, res) = run(
            &["a", "b"],
            vec![Invocation::new(1, "All done!"), Invocation::new(0, "")],
        );
        let err = res.unwrap_err();
        assert!(matches!(err, GateError::NotFormatted { ref package } if package == "a"));
        assert!(err.to_string().contains("Code is not black!"));
        assert_eq!(runner.packages_run(), vec!["a"]);
        assert_eq!(report.packages.len(), 1);
    }

    #[test]
    fn test_any_non_zero_code_counts() {
        let (_, _, res) = run(&["a"], vec![Invocation::new(123, "")]);
        assert!(res.is_err());
    }

    #[test]
    fn test_empty_package_set_is_a_pass() {
        let (runner, report, res) = run(&[], vec![]);
        assert!(res.is_ok());
        assert!(runner.calls.is_empty());
        assert!(report.passed);
    }
}
