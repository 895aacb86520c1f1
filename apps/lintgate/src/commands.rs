//! Verb wiring: resolve options, resolve the package set and the tool
//! executable, then hand off to the gate.
//!
//! Option resolution happens before the package loop, so configuration
//! errors never reach the runner.

use crate::config::Effective;
use crate::error::GateError;
use crate::format::run_black;
use crate::lint::run_lint;
use crate::models::RunReport;
use crate::options::{BlackOptions, LintOptions};
use crate::packages::{self, PackageSet};
use crate::runner::{ExecutableResolver, ToolRunner};
use tracing::debug;

pub const PYLINT: &str = "pylint";
pub const BLACK: &str = "black";

/// Package set for `eff`, honoring `--package` overrides.
pub fn package_set(eff: &Effective, cli_packages: &[String]) -> PackageSet {
    packages::resolve(&eff.repo_root, cli_packages, eff.packages.as_deref())
}

/// `lint` verb.
pub fn lint(
    eff: &Effective,
    cli_packages: &[String],
    resolver: &ExecutableResolver,
    runner: &mut dyn ToolRunner,
) -> (RunReport, Result<(), GateError>) {
    let mut report = RunReport::new("lint");
    let res = LintOptions::resolve(&eff.repo_root, &eff.rcfile, &eff.minimum_score).and_then(|opts| {
        let pkgs = package_set(eff, cli_packages);
        let program = resolver.resolve(PYLINT);
        debug!(program = %program.display(), packages = pkgs.len(), "lint resolved");
        run_lint(&eff.repo_root, &program, &pkgs, &opts, runner, &mut report)
    });
    finish(report, res)
}

/// `black` verb.
pub fn black(
    eff: &Effective,
    cli_packages: &[String],
    resolver: &ExecutableResolver,
    runner: &mut dyn ToolRunner,
) -> (RunReport, Result<(), GateError>) {
    let mut report = RunReport::new("black");
    let res = BlackOptions::resolve(&eff.line_length).and_then(|opts| {
        let pkgs = package_set(eff, cli_packages);
        let program = resolver.resolve(BLACK);
        debug!(program = %program.display(), packages = pkgs.len(), "black resolved");
        run_black(&eff.repo_root, &program, &pkgs, &opts, runner, &mut report)
    });
    finish(report, res)
}

fn finish(mut report: RunReport, res: Result<(), GateError>) -> (RunReport, Result<(), GateError>) {
    if let Err(e) = res.as_ref() {
        report.fail(e.to_string());
    }
    (report, res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve_effective, Overrides};
    use crate::runner::testing::ScriptedRunner;
    use crate::runner::Invocation;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn effective(root: &Path, minimum: &str) -> Effective {
        resolve_effective(&Overrides {
            repo_root: root.to_str().map(str::to_string),
            minimum_score: Some(minimum.to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    fn repo_with_packages(names: &[&str]) -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("lintgate.toml"), "").unwrap();
        fs::write(dir.path().join("pylintrc"), "[MASTER]\n").unwrap();
        for n in names {
            fs::create_dir_all(dir.path().join(n)).unwrap();
            fs::write(dir.path().join(n).join("__init__.py"), "").unwrap();
        }
        dir
    }

    #[test]
    fn test_out_of_range_score_rejected_before_any_run() {
        let dir = repo_with_packages(&["pkg"]);
        for bad in ["11", "-1"] {
            let mut runner = ScriptedRunner::default();
            let eff = effective(dir.path(), bad);
            let (report, res) = lint(&eff, &[], &ExecutableResolver::default(), &mut runner);
            assert!(matches!(res, Err(GateError::ScoreOutOfRange(_))));
            assert!(runner.calls.is_empty());
            assert!(!report.passed);
        }
    }

    #[test]
    fn test_missing_rcfile_rejected_before_any_run() {
        let dir = repo_with_packages(&["pkg"]);
        fs::remove_file(dir.path().join("pylintrc")).unwrap();
        let mut runner = ScriptedRunner::default();
        let eff = effective(dir.path(), "10");
        let (_, res) = lint(&eff, &[], &ExecutableResolver::default(), &mut runner);
        let err = res.unwrap_err();
        assert!(matches!(err, GateError::MissingRcfile(_)));
        assert_eq!(err.exit_code(), 2);
        assert!(runner.calls.is_empty());
    }

    #[test]
    fn test_lint_runs_discovered_packages_with_resolved_program() {
        let dir = repo_with_packages(&["beta", "alpha"]);
        let mut runner = ScriptedRunner::new(vec![
            Invocation::new(0, ""),
            Invocation::new(4, "Your code has been rated at 8.50/10"),
        ]);
        let eff = effective(dir.path(), "8.0");
        let resolver = ExecutableResolver::new(Some("/venv/bin/pylint".into()), None);
        let (report, res) = lint(&eff, &[], &resolver, &mut runner);
        assert!(res.is_ok());
        assert!(report.passed);
        assert_eq!(runner.packages_run(), vec!["alpha", "beta"]);
        assert_eq!(runner.calls[0].program, Path::new("/venv/bin/pylint"));
        assert_eq!(runner.calls[0].args[1], "--rcfile=pylintrc");
    }

    #[test]
    fn test_lint_fails_with_score_in_report_error() {
        let dir = repo_with_packages(&["pkg"]);
        let mut runner =
            ScriptedRunner::new(vec![Invocation::new(4, "Your code has been rated at 8.50/10")]);
        let eff = effective(dir.path(), "9.0");
        let (report, res) = lint(&eff, &[], &ExecutableResolver::default(), &mut runner);
        assert!(matches!(res, Err(GateError::InsufficientScore { .. })));
        assert!(report.error.unwrap().contains("8.5"));
    }

    #[test]
    fn test_cli_packages_override_discovery() {
        let dir = repo_with_packages(&["found"]);
        let mut runner = ScriptedRunner::new(vec![Invocation::new(0, "")]);
        let eff = effective(dir.path(), "10");
        let (_, res) = black(
            &eff,
            &["chosen".to_string()],
            &ExecutableResolver::default(),
            &mut runner,
        );
        assert!(res.is_ok());
        assert_eq!(runner.packages_run(), vec!["chosen"]);
        assert_eq!(runner.calls[0].program, Path::new("black"));
    }

    #[test]
    fn test_black_rejects_non_integer_line_length() {
        let dir = repo_with_packages(&["pkg"]);
        let mut runner = ScriptedRunner::default();
        let eff = resolve_effective(&Overrides {
            repo_root: dir.path().to_str().map(str::to_string),
            line_length: Some("wide".into()),
            ..Default::default()
        })
        .unwrap();
        let (_, res) = black(&eff, &[], &ExecutableResolver::default(), &mut runner);
        assert!(matches!(res, Err(GateError::InvalidNumber { .. })));
        assert!(runner.calls.is_empty());
    }

    #[test]
    fn test_empty_repository_passes_both_verbs() {
        let dir = repo_with_packages(&[]);
        let eff = effective(dir.path(), "10");
        let mut runner = ScriptedRunner::default();
        let (lint_report, lint_res) = lint(&eff, &[], &ExecutableResolver::default(), &mut runner);
        let (black_report, black_res) =
            black(&eff, &[], &ExecutableResolver::default(), &mut runner);
        assert!(lint_res.is_ok() && black_res.is_ok());
        assert!(lint_report.passed && black_report.passed);
        assert!(runner.calls.is_empty());
    }
}
