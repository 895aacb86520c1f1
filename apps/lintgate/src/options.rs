//! Option resolution for the `lint` and `black` verbs.
//!
//! Raw option values arrive as strings (CLI flag, config file, or default)
//! and are validated here, before any tool is spawned. The resolved structs
//! are read-only afterward.

use crate::error::GateError;
use std::path::{Path, PathBuf};

pub const DEFAULT_RCFILE: &str = "pylintrc";
pub const DEFAULT_MINIMUM_SCORE: &str = "10";
pub const DEFAULT_LINE_LENGTH: &str = "100";

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;

/// Resolved configuration of one `lint` run.
#[derive(Debug, Clone, PartialEq)]
pub struct LintOptions {
    /// Rcfile as given; relative paths are relative to the repository root,
    /// which is also the tool's working directory.
    pub rcfile: PathBuf,
    pub minimum_score: f64,
}

impl LintOptions {
    pub fn resolve(repo_root: &Path, rcfile: &str, minimum_score: &str) -> Result<Self, GateError> {
        let rcfile = PathBuf::from(rcfile);
        if !repo_root.join(&rcfile).exists() {
            return Err(GateError::MissingRcfile(rcfile));
        }
        let minimum_score = parse_score(minimum_score)?;
        Ok(LintOptions {
            rcfile,
            minimum_score,
        })
    }
}

/// Resolved configuration of one `black` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlackOptions {
    pub line_length: i64,
}

impl BlackOptions {
    /// Only integer coercion is applied; no range check beyond that.
    pub fn resolve(line_length: &str) -> Result<Self, GateError> {
        let line_length = line_length
            .trim()
            .parse::<i64>()
            .map_err(|e| GateError::InvalidNumber {
                option: "--black-line-length",
                value: line_length.to_string(),
                reason: e.to_string(),
            })?;
        Ok(BlackOptions { line_length })
    }
}

/// Coerce a score string to float and check it against [0, 10].
pub fn parse_score(raw: &str) -> Result<f64, GateError> {
    let v = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| GateError::InvalidNumber {
            option: "--pylint-minimum-score",
            value: raw.to_string(),
            reason: e.to_string(),
        })?;
    // NaN fails both comparisons
    if !(MIN_SCORE..=MAX_SCORE).contains(&v) {
        return Err(GateError::ScoreOutOfRange(raw.to_string()));
    }
    Ok(v)
}
