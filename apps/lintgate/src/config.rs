//! Configuration discovery and effective settings resolution.
//!
//! Lintgate reads `lintgate.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config. Defaults:
//! - `output`: `human`
//! - `lint.rcfile`: `pylintrc`
//! - `lint.minimum_score`: `10`
//! - `black.line_length`: `100`
//! - `packages`: discovered from the repository root
//!
//! Overrides precedence: CLI > config file > defaults.
//!
//! Numeric options stay strings here; `options` coerces and validates them.

use crate::error::GateError;
use crate::options::{DEFAULT_LINE_LENGTH, DEFAULT_MINIMUM_SCORE, DEFAULT_RCFILE};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILES: [&str; 3] = ["lintgate.toml", "lintgate.yaml", "lintgate.yml"];

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
/// A numeric option written either as a number or as a string.
pub enum Scalar {
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Str(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Default, Deserialize, Clone)]
/// `[lint]` section.
pub struct LintCfg {
    pub rcfile: Option<String>,
    pub minimum_score: Option<Scalar>,
    pub executable: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// `[black]` section.
pub struct BlackCfg {
    pub line_length: Option<Scalar>,
    pub executable: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `lintgate.toml|yaml`.
pub struct LintgateConfig {
    pub output: Option<String>,
    pub packages: Option<Vec<String>>,
    pub lint: Option<LintCfg>,
    pub black: Option<BlackCfg>,
}

/// CLI-provided values; `None` means "not given on the command line".
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub repo_root: Option<String>,
    pub output: Option<String>,
    pub rcfile: Option<String>,
    pub minimum_score: Option<String>,
    pub pylint_executable: Option<PathBuf>,
    pub line_length: Option<String>,
    pub black_executable: Option<PathBuf>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_path: Option<PathBuf>,
    pub output: String,
    pub packages: Option<Vec<String>>,
    pub rcfile: String,
    pub minimum_score: String,
    pub pylint_executable: Option<PathBuf>,
    pub line_length: String,
    pub black_executable: Option<PathBuf>,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `lintgate.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Path of the config file under `root`, if any.
pub fn find_config(root: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|f| root.join(f))
        .find(|p| p.is_file())
}

/// Load `LintgateConfig` from `lintgate.toml` or `lintgate.yaml|yml`.
///
/// A missing file is `Ok(None)`; a file that fails to parse is an error,
/// since silently falling back to defaults would change the thresholds.
pub fn load_config(root: &Path) -> Result<Option<LintgateConfig>, GateError> {
    let path = match find_config(root) {
        Some(p) => p,
        None => return Ok(None),
    };
    let s = fs::read_to_string(&path)?;
    let is_toml = path.extension().map(|e| e == "toml").unwrap_or(false);
    let parsed = if is_toml {
        toml::from_str::<LintgateConfig>(&s).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str::<LintgateConfig>(&s).map_err(|e| e.to_string())
    };
    parsed
        .map(Some)
        .map_err(|reason| GateError::ConfigParse { path, reason })
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &Overrides) -> Result<Effective, GateError> {
    let start = PathBuf::from(cli.repo_root.as_deref().unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let config_path = find_config(&repo_root);
    let cfg = load_config(&repo_root)?.unwrap_or_default();
    let lint = cfg.lint.unwrap_or_default();
    let black = cfg.black.unwrap_or_default();

    let output = cli
        .output
        .clone()
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    let rcfile = cli
        .rcfile
        .clone()
        .or(lint.rcfile)
        .unwrap_or_else(|| DEFAULT_RCFILE.to_string());
    let minimum_score = cli
        .minimum_score
        .clone()
        .or_else(|| lint.minimum_score.map(|s| s.to_string()))
        .unwrap_or_else(|| DEFAULT_MINIMUM_SCORE.to_string());
    let line_length = cli
        .line_length
        .clone()
        .or_else(|| black.line_length.map(|s| s.to_string()))
        .unwrap_or_else(|| DEFAULT_LINE_LENGTH.to_string());

    Ok(Effective {
        repo_root,
        config_path,
        output,
        packages: cfg.packages,
        rcfile,
        minimum_score,
        pylint_executable: cli.pylint_executable.clone().or(lint.executable),
        line_length,
        black_executable: cli.black_executable.clone().or(black.executable),
    })
}
