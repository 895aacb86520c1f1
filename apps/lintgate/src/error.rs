//! Error taxonomy shared by the `lint` and `black` gates.
//!
//! Configuration problems are raised before any tool runs (exit code 2);
//! everything else is a build failure reported after a tool ran (exit code 1).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GateError {
    /// The pylint rcfile does not exist on disk.
    #[error("Pylint config file {} does not exist.", .0.display())]
    MissingRcfile(PathBuf),
    /// A numeric option could not be coerced.
    #[error("invalid value '{value}' for {option}: {reason}")]
    InvalidNumber {
        option: &'static str,
        value: String,
        reason: String,
    },
    /// The minimum score lies outside [0, 10].
    #[error("A score of {0} is impossible")]
    ScoreOutOfRange(String),
    /// A discovered config file exists but cannot be parsed.
    #[error("failed to parse {}: {reason}", .path.display())]
    ConfigParse { path: PathBuf, reason: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The tool could not be started at all.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// The tool exited without a status code (killed by a signal).
    #[error("{program} was terminated before reporting an exit status")]
    Terminated { program: String },

    #[error("Fatal lint message in package '{package}'")]
    FatalFinding { package: String },
    #[error("Error lint message in package '{package}'")]
    ErrorFinding { package: String },
    #[error("Insufficient lint score: {score} (package '{package}', minimum {minimum})")]
    InsufficientScore {
        package: String,
        score: f64,
        minimum: f64,
    },
    /// Gradeable status but no `rated at X/10` line in the report.
    #[error("Unparsable lint report for package '{package}': no score found (exit code {code})")]
    UnparsableReport { package: String, code: i32 },
    #[error("Unexpected lint exit status {code} for package '{package}'")]
    UnexpectedStatus { package: String, code: i32 },
    #[error("Code is not black! (package '{package}')")]
    NotFormatted { package: String },
}

impl GateError {
    /// True for errors raised while resolving options, before any tool runs.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            GateError::MissingRcfile(_)
                | GateError::InvalidNumber { .. }
                | GateError::ScoreOutOfRange(_)
                | GateError::ConfigParse { .. }
                | GateError::Io(_)
        )
    }

    /// Process exit code for the host command.
    pub fn exit_code(&self) -> i32 {
        if self.is_configuration() {
            2
        } else {
            1
        }
    }
}
