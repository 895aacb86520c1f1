//! Report models shared by the gates and the output printers.

use crate::severity::Severity;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Outcome of one package's tool run.
pub enum PackageStatus {
    /// Exit code zero.
    Clean,
    /// Gradeable findings with a score at or above the minimum.
    Passed,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
/// Per-package record for printers.
pub struct PackageReport {
    pub package: String,
    pub exit_code: i32,
    pub severities: Vec<Severity>,
    pub score: Option<f64>,
    pub status: PackageStatus,
}

#[derive(Debug, Clone, Serialize)]
/// Result of one gate run across the package set.
///
/// `packages` only lists packages that were actually run; a failure stops
/// the run, so later packages never appear.
pub struct RunReport {
    pub command: String,
    pub packages: Vec<PackageReport>,
    pub passed: bool,
    pub error: Option<String>,
}

impl RunReport {
    pub fn new(command: &str) -> Self {
        RunReport {
            command: command.to_string(),
            packages: Vec::new(),
            passed: true,
            error: None,
        }
    }

    pub fn fail(&mut self, message: String) {
        self.passed = false;
        self.error = Some(message);
    }
}
