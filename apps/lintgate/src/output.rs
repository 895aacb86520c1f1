//! Output rendering for the lint and black gates.
//!
//! Supports `human` (default) and `json` outputs. Tool output itself goes to
//! the build log through `tracing`; this module prints only the per-package
//! verdicts and a summary.

use crate::models::{PackageReport, PackageStatus, RunReport};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// Print a gate report in the requested format.
pub fn print_report(report: &RunReport, output: &str) {
    match output {
        "json" => match serde_json::to_string_pretty(&compose_report_json(report)) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("{} {}", crate::utils::error_prefix(), e),
        },
        _ => {
            let color = use_colors(output);
            for p in &report.packages {
                println!("{}", human_line(p, color));
            }
            let verdict = if report.passed { "passed" } else { "failed" };
            let summary = format!(
                "— {} {} — packages={}",
                report.command,
                verdict,
                report.packages.len()
            );
            if !color {
                println!("{}", summary);
            } else if report.passed {
                println!("{}", summary.green().bold());
            } else {
                println!("{}", summary.red().bold());
            }
        }
    }
}

fn human_line(p: &PackageReport, color: bool) -> String {
    let (icon, label) = match p.status {
        PackageStatus::Clean => ("✔", "clean"),
        PackageStatus::Passed => ("▲", "passed"),
        PackageStatus::Failed => ("✖", "failed"),
    };
    let icon = if !color {
        icon.to_string()
    } else {
        match p.status {
            PackageStatus::Clean => icon.green().to_string(),
            PackageStatus::Passed => icon.yellow().to_string(),
            PackageStatus::Failed => icon.red().to_string(),
        }
    };
    let package = if color {
        p.package.clone().bold().to_string()
    } else {
        p.package.clone()
    };
    let mut line = format!("{} {} {} (exit {})", icon, package, label, p.exit_code);
    if let Some(score) = p.score {
        line.push_str(&format!(" score={:.2}/10", score));
    }
    if !p.severities.is_empty() {
        let names: Vec<&str> = p.severities.iter().map(|s| s.name()).collect();
        line.push_str(&format!(" [{}]", names.join(", ")));
    }
    line
}

/// Compose the report JSON object (pure) for testing/snapshot purposes.
pub fn compose_report_json(report: &RunReport) -> JsonVal {
    let summary = json!({
        "passed": report.passed,
        "packages": report.packages.len(),
        "clean": report.packages.iter().filter(|p| p.status == PackageStatus::Clean).count(),
        "failed": report.packages.iter().filter(|p| p.status == PackageStatus::Failed).count(),
    });
    json!({
        "command": report.command,
        "results": report.packages,
        "error": report.error,
        "summary": summary,
    })
}
