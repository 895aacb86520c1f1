//! Lintgate core library.
//!
//! This crate exposes programmatic APIs for gating a Python project's build
//! on pylint and black results.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `options`: Validation of option values before any tool runs.
//! - `packages`: Top-level package discovery.
//! - `runner`: Subprocess boundary and executable resolution.
//! - `severity`: Pylint exit status bit table.
//! - `lint`: Pylint result interpretation and the lint gate.
//! - `format`: Black check gate.
//! - `commands`: Verb wiring used by the binary.
//! - `models`: Report structs.
//! - `output`: Human/JSON printers.
//! - `utils`: Supporting helpers.
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod lint;
pub mod models;
pub mod options;
pub mod output;
pub mod packages;
pub mod runner;
pub mod severity;
pub mod utils;

pub use error::GateError;
