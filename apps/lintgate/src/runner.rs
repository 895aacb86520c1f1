//! Subprocess boundary for the external lint/format tools.
//!
//! Commands never spawn processes directly; they hand a `ToolCommand` to a
//! `ToolRunner`. `ProcessRunner` is the real implementation. Tests substitute
//! a scripted runner so the interpreter can be driven deterministically.

use crate::error::GateError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// One external tool invocation: program plus arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Working directory for the child; inherits ours when `None`.
    pub cwd: Option<PathBuf>,
}

impl ToolCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        ToolCommand {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, a: impl Into<String>) -> Self {
        self.args.push(a.into());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn argv(&self) -> Vec<String> {
        let mut v = vec![self.program.to_string_lossy().to_string()];
        v.extend(self.args.iter().cloned());
        v
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quoted: Vec<String> = self.argv().iter().map(|a| format!("'{}'", a)).collect();
        write!(f, "[{}]", quoted.join(", "))
    }
}

/// Captured result of one tool run. Transient; dropped after interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub exit_code: i32,
    pub output: String,
}

impl Invocation {
    pub fn new(exit_code: i32, output: impl Into<String>) -> Self {
        Invocation {
            exit_code,
            output: output.into(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs a tool to completion and returns its exit code and textual output.
pub trait ToolRunner {
    fn run(&mut self, cmd: &ToolCommand) -> Result<Invocation, GateError>;
}

/// Spawns real child processes and blocks until they exit. No timeout.
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&mut self, cmd: &ToolCommand) -> Result<Invocation, GateError> {
        let mut command = Command::new(&cmd.program);
        command
            .args(&cmd.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = cmd.cwd.as_ref() {
            command.current_dir(dir);
        }
        let out = command.output().map_err(|source| GateError::Spawn {
            program: cmd.program.to_string_lossy().to_string(),
            source,
        })?;
        let exit_code = out.status.code().ok_or_else(|| GateError::Terminated {
            program: cmd.program.to_string_lossy().to_string(),
        })?;
        let mut output = decode_latin1(&out.stdout);
        if !out.stderr.is_empty() {
            if !output.is_empty() && !output.ends_with('\n') {
                output.push('\n');
            }
            output.push_str(&decode_latin1(&out.stderr));
        }
        debug!(exit_code, bytes = out.stdout.len() + out.stderr.len(), "tool exited");
        Ok(Invocation { exit_code, output })
    }
}

/// Latin-1 decoding: every byte becomes the code point of the same value,
/// so no tool output can fail to decode.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Locates the pylint/black executables.
///
/// Resolution order: explicit path, then the active virtualenv's script
/// directory, then the bare tool name looked up on `PATH` by the OS.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutableResolver {
    pub explicit: Option<PathBuf>,
    pub venv_bin: Option<PathBuf>,
}

impl ExecutableResolver {
    pub fn new(explicit: Option<PathBuf>, venv_bin: Option<PathBuf>) -> Self {
        ExecutableResolver { explicit, venv_bin }
    }

    /// Build from the explicit override and the `VIRTUAL_ENV` variable.
    pub fn from_env(explicit: Option<PathBuf>) -> Self {
        let venv_bin = std::env::var_os("VIRTUAL_ENV").map(|v| venv_scripts_dir(Path::new(&v)));
        ExecutableResolver::new(explicit, venv_bin)
    }

    pub fn resolve(&self, tool: &str) -> PathBuf {
        if let Some(p) = self.explicit.as_ref() {
            return p.clone();
        }
        if let Some(bin) = self.venv_bin.as_ref() {
            let candidate = bin.join(tool);
            if candidate.exists() {
                return candidate;
            }
        }
        PathBuf::from(tool)
    }
}

fn venv_scripts_dir(venv: &Path) -> PathBuf {
    if cfg!(windows) {
        venv.join("Scripts")
    } else {
        venv.join("bin")
    }
}
