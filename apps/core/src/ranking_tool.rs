//! Client for the external directory-ranking tool (zoxide).
//!
//! Every call spawns the tool once, waits for it, and captures both output
//! streams. Calls are never retried.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::PluginError;

/// Executable name used when no tool path is configured.
#[cfg(windows)]
pub const DEFAULT_TOOL_NAME: &str = "zoxide.exe";
#[cfg(not(windows))]
pub const DEFAULT_TOOL_NAME: &str = "zoxide";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPath(PathBuf);

impl ToolPath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

/// Resolves the configured tool against the filesystem first, then the
/// executable search path.
pub fn resolve_tool_path(configured: &str) -> Result<ToolPath, PluginError> {
    let trimmed = configured.trim();
    let not_found = || PluginError::ToolNotFound {
        path: trimmed.to_string(),
    };
    if trimmed.is_empty() {
        return Err(not_found());
    }

    let candidate = Path::new(trimmed);
    if candidate.is_file() {
        return Ok(ToolPath(candidate.to_path_buf()));
    }

    match which::which(trimmed) {
        Ok(found) => Ok(ToolPath(found)),
        Err(error) => {
            tracing::debug!(tool = trimmed, %error, "ranking tool not on search path");
            Err(not_found())
        }
    }
}

/// One subprocess call against the ranking tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolInvocation {
    Query { terms: Vec<String> },
    Add { path: String },
    Remove { path: String },
}

impl ToolInvocation {
    /// Splits on runs of whitespace so each word becomes its own match term.
    pub fn query(text: &str) -> Self {
        Self::Query {
            terms: text.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn add(path: &str) -> Self {
        Self::Add {
            path: path.trim().to_string(),
        }
    }

    pub fn remove(path: &str) -> Self {
        Self::Remove {
            path: path.trim().to_string(),
        }
    }

    pub fn args(&self) -> Vec<String> {
        match self {
            Self::Query { terms } => ["query", "--list", "--score"]
                .into_iter()
                .map(str::to_string)
                .chain(terms.iter().cloned())
                .collect(),
            Self::Add { path } => vec!["add".to_string(), path.clone()],
            Self::Remove { path } => vec!["remove".to_string(), path.clone()],
        }
    }
}

/// Captured outcome of one finished tool process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

pub trait ToolRunner {
    fn run(&self, program: &Path, args: &[String]) -> std::io::Result<ToolOutput>;
}

/// Runs the tool as a real child process with the inherited environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&self, program: &Path, args: &[String]) -> std::io::Result<ToolOutput> {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        suppress_console_window(&mut command);

        let output = command.output()?;
        Ok(ToolOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(windows)]
fn suppress_console_window(command: &mut Command) {
    use std::os::windows::process::CommandExt;
    use windows_sys::Win32::System::Threading::CREATE_NO_WINDOW;

    command.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn suppress_console_window(_command: &mut Command) {}

pub struct RankingToolClient {
    tool: ToolPath,
    runner: Box<dyn ToolRunner>,
}

impl RankingToolClient {
    pub fn new(tool: ToolPath) -> Self {
        Self::with_runner(tool, Box::new(ProcessRunner))
    }

    pub fn with_runner(tool: ToolPath, runner: Box<dyn ToolRunner>) -> Self {
        Self { tool, runner }
    }

    /// Returns the raw `query --list --score` stdout.
    pub fn query(&self, text: &str) -> Result<String, PluginError> {
        let output = self.execute(&ToolInvocation::query(text))?;
        if !output.success() {
            return Err(PluginError::Query {
                query: text.to_string(),
                message: output.stderr.trim().to_string(),
            });
        }
        Ok(output.stdout)
    }

    pub fn add(&self, path: &str) -> Result<(), PluginError> {
        let output = self.execute(&ToolInvocation::add(path))?;
        if !output.success() {
            return Err(PluginError::Add {
                path: path.to_string(),
                message: output.stderr.trim().to_string(),
            });
        }
        Ok(())
    }

    pub fn remove(&self, path: &str) -> Result<(), PluginError> {
        let output = self.execute(&ToolInvocation::remove(path))?;
        if !output.success() {
            return Err(PluginError::Remove {
                path: path.to_string(),
                message: output.stderr.trim().to_string(),
            });
        }
        Ok(())
    }

    fn execute(&self, invocation: &ToolInvocation) -> Result<ToolOutput, PluginError> {
        let program = self.tool.as_path();
        let args = invocation.args();
        tracing::debug!(program = %program.display(), ?args, "running ranking tool");

        let output = self
            .runner
            .run(program, &args)
            .map_err(|source| PluginError::Spawn {
                program: program.display().to_string(),
                source,
            })?;

        if !output.success() {
            tracing::warn!(
                code = ?output.code,
                stderr = output.stderr.trim(),
                ?args,
                "ranking tool exited with failure"
            );
        }
        Ok(output)
    }
}
