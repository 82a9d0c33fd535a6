//! Thin builder around [`std::process::Command`] for running host tools.
//!
//! Every external invocation in this crate (the packaging command, `tar`
//! for archive inspection) goes through [`Cmd`], so failures carry the same
//! shape of error: the command line, the exit status and whatever the tool
//! printed.

use anyhow::{bail, Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// Captured result of a finished command.
#[derive(Debug)]
pub struct CommandResult {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Command builder.
///
/// # Example
///
/// ```rust,ignore
/// use orion_utils::process::Cmd;
///
/// let result = Cmd::new("tar")
///     .args(["-tzf"])
///     .arg_path(archive)
///     .error_msg("tar failed to list archive")
///     .run()?;
/// ```
#[derive(Debug)]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    dir: Option<PathBuf>,
    error_msg: Option<String>,
    allow_fail: bool,
}

impl Cmd {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            dir: None,
            error_msg: None,
            allow_fail: false,
        }
    }

    /// Run `script` through `sh -c`.
    pub fn shell(script: &str) -> Self {
        Self::new("sh").args(["-c", script])
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn arg_path(mut self, path: &Path) -> Self {
        self.args.push(path.as_os_str().to_owned());
        self
    }

    /// Working directory for the child process.
    pub fn dir(mut self, dir: &Path) -> Self {
        self.dir = Some(dir.to_path_buf());
        self
    }

    /// Message prefixed to the error when the command exits non-zero.
    pub fn error_msg(mut self, msg: impl Into<String>) -> Self {
        self.error_msg = Some(msg.into());
        self
    }

    /// Return the result even when the command exits non-zero.
    pub fn allow_fail(mut self) -> Self {
        self.allow_fail = true;
        self
    }

    fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|part| part.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run to completion, buffering stdout and stderr.
    pub fn run(self) -> Result<CommandResult> {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.dir {
            command.current_dir(dir);
        }

        let output = command
            .output()
            .with_context(|| format!("Failed to execute: {}", self.display()))?;

        let result = CommandResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !self.allow_fail && !result.success() {
            let msg = self
                .error_msg
                .clone()
                .unwrap_or_else(|| format!("{} failed", self.display()));
            bail!(
                "{} ({})\n{}\n{}",
                msg,
                result.status,
                result.stdout.trim(),
                result.stderr.trim()
            );
        }

        Ok(result)
    }
}
