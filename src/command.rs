//! Collaborator commands (type checker, formatter, linters...).
//! They are black boxes: a command either exits zero or fails the run.

use crate::error::{Error, Result};
use log::{debug, info};
use serde::Deserialize;
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ExternalCommand {
    /// Label used in logs and errors, defaults to the program name
    #[serde(default)]
    pub name: Option<String>,
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ExternalCommand {
    pub fn new<S: Into<String>>(program: S, args: &[&str]) -> Self {
        Self {
            name: None,
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.program)
    }

    /// Runs the command from `working_dir` with inherited stdio.
    pub fn run<P: AsRef<Path>>(&self, working_dir: P) -> Result<()> {
        self.run_with::<_, &OsStr>(working_dir, &[])
    }

    /// Runs the command with `extra` appended to the configured arguments.
    ///
    /// # Errors
    /// * `Error::IoError` if the program cannot be spawned
    /// * `Error::CommandFailed` if it exits non-zero
    pub fn run_with<P, S>(&self, working_dir: P, extra: &[S]) -> Result<()>
    where
        P: AsRef<Path>,
        S: AsRef<OsStr>,
    {
        let working_dir = working_dir.as_ref();
        info!("Running {}", self.display_name());
        debug!("{} {:?} in {}", self.program, self.args, working_dir.display());

        let status = Command::new(&self.program)
            .args(&self.args)
            .args(extra)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Error::io(&self.program, e))?;

        if !status.success() {
            return Err(Error::CommandFailed {
                name: self.display_name().to_string(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn zero_exit_succeeds() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(ExternalCommand::new("true", &[]).run(dir.path()).is_ok());
    }

    #[test]
    fn non_zero_exit_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let cmd = ExternalCommand {
            name: Some("lint".to_string()),
            ..ExternalCommand::new("false", &[])
        };
        match cmd.run(dir.path()) {
            Err(Error::CommandFailed { name, .. }) => assert_eq!(name, "lint"),
            other => panic!("Expected CommandFailed, got {other:?}"),
        }
    }

    #[test]
    fn missing_program_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let cmd = ExternalCommand::new("reposync-no-such-program", &[]);
        assert!(matches!(cmd.run(dir.path()), Err(Error::IoError { .. })));
    }

    #[test]
    fn extra_arguments_are_appended() {
        let dir = tempfile::TempDir::new().unwrap();
        let cmd = ExternalCommand::new("sh", &["-c", "test \"$0\" = README.md"]);
        assert!(cmd.run_with(dir.path(), &["README.md"]).is_ok());
        assert!(cmd.run_with(dir.path(), &["other.md"]).is_err());
    }
}
