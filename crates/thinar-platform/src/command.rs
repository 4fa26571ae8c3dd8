use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command as StdCommand, ExitStatus, Output};

/// Builder over [`std::process::Command`] that turns non-zero exits into errors.
#[derive(Debug)]
pub struct Command {
    inner: StdCommand,
    program: String,
}

impl Command {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        let program = program.as_ref();
        Self {
            inner: StdCommand::new(program),
            program: program.to_string_lossy().into_owned(),
        }
    }

    /// Like [`Command::new`], but routed through `cmd /c` on Windows hosts so
    /// that batch-file wrappers (`gclient.bat`, `gn.bat`) resolve.
    pub fn for_host(program: impl AsRef<OsStr>) -> Self {
        if cfg!(target_os = "windows") {
            Self::new("cmd").arg("/c").arg(program)
        } else {
            Self::new(program)
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.inner.arg(arg);
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.inner.args(args);
        self
    }

    pub fn env<K, V>(mut self, key: K, val: V) -> Self
    where
        K: AsRef<OsStr>,
        V: AsRef<OsStr>,
    {
        self.inner.env(key, val);
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.inner.current_dir(dir);
        self
    }

    /// Full command line, for logs and error messages.
    pub fn line(&self) -> String {
        std::iter::once(self.inner.get_program())
            .chain(self.inner.get_args())
            .map(|s| s.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn output(&mut self) -> Result<Output> {
        tracing::debug!(cmd = %self.line(), "spawning");
        self.inner.output().map_err(|e| Error::CommandFailed {
            cmd: self.program.clone(),
            source: e,
        })
    }

    /// Runs with inherited stdio and fails on a non-zero exit.
    pub fn run(mut self) -> Result<()> {
        let line = self.line();
        tracing::debug!(cmd = %line, "running");
        let status = self.inner.status().map_err(|e| Error::CommandFailed {
            cmd: self.program.clone(),
            source: e,
        })?;
        check_status(line, status, String::new())
    }

    /// Captures stdout/stderr and fails on a non-zero exit.
    pub fn checked_output(mut self) -> Result<Output> {
        let output = self.output()?;
        check_status(
            self.line(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        )?;
        Ok(output)
    }

    pub fn stdout_text(self) -> Result<String> {
        let line = self.line();
        let output = self.checked_output()?;
        String::from_utf8(output.stdout).map_err(|_| Error::NonUtf8Output { cmd: line })
    }
}

fn check_status(cmd: String, status: ExitStatus, stderr: String) -> Result<()> {
    if status.success() {
        Ok(())
    } else {
        Err(Error::Status {
            cmd,
            code: status.code(),
            stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_new() {
        let cmd = Command::new("echo");
        assert_eq!(cmd.program, "echo");
    }

    #[test]
    fn test_command_args() {
        let cmd = Command::new("ar").arg("t").arg("libfoo.a");
        let args: Vec<_> = cmd.inner.get_args().collect();
        assert_eq!(args, ["t", "libfoo.a"]);
    }

    #[test]
    fn test_command_args_iter() {
        let cmd = Command::new("ar").args(["xN", "--output", "obj"]);
        assert_eq!(cmd.inner.get_args().count(), 3);
    }

    #[test]
    fn test_command_line_joins_program_and_args() {
        let cmd = Command::new("ninja").args(["-v", "-C", "out"]);
        assert_eq!(cmd.line(), "ninja -v -C out");
    }

    #[test]
    fn test_command_env() {
        let cmd = Command::new("gclient").env("PATH", "/depot_tools");
        assert_eq!(cmd.inner.get_envs().count(), 1);
    }

    #[test]
    fn test_command_current_dir() {
        let cmd = Command::new("gn").current_dir("/src/v8");
        assert_eq!(cmd.inner.get_current_dir(), Some(Path::new("/src/v8")));
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_for_host_is_direct_on_unix() {
        let cmd = Command::for_host("gclient");
        assert_eq!(cmd.line(), "gclient");
    }

    #[cfg(target_os = "windows")]
    #[test]
    fn test_for_host_wraps_cmd_on_windows() {
        let cmd = Command::for_host("gclient");
        assert_eq!(cmd.line(), "cmd /c gclient");
    }

    #[cfg(unix)]
    #[test]
    fn test_stdout_text_success() {
        let out = Command::new("sh").args(["-c", "printf 'a.o\\nb.o\\n'"]).stdout_text();
        assert_eq!(out.unwrap(), "a.o\nb.o\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_checked_output_reports_status_and_stderr() {
        let err = Command::new("sh")
            .args(["-c", "echo boom >&2; exit 3"])
            .checked_output()
            .unwrap_err();
        match err {
            Error::Status { code, stderr, .. } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_run_nonzero_is_error() {
        let result = Command::new("sh").args(["-c", "exit 1"]).run();
        assert!(matches!(result, Err(Error::Status { code: Some(1), .. })));
    }

    #[test]
    fn test_spawn_missing_binary() {
        let result = Command::new("thinar_nonexistent_binary_12345").run();
        assert!(matches!(result, Err(Error::CommandFailed { .. })));
    }
}
