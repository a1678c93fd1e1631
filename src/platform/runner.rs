//! Subprocess execution for the platform binary.
//!
//! [`CommandRunner`] is the seam between operation wrappers and the OS:
//!   - [`TokioRunner`] spawns the real process (literal argv, never a shell)
//!   - [`RecordingRunner`] records invocations and replies with a canned
//!     [`ProcessOutput`]; it backs `--dry-run` and the tests.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Mutex;

use tokio::process::Command;

use crate::error::{PlatformError, Result};

/// Exit code reported when the process was terminated without one (e.g. by a signal).
pub const NO_EXIT_CODE: i32 = -1;

/// Captured result of one platform invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ProcessOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn new(code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// One recorded (or about to be issued) invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(program: &str, args: &[String], cwd: &Path) -> Self {
        Self {
            program: program.to_string(),
            args: args.to_vec(),
            cwd: cwd.to_path_buf(),
        }
    }

    /// Shell-quoted rendering for logs and dry runs; `-password=` values are masked.
    pub fn command_line(&self) -> String {
        let args = self.args.iter().map(|a| match a.split_once('=') {
            Some((flag, _)) if flag == "-password" => "-password=********".to_string(),
            _ => a.clone(),
        });
        shell_words::join(std::iter::once(self.program.clone()).chain(args))
    }
}

pub trait CommandRunner {
    /// Run `program` with `args` in `cwd`, blocking until it exits.
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<ProcessOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<ProcessOutput> {
        (**self).run(program, args, cwd)
    }
}

/// Spawns the platform binary on a private Tokio runtime and waits for it.
/// Safe to call from synchronous code and from inside an async runtime.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioRunner;

impl TokioRunner {
    pub fn new() -> Self {
        Self
    }

    async fn run_async(program: &str, args: &[String], cwd: &Path) -> std::io::Result<ProcessOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .await?;
        Ok(ProcessOutput {
            code: output.status.code().unwrap_or(NO_EXIT_CODE),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

impl CommandRunner for TokioRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<ProcessOutput> {
        let execution = |source| PlatformError::Execution {
            program: program.to_string(),
            source,
        };
        let work = || -> std::io::Result<ProcessOutput> {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(Self::run_async(program, args, cwd))
        };
        // A runtime cannot be entered from inside another one; hop to a plain thread.
        let result = if tokio::runtime::Handle::try_current().is_ok() {
            std::thread::scope(|s| {
                s.spawn(work).join().unwrap_or_else(|_| {
                    Err(std::io::Error::other("platform runner thread panicked"))
                })
            })
        } else {
            work()
        };
        result.map_err(execution)
    }
}

/// Never spawns anything: records each invocation and returns `reply`.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    reply: ProcessOutput,
    calls: Mutex<Vec<Invocation>>,
}

impl RecordingRunner {
    /// Replies with a zero exit code and empty output.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replying(reply: ProcessOutput) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn last_call(&self) -> Option<Invocation> {
        self.calls().pop()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<ProcessOutput> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(Invocation::new(program, args, cwd));
        }
        Ok(self.reply.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn missing_binary_is_execution_error() {
        let err = TokioRunner::new()
            .run(
                "/nonexistent/mattermost/bin/platform",
                &strings(&["-version"]),
                &std::env::temp_dir(),
            )
            .unwrap_err();
        match err {
            PlatformError::Execution { program, source } => {
                assert_eq!(program, "/nonexistent/mattermost/bin/platform");
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Execution, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn captures_code_and_both_streams() {
        let out = TokioRunner::new()
            .run(
                "sh",
                &strings(&["-c", "echo out; echo err >&2; exit 3"]),
                &std::env::temp_dir(),
            )
            .unwrap();
        assert_eq!(out, ProcessOutput::new(3, "out\n", "err\n"));
        assert!(!out.success());
    }

    #[cfg(unix)]
    #[test]
    fn arguments_are_not_shell_interpreted() {
        let out = TokioRunner::new()
            .run(
                "sh",
                &strings(&["-c", "printf '%s' \"$1\"", "sh", "-team_name=a b; echo $HOME"]),
                &std::env::temp_dir(),
            )
            .unwrap();
        assert_eq!(out.stdout, "-team_name=a b; echo $HOME");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn blocking_run_works_inside_async_caller() {
        let out = TokioRunner::new()
            .run("sh", &strings(&["-c", "echo hi"]), &std::env::temp_dir())
            .unwrap();
        assert_eq!(out, ProcessOutput::new(0, "hi\n", ""));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn spawn_failure_inside_async_caller_is_an_error() {
        let err = TokioRunner::new()
            .run("/nonexistent/mattermost/bin/platform", &[], &std::env::temp_dir())
            .unwrap_err();
        assert!(matches!(err, PlatformError::Execution { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn runs_in_requested_directory() {
        let dir = std::env::temp_dir().canonicalize().unwrap();
        let out = TokioRunner::new().run("pwd", &[], &dir).unwrap();
        assert_eq!(out.stdout.trim_end(), dir.to_string_lossy());
    }

    #[test]
    fn recording_runner_records_and_replies() {
        let runner = RecordingRunner::replying(ProcessOutput::new(1, "", "boom"));
        let out = runner
            .run("/opt/mm/bin/platform", &strings(&["-version"]), Path::new("/opt/mm"))
            .unwrap();
        assert_eq!(out.stderr, "boom");
        let call = runner.last_call().unwrap();
        assert_eq!(call.program, "/opt/mm/bin/platform");
        assert_eq!(call.args, vec!["-version"]);
        assert_eq!(call.cwd, PathBuf::from("/opt/mm"));
    }

    #[test]
    fn command_line_quotes_whitespace() {
        let call = Invocation::new(
            "/opt/mm/bin/platform",
            &strings(&["-create_team", "-team_name=my team"]),
            Path::new("/opt/mm"),
        );
        assert_eq!(
            call.command_line(),
            "/opt/mm/bin/platform -create_team '-team_name=my team'"
        );
    }

    #[test]
    fn command_line_masks_passwords() {
        let call = Invocation::new(
            "platform",
            &strings(&["-reset_password", "-email=a@b.com", "-password=hunter2"]),
            Path::new("/"),
        );
        let line = call.command_line();
        assert!(!line.contains("hunter2"));
        assert!(line.ends_with("'-password=********'"));
    }
}
