use super::command::CommandLine;
use std::{fmt, future::Future, process::Stdio, time::Duration};
use tokio::{process::Command, time};

/// Result of one completed invocation. Output streams are decoded
/// permissively, invalid bytes are replaced instead of failing the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub exit_succeeded: bool,
    pub stdout: String,
    pub stderr: String,
}

/// The process could not be started or did not finish in time.
#[derive(Debug)]
pub enum InvokeError {
    /// Spawning or awaiting the program failed at the OS level.
    Spawn {
        program: String,
        source: std::io::Error,
    },
    /// The program did not exit within the configured bound.
    TimedOut { program: String, timeout: Duration },
}

impl fmt::Display for InvokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn { program, source } => {
                write!(f, "failed to run {program}: {source}")
            }
            Self::TimedOut { program, timeout } => {
                write!(f, "{program} timed out after {}s", timeout.as_secs())
            }
        }
    }
}

impl std::error::Error for InvokeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
            Self::TimedOut { .. } => None,
        }
    }
}

/// Anything that can run a command line and capture its text streams.
/// The production implementation spawns a real process; tests substitute
/// a stub to keep the orchestration logic deterministic.
pub trait Invoker: Send + Sync {
    /// Run `command` to completion, waiting at most `timeout`.
    fn run(
        &self,
        command: &CommandLine,
        timeout: Duration,
    ) -> impl Future<Output = Result<ExecutionOutcome, InvokeError>> + Send;
}

/// Invoker backed by `tokio::process`. The program receives its
/// arguments as literal tokens, no shell is involved at any point.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessInvoker;

impl Invoker for ProcessInvoker {
    async fn run(
        &self,
        command: &CommandLine,
        timeout: Duration,
    ) -> Result<ExecutionOutcome, InvokeError> {
        let mut cmd = Command::new(command.program());
        cmd.args(command.args())
            .stdin(Stdio::null())
            // On timeout the output future is dropped, which kills the
            // child rather than leaving it running unattended.
            .kill_on_drop(true);

        match time::timeout(timeout, cmd.output()).await {
            Ok(Ok(output)) => Ok(ExecutionOutcome {
                exit_succeeded: output.status.success(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }),
            Ok(Err(source)) => Err(InvokeError::Spawn {
                program: command.program().to_string(),
                source,
            }),
            Err(_) => Err(InvokeError::TimedOut {
                program: command.program().to_string(),
                timeout,
            }),
        }
    }
}
