//! # Process Supervisor
//!
//! Runs the scanner as a child process and is the only place that waits on it.
//!
//! The wait races three events: the child exiting, the caller's
//! [`CancellationToken`] firing, and the optional time limit expiring. Losing
//! to either of the last two kills the child (`SIGKILL`, so a scanner that
//! ignores `SIGTERM` is still stopped) and reaps it before returning.
//!
//! stdout and stderr are drained on their own tasks while the child runs, so a
//! verbose scanner can never stall on a full pipe.

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};
use vision_common::error::ScanError;

/// Upper bound on reaping a child that was just sent `SIGKILL`.
const REAP_TIMEOUT: Duration = Duration::from_secs(5);
/// Upper bound on collecting output once the child has exited. Grandchildren
/// can keep a pipe open after the scanner itself is gone.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Classified end of one scanner run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitOutcome {
    Success,
    Failure { code: Option<i32>, stderr: String },
    Cancelled,
    TimedOut(Duration),
}

#[derive(Debug, Clone)]
pub struct ProcessSupervisor {
    program: PathBuf,
    time_limit: Option<Duration>,
}

impl ProcessSupervisor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            time_limit: None,
        }
    }

    pub fn with_time_limit(mut self, time_limit: Option<Duration>) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// Runs the scanner with `args` until it exits or `cancel` fires.
    ///
    /// A token that is already cancelled returns [`ExitOutcome::Cancelled`]
    /// without starting anything.
    pub async fn run(
        &self,
        args: &[OsString],
        cancel: &CancellationToken,
    ) -> Result<ExitOutcome, ScanError> {
        if cancel.is_cancelled() {
            debug!("scan cancelled before the scanner was started");
            return Ok(ExitOutcome::Cancelled);
        }

        let mut handle = self.spawn(args)?;

        let wake = tokio::select! {
            biased;
            _ = cancel.cancelled() => Wake::Cancelled,
            limit = deadline(self.time_limit) => Wake::Expired(limit),
            status = handle.child.wait() => Wake::Exited(status),
        };

        match wake {
            Wake::Cancelled => {
                info!(pid = ?handle.pid, "cancelling scanner");
                handle.terminate().await;
                Ok(ExitOutcome::Cancelled)
            }
            Wake::Expired(limit) => {
                warn!(pid = ?handle.pid, limit = %humantime::format_duration(limit), "scanner exceeded its time limit");
                handle.terminate().await;
                Ok(ExitOutcome::TimedOut(limit))
            }
            Wake::Exited(status) => {
                let status = status.map_err(ScanError::Supervision)?;
                Ok(handle.classify(status).await)
            }
        }
    }

    fn spawn(&self, args: &[OsString]) -> Result<ScanHandle, ScanError> {
        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ScanError::Launch {
                program: self.program.display().to_string(),
                source,
            })?;

        let pid = child.id();
        info!(?pid, program = %self.program.display(), "scanner started");
        trace!(?args, "scanner arguments");

        let stdout = child.stdout.take().map(|pipe| tokio::spawn(drain(pipe)));
        let stderr = child.stderr.take().map(|pipe| tokio::spawn(drain(pipe)));

        Ok(ScanHandle {
            child,
            pid,
            stdout,
            stderr,
        })
    }
}

enum Wake {
    Cancelled,
    Expired(Duration),
    Exited(io::Result<ExitStatus>),
}

/// One in-flight scanner process, owned by the supervisor for a single run.
struct ScanHandle {
    child: Child,
    pid: Option<u32>,
    stdout: Option<JoinHandle<String>>,
    stderr: Option<JoinHandle<String>>,
}

impl ScanHandle {
    /// Kills and reaps the child. Never fails: a child that exited on its own
    /// in the meantime is simply reaped.
    async fn terminate(mut self) {
        // The child is not reaped yet, so the kill targets our process even if it just exited.
        if let Err(err) = self.child.start_kill() {
            debug!(pid = ?self.pid, error = %err, "kill was not delivered");
        }

        match timeout(REAP_TIMEOUT, self.child.wait()).await {
            Ok(Ok(status)) => debug!(pid = ?self.pid, %status, "scanner reaped"),
            Ok(Err(err)) => warn!(pid = ?self.pid, error = %err, "failed to reap scanner"),
            Err(_) => warn!(pid = ?self.pid, "scanner did not exit after kill"),
        }

        for reader in [self.stdout.take(), self.stderr.take()].into_iter().flatten() {
            reader.abort();
        }
    }

    async fn classify(mut self, status: ExitStatus) -> ExitOutcome {
        let stdout = collect(self.stdout.take()).await;
        let stderr = collect(self.stderr.take()).await;
        debug!(pid = ?self.pid, %status, stdout_bytes = stdout.len(), "scanner exited");
        trace!(pid = ?self.pid, stdout = %stdout.trim_end(), "scanner output");

        if status.success() {
            return ExitOutcome::Success;
        }

        warn!(pid = ?self.pid, %status, "scanner failed");
        ExitOutcome::Failure {
            code: status.code(),
            stderr: stderr.trim().to_owned(),
        }
    }
}

async fn deadline(limit: Option<Duration>) -> Duration {
    match limit {
        Some(limit) => {
            tokio::time::sleep(limit).await;
            limit
        }
        None => std::future::pending().await,
    }
}

async fn drain<R: AsyncRead + Unpin>(mut pipe: R) -> String {
    let mut buf = Vec::new();
    if let Err(err) = pipe.read_to_end(&mut buf).await {
        debug!(error = %err, "failed to read scanner output");
    }
    String::from_utf8_lossy(&buf).into_owned()
}

async fn collect(reader: Option<JoinHandle<String>>) -> String {
    let Some(mut reader) = reader else {
        return String::new();
    };

    match timeout(DRAIN_TIMEOUT, &mut reader).await {
        Ok(Ok(output)) => output,
        Ok(Err(err)) => {
            warn!(error = %err, "scanner output reader failed");
            String::new()
        }
        Err(_) => {
            reader.abort();
            warn!("scanner output still open after exit, giving up on it");
            String::new()
        }
    }
}
