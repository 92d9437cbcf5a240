// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

//! Spawns git with a controlled environment, streaming capture, a per-call
//! timeout, and cooperative cancellation.
//!
//! Retry policy belongs to callers: this layer classifies failures and
//! returns, nothing more.

use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

use crate::classify::classify_stderr;
use crate::error::GitError;
use crate::invocation::{GitInvocation, GitOutput};

/// Default per-invocation deadline; batch pushes override it upward.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Executes git invocations. Cheap to clone; each call is an independent
/// unit with no state shared between calls.
#[derive(Debug, Clone)]
pub struct GitExecutor {
    program: std::path::PathBuf,
    default_timeout: Duration,
}

impl Default for GitExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl GitExecutor {
    pub fn new(default_timeout: Duration) -> Self {
        Self {
            program: "git".into(),
            default_timeout,
        }
    }

    /// Substitute the binary, used by tests to run against a stub.
    pub fn with_program(program: impl Into<std::path::PathBuf>, default_timeout: Duration) -> Self {
        Self {
            program: program.into(),
            default_timeout,
        }
    }

    /// Run one invocation to completion.
    ///
    /// Fails with `GitError::Cancelled` without spawning when the token is
    /// already cancelled, `GitError::Timeout` when the deadline passes (the
    /// child is killed), and `GitError::Failed` on non-zero exit with the
    /// stderr classification attached.
    pub async fn run(&self, invocation: GitInvocation) -> Result<GitOutput, GitError> {
        let GitInvocation {
            args,
            cwd,
            stdin,
            cancel,
            timeout,
            observer,
        } = invocation;

        if let Some(token) = &cancel {
            if token.is_cancelled() {
                return Err(GitError::Cancelled { args });
            }
        }

        let span = tracing::info_span!(
            "git",
            args = ?args,
            exit_code = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        );

        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&args);
        if let Some(dir) = &cwd {
            cmd.current_dir(dir);
        }
        apply_prompt_free_env(&mut cmd);

        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });
        cmd.kill_on_drop(true);

        let start = Instant::now();
        let mut child = cmd.spawn().map_err(|source| GitError::Spawn {
            source,
            args: args.clone(),
        })?;
        if let (Some(observer), Some(pid)) = (&observer, child.id()) {
            observer(pid);
        }

        // Drain both pipes and feed stdin as concurrent tasks, all racing
        // the wait below. A child that interleaves reading stdin with
        // writing stdout (cat-file --batch-check) fills the stdout pipe if
        // nothing drains it, stops reading, and would park a sequential
        // stdin write forever, out of reach of the timeout.
        let stdout_task = tokio::spawn(read_to_end(child.stdout.take()));
        let stderr_task = tokio::spawn(read_to_end(child.stderr.take()));
        let stdin_task = tokio::spawn(write_stdin(child.stdin.take(), stdin));

        let deadline = timeout.unwrap_or(self.default_timeout);
        let status = tokio::select! {
            status = child.wait() => match status {
                Ok(status) => status,
                Err(source) => {
                    stdout_task.abort();
                    stderr_task.abort();
                    stdin_task.abort();
                    return Err(GitError::Spawn { source, args });
                }
            },
            _ = cancelled(cancel.as_ref()) => {
                let _ = child.start_kill();
                let _ = child.wait().await;
                stdout_task.abort();
                stderr_task.abort();
                stdin_task.abort();
                return Err(GitError::Cancelled { args });
            }
            _ = tokio::time::sleep(deadline) => {
                let _ = child.start_kill();
                let _ = child.wait().await;
                stdout_task.abort();
                stderr_task.abort();
                stdin_task.abort();
                return Err(GitError::Timeout { timeout: deadline, args });
            }
        };

        let stdout = stdout_task.await.unwrap_or_default();
        let stderr = stderr_task.await.unwrap_or_default();
        let stdin_result = stdin_task.await.unwrap_or(Ok(()));
        let duration = start.elapsed();
        let exit_code = status.code().unwrap_or(-1);

        span.record("exit_code", exit_code);
        span.record("duration_ms", duration.as_millis() as u64);

        if status.success() {
            // A child may exit without consuming its stdin; only a
            // non-EPIPE write failure on an otherwise clean run is an error.
            if let Err(source) = stdin_result {
                if source.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(GitError::Stdin { source, args });
                }
            }
            Ok(GitOutput {
                exit_code,
                stdout,
                stderr,
                duration,
            })
        } else {
            let kind = classify_stderr(&stderr);
            tracing::debug!(exit_code, ?kind, "git invocation failed");
            Err(GitError::Failed {
                exit_code,
                stdout,
                stderr,
                kind,
                args,
            })
        }
    }

    /// Convenience wrapper: run and return trimmed stdout.
    pub async fn run_stdout(&self, invocation: GitInvocation) -> Result<String, GitError> {
        let output = self.run(invocation).await?;
        Ok(output.stdout_trimmed().to_string())
    }
}

/// git must never stall on an interactive credential or host prompt; a
/// hung remote has to fail via the timeout instead.
fn apply_prompt_free_env(cmd: &mut tokio::process::Command) {
    cmd.env("GIT_TERMINAL_PROMPT", "0");
    cmd.env("GIT_ASKPASS", "echo");
    cmd.env("SSH_ASKPASS", "");
    // Stable, parseable output regardless of host locale.
    cmd.env("LC_ALL", "C");
    let ssh = std::env::var("GIT_SSH_COMMAND").unwrap_or_else(|_| "ssh".to_string());
    cmd.env("GIT_SSH_COMMAND", format!("{ssh} -oBatchMode=yes"));
}

async fn cancelled(token: Option<&CancellationToken>) {
    match token {
        Some(token) => token.cancelled().await,
        None => std::future::pending().await,
    }
}

/// Write the payload and close the pipe to signal EOF.
async fn write_stdin(
    pipe: Option<tokio::process::ChildStdin>,
    payload: Option<Vec<u8>>,
) -> std::io::Result<()> {
    let (Some(mut pipe), Some(payload)) = (pipe, payload) else {
        return Ok(());
    };
    pipe.write_all(&payload).await?;
    pipe.shutdown().await
}

async fn read_to_end(pipe: Option<impl tokio::io::AsyncRead + Unpin>) -> String {
    let mut buf = Vec::new();
    if let Some(mut reader) = pipe {
        let _ = reader.read_to_end(&mut buf).await;
    }
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
