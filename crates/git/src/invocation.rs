// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

//! Immutable request/response types for one git invocation.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Callback invoked with the child's pid right after a successful spawn.
pub type SpawnObserver = Arc<dyn Fn(u32) + Send + Sync>;

/// One git invocation: argument vector, working directory, optional stdin
/// payload, optional cancellation token, optional timeout override,
/// optional spawn observer. Owned transiently by the executor for the
/// duration of one call.
#[derive(Default, Clone)]
pub struct GitInvocation {
    pub(crate) args: Vec<String>,
    pub(crate) cwd: Option<PathBuf>,
    pub(crate) stdin: Option<Vec<u8>>,
    pub(crate) cancel: Option<CancellationToken>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) observer: Option<SpawnObserver>,
}

impl std::fmt::Debug for GitInvocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitInvocation")
            .field("args", &self.args)
            .field("cwd", &self.cwd)
            .field("stdin", &self.stdin.as_ref().map(|p| p.len()))
            .field("timeout", &self.timeout)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl GitInvocation {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn stdin(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(payload.into());
        self
    }

    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Observe the child's pid once it has been spawned, e.g. for callers
    /// that surface running subprocesses.
    pub fn spawn_observer(mut self, observer: SpawnObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Output of a completed git invocation. Produced exactly once per call;
/// immutable after creation.
#[derive(Debug, Clone)]
pub struct GitOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

impl GitOutput {
    /// Trimmed stdout, the common case for single-value queries.
    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.trim()
    }
}
