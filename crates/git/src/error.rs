// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

//! Executor error type carrying classification and captured output.

use std::time::Duration;

use heave_core::GitErrorKind;

/// Failure of one git invocation.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    /// The git binary could not be spawned at all.
    #[error("failed to spawn git {}: {source}", args.join(" "))]
    Spawn {
        source: std::io::Error,
        args: Vec<String>,
    },

    /// The child spawned but its stdin pipe could not be written.
    #[error("failed to write git {} stdin: {source}", args.join(" "))]
    Stdin {
        source: std::io::Error,
        args: Vec<String>,
    },

    /// git exited non-zero. `kind` is the first match from the ordered
    /// classification table, or `None` for an unrecognized failure whose
    /// stderr must be surfaced verbatim.
    #[error("git {} exited with code {exit_code}: {}", args.join(" "), stderr.trim())]
    Failed {
        exit_code: i32,
        stdout: String,
        stderr: String,
        kind: Option<GitErrorKind>,
        args: Vec<String>,
    },

    /// The invocation exceeded its deadline and the child was killed.
    #[error("git {} timed out after {timeout:?}", args.join(" "))]
    Timeout {
        timeout: Duration,
        args: Vec<String>,
    },

    /// The caller's cancellation token fired; the child (if any) was killed.
    #[error("git {} cancelled", args.join(" "))]
    Cancelled { args: Vec<String> },
}

impl GitError {
    /// Classified failure kind, when one applies.
    pub fn kind(&self) -> Option<GitErrorKind> {
        match self {
            GitError::Spawn { source, .. } => {
                if source.kind() == std::io::ErrorKind::NotFound {
                    Some(GitErrorKind::ToolNotFound)
                } else {
                    None
                }
            }
            GitError::Stdin { .. } => None,
            GitError::Failed { kind, .. } => *kind,
            GitError::Timeout { .. } => Some(GitErrorKind::Timeout),
            GitError::Cancelled { .. } => Some(GitErrorKind::Cancelled),
        }
    }

    /// Raw stderr, when the process ran far enough to produce any.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            GitError::Failed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }

    pub fn args(&self) -> &[String] {
        match self {
            GitError::Spawn { args, .. }
            | GitError::Stdin { args, .. }
            | GitError::Failed { args, .. }
            | GitError::Timeout { args, .. }
            | GitError::Cancelled { args } => args,
        }
    }
}
