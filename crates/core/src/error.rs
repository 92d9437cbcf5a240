// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

//! Closed taxonomy of git failure modes.
//!
//! The executor derives one of these from stderr via an ordered rule table
//! (heave-git). An unrecognized failure carries no kind at all and must be
//! surfaced verbatim, never guessed.

use serde::{Deserialize, Serialize};

/// Classification of a failed git invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GitErrorKind {
    /// The git binary itself was not found.
    ToolNotFound,
    /// Credential rejection or missing credentials.
    AuthenticationFailed,
    /// No remote is configured for this repository/branch.
    NoRemote,
    /// The path is not inside a git work tree.
    NotARepository,
    /// index.lock (or similar) held by another process.
    RepositoryLocked,
    /// Unmerged paths / conflict state blocks the operation.
    UnmergedChanges,
    /// Uncommitted changes block the operation.
    DirtyWorkTree,
    /// The remote refused the push (non-fast-forward, pack too large, hooks).
    PushRejected,
    /// Network-level failure talking to the remote.
    RemoteConnection,
    /// The remote denied access to the ref or repository.
    PermissionDenied,
    /// Unknown branch, ref, or revision.
    InvalidRef,
    /// The invocation exceeded its deadline and was killed.
    Timeout,
    /// A caller-supplied cancellation signal fired.
    Cancelled,
}

impl GitErrorKind {
    /// Whether the chunked push engine may retry this failure with a
    /// smaller batch. Only size/connection failures degrade; everything
    /// else (auth, conflicts, configuration) is fatal to a run.
    pub fn is_retryable_push_failure(self) -> bool {
        matches!(
            self,
            GitErrorKind::PushRejected | GitErrorKind::RemoteConnection | GitErrorKind::Timeout
        )
    }

    /// Short machine-stable label, used in CLI output and skip reasons.
    pub fn label(self) -> &'static str {
        match self {
            GitErrorKind::ToolNotFound => "tool-not-found",
            GitErrorKind::AuthenticationFailed => "authentication-failed",
            GitErrorKind::NoRemote => "no-remote-configured",
            GitErrorKind::NotARepository => "not-a-repository",
            GitErrorKind::RepositoryLocked => "repository-locked",
            GitErrorKind::UnmergedChanges => "unmerged-changes",
            GitErrorKind::DirtyWorkTree => "dirty-working-tree",
            GitErrorKind::PushRejected => "push-rejected",
            GitErrorKind::RemoteConnection => "remote-connection-error",
            GitErrorKind::PermissionDenied => "permission-denied",
            GitErrorKind::InvalidRef => "invalid-ref",
            GitErrorKind::Timeout => "timeout",
            GitErrorKind::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for GitErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
