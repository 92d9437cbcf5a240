// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

//! The batch-retry loop.
//!
//! State lives in one local `BatchPushState` value threaded through the
//! loop; nothing observes it mid-run. The remote ref position is the only
//! durable checkpoint, so an interrupted run simply recomputes on the next
//! invocation.

use serde::Serialize;

use heave_core::GitErrorKind;
use heave_git::GitError;

use crate::target::PushTarget;

/// Initial batch size when the caller does not supply one.
pub const DEFAULT_BATCH_SIZE: usize = 25;

/// One commit that could not be pushed even at batch size 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedCommit {
    pub commit: String,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<GitErrorKind>,
}

/// Terminal outcome of a run that was not aborted.
#[derive(Debug, Clone, Serialize)]
pub struct PushReport {
    /// True on full or partial success; false when nothing was pushed.
    pub success: bool,
    pub pushed: u64,
    pub skipped: Vec<SkippedCommit>,
    pub message: String,
}

/// Fatal outcomes. Non-retryable failures abort the run; the error keeps
/// the progress made so far so callers never lose partial-success data.
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    #[error("cannot plan push: {0}")]
    Plan(#[from] GitError),

    #[error("push aborted after {pushed} pushed / {} skipped: {source}", skipped.len())]
    Aborted {
        source: GitError,
        pushed: u64,
        skipped: Vec<SkippedCommit>,
    },
}

/// Engine-internal batch state for one invocation.
struct BatchPushState {
    remaining: Vec<String>,
    confirmed: usize,
    batch_size: usize,
    pushed: u64,
    skipped: Vec<SkippedCommit>,
    upstream_established: bool,
}

/// Push all unpushed commits in adaptively-sized batches.
///
/// Batch size only ever decreases during a run: a size-related failure
/// implies the remote constraint persists, so a successful smaller batch
/// does not restore the original size. Commits that fail alone are
/// recorded as skipped and the run continues past them.
pub async fn push_in_batches<T: PushTarget>(
    target: &T,
    initial_batch_size: usize,
) -> Result<PushReport, PushError> {
    let plan = target.prepare().await?;
    let total = plan.commits.len();

    if total == 0 {
        return Ok(PushReport {
            success: true,
            pushed: 0,
            skipped: Vec::new(),
            message: "nothing to push".to_string(),
        });
    }

    let mut state = BatchPushState {
        remaining: plan.commits.clone(),
        confirmed: 0,
        batch_size: initial_batch_size.max(1),
        pushed: 0,
        skipped: Vec::new(),
        upstream_established: plan.has_upstream,
    };
    tracing::info!(
        total,
        batch_size = state.batch_size,
        branch = %plan.branch,
        "starting chunked push"
    );

    while state.confirmed < total {
        let end = (state.confirmed + state.batch_size).min(total);
        let batch_len = end - state.confirmed;
        let commit = &state.remaining[end - 1];

        match target
            .push_through(&plan, commit, batch_len, !state.upstream_established)
            .await
        {
            Ok(()) => {
                state.pushed += batch_len as u64;
                state.confirmed = end;
                state.upstream_established = true;
                tracing::info!(
                    pushed = state.pushed,
                    total,
                    batch_len,
                    "batch pushed"
                );
            }
            Err(error) if is_retryable(&error) => {
                if state.batch_size > 1 {
                    state.batch_size /= 2;
                    tracing::warn!(
                        batch_size = state.batch_size,
                        kind = ?error.kind(),
                        "batch failed, halving"
                    );
                } else {
                    tracing::warn!(commit = %commit, kind = ?error.kind(), "commit unpushable, skipping");
                    state.skipped.push(SkippedCommit {
                        commit: commit.clone(),
                        reason: format!("push ending at this commit failed at batch size 1: {error}"),
                        kind: error.kind(),
                    });
                    state.confirmed += 1;
                    // Stay at size 1; the constraint that shrank us here
                    // has not gone away.
                }
            }
            Err(error) => {
                tracing::error!(kind = ?error.kind(), %error, "fatal push failure");
                return Err(PushError::Aborted {
                    source: error,
                    pushed: state.pushed,
                    skipped: state.skipped,
                });
            }
        }
    }

    debug_assert_eq!(state.pushed as usize + state.skipped.len(), total);
    let message = if state.skipped.is_empty() {
        format!("pushed {} commits", state.pushed)
    } else if state.pushed > 0 {
        format!(
            "pushed {} commits, skipped {}",
            state.pushed,
            state.skipped.len()
        )
    } else {
        format!("no commits pushed; all {} skipped", state.skipped.len())
    };

    Ok(PushReport {
        success: state.pushed > 0 || state.skipped.is_empty(),
        pushed: state.pushed,
        skipped: state.skipped,
        message,
    })
}

/// Only size/connection failures degrade; everything else is fatal.
fn is_retryable(error: &GitError) -> bool {
    error
        .kind()
        .is_some_and(GitErrorKind::is_retryable_push_failure)
}

#[cfg(test)]
#[path = "push_tests.rs"]
mod tests;
