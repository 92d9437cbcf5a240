// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

//! Branch and tracking-state queries.

use std::path::Path;

use heave_core::BranchState;

use crate::error::GitError;
use crate::executor::GitExecutor;
use crate::invocation::GitInvocation;
use crate::parse::parse_left_right;

/// Snapshot the current branch's relationship to its upstream.
///
/// Fails only when the current branch itself cannot be resolved (not a
/// repository, detached HEAD with no commits); the upstream-dependent
/// fields degrade to their defaults.
pub async fn branch_state(exec: &GitExecutor, repo: &Path) -> Result<BranchState, GitError> {
    let current_branch = exec
        .run_stdout(GitInvocation::new(["rev-parse", "--abbrev-ref", "HEAD"]).cwd(repo))
        .await?;

    let upstream = exec
        .run_stdout(
            GitInvocation::new(["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{u}"])
                .cwd(repo),
        )
        .await
        .ok();
    let has_upstream = upstream.is_some();

    let (behind, ahead) = if has_upstream {
        exec.run_stdout(
            GitInvocation::new(["rev-list", "--left-right", "--count", "@{u}...HEAD"]).cwd(repo),
        )
        .await
        .ok()
        .and_then(|out| parse_left_right(&out))
        .unwrap_or((0, 0))
    } else {
        (0, 0)
    };

    let dirty = exec
        .run_stdout(GitInvocation::new(["status", "--porcelain"]).cwd(repo))
        .await
        .map(|out| !out.is_empty())
        .unwrap_or(false);

    Ok(BranchState {
        current_branch,
        has_upstream,
        ahead,
        behind,
        dirty,
    })
}
