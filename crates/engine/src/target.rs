// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

//! The push seam: how the engine talks to a remote.
//!
//! `PushTarget` separates the batch-retry loop from git itself so the loop
//! can be driven by scripted failures in tests. `GitPushTarget` is the real
//! implementation.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;

use heave_git::{branch_state, GitError, GitExecutor, GitInvocation};

use crate::push::PushError;

/// Upper bound on one batch attempt. Large-pack transfer is slow, so this
/// sits well above the executor default; the run as a whole has no
/// deadline.
pub const BATCH_PUSH_TIMEOUT: Duration = Duration::from_secs(600);

/// Enumeration bound when no upstream exists yet; pushing a commit pushes
/// its ancestors anyway, the bound only caps the list we walk.
const NO_UPSTREAM_COMMIT_CAP: u32 = 1000;

/// What the engine learned before the first batch.
#[derive(Debug, Clone)]
pub struct PushPlan {
    pub branch: String,
    pub has_upstream: bool,
    /// Unpushed commit ids, oldest first.
    pub commits: Vec<String>,
}

/// Seam between the retry loop and the remote.
#[async_trait]
pub trait PushTarget {
    /// Resolve branch/upstream and enumerate unpushed commits oldest-first.
    async fn prepare(&self) -> Result<PushPlan, PushError>;

    /// Push everything up to and including `commit`. `batch_len` is how
    /// many commits the range covers; `set_upstream` establishes tracking
    /// on first success when none existed.
    async fn push_through(
        &self,
        plan: &PushPlan,
        commit: &str,
        batch_len: usize,
        set_upstream: bool,
    ) -> Result<(), GitError>;
}

/// Pushes through the git executor to the configured remote.
#[derive(Debug, Clone)]
pub struct GitPushTarget {
    exec: GitExecutor,
    repo: PathBuf,
    remote: String,
}

impl GitPushTarget {
    pub fn new(exec: GitExecutor, repo: impl Into<PathBuf>) -> Self {
        Self {
            exec,
            repo: repo.into(),
            remote: "origin".to_string(),
        }
    }

    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }
}

#[async_trait]
impl PushTarget for GitPushTarget {
    async fn prepare(&self) -> Result<PushPlan, PushError> {
        let branch = branch_state(&self.exec, &self.repo).await?;

        let commits = if branch.has_upstream {
            self.exec
                .run_stdout(
                    GitInvocation::new(["rev-list", "--reverse", "@{u}..HEAD"]).cwd(&self.repo),
                )
                .await?
        } else {
            let cap = format!("--max-count={NO_UPSTREAM_COMMIT_CAP}");
            self.exec
                .run_stdout(
                    GitInvocation::new(["rev-list", "--reverse", cap.as_str(), "HEAD"])
                        .cwd(&self.repo),
                )
                .await?
        };
        let commits = commits
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect();

        Ok(PushPlan {
            branch: branch.current_branch,
            has_upstream: branch.has_upstream,
            commits,
        })
    }

    async fn push_through(
        &self,
        plan: &PushPlan,
        commit: &str,
        batch_len: usize,
        set_upstream: bool,
    ) -> Result<(), GitError> {
        let refspec = format!("{commit}:refs/heads/{}", plan.branch);
        let mut args = vec!["push".to_string()];
        if set_upstream {
            args.push("--set-upstream".to_string());
        }
        args.push(self.remote.clone());
        args.push(refspec);

        tracing::debug!(commit, batch_len, set_upstream, "pushing batch");
        self.exec
            .run(
                GitInvocation::new(args)
                    .cwd(&self.repo)
                    .timeout(BATCH_PUSH_TIMEOUT),
            )
            .await
            .map(|_| ())
    }
}
