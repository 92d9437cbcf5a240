// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

//! Shared fixtures: a scripted remote for the push engine and builders
//! for stats/branch inputs.

use std::sync::Mutex;

use async_trait::async_trait;

use heave_core::{BranchState, GitErrorKind, RepositoryStats};
use heave_engine::{PushError, PushPlan, PushTarget};
use heave_git::GitError;

pub const MIB: u64 = 1024 * 1024;
pub const GIB: u64 = 1024 * MIB;

pub fn stats(push_size_bytes: u64, push_commit_count: u64) -> RepositoryStats {
    RepositoryStats {
        push_size_bytes: Some(push_size_bytes),
        push_commit_count: Some(push_commit_count),
        commit_count: push_commit_count,
        ..Default::default()
    }
}

pub fn branch(name: &str, has_upstream: bool, ahead: u64, behind: u64) -> BranchState {
    BranchState {
        current_branch: name.to_string(),
        has_upstream,
        ahead,
        behind,
        dirty: false,
    }
}

/// One recorded `push_through` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub commit: String,
    pub batch_len: usize,
    pub set_upstream: bool,
}

/// A remote driven entirely by script: batches above `max_batch` are
/// rejected as too large, batches covering `poison` fail at any size,
/// and `fatal_at` fails with a non-retryable error.
pub struct FakeRemote {
    commits: Vec<String>,
    has_upstream: bool,
    max_batch: Option<usize>,
    poison: Option<String>,
    fatal_at: Option<String>,
    attempts: Mutex<Vec<Attempt>>,
}

impl FakeRemote {
    pub fn new(commit_count: usize) -> Self {
        Self {
            commits: (0..commit_count).map(|i| format!("c{i:03}")).collect(),
            has_upstream: true,
            max_batch: None,
            poison: None,
            fatal_at: None,
            attempts: Mutex::new(Vec::new()),
        }
    }

    pub fn without_upstream(mut self) -> Self {
        self.has_upstream = false;
        self
    }

    /// Reject any batch covering more than `max` commits.
    pub fn with_max_batch(mut self, max: usize) -> Self {
        self.max_batch = Some(max);
        self
    }

    /// Reject any batch whose range covers this commit, at any size.
    pub fn with_poison(mut self, commit: &str) -> Self {
        self.poison = Some(commit.to_string());
        self
    }

    /// Fail fatally on any batch whose range covers this commit.
    pub fn with_fatal_at(mut self, commit: &str) -> Self {
        self.fatal_at = Some(commit.to_string());
        self
    }

    pub fn attempts(&self) -> Vec<Attempt> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn batch_lens(&self) -> Vec<usize> {
        self.attempts().iter().map(|a| a.batch_len).collect()
    }

    fn rejected(&self, commit: &str) -> GitError {
        GitError::Failed {
            exit_code: 1,
            stdout: String::new(),
            stderr: "remote: fatal: pack exceeds maximum allowed size".to_string(),
            kind: Some(GitErrorKind::PushRejected),
            args: vec!["push".to_string(), format!("origin {commit}")],
        }
    }
}

#[async_trait]
impl PushTarget for FakeRemote {
    async fn prepare(&self) -> Result<PushPlan, PushError> {
        Ok(PushPlan {
            branch: "feature/data".to_string(),
            has_upstream: self.has_upstream,
            commits: self.commits.clone(),
        })
    }

    async fn push_through(
        &self,
        plan: &PushPlan,
        commit: &str,
        batch_len: usize,
        set_upstream: bool,
    ) -> Result<(), GitError> {
        self.attempts.lock().unwrap().push(Attempt {
            commit: commit.to_string(),
            batch_len,
            set_upstream,
        });

        // Reconstruct the range this batch covers from its final commit.
        let idx = plan
            .commits
            .iter()
            .position(|c| c == commit)
            .unwrap_or_else(|| panic!("unknown commit {commit}"));
        let range = &plan.commits[idx + 1 - batch_len..=idx];

        if let Some(fatal) = &self.fatal_at {
            if range.contains(fatal) {
                return Err(GitError::Failed {
                    exit_code: 128,
                    stdout: String::new(),
                    stderr: "fatal: Authentication failed".to_string(),
                    kind: Some(GitErrorKind::AuthenticationFailed),
                    args: vec!["push".to_string()],
                });
            }
        }
        if self.max_batch.is_some_and(|max| batch_len > max) {
            return Err(self.rejected(commit));
        }
        if let Some(poison) = &self.poison {
            if range.contains(poison) {
                return Err(self.rejected(commit));
            }
        }
        Ok(())
    }
}
