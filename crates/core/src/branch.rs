// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

//! Branch and tracking state.

use serde::{Deserialize, Serialize};

/// Branch names conventionally treated as shared/production, where
/// destructive operations (force-push) are disallowed by policy.
pub const PROTECTED_BRANCHES: &[&str] = &["main", "master", "develop"];

/// Snapshot of the current branch relative to its upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchState {
    /// Current branch name (short form).
    pub current_branch: String,
    /// Whether a tracking branch is configured.
    pub has_upstream: bool,
    /// Commits present locally but not on the upstream.
    pub ahead: u64,
    /// Commits present on the upstream but not locally.
    pub behind: u64,
    /// Whether the working tree has uncommitted changes.
    pub dirty: bool,
}

/// Derived relationship between the branch and its upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchStatus {
    /// No upstream configured yet.
    New,
    /// Tracked and not behind the upstream.
    Existing,
    /// Tracked and both ahead and behind (history rewrite or parallel work).
    Diverged,
}

impl BranchState {
    /// Compute the branch status. Never stored; always derived.
    pub fn status(&self) -> BranchStatus {
        if !self.has_upstream {
            BranchStatus::New
        } else if self.ahead > 0 && self.behind > 0 {
            BranchStatus::Diverged
        } else {
            BranchStatus::Existing
        }
    }

    pub fn is_protected(&self) -> bool {
        PROTECTED_BRANCHES
            .iter()
            .any(|p| *p == self.current_branch)
    }
}

#[cfg(test)]
#[path = "branch_tests.rs"]
mod tests;
