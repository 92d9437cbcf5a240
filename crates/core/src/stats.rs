// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

//! Repository size and push metrics.
//!
//! A snapshot is rebuilt on every analysis call and never cached; it
//! reflects live repository state. Individual fields degrade to zero when
//! their sub-query fails (size analysis is best-effort by design).

use serde::{Deserialize, Serialize};

/// A file above the large-file threshold, found in the working tree,
/// in reachable history, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LargeFile {
    pub path: String,
    pub size_bytes: u64,
    pub in_working_tree: bool,
    pub in_history: bool,
}

/// Push-relevant repository metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryStats {
    /// Object store plus working tree.
    pub total_size_bytes: u64,
    /// `.git/objects` as reported by count-objects (loose + packed).
    pub objects_size_bytes: u64,
    /// Checked-out files, excluding `.git`.
    pub working_tree_size_bytes: u64,
    /// Bytes tracked by git-lfs (pointer targets, not pointers).
    pub lfs_tracked_size_bytes: u64,
    pub file_count: u64,
    pub commit_count: u64,
    pub branch_count: u64,
    /// Largest single pack file under `.git/objects/pack`.
    pub largest_pack_bytes: u64,
    /// Files above the large-file threshold, deduplicated by path.
    pub large_files: Vec<LargeFile>,
    /// Bytes that would transfer for the current ahead-range, when
    /// measurable; `None` when no estimate could be produced at all.
    pub push_size_bytes: Option<u64>,
    /// True when `push_size_bytes` came from the per-commit heuristic
    /// rather than direct object measurement.
    pub push_size_approximate: bool,
    /// Unpushed commit count for the current branch, when known.
    pub push_commit_count: Option<u64>,
}

impl RepositoryStats {
    /// Push size used for strategy selection; unknown reads as zero so a
    /// degenerate snapshot yields the safest default strategy.
    pub fn effective_push_size(&self) -> u64 {
        self.push_size_bytes.unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
