// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

use super::*;

fn state(branch: &str, has_upstream: bool, ahead: u64, behind: u64) -> BranchState {
    BranchState {
        current_branch: branch.to_string(),
        has_upstream,
        ahead,
        behind,
        dirty: false,
    }
}

#[yare::parameterized(
    no_upstream = { state("feature/x", false, 0, 0), BranchStatus::New },
    no_upstream_with_commits = { state("feature/x", false, 12, 0), BranchStatus::New },
    tracked_clean = { state("main", true, 0, 0), BranchStatus::Existing },
    tracked_ahead = { state("main", true, 5, 0), BranchStatus::Existing },
    tracked_behind_only = { state("main", true, 0, 3), BranchStatus::Existing },
    diverged = { state("main", true, 5, 3), BranchStatus::Diverged },
)]
fn status_derivation(state: BranchState, expected: BranchStatus) {
    assert_eq!(state.status(), expected);
}

#[yare::parameterized(
    main = { "main", true },
    master = { "master", true },
    develop = { "develop", true },
    feature = { "feature/big-import", false },
    main_prefixed = { "main-v2", false },
)]
fn protected_branch_names(name: &str, expected: bool) {
    assert_eq!(state(name, true, 0, 0).is_protected(), expected);
}
