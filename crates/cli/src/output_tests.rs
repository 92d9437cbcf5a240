// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

use super::*;

use heave_core::recommend;
use heave_engine::SkippedCommit;

fn sample_branch() -> BranchState {
    BranchState {
        current_branch: "feature/data".to_string(),
        has_upstream: true,
        ahead: 12,
        behind: 0,
        dirty: false,
    }
}

#[test]
fn approximate_push_size_is_marked() {
    let stats = RepositoryStats {
        push_size_bytes: Some(24 * 1024 * 1024),
        push_size_approximate: true,
        push_commit_count: Some(12),
        ..Default::default()
    };
    let text = render_stats(&stats, &sample_branch());
    assert!(text.contains("push size ~24.0 MiB across 12 commits"));
}

#[test]
fn measured_push_size_is_unmarked() {
    let stats = RepositoryStats {
        push_size_bytes: Some(24 * 1024 * 1024),
        ..Default::default()
    };
    let text = render_stats(&stats, &sample_branch());
    assert!(text.contains("push size 24.0 MiB"));
    assert!(!text.contains('~'));
}

#[test]
fn plan_marks_the_recommended_option() {
    let stats = RepositoryStats {
        push_size_bytes: Some(3 * 1024 * 1024 * 1024),
        push_commit_count: Some(1500),
        commit_count: 1500,
        ..Default::default()
    };
    let plan = recommend(&stats, &sample_branch());
    let text = render_plan(&plan);
    assert!(text.starts_with("recommendation: chunked\n"));
    assert!(text.contains("* chunked"));
}

#[test]
fn report_lists_skipped_commits() {
    let report = PushReport {
        success: true,
        pushed: 19,
        skipped: vec![SkippedCommit {
            commit: "c007".to_string(),
            reason: "push ending at this commit failed at batch size 1".to_string(),
            kind: None,
        }],
        message: "pushed 19 commits, skipped 1".to_string(),
    };
    let text = render_report(&report);
    assert!(text.contains("pushed 19 commits, skipped 1"));
    assert!(text.contains("skipped c007"));
}
