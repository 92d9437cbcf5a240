// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

//! Strategy selection specs.
//!
//! End-to-end scenarios through `heave_core::recommend`: measured stats
//! plus branch shape in, one recommendation plus ranked options out.

use heave_core::{recommend, RepositoryStats, StrategyKind};

use crate::support::{branch, stats, GIB, MIB};

#[test]
fn moderate_push_on_tracked_branch_is_standard() {
    let plan = recommend(&stats(500 * MIB, 3), &branch("feature/data", true, 3, 0));

    assert_eq!(plan.recommendation, StrategyKind::Standard);
    let top = &plan.options[0];
    assert!(top.recommended);
    assert_eq!(top.command, "git push");
    assert!(top.risks.is_empty());
}

#[test]
fn multi_gigabyte_long_history_is_chunked() {
    let plan = recommend(&stats(3 * GIB, 1500), &branch("feature/data", true, 1500, 0));

    assert_eq!(plan.recommendation, StrategyKind::Chunked);
    let top = &plan.options[0];
    assert!(top.estimated_duration.is_some());
    assert_eq!(top.command, "heave push");
}

#[test]
fn huge_push_on_new_branch_gets_fresh_branch() {
    let plan = recommend(&stats(12 * GIB, 200), &branch("feature/huge", false, 0, 0));

    assert_eq!(plan.recommendation, StrategyKind::FreshBranch);
    // Past the escape-hatch threshold, the manual outs are always offered.
    let kinds: Vec<_> = plan.options.iter().map(|o| o.kind).collect();
    assert!(kinds.contains(&StrategyKind::Bundle));
    assert!(kinds.contains(&StrategyKind::CleanupFirst));
}

#[test]
fn huge_push_on_protected_branch_gets_cleanup_first() {
    let plan = recommend(&stats(12 * GIB, 200), &branch("main", true, 200, 0));

    assert_eq!(plan.recommendation, StrategyKind::CleanupFirst);
}

#[test]
fn large_push_on_short_new_branch_is_squashed() {
    let plan = recommend(&stats(3 * GIB, 20), &branch("feature/blob", false, 0, 0));

    assert_eq!(plan.recommendation, StrategyKind::Squash);
}

#[test]
fn diverged_feature_branch_is_forced_with_lease() {
    let plan = recommend(&stats(1500 * MIB, 40), &branch("feature/data", true, 4, 2));

    assert_eq!(plan.recommendation, StrategyKind::Force);
    assert!(plan.options[0].command.contains("--force-with-lease"));
}

#[test]
fn diverged_protected_branch_is_never_forced() {
    let plan = recommend(&stats(1500 * MIB, 40), &branch("main", true, 4, 2));

    assert_eq!(plan.recommendation, StrategyKind::Chunked);
    assert!(plan.options.iter().all(|o| o.kind != StrategyKind::Force));
    let top = &plan.options[0];
    assert!(
        top.risks.iter().any(|r| r.starts_with("HIGH:")),
        "override must surface as a HIGH risk: {:?}",
        top.risks
    );
}

#[test]
fn degenerate_stats_still_produce_a_plan() {
    let plan = recommend(&RepositoryStats::default(), &branch("main", true, 0, 0));

    assert_eq!(plan.recommendation, StrategyKind::Standard);
    assert!(!plan.options.is_empty());
}

#[test]
fn exactly_one_option_is_recommended_and_listed_first() {
    for (bytes, commits) in [(0, 0), (500 * MIB, 3), (3 * GIB, 1500), (12 * GIB, 200)] {
        let plan = recommend(&stats(bytes, commits), &branch("feature/data", true, commits, 0));
        let recommended: Vec<_> = plan.options.iter().filter(|o| o.recommended).collect();
        assert_eq!(recommended.len(), 1);
        assert!(plan.options[0].recommended);
        assert_eq!(plan.options[0].kind, plan.recommendation);
    }
}

#[test]
fn recommendation_is_deterministic() {
    let s = stats(3 * GIB, 1500);
    let b = branch("feature/data", true, 1500, 0);
    assert_eq!(recommend(&s, &b), recommend(&s, &b));
}
