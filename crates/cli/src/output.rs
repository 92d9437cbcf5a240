// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

//! Text rendering for command results. JSON output bypasses this module
//! entirely (serde on the underlying types).

use heave_core::{format_bytes, format_duration, BranchState, RepositoryStats, StrategyPlan};
use heave_engine::PushReport;

pub fn render_stats(stats: &RepositoryStats, branch: &BranchState) -> String {
    let mut out = String::new();
    let push_size = match stats.push_size_bytes {
        Some(bytes) if stats.push_size_approximate => format!("~{}", format_bytes(bytes)),
        Some(bytes) => format_bytes(bytes),
        None => "unknown".to_string(),
    };
    out.push_str(&format!(
        "branch {} ({}{})\n",
        branch.current_branch,
        if branch.has_upstream {
            format!("{} ahead, {} behind", branch.ahead, branch.behind)
        } else {
            "no upstream".to_string()
        },
        if branch.dirty { ", dirty work tree" } else { "" },
    ));
    out.push_str(&format!(
        "total {}  objects {}  work tree {}  lfs {}\n",
        format_bytes(stats.total_size_bytes),
        format_bytes(stats.objects_size_bytes),
        format_bytes(stats.working_tree_size_bytes),
        format_bytes(stats.lfs_tracked_size_bytes),
    ));
    out.push_str(&format!(
        "{} files, {} commits, {} branches, largest pack {}\n",
        stats.file_count,
        stats.commit_count,
        stats.branch_count,
        format_bytes(stats.largest_pack_bytes),
    ));
    out.push_str(&format!(
        "push size {} across {} commits\n",
        push_size,
        stats
            .push_commit_count
            .map(|c| c.to_string())
            .unwrap_or_else(|| "?".to_string()),
    ));
    if !stats.large_files.is_empty() {
        out.push_str("large files:\n");
        for file in &stats.large_files {
            let whence = match (file.in_working_tree, file.in_history) {
                (true, true) => "work tree + history",
                (true, false) => "work tree",
                _ => "history",
            };
            out.push_str(&format!(
                "  {}  {}  ({})\n",
                file.path,
                format_bytes(file.size_bytes),
                whence
            ));
        }
    }
    out
}

pub fn render_plan(plan: &StrategyPlan) -> String {
    let mut out = format!("recommendation: {}\n", plan.recommendation);
    for opt in &plan.options {
        let marker = if opt.recommended { "*" } else { " " };
        let eta = opt
            .estimated_duration
            .map(|d| format!("  (~{})", format_duration(d)))
            .unwrap_or_default();
        out.push_str(&format!("{marker} {}{eta}\n", opt.kind));
        out.push_str(&format!("    run: {}\n", opt.command));
        for line in &opt.rationale {
            out.push_str(&format!("    + {line}\n"));
        }
        for line in &opt.risks {
            out.push_str(&format!("    ! {line}\n"));
        }
    }
    out
}

pub fn render_report(report: &PushReport) -> String {
    let mut out = format!("{}\n", report.message);
    for skip in &report.skipped {
        out.push_str(&format!("  skipped {}: {}\n", skip.commit, skip.reason));
    }
    out
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
