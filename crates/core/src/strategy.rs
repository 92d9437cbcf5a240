// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

//! Transfer strategy selection.
//!
//! Pure function of `(RepositoryStats, BranchState)`: no I/O, always
//! produces a recommendation, even from zeroed stats (degenerate input
//! yields Standard). The decision tree is an ordered rule list evaluated
//! top to bottom, first match wins; size rules take precedence over the
//! branch-shaped default. A safety override runs after the table: Force on
//! a protected branch is never the final recommendation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::branch::{BranchState, BranchStatus};
use crate::fmt::format_bytes;
use crate::stats::RepositoryStats;

pub const GIB: u64 = 1024 * 1024 * 1024;

/// Above this, the push should not be attempted as-is at all.
const HUGE_PUSH_BYTES: u64 = 10 * GIB;
/// Above this, a single-pack push is likely to hit remote limits.
const LARGE_PUSH_BYTES: u64 = 2 * GIB;
/// Above this, the push deserves a closer look before running.
const RISKY_PUSH_BYTES: u64 = GIB;
/// Above this, Bundle and CleanupFirst are always offered as manual escapes.
const ESCAPE_HATCH_BYTES: u64 = 5 * GIB;

/// A branch with at most this many commits is "small" for squash purposes.
const SMALL_COMMIT_COUNT: u64 = 50;
/// Above this many unpushed commits, chunking pays off on its own.
const CHUNK_COMMIT_COUNT: u64 = 1000;

/// Assumed sustained transfer rate for duration estimates. Coarse by
/// intent; not a performance guarantee.
const ESTIMATE_BYTES_PER_SEC: u64 = 5 * 1024 * 1024;

/// The transfer strategies heave knows how to describe or execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Standard,
    Chunked,
    Force,
    FreshBranch,
    Squash,
    Bundle,
    CleanupFirst,
}

impl StrategyKind {
    pub fn label(self) -> &'static str {
        match self {
            StrategyKind::Standard => "standard",
            StrategyKind::Chunked => "chunked",
            StrategyKind::Force => "force",
            StrategyKind::FreshBranch => "fresh-branch",
            StrategyKind::Squash => "squash",
            StrategyKind::Bundle => "bundle",
            StrategyKind::CleanupFirst => "cleanup-first",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One candidate strategy with its trade-offs spelled out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyOption {
    pub kind: StrategyKind,
    pub recommended: bool,
    pub rationale: Vec<String>,
    pub risks: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<Duration>,
    /// Command template a caller would run for this strategy.
    pub command: String,
}

/// Output of strategy analysis: one recommendation plus the full ranked
/// option list. The caller may override the recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyPlan {
    pub recommendation: StrategyKind,
    pub options: Vec<StrategyOption>,
}

/// Facts extracted once from the inputs; every rule predicate reads these.
#[derive(Debug, Clone, Copy)]
struct Facts {
    push_size: u64,
    commit_count: u64,
    status: BranchStatus,
    protected: bool,
}

/// The decision tree as an ordered rule table. First rule returning
/// `Some` wins. Order matters and is tested independently.
const RULES: &[(&str, fn(&Facts) -> Option<StrategyKind>)] = &[
    ("huge-push", |f| {
        (f.push_size > HUGE_PUSH_BYTES).then(|| {
            if f.protected {
                StrategyKind::CleanupFirst
            } else {
                StrategyKind::FreshBranch
            }
        })
    }),
    ("large-push", |f| {
        (f.push_size > LARGE_PUSH_BYTES).then(|| {
            // Tracked branches and long histories both chunk well; only a
            // short-lived new branch is better squashed before first push.
            if f.status == BranchStatus::New && f.commit_count <= SMALL_COMMIT_COUNT {
                StrategyKind::Squash
            } else {
                StrategyKind::Chunked
            }
        })
    }),
    ("risky-push", |f| {
        (f.push_size > RISKY_PUSH_BYTES).then(|| {
            if f.status == BranchStatus::Diverged {
                StrategyKind::Force
            } else {
                StrategyKind::Standard
            }
        })
    }),
    ("default", |_| Some(StrategyKind::Standard)),
];

/// Analyze stats and branch state into a recommendation plus options.
pub fn recommend(stats: &RepositoryStats, branch: &BranchState) -> StrategyPlan {
    let facts = Facts {
        push_size: stats.effective_push_size(),
        commit_count: stats
            .push_commit_count
            .unwrap_or(stats.commit_count),
        status: branch.status(),
        protected: branch.is_protected(),
    };

    let mut recommendation = StrategyKind::Standard;
    for (_, rule) in RULES {
        if let Some(kind) = rule(&facts) {
            recommendation = kind;
            break;
        }
    }

    // Safety override: never force-push a protected branch.
    let mut override_risk = None;
    if recommendation == StrategyKind::Force && facts.protected {
        recommendation = StrategyKind::Chunked;
        override_risk = Some(format!(
            "HIGH: force-push to protected branch '{}' is disallowed by policy; \
             chunked push substituted",
            branch.current_branch
        ));
    }

    let mut kinds = candidate_kinds(&facts, recommendation);
    if let Some(pos) = kinds.iter().position(|k| *k == recommendation) {
        kinds.remove(pos);
    }
    kinds.insert(0, recommendation);

    let options = kinds
        .into_iter()
        .map(|kind| {
            let mut opt = build_option(kind, &facts, branch);
            if kind == recommendation {
                opt.recommended = true;
                if let Some(risk) = override_risk.take() {
                    opt.risks.push(risk);
                }
            }
            opt
        })
        .collect();

    StrategyPlan {
        recommendation,
        options,
    }
}

/// Which strategies are worth presenting for these facts, in canonical
/// order. The recommendation is moved to the front by the caller.
fn candidate_kinds(facts: &Facts, recommendation: StrategyKind) -> Vec<StrategyKind> {
    let mut kinds = vec![StrategyKind::Standard];
    if facts.push_size > RISKY_PUSH_BYTES || facts.commit_count > CHUNK_COMMIT_COUNT {
        kinds.push(StrategyKind::Chunked);
    }
    if facts.status == BranchStatus::Diverged && !facts.protected {
        kinds.push(StrategyKind::Force);
    }
    if facts.status == BranchStatus::New && facts.commit_count <= SMALL_COMMIT_COUNT {
        kinds.push(StrategyKind::Squash);
    }
    if facts.push_size > HUGE_PUSH_BYTES {
        kinds.push(StrategyKind::FreshBranch);
    }
    // Manual escape hatches, always offered past the threshold.
    if facts.push_size > ESCAPE_HATCH_BYTES {
        kinds.push(StrategyKind::Bundle);
        kinds.push(StrategyKind::CleanupFirst);
    }
    if !kinds.contains(&recommendation) {
        kinds.push(recommendation);
    }
    kinds
}

fn build_option(kind: StrategyKind, facts: &Facts, branch: &BranchState) -> StrategyOption {
    let size = format_bytes(facts.push_size);
    let b = &branch.current_branch;
    let (rationale, risks, command) = match kind {
        StrategyKind::Standard => (
            vec![if facts.status == BranchStatus::New {
                format!("'{}' has no upstream yet; a plain push establishes one", b)
            } else {
                format!("push size {} is within normal limits", size)
            }],
            vec![],
            if branch.has_upstream {
                "git push".to_string()
            } else {
                format!("git push -u origin {}", b)
            },
        ),
        StrategyKind::Chunked => (
            vec![
                format!(
                    "{} across {} commits can be split into batches that stay \
                     under remote pack limits",
                    size, facts.commit_count
                ),
                "progress survives individual batch failures".to_string(),
            ],
            vec!["slower than a single push; intermediate remote states are visible".to_string()],
            "heave push".to_string(),
        ),
        StrategyKind::Force => (
            vec![format!(
                "'{}' has diverged from its upstream ({} ahead, {} behind); \
                 a force-with-lease push replaces the remote history",
                b, branch.ahead, branch.behind
            )],
            vec!["rewrites remote history; collaborators must re-sync".to_string()],
            format!("git push --force-with-lease origin {}", b),
        ),
        StrategyKind::FreshBranch => (
            vec![format!(
                "push size {} exceeds what most remotes accept; a fresh branch \
                 from the current tree avoids transferring deep history",
                size
            )],
            vec!["history is left behind on the old branch".to_string()],
            format!("git checkout -b {}-slim && git push -u origin {}-slim", b, b),
        ),
        StrategyKind::Squash => (
            vec![format!(
                "a new branch with {} commits can be squashed into one before \
                 its first push, shrinking the transfer",
                facts.commit_count
            )],
            vec!["individual commit history is lost".to_string()],
            "git reset --soft <base> && git commit && git push".to_string(),
        ),
        StrategyKind::Bundle => (
            vec![format!(
                "a bundle file transfers {} out of band (shared drive, object \
                 storage) when the remote refuses direct pushes",
                size
            )],
            vec!["receiving side must unbundle manually".to_string()],
            "git bundle create repo.bundle --all".to_string(),
        ),
        StrategyKind::CleanupFirst => (
            vec![format!(
                "repacking and pruning before the push can shrink the {} \
                 transfer substantially",
                size
            )],
            vec!["gc on a large repository can take a long time".to_string()],
            "git gc --aggressive --prune=now && git push".to_string(),
        ),
    };

    StrategyOption {
        kind,
        recommended: false,
        rationale,
        risks,
        estimated_duration: estimate_duration(kind, facts),
        command,
    }
}

/// Coarse wall-clock estimate from push size and commit count.
fn estimate_duration(kind: StrategyKind, facts: &Facts) -> Option<Duration> {
    if facts.push_size == 0 {
        return None;
    }
    let transfer = facts.push_size / ESTIMATE_BYTES_PER_SEC;
    let secs = match kind {
        // Per-batch negotiation overhead.
        StrategyKind::Chunked => transfer + transfer / 4 + facts.commit_count / 10,
        // gc roughly doubles the wall time before the push starts.
        StrategyKind::CleanupFirst => transfer * 2,
        // Only the current tree transfers, not history.
        StrategyKind::FreshBranch | StrategyKind::Squash => transfer / 4,
        _ => transfer,
    };
    Some(Duration::from_secs(secs.max(1)))
}

#[cfg(test)]
#[path = "strategy_tests.rs"]
mod tests;
