// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

//! Concurrent repository analysis.
//!
//! Issues every read-only sub-query as an independent task over the same
//! repository snapshot and joins them into one `RepositoryStats`. A failed
//! sub-query degrades its field to zero/empty instead of failing the whole
//! snapshot; size analysis is best-effort. Nothing here mutates the
//! repository, so calling twice on an unchanged repository yields
//! identical stats.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use heave_core::{LargeFile, RepositoryStats};

use crate::error::GitError;
use crate::executor::GitExecutor;
use crate::invocation::GitInvocation;
use crate::parse::{count_lines, parse_batch_check_line, parse_count_objects, parse_lfs_size};

/// Files at or above this size are reported as large (the common remote
/// warning threshold).
pub const LARGE_FILE_THRESHOLD: u64 = 50 * 1024 * 1024;

/// Cap on unpushed-commit enumeration when no upstream exists.
pub const PUSH_COMMIT_CAP: u64 = 1000;

/// Per-commit fallback when push size cannot be measured directly.
const FALLBACK_BYTES_PER_COMMIT: u64 = 2 * 1024 * 1024;

/// Deadline for the heavyweight history scan; everything else uses the
/// executor default.
const HISTORY_SCAN_TIMEOUT: Duration = Duration::from_secs(120);

/// Analysis can only fail outright when the path is not a repository;
/// every metric inside the snapshot degrades individually.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("{path} is not a git repository: {source}")]
    NotARepository {
        path: PathBuf,
        source: GitError,
    },
}

/// Compute a full metrics snapshot for the repository at `repo`.
pub async fn analyze_repository(
    exec: &GitExecutor,
    repo: &Path,
) -> Result<RepositoryStats, AnalyzeError> {
    let git_dir = exec
        .run_stdout(GitInvocation::new(["rev-parse", "--git-dir"]).cwd(repo))
        .await
        .map_err(|source| AnalyzeError::NotARepository {
            path: repo.to_path_buf(),
            source,
        })?;
    let git_dir = if Path::new(&git_dir).is_absolute() {
        PathBuf::from(git_dir)
    } else {
        repo.join(git_dir)
    };

    let (
        file_count,
        commit_count,
        branch_count,
        objects_size_bytes,
        largest_pack_bytes,
        (working_tree_size_bytes, tree_large),
        lfs_tracked_size_bytes,
        history_large,
        push,
    ) = tokio::join!(
        counted(exec, repo, &["ls-files"], "file count"),
        counted_value(exec, repo, &["rev-list", "--count", "HEAD"], "commit count"),
        counted(
            exec,
            repo,
            &["for-each-ref", "--format=%(refname:short)", "refs/heads"],
            "branch count"
        ),
        object_store_size(exec, repo),
        pack_sizes(&git_dir),
        working_tree_scan(repo),
        lfs_size(exec, repo),
        history_large_files(exec, repo),
        push_size(exec, repo),
    );

    let large_files = merge_large_files(tree_large, history_large);

    Ok(RepositoryStats {
        total_size_bytes: objects_size_bytes.saturating_add(working_tree_size_bytes),
        objects_size_bytes,
        working_tree_size_bytes,
        lfs_tracked_size_bytes,
        file_count,
        commit_count,
        branch_count,
        largest_pack_bytes,
        large_files,
        push_size_bytes: push.bytes,
        push_size_approximate: push.approximate,
        push_commit_count: push.commits,
    })
}

/// Line-count query, degrading to zero.
async fn counted(exec: &GitExecutor, repo: &Path, args: &[&str], what: &str) -> u64 {
    match exec.run_stdout(GitInvocation::new(args.to_vec()).cwd(repo)).await {
        Ok(out) => count_lines(&out),
        Err(error) => {
            tracing::warn!(%error, what, "sub-query degraded to zero");
            0
        }
    }
}

/// Single-integer query, degrading to zero.
async fn counted_value(exec: &GitExecutor, repo: &Path, args: &[&str], what: &str) -> u64 {
    match exec.run_stdout(GitInvocation::new(args.to_vec()).cwd(repo)).await {
        Ok(out) => out.trim().parse().unwrap_or(0),
        Err(error) => {
            tracing::warn!(%error, what, "sub-query degraded to zero");
            0
        }
    }
}

async fn object_store_size(exec: &GitExecutor, repo: &Path) -> u64 {
    match exec
        .run_stdout(GitInvocation::new(["count-objects", "-v"]).cwd(repo))
        .await
    {
        Ok(out) => parse_count_objects(&out),
        Err(error) => {
            tracing::warn!(%error, "count-objects degraded to zero");
            0
        }
    }
}

/// Largest file under `.git/objects/pack/*.pack`; remote hosts commonly
/// cap pack size, so the biggest existing pack is the relevant figure.
async fn pack_sizes(git_dir: &Path) -> u64 {
    let pack_dir = git_dir.join("objects").join("pack");
    let mut largest = 0u64;
    let Ok(mut entries) = tokio::fs::read_dir(&pack_dir).await else {
        return 0;
    };
    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        if path.extension().is_some_and(|e| e == "pack") {
            if let Ok(meta) = entry.metadata().await {
                largest = largest.max(meta.len());
            }
        }
    }
    largest
}

/// Walk the working tree on a blocking thread: total size plus files over
/// the large-file threshold. `.git` is skipped.
async fn working_tree_scan(repo: &Path) -> (u64, Vec<(String, u64)>) {
    let root = repo.to_path_buf();
    let scan = tokio::task::spawn_blocking(move || {
        let mut total = 0u64;
        let mut large = Vec::new();
        let mut stack = vec![root.clone()];
        while let Some(dir) = stack.pop() {
            let Ok(entries) = std::fs::read_dir(&dir) else {
                continue;
            };
            for entry in entries.flatten() {
                let path = entry.path();
                let Ok(file_type) = entry.file_type() else {
                    continue;
                };
                if file_type.is_dir() {
                    if path.file_name().is_some_and(|n| n == ".git") {
                        continue;
                    }
                    stack.push(path);
                } else if file_type.is_file() {
                    let Ok(meta) = entry.metadata() else {
                        continue;
                    };
                    total = total.saturating_add(meta.len());
                    if meta.len() >= LARGE_FILE_THRESHOLD {
                        let rel = path
                            .strip_prefix(&root)
                            .unwrap_or(&path)
                            .to_string_lossy()
                            .into_owned();
                        large.push((rel, meta.len()));
                    }
                }
            }
        }
        (total, large)
    })
    .await;
    match scan {
        Ok(result) => result,
        Err(error) => {
            tracing::warn!(%error, "working-tree scan degraded to zero");
            (0, Vec::new())
        }
    }
}

/// Bytes tracked by git-lfs; zero when lfs is absent or untracked.
async fn lfs_size(exec: &GitExecutor, repo: &Path) -> u64 {
    match exec
        .run_stdout(GitInvocation::new(["lfs", "ls-files", "--size"]).cwd(repo))
        .await
    {
        Ok(out) => out.lines().map(parse_lfs_size).sum(),
        Err(_) => 0,
    }
}

/// Large blobs reachable from any ref: `rev-list --objects --all` piped
/// into `cat-file --batch-check`.
async fn history_large_files(exec: &GitExecutor, repo: &Path) -> Vec<(String, u64)> {
    let listing = match exec
        .run_stdout(
            GitInvocation::new(["rev-list", "--objects", "--all"])
                .cwd(repo)
                .timeout(HISTORY_SCAN_TIMEOUT),
        )
        .await
    {
        Ok(out) => out,
        Err(error) => {
            tracing::warn!(%error, "history object listing degraded to empty");
            return Vec::new();
        }
    };
    // cat-file wants bare oids, one per line.
    let oids: String = listing
        .lines()
        .filter_map(|l| l.split_whitespace().next())
        .fold(String::new(), |mut acc, oid| {
            acc.push_str(oid);
            acc.push('\n');
            acc
        });
    // Re-attach paths after sizing: rev-list lines are "<oid> <path>".
    let paths: BTreeMap<&str, &str> = listing
        .lines()
        .filter_map(|l| l.split_once(' '))
        .collect();

    let sized = match exec
        .run_stdout(
            GitInvocation::new([
                "cat-file",
                "--batch-check=%(objecttype) %(objectname) %(objectsize) %(rest)",
            ])
            .cwd(repo)
            .stdin(oids.into_bytes())
            .timeout(HISTORY_SCAN_TIMEOUT),
        )
        .await
    {
        Ok(out) => out,
        Err(error) => {
            tracing::warn!(%error, "history blob sizing degraded to empty");
            return Vec::new();
        }
    };

    let mut best: BTreeMap<String, u64> = BTreeMap::new();
    for line in sized.lines() {
        let Some((obj_type, size, _)) = parse_batch_check_line(line) else {
            continue;
        };
        if obj_type != "blob" || size < LARGE_FILE_THRESHOLD {
            continue;
        }
        let Some(oid) = line.split_whitespace().nth(1) else {
            continue;
        };
        let Some(path) = paths.get(oid) else {
            continue;
        };
        let entry = best.entry((*path).to_string()).or_default();
        *entry = (*entry).max(size);
    }
    best.into_iter().collect()
}

struct PushMeasurement {
    bytes: Option<u64>,
    approximate: bool,
    commits: Option<u64>,
}

/// Measure the bytes the current ahead-range would transfer. Direct
/// measurement sums object sizes for `@{u}..HEAD`; when that is not
/// possible (typically no upstream) a fixed per-commit estimate is used
/// and marked approximate.
async fn push_size(exec: &GitExecutor, repo: &Path) -> PushMeasurement {
    let ahead = exec
        .run_stdout(GitInvocation::new(["rev-list", "--count", "@{u}..HEAD"]).cwd(repo))
        .await
        .ok()
        .and_then(|out| out.trim().parse::<u64>().ok());

    if let Some(ahead) = ahead {
        if ahead == 0 {
            return PushMeasurement {
                bytes: Some(0),
                approximate: false,
                commits: Some(0),
            };
        }
        if let Some(bytes) = measure_range(exec, repo, "@{u}..HEAD").await {
            return PushMeasurement {
                bytes: Some(bytes),
                approximate: false,
                commits: Some(ahead),
            };
        }
        // Direct measurement failed mid-way; fall through to the estimate.
        return PushMeasurement {
            bytes: Some(ahead.saturating_mul(FALLBACK_BYTES_PER_COMMIT)),
            approximate: true,
            commits: Some(ahead),
        };
    }

    // No upstream: estimate from bounded history.
    let cap_arg = format!("--max-count={PUSH_COMMIT_CAP}");
    let commits = exec
        .run_stdout(
            GitInvocation::new(["rev-list", "--count", cap_arg.as_str(), "HEAD"]).cwd(repo),
        )
        .await
        .ok()
        .and_then(|out| out.trim().parse::<u64>().ok());
    match commits {
        Some(commits) => PushMeasurement {
            bytes: Some(commits.saturating_mul(FALLBACK_BYTES_PER_COMMIT)),
            approximate: true,
            commits: Some(commits),
        },
        None => PushMeasurement {
            bytes: None,
            approximate: false,
            commits: None,
        },
    }
}

/// Sum object sizes for a revision range via rev-list + cat-file.
async fn measure_range(exec: &GitExecutor, repo: &Path, range: &str) -> Option<u64> {
    let listing = exec
        .run_stdout(
            GitInvocation::new(["rev-list", "--objects", range])
                .cwd(repo)
                .timeout(HISTORY_SCAN_TIMEOUT),
        )
        .await
        .ok()?;
    let oids: String = listing
        .lines()
        .filter_map(|l| l.split_whitespace().next())
        .fold(String::new(), |mut acc, oid| {
            acc.push_str(oid);
            acc.push('\n');
            acc
        });
    if oids.is_empty() {
        return Some(0);
    }
    let sized = exec
        .run_stdout(
            GitInvocation::new([
                "cat-file",
                "--batch-check=%(objecttype) %(objectname) %(objectsize) %(rest)",
            ])
            .cwd(repo)
            .stdin(oids.into_bytes())
            .timeout(HISTORY_SCAN_TIMEOUT),
        )
        .await
        .ok()?;
    let mut total = 0u64;
    for line in sized.lines() {
        if let Some((_, size, _)) = parse_batch_check_line(line) {
            total = total.saturating_add(size);
        }
    }
    Some(total)
}

/// Union the working-tree and history large-file scans; a file found by
/// both is reported once with both flags set and the larger size.
fn merge_large_files(
    tree: Vec<(String, u64)>,
    history: Vec<(String, u64)>,
) -> Vec<LargeFile> {
    let mut merged: BTreeMap<String, LargeFile> = BTreeMap::new();
    for (path, size) in tree {
        merged.insert(
            path.clone(),
            LargeFile {
                path,
                size_bytes: size,
                in_working_tree: true,
                in_history: false,
            },
        );
    }
    for (path, size) in history {
        merged
            .entry(path.clone())
            .and_modify(|f| {
                f.in_history = true;
                f.size_bytes = f.size_bytes.max(size);
            })
            .or_insert(LargeFile {
                path,
                size_bytes: size,
                in_working_tree: false,
                in_history: true,
            });
    }
    merged.into_values().collect()
}

#[cfg(test)]
#[path = "analyzer_tests.rs"]
mod tests;
