// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

//! The three entry points: analyze, plan, push.

use std::path::Path;

use heave_core::recommend;
use heave_engine::{push_in_batches, GitPushTarget, DEFAULT_BATCH_SIZE};
use heave_git::{analyze_repository, branch_state, GitExecutor};

use crate::exit_error::ExitError;
use crate::output;

/// Measure repository and push characteristics.
pub async fn analyze(repo: &Path, json: bool) -> Result<(), ExitError> {
    let exec = GitExecutor::default();
    let stats = analyze_repository(&exec, repo).await?;
    let branch = branch_state(&exec, repo).await?;
    if json {
        let value = serde_json::json!({ "stats": stats, "branch": branch });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{}", output::render_stats(&stats, &branch));
    }
    Ok(())
}

/// Analyze, then recommend a transfer strategy.
pub async fn plan(repo: &Path, json: bool) -> Result<(), ExitError> {
    let exec = GitExecutor::default();
    let stats = analyze_repository(&exec, repo).await?;
    let branch = branch_state(&exec, repo).await?;
    let plan = recommend(&stats, &branch);
    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", output::render_plan(&plan));
    }
    Ok(())
}

/// Execute the chunked push.
pub async fn push(repo: &Path, batch_size: Option<usize>, json: bool) -> Result<(), ExitError> {
    let exec = GitExecutor::default();
    let target = GitPushTarget::new(exec, repo);
    let report = push_in_batches(&target, batch_size.unwrap_or(DEFAULT_BATCH_SIZE)).await?;
    let success = report.success;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", output::render_report(&report));
    }
    if success {
        Ok(())
    } else {
        Err(ExitError::new(1, "no commits could be pushed".to_string()))
    }
}
