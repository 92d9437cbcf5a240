// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! heave-git: process boundary to the git binary.
//!
//! Provides the executor (spawn, capture, timeout, cancellation, error
//! classification), branch-state queries, and the concurrent repository
//! analyzer. Everything here is read-only with respect to the repository
//! except for the push invocations issued on behalf of heave-engine.

pub mod analyzer;
pub mod branch;
pub mod classify;
pub mod error;
pub mod executor;
pub mod invocation;
mod parse;

pub use analyzer::{analyze_repository, AnalyzeError};
pub use branch::branch_state;
pub use classify::classify_stderr;
pub use error::GitError;
pub use executor::GitExecutor;
pub use invocation::{GitInvocation, GitOutput, SpawnObserver};
