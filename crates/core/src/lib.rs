// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! heave-core: data model and strategy selection for the heave push
//! orchestrator. Pure types and pure functions only; all I/O lives in
//! heave-git and heave-engine.

pub mod branch;
pub mod error;
pub mod fmt;
pub mod stats;
pub mod strategy;

pub use branch::{BranchState, BranchStatus};
pub use error::GitErrorKind;
pub use fmt::{format_bytes, format_duration};
pub use stats::{LargeFile, RepositoryStats};
pub use strategy::{recommend, StrategyKind, StrategyOption, StrategyPlan};
