// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! heave-engine: the adaptive chunked push.
//!
//! Walks the unpushed commit list oldest-first and pushes it in batches,
//! halving the batch size on size/connection failures and skipping commits
//! that cannot be pushed even alone. Batches run strictly sequentially;
//! pushes to a remote are not commutative. Callers must ensure only one
//! engine run is active per local clone at a time.

pub mod push;
pub mod target;

pub use push::{push_in_batches, PushError, PushReport, SkippedCommit, DEFAULT_BATCH_SIZE};
pub use target::{GitPushTarget, PushPlan, PushTarget};
