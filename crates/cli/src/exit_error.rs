// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

//! Error type carrying a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`,
//! so `main()` owns process termination.

use heave_core::GitErrorKind;
use heave_engine::PushError;
use heave_git::{AnalyzeError, GitError};

#[derive(Debug)]
pub struct ExitError {
    pub code: u8,
    pub message: String,
}

impl ExitError {
    pub fn new(code: u8, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Missing binary maps to 127 (command not found); everything else to 1.
fn code_for_kind(kind: Option<GitErrorKind>) -> u8 {
    match kind {
        Some(GitErrorKind::ToolNotFound) => 127,
        _ => 1,
    }
}

impl From<GitError> for ExitError {
    fn from(e: GitError) -> Self {
        Self::new(code_for_kind(e.kind()), e.to_string())
    }
}

impl From<AnalyzeError> for ExitError {
    fn from(e: AnalyzeError) -> Self {
        Self::new(1, e.to_string())
    }
}

impl From<PushError> for ExitError {
    fn from(e: PushError) -> Self {
        let code = match &e {
            PushError::Plan(source) => code_for_kind(source.kind()),
            PushError::Aborted { source, .. } => code_for_kind(source.kind()),
        };
        Self::new(code, e.to_string())
    }
}

impl From<serde_json::Error> for ExitError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(1, format!("cannot serialize output: {e}"))
    }
}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
