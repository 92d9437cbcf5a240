// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

//! Ordered stderr classification table.
//!
//! First matching rule wins, so order matters: several git messages are
//! substrings of others (the generic "failed to push some refs" must be
//! tested after the more specific "not fully merged" and dirty-work-tree
//! messages, and ssh's "Permission denied (publickey)" before the generic
//! permission rule). No match means the failure is surfaced unclassified.

use std::sync::OnceLock;

use heave_core::GitErrorKind;
use regex::{Regex, RegexBuilder};

/// Rule table source: (pattern, kind), most specific first.
const RULES: &[(&str, GitErrorKind)] = &[
    // Credentials.
    (
        r"permission denied \((?:publickey|password)",
        GitErrorKind::AuthenticationFailed,
    ),
    (
        r"authentication failed|could not read username|could not read password|invalid credentials",
        GitErrorKind::AuthenticationFailed,
    ),
    // Repository shape.
    (r"not a git repository", GitErrorKind::NotARepository),
    (
        r"does not appear to be a git repository|no configured push destination|no upstream configured|no such remote",
        GitErrorKind::NoRemote,
    ),
    (
        r"index\.lock|unable to create .*\.lock|another git process",
        GitErrorKind::RepositoryLocked,
    ),
    // Work-tree state. Must precede the generic push-rejected rule.
    (
        r"not fully merged|needs merge|unmerged files|unresolved conflict",
        GitErrorKind::UnmergedChanges,
    ),
    (
        r"local changes .* would be overwritten|uncommitted changes|please commit your changes",
        GitErrorKind::DirtyWorkTree,
    ),
    // Network.
    (
        r"could not resolve host|connection (?:timed out|refused|reset)|network is unreachable|remote end hung up|early eof|operation timed out",
        GitErrorKind::RemoteConnection,
    ),
    // Access control on the remote.
    (
        r"permission denied|protected branch hook declined|insufficient permission|access denied",
        GitErrorKind::PermissionDenied,
    ),
    // Refs.
    (
        r"unknown revision|couldn't find remote ref|invalid refspec|not a valid ref|ambiguous argument",
        GitErrorKind::InvalidRef,
    ),
    // Push rejection, generic forms last.
    (
        r"pack exceeds maximum allowed size|exceeds github's file size limit|remote unpack failed|failed to push some refs|\[rejected\]|non-fast-forward|pre-receive hook declined",
        GitErrorKind::PushRejected,
    ),
];

fn table() -> &'static [(Regex, GitErrorKind)] {
    static TABLE: OnceLock<Vec<(Regex, GitErrorKind)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        RULES
            .iter()
            .filter_map(|(pattern, kind)| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .ok()
                    .map(|re| (re, *kind))
            })
            .collect()
    })
}

/// Classify stderr from a non-zero git exit. Returns the first matching
/// rule's kind, or `None` when nothing matches (the caller must surface
/// raw stderr and never guess).
pub fn classify_stderr(stderr: &str) -> Option<GitErrorKind> {
    table()
        .iter()
        .find(|(re, _)| re.is_match(stderr))
        .map(|(_, kind)| *kind)
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
