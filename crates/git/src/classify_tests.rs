// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

use super::*;

#[yare::parameterized(
    ssh_publickey = {
        "git@github.com: Permission denied (publickey).\nfatal: Could not read from remote repository.",
        GitErrorKind::AuthenticationFailed,
    },
    https_auth = {
        "fatal: Authentication failed for 'https://github.com/acme/data.git/'",
        GitErrorKind::AuthenticationFailed,
    },
    username_prompt = {
        "fatal: could not read Username for 'https://github.com': terminal prompts disabled",
        GitErrorKind::AuthenticationFailed,
    },
    not_a_repo = {
        "fatal: not a git repository (or any of the parent directories): .git",
        GitErrorKind::NotARepository,
    },
    missing_remote = {
        "fatal: 'origin' does not appear to be a git repository",
        GitErrorKind::NoRemote,
    },
    no_push_destination = {
        "fatal: No configured push destination.",
        GitErrorKind::NoRemote,
    },
    index_lock = {
        "fatal: Unable to create '/repo/.git/index.lock': File exists.",
        GitErrorKind::RepositoryLocked,
    },
    unmerged = {
        "error: The branch 'feature/x' is not fully merged.",
        GitErrorKind::UnmergedChanges,
    },
    dirty = {
        "error: Your local changes to the following files would be overwritten by checkout:",
        GitErrorKind::DirtyWorkTree,
    },
    hung_up = {
        "fatal: the remote end hung up unexpectedly",
        GitErrorKind::RemoteConnection,
    },
    resolve_host = {
        "fatal: unable to access 'https://example.com/repo.git/': Could not resolve host: example.com",
        GitErrorKind::RemoteConnection,
    },
    protected_hook = {
        "remote: error: GH006: Protected branch hook declined.",
        GitErrorKind::PermissionDenied,
    },
    unknown_revision = {
        "fatal: ambiguous argument 'nope': unknown revision or path not in the working tree.",
        GitErrorKind::InvalidRef,
    },
    pack_too_large = {
        "remote: fatal: pack exceeds maximum allowed size (2.00 GiB)",
        GitErrorKind::PushRejected,
    },
    rejected_non_ff = {
        " ! [rejected]        main -> main (non-fast-forward)\nerror: failed to push some refs to 'origin'",
        GitErrorKind::PushRejected,
    },
)]
fn classifies_known_stderr(stderr: &str, expected: GitErrorKind) {
    assert_eq!(classify_stderr(stderr), Some(expected));
}

#[test]
fn unknown_stderr_is_unclassified() {
    assert_eq!(classify_stderr("fatal: something novel went wrong"), None);
    assert_eq!(classify_stderr(""), None);
}

// Order-sensitivity: messages that match a generic rule must first be
// caught by the specific one.

#[test]
fn not_fully_merged_beats_generic_push_rejection() {
    let stderr = "error: The branch 'x' is not fully merged.\nerror: failed to push some refs";
    assert_eq!(classify_stderr(stderr), Some(GitErrorKind::UnmergedChanges));
}

#[test]
fn publickey_denial_beats_generic_permission_rule() {
    let stderr = "git@host: Permission denied (publickey).";
    assert_eq!(
        classify_stderr(stderr),
        Some(GitErrorKind::AuthenticationFailed)
    );
}

#[test]
fn generic_permission_denied_still_classifies() {
    let stderr = "remote: Permission denied to deploy key";
    assert_eq!(classify_stderr(stderr), Some(GitErrorKind::PermissionDenied));
}

#[test]
fn every_rule_pattern_compiles() {
    assert_eq!(table().len(), RULES.len());
}
