// SPDX-License-Identifier: MIT
// Copyright (c) 2026 heave contributors

//! Chunked push engine specs against a scripted remote.

use heave_core::GitErrorKind;
use heave_engine::{push_in_batches, PushError};

use crate::support::FakeRemote;

#[tokio::test]
async fn clean_run_pushes_in_fixed_batches() {
    let remote = FakeRemote::new(100);
    let report = push_in_batches(&remote, 25).await.unwrap();

    assert!(report.success);
    assert_eq!(report.pushed, 100);
    assert!(report.skipped.is_empty());
    assert_eq!(remote.batch_lens(), vec![25, 25, 25, 25]);
    let finals: Vec<_> = remote.attempts().iter().map(|a| a.commit.clone()).collect();
    assert_eq!(finals, vec!["c024", "c049", "c074", "c099"]);
    assert_eq!(report.message, "pushed 100 commits");
}

#[tokio::test]
async fn halves_until_the_remote_accepts_and_stays_small() {
    let remote = FakeRemote::new(40).with_max_batch(5);
    let report = push_in_batches(&remote, 32).await.unwrap();

    assert!(report.success);
    assert_eq!(report.pushed, 40);
    // 32, 16, 8 rejected; 4 accepted and never grows back.
    let lens = remote.batch_lens();
    assert_eq!(&lens[..4], &[32, 16, 8, 4]);
    assert!(lens[3..].iter().all(|&l| l == 4));
}

#[tokio::test]
async fn poison_commit_is_skipped_and_the_rest_lands() {
    let remote = FakeRemote::new(20).with_poison("c006");
    let report = push_in_batches(&remote, 16).await.unwrap();

    assert!(report.success);
    assert_eq!(report.pushed, 19);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].commit, "c006");
    assert_eq!(report.skipped[0].kind, Some(GitErrorKind::PushRejected));
    assert!(report.message.contains("skipped 1"));
}

#[tokio::test]
async fn every_commit_unpushable_is_not_success() {
    let remote = FakeRemote::new(3).with_max_batch(0);
    let report = push_in_batches(&remote, 2).await.unwrap();

    assert!(!report.success);
    assert_eq!(report.pushed, 0);
    assert_eq!(report.skipped.len(), 3);
}

#[tokio::test]
async fn fatal_failure_aborts_but_keeps_progress() {
    let remote = FakeRemote::new(10).with_fatal_at("c004");
    let err = push_in_batches(&remote, 2).await.unwrap_err();

    match err {
        PushError::Aborted { source, pushed, skipped } => {
            assert_eq!(source.kind(), Some(GitErrorKind::AuthenticationFailed));
            assert_eq!(pushed, 4);
            assert!(skipped.is_empty());
        }
        other => panic!("expected Aborted, got {other:?}"),
    }
}

#[tokio::test]
async fn upstream_is_established_exactly_once() {
    let remote = FakeRemote::new(5).without_upstream();
    let report = push_in_batches(&remote, 2).await.unwrap();

    assert!(report.success);
    let flags: Vec<_> = remote.attempts().iter().map(|a| a.set_upstream).collect();
    assert_eq!(flags, vec![true, false, false]);
}

#[tokio::test]
async fn nothing_to_push_is_trivial_success() {
    let remote = FakeRemote::new(0);
    let report = push_in_batches(&remote, 25).await.unwrap();

    assert!(report.success);
    assert_eq!(report.pushed, 0);
    assert_eq!(report.message, "nothing to push");
    assert!(remote.attempts().is_empty());
}
