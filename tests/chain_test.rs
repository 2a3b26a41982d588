//! Fallback chain integration tests
//!
//! Exercises the ordered invocation chain with real child processes:
//! scripts that succeed, fail, and echo the arguments they were given.

#![cfg(unix)]

use codevoice::chain::{run, Candidate, ChainOutcome};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("write script");
    let mut perms = fs::metadata(&path).expect("metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod");
    path
}

#[test]
fn test_first_successful_target_receives_arguments() {
    let dir = tempdir().expect("tempdir");
    let script = write_script(dir.path(), "notifier", r#"echo "got: $1 $2""#);

    let candidates = vec![
        Candidate {
            program: PathBuf::from("/nonexistent/notifier"),
            label: "global install",
        },
        Candidate {
            program: script,
            label: "sibling executable",
        },
    ];

    match run(&candidates, "tests failed", Some("worried")) {
        ChainOutcome::Delivered { label, stdout } => {
            assert_eq!(label, "sibling executable");
            assert_eq!(stdout.trim(), "got: tests failed worried");
        }
        ChainOutcome::Failed => panic!("expected the second candidate to deliver"),
    }
}

#[test]
fn test_failing_target_is_skipped() {
    let dir = tempdir().expect("tempdir");
    let bad = write_script(dir.path(), "bad", "exit 3");
    let good = write_script(dir.path(), "good", "echo delivered");

    let candidates = vec![
        Candidate {
            program: bad,
            label: "global install",
        },
        Candidate {
            program: good,
            label: "home install",
        },
    ];

    match run(&candidates, "message", None) {
        ChainOutcome::Delivered { label, stdout } => {
            assert_eq!(label, "home install");
            assert_eq!(stdout.trim(), "delivered");
        }
        ChainOutcome::Failed => panic!("expected fallback delivery"),
    }
}

#[test]
fn test_chatty_candidate_still_delivers() {
    // A candidate emitting far more than a pipe buffer must not stall
    // behind the exit-status poll; its success has to be seen promptly
    // and its full output captured.
    let dir = tempdir().expect("tempdir");
    let chatty = write_script(
        dir.path(),
        "chatty",
        r#"awk 'BEGIN { for (i = 0; i < 5000; i++) print "0123456789012345678901234567890123456789012345678901234567890123" }'"#,
    );

    let candidates = vec![Candidate {
        program: chatty,
        label: "global install",
    }];

    let started = std::time::Instant::now();
    match run(&candidates, "message", None) {
        ChainOutcome::Delivered { stdout, .. } => {
            assert!(stdout.len() > 300_000, "expected full output, got {} bytes", stdout.len());
        }
        ChainOutcome::Failed => panic!("chatty candidate misreported as failed"),
    }
    assert!(
        started.elapsed() < std::time::Duration::from_secs(5),
        "delivery should finish well before the attempt timeout"
    );
}

#[test]
fn test_total_failure_is_not_an_error() {
    let dir = tempdir().expect("tempdir");
    let bad = write_script(dir.path(), "bad", "exit 1");

    let candidates = vec![
        Candidate {
            program: PathBuf::from("/nonexistent/one"),
            label: "global install",
        },
        Candidate {
            program: bad,
            label: "sibling executable",
        },
    ];

    // Must report failure without panicking or returning an error
    match run(&candidates, "message", Some("urgent")) {
        ChainOutcome::Failed => {}
        other => panic!("expected total failure, got {:?}", other),
    }
}
