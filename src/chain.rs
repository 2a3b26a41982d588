//! Fallback invocation chain
//!
//! The thin notifier entry point does not deliver alerts itself. It tries a
//! fixed ordered list of candidate executables for the direct notifier and
//! hands the message to the first one that exits successfully. Each attempt
//! gets a short timeout; when every candidate fails the caller reports the
//! failure and delivers nothing.

use crate::Result;
use log::{debug, info};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Per-attempt timeout
pub const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);

/// Name of the direct notifier executable the chain looks for
const DIRECT_BIN: &str = "codevoice-direct";

/// One execution target in the chain
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Program path or bare name resolved through PATH
    pub program: PathBuf,
    /// Short label for reporting
    pub label: &'static str,
}

/// Outcome of running the chain
#[derive(Debug)]
pub enum ChainOutcome {
    /// A candidate succeeded; holds its label and captured stdout
    Delivered { label: &'static str, stdout: String },
    /// Every candidate failed
    Failed,
}

/// Build the ordered candidate list
///
/// 1. The globally installed direct notifier, resolved through PATH.
/// 2. A sibling of the currently running executable.
/// 3. The cargo install location under the home directory.
pub fn default_candidates() -> Vec<Candidate> {
    let mut candidates = vec![Candidate {
        program: PathBuf::from(DIRECT_BIN),
        label: "global install",
    }];

    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            candidates.push(Candidate {
                program: dir.join(DIRECT_BIN),
                label: "sibling executable",
            });
        }
    }

    if let Some(home) = dirs::home_dir() {
        candidates.push(Candidate {
            program: home.join(".cargo").join("bin").join(DIRECT_BIN),
            label: "home install",
        });
    }

    candidates
}

/// Run the chain for a message and optional tone
///
/// Attempts each candidate in order; the first success wins and the rest
/// are skipped. Failures (spawn errors, non-zero exits, timeouts) move on
/// to the next candidate. This never returns an error - total failure is a
/// normal outcome.
pub fn run(candidates: &[Candidate], message: &str, tone: Option<&str>) -> ChainOutcome {
    for candidate in candidates {
        debug!("Trying {} ({:?})", candidate.label, candidate.program);

        let mut cmd = Command::new(&candidate.program);
        cmd.arg(message);
        if let Some(tone) = tone {
            cmd.arg(tone);
        }

        match run_with_timeout(cmd, ATTEMPT_TIMEOUT) {
            Ok(Some(stdout)) => {
                info!("Delivered via {}", candidate.label);
                return ChainOutcome::Delivered {
                    label: candidate.label,
                    stdout,
                };
            }
            Ok(None) => debug!("{} did not succeed", candidate.label),
            Err(e) => debug!("{} failed to run: {}", candidate.label, e),
        }
    }

    ChainOutcome::Failed
}

/// Run a command, waiting up to the timeout
///
/// Returns Ok(Some(stdout)) on a successful exit, Ok(None) on a non-zero
/// exit or timeout (the child is killed), Err on spawn failure.
fn run_with_timeout(mut cmd: Command, timeout: Duration) -> Result<Option<String>> {
    use std::io::Read;

    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::null());

    let mut child = cmd.spawn()?;

    // Drain stdout on a thread while polling below; a candidate writing
    // more than the pipe buffer would otherwise block until the deadline
    // and get misreported as failed
    let mut reader = child.stdout.take().map(|mut pipe| {
        std::thread::spawn(move || {
            let mut stdout = String::new();
            let _ = pipe.read_to_string(&mut stdout);
            stdout
        })
    });

    let deadline = Instant::now() + timeout;

    loop {
        match child.try_wait()? {
            Some(status) => {
                let stdout = reader
                    .take()
                    .and_then(|handle| handle.join().ok())
                    .unwrap_or_default();
                if !status.success() {
                    return Ok(None);
                }
                return Ok(Some(stdout));
            }
            None => {
                if Instant::now() >= deadline {
                    debug!("Attempt timed out, killing child");
                    let _ = child.kill();
                    let _ = child.wait(); // Clean up zombie
                    if let Some(handle) = reader.take() {
                        let _ = handle.join(); // Pipe closed by the kill
                    }
                    return Ok(None);
                }
                std::thread::sleep(Duration::from_millis(50));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_candidates_ordered() {
        let candidates = default_candidates();
        assert!(!candidates.is_empty());
        assert_eq!(candidates[0].label, "global install");
        assert_eq!(candidates[0].program, PathBuf::from(DIRECT_BIN));
    }

    #[test]
    fn test_all_candidates_failing_reports_failure() {
        let candidates = vec![
            Candidate {
                program: PathBuf::from("/nonexistent/notifier-a"),
                label: "global install",
            },
            Candidate {
                program: PathBuf::from("/nonexistent/notifier-b"),
                label: "sibling executable",
            },
        ];
        match run(&candidates, "hello", Some("urgent")) {
            ChainOutcome::Failed => {}
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_first_success_wins() {
        // `true` ignores its arguments and exits zero
        let candidates = vec![
            Candidate {
                program: PathBuf::from("/nonexistent/notifier"),
                label: "global install",
            },
            Candidate {
                program: PathBuf::from("true"),
                label: "sibling executable",
            },
            Candidate {
                program: PathBuf::from("/also/nonexistent"),
                label: "home install",
            },
        ];
        match run(&candidates, "hello", None) {
            ChainOutcome::Delivered { label, .. } => assert_eq!(label, "sibling executable"),
            ChainOutcome::Failed => panic!("expected delivery via `true`"),
        }
    }

    #[test]
    fn test_nonzero_exit_moves_on() {
        let candidates = vec![
            Candidate {
                program: PathBuf::from("false"),
                label: "global install",
            },
            Candidate {
                program: PathBuf::from("true"),
                label: "sibling executable",
            },
        ];
        match run(&candidates, "msg", None) {
            ChainOutcome::Delivered { label, .. } => assert_eq!(label, "sibling executable"),
            ChainOutcome::Failed => panic!("expected fallback to succeed"),
        }
    }
}
