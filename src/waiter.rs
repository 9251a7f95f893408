//! Bounded polling for a manifest that the bundler may still be writing.

use std::path::Path;
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::RetryPolicy;
use crate::error::ManifestError;

/// Attempt counter owned by a single wait loop.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct RetryState {
  attempts: u32,
}

/// Block until `path` exists, checking the real filesystem and sleeping the calling thread.
pub fn wait_for_manifest(path: &Path, policy: &RetryPolicy) -> Result<(), ManifestError> {
  wait_for_manifest_with(path, policy, |candidate| candidate.exists(), thread::sleep)
}

/// Wait loop with injectable existence check and delay.
///
/// Performs at most `policy.max_attempts + 1` checks and sleeps only between checks.
pub fn wait_for_manifest_with<E, S>(
  path: &Path,
  policy: &RetryPolicy,
  mut exists: E,
  mut sleep: S,
) -> Result<(), ManifestError>
where
  E: FnMut(&Path) -> bool,
  S: FnMut(Duration),
{
  let mut state = RetryState::default();

  loop {
    if exists(path) {
      return Ok(());
    }

    if state.attempts >= policy.max_attempts {
      warn!(
        path = %path.display(),
        attempts = state.attempts,
        "manifest did not appear before retries were exhausted"
      );
      return Err(ManifestError::Missing {
        path: path.to_path_buf(),
      });
    }

    debug!(
      path = %path.display(),
      attempt = state.attempts + 1,
      max_attempts = policy.max_attempts,
      delay = ?policy.delay,
      "manifest not found yet, retrying"
    );
    sleep(policy.delay);
    state.attempts += 1;
  }
}
