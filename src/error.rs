//! Error taxonomy for waiting on, reading and normalizing manifests.

use std::path::{Path, PathBuf};

/// Errors surfaced while locating or interpreting a bundler manifest.
#[derive(Debug)]
pub enum ManifestError {
  /// The manifest never appeared before the retry budget ran out.
  Missing {
    /// Absolute path that was polled.
    path: PathBuf,
  },
  /// The JSON tree does not have the shape the selected algorithm expects.
  Malformed {
    /// Manifest path, when the tree came from disk.
    path: Option<PathBuf>,
    /// Description of the mismatch.
    reason: String,
  },
  /// The manifest exists but is not valid JSON.
  Parse {
    /// Path that failed to parse.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
  /// Reading the manifest or writing rendered output failed.
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
}

impl ManifestError {
  pub(crate) fn malformed(reason: impl Into<String>) -> Self {
    Self::Malformed {
      path: None,
      reason: reason.into(),
    }
  }

  /// Attach the manifest path to a [`ManifestError::Malformed`] raised by pure normalization.
  pub fn with_path(self, manifest: &Path) -> Self {
    match self {
      Self::Malformed { path: None, reason } => Self::Malformed {
        path: Some(manifest.to_path_buf()),
        reason,
      },
      other => other,
    }
  }

  /// True for shape mismatches and JSON syntax errors alike; neither is worth retrying.
  pub fn is_malformed(&self) -> bool {
    matches!(self, Self::Malformed { .. } | Self::Parse { .. })
  }
}

impl std::fmt::Display for ManifestError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Missing { path } => {
        write!(f, "manifest not found at {}", path.display())
      }
      Self::Malformed {
        path: Some(path),
        reason,
      } => write!(f, "malformed manifest {}: {}", path.display(), reason),
      Self::Malformed { path: None, reason } => write!(f, "malformed manifest: {}", reason),
      Self::Parse { path, source } => {
        write!(f, "failed to parse {}: {}", path.display(), source)
      }
      Self::Io { path, source } => {
        write!(f, "failed to access {}: {}", path.display(), source)
      }
    }
  }
}

impl std::error::Error for ManifestError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Parse { source, .. } => Some(source),
      Self::Io { source, .. } => Some(source),
      Self::Missing { .. } | Self::Malformed { .. } => None,
    }
  }
}
