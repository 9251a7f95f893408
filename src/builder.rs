//! Manifest translation orchestrator: wait for the manifest, normalize it and render the result.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::RetryPolicy;
use crate::error::ManifestError;
use crate::models::{AssetEntry, ManifestDescriptor};
use crate::normalize::{classify, transform};
use crate::render::{OutputFormat, render};
use crate::waiter::wait_for_manifest;

/// Inputs for a single translation run.
#[derive(Debug, Clone)]
pub struct BridgeContext {
  /// Manifest location and bundler.
  pub descriptor: ManifestDescriptor,
  /// Polling policy applied before the manifest is read.
  pub retry_policy: RetryPolicy,
  /// Emission format for the rendered output.
  pub output_format: OutputFormat,
}

/// Everything produced by a successful run.
#[derive(Debug, Clone)]
pub struct BridgeArtifacts {
  /// Normalized entries in manifest order.
  pub entries: Vec<AssetEntry>,
  /// Entries rendered in the requested format.
  pub rendered: String,
  /// Paths that should trigger rerunning a build script when changed.
  pub rerun_paths: Vec<PathBuf>,
}

/// High-level helper translating one bundler manifest.
pub struct ManifestBridge {
  context: BridgeContext,
}

impl ManifestBridge {
  /// Create a bridge for the provided context.
  pub fn new(context: BridgeContext) -> Self {
    Self { context }
  }

  /// Wait for the manifest, normalize it and render the entries.
  pub fn run(&self) -> Result<BridgeArtifacts> {
    let entries = self.load_entries()?;
    let rendered = render(&entries, self.context.output_format)
      .context("failed to render normalized manifest")?;

    Ok(BridgeArtifacts {
      entries,
      rendered,
      rerun_paths: vec![self.context.descriptor.path().to_path_buf()],
    })
  }

  /// Wait for the manifest and normalize it without rendering.
  pub fn load_entries(&self) -> Result<Vec<AssetEntry>, ManifestError> {
    let descriptor = &self.context.descriptor;
    let path = descriptor.path();

    wait_for_manifest(path, &self.context.retry_policy)?;
    let manifest = read_manifest(path)?;

    let shape = classify(&manifest, descriptor.build_system()).map_err(|err| err.with_path(path))?;
    debug!(path = %path.display(), shape = shape.name(), "classified manifest");

    let entries = transform(&shape).map_err(|err| err.with_path(path))?;
    info!(
      path = %path.display(),
      build_system = %descriptor.build_system(),
      entries = entries.len(),
      "normalized asset manifest"
    );
    Ok(entries)
  }
}

/// Read and parse a manifest that is known to exist.
pub fn read_manifest(path: &Path) -> Result<Value, ManifestError> {
  let content = fs::read_to_string(path).map_err(|source| ManifestError::Io {
    path: path.to_path_buf(),
    source,
  })?;
  serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
    path: path.to_path_buf(),
    source,
  })
}

/// Write `contents` to `path` unless the file already holds exactly that text.
///
/// Returns `true` when the file was written. Leaving unchanged output alone keeps
/// downstream incremental builds from recompiling.
pub fn write_output(path: &Path, contents: &str) -> Result<bool, ManifestError> {
  let io_error = |source| ManifestError::Io {
    path: path.to_path_buf(),
    source,
  };

  match fs::read_to_string(path) {
    Ok(existing) if existing == contents => {
      debug!(path = %path.display(), "output unchanged, skipping write");
      return Ok(false);
    }
    Ok(_) => {}
    Err(err) if err.kind() == ErrorKind::NotFound => {}
    Err(err) => return Err(io_error(err)),
  }

  if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
    fs::create_dir_all(parent).map_err(io_error)?;
  }
  fs::write(path, contents).map_err(io_error)?;
  Ok(true)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::BuildSystem;
  use std::time::Duration;
  use tempfile::tempdir;

  fn bridge(path: &Path, build_system: BuildSystem, format: OutputFormat) -> ManifestBridge {
    ManifestBridge::new(BridgeContext {
      descriptor: ManifestDescriptor::new(path, build_system).unwrap(),
      retry_policy: RetryPolicy {
        max_attempts: 2,
        delay: Duration::ZERO,
      },
      output_format: format,
    })
  }

  #[test]
  fn translates_vite_manifest_into_rust_lookup() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("manifest.json");
    fs::write(
      &path,
      r#"{
        "_vendor-1.js": { "file": "assets/vendor-1.js" },
        "src/app.ts": { "src": "src/app.ts", "file": "assets/app-abc123.js", "isEntry": true }
      }"#,
    )?;

    let artifacts = bridge(&path, BuildSystem::Vite, OutputFormat::Rust).run()?;

    assert_eq!(artifacts.entries, vec![AssetEntry::new("app.ts", "/assets/app-abc123.js")]);
    assert!(
      artifacts
        .rendered
        .contains(r#""app.ts" => Some("/assets/app-abc123.js"),"#)
    );
    assert_eq!(artifacts.rerun_paths, vec![path]);
    Ok(())
  }

  #[test]
  fn missing_manifest_is_reported_after_retries() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mix-manifest.json");

    let err = bridge(&path, BuildSystem::Mix, OutputFormat::Lines)
      .load_entries()
      .unwrap_err();
    match err {
      ManifestError::Missing { path: missing } => assert_eq!(missing, path),
      other => panic!("expected missing manifest, got {other:?}"),
    }
  }

  #[test]
  fn invalid_json_is_a_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mix-manifest.json");
    fs::write(&path, "{ not json").unwrap();

    let err = bridge(&path, BuildSystem::Mix, OutputFormat::Lines)
      .load_entries()
      .unwrap_err();
    assert!(matches!(err, ManifestError::Parse { .. }));
    assert!(err.is_malformed());
  }

  #[test]
  fn malformed_errors_name_the_manifest() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mix-manifest.json");
    fs::write(&path, r#"["/js/app.js"]"#).unwrap();

    let err = bridge(&path, BuildSystem::Mix, OutputFormat::Lines)
      .run()
      .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("mix-manifest.json"), "{message}");
    assert!(message.contains("expected object root"), "{message}");
  }

  #[test]
  fn write_output_skips_unchanged_files() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("generated/assets.rs");

    assert!(write_output(&path, "first")?);
    assert!(!write_output(&path, "first")?);
    assert!(write_output(&path, "second")?);
    assert_eq!(fs::read_to_string(&path)?, "second");
    Ok(())
  }
}
