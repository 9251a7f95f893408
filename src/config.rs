//! Project configuration loader and retry policy for manifest translation.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::models::{BuildSystem, ManifestDescriptor};
use crate::render::OutputFormat;

const DEFAULT_CONFIG_FILE: &str = "asset-manifest.config.json";

/// Default manifest location, relative to the invocation directory.
pub const DEFAULT_MANIFEST_PATH: &str = "./public/mix-manifest.json";
/// Default number of retries after the first failed existence check.
pub const DEFAULT_RETRIES: u32 = 20;
/// Default delay between existence checks, in seconds.
pub const DEFAULT_RETRY_DELAY_SECS: f64 = 0.25;

/// Environment variable overriding the retry count.
pub const RETRIES_ENV: &str = "ASSET_MANIFEST_RETRIES";
/// Environment variable overriding the retry delay in seconds.
pub const RETRY_DELAY_ENV: &str = "ASSET_MANIFEST_RETRY_DELAY";

/// Bounded polling policy handed to the manifest waiter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
  /// Retries allowed after the first check; total checks are `max_attempts + 1`.
  pub max_attempts: u32,
  /// Fixed delay slept between checks.
  pub delay: Duration,
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self {
      max_attempts: DEFAULT_RETRIES,
      delay: Duration::from_secs_f64(DEFAULT_RETRY_DELAY_SECS),
    }
  }
}

/// Discoverable configuration describing where the manifest lives and how to emit it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
  /// Manifest path, resolved against the invocation directory.
  pub manifest_path: String,
  /// Bundler selector; unknown values behave like `mix`.
  pub build_system: String,
  /// Retries after the first failed existence check.
  pub retries: u32,
  /// Delay between existence checks in seconds.
  pub retry_delay_secs: f64,
  /// Emission format for the normalized entries.
  pub output_format: OutputFormat,
  /// Optional file receiving the rendered output instead of stdout.
  pub output_path: Option<String>,
}

impl Default for BridgeConfig {
  fn default() -> Self {
    Self {
      manifest_path: DEFAULT_MANIFEST_PATH.into(),
      build_system: BuildSystem::Mix.as_str().into(),
      retries: DEFAULT_RETRIES,
      retry_delay_secs: DEFAULT_RETRY_DELAY_SECS,
      output_format: OutputFormat::default(),
      output_path: None,
    }
  }
}

impl BridgeConfig {
  /// Attempt to load configuration from the provided directory.
  ///
  /// A missing or unparsable file falls back to defaults so a bare invocation still works.
  pub fn discover(dir: &Path) -> Self {
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    if !candidate.exists() {
      return Self::default();
    }
    match Self::from_path(&candidate) {
      Ok(config) => config,
      Err(err) => {
        warn!(path = %candidate.display(), error = %err, "ignoring unreadable config");
        Self::default()
      }
    }
  }

  /// Read configuration from a specific JSON file.
  pub fn from_path(path: &Path) -> anyhow::Result<Self> {
    use anyhow::Context;

    let content = fs::read_to_string(path)
      .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
  }

  /// Apply `ASSET_MANIFEST_RETRIES` and `ASSET_MANIFEST_RETRY_DELAY` from the process environment.
  pub fn apply_env(&mut self) {
    self.apply_env_with(|key| std::env::var(key).ok());
  }

  /// Apply environment overrides through an arbitrary lookup. Invalid values are ignored.
  pub fn apply_env_with<F>(&mut self, lookup: F)
  where
    F: Fn(&str) -> Option<String>,
  {
    if let Some(raw) = lookup(RETRIES_ENV) {
      match raw.trim().parse::<u32>() {
        Ok(value) => self.retries = value,
        Err(_) => warn!(variable = RETRIES_ENV, value = %raw, "ignoring invalid retry count"),
      }
    }

    if let Some(raw) = lookup(RETRY_DELAY_ENV) {
      match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => self.retry_delay_secs = value,
        _ => warn!(variable = RETRY_DELAY_ENV, value = %raw, "ignoring invalid retry delay"),
      }
    }
  }

  /// Retry policy derived from the configured count and delay.
  pub fn retry_policy(&self) -> RetryPolicy {
    let delay = Duration::try_from_secs_f64(self.retry_delay_secs)
      .unwrap_or_else(|_| RetryPolicy::default().delay);
    RetryPolicy {
      max_attempts: self.retries,
      delay,
    }
  }

  /// Selected build system.
  pub fn build_system(&self) -> BuildSystem {
    BuildSystem::from_selector(&self.build_system)
  }

  /// Build the immutable descriptor for this invocation.
  pub fn descriptor(&self) -> std::io::Result<ManifestDescriptor> {
    ManifestDescriptor::new(&self.manifest_path, self.build_system())
  }

  /// Output file, when one is configured.
  pub fn output_path(&self) -> Option<PathBuf> {
    self.output_path.as_ref().map(PathBuf::from)
  }
}
