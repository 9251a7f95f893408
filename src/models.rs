//! Data structures shared between the waiter, the normalizer and the renderers.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Bundler whose manifest shape decides which normalization algorithm applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildSystem {
  /// Laravel Mix style flat `{source: output}` manifests.
  #[default]
  Mix,
  /// Vite production manifests and dev-server descriptors.
  Vite,
  /// Bun build metafiles.
  Bun,
}

impl BuildSystem {
  /// Resolve a selector string. Unknown selectors route to [`BuildSystem::Mix`].
  pub fn from_selector(selector: &str) -> Self {
    match selector.trim().to_ascii_lowercase().as_str() {
      "vite" => Self::Vite,
      "bun" => Self::Bun,
      _ => Self::Mix,
    }
  }

  /// Lowercase selector name.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Mix => "mix",
      Self::Vite => "vite",
      Self::Bun => "bun",
    }
  }
}

impl FromStr for BuildSystem {
  type Err = std::convert::Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(Self::from_selector(s))
  }
}

impl fmt::Display for BuildSystem {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Location and flavour of the manifest processed by a single invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestDescriptor {
  path: PathBuf,
  build_system: BuildSystem,
}

impl ManifestDescriptor {
  /// Build a descriptor, resolving relative paths against the current directory.
  pub fn new(path: impl AsRef<Path>, build_system: BuildSystem) -> std::io::Result<Self> {
    Ok(Self {
      path: std::path::absolute(path.as_ref())?,
      build_system,
    })
  }

  /// Absolute manifest path.
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Selected build system.
  pub fn build_system(&self) -> BuildSystem {
    self.build_system
  }
}

/// A single normalized `(logical key, resolved URL)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetEntry {
  /// Identifier the application uses to request the asset.
  pub logical_key: String,
  /// Public path or URL emitted into rendered output.
  pub resolved_url: String,
}

impl AssetEntry {
  /// Create an entry from owned or borrowed strings.
  pub fn new(logical_key: impl Into<String>, resolved_url: impl Into<String>) -> Self {
    Self {
      logical_key: logical_key.into(),
      resolved_url: resolved_url.into(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn selectors_are_case_insensitive() {
    assert_eq!(BuildSystem::from_selector("VITE"), BuildSystem::Vite);
    assert_eq!(BuildSystem::from_selector(" bun "), BuildSystem::Bun);
    assert_eq!(BuildSystem::from_selector("mix"), BuildSystem::Mix);
  }

  #[test]
  fn unknown_selectors_fall_back_to_mix() {
    assert_eq!(BuildSystem::from_selector("webpack"), BuildSystem::Mix);
    assert_eq!(BuildSystem::from_selector(""), BuildSystem::Mix);
    assert_eq!("esbuild".parse::<BuildSystem>(), Ok(BuildSystem::Mix));
  }

  #[test]
  fn descriptor_resolves_relative_paths() {
    let descriptor =
      ManifestDescriptor::new("public/mix-manifest.json", BuildSystem::Mix).unwrap();
    assert!(descriptor.path().is_absolute());
    assert!(descriptor.path().ends_with("public/mix-manifest.json"));
    assert_eq!(descriptor.build_system(), BuildSystem::Mix);
  }
}
