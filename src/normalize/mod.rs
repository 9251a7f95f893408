//! Manifest shape detection and normalization into ordered asset entries.
//!
//! Detection and transformation live in separate submodules so each bundler shape can be
//! classified and converted independently. [`normalize`] simply chains the two.

mod detect;
mod keys;
mod transform;

use serde_json::Value;

use crate::error::ManifestError;
use crate::models::{AssetEntry, BuildSystem};

pub use detect::{ManifestShape, classify};
pub use keys::{strip_mix_prefix, strip_src_prefix};
pub use transform::transform;

/// Classify `manifest` for `build_system` and convert it into ordered entries.
///
/// Either every entry is produced or an error is returned; there is no partial output.
pub fn normalize(
  manifest: &Value,
  build_system: BuildSystem,
) -> Result<Vec<AssetEntry>, ManifestError> {
  let shape = classify(manifest, build_system)?;
  transform(&shape)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn mix_keys_drop_leading_slash_and_assets_segment() {
    let manifest = json!({ "/assets/js/app.js": "/assets/js/app.js?id=abc" });
    let entries = normalize(&manifest, BuildSystem::Mix).unwrap();
    assert_eq!(entries, vec![AssetEntry::new("js/app.js", "/assets/js/app.js?id=abc")]);
  }

  #[test]
  fn vite_production_skips_shared_chunks() {
    let manifest = json!({
      "_shared-chunk.js": { "file": "assets/shared-123.js" },
      "src/app.ts": { "src": "app.ts", "file": "assets/app-abc123.js" }
    });
    let entries = normalize(&manifest, BuildSystem::Vite).unwrap();
    assert_eq!(entries, vec![AssetEntry::new("app.ts", "/assets/app-abc123.js")]);
  }

  #[test]
  fn vite_dev_server_joins_original_path_onto_base_url() {
    let manifest = json!({
      "url": "http://localhost:5173/",
      "inputs": { "main": "src/app.ts" }
    });
    let entries = normalize(&manifest, BuildSystem::Vite).unwrap();
    assert_eq!(entries, vec![AssetEntry::new(
      "app.ts",
      "http://localhost:5173/src/app.ts"
    )]);
  }

  #[test]
  fn bun_inputs_and_outputs_agree() {
    let inputs = json!({ "inputs": { "src/app.ts": { "output": "app-xyz.js" } } });
    let outputs = json!({ "outputs": { "app-xyz.js": { "input": "src/app.ts" } } });
    let expected = vec![AssetEntry::new("app.ts", "/app-xyz.js")];

    assert_eq!(normalize(&inputs, BuildSystem::Bun).unwrap(), expected);
    assert_eq!(normalize(&outputs, BuildSystem::Bun).unwrap(), expected);
  }

  #[test]
  fn normalizing_twice_yields_identical_sequences() {
    let manifest = json!({
      "/assets/css/app.css": "/assets/css/app.css?id=1",
      "/js/app.js": "/js/app.js?id=2",
      "/assets/img/logo.svg": "/assets/img/logo.svg"
    });
    let first = normalize(&manifest, BuildSystem::Mix).unwrap();
    let second = normalize(&manifest, BuildSystem::Mix).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
  }

  #[test]
  fn preserves_source_iteration_order() {
    let manifest: Value =
      serde_json::from_str(r#"{"/z.js": "/z.js", "/a.js": "/a.js", "/m.js": "/m.js"}"#).unwrap();
    let keys: Vec<String> = normalize(&manifest, BuildSystem::Mix)
      .unwrap()
      .into_iter()
      .map(|entry| entry.logical_key)
      .collect();
    assert_eq!(keys, vec!["z.js", "a.js", "m.js"]);
  }

  #[test]
  fn array_manifests_fail_for_every_build_system() {
    let manifest = json!([{ "file": "app.js" }]);
    for build_system in [BuildSystem::Mix, BuildSystem::Vite, BuildSystem::Bun] {
      let err = normalize(&manifest, build_system).unwrap_err();
      assert!(err.is_malformed(), "{build_system} should reject arrays");
    }
  }

  #[test]
  fn one_bad_entry_fails_the_whole_pass() {
    let manifest = json!({ "/app.js": "/app.js", "/broken.js": 42 });
    assert!(normalize(&manifest, BuildSystem::Mix).is_err());
  }
}
