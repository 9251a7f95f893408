use serde_json::{Map, Value};

use crate::error::ManifestError;
use crate::models::AssetEntry;
use crate::normalize::detect::{ManifestShape, expect_object, kind};
use crate::normalize::keys::{strip_mix_prefix, strip_src_prefix};

/// Convert a classified manifest into entries, in the manifest's own key order.
pub fn transform(shape: &ManifestShape<'_>) -> Result<Vec<AssetEntry>, ManifestError> {
  match *shape {
    ManifestShape::MixFlat(root) | ManifestShape::Fallback(root) => flat_entries(root),
    ManifestShape::ViteDev { url, inputs } => vite_dev_entries(url, inputs),
    ManifestShape::ViteProd(root) => vite_prod_entries(root),
    ManifestShape::BunInputs(inputs) => bun_input_entries(inputs),
    ManifestShape::BunOutputs(outputs) => bun_output_entries(outputs),
  }
}

fn flat_entries(root: &Map<String, Value>) -> Result<Vec<AssetEntry>, ManifestError> {
  root
    .iter()
    .map(|(key, value)| {
      expect_str(key, value).map(|output| AssetEntry::new(strip_mix_prefix(key), output))
    })
    .collect()
}

// The logical key drops `src/` but the URL keeps the path the dev server actually serves.
fn vite_dev_entries(
  url: &str,
  inputs: &Map<String, Value>,
) -> Result<Vec<AssetEntry>, ManifestError> {
  inputs
    .iter()
    .map(|(name, value)| {
      expect_str(name, value)
        .map(|path| AssetEntry::new(strip_src_prefix(path), format!("{url}{path}")))
    })
    .collect()
}

fn vite_prod_entries(root: &Map<String, Value>) -> Result<Vec<AssetEntry>, ManifestError> {
  let mut entries = Vec::new();
  for (key, value) in root {
    if key.starts_with('_') {
      continue;
    }

    let chunk = expect_object(key, value)?;
    if !chunk.contains_key("src") {
      continue;
    }

    let file = field_str(key, chunk, "file")?;
    entries.push(AssetEntry::new(strip_src_prefix(key), format!("/{file}")));
  }
  Ok(entries)
}

fn bun_input_entries(inputs: &Map<String, Value>) -> Result<Vec<AssetEntry>, ManifestError> {
  let mut entries = Vec::new();
  for (input, value) in inputs {
    let descriptor = expect_object(input, value)?;
    if !descriptor.contains_key("output") {
      continue;
    }

    let output = field_str(input, descriptor, "output")?;
    entries.push(AssetEntry::new(strip_src_prefix(input), format!("/{output}")));
  }
  Ok(entries)
}

fn bun_output_entries(outputs: &Map<String, Value>) -> Result<Vec<AssetEntry>, ManifestError> {
  let mut entries = Vec::new();
  for (output, value) in outputs {
    let descriptor = expect_object(output, value)?;
    if !descriptor.contains_key("input") {
      continue;
    }

    let input = field_str(output, descriptor, "input")?;
    entries.push(AssetEntry::new(strip_src_prefix(input), format!("/{output}")));
  }
  Ok(entries)
}

fn expect_str<'a>(key: &str, value: &'a Value) -> Result<&'a str, ManifestError> {
  value
    .as_str()
    .ok_or_else(|| ManifestError::malformed(format!("`{key}` must be a string, got {}", kind(value))))
}

fn field_str<'a>(
  key: &str,
  descriptor: &'a Map<String, Value>,
  field: &str,
) -> Result<&'a str, ManifestError> {
  match descriptor.get(field) {
    Some(value) => expect_str(&format!("{key}.{field}"), value),
    None => Err(ManifestError::malformed(format!("`{key}` is missing `{field}`"))),
  }
}
