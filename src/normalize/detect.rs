use serde_json::{Map, Value};

use crate::error::ManifestError;
use crate::models::BuildSystem;

/// Concrete manifest layout detected from the build system and the root keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ManifestShape<'a> {
  /// Flat `{source: output}` mapping produced by Mix.
  MixFlat(&'a Map<String, Value>),
  /// Vite dev-server descriptor with a base `url` and an `inputs` mapping.
  ViteDev {
    /// Dev-server origin every input path is appended to.
    url: &'a str,
    /// Arbitrary names mapped to source paths.
    inputs: &'a Map<String, Value>,
  },
  /// Vite production manifest keyed by chunk.
  ViteProd(&'a Map<String, Value>),
  /// Bun metafile keyed by input path.
  BunInputs(&'a Map<String, Value>),
  /// Bun metafile keyed by output file.
  BunOutputs(&'a Map<String, Value>),
  /// Bun manifest without `inputs`/`outputs`, handled like a Mix manifest.
  Fallback(&'a Map<String, Value>),
}

impl ManifestShape<'_> {
  /// Short name used in logs and error messages.
  pub fn name(&self) -> &'static str {
    match self {
      Self::MixFlat(_) => "mix",
      Self::ViteDev { .. } => "vite-dev",
      Self::ViteProd(_) => "vite-prod",
      Self::BunInputs(_) => "bun-inputs",
      Self::BunOutputs(_) => "bun-outputs",
      Self::Fallback(_) => "fallback",
    }
  }
}

/// Pick the shape of `manifest` without converting any entry.
pub fn classify(
  manifest: &Value,
  build_system: BuildSystem,
) -> Result<ManifestShape<'_>, ManifestError> {
  let root = manifest
    .as_object()
    .ok_or_else(|| ManifestError::malformed(format!("expected object root, got {}", kind(manifest))))?;

  let shape = match build_system {
    BuildSystem::Mix => ManifestShape::MixFlat(root),
    BuildSystem::Vite => match (root.get("url"), root.get("inputs")) {
      (Some(url), Some(inputs)) => ManifestShape::ViteDev {
        url: url
          .as_str()
          .ok_or_else(|| ManifestError::malformed(format!("`url` must be a string, got {}", kind(url))))?,
        inputs: expect_object("inputs", inputs)?,
      },
      _ => ManifestShape::ViteProd(root),
    },
    BuildSystem::Bun => {
      if let Some(inputs) = root.get("inputs") {
        ManifestShape::BunInputs(expect_object("inputs", inputs)?)
      } else if let Some(outputs) = root.get("outputs") {
        ManifestShape::BunOutputs(expect_object("outputs", outputs)?)
      } else {
        ManifestShape::Fallback(root)
      }
    }
  };

  Ok(shape)
}

pub(super) fn expect_object<'a>(
  field: &str,
  value: &'a Value,
) -> Result<&'a Map<String, Value>, ManifestError> {
  value
    .as_object()
    .ok_or_else(|| ManifestError::malformed(format!("`{field}` must be an object, got {}", kind(value))))
}

pub(super) fn kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}
