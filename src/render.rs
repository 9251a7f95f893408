//! Emission of normalized entries as generated Rust source, JSON or plain lines.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::models::AssetEntry;

/// Output form written by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  /// Rust source defining an `asset_url` lookup function.
  #[default]
  Rust,
  /// Pretty-printed JSON object from logical key to URL.
  Json,
  /// One tab-separated `key	url` line per entry.
  Lines,
}

/// Render `entries` in the requested format.
pub fn render(entries: &[AssetEntry], format: OutputFormat) -> serde_json::Result<String> {
  match format {
    OutputFormat::Rust => Ok(render_rust_lookup(entries)),
    OutputFormat::Json => render_json(entries),
    OutputFormat::Lines => Ok(render_lines(entries)),
  }
}

/// Collapse duplicate keys so later entries overwrite earlier ones, keeping first-seen order.
fn lookup_table(entries: &[AssetEntry]) -> Map<String, Value> {
  let mut table = Map::new();
  for entry in entries {
    table.insert(
      entry.logical_key.clone(),
      Value::String(entry.resolved_url.clone()),
    );
  }
  table
}

fn render_rust_lookup(entries: &[AssetEntry]) -> String {
  let match_arms: Vec<String> = lookup_table(entries)
    .iter()
    .filter_map(|(key, url)| {
      url
        .as_str()
        .map(|url| format!("        {:?} => Some({:?}),", key, url))
    })
    .collect();

  let match_body = if match_arms.is_empty() {
    "        _ => None,".to_string()
  } else {
    format!("{}\n        _ => None,", match_arms.join("\n"))
  };

  format!(
    r#"// Generated at build time by asset-manifest-bridge

/// Resolve a logical asset path to its public URL.
#[allow(dead_code)]
pub fn asset_url(logical_key: &str) -> Option<&'static str> {{
    match logical_key {{
{}
    }}
}}
"#,
    match_body
  )
}

fn render_json(entries: &[AssetEntry]) -> serde_json::Result<String> {
  let mut rendered = serde_json::to_string_pretty(&Value::Object(lookup_table(entries)))?;
  rendered.push('\n');
  Ok(rendered)
}

fn render_lines(entries: &[AssetEntry]) -> String {
  entries
    .iter()
    .map(|entry| format!("{}\t{}\n", entry.logical_key, entry.resolved_url))
    .collect()
}
