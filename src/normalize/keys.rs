/// Strip one leading `/`, then a leading `assets/` segment, from a Mix-style key.
pub fn strip_mix_prefix(key: &str) -> &str {
  let key = key.strip_prefix('/').unwrap_or(key);
  key.strip_prefix("assets/").unwrap_or(key)
}

/// Strip a leading `src/` from a source path.
pub fn strip_src_prefix(path: &str) -> &str {
  path.strip_prefix("src/").unwrap_or(path)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn strips_slash_then_assets() {
    assert_eq!(strip_mix_prefix("/assets/js/app.js"), "js/app.js");
    assert_eq!(strip_mix_prefix("assets/js/app.js"), "js/app.js");
    assert_eq!(strip_mix_prefix("/js/app.js"), "js/app.js");
  }

  #[test]
  fn strips_only_a_single_slash() {
    assert_eq!(strip_mix_prefix("//assets/app.js"), "/assets/app.js");
  }

  #[test]
  fn assets_must_lead_the_key() {
    assert_eq!(strip_mix_prefix("/vendor/assets/app.js"), "vendor/assets/app.js");
    assert_eq!(strip_mix_prefix("/assetsfoo.js"), "assetsfoo.js");
  }

  #[test]
  fn strips_src_prefix_once() {
    assert_eq!(strip_src_prefix("src/app.ts"), "app.ts");
    assert_eq!(strip_src_prefix("src/src/app.ts"), "src/app.ts");
    assert_eq!(strip_src_prefix("lib/src/app.ts"), "lib/src/app.ts");
    assert_eq!(strip_src_prefix("/src/app.ts"), "/src/app.ts");
  }
}
