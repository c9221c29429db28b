//! JSON load/save helpers for options trees and props snapshots.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::value::OptionValue;

/// Read and parse an options tree from a JSON file.
pub fn load_options(path: &Path) -> Result<OptionValue> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read options {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parse options {}", path.display()))
}

/// Serialize `value` to JSON with a trailing newline.
pub fn render_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let mut payload = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("serialize json")?;
    payload.push('\n');
    Ok(payload)
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, pretty: bool) -> Result<()> {
    let payload = render_json(value, pretty)?;
    fs::write(path, payload).with_context(|| format!("write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn write_then_load_keeps_key_order() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("options.json");
        let tree = OptionValue::from(json!({"topBar": {"visible": true}, "bottomTabs": {}}));

        write_json(&path, &tree, true).expect("write");
        let loaded = load_options(&path).expect("load");

        assert_eq!(loaded, tree);
        assert_eq!(
            loaded.as_mapping().expect("mapping").keys().collect::<Vec<_>>(),
            vec!["topBar", "bottomTabs"]
        );
    }

    #[test]
    fn compact_rendering_has_trailing_newline() {
        let tree = OptionValue::from(json!({"a": 1}));
        assert_eq!(render_json(&tree, false).expect("render"), "{\"a\":1}\n");
    }

    #[test]
    fn malformed_file_error_names_the_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("broken.json");
        fs::write(&path, "{not json").expect("write");
        let err = load_options(&path).expect_err("parse failure");
        assert!(format!("{err:#}").contains("broken.json"));
    }
}
