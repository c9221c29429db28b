//! Normalizer configuration stored in `normalizer.toml`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::io::color::parse_hex_color;

pub const DEFAULT_CONFIG_FILE: &str = "normalizer.toml";

/// Normalizer configuration (TOML).
///
/// Every field is optional; a missing file yields the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Pretty-print JSON written by the CLI.
    pub pretty: bool,

    /// Extra named colors (name → `#rrggbb` style hex).
    pub colors: BTreeMap<String, String>,

    /// Bundled assets, keyed by name or numeric asset id.
    pub assets: BTreeMap<String, AssetEntry>,
}

/// One bundled image source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssetEntry {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            colors: BTreeMap::new(),
            assets: BTreeMap::new(),
        }
    }
}

impl NormalizerConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, hex) in &self.colors {
            if parse_hex_color(hex).is_none() {
                return Err(anyhow!("colors.{name} must be a hex color, got {hex:?}"));
            }
        }
        for (name, asset) in &self.assets {
            if asset.uri.trim().is_empty() {
                return Err(anyhow!("assets.{name}.uri must be non-empty"));
            }
            if asset.scale.is_some_and(|scale| scale <= 0.0) {
                return Err(anyhow!("assets.{name}.scale must be > 0"));
            }
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `NormalizerConfig::default()`.
pub fn load_config(path: &Path) -> Result<NormalizerConfig> {
    if !path.exists() {
        return Ok(NormalizerConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: NormalizerConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &NormalizerConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, NormalizerConfig::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("nested").join("normalizer.toml");
        let mut cfg = NormalizerConfig::default();
        cfg.colors.insert("brand".to_string(), "#3366ff".to_string());
        cfg.assets.insert(
            "back".to_string(),
            AssetEntry {
                uri: "images/back.png".to_string(),
                width: Some(24),
                height: Some(24),
                scale: Some(2.0),
            },
        );
        write_config(&path, &cfg).expect("write");
        assert_eq!(load_config(&path).expect("load"), cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("normalizer.toml");
        fs::write(&path, "[colors]\nbrand = \"#123\"\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert!(cfg.pretty);
        assert_eq!(cfg.colors.get("brand").map(String::as_str), Some("#123"));
    }

    #[test]
    fn rejects_bad_color_and_empty_uri() {
        let mut cfg = NormalizerConfig::default();
        cfg.colors.insert("brand".to_string(), "blueish".to_string());
        assert!(cfg.validate().is_err());

        let mut cfg = NormalizerConfig::default();
        cfg.assets.insert(
            "x".to_string(),
            AssetEntry {
                uri: " ".to_string(),
                width: None,
                height: None,
                scale: None,
            },
        );
        let err = cfg.validate().expect_err("empty uri");
        assert!(err.to_string().contains("assets.x.uri"));
    }

    #[test]
    fn invalid_file_error_names_the_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("normalizer.toml");
        fs::write(&path, "pretty = \"yes\"\n").expect("write");
        let err = load_config(&path).expect_err("bad type");
        assert!(format!("{err:#}").contains("normalizer.toml"));
    }
}
