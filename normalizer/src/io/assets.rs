//! Image and icon resolution into native image sources.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use serde_json::Number;

use crate::core::value::{Mapping, OptionValue};
use crate::io::config::AssetEntry;

/// Maps an image reference to its native representation.
///
/// Like color resolvers, implementations must accept their own output.
pub trait AssetResolver: Send + Sync {
    fn resolve(&self, value: &OptionValue) -> Result<OptionValue>;
}

impl<T: AssetResolver + ?Sized> AssetResolver for &T {
    fn resolve(&self, value: &OptionValue) -> Result<OptionValue> {
        (**self).resolve(value)
    }
}

impl<T: AssetResolver + ?Sized> AssetResolver for Arc<T> {
    fn resolve(&self, value: &OptionValue) -> Result<OptionValue> {
        (**self).resolve(value)
    }
}

/// Resolves references against a table of bundled assets.
///
/// - a string or number naming a bundled asset becomes its source mapping
/// - any other string becomes `{ "uri": <string> }`
/// - mappings are already sources and pass through
#[derive(Debug, Clone, Default)]
pub struct BundledAssetResolver {
    assets: BTreeMap<String, AssetEntry>,
}

impl BundledAssetResolver {
    pub fn new(assets: BTreeMap<String, AssetEntry>) -> Self {
        Self { assets }
    }

    fn source(entry: &AssetEntry) -> OptionValue {
        let mut source = Mapping::new();
        source.insert("uri", OptionValue::from(entry.uri.as_str()));
        if let Some(width) = entry.width {
            source.insert("width", OptionValue::from(width));
        }
        if let Some(height) = entry.height {
            source.insert("height", OptionValue::from(height));
        }
        if let Some(scale) = entry.scale.and_then(Number::from_f64) {
            source.insert("scale", OptionValue::Number(scale));
        }
        OptionValue::Mapping(source)
    }
}

impl AssetResolver for BundledAssetResolver {
    fn resolve(&self, value: &OptionValue) -> Result<OptionValue> {
        let bundled = match value {
            OptionValue::String(name) => self.assets.get(name),
            OptionValue::Number(id) => self.assets.get(&id.to_string()),
            _ => None,
        };
        if let Some(entry) = bundled {
            return Ok(Self::source(entry));
        }
        match value {
            OptionValue::String(uri) => {
                let mut source = Mapping::new();
                source.insert("uri", OptionValue::from(uri.as_str()));
                Ok(OptionValue::Mapping(source))
            }
            other => Ok(other.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolver() -> BundledAssetResolver {
        BundledAssetResolver::new(BTreeMap::from([
            (
                "back".to_string(),
                AssetEntry {
                    uri: "images/back.png".to_string(),
                    width: Some(24),
                    height: Some(24),
                    scale: Some(2.0),
                },
            ),
            (
                "12".to_string(),
                AssetEntry {
                    uri: "images/logo.png".to_string(),
                    width: None,
                    height: None,
                    scale: None,
                },
            ),
        ]))
    }

    #[test]
    fn bundled_name_resolves_to_full_source() {
        let resolved = resolver().resolve(&OptionValue::from("back")).expect("resolve");
        assert_eq!(
            resolved,
            OptionValue::from(json!({
                "uri": "images/back.png",
                "width": 24,
                "height": 24,
                "scale": 2.0
            }))
        );
    }

    #[test]
    fn numeric_asset_id_resolves_through_table() {
        let resolved = resolver()
            .resolve(&OptionValue::from(json!(12)))
            .expect("resolve");
        assert_eq!(resolved, OptionValue::from(json!({"uri": "images/logo.png"})));
    }

    #[test]
    fn unknown_string_becomes_uri_source() {
        let resolved = resolver()
            .resolve(&OptionValue::from("https://example.com/a.png"))
            .expect("resolve");
        assert_eq!(
            resolved,
            OptionValue::from(json!({"uri": "https://example.com/a.png"}))
        );
    }

    #[test]
    fn resolving_a_source_again_is_a_no_op() {
        let resolver = resolver();
        for raw in [json!("back"), json!("plain.png"), json!(12), json!(99)] {
            let once = resolver.resolve(&OptionValue::from(raw)).expect("first");
            let twice = resolver.resolve(&once).expect("second");
            assert_eq!(once, twice);
        }
    }
}
