//! Color resolution into native ARGB integers.

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use anyhow::{Context, Result, anyhow};
use regex::Regex;
use tracing::debug;

use crate::core::value::{Mapping, OptionValue};

/// Maps a color-like value to its native representation.
///
/// Resolvers must accept their own output: the engine may see an already
/// resolved tree again and will call `resolve` on it.
pub trait ColorResolver: Send + Sync {
    fn resolve(&self, value: &OptionValue) -> Result<OptionValue>;
}

impl<T: ColorResolver + ?Sized> ColorResolver for &T {
    fn resolve(&self, value: &OptionValue) -> Result<OptionValue> {
        (**self).resolve(value)
    }
}

impl<T: ColorResolver + ?Sized> ColorResolver for Arc<T> {
    fn resolve(&self, value: &OptionValue) -> Result<OptionValue> {
        (**self).resolve(value)
    }
}

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").expect("valid hex pattern")
});

const BUILTIN_COLORS: &[(&str, u32)] = &[
    ("transparent", 0x0000_0000),
    ("black", 0xFF00_0000),
    ("white", 0xFFFF_FFFF),
    ("gray", 0xFF80_8080),
    ("red", 0xFFFF_0000),
    ("green", 0xFF00_8000),
    ("blue", 0xFF00_00FF),
    ("yellow", 0xFFFF_FF00),
];

/// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` into ARGB.
pub fn parse_hex_color(text: &str) -> Option<u32> {
    let digits = HEX_COLOR.captures(text)?.get(1)?.as_str();
    let expanded: String = match digits.len() {
        3 | 4 => digits.chars().flat_map(|c| [c, c]).collect(),
        _ => digits.to_string(),
    };
    let value = u32::from_str_radix(&expanded, 16).ok()?;
    if expanded.len() == 6 {
        Some(0xFF00_0000 | value)
    } else {
        Some(value.rotate_right(8))
    }
}

/// Resolves color names and hex strings to ARGB integers.
///
/// Numbers are treated as already native. Mappings (per-platform or
/// light/dark color sets) have each entry resolved. Anything unrecognized is
/// passed through unchanged.
#[derive(Debug, Clone, Default)]
pub struct NativeColorResolver {
    named: BTreeMap<String, u32>,
}

impl NativeColorResolver {
    /// Build a resolver with extra named colors (name → hex string).
    pub fn new(named: &BTreeMap<String, String>) -> Result<Self> {
        let named: BTreeMap<String, u32> = named
            .iter()
            .map(|(name, hex)| {
                parse_hex_color(hex)
                    .map(|argb| (name.clone(), argb))
                    .ok_or_else(|| anyhow!("color {hex:?} is not a hex color"))
                    .with_context(|| format!("named color {name}"))
            })
            .collect::<Result<_>>()?;
        Ok(Self { named })
    }

    fn lookup(&self, text: &str) -> Option<u32> {
        if let Some(argb) = self.named.get(text) {
            return Some(*argb);
        }
        let lower = text.to_ascii_lowercase();
        BUILTIN_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, argb)| *argb)
            .or_else(|| parse_hex_color(text))
    }
}

impl ColorResolver for NativeColorResolver {
    fn resolve(&self, value: &OptionValue) -> Result<OptionValue> {
        match value {
            OptionValue::String(text) => match self.lookup(text) {
                Some(argb) => Ok(OptionValue::from(argb)),
                None => {
                    debug!(color = %text, "unrecognized color left as is");
                    Ok(value.clone())
                }
            },
            OptionValue::Mapping(map) => {
                let resolved = map
                    .iter()
                    .map(|(key, entry)| Ok((key.to_string(), self.resolve(entry)?)))
                    .collect::<Result<Mapping>>()?;
                Ok(OptionValue::Mapping(resolved))
            }
            other => Ok(other.clone()),
        }
    }
}
