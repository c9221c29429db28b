//! Run the engine over a tree with the default collaborators.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::core::value::OptionValue;
use crate::io::assets::BundledAssetResolver;
use crate::io::color::NativeColorResolver;
use crate::io::config::NormalizerConfig;
use crate::io::ids::SequentialIdProvider;
use crate::io::options_file::load_options;
use crate::io::store::MemoryPropsStore;
use crate::processor::OptionsProcessor;

/// Normalized tree plus every payload routed to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Processed {
    pub options: OptionValue,
    pub props: BTreeMap<String, OptionValue>,
}

/// Build the configured color and asset resolvers.
pub fn default_resolvers(
    config: &NormalizerConfig,
) -> Result<(NativeColorResolver, BundledAssetResolver)> {
    let colors = NativeColorResolver::new(&config.colors).context("build color resolver")?;
    let assets = BundledAssetResolver::new(config.assets.clone());
    Ok((colors, assets))
}

/// Normalize `options` using a fresh store and id sequence.
pub fn process_tree(
    mut options: OptionValue,
    component_id: Option<&str>,
    config: &NormalizerConfig,
) -> Result<Processed> {
    let (colors, assets) = default_resolvers(config)?;
    let store = MemoryPropsStore::new();
    let ids = SequentialIdProvider::new();

    OptionsProcessor::new(&store, &ids, colors, assets)
        .process_options(&mut options, component_id)?;

    let props = store.snapshot()?;
    info!(stored = props.len(), "options normalized");
    Ok(Processed { options, props })
}

/// Load `path` and normalize it.
pub fn process_file(
    path: &Path,
    component_id: Option<&str>,
    config: &NormalizerConfig,
) -> Result<Processed> {
    let options = load_options(path)?;
    process_tree(options, component_id, config)
        .with_context(|| format!("process {}", path.display()))
}
