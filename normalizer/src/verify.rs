//! Idempotence check: run the engine twice and compare.
//!
//! The second pass gets its own store and a fresh id sequence, so generated
//! component ids line up with the first pass. Anything that still differs
//! points at a resolver that does not accept its own output, and any store
//! write issued by the second pass means a payload survived the first.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::core::diff::diff_paths;
use crate::core::value::OptionValue;
use crate::io::config::NormalizerConfig;
use crate::io::ids::SequentialIdProvider;
use crate::io::options_file::load_options;
use crate::io::store::MemoryPropsStore;
use crate::process::default_resolvers;
use crate::processor::OptionsProcessor;

/// Outcome of a two-pass comparison.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VerifyReport {
    /// Paths whose value changed between the first and second pass.
    pub diverged_paths: Vec<String>,
    /// Ids written to the store during the second pass.
    pub repeated_writes: Vec<String>,
}

impl VerifyReport {
    pub fn is_stable(&self) -> bool {
        self.diverged_paths.is_empty() && self.repeated_writes.is_empty()
    }

    /// Human-readable issue list, one line per finding.
    pub fn issues(&self) -> Vec<String> {
        let changed = self
            .diverged_paths
            .iter()
            .map(|path| format!("{path}: changed on second pass"));
        let writes = self
            .repeated_writes
            .iter()
            .map(|id| format!("{id}: props stored again on second pass"));
        changed.chain(writes).collect()
    }
}

pub fn verify_tree(
    tree: &OptionValue,
    component_id: Option<&str>,
    config: &NormalizerConfig,
) -> Result<VerifyReport> {
    let (colors, assets) = default_resolvers(config)?;

    let mut once = tree.clone();
    let first_store = MemoryPropsStore::new();
    OptionsProcessor::new(&first_store, SequentialIdProvider::new(), &colors, &assets)
        .process_options(&mut once, component_id)
        .context("first pass")?;

    let mut twice = once.clone();
    let second_store = MemoryPropsStore::new();
    OptionsProcessor::new(&second_store, SequentialIdProvider::new(), &colors, &assets)
        .process_options(&mut twice, component_id)
        .context("second pass")?;

    let report = VerifyReport {
        diverged_paths: diff_paths(&once, &twice),
        repeated_writes: second_store.snapshot()?.into_keys().collect(),
    };
    if report.is_stable() {
        debug!("options stable under reprocessing");
    } else {
        warn!(
            diverged = report.diverged_paths.len(),
            repeated_writes = report.repeated_writes.len(),
            "options not stable under reprocessing"
        );
    }
    Ok(report)
}

pub fn verify_file(
    path: &Path,
    component_id: Option<&str>,
    config: &NormalizerConfig,
) -> Result<VerifyReport> {
    let tree = load_options(path)?;
    verify_tree(&tree, component_id, config).with_context(|| format!("verify {}", path.display()))
}
