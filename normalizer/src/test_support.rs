//! Test-only fakes for the engine's collaborators.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Result, anyhow};
use serde_json::Value;

use crate::core::value::{Mapping, OptionValue};
use crate::io::assets::AssetResolver;
use crate::io::color::ColorResolver;
use crate::io::ids::IdProvider;
use crate::io::store::PropsStore;
use crate::processor::OptionsProcessor;

/// Build an options tree from a `json!` literal.
pub fn tree(value: Value) -> OptionValue {
    OptionValue::from(value)
}

/// Store that records every write in call order.
#[derive(Debug, Default)]
pub struct RecordingStore {
    writes: Mutex<Vec<(String, OptionValue)>>,
}

impl RecordingStore {
    pub fn writes(&self) -> Vec<(String, OptionValue)> {
        self.writes.lock().expect("writes lock").clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().expect("writes lock").len()
    }
}

impl PropsStore for RecordingStore {
    fn set_props_for_id(&self, id: &str, props: OptionValue) -> Result<()> {
        self.writes
            .lock()
            .expect("writes lock")
            .push((id.to_string(), props));
        Ok(())
    }
}

/// Store whose every write fails.
#[derive(Debug, Default)]
pub struct FailingStore;

impl FailingStore {
    pub const MESSAGE: &'static str = "props store unavailable";
}

impl PropsStore for FailingStore {
    fn set_props_for_id(&self, _id: &str, _props: OptionValue) -> Result<()> {
        Err(anyhow!(Self::MESSAGE))
    }
}

/// Id provider whose every request fails.
#[derive(Debug, Default)]
pub struct FailingIds;

impl FailingIds {
    pub const MESSAGE: &'static str = "id provider unavailable";
}

impl IdProvider for FailingIds {
    fn generate(&self, _category: &str) -> Result<String> {
        Err(anyhow!(Self::MESSAGE))
    }
}

/// Color and asset resolver that rejects every value.
#[derive(Debug, Default)]
pub struct FailingResolver;

impl FailingResolver {
    pub const MESSAGE: &'static str = "resolver rejected value";
}

impl ColorResolver for FailingResolver {
    fn resolve(&self, _value: &OptionValue) -> Result<OptionValue> {
        Err(anyhow!(Self::MESSAGE))
    }
}

impl AssetResolver for FailingResolver {
    fn resolve(&self, _value: &OptionValue) -> Result<OptionValue> {
        Err(anyhow!(Self::MESSAGE))
    }
}

/// Id provider returning `generated-{n}` and recording requested categories.
#[derive(Debug, Default)]
pub struct RecordingIds {
    next: AtomicU64,
    categories: Mutex<Vec<String>>,
}

impl RecordingIds {
    pub fn categories(&self) -> Vec<String> {
        self.categories.lock().expect("categories lock").clone()
    }
}

impl IdProvider for RecordingIds {
    fn generate(&self, category: &str) -> Result<String> {
        self.categories
            .lock()
            .expect("categories lock")
            .push(category.to_string());
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(format!("generated-{n}"))
    }
}

/// Resolver that wraps its input as `{ <tag>: input }` and records calls.
#[derive(Debug)]
pub struct TaggingResolver {
    tag: &'static str,
    calls: Mutex<Vec<OptionValue>>,
}

impl TaggingResolver {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<OptionValue> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn tag(&self, value: &OptionValue) -> OptionValue {
        self.calls.lock().expect("calls lock").push(value.clone());
        let mut wrapped = Mapping::new();
        wrapped.insert(self.tag, value.clone());
        OptionValue::Mapping(wrapped)
    }
}

impl ColorResolver for TaggingResolver {
    fn resolve(&self, value: &OptionValue) -> Result<OptionValue> {
        Ok(self.tag(value))
    }
}

impl AssetResolver for TaggingResolver {
    fn resolve(&self, value: &OptionValue) -> Result<OptionValue> {
        Ok(self.tag(value))
    }
}

/// One recording fake per collaborator.
#[derive(Debug)]
pub struct Fakes {
    pub store: RecordingStore,
    pub ids: RecordingIds,
    pub colors: TaggingResolver,
    pub assets: TaggingResolver,
}

impl Default for Fakes {
    fn default() -> Self {
        Self {
            store: RecordingStore::default(),
            ids: RecordingIds::default(),
            colors: TaggingResolver::new("native"),
            assets: TaggingResolver::new("asset"),
        }
    }
}

pub type FakeProcessor<'a> = OptionsProcessor<
    &'a RecordingStore,
    &'a RecordingIds,
    &'a TaggingResolver,
    &'a TaggingResolver,
>;

impl Fakes {
    /// Engine wired to these fakes by reference, so calls stay inspectable.
    pub fn processor(&self) -> FakeProcessor<'_> {
        OptionsProcessor::new(&self.store, &self.ids, &self.colors, &self.assets)
    }
}
