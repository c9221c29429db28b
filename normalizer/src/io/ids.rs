//! Identifier generation for components that carry no explicit `id`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use tracing::debug;

/// Produces fresh identifiers. `category` is a human-readable label only.
pub trait IdProvider: Send + Sync {
    fn generate(&self, category: &str) -> Result<String>;
}

impl<T: IdProvider + ?Sized> IdProvider for &T {
    fn generate(&self, category: &str) -> Result<String> {
        (**self).generate(category)
    }
}

impl<T: IdProvider + ?Sized> IdProvider for Arc<T> {
    fn generate(&self, category: &str) -> Result<String> {
        (**self).generate(category)
    }
}

/// Counter-based provider: `{category}{n}` with one counter shared by all
/// categories, starting at 1.
#[derive(Debug, Default)]
pub struct SequentialIdProvider {
    next: AtomicU64,
}

impl SequentialIdProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdProvider for SequentialIdProvider {
    fn generate(&self, category: &str) -> Result<String> {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        let id = format!("{category}{n}");
        debug!(%id, "generated id");
        Ok(id)
    }
}
