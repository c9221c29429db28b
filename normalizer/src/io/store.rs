//! Props store: where extracted `passProps` payloads live after processing.
//!
//! The engine only writes. Reading props back is the concern of whoever owns
//! the store; [`MemoryPropsStore`] exposes `get` and `snapshot` for that.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Result, anyhow};
use tracing::debug;

use crate::core::value::OptionValue;

/// Persists prop payloads keyed by component or button identifier.
///
/// Implementations take `&self` and must be safe to share between
/// concurrent calls; the engine performs no locking of its own.
pub trait PropsStore: Send + Sync {
    /// Store `props` under `id`, replacing any previous payload.
    fn set_props_for_id(&self, id: &str, props: OptionValue) -> Result<()>;
}

impl<T: PropsStore + ?Sized> PropsStore for &T {
    fn set_props_for_id(&self, id: &str, props: OptionValue) -> Result<()> {
        (**self).set_props_for_id(id, props)
    }
}

impl<T: PropsStore + ?Sized> PropsStore for Arc<T> {
    fn set_props_for_id(&self, id: &str, props: OptionValue) -> Result<()> {
        (**self).set_props_for_id(id, props)
    }
}

/// In-process store backed by a mutex-guarded ordered map.
#[derive(Debug, Default)]
pub struct MemoryPropsStore {
    props: Mutex<BTreeMap<String, OptionValue>>,
}

impl MemoryPropsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Result<Option<OptionValue>> {
        Ok(self.lock()?.get(id).cloned())
    }

    /// Number of stored ids.
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    /// Copy of every stored payload, ordered by id.
    pub fn snapshot(&self) -> Result<BTreeMap<String, OptionValue>> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, OptionValue>>> {
        self.props
            .lock()
            .map_err(|_| anyhow!("props store lock poisoned"))
    }
}

impl PropsStore for MemoryPropsStore {
    fn set_props_for_id(&self, id: &str, props: OptionValue) -> Result<()> {
        let replaced = self.lock()?.insert(id.to_string(), props).is_some();
        debug!(id, replaced, "stored props");
        Ok(())
    }
}
