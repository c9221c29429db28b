//! Options-tree traversal engine.
//!
//! Walks a caller-owned [`OptionValue`] tree and rewrites it in place. At every
//! mapping entry (and every sequence element, keyed by its index) the rules run
//! in a fixed order:
//!
//! 1. color: `color` / `*Color` keys, including explicit `null`
//! 2. stop here if the value is now falsy
//! 3. props extraction: root-level `passProps` when an owner id was given
//! 4. component: `component` nodes get a `componentId`, their props are stored
//! 5. image: `icon` / `image` / `*Icon` / `*Image` keys
//! 6. buttons: `*Buttons` descriptors with both `id` and `passProps`
//! 7. descend into mappings and sequences, except under `passProps`
//!
//! Malformed input is skipped silently. Collaborator errors propagate as-is.

use anyhow::Result;
use tracing::{debug, instrument, trace};

use crate::core::keys::{
    COMPONENT, COMPONENT_ID, CUSTOM_COMPONENT_CATEGORY, ID, NO_COLOR, PASS_PROPS, is_buttons_key,
    is_color_key, is_image_key,
};
use crate::core::value::{Field, OptionValue};
use crate::io::assets::AssetResolver;
use crate::io::color::ColorResolver;
use crate::io::ids::IdProvider;
use crate::io::store::PropsStore;

/// Traversal engine with its collaborators injected at construction.
#[derive(Debug, Clone)]
pub struct OptionsProcessor<S, I, C, A> {
    store: S,
    ids: I,
    colors: C,
    assets: A,
}

impl<S, I, C, A> OptionsProcessor<S, I, C, A>
where
    S: PropsStore,
    I: IdProvider,
    C: ColorResolver,
    A: AssetResolver,
{
    pub fn new(store: S, ids: I, colors: C, assets: A) -> Self {
        Self {
            store,
            ids,
            colors,
            assets,
        }
    }

    /// Normalize `options` in place.
    ///
    /// `component_id` names the owner of a `passProps` key sitting directly on
    /// the root; nested nodes never see it.
    #[instrument(skip_all, fields(component_id = component_id.unwrap_or_default()))]
    pub fn process_options(
        &self,
        options: &mut OptionValue,
        component_id: Option<&str>,
    ) -> Result<()> {
        self.process_node(options, component_id)
    }

    fn process_node(&self, node: &mut OptionValue, owner: Option<&str>) -> Result<()> {
        match node {
            OptionValue::Mapping(map) => {
                for (key, value) in map.iter_mut() {
                    self.process_entry(key, value, owner)?;
                }
            }
            OptionValue::Sequence(items) => {
                for (index, item) in items.iter_mut().enumerate() {
                    self.process_entry(&index.to_string(), item, owner)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn process_entry(&self, key: &str, value: &mut OptionValue, owner: Option<&str>) -> Result<()> {
        self.apply_color(key, value)?;

        if !value.is_truthy() {
            return Ok(());
        }

        self.extract_props(key, value, owner)?;
        self.apply_component(key, value)?;
        self.apply_image(key, value)?;
        self.extract_button_props(key, value)?;

        if key != PASS_PROPS && value.is_container() {
            self.process_node(value, None)?;
        }
        Ok(())
    }

    /// Explicit `null` becomes [`NO_COLOR`]; any other value goes through the
    /// resolver. An `Unset` slot is absence rather than a color value and is
    /// skipped; parsed input never contains one, only engine-cleared fields
    /// or trees built in code do.
    fn apply_color(&self, key: &str, value: &mut OptionValue) -> Result<()> {
        if !is_color_key(key) {
            return Ok(());
        }
        match value.field() {
            Field::Unset => {}
            Field::ExplicitNull => {
                trace!(key, "null color");
                *value = OptionValue::from(NO_COLOR);
            }
            Field::Value(raw) => {
                let resolved = self.colors.resolve(raw)?;
                trace!(key, "resolved color");
                *value = resolved;
            }
        }
        Ok(())
    }

    fn extract_props(&self, key: &str, value: &mut OptionValue, owner: Option<&str>) -> Result<()> {
        let Some(owner) = owner.filter(|id| !id.is_empty()) else {
            return Ok(());
        };
        if key != PASS_PROPS || !value.is_truthy() {
            return Ok(());
        }
        self.store.set_props_for_id(owner, value.take())?;
        debug!(component_id = owner, "extracted passProps");
        Ok(())
    }

    fn apply_component(&self, key: &str, value: &mut OptionValue) -> Result<()> {
        if key != COMPONENT {
            return Ok(());
        }
        let Some(node) = value.as_mapping_mut() else {
            return Ok(());
        };
        // A truthy `id` is copied as-is; the store is keyed by its text form.
        let (component_id, id) = match node.get(ID).filter(|id| id.is_truthy()) {
            Some(explicit) => (explicit.clone(), explicit.store_key()),
            None => {
                let generated = self.ids.generate(CUSTOM_COMPONENT_CATEGORY)?;
                (OptionValue::from(generated.as_str()), generated)
            }
        };
        node.insert(COMPONENT_ID, component_id);

        // Cleared whether or not there was anything to store.
        let props = node.clear(PASS_PROPS);
        if props.is_truthy() {
            self.store.set_props_for_id(&id, props)?;
            debug!(component_id = %id, "stored component passProps");
        }
        Ok(())
    }

    fn apply_image(&self, key: &str, value: &mut OptionValue) -> Result<()> {
        if !is_image_key(key) {
            return Ok(());
        }
        *value = self.assets.resolve(value)?;
        trace!(key, "resolved image");
        Ok(())
    }

    fn extract_button_props(&self, key: &str, value: &mut OptionValue) -> Result<()> {
        if !is_buttons_key(key) {
            return Ok(());
        }
        let Some(buttons) = value.as_sequence_mut() else {
            return Ok(());
        };
        for button in buttons.iter_mut().filter_map(OptionValue::as_mapping_mut) {
            let Some(id) = button.field(ID).identifier() else {
                continue;
            };
            if !button.field(PASS_PROPS).is_truthy() {
                continue;
            }
            let props = button.clear(PASS_PROPS);
            self.store.set_props_for_id(&id, props)?;
            debug!(button_id = %id, "stored button passProps");
        }
        Ok(())
    }
}
