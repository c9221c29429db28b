//! Options-tree normalizer.
//!
//! Walks a nested UI options tree (colors, images, nested components, button
//! sets, prop payloads) and rewrites it in place into the canonical form native
//! rendering consumes. Prop payloads are moved out of the tree into a store
//! keyed by component or button id.
//!
//! - **[`core`]**: the tree type and key classification. No I/O.
//! - **[`io`]**: the four collaborator traits (props store, id provider, color
//!   and asset resolvers), their default implementations, config and files.
//! - **[`processor`]**: the traversal engine.
//!
//! [`process`] and [`verify`] wire the engine to the defaults for the CLI.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod process;
pub mod processor;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod verify;

pub use crate::core::value::{Field, Mapping, OptionValue};
pub use crate::processor::OptionsProcessor;
