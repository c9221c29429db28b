//! Collaborators and I/O helpers.
//!
//! The engine depends on the four collaborator traits only; the concrete
//! types here are the defaults the CLI wires up.

pub mod assets;
pub mod color;
pub mod config;
pub mod ids;
pub mod options_file;
pub mod store;
