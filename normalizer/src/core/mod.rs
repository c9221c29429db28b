//! Deterministic, pure logic shared by the normalizer.
//!
//! Core modules are free of I/O and collaborator calls. They define the tree
//! representation and the key classification the engine dispatches on.

pub mod diff;
pub mod keys;
pub mod value;
