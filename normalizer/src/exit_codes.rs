//! Stable exit codes for normalizer CLI commands.

/// Command succeeded; for `verify`, the tree is stable.
pub const OK: i32 = 0;
/// Invalid input, config, or any other error.
pub const INVALID: i32 = 1;
/// `normalizer verify` found changes or store writes on the second pass.
pub const UNSTABLE: i32 = 2;
