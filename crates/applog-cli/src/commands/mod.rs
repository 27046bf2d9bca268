//! CLI command implementations.

pub mod check;
pub mod emit;
pub mod version;
