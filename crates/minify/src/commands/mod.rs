//! Command implementations.

pub mod minify;
