//! Command-line front for `minify-syntax`.
//!
//! Reads a resolved syntax tree, renders it as compacted Ruby and writes
//! the result next to the input.

pub mod commands;
pub mod config;
pub mod logging;
pub mod paths;

pub use commands::minify::{MinifyArgs, MinifyOutcome};
pub use config::MinifyConfig;
