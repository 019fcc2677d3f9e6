//! Input readers - load front-end trees.

#[cfg(feature = "read-json")]
pub mod json;

#[cfg(feature = "read-json")]
pub use json::{JSON_READER, JsonReader, read_json};
