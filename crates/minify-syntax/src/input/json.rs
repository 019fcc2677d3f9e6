//! JSON tree reader.
//!
//! The front end serializes its resolved tree with the tagged layout
//! documented in [`crate::ir`]. serde_json refuses input nested deeper than
//! 128 levels, which bounds the writer's recursion for untrusted trees.

use crate::ir::SyntaxNode;
use crate::traits::{ReadError, Reader};
use serde_json::error::Category;

/// Static instance of the JSON reader.
pub static JSON_READER: JsonReader = JsonReader;

pub struct JsonReader;

impl Reader for JsonReader {
    fn format(&self) -> &'static str {
        "json"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn read(&self, source: &str) -> Result<SyntaxNode, ReadError> {
        read_json(source)
    }
}

/// Parse a serialized tree.
pub fn read_json(source: &str) -> Result<SyntaxNode, ReadError> {
    serde_json::from_str(source).map_err(|err| match err.classify() {
        Category::Data => ReadError::InvalidTree(err.to_string()),
        Category::Io | Category::Syntax | Category::Eof => ReadError::Parse(err.to_string()),
    })
}
