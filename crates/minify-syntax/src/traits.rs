//! Traits for tree readers and writers.

use crate::ir::SyntaxNode;

/// Error that can occur when reading a serialized tree.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid tree: {0}")]
    InvalidTree(String),
}

/// The renderer's only failure: a node it has no rule for.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("unsupported construct: {kind}{}", statement_suffix(.statement))]
    UnsupportedConstruct {
        kind: String,
        /// Zero-based index of the enclosing top-level statement, when known.
        statement: Option<usize>,
    },
}

fn statement_suffix(statement: &Option<usize>) -> String {
    match statement {
        Some(index) => format!(" (top-level statement {index})"),
        None => String::new(),
    }
}

impl RenderError {
    pub fn unsupported(kind: impl Into<String>) -> Self {
        RenderError::UnsupportedConstruct {
            kind: kind.into(),
            statement: None,
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            RenderError::UnsupportedConstruct { kind, .. } => kind,
        }
    }

    /// Record the top-level statement the error came from.
    pub fn at_statement(self, index: usize) -> Self {
        match self {
            RenderError::UnsupportedConstruct { kind, .. } => RenderError::UnsupportedConstruct {
                kind,
                statement: Some(index),
            },
        }
    }
}

/// A reader turns front-end output into a syntax tree.
pub trait Reader: Send + Sync {
    /// Format identifier (e.g., "json").
    fn format(&self) -> &'static str;

    /// File extensions this reader handles (e.g., &["json"]).
    fn extensions(&self) -> &'static [&'static str];

    fn read(&self, source: &str) -> Result<SyntaxNode, ReadError>;
}

/// A writer emits a syntax tree as source code.
pub trait Writer: Send + Sync {
    /// Language identifier (e.g., "ruby").
    fn language(&self) -> &'static str;

    /// Suffix for output files (e.g., "min.rb").
    fn extension(&self) -> &'static str;

    /// Emit the tree rooted at `program` as source code.
    fn write(&self, program: &SyntaxNode) -> Result<String, RenderError>;
}
