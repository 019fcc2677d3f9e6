//! Compacting source regeneration for Ruby syntax trees.
//!
//! `minify-syntax` takes a tree already produced and resolved by an external
//! front end and writes it back out as shorter Ruby with the same behavior.
//!
//! # Architecture
//!
//! ```text
//! Front end            Tree               Writer
//! ─────────────    ─────────────    ──────────────────────
//! JSON tree  ─────> SyntaxNode ─────> RubyWriter ──> text
//!  (input)           (ir.rs)    │     (output/ruby.rs)
//!                               └──> classify (operator/write predicates)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use minify_syntax::{RenderConfig, SyntaxNode, render_program};
//!
//! let tree = SyntaxNode::lasgn(
//!     "count",
//!     SyntaxNode::infix(SyntaxNode::lvar("count"), "+", SyntaxNode::int(1)),
//! );
//! let ruby = render_program(&tree, RenderConfig::readable())?;
//! // => "count+=1"
//! ```
//!
//! # Output modes
//!
//! A `RenderConfig` pairs a statement separator (newline or semicolon) with
//! a literal style. `Verbose` keeps keyword literals (`true`, `nil`) and
//! modifier `if`; `Obfuscated` writes `!!1`, `!1`, `()` and always uses
//! ternaries. The writer never checks that its output parses; it applies
//! one rule per node kind.

pub mod alias;
pub mod classify;
pub mod config;
pub mod ir;
pub mod traits;

pub mod input;
pub mod output;

// Re-exports: tree types
pub use ir::{ConstPath, SyntaxNode};

// Re-exports: configuration
pub use config::{LiteralStyle, RenderConfig, Separator};

// Re-exports: alias table
pub use alias::{AliasKey, AliasTable};

// Re-exports: Traits
pub use traits::{ReadError, Reader, RenderError, Writer};

// Re-exports: Built-in readers
#[cfg(feature = "read-json")]
pub use input::{JSON_READER, JsonReader, read_json};

// Re-exports: Built-in writers
#[cfg(feature = "write-ruby")]
pub use output::{MAX_DEPTH, RubyWriter, RubyWriterImpl, render_node, render_program, render_statements};
