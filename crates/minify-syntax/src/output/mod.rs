//! Output writers - emit the tree as source code.

#[cfg(feature = "write-ruby")]
pub mod ruby;

#[cfg(feature = "write-ruby")]
pub use ruby::{MAX_DEPTH, RubyWriter, RubyWriterImpl, render_node, render_program, render_statements};
