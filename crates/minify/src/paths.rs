//! Output path derivation.

use std::path::{Path, PathBuf};

/// Output path for `input`: same directory, base name with every extension
/// stripped, then `.{suffix}`. `lib/foo.rb.json` becomes `lib/foo.min.rb`.
pub fn derive_output_path(input: &Path, suffix: &str) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    // A leading dot belongs to the name, not to an extension.
    let base = match name.char_indices().skip(1).find(|(_, c)| *c == '.') {
        Some((i, _)) => &name[..i],
        None => name.as_str(),
    };
    let base = if base.is_empty() { "out" } else { base };
    input.with_file_name(format!("{base}.{suffix}"))
}
