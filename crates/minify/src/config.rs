//! Configuration system for minify.
//!
//! Loads config from:
//! 1. Global: ~/.config/minify/config.toml
//! 2. Per-project: .minify/config.toml (overrides global)
//!
//! Example config.toml:
//! ```toml
//! [render]
//! separator = "semicolon"
//! literal_style = "obfuscated"
//!
//! [output]
//! suffix = "min.rb"
//! ```

use minify_syntax::{LiteralStyle, RenderConfig, Separator};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Rendering defaults. Unset fields fall through to the next layer.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RenderSection {
    pub separator: Option<Separator>,
    pub literal_style: Option<LiteralStyle>,
}

/// Output file naming.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct OutputSection {
    /// Suffix appended to the input's base name, without the leading dot.
    pub suffix: Option<String>,
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct MinifyConfig {
    pub render: RenderSection,
    pub output: OutputSection,
}

impl MinifyConfig {
    /// Load configuration for a project.
    ///
    /// Loads global config from ~/.config/minify/config.toml,
    /// then merges with per-project config from .minify/config.toml.
    pub fn load(root: &Path) -> Self {
        Self::load_layers(Self::global_config_path().as_deref(), root)
    }

    fn load_layers(global: Option<&Path>, root: &Path) -> Self {
        let mut config = Self::default();

        if let Some(global) = global.and_then(Self::load_file) {
            config = config.merge(global);
        }

        let project_path = root.join(".minify").join("config.toml");
        if let Some(project) = Self::load_file(&project_path) {
            config = config.merge(project);
        }

        config
    }

    /// Get the global config path.
    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("minify").join("config.toml"))
    }

    /// Load config from a file path. Missing files are skipped silently,
    /// malformed ones with a warning.
    fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring invalid config");
                None
            }
        }
    }

    /// Merge another config into this one; fields set in `other` win.
    fn merge(self, other: Self) -> Self {
        Self {
            render: RenderSection {
                separator: other.render.separator.or(self.render.separator),
                literal_style: other.render.literal_style.or(self.render.literal_style),
            },
            output: OutputSection {
                suffix: other.output.suffix.or(self.output.suffix),
            },
        }
    }

    /// Render settings, falling back to the readable preset.
    pub fn render_config(&self) -> RenderConfig {
        let defaults = RenderConfig::readable();
        RenderConfig::new(
            self.render.separator.unwrap_or(defaults.separator),
            self.render.literal_style.unwrap_or(defaults.literal_style),
        )
    }
}
