//! Render configuration.
//!
//! One `RenderConfig` governs a whole render pass. The separator is used
//! for every statement join inside bodies; top-level statements are always
//! joined with newlines.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How statements inside a body are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    #[default]
    Newline,
    Semicolon,
}

impl Separator {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Separator::Newline => "\n",
            Separator::Semicolon => ";",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Separator::Newline => "newline",
            Separator::Semicolon => "semicolon",
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Separator {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newline" => Ok(Self::Newline),
            "semicolon" => Ok(Self::Semicolon),
            _ => Err(format!("unknown separator: {s}")),
        }
    }
}

/// Keyword-readable or cryptic literal forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralStyle {
    #[default]
    Verbose,
    Obfuscated,
}

impl LiteralStyle {
    pub const fn name(&self) -> &'static str {
        match self {
            LiteralStyle::Verbose => "verbose",
            LiteralStyle::Obfuscated => "obfuscated",
        }
    }

    /// Literal for "no value" (a bare `return`, a missing ternary branch).
    pub const fn no_value(&self) -> &'static str {
        match self {
            LiteralStyle::Verbose => "nil",
            LiteralStyle::Obfuscated => "()",
        }
    }

    /// What a statement block with no statements renders to.
    pub const fn empty_block(&self) -> &'static str {
        match self {
            LiteralStyle::Verbose => "\"\"",
            LiteralStyle::Obfuscated => "",
        }
    }

    pub const fn boolean(&self, value: bool) -> &'static str {
        match (self, value) {
            (LiteralStyle::Verbose, true) => "true",
            (LiteralStyle::Verbose, false) => "false",
            (LiteralStyle::Obfuscated, true) => "!!1",
            (LiteralStyle::Obfuscated, false) => "!1",
        }
    }
}

impl fmt::Display for LiteralStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LiteralStyle {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "verbose" => Ok(Self::Verbose),
            "obfuscated" => Ok(Self::Obfuscated),
            _ => Err(format!("unknown literal style: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub separator: Separator,
    pub literal_style: LiteralStyle,
}

impl RenderConfig {
    pub const fn new(separator: Separator, literal_style: LiteralStyle) -> Self {
        Self {
            separator,
            literal_style,
        }
    }

    /// Newline-separated, keyword literals.
    pub const fn readable() -> Self {
        Self::new(Separator::Newline, LiteralStyle::Verbose)
    }

    /// Semicolon-separated, obfuscated literals.
    pub const fn compact() -> Self {
        Self::new(Separator::Semicolon, LiteralStyle::Obfuscated)
    }
}
