//! Minify command - render a resolved tree as compacted Ruby.

use crate::config::MinifyConfig;
use crate::paths::derive_output_path;
use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use minify_syntax::{
    JSON_READER, LiteralStyle, Reader, RenderConfig, RubyWriterImpl, Separator, Writer,
};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Minify command arguments
#[derive(Args, Debug, Clone)]
pub struct MinifyArgs {
    /// Syntax tree produced by the front end (JSON), use - for stdin
    pub input: PathBuf,

    /// Output file (default: <input base name>.min.rb next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the result instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,

    /// Statement separator inside bodies
    #[arg(long)]
    pub separator: Option<SeparatorArg>,

    /// Literal style
    #[arg(long)]
    pub style: Option<StyleArg>,

    /// Shorthand for --separator semicolon --style obfuscated
    #[arg(long, conflicts_with_all = ["separator", "style"])]
    pub compact: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SeparatorArg {
    /// One statement per line
    Newline,
    /// Statements joined with `;`
    Semicolon,
}

impl From<SeparatorArg> for Separator {
    fn from(arg: SeparatorArg) -> Self {
        match arg {
            SeparatorArg::Newline => Separator::Newline,
            SeparatorArg::Semicolon => Separator::Semicolon,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StyleArg {
    /// Keyword literals and modifier `if`
    Verbose,
    /// `!!1`/`!1` booleans and ternaries everywhere
    Obfuscated,
}

impl From<StyleArg> for LiteralStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Verbose => LiteralStyle::Verbose,
            StyleArg::Obfuscated => LiteralStyle::Obfuscated,
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct MinifyOutcome {
    pub code: String,
    pub render_config: RenderConfig,
    /// Where the code was written; `None` when it goes to stdout.
    pub output_path: Option<PathBuf>,
}

impl MinifyArgs {
    fn is_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }

    /// Flags override the config file, which overrides the defaults.
    pub fn render_config(&self, config: &MinifyConfig) -> RenderConfig {
        if self.compact {
            return RenderConfig::compact();
        }
        let base = config.render_config();
        RenderConfig::new(
            self.separator.map(Into::into).unwrap_or(base.separator),
            self.style.map(Into::into).unwrap_or(base.literal_style),
        )
    }
}

/// Run the minify command. Nothing is written unless rendering succeeds.
pub fn run(args: &MinifyArgs, config: &MinifyConfig) -> Result<MinifyOutcome> {
    let input_name = if args.is_stdin() {
        "<stdin>".to_string()
    } else {
        args.input.display().to_string()
    };

    let content = read_input(args).with_context(|| format!("failed to read {input_name}"))?;
    if !args.is_stdin() && !has_extension(&args.input, JSON_READER.extensions()) {
        tracing::warn!(input = %input_name, "input does not look like a {} tree", JSON_READER.format());
    }

    let tree = JSON_READER
        .read(&content)
        .with_context(|| format!("failed to load syntax tree from {input_name}"))?;

    let render_config = args.render_config(config);
    let writer = RubyWriterImpl::new(render_config);
    tracing::info!(
        input = %input_name,
        separator = %render_config.separator,
        style = %render_config.literal_style,
        "minifying"
    );
    let code = writer
        .write(&tree)
        .with_context(|| format!("failed to minify {input_name}"))?;

    let output_path = if args.stdout {
        None
    } else {
        Some(resolve_output_path(args, config, writer.extension())?)
    };

    if let Some(path) = &output_path {
        std::fs::write(path, &code).with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(
            output = %path.display(),
            bytes_in = content.len(),
            bytes_out = code.len(),
            "wrote minified source"
        );
    }

    Ok(MinifyOutcome {
        code,
        render_config,
        output_path,
    })
}

fn read_input(args: &MinifyArgs) -> std::io::Result<String> {
    if args.is_stdin() {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(&args.input)
    }
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.contains(&e))
}

fn resolve_output_path(args: &MinifyArgs, config: &MinifyConfig, default_suffix: &str) -> Result<PathBuf> {
    if let Some(path) = &args.output {
        return Ok(path.clone());
    }
    if args.is_stdin() {
        bail!("--output or --stdout is required when reading from stdin");
    }
    let suffix = config.output.suffix.as_deref().unwrap_or(default_suffix);
    let path = derive_output_path(&args.input, suffix);
    if path == args.input {
        bail!("derived output path {} would overwrite the input", path.display());
    }
    Ok(path)
}
