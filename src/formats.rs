//! Output formats for token streams and trees
//!
//! Token streams render as:
//! - `plain`: one debug line per token ([`DebugPrinter`])
//! - `color`: the source text, colored by token type ([`ColorPrinter`])
//! - `json` / `yaml`: a list of [`TokenSnapshot`]s
//!
//! Trees render as:
//! - `dump`: the indented [`dump_tree`] listing
//! - `json` / `yaml`: a nested [`NodeSnapshot`]

pub mod serialize;
pub mod token_printer;
pub mod tree_dump;

pub use serialize::{to_json, to_yaml, NodeSnapshot, TokenSnapshot, MAX_SNAPSHOT_DEPTH};
pub use token_printer::{ColorPrinter, DebugPrinter, PrintingVisitor, TokenPrinter};
pub use tree_dump::{dump_tree, write_tree};

use crate::lexing::Token;
use crate::parsing::Tree;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("tree is nested {depth} levels deep, snapshots allow at most {limit}")]
    TooDeep { depth: usize, limit: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenFormat {
    #[default]
    Plain,
    Color,
    Json,
    Yaml,
}

impl TokenFormat {
    pub const ALL: [TokenFormat; 4] = [
        TokenFormat::Plain,
        TokenFormat::Color,
        TokenFormat::Json,
        TokenFormat::Yaml,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TokenFormat::Plain => "plain",
            TokenFormat::Color => "color",
            TokenFormat::Json => "json",
            TokenFormat::Yaml => "yaml",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TokenFormat::Plain => "one line per token with type, quoted value and range",
            TokenFormat::Color => "source text colored by token type",
            TokenFormat::Json => "JSON array of tokens",
            TokenFormat::Yaml => "YAML list of tokens",
        }
    }
}

impl fmt::Display for TokenFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TokenFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TokenFormat::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| FormatError::FormatNotFound(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TreeFormat {
    #[default]
    Dump,
    Json,
    Yaml,
}

impl TreeFormat {
    pub const ALL: [TreeFormat; 3] = [TreeFormat::Dump, TreeFormat::Json, TreeFormat::Yaml];

    pub fn name(&self) -> &'static str {
        match self {
            TreeFormat::Dump => "dump",
            TreeFormat::Json => "json",
            TreeFormat::Yaml => "yaml",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TreeFormat::Dump => "indented listing, one node per line",
            TreeFormat::Json => "nested JSON document",
            TreeFormat::Yaml => "nested YAML document",
        }
    }
}

impl fmt::Display for TreeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TreeFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TreeFormat::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| FormatError::FormatNotFound(s.to_string()))
    }
}

/// Render a token stream; `color` supplies the palette for [`TokenFormat::Color`].
pub fn render_tokens_with(
    tokens: &[Token],
    format: TokenFormat,
    color: &ColorPrinter,
) -> Result<String, FormatError> {
    match format {
        TokenFormat::Plain => Ok(tokens.iter().map(|t| DebugPrinter.render(t)).collect()),
        TokenFormat::Color => Ok(tokens.iter().map(|t| color.render(t)).collect()),
        TokenFormat::Json => to_json(&snapshots(tokens)),
        TokenFormat::Yaml => to_yaml(&snapshots(tokens)),
    }
}

/// Render a token stream; the `color` format falls back to uncolored values.
pub fn render_tokens(tokens: &[Token], format: TokenFormat) -> Result<String, FormatError> {
    render_tokens_with(tokens, format, &ColorPrinter::new())
}

pub fn render_tree(tree: &Tree, format: TreeFormat) -> Result<String, FormatError> {
    match format {
        TreeFormat::Dump => Ok(dump_tree(tree)),
        TreeFormat::Json => to_json(&NodeSnapshot::try_from(tree)?),
        TreeFormat::Yaml => to_yaml(&NodeSnapshot::try_from(tree)?),
    }
}

fn snapshots(tokens: &[Token]) -> Vec<TokenSnapshot> {
    tokens.iter().map(TokenSnapshot::from).collect()
}
