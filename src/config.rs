//! Configuration loading for the parsekit tools.
//!
//! `defaults/parsekit.default.toml` is embedded into the binary so that the
//! documented defaults and runtime behavior stay in sync. Callers layer config
//! files, `PARSEKIT__*` environment variables and explicit overrides on top via
//! [`Loader`] before deserializing into [`ParsekitConfig`].

use crate::formats::{TokenFormat, TreeFormat};
use ::config::builder::DefaultState;
use ::config::{Config, ConfigBuilder, Environment, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

pub use ::config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/parsekit.default.toml");

const ENV_PREFIX: &str = "PARSEKIT";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Deserialize)]
pub struct ParsekitConfig {
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Level name; anything unparseable means `warn`.
    pub level: String,
    /// `-` for stderr, otherwise a file to append to.
    pub file: String,
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn logs_to_stderr(&self) -> bool {
        self.file == "-"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

/// Default output formats of the CLI subcommands.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub tokens: TokenFormat,
    pub tree: TreeFormat,
}

/// Stacks configuration sources, later ones winning, on top of the embedded
/// `parsekit.default.toml`.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Loader {
            builder: Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    /// TOML file given with `--config`; `build` fails if it does not exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), true)
    }

    /// TOML file that may or may not be there.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), false)
    }

    fn with_toml(mut self, path: &Path, required: bool) -> Self {
        let file = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(file);
        self
    }

    /// Layer `PARSEKIT__SECTION__KEY` environment variables.
    pub fn with_env(mut self) -> Self {
        self.builder = self.builder.add_source(environment());
        self
    }

    /// Set one dotted key, e.g. `logging.level` from `--log-level`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge every layer into a [`ParsekitConfig`]. Unknown enum values such as
    /// an unsupported output format are rejected here.
    pub fn build(self) -> Result<ParsekitConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR)
}

/// The embedded defaults alone.
pub fn load_defaults() -> Result<ParsekitConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.logs_to_stderr());
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert_eq!(config.output.tokens, TokenFormat::Plain);
        assert_eq!(config.output.tree, TreeFormat::Dump);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("logging.level", "debug")
            .expect("override to apply")
            .set_override("output.tree", "yaml")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.output.tree, TreeFormat::Yaml);
    }

    #[test]
    fn layers_files_over_defaults() {
        let dir = std::env::temp_dir().join(format!("parsekit-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("parsekit.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[output]\ntokens = \"json\"").unwrap();

        let config = Loader::new().with_file(&path).build().unwrap();
        assert_eq!(config.output.tokens, TokenFormat::Json);
        assert_eq!(config.output.tree, TreeFormat::Dump);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/definitely/not/here/parsekit.toml")
            .build()
            .unwrap();
        assert_eq!(config.logging.file, "-");
    }

    #[test]
    fn missing_required_file_fails() {
        assert!(Loader::new()
            .with_file("/definitely/not/here/parsekit.toml")
            .build()
            .is_err());
    }

    #[test]
    fn reads_prefixed_environment() {
        let vars = HashMap::from([("PARSEKIT__LOGGING__FORMAT".to_string(), "json".to_string())]);
        let loader = Loader::new();
        let builder = loader.builder.add_source(environment().source(Some(vars)));
        let config: ParsekitConfig = builder.build().unwrap().try_deserialize().unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn rejects_unknown_format() {
        let result = Loader::new()
            .set_override("output.tokens", "xml")
            .unwrap()
            .build();
        assert!(result.is_err());
    }
}
