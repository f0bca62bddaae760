//! Configuration management for Juice.
//!
//! Parses `juice.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [compiler]
//! open_delimiter = "<?php"
//! close_delimiter = "?>"
//! builtins = true
//! disabled = ["include"]
//!
//! [aliases]
//! when = "if"
//! each = "foreach"
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override opening code delimiter.
    pub open_delimiter: Option<String>,
    /// Override closing code delimiter.
    pub close_delimiter: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "juice.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Compiler configuration.
    pub compiler: CompilerConfig,
    /// Directive aliases: alias name → canonical directive name.
    pub aliases: BTreeMap<String, String>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Compiler configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Marker opening a generated code fragment.
    pub open_delimiter: String,
    /// Marker closing a generated code fragment.
    pub close_delimiter: String,
    /// Whether the built-in directive set is registered.
    pub builtins: bool,
    /// Built-in directives to leave out.
    pub disabled: Vec<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            open_delimiter: "<?php".to_owned(),
            close_delimiter: "?>".to_owned(),
            builtins: true,
            disabled: Vec::new(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `juice.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(open) = &settings.open_delimiter {
            self.compiler.open_delimiter.clone_from(open);
        }
        if let Some(close) = &settings.close_delimiter {
            self.compiler.close_delimiter.clone_from(close);
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Alias targets are not checked here: whether a target exists depends on
    /// the directive set, which is known only when the registry is built.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_compiler()?;
        self.validate_aliases()?;
        Ok(())
    }

    fn validate_compiler(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.compiler.open_delimiter, "compiler.open_delimiter")?;
        require_non_empty(&self.compiler.close_delimiter, "compiler.close_delimiter")?;
        for name in &self.compiler.disabled {
            require_non_empty(name, "compiler.disabled")?;
        }
        Ok(())
    }

    fn validate_aliases(&self) -> Result<(), ConfigError> {
        for (alias, target) in &self.aliases {
            require_non_empty(alias, "aliases")?;
            require_non_empty(target, &format!("aliases.{alias}"))?;
            if alias == target {
                return Err(ConfigError::Validation(format!(
                    "aliases.{alias} cannot point to itself"
                )));
            }
        }
        Ok(())
    }
}
