//! CLI error types.

use juice_compiler::CompileError;
use juice_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Compile(#[from] CompileError),

    #[error("{0}")]
    Validation(String),
}
