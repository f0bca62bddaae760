//! `juice compile` command implementation.

use std::path::PathBuf;

use clap::Args;
use juice_compiler::CompilationPass;
use juice_config::{CliSettings, Config};

use crate::error::CliError;
use crate::output::Output;
use crate::registry::build_compiler;

/// Arguments for the compile command.
#[derive(Args)]
pub(crate) struct CompileArgs {
    /// Directive occurrences in template order: `name argument` to open, `/name` to close.
    #[arg(required = true)]
    tags: Vec<String>,

    /// Path to configuration file (default: auto-discover juice.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Opening code delimiter (overrides config).
    #[arg(long)]
    open_delimiter: Option<String>,

    /// Closing code delimiter (overrides config).
    #[arg(long)]
    close_delimiter: Option<String>,

    /// Enable verbose output (debug logs).
    #[arg(short, long)]
    pub verbose: bool,
}

/// One directive occurrence given on the command line.
#[derive(Debug, PartialEq, Eq)]
enum Tag<'a> {
    Open { name: &'a str, args: &'a str },
    Close { name: &'a str },
}

impl CompileArgs {
    /// Execute the compile command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, a tag is malformed, or any
    /// occurrence fails to compile.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            open_delimiter: self.open_delimiter,
            close_delimiter: self.close_delimiter,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let compiler = build_compiler(&config)?;

        let mut pass = CompilationPass::new(&compiler);
        for raw in &self.tags {
            let fragment = match parse_tag(raw)? {
                Tag::Open { name, args } => pass.open(name, args)?,
                Tag::Close { name } => pass.close(name)?,
            };
            output.line(fragment.as_str());
        }
        pass.finish()?;

        output.success(&format!("Compiled {} directives", self.tags.len()));
        Ok(())
    }
}

fn parse_tag(raw: &str) -> Result<Tag<'_>, CliError> {
    let tag = raw.trim();
    if let Some(name) = tag.strip_prefix('/') {
        let name = name.trim();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(CliError::Validation(format!(
                "invalid closing tag {raw:?}: expected `/name`"
            )));
        }
        return Ok(Tag::Close { name });
    }

    let (name, args) = tag
        .split_once(char::is_whitespace)
        .unwrap_or((tag, ""));
    if name.is_empty() {
        return Err(CliError::Validation("empty directive tag".to_owned()));
    }
    Ok(Tag::Open {
        name,
        args: args.trim(),
    })
}
