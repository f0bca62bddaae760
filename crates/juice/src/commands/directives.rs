//! `juice directives` command implementation.

use std::path::PathBuf;

use clap::Args;
use juice_config::Config;

use crate::error::CliError;
use crate::output::Output;
use crate::registry::build_compiler;

/// Arguments for the directives command.
#[derive(Args)]
pub(crate) struct DirectivesArgs {
    /// Path to configuration file (default: auto-discover juice.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output (debug logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl DirectivesArgs {
    /// Execute the directives command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let compiler = build_compiler(&config)?;
        let registry = compiler.registry();

        output.highlight(&format!("{} directives", registry.len()));
        for name in registry.names() {
            let closable = compiler.is_closable(name)?;
            let aliases = registry.aliases_of(name);
            output.line(&describe(name, closable, &aliases, &output));
        }

        Ok(())
    }
}

fn describe(name: &str, closable: bool, aliases: &[&str], output: &Output) -> String {
    let mut line = format!("{name:<10}");
    line.push_str(if closable { " closable  " } else { " standalone" });
    if !aliases.is_empty() {
        line.push(' ');
        line.push_str(&output.dim(&format!("(aliases: {})", aliases.join(", "))));
    }
    line
}
