//! Building the tag compiler from configuration.

use juice_compiler::{Delimiters, DirectiveRegistry, TagCompiler};
use juice_config::Config;

use crate::error::CliError;

/// Build a [`TagCompiler`] from the loaded configuration.
///
/// Registers the built-in set unless disabled, removes the built-ins listed in
/// `compiler.disabled`, then registers the configured aliases. Listing
/// disabled directives while the built-in set is off is an error.
pub(crate) fn build_compiler(config: &Config) -> Result<TagCompiler, CliError> {
    let mut registry = if config.compiler.builtins {
        DirectiveRegistry::with_builtins()
    } else {
        DirectiveRegistry::new()
    };

    if !config.compiler.builtins && !config.compiler.disabled.is_empty() {
        return Err(CliError::Validation(
            "compiler.disabled requires compiler.builtins = true".to_owned(),
        ));
    }

    for name in &config.compiler.disabled {
        if !registry.remove(name) {
            return Err(CliError::Validation(format!(
                "compiler.disabled: {name} is not a built-in directive"
            )));
        }
    }

    for (alias, target) in &config.aliases {
        registry.alias(alias.as_str(), target)?;
    }

    tracing::debug!(
        directives = registry.len(),
        aliases = config.aliases.len(),
        "Built directive registry"
    );

    let delimiters = Delimiters::new(
        config.compiler.open_delimiter.as_str(),
        config.compiler.close_delimiter.as_str(),
    );
    Ok(TagCompiler::new(registry).with_delimiters(delimiters))
}

#[cfg(test)]
mod tests {
    use super::*;
    use juice_compiler::CompileError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_builds_builtins() {
        let compiler = build_compiler(&Config::default()).unwrap();
        assert_eq!(compiler.registry().len(), 10);
        assert_eq!(compiler.delimiters(), &Delimiters::default());
    }

    #[test]
    fn test_disabled_and_aliases() {
        let mut config = Config::default();
        config.compiler.disabled = vec!["include".to_owned()];
        config.aliases.insert("when".to_owned(), "if".to_owned());

        let compiler = build_compiler(&config).unwrap();
        assert!(!compiler.registry().has("include"));
        assert_eq!(compiler.registry().canonical_name("when").unwrap(), "if");
    }

    #[test]
    fn test_unknown_disabled() {
        let mut config = Config::default();
        config.compiler.disabled = vec!["macro".to_owned()];
        let err = build_compiler(&config).unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
    }

    #[test]
    fn test_disabled_without_builtins() {
        let mut config = Config::default();
        config.compiler.builtins = false;
        config.compiler.disabled = vec!["include".to_owned()];

        let err = build_compiler(&config).unwrap_err();
        assert!(matches!(
            err,
            CliError::Validation(msg) if msg.contains("compiler.builtins")
        ));
    }

    #[test]
    fn test_alias_to_missing_directive() {
        let mut config = Config::default();
        config.compiler.builtins = false;
        config.aliases.insert("when".to_owned(), "if".to_owned());

        let err = build_compiler(&config).unwrap_err();
        assert!(matches!(
            err,
            CliError::Compile(CompileError::UnknownAliasTarget { .. })
        ));
    }

    #[test]
    fn test_configured_delimiters() {
        let mut config = Config::default();
        config.compiler.open_delimiter = "<?".to_owned();
        let compiler = build_compiler(&config).unwrap();
        assert_eq!(compiler.delimiters(), &Delimiters::new("<?", "?>"));
    }
}
