//! Directive registry with canonical names and aliases.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{CompileError, Directive};

/// Maps directive names and aliases to [`Directive`] instances.
///
/// Two explicit mappings are kept: canonical name → directive, and
/// alias → canonical name. Aliases are single-hop: an alias always points at a
/// canonical entry, never at another alias.
///
/// The registry is built once and then only read, so it can be shared between
/// threads running separate compilation passes.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use juice_compiler::DirectiveRegistry;
///
/// let mut registry = DirectiveRegistry::with_builtins();
/// registry.alias("when", "if").unwrap();
///
/// assert!(registry.has("when"));
/// assert_eq!(registry.canonical_name("when").unwrap(), "if");
/// assert!(Arc::ptr_eq(
///     registry.resolve("when").unwrap(),
///     registry.resolve("if").unwrap(),
/// ));
/// ```
#[derive(Default)]
pub struct DirectiveRegistry {
    directives: HashMap<String, Arc<dyn Directive>>,
    aliases: HashMap<String, String>,
}

impl DirectiveRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in directive set.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, directive) in crate::builtins::all() {
            registry.insert(name, directive);
        }
        registry
    }

    /// Register a canonical entry.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::DuplicateRegistration`] if `name` is already a
    /// canonical entry, or [`CompileError::AliasCollision`] if it is an alias.
    pub fn register<D: Directive + 'static>(
        &mut self,
        name: impl Into<String>,
        directive: D,
    ) -> Result<&mut Self, CompileError> {
        self.register_shared(name, Arc::new(directive))
    }

    /// Register an already shared directive instance.
    ///
    /// # Errors
    ///
    /// Same as [`register`](Self::register).
    pub fn register_shared(
        &mut self,
        name: impl Into<String>,
        directive: Arc<dyn Directive>,
    ) -> Result<&mut Self, CompileError> {
        let name = name.into();
        if self.directives.contains_key(&name) {
            return Err(CompileError::DuplicateRegistration(name));
        }
        if self.aliases.contains_key(&name) {
            return Err(CompileError::AliasCollision(name));
        }
        self.insert(name, directive);
        Ok(self)
    }

    /// Register `alias_name` as another name for `canonical_name`.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::UnknownAliasTarget`] if `canonical_name` is not a
    /// canonical entry (aliases of aliases are rejected), or
    /// [`CompileError::AliasCollision`] if `alias_name` is already taken.
    pub fn alias(
        &mut self,
        alias_name: impl Into<String>,
        canonical_name: &str,
    ) -> Result<&mut Self, CompileError> {
        let alias_name = alias_name.into();
        if !self.directives.contains_key(canonical_name) {
            return Err(CompileError::UnknownAliasTarget {
                alias: alias_name,
                target: canonical_name.to_owned(),
            });
        }
        if self.directives.contains_key(&alias_name) || self.aliases.contains_key(&alias_name) {
            return Err(CompileError::AliasCollision(alias_name));
        }
        tracing::debug!(alias = %alias_name, directive = canonical_name, "Registered alias");
        self.aliases.insert(alias_name, canonical_name.to_owned());
        Ok(self)
    }

    /// Remove a canonical entry together with every alias pointing at it.
    ///
    /// Intended for build time, e.g. to leave out a built-in directive.
    /// Returns `false` if `name` was not a canonical entry.
    pub fn remove(&mut self, name: &str) -> bool {
        if self.directives.remove(name).is_none() {
            return false;
        }
        self.aliases.retain(|_, target| target != name);
        tracing::debug!(directive = name, "Removed directive");
        true
    }

    /// Look up the directive registered under `name` or one of its aliases.
    ///
    /// Repeated calls return the same instance.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::UnknownDirective`] carrying `name` if neither a
    /// canonical entry nor an alias exists.
    pub fn resolve(&self, name: &str) -> Result<&Arc<dyn Directive>, CompileError> {
        self.lookup(name)
            .map(|(_, directive)| directive)
            .ok_or_else(|| CompileError::UnknownDirective(name.to_owned()))
    }

    /// Canonical name for `name`, which may itself be canonical or an alias.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::UnknownDirective`] if `name` is unknown.
    pub fn canonical_name(&self, name: &str) -> Result<&str, CompileError> {
        self.lookup(name)
            .map(|(canonical, _)| canonical)
            .ok_or_else(|| CompileError::UnknownDirective(name.to_owned()))
    }

    /// Whether [`resolve`](Self::resolve) would succeed for `name`.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Canonical names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.directives.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Aliases pointing at `canonical_name`, sorted.
    #[must_use]
    pub fn aliases_of(&self, canonical_name: &str) -> Vec<&str> {
        let mut aliases: Vec<&str> = self
            .aliases
            .iter()
            .filter(|(_, target)| target.as_str() == canonical_name)
            .map(|(alias, _)| alias.as_str())
            .collect();
        aliases.sort_unstable();
        aliases
    }

    /// Number of canonical entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    fn insert(&mut self, name: impl Into<String>, directive: Arc<dyn Directive>) {
        let name = name.into();
        tracing::debug!(
            directive = %name,
            closable = directive.has_closing(),
            "Registered directive"
        );
        self.directives.insert(name, directive);
    }

    fn lookup(&self, name: &str) -> Option<(&str, &Arc<dyn Directive>)> {
        if let Some((canonical, directive)) = self.directives.get_key_value(name) {
            return Some((canonical.as_str(), directive));
        }
        let canonical = self.aliases.get(name)?;
        self.directives
            .get(canonical)
            .map(|directive| (canonical.as_str(), directive))
    }
}

impl std::fmt::Debug for DirectiveRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectiveRegistry")
            .field("directives", &self.names())
            .field("aliases", &self.aliases)
            .finish()
    }
}
