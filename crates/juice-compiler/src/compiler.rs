//! Tag compiler: turns directive occurrences into wrapped code fragments.

use crate::{CompileError, Delimiters, DirectiveRegistry, Frame, Fragment, NestingStack};

/// Compiles directive occurrences against a [`DirectiveRegistry`].
///
/// The compiler holds no per-template state. Callers create one
/// [`NestingStack`] per template and pass it to every call, so one compiler
/// can serve any number of passes, including concurrent ones.
///
/// # Stack transitions
///
/// - Opening a closable directive pushes one frame named after its canonical name.
/// - Opening a standalone directive leaves the depth unchanged.
/// - Closing pops the top frame, which must belong to the directive being closed.
/// - A failed call leaves the stack as it was.
///
/// # Example
///
/// ```
/// use juice_compiler::{CompileError, NestingStack, TagCompiler};
///
/// let compiler = TagCompiler::with_builtins();
/// let mut stack = NestingStack::new();
///
/// compiler.compile_opening("if", "$user", &mut stack).unwrap();
/// let err = compiler.compile_closing("foreach", &mut stack).unwrap_err();
/// assert!(matches!(err, CompileError::NestingMismatch { .. }));
/// assert_eq!(stack.depth(), 1);
/// ```
#[derive(Debug)]
pub struct TagCompiler {
    registry: DirectiveRegistry,
    delimiters: Delimiters,
}

impl Default for TagCompiler {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl TagCompiler {
    /// Create a compiler over `registry` with the default delimiters.
    #[must_use]
    pub fn new(registry: DirectiveRegistry) -> Self {
        Self {
            registry,
            delimiters: Delimiters::default(),
        }
    }

    /// Create a compiler with the built-in directive set.
    #[must_use]
    pub fn with_builtins() -> Self {
        Self::new(DirectiveRegistry::with_builtins())
    }

    /// Set the code-embedding delimiters.
    #[must_use]
    pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &DirectiveRegistry {
        &self.registry
    }

    #[must_use]
    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// Whether `name` requires a matching closing occurrence.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::UnknownDirective`] if `name` is not registered.
    pub fn is_closable(&self, name: &str) -> Result<bool, CompileError> {
        Ok(self.registry.resolve(name)?.has_closing())
    }

    /// Compile an opening occurrence of `name` with its raw argument text.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::UnknownDirective`] for unregistered names and
    /// propagates errors from the directive itself.
    pub fn compile_opening(
        &self,
        name: &str,
        args: &str,
        stack: &mut NestingStack,
    ) -> Result<Fragment, CompileError> {
        let canonical = self.registry.canonical_name(name)?;
        let directive = self.registry.resolve(canonical)?;

        // Directives can only change the top frame's context, so that is all
        // a failed call has to undo.
        let saved = stack.peek().map(|frame| frame.context.clone());
        let result = directive.compile_opening(args, &mut stack.view());
        let opening = match result {
            Ok(opening) => opening,
            Err(err) => {
                if let Some(context) = saved {
                    stack.restore_top_context(context);
                }
                return Err(err);
            }
        };

        if directive.has_closing() {
            stack.push(Frame::new(canonical, opening.context));
        }

        tracing::debug!(
            directive = canonical,
            depth = stack.depth(),
            "Compiled opening directive"
        );

        let fragment = Fragment::wrap(&opening.code, &self.delimiters);
        tracing::trace!(fragment = %fragment, "Opening fragment");
        Ok(fragment)
    }

    /// Compile a closing occurrence of `name`.
    ///
    /// Aliases close the frame opened under their canonical name, and the
    /// generated statement always uses the canonical name (`endif` for an
    /// alias of `if`).
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::UnknownDirective`] for unregistered names and
    /// [`CompileError::NestingMismatch`] if the innermost open directive is
    /// not `name`.
    pub fn compile_closing(
        &self,
        name: &str,
        stack: &mut NestingStack,
    ) -> Result<Fragment, CompileError> {
        let canonical = self.registry.canonical_name(name)?;
        stack.pop(canonical)?;

        tracing::debug!(
            directive = canonical,
            depth = stack.depth(),
            "Compiled closing directive"
        );

        let fragment = Fragment::wrap(&format!("end{canonical}"), &self.delimiters);
        tracing::trace!(fragment = %fragment, "Closing fragment");
        Ok(fragment)
    }
}
