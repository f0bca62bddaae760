//! Per-template compilation pass.

use crate::{CompileError, Fragment, NestingStack, TagCompiler};

/// Compiles the directive occurrences of one template in order.
///
/// Owns the [`NestingStack`] for the template and checks at the end that every
/// closable directive was closed. Create one pass per template; passes for
/// different templates may share the same [`TagCompiler`] across threads.
///
/// # Example
///
/// ```
/// use juice_compiler::{CompilationPass, CompileError, TagCompiler};
///
/// let compiler = TagCompiler::with_builtins();
///
/// let mut pass = CompilationPass::new(&compiler);
/// pass.open("if", "$user").unwrap();
/// pass.open("else", "").unwrap();
/// pass.close("if").unwrap();
/// assert!(pass.finish().is_ok());
///
/// let mut pass = CompilationPass::new(&compiler);
/// pass.open("while", "true").unwrap();
/// assert_eq!(
///     pass.finish().unwrap_err(),
///     CompileError::Unterminated { open: vec!["while".to_owned()] },
/// );
/// ```
#[derive(Debug)]
pub struct CompilationPass<'a> {
    compiler: &'a TagCompiler,
    stack: NestingStack,
}

impl<'a> CompilationPass<'a> {
    #[must_use]
    pub fn new(compiler: &'a TagCompiler) -> Self {
        Self {
            compiler,
            stack: NestingStack::new(),
        }
    }

    /// Compile an opening occurrence.
    pub fn open(&mut self, name: &str, args: &str) -> Result<Fragment, CompileError> {
        self.compiler.compile_opening(name, args, &mut self.stack)
    }

    /// Compile a closing occurrence.
    pub fn close(&mut self, name: &str) -> Result<Fragment, CompileError> {
        self.compiler.compile_closing(name, &mut self.stack)
    }

    /// Number of directives currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    #[must_use]
    pub fn stack(&self) -> &NestingStack {
        &self.stack
    }

    /// End the pass.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::Unterminated`] listing the open directives,
    /// outermost first, if the template ended inside a closable directive.
    pub fn finish(self) -> Result<(), CompileError> {
        if self.stack.is_empty() {
            return Ok(());
        }
        let open = self.stack.names();
        tracing::debug!(open = ?open, "Template ended with open directives");
        Err(CompileError::Unterminated { open })
    }
}
