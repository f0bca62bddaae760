//! Directive trait.
//!
//! A directive is the compilation behavior of one template construct
//! (`if`, `foreach`, `include`, ...).

use crate::{CompileError, FrameContext, StackView};

/// Result of compiling an opening directive occurrence.
///
/// `code` is the raw generated statement; the [`TagCompiler`](crate::TagCompiler)
/// trims and wraps it. `context` becomes the payload of the frame pushed for a
/// closable directive and is ignored for standalone ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opening {
    /// Generated statement.
    pub code: String,
    /// Payload for the pushed frame.
    pub context: FrameContext,
}

impl Opening {
    /// Opening with an empty frame context.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            context: FrameContext::new(),
        }
    }

    /// Attach a frame context.
    #[must_use]
    pub fn with_context(mut self, context: FrameContext) -> Self {
        self.context = context;
        self
    }
}

/// Compilation behavior for one directive kind.
///
/// Directives are stateless strategy objects: everything that varies per
/// occurrence lives on the [`NestingStack`](crate::NestingStack). They are
/// shared between compilation passes, hence `Send + Sync`.
///
/// # Stack discipline
///
/// Directives see the stack through a [`StackView`]: they may read any frame
/// and update the innermost frame's context, which is how continuations such
/// as `else` or `case` record their progress. They cannot push or pop. When a
/// closable directive compiles successfully, the compiler pushes a frame
/// carrying the returned [`Opening::context`]; the matching closing occurrence
/// pops it.
///
/// # Example
///
/// ```
/// use juice_compiler::{
///     CompileError, Directive, DirectiveRegistry, NestingStack, Opening, StackView,
///     TagCompiler,
/// };
///
/// struct Unless;
///
/// impl Directive for Unless {
///     fn has_closing(&self) -> bool { true }
///
///     fn compile_opening(
///         &self,
///         args: &str,
///         _stack: &mut StackView<'_>,
///     ) -> Result<Opening, CompileError> {
///         Ok(Opening::new(format!("if (!({args})):")))
///     }
/// }
///
/// let mut registry = DirectiveRegistry::new();
/// registry.register("unless", Unless).unwrap();
/// let compiler = TagCompiler::new(registry);
///
/// let mut stack = NestingStack::new();
/// let fragment = compiler.compile_opening("unless", "$done", &mut stack).unwrap();
/// assert_eq!(fragment.as_str(), "<?php if (!($done)): ?>");
/// ```
pub trait Directive: Send + Sync {
    /// Whether the directive requires a matching closing occurrence.
    fn has_closing(&self) -> bool;

    /// Compile an opening occurrence.
    ///
    /// `args` is the raw inline argument text following the directive name.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::InvalidArgument`] for malformed argument text and
    /// [`CompileError::NestingMismatch`] when the directive must appear inside a
    /// construct that is not open.
    fn compile_opening(&self, args: &str, stack: &mut StackView<'_>)
    -> Result<Opening, CompileError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Frame, NestingStack};

    struct TestLoop;

    impl Directive for TestLoop {
        fn has_closing(&self) -> bool {
            true
        }

        fn compile_opening(
            &self,
            args: &str,
            stack: &mut StackView<'_>,
        ) -> Result<Opening, CompileError> {
            let level = stack.depth().to_string();
            Ok(Opening::new(format!("loop ({args}):"))
                .with_context(FrameContext::new().with("level", level)))
        }
    }

    struct TestBreak;

    impl Directive for TestBreak {
        fn has_closing(&self) -> bool {
            false
        }

        fn compile_opening(
            &self,
            args: &str,
            stack: &mut StackView<'_>,
        ) -> Result<Opening, CompileError> {
            if stack.find("loop").is_none() {
                return Err(CompileError::invalid_argument(
                    "break",
                    args,
                    "break outside of a loop",
                ));
            }
            Ok(Opening::new("break;"))
        }
    }

    #[test]
    fn test_opening_reads_stack() {
        let mut stack = NestingStack::new();
        stack.push(Frame::new("if", FrameContext::new()));

        let opening = TestLoop.compile_opening("$x", &mut stack.view()).unwrap();
        assert_eq!(opening.code, "loop ($x):");
        assert_eq!(opening.context.get("level"), Some("1"));
    }

    #[test]
    fn test_opening_checks_ancestors() {
        let mut stack = NestingStack::new();
        assert!(TestBreak.compile_opening("", &mut stack.view()).is_err());

        stack.push(Frame::new("loop", FrameContext::new()));
        stack.push(Frame::new("if", FrameContext::new()));
        let opening = TestBreak.compile_opening("", &mut stack.view()).unwrap();
        assert_eq!(opening, Opening::new("break;"));
    }

    #[test]
    fn test_has_closing() {
        assert!(TestLoop.has_closing());
        assert!(!TestBreak.has_closing());
    }
}
