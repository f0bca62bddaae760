//! Nesting stack of open closable directives.

use std::collections::BTreeMap;

use crate::CompileError;

/// Context payload attached to a frame by the directive that opened it.
///
/// Keys and values are plain strings (e.g. the loop binding of a `foreach`,
/// or the branch state of an `if`). The map is ordered so frames compare and
/// print deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameContext {
    values: BTreeMap<String, String>,
}

impl FrameContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a value, replacing any previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Get a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One open closable directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Canonical name of the directive that opened the frame.
    pub name: String,
    /// Payload set by that directive.
    pub context: FrameContext,
}

impl Frame {
    #[must_use]
    pub fn new(name: impl Into<String>, context: FrameContext) -> Self {
        Self {
            name: name.into(),
            context,
        }
    }
}

/// Strictly LIFO stack of [`Frame`]s for one template compilation pass.
///
/// An empty stack is the normal state for top-level template code. Each pass
/// owns its own stack; nothing here is shared between passes.
///
/// # Example
///
/// ```
/// use juice_compiler::{Frame, FrameContext, NestingStack};
///
/// let mut stack = NestingStack::new();
/// stack.push(Frame::new("foreach", FrameContext::new().with("binding", "$item")));
/// stack.push(Frame::new("if", FrameContext::new()));
///
/// // Nested directives can look up their ancestors.
/// let the_loop = stack.find("foreach").unwrap();
/// assert_eq!(the_loop.context.get("binding"), Some("$item"));
///
/// // Closing must match the top frame.
/// assert!(stack.pop("foreach").is_err());
/// assert_eq!(stack.pop("if").unwrap().name, "if");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NestingStack {
    frames: Vec<Frame>,
}

impl NestingStack {
    /// Create an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a frame on top.
    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Top frame, or `None` outside any directive.
    #[must_use]
    pub fn peek(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Remove and return the top frame if its name is `expected_name`.
    ///
    /// The stack is left unchanged on failure.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::NestingMismatch`] if the stack is empty or the
    /// top frame has a different name.
    pub fn pop(&mut self, expected_name: &str) -> Result<Frame, CompileError> {
        expect_top(&self.frames, expected_name)?;
        self.frames.pop().ok_or_else(|| CompileError::NestingMismatch {
            expected: expected_name.to_owned(),
            found: None,
        })
    }

    /// Restricted view handed to a directive while it compiles.
    pub fn view(&mut self) -> StackView<'_> {
        StackView {
            frames: &mut self.frames,
        }
    }

    /// Put back the top frame's context after a failed directive call.
    pub(crate) fn restore_top_context(&mut self, context: FrameContext) {
        if let Some(top) = self.frames.last_mut() {
            top.context = context;
        }
    }

    /// Nearest enclosing frame with the given name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Frame> {
        self.frames.iter().rev().find(|frame| frame.name == name)
    }

    /// Number of open frames.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames from the outermost to the innermost.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    /// Frame names from the outermost to the innermost.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.frames.iter().map(|frame| frame.name.clone()).collect()
    }
}

/// A directive's access to the [`NestingStack`] during `compile_opening`.
///
/// Every open frame can be read, but only the innermost frame's context can be
/// changed. Frames are pushed and popped by the
/// [`TagCompiler`](crate::TagCompiler) alone, so a directive cannot change the
/// depth of the stack:
///
/// ```compile_fail
/// use juice_compiler::{Frame, FrameContext, NestingStack};
///
/// let mut stack = NestingStack::new();
/// let mut view = stack.view();
/// view.push(Frame::new("if", FrameContext::new()));
/// ```
#[derive(Debug)]
pub struct StackView<'a> {
    frames: &'a mut [Frame],
}

impl StackView<'_> {
    /// Innermost open frame.
    #[must_use]
    pub fn peek(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Context of the innermost frame if its name is `expected_name`.
    ///
    /// Continuation directives (`else`, `case`, ...) use this to update the
    /// state of the construct they continue.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::NestingMismatch`] if the stack is empty or the
    /// innermost frame has a different name.
    pub fn top_context_mut(
        &mut self,
        expected_name: &str,
    ) -> Result<&mut FrameContext, CompileError> {
        expect_top(self.frames, expected_name)?;
        self.frames
            .last_mut()
            .map(|frame| &mut frame.context)
            .ok_or_else(|| CompileError::NestingMismatch {
                expected: expected_name.to_owned(),
                found: None,
            })
    }

    /// Nearest enclosing frame with the given name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Frame> {
        self.frames.iter().rev().find(|frame| frame.name == name)
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

fn expect_top(frames: &[Frame], expected_name: &str) -> Result<(), CompileError> {
    match frames.last() {
        Some(top) if top.name == expected_name => Ok(()),
        top => Err(CompileError::NestingMismatch {
            expected: expected_name.to_owned(),
            found: top.map(|frame| frame.name.clone()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn frame(name: &str) -> Frame {
        Frame::new(name, FrameContext::new())
    }

    #[test]
    fn test_new_stack_is_empty() {
        let stack = NestingStack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.depth(), 0);
        assert!(stack.peek().is_none());
    }

    #[test]
    fn test_push_and_peek() {
        let mut stack = NestingStack::new();
        stack.push(frame("if"));
        stack.push(frame("foreach"));

        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.peek().map(|f| f.name.as_str()), Some("foreach"));
        assert_eq!(stack.names(), vec!["if".to_owned(), "foreach".to_owned()]);
    }

    #[test]
    fn test_pop_matching() {
        let mut stack = NestingStack::new();
        stack.push(Frame::new("if", FrameContext::new().with("branch", "if")));

        let popped = stack.pop("if").unwrap();
        assert_eq!(popped.context.get("branch"), Some("if"));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_pop_mismatch_leaves_stack_unchanged() {
        let mut stack = NestingStack::new();
        stack.push(frame("if"));
        let before = stack.clone();

        let err = stack.pop("foreach").unwrap_err();
        assert_eq!(
            err,
            CompileError::NestingMismatch {
                expected: "foreach".to_owned(),
                found: Some("if".to_owned()),
            }
        );
        assert_eq!(stack, before);
    }

    #[test]
    fn test_pop_empty() {
        let mut stack = NestingStack::new();
        let err = stack.pop("if").unwrap_err();
        assert_eq!(
            err,
            CompileError::NestingMismatch {
                expected: "if".to_owned(),
                found: None,
            }
        );
    }

    #[test]
    fn test_view_updates_top_context() {
        let mut stack = NestingStack::new();
        stack.push(frame("switch"));

        stack
            .view()
            .top_context_mut("switch")
            .unwrap()
            .set("cases", "1");
        assert_eq!(stack.peek().unwrap().context.get("cases"), Some("1"));

        let err = stack.view().top_context_mut("if").unwrap_err();
        assert_eq!(
            err,
            CompileError::NestingMismatch {
                expected: "if".to_owned(),
                found: Some("switch".to_owned()),
            }
        );
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_view_reads_every_frame() {
        let mut stack = NestingStack::new();
        stack.push(Frame::new("foreach", FrameContext::new().with("binding", "$row")));
        stack.push(frame("if"));

        let view = stack.view();
        assert_eq!(view.depth(), 2);
        assert_eq!(view.peek().map(|f| f.name.as_str()), Some("if"));
        assert_eq!(
            view.find("foreach").unwrap().context.get("binding"),
            Some("$row")
        );
    }

    #[test]
    fn test_restore_top_context() {
        let mut stack = NestingStack::new();
        stack.push(Frame::new("if", FrameContext::new().with("branch", "if")));
        let saved = stack.peek().unwrap().context.clone();

        stack.view().top_context_mut("if").unwrap().set("branch", "else");
        stack.restore_top_context(saved);
        assert_eq!(stack.peek().unwrap().context.get("branch"), Some("if"));
    }

    #[test]
    fn test_find_returns_nearest() {
        let mut stack = NestingStack::new();
        stack.push(Frame::new("foreach", FrameContext::new().with("binding", "$row")));
        stack.push(frame("if"));
        stack.push(Frame::new("foreach", FrameContext::new().with("binding", "$cell")));
        stack.push(frame("if"));

        let nearest = stack.find("foreach").unwrap();
        assert_eq!(nearest.context.get("binding"), Some("$cell"));
        assert!(stack.find("while").is_none());
    }

    #[test]
    fn test_frame_context() {
        let mut ctx = FrameContext::new();
        assert!(ctx.is_empty());
        ctx.set("a", "1");
        ctx.set("a", "2");
        assert_eq!(ctx.get("a"), Some("2"));
        assert_eq!(ctx.get("b"), None);
    }
}
