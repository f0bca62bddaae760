//! Conditional directives: `if`, `elseif`, `else`.
//!
//! The `if` frame records which branch was compiled last under the `branch`
//! key (`if`, `elseif` or `else`). Branches are closed together by `endif`.

use super::{forbid_argument, require_argument};
use crate::{CompileError, Directive, FrameContext, Opening, StackView};

const IF: &str = "if";
const BRANCH: &str = "branch";

/// `if <condition>` ... `/if`
pub struct If;

impl Directive for If {
    fn has_closing(&self) -> bool {
        true
    }

    fn compile_opening(
        &self,
        args: &str,
        _stack: &mut StackView<'_>,
    ) -> Result<Opening, CompileError> {
        let condition = require_argument(IF, args)?;
        Ok(Opening::new(format!("if ({condition}):"))
            .with_context(FrameContext::new().with(BRANCH, IF)))
    }
}

/// `elseif <condition>`, continuing the innermost `if`.
pub struct ElseIf;

impl Directive for ElseIf {
    fn has_closing(&self) -> bool {
        false
    }

    fn compile_opening(
        &self,
        args: &str,
        stack: &mut StackView<'_>,
    ) -> Result<Opening, CompileError> {
        let condition = require_argument("elseif", args)?;
        continue_branch(stack, "elseif", args)?;
        Ok(Opening::new(format!("elseif ({condition}):")))
    }
}

/// `else`, continuing the innermost `if`. Allowed once per `if`.
pub struct Else;

impl Directive for Else {
    fn has_closing(&self) -> bool {
        false
    }

    fn compile_opening(
        &self,
        args: &str,
        stack: &mut StackView<'_>,
    ) -> Result<Opening, CompileError> {
        forbid_argument("else", args)?;
        continue_branch(stack, "else", args)?;
        Ok(Opening::new("else:"))
    }
}

/// Move the innermost `if` frame to `branch`, rejecting anything after `else`.
fn continue_branch(
    stack: &mut StackView<'_>,
    branch: &str,
    args: &str,
) -> Result<(), CompileError> {
    let context = stack.top_context_mut(IF)?;
    if context.get(BRANCH) == Some("else") {
        return Err(CompileError::invalid_argument(
            branch,
            args,
            "branch follows else in the same if",
        ));
    }
    context.set(BRANCH, branch);
    Ok(())
}
