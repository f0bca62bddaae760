//! `switch` with its `case` and `default` continuations.
//!
//! The `switch` frame counts compiled cases under `cases`; every case after
//! the first is prefixed with `break;` so cases do not fall through.

use super::{forbid_argument, require_argument};
use crate::{CompileError, Directive, FrameContext, Opening, StackView};

const SWITCH: &str = "switch";
const CASES: &str = "cases";
const HAS_DEFAULT: &str = "default";

/// `switch <subject>` ... `/switch`
pub struct Switch;

impl Directive for Switch {
    fn has_closing(&self) -> bool {
        true
    }

    fn compile_opening(
        &self,
        args: &str,
        _stack: &mut StackView<'_>,
    ) -> Result<Opening, CompileError> {
        let subject = require_argument(SWITCH, args)?;
        Ok(Opening::new(format!("switch ({subject}):"))
            .with_context(FrameContext::new().with(CASES, "0")))
    }
}

/// `case <value>`, continuing the innermost `switch`.
pub struct Case;

impl Directive for Case {
    fn has_closing(&self) -> bool {
        false
    }

    fn compile_opening(
        &self,
        args: &str,
        stack: &mut StackView<'_>,
    ) -> Result<Opening, CompileError> {
        let value = require_argument("case", args)?;
        let prefix = next_case(stack.top_context_mut(SWITCH)?);
        Ok(Opening::new(format!("{prefix}case {value}:")))
    }
}

/// `default`, continuing the innermost `switch`. Allowed once per `switch`.
pub struct DefaultCase;

impl Directive for DefaultCase {
    fn has_closing(&self) -> bool {
        false
    }

    fn compile_opening(
        &self,
        args: &str,
        stack: &mut StackView<'_>,
    ) -> Result<Opening, CompileError> {
        forbid_argument("default", args)?;
        let context = stack.top_context_mut(SWITCH)?;
        if context.get(HAS_DEFAULT).is_some() {
            return Err(CompileError::invalid_argument(
                "default",
                args,
                "switch already has a default case",
            ));
        }
        let prefix = next_case(context);
        context.set(HAS_DEFAULT, "true");
        Ok(Opening::new(format!("{prefix}default:")))
    }
}

/// Count one more case and return the prefix that ends the previous one.
fn next_case(context: &mut FrameContext) -> &'static str {
    let cases: usize = context
        .get(CASES)
        .and_then(|count| count.parse().ok())
        .unwrap_or(0);
    context.set(CASES, (cases + 1).to_string());
    if cases == 0 { "" } else { "break; " }
}
