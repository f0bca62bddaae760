//! `include` directive.

use super::require_argument;
use crate::{CompileError, Directive, Opening, StackView};

/// `include <template>`
///
/// Standalone: the included template is resolved at runtime through the
/// `$_env` environment object.
pub struct Include;

impl Directive for Include {
    fn has_closing(&self) -> bool {
        false
    }

    fn compile_opening(
        &self,
        args: &str,
        _stack: &mut StackView<'_>,
    ) -> Result<Opening, CompileError> {
        let template = require_argument("include", args)?;
        Ok(Opening::new(format!("include $_env->template({template});")))
    }
}
