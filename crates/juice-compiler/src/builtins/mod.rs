//! Built-in directive set.
//!
//! Generates PHP alternative control syntax (`if (...):` ... `endif`), so the
//! generic `end<name>` closing statement produced by the
//! [`TagCompiler`](crate::TagCompiler) is valid for every closable built-in.
//!
//! | Directive | Closable | Continues |
//! |-----------|----------|-----------|
//! | `if`      | yes      |           |
//! | `elseif`  | no       | `if`      |
//! | `else`    | no       | `if`      |
//! | `foreach` | yes      |           |
//! | `for`     | yes      |           |
//! | `while`   | yes      |           |
//! | `switch`  | yes      |           |
//! | `case`    | no       | `switch`  |
//! | `default` | no       | `switch`  |
//! | `include` | no       |           |
//!
//! Continuation directives do not open a frame of their own: they require the
//! construct they continue to be the innermost open directive and update its
//! frame context.

mod conditional;
mod include;
mod loops;
mod switch;

use std::sync::Arc;

use crate::{CompileError, Directive};

pub use conditional::{Else, ElseIf, If};
pub use include::Include;
pub use loops::{For, Foreach, While};
pub use switch::{Case, DefaultCase, Switch};

/// All built-in directives with their canonical names.
#[must_use]
pub fn all() -> Vec<(&'static str, Arc<dyn Directive>)> {
    vec![
        entry("if", If),
        entry("elseif", ElseIf),
        entry("else", Else),
        entry("foreach", Foreach),
        entry("for", For),
        entry("while", While),
        entry("switch", Switch),
        entry("case", Case),
        entry("default", DefaultCase),
        entry("include", Include),
    ]
}

fn entry<D: Directive + 'static>(
    name: &'static str,
    directive: D,
) -> (&'static str, Arc<dyn Directive>) {
    (name, Arc::new(directive))
}

/// Trimmed argument text, rejecting an empty one.
fn require_argument<'a>(directive: &str, args: &'a str) -> Result<&'a str, CompileError> {
    let trimmed = args.trim();
    if trimmed.is_empty() {
        return Err(CompileError::invalid_argument(
            directive,
            args,
            "argument is required",
        ));
    }
    Ok(trimmed)
}

fn forbid_argument(directive: &str, args: &str) -> Result<(), CompileError> {
    if args.trim().is_empty() {
        Ok(())
    } else {
        Err(CompileError::invalid_argument(
            directive,
            args,
            "takes no argument",
        ))
    }
}
