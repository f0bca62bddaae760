//! Loop directives: `foreach`, `for`, `while`.

use super::require_argument;
use crate::{CompileError, Directive, FrameContext, Opening, StackView};

/// `foreach <source> as <binding>` ... `/foreach`
///
/// The frame context holds `source` and `binding`, so nested directives can
/// find the enclosing loop variable with [`StackView::find`].
pub struct Foreach;

impl Directive for Foreach {
    fn has_closing(&self) -> bool {
        true
    }

    fn compile_opening(
        &self,
        args: &str,
        _stack: &mut StackView<'_>,
    ) -> Result<Opening, CompileError> {
        let argument = require_argument("foreach", args)?;
        let (source, binding) = split_binding(argument)
            .filter(|(source, binding)| !source.is_empty() && !binding.is_empty())
            .ok_or_else(|| {
                CompileError::invalid_argument("foreach", args, "expected `<source> as <binding>`")
            })?;

        Ok(
            Opening::new(format!("foreach ({source} as {binding}):")).with_context(
                FrameContext::new()
                    .with("source", source)
                    .with("binding", binding),
            ),
        )
    }
}

/// Split `<source> as <binding>` at the first `as` keyword with whitespace on
/// both sides. Any whitespace counts, including newlines from multi-line tags.
fn split_binding(argument: &str) -> Option<(&str, &str)> {
    const KEYWORD: &str = "as";
    argument.match_indices(KEYWORD).find_map(|(at, _)| {
        let source = &argument[..at];
        let binding = &argument[at + KEYWORD.len()..];
        let spaced =
            source.ends_with(char::is_whitespace) && binding.starts_with(char::is_whitespace);
        spaced.then(|| (source.trim(), binding.trim()))
    })
}

/// `for <init>; <condition>; <step>` ... `/for`
pub struct For;

impl Directive for For {
    fn has_closing(&self) -> bool {
        true
    }

    fn compile_opening(
        &self,
        args: &str,
        _stack: &mut StackView<'_>,
    ) -> Result<Opening, CompileError> {
        let argument = require_argument("for", args)?;
        let parts: Vec<&str> = argument.split(';').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(CompileError::invalid_argument(
                "for",
                args,
                "expected `<init>; <condition>; <step>`",
            ));
        }
        Ok(Opening::new(format!("for ({}):", parts.join("; "))))
    }
}

/// `while <condition>` ... `/while`
pub struct While;

impl Directive for While {
    fn has_closing(&self) -> bool {
        true
    }

    fn compile_opening(
        &self,
        args: &str,
        _stack: &mut StackView<'_>,
    ) -> Result<Opening, CompileError> {
        let condition = require_argument("while", args)?;
        Ok(Opening::new(format!("while ({condition}):")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NestingStack;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_foreach() {
        let mut stack = NestingStack::new();
        let opening = Foreach
            .compile_opening("$items as $item", &mut stack.view())
            .unwrap();

        assert_eq!(opening.code, "foreach ($items as $item):");
        assert_eq!(opening.context.get("source"), Some("$items"));
        assert_eq!(opening.context.get("binding"), Some("$item"));
    }

    #[test]
    fn test_foreach_key_value_binding() {
        let mut stack = NestingStack::new();
        let opening = Foreach
            .compile_opening("  $user->roles()  as $key => $role ", &mut stack.view())
            .unwrap();

        assert_eq!(opening.code, "foreach ($user->roles() as $key => $role):");
        assert_eq!(opening.context.get("binding"), Some("$key => $role"));
    }

    #[test]
    fn test_foreach_multiline_argument() {
        let mut stack = NestingStack::new();
        let opening = Foreach
            .compile_opening("$items\nas\t$item", &mut stack.view())
            .unwrap();

        assert_eq!(opening.code, "foreach ($items as $item):");
        assert_eq!(opening.context.get("source"), Some("$items"));
    }

    #[test]
    fn test_foreach_as_inside_names() {
        let mut stack = NestingStack::new();
        let opening = Foreach
            .compile_opening("$classes as $class", &mut stack.view())
            .unwrap();

        assert_eq!(opening.code, "foreach ($classes as $class):");
        assert_eq!(opening.context.get("binding"), Some("$class"));
    }

    #[test]
    fn test_foreach_invalid() {
        let mut stack = NestingStack::new();
        for args in ["$items", "as $item", "$items as ", ""] {
            let err = Foreach.compile_opening(args, &mut stack.view()).unwrap_err();
            assert!(
                matches!(&err, CompileError::InvalidArgument { directive, argument, .. }
                    if directive == "foreach" && argument == args),
                "unexpected error for {args:?}: {err}"
            );
        }
    }

    #[test]
    fn test_for() {
        let mut stack = NestingStack::new();
        let opening = For
            .compile_opening("$i = 0;$i < 10;  $i++", &mut stack.view())
            .unwrap();
        assert_eq!(opening.code, "for ($i = 0; $i < 10; $i++):");
    }

    #[test]
    fn test_for_wrong_clause_count() {
        let mut stack = NestingStack::new();
        assert!(For.compile_opening("$i = 0; $i < 10", &mut stack.view()).is_err());
        assert!(For.compile_opening("a; b; c; d", &mut stack.view()).is_err());
    }

    #[test]
    fn test_while() {
        let mut stack = NestingStack::new();
        let opening = While
            .compile_opening("$row = next($rows)", &mut stack.view())
            .unwrap();
        assert_eq!(opening.code, "while ($row = next($rows)):");
        assert!(opening.context.is_empty());
    }
}
