//! Compiler error types.

/// Error raised while building a registry or compiling a directive occurrence.
///
/// Every variant carries the directive name involved so callers can produce a
/// diagnostic without extra bookkeeping. Compilation fails fast: the first
/// error aborts the call and nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// No canonical entry or alias exists for the name.
    #[error("Unknown directive {0}")]
    UnknownDirective(String),

    /// A canonical entry with this name is already registered.
    #[error("Directive {0} is already registered")]
    DuplicateRegistration(String),

    /// The alias name already denotes a canonical entry or another alias.
    #[error("Alias {0} collides with an existing directive or alias")]
    AliasCollision(String),

    /// The alias points at a name that is not a canonical entry.
    #[error("Alias {alias} points to unknown directive {target}")]
    UnknownAliasTarget {
        /// Alias being registered.
        alias: String,
        /// Requested canonical target.
        target: String,
    },

    /// The top of the nesting stack is not the directive being closed or continued.
    #[error("{}", nesting_message(.expected, .found.as_deref()))]
    NestingMismatch {
        /// Directive name expected at the top of the stack.
        expected: String,
        /// Name actually at the top, or `None` for an empty stack.
        found: Option<String>,
    },

    /// A directive rejected its argument text.
    #[error("Invalid argument for {directive} ({argument:?}): {reason}")]
    InvalidArgument {
        /// Canonical directive name.
        directive: String,
        /// Raw argument text as given by the caller.
        argument: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The template ended while closable directives were still open.
    #[error("Unterminated directives: {}", open.join(", "))]
    Unterminated {
        /// Names of the open directives, outermost first.
        open: Vec<String>,
    },
}

impl CompileError {
    pub(crate) fn invalid_argument(
        directive: &str,
        argument: &str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            directive: directive.to_owned(),
            argument: argument.to_owned(),
            reason: reason.into(),
        }
    }
}

fn nesting_message(expected: &str, found: Option<&str>) -> String {
    match found {
        Some(found) => format!("Expected open directive {expected}, found {found}"),
        None => format!("Expected open directive {expected}, but no directive is open"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_directive_message() {
        let err = CompileError::UnknownDirective("foreach".to_owned());
        assert_eq!(err.to_string(), "Unknown directive foreach");
    }

    #[test]
    fn test_nesting_mismatch_message() {
        let err = CompileError::NestingMismatch {
            expected: "foreach".to_owned(),
            found: Some("if".to_owned()),
        };
        assert_eq!(err.to_string(), "Expected open directive foreach, found if");

        let err = CompileError::NestingMismatch {
            expected: "if".to_owned(),
            found: None,
        };
        assert_eq!(
            err.to_string(),
            "Expected open directive if, but no directive is open"
        );
    }

    #[test]
    fn test_invalid_argument_message() {
        let err = CompileError::invalid_argument(
            "foreach",
            "$items",
            "expected `<source> as <binding>`",
        );
        assert_eq!(
            err.to_string(),
            r#"Invalid argument for foreach ("$items"): expected `<source> as <binding>`"#
        );
    }

    #[test]
    fn test_unterminated_message() {
        let err = CompileError::Unterminated {
            open: vec!["if".to_owned(), "foreach".to_owned()],
        };
        assert_eq!(err.to_string(), "Unterminated directives: if, foreach");
    }
}
