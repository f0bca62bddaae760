//! Compiled code fragments.

use std::fmt;

/// Code-embedding delimiter pair.
///
/// Marks the wrapped text as code to execute rather than literal template output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    /// Opening marker (default `<?php`).
    pub open: String,
    /// Closing marker (default `?>`).
    pub close: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            open: "<?php".to_owned(),
            close: "?>".to_owned(),
        }
    }
}

impl Delimiters {
    #[must_use]
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }
}

/// Generated code wrapped in code-embedding delimiters.
///
/// Produced by [`TagCompiler`](crate::TagCompiler) for one directive
/// occurrence and spliced back into the template output by the caller.
///
/// # Example
///
/// ```
/// use juice_compiler::{Delimiters, Fragment};
///
/// let fragment = Fragment::wrap("  if ($x > 1):\n", &Delimiters::default());
/// assert_eq!(fragment.code(), "if ($x > 1):");
/// assert_eq!(fragment.to_string(), "<?php if ($x > 1): ?>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    rendered: String,
    code_start: usize,
    code_len: usize,
}

impl Fragment {
    /// Trim `code` and wrap it in `delimiters`.
    #[must_use]
    pub fn wrap(code: &str, delimiters: &Delimiters) -> Self {
        let code = code.trim();
        let rendered = format!("{} {code} {}", delimiters.open, delimiters.close);
        Self {
            rendered,
            code_start: delimiters.open.len() + 1,
            code_len: code.len(),
        }
    }

    /// Generated statement without delimiters.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.rendered[self.code_start..self.code_start + self.code_len]
    }

    /// Full wrapped text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.rendered
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.rendered
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl AsRef<str> for Fragment {
    fn as_ref(&self) -> &str {
        &self.rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_default_delimiters() {
        let fragment = Fragment::wrap("endif", &Delimiters::default());
        assert_eq!(fragment.as_str(), "<?php endif ?>");
        assert_eq!(fragment.code(), "endif");
    }

    #[test]
    fn test_wrap_trims_whitespace() {
        let fragment = Fragment::wrap("\n\t while ($running):  \n", &Delimiters::default());
        assert_eq!(fragment.as_str(), "<?php while ($running): ?>");
    }

    #[test]
    fn test_wrap_custom_delimiters() {
        let delimiters = Delimiters::new("{%", "%}");
        let fragment = Fragment::wrap("else:", &delimiters);
        assert_eq!(fragment.to_string(), "{% else: %}");
        assert_eq!(fragment.code(), "else:");
    }

    #[test]
    fn test_into_string() {
        let fragment = Fragment::wrap("else:", &Delimiters::default());
        assert_eq!(fragment.into_string(), "<?php else: ?>".to_owned());
    }
}
