//! Colored terminal output utilities.

use console::{Style, Term};

/// Terminal output formatter.
///
/// Compiled fragments go to stdout; diagnostics go to stderr.
pub(crate) struct Output {
    out: Term,
    err: Term,
    green: Style,
    red: Style,
    cyan_bold: Style,
    dim: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            green: Style::new().green(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
            dim: Style::new().dim(),
        }
    }

    /// Print a result line to stdout.
    pub(crate) fn line(&self, msg: &str) {
        let _ = self.out.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.err.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.err.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a highlighted message (cyan bold).
    pub(crate) fn highlight(&self, msg: &str) {
        let _ = self
            .err
            .write_line(&self.cyan_bold.apply_to(msg).to_string());
    }

    /// Style secondary text.
    pub(crate) fn dim(&self, msg: &str) -> String {
        self.dim.apply_to(msg).to_string()
    }
}
