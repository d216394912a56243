//! Terminal reporting for sidebar commands.
//!
//! Command results (JSON, navigation lines) go to stdout so they can be piped;
//! progress and diagnostics go to stderr with color.

use console::{Style, Term};
use serde::Serialize;
use sidebars_core::BrokenReference;

use crate::error::CliError;

pub(crate) struct Output {
    stdout: Term,
    stderr: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            stdout: Term::stdout(),
            stderr: Term::stderr(),
        }
    }

    /// Write `value` to stdout as pretty-printed JSON.
    pub(crate) fn json<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), CliError> {
        let json = serde_json::to_string_pretty(value)?;
        self.line(&json)
    }

    /// Write a result line to stdout.
    pub(crate) fn line(&self, text: &str) -> Result<(), CliError> {
        Ok(self.stdout.write_line(text)?)
    }

    /// Section heading on stderr.
    pub(crate) fn heading(&self, text: &str) {
        self.diagnostic(&Style::new().cyan().bold(), text);
    }

    /// Plain progress line on stderr.
    pub(crate) fn status(&self, text: &str) {
        let _ = self.stderr.write_line(text);
    }

    /// Passing check on stderr.
    pub(crate) fn ok(&self, text: &str) {
        self.diagnostic(&Style::new().green(), text);
    }

    /// One broken document reference, with its sidebar trail.
    pub(crate) fn broken(&self, reference: &BrokenReference) {
        self.diagnostic(&Style::new().yellow(), &format!("  - {reference}"));
    }

    /// Fatal error on stderr.
    pub(crate) fn error(&self, text: &str) {
        self.diagnostic(&Style::new().red(), text);
    }

    fn diagnostic(&self, style: &Style, text: &str) {
        let _ = self.stderr.write_line(&style.apply_to(text).to_string());
    }
}
