//! Terminal diagnostics for resolution errors and skipped projects.
//!
//! Output follows the rustc layout: a severity line, an optional `-->`
//! location, then `= note:` and `= help:` lines.

use std::fmt::{self, Write as _};
use std::path::PathBuf;

/// Help texts shared between commands.
pub mod suggestions {
    /// No snapshot was found.
    pub const NO_SOLUTION: &str =
        "pass `--solution <path>` or run from a folder containing Solution.toml";

    /// A project entry failed to load.
    pub const PROJECT_SKIPPED: &str =
        "fix the project entry in the solution snapshot, or add it to `ignore`";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn label(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }

    fn ansi(self) -> &'static str {
        match self {
            Severity::Error => "1;31",
            Severity::Warning => "1;33",
        }
    }
}

/// A reportable problem.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub location: Option<PathBuf>,
    pub notes: Vec<String>,
    pub help: Vec<String>,
}

impl Diagnostic {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            severity,
            message: message.into(),
            location: None,
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Attach a `note:` line.
    pub fn with_context(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Attach a `help:` line.
    pub fn with_suggestion(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }

    /// Point at the file the problem was found in.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Render for a terminal, with ANSI colors when `color` is set.
    pub fn format(&self, color: bool) -> String {
        let paint = |code: &str, text: &str| {
            if color {
                format!("\x1b[{}m{}\x1b[0m", code, text)
            } else {
                text.to_string()
            }
        };

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}: {}",
            paint(self.severity.ansi(), self.severity.label()),
            self.message
        );
        if let Some(path) = &self.location {
            let _ = writeln!(out, "  {} {}", paint("1;34", "-->"), path.display());
        }
        for note in &self.notes {
            let _ = writeln!(out, "  = {}: {}", paint("1", "note"), note);
        }
        for help in &self.help {
            let _ = writeln!(out, "  = {}: {}", paint("1;32", "help"), help);
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
