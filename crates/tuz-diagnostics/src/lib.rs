// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Diagnostics for the tuz compiler.
//!
//! Compiler errors are converted to a single `Diagnostic` type through the
//! `ToDiagnostic` trait. The CLI renders them for a terminal with
//! `formatter::DiagnosticFormatter` or as JSON with `json::to_json_report`.

pub mod codes;
pub mod convert;
pub mod formatter;
pub mod json;

use serde::Serialize;
use tuz_ast::Location;

// ============================================================================
// Core Types
// ============================================================================

/// A compiler diagnostic with context for display.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: Option<ErrorCode>,
    pub message: String,
    /// Where the problem is. `None` or an invalid location means unknown.
    pub location: Option<Location>,
    /// Short text printed next to the caret.
    pub label: Option<String>,
    pub notes: Vec<String>,
    pub help: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Note,
    Warning,
    Error,
    /// The compiler itself failed; no further processing is meaningful.
    Fatal,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }

    /// Errors and fatal errors stop compilation.
    pub fn is_error(self) -> bool {
        self >= Severity::Error
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error code like E0200.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorCode(pub String);

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Builder API
// ============================================================================

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            location: None,
            label: None,
            notes: Vec::new(),
            help: None,
        }
    }

    pub fn note(message: impl Into<String>) -> Self {
        Self::new(Severity::Note, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        Self::new(Severity::Fatal, message)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(ErrorCode(code.into()));
        self
    }

    /// Attach the primary location. Invalid locations are dropped.
    pub fn at(mut self, loc: Location) -> Self {
        self.location = loc.is_valid().then_some(loc);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

// ============================================================================
// Conversion Trait
// ============================================================================

/// Convert a compiler error into a diagnostic.
pub trait ToDiagnostic {
    fn to_diagnostic(&self) -> Diagnostic;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let d = Diagnostic::error("boom")
            .with_code("E0200")
            .at(Location::new(3, 7))
            .with_label("here")
            .with_note("first")
            .with_note("second")
            .with_help("try again");

        assert_eq!(d.severity, Severity::Error);
        assert_eq!(d.code, Some(ErrorCode("E0200".into())));
        assert_eq!(d.location, Some(Location::new(3, 7)));
        assert_eq!(d.label.as_deref(), Some("here"));
        assert_eq!(d.notes, vec!["first", "second"]);
        assert_eq!(d.help.as_deref(), Some("try again"));
    }

    #[test]
    fn unknown_location_is_dropped() {
        let d = Diagnostic::warning("w").at(Location::default());
        assert!(d.location.is_none());
    }

    #[test]
    fn severity_ordering() {
        assert!(!Severity::Note.is_error());
        assert!(!Severity::Warning.is_error());
        assert!(Severity::Error.is_error());
        assert!(Severity::Fatal.is_error());
        assert_eq!(Severity::Fatal.to_string(), "fatal");
    }
}
