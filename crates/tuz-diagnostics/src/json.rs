//! JSON diagnostic output for machine consumption.
//!
//! Each diagnostic carries its location and, when the source text is
//! available, the offending line. Use `--format json` to get this output.

use serde::Serialize;
use tuz_ast::LineMap;

use crate::{codes::ErrorCodeRegistry, Diagnostic, Severity};

/// A complete JSON diagnostic report for one run.
#[derive(Debug, Serialize)]
pub struct DiagnosticReport {
    /// Schema version for forward compatibility.
    pub version: u32,
    /// The file that was processed.
    pub file: String,
    /// Whether the run succeeded (no errors).
    pub success: bool,
    /// The compilation phase that produced these diagnostics.
    pub phase: String,
    pub diagnostics: Vec<JsonDiagnostic>,
    pub error_count: usize,
    pub warning_count: usize,
}

/// A single diagnostic in JSON form.
#[derive(Debug, Serialize)]
pub struct JsonDiagnostic {
    /// "note", "warning", "error" or "fatal".
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Error category (e.g., "Resolution", "Type").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

/// A source location with line/column (1-based).
#[derive(Debug, Serialize)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
    /// The source line text, when the source was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_line: Option<String>,
}

/// Convert diagnostics to a structured JSON report.
pub fn to_json_report(
    diagnostics: &[Diagnostic],
    source: Option<&str>,
    file: &str,
    phase: &str,
) -> DiagnosticReport {
    let registry = ErrorCodeRegistry::default();
    let line_map = source.map(|src| (src, LineMap::new(src)));
    let mut error_count = 0;
    let mut warning_count = 0;

    let json_diags: Vec<JsonDiagnostic> = diagnostics
        .iter()
        .map(|d| {
            match d.severity {
                Severity::Error | Severity::Fatal => error_count += 1,
                Severity::Warning => warning_count += 1,
                Severity::Note => {}
            }

            let code = d.code.as_ref().map(|c| c.0.clone());
            let category = code
                .as_deref()
                .and_then(|c| registry.get(c))
                .map(|info| info.category.to_string());

            let location = d.location.map(|loc| SourceLocation {
                line: loc.line,
                column: loc.column,
                source_line: line_map
                    .as_ref()
                    .and_then(|(src, map)| map.line_text(src, loc.line))
                    .map(str::to_string),
            });

            JsonDiagnostic {
                severity: d.severity,
                code,
                category,
                message: d.message.clone(),
                location,
                label: d.label.clone(),
                notes: d.notes.clone(),
                help: d.help.clone(),
            }
        })
        .collect();

    DiagnosticReport {
        version: 1,
        file: file.to_string(),
        success: error_count == 0,
        phase: phase.to_string(),
        diagnostics: json_diags,
        error_count,
        warning_count,
    }
}

/// Serialize a diagnostic report to pretty JSON.
pub fn to_json_string(report: &DiagnosticReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}
