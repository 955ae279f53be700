// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Terminal formatter for diagnostics.
//!
//! Produces multi-line, color-coded output with the offending line and its
//! neighbours:
//!
//! ```text
//! error[E0200]: unknown identifier: x
//!   --> main.tz:3:13
//!     |
//!   2 | fn main() -> int {
//!   3 |     let y = x + 1;
//!     |             ^ not found in this scope
//!   4 | }
//!     |
//!     = help: declare `x` before using it
//! ```

use colored::{ColoredString, Colorize};

use tuz_ast::{LineMap, Location};

use crate::{Diagnostic, Severity};

const TAB_WIDTH: usize = 8;

/// Formats diagnostics for terminal output.
pub struct DiagnosticFormatter<'a> {
    source: Option<(&'a str, LineMap)>,
    file_name: Option<&'a str>,
}

impl<'a> DiagnosticFormatter<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source: Some((source, LineMap::new(source))),
            file_name: None,
        }
    }

    /// A formatter with no source text; locations are printed without
    /// context lines.
    pub fn without_source() -> Self {
        Self {
            source: None,
            file_name: None,
        }
    }

    pub fn with_file_name(mut self, name: &'a str) -> Self {
        self.file_name = Some(name);
        self
    }

    pub fn format(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();

        self.format_header(&mut out, diagnostic);

        if let Some(loc) = diagnostic.location {
            let file = self.file_name.unwrap_or("<source>");
            out.push_str(&format!(
                "  {} {}:{}:{}\n",
                "-->".blue(),
                file,
                loc.line,
                loc.column
            ));
            self.format_context(&mut out, diagnostic, loc);
        }

        self.format_footer(&mut out, diagnostic);
        out
    }

    fn format_header(&self, out: &mut String, diagnostic: &Diagnostic) {
        let severity = paint(diagnostic.severity, diagnostic.severity.as_str()).bold();

        if let Some(ref code) = diagnostic.code {
            out.push_str(&format!(
                "{}[{}]: {}\n",
                severity,
                paint(diagnostic.severity, &code.0).bold(),
                diagnostic.message.bold()
            ));
        } else {
            out.push_str(&format!("{}: {}\n", severity, diagnostic.message.bold()));
        }
    }

    /// The line before, the line itself with a caret under the column, and
    /// the line after. Blank neighbours are skipped.
    fn format_context(&self, out: &mut String, diagnostic: &Diagnostic, loc: Location) {
        let Some((source, line_map)) = &self.source else {
            return;
        };
        let Some(text) = line_map.line_text(source, loc.line) else {
            return;
        };

        let gutter_width = (loc.line + 1).to_string().len().max(2);
        let blank_gutter = " ".repeat(gutter_width + 1);

        out.push_str(&format!("{} {}\n", blank_gutter, "|".blue()));

        let before = loc.line.checked_sub(1).filter(|&n| n > 0);
        if let Some(prev) = before.and_then(|n| line_map.line_text(source, n)) {
            if !prev.trim().is_empty() {
                push_source_line(out, loc.line - 1, prev, gutter_width);
            }
        }

        push_source_line(out, loc.line, text, gutter_width);

        let pad = " ".repeat(visual_column(text, loc.column));
        let caret = paint(diagnostic.severity, "^").bold();
        match &diagnostic.label {
            Some(label) => out.push_str(&format!(
                "{} {} {}{} {}\n",
                blank_gutter,
                "|".blue(),
                pad,
                caret,
                paint(diagnostic.severity, label).bold()
            )),
            None => out.push_str(&format!("{} {} {}{}\n", blank_gutter, "|".blue(), pad, caret)),
        }

        if let Some(next) = line_map.line_text(source, loc.line + 1) {
            if !next.trim().is_empty() {
                push_source_line(out, loc.line + 1, next, gutter_width);
            }
        }

        if !diagnostic.notes.is_empty() || diagnostic.help.is_some() {
            out.push_str(&format!("{} {}\n", blank_gutter, "|".blue()));
        }
    }

    fn format_footer(&self, out: &mut String, diagnostic: &Diagnostic) {
        let indent = " ".repeat(3);

        for note in &diagnostic.notes {
            out.push_str(&format!(
                "{} {} {}: {}\n",
                indent,
                "=".cyan(),
                "note".cyan().bold(),
                note
            ));
        }

        if let Some(ref help) = diagnostic.help {
            out.push_str(&format!(
                "{} {} {}: {}\n",
                indent,
                "=".cyan(),
                "help".cyan().bold(),
                help
            ));
        }
    }
}

fn push_source_line(out: &mut String, line: u32, text: &str, gutter_width: usize) {
    out.push_str(&format!(
        "{:>width$} {} {}\n",
        line.to_string().blue().bold(),
        "|".blue(),
        expand_tabs(text),
        width = gutter_width + 1,
    ));
}

fn paint(severity: Severity, s: &str) -> ColoredString {
    match severity {
        Severity::Note => s.cyan(),
        Severity::Warning => s.yellow(),
        Severity::Error => s.red(),
        Severity::Fatal => s.magenta(),
    }
}

/// Display column (0-based) of the 1-based character `column` in `text`.
fn visual_column(text: &str, column: u32) -> usize {
    let mut width = 0;
    for ch in text.chars().take((column as usize).saturating_sub(1)) {
        if ch == '\t' {
            width = (width / TAB_WIDTH + 1) * TAB_WIDTH;
        } else {
            width += 1;
        }
    }
    width
}

fn expand_tabs(text: &str) -> String {
    if !text.contains('\t') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + TAB_WIDTH);
    let mut width = 0;
    for ch in text.chars() {
        if ch == '\t' {
            let next = (width / TAB_WIDTH + 1) * TAB_WIDTH;
            out.extend(std::iter::repeat(' ').take(next - width));
            width = next;
        } else {
            out.push(ch);
            width += 1;
        }
    }
    out
}
