// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Source location tracking.

/// A position in the source code. Both fields are 1-based; zero means unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    pub fn is_valid(&self) -> bool {
        self.line > 0
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Precomputed line-start offsets for line-number → text lookup.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Byte offset of the start of each line. line_starts[0] is always 0.
    line_starts: Vec<usize>,
}

impl LineMap {
    /// Build a line map by scanning source for newlines. O(n).
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        LineMap { line_starts }
    }

    /// Get the source text of a 1-based line number, without its line terminator.
    pub fn line_text<'a>(&self, source: &'a str, line: u32) -> Option<&'a str> {
        let idx = (line as usize).checked_sub(1)?;
        let start = *self.line_starts.get(idx)?;
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&s| s.saturating_sub(1)) // exclude the \n
            .unwrap_or(source.len());
        let text = source.get(start..end)?;
        Some(text.strip_suffix('\r').unwrap_or(text))
    }

    /// Number of lines in the source.
    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source() {
        let lm = LineMap::new("");
        assert_eq!(lm.line_count(), 1);
        assert_eq!(lm.line_text("", 1), Some(""));
    }

    #[test]
    fn multi_line() {
        let src = "abc\ndef\nghi";
        let lm = LineMap::new(src);
        assert_eq!(lm.line_count(), 3);
        assert_eq!(lm.line_text(src, 1), Some("abc"));
        assert_eq!(lm.line_text(src, 2), Some("def"));
        assert_eq!(lm.line_text(src, 3), Some("ghi"));
        assert_eq!(lm.line_text(src, 0), None);
        assert_eq!(lm.line_text(src, 4), None);
    }

    #[test]
    fn crlf_line_endings() {
        let src = "fn main() {\r\n  return 0;\r\n}";
        let lm = LineMap::new(src);
        assert_eq!(lm.line_text(src, 1), Some("fn main() {"));
        assert_eq!(lm.line_text(src, 2), Some("  return 0;"));
        assert_eq!(lm.line_text(src, 3), Some("}"));
    }

    #[test]
    fn trailing_newline() {
        let src = "abc\n";
        let lm = LineMap::new(src);
        assert_eq!(lm.line_count(), 2);
        // Line 2 is empty (after trailing newline)
        assert_eq!(lm.line_text(src, 2), Some(""));
    }

    #[test]
    fn location_validity() {
        assert!(!Location::default().is_valid());
        assert!(Location::new(3, 1).is_valid());
        assert_eq!(Location::new(3, 7).to_string(), "3:7");
    }
}
