//! Pretty error reporting using ariadne
//!
//! The analysis passes only know source line numbers; when the driver still
//! holds the source text, these helpers render diagnostics with the
//! offending line underlined.

use ariadne::{Color, Label, Report, ReportKind, Source};
use std::ops::Range;

use crate::errors::CminusError;

/// Byte range of a 1-based source line; `0..0` when the line does not exist
/// (e.g. the synthetic line 0 carried by builtin declarations)
pub fn line_span(source: &str, lineno: usize) -> Range<usize> {
    if lineno == 0 {
        return 0..0;
    }

    let mut start = 0;
    let mut current = 1;
    for (i, c) in source.char_indices() {
        if current == lineno && c == '\n' {
            return start..i;
        }
        if c == '\n' {
            current += 1;
            start = i + 1;
        }
    }

    if current == lineno {
        start..source.len()
    } else {
        0..0
    }
}

fn report_kind(error: &CminusError) -> &'static str {
    match error {
        CminusError::Symbol { .. } => "Symbol error",
        CminusError::Type { .. } => "Type error",
    }
}

/// Print a diagnostic with source context
pub fn print_error(source: &str, error: &CminusError) {
    let span = line_span(source, error.lineno());

    Report::build(ReportKind::Error, span.clone())
        .with_message(report_kind(error))
        .with_label(
            Label::new(span)
                .with_message(error.message())
                .with_color(Color::Red),
        )
        .finish()
        .print(Source::from(source))
        .expect("failed to print error report");
}

/// Print every collected diagnostic
pub fn print_errors(source: &str, errors: &[CminusError]) {
    for error in errors {
        print_error(source, error);
    }
}

/// Format a diagnostic as a string (for testing)
pub fn format_error(source: &str, error: &CminusError) -> String {
    let span = line_span(source, error.lineno());
    let mut output = Vec::new();

    Report::build(ReportKind::Error, span.clone())
        .with_message(report_kind(error))
        .with_label(
            Label::new(span)
                .with_message(error.message())
                .with_color(Color::Red),
        )
        .finish()
        .write(Source::from(source), &mut output)
        .expect("failed to write error report");

    String::from_utf8(output).expect("error report should be valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_span() {
        let source = "line1\nline2\nline3";

        assert_eq!(line_span(source, 1), 0..5);
        assert_eq!(line_span(source, 2), 6..11);
        assert_eq!(line_span(source, 3), 12..17);
        assert_eq!(line_span(source, 0), 0..0);
        assert_eq!(line_span(source, 9), 0..0);
    }

    #[test]
    fn test_format_error_mentions_message() {
        let source = "int x;\nvoid x;\n";
        let error = CminusError::symbol("symbol already declared for current scope", 2);
        let rendered = format_error(source, &error);
        assert!(rendered.contains("symbol already declared for current scope"));
        assert!(rendered.contains("Symbol error"));
    }

    #[test]
    fn test_display_format() {
        let error = CminusError::type_error("type conflict in assignment", 7);
        assert_eq!(
            error.to_string(),
            "Type error at line 7: type conflict in assignment"
        );
    }
}
