use std::fmt;

use codespan_reporting::diagnostic::{Diagnostic as Report, Label, Severity};
use serde::Serialize;

use crate::document::{Document, SourceRange};

/// A problem found in a document, anchored to an exact source range.
///
/// There is a single severity: every diagnostic is an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub range: SourceRange,
    pub message: String,
}

impl Diagnostic {
    pub fn error(range: SourceRange, message: impl Into<String>) -> Self {
        Diagnostic {
            range,
            message: message.into(),
        }
    }

    /// Convert to a codespan-reporting diagnostic for display.
    /// `document` maps the line/column range back to a byte span.
    pub fn to_report(&self, file_id: usize, document: &Document) -> Report<usize> {
        Report::new(Severity::Error)
            .with_message(&self.message)
            .with_labels(vec![Label::primary(
                file_id,
                document.byte_span(self.range),
            )])
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.range.start, self.message)
    }
}
