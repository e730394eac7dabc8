pub mod command;
pub mod conditional;
pub mod diagnostic;
pub mod header;
mod structural;

pub use diagnostic::Diagnostic;

use crate::document::Document;
use crate::schema::CommandSchema;

/// Node header/body boundary.
pub const END_OF_HEADERS: &str = "---";
/// Node terminator.
pub const END_OF_NODE: &str = "===";

/// Scanner entry point.
pub struct Scanner<'a> {
    document: &'a Document,
    schema: Option<&'a CommandSchema>,
}

impl<'a> Scanner<'a> {
    pub fn new(document: &'a Document) -> Self {
        Scanner {
            document,
            schema: None,
        }
    }

    /// Enable command validation. `None` leaves it disabled.
    pub fn with_schema(mut self, schema: Option<&'a CommandSchema>) -> Self {
        self.schema = schema;
        self
    }

    /// Scan the whole document in one pass and return every diagnostic,
    /// in the order the problems were found.
    pub fn scan(&self) -> Vec<Diagnostic> {
        let diagnostics = structural::scan_lines(self.document, self.schema);
        tracing::debug!(
            uri = self.document.uri(),
            lines = self.document.line_count(),
            schema = self.schema.is_some(),
            diagnostics = diagnostics.len(),
            "scanned document"
        );
        diagnostics
    }
}

/// Scan `document`, validating commands against `schema` when one is given.
pub fn scan(document: &Document, schema: Option<&CommandSchema>) -> Vec<Diagnostic> {
    Scanner::new(document).with_schema(schema).scan()
}

/// Scan `document` only if it is a Yarn document.
pub fn maybe_scan(document: &Document, schema: Option<&CommandSchema>) -> Option<Vec<Diagnostic>> {
    if !document.kind().is_yarn() {
        tracing::trace!(uri = document.uri(), "skipping non-yarn document");
        return None;
    }
    Some(scan(document, schema))
}
