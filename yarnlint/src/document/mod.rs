pub mod position;

use std::path::Path;

pub use position::{Position, SourceRange};

/// What kind of content a document holds. Only Yarn documents are scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentKind {
    Yarn,
    Other(String),
}

impl ContentKind {
    /// Infer the content kind from a file extension (`.yarn` is Yarn).
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yarn") => ContentKind::Yarn,
            Some(ext) => ContentKind::Other(ext.to_ascii_lowercase()),
            None => ContentKind::Other(String::new()),
        }
    }

    pub fn is_yarn(&self) -> bool {
        matches!(self, ContentKind::Yarn)
    }
}

/// One line of a document, without its line terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    /// Byte offset of the first character of this line in the source.
    pub offset: usize,
}

/// An immutable, line-addressable document with a stable identity.
///
/// Lines are split on `\n` with a trailing `\r` removed, so a source ending
/// in a newline has a final empty line (the same line count an editor shows).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    uri: String,
    kind: ContentKind,
    lines: Vec<Line>,
    source_len: usize,
}

impl Document {
    pub fn new(uri: impl Into<String>, kind: ContentKind, source: &str) -> Self {
        let mut lines = Vec::new();
        let mut offset = 0;
        for raw in source.split('\n') {
            let text = raw.strip_suffix('\r').unwrap_or(raw);
            lines.push(Line {
                text: text.to_string(),
                offset,
            });
            offset += raw.len() + 1;
        }
        Document {
            uri: uri.into(),
            kind,
            lines,
            source_len: source.len(),
        }
    }

    /// Shorthand for a Yarn document.
    pub fn yarn(uri: impl Into<String>, source: &str) -> Self {
        Document::new(uri, ContentKind::Yarn, source)
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn kind(&self) -> &ContentKind {
        &self.kind
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.text.as_str())
    }

    /// Map a (line, character column) position to a byte offset in the
    /// original source. Out-of-range positions clamp to the line or source end.
    pub fn byte_offset(&self, position: Position) -> usize {
        let Some(line) = self.lines.get(position.line) else {
            return self.source_len;
        };
        let within = line
            .text
            .char_indices()
            .nth(position.column)
            .map(|(i, _)| i)
            .unwrap_or(line.text.len());
        line.offset + within
    }

    /// Byte span of a range, suitable for `codespan-reporting` labels.
    pub fn byte_span(&self, range: SourceRange) -> std::ops::Range<usize> {
        let start = self.byte_offset(range.start);
        let end = self.byte_offset(range.end).max(start);
        start..end
    }
}
