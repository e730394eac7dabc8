use std::collections::HashMap;

use crate::document::SourceRange;
use crate::scanner::Diagnostic;

const SEPARATOR: &str = ": ";

/// The `name: value` headers of the node currently being scanned.
#[derive(Debug, Default)]
pub struct Headers {
    entries: HashMap<String, String>,
}

impl Headers {
    /// Record one header line. Blank lines are ignored; a line without a
    /// `": "` separator yields a diagnostic spanning the whole line.
    pub fn parse_line(&mut self, line: usize, text: &str) -> Option<Diagnostic> {
        if text.trim().is_empty() {
            return None;
        }
        match text.split_once(SEPARATOR) {
            Some((name, value)) => {
                self.entries
                    .insert(name.to_string(), value.trim().to_string());
                None
            }
            None => Some(Diagnostic::error(
                SourceRange::on_line(line, 0, text.chars().count()),
                r#"Headers must be of the form "name: value""#,
            )),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Check for a non-blank `title`. The diagnostic covers the header block,
    /// from its first line up to the `---` boundary.
    pub fn check_title(&self, header_start: usize, boundary: usize) -> Option<Diagnostic> {
        match self.get("title") {
            Some(title) if !title.trim().is_empty() => None,
            _ => Some(Diagnostic::error(
                SourceRange::lines(header_start, boundary),
                r#"Node is missing a "title" header."#,
            )),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
