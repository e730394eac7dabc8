use std::fmt;

use serde::Serialize;

/// A 0-based (line, column) position. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

/// Displays as 1-based `line:column`.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// A half-open span `start..end` between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SourceRange {
    pub start: Position,
    pub end: Position,
}

impl SourceRange {
    pub fn new(start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        SourceRange {
            start: Position::new(start_line, start_col),
            end: Position::new(end_line, end_col),
        }
    }

    /// A span of columns on a single line.
    pub fn on_line(line: usize, start_col: usize, end_col: usize) -> Self {
        SourceRange::new(line, start_col, line, end_col)
    }

    /// Whole lines `start_line..end_line`, from column 0 to column 0.
    pub fn lines(start_line: usize, end_line: usize) -> Self {
        SourceRange::new(start_line, 0, end_line, 0)
    }
}
