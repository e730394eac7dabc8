use crate::document::{Document, SourceRange};
use crate::scanner::command::CommandLine;
use crate::scanner::conditional::ConditionalStack;
use crate::scanner::header::Headers;
use crate::scanner::{Diagnostic, END_OF_HEADERS, END_OF_NODE};
use crate::schema::{CommandSchema, validate_command};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the mode machine over every line of `document`.
pub fn scan_lines(document: &Document, schema: Option<&CommandSchema>) -> Vec<Diagnostic> {
    let mut state = ScanState::new(schema);
    for (index, text) in document.lines().enumerate() {
        state.process_line(index, text);
    }
    state.finalize(document.line_count())
}

// ---------------------------------------------------------------------------
// Scan state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Header,
    Body,
}

/// Everything one scan owns. Header and conditional state is reset at
/// every node terminator.
struct ScanState<'a> {
    schema: Option<&'a CommandSchema>,
    mode: Mode,
    /// First line of the current node's header block.
    header_start: usize,
    headers: Headers,
    conditionals: ConditionalStack,
    /// Whether the last non-blank line was a node terminator.
    ended_on_terminator: bool,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> ScanState<'a> {
    fn new(schema: Option<&'a CommandSchema>) -> Self {
        ScanState {
            schema,
            mode: Mode::Header,
            header_start: 0,
            headers: Headers::default(),
            conditionals: ConditionalStack::default(),
            ended_on_terminator: false,
            diagnostics: Vec::new(),
        }
    }

    fn process_line(&mut self, index: usize, text: &str) {
        match self.mode {
            Mode::Header if text == END_OF_HEADERS => {
                if let Some(d) = self.headers.check_title(self.header_start, index) {
                    self.diagnostics.push(d);
                }
                self.mode = Mode::Body;
            }
            Mode::Header => {
                if let Some(d) = self.headers.parse_line(index, text) {
                    self.diagnostics.push(d);
                }
            }
            Mode::Body if text == END_OF_NODE => self.end_node(index),
            Mode::Body => self.process_body_line(index, text),
        }

        if !text.trim().is_empty() {
            self.ended_on_terminator = text == END_OF_NODE;
        }
    }

    fn end_node(&mut self, index: usize) {
        tracing::trace!(
            line = index,
            open_ifs = self.conditionals.depth(),
            "node terminator"
        );
        let dangling = self.conditionals.close_node();
        self.diagnostics.extend(dangling);
        self.headers.clear();
        self.header_start = index + 1;
        self.mode = Mode::Header;
    }

    fn process_body_line(&mut self, index: usize, text: &str) {
        let Some(command) = CommandLine::parse(index, text) else {
            return;
        };

        if command.name().is_none() {
            self.diagnostics.push(Diagnostic::error(
                command.text_range(),
                "Invalid command syntax.  Commands require a name.",
            ));
            return;
        }

        if let Some(d) = self.conditionals.visit(&command) {
            self.diagnostics.push(d);
        }
        if let Some(schema) = self.schema {
            validate_command(schema, &command, &mut self.diagnostics);
        }
    }

    fn finalize(mut self, line_count: usize) -> Vec<Diagnostic> {
        if !self.ended_on_terminator {
            let last = line_count.saturating_sub(1);
            self.diagnostics.push(Diagnostic::error(
                SourceRange::lines(last, last),
                format!("Missing '{}' at end of file", END_OF_NODE),
            ));
        }
        self.diagnostics
    }
}
