use crate::document::{Position, SourceRange};
use crate::scanner::Diagnostic;
use crate::scanner::command::CommandLine;

/// The commands that open, continue and close a conditional block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    If,
    ElseIf,
    Else,
    EndIf,
}

impl Keyword {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "if" => Some(Keyword::If),
            "elseif" => Some(Keyword::ElseIf),
            "else" => Some(Keyword::Else),
            "endif" => Some(Keyword::EndIf),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::If => "if",
            Keyword::ElseIf => "elseif",
            Keyword::Else => "else",
            Keyword::EndIf => "endif",
        }
    }
}

/// An `if` that has not been closed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenIf {
    indent: usize,
    line: usize,
    /// Where the first `else` of this block was seen.
    first_else: Option<Position>,
}

/// Tracks nested `if` blocks of one node, matched by exact indentation.
///
/// Line numbers in messages are 1-based.
#[derive(Debug, Default)]
pub struct ConditionalStack {
    open: Vec<OpenIf>,
}

impl ConditionalStack {
    /// Apply a command line. Non-conditional commands are ignored.
    pub fn visit(&mut self, command: &CommandLine<'_>) -> Option<Diagnostic> {
        let keyword = Keyword::from_name(command.name()?.text)?;
        let at = command.name_range();
        let indent = command.indent;

        if keyword == Keyword::If {
            self.open.push(OpenIf {
                indent,
                line: command.line,
                first_else: None,
            });
            return None;
        }

        let Some(top) = self.open.last_mut() else {
            return Some(Diagnostic::error(
                at,
                format!(r#"Unexpected "{}" without "if"."#, keyword.as_str()),
            ));
        };
        let top_snapshot = *top;

        let finding = match keyword {
            // Indentation is reported first; ordering only once it matches.
            Keyword::ElseIf => misindented(keyword, indent, &top_snapshot).or_else(|| {
                top.first_else.map(|first| {
                    format!(
                        r#"Unexpected "elseif" after "else" (see line {}) for "if" from line {}."#,
                        first.line + 1,
                        top.line + 1
                    )
                })
            }),
            Keyword::Else => match top.first_else {
                Some(first) => Some(format!(
                    r#"Unexpected duplicate "else" (see line {}) for "if" from line {}."#,
                    first.line + 1,
                    top.line + 1
                )),
                None => {
                    top.first_else = Some(at.start);
                    misindented(keyword, indent, &top_snapshot)
                }
            },
            Keyword::EndIf => {
                self.open.pop();
                misindented(keyword, indent, &top_snapshot)
            }
            Keyword::If => None,
        };

        finding.map(|message| Diagnostic::error(at, message))
    }

    /// Close the node: every `if` still open gets a diagnostic on its line,
    /// in the order the blocks were opened.
    pub fn close_node(&mut self) -> Vec<Diagnostic> {
        self.open
            .drain(..)
            .map(|entry| {
                Diagnostic::error(
                    SourceRange::lines(entry.line, entry.line + 1),
                    r#"Missing "endif" for this "if"."#,
                )
            })
            .collect()
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }
}

fn misindented(keyword: Keyword, indent: usize, open: &OpenIf) -> Option<String> {
    (open.indent != indent).then(|| {
        format!(
            r#"Indentation of "{}" ({}) must match earlier "if" ({}) on line {}."#,
            keyword.as_str(),
            indent,
            open.indent,
            open.line + 1
        )
    })
}
