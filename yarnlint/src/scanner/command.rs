use std::sync::LazyLock;

use regex::Regex;

use crate::document::SourceRange;

/// `indent`, `<<` plus padding, the command text, padding plus `>>`.
static COMMAND_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)(<<\s*)(.*?)(\s*>>\s*)").expect("valid regex"));

static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+").expect("valid regex"));

/// A whitespace-delimited word of a command, with its character column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub column: usize,
}

impl Token<'_> {
    pub fn end(&self) -> usize {
        self.column + self.text.chars().count()
    }

    pub fn range(&self, line: usize) -> SourceRange {
        SourceRange::on_line(line, self.column, self.end())
    }
}

/// A `<<name args...>>` invocation recognised on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine<'a> {
    pub line: usize,
    /// Leading whitespace characters before `<<`.
    pub indent: usize,
    /// Everything between the brackets, minus padding.
    pub text: Token<'a>,
    /// Column just past the closing `>>`.
    pub close: usize,
    pub tokens: Vec<Token<'a>>,
}

impl<'a> CommandLine<'a> {
    /// Recognise a command invocation on `text`, the content of line `line`.
    pub fn parse(line: usize, text: &'a str) -> Option<Self> {
        let caps = COMMAND_LINE.captures(text)?;
        let indent = caps.get(1)?;
        let body = caps.get(3)?;
        let tail = caps.get(4)?;

        let column_of = |byte: usize| text[..byte].chars().count();
        let body_column = column_of(body.start());
        let close_byte = tail.start() + tail.as_str().find(">>").unwrap_or(0) + 2;

        let tokens = TOKEN
            .find_iter(body.as_str())
            .map(|m| Token {
                text: m.as_str(),
                column: body_column + body.as_str()[..m.start()].chars().count(),
            })
            .collect();

        Some(CommandLine {
            line,
            indent: indent.as_str().chars().count(),
            text: Token {
                text: body.as_str(),
                column: body_column,
            },
            close: column_of(close_byte),
            tokens,
        })
    }

    pub fn name(&self) -> Option<&Token<'a>> {
        self.tokens.first()
    }

    pub fn args(&self) -> &[Token<'a>] {
        self.tokens.get(1..).unwrap_or(&[])
    }

    /// The span of the command text between the brackets.
    pub fn text_range(&self) -> SourceRange {
        self.text.range(self.line)
    }

    /// The span of the whole invocation, `<<` through `>>`.
    pub fn invocation_range(&self) -> SourceRange {
        SourceRange::on_line(self.line, self.indent, self.close)
    }

    /// The span of the command name, or of the empty text if there is none.
    pub fn name_range(&self) -> SourceRange {
        match self.name() {
            Some(name) => name.range(self.line),
            None => self.text_range(),
        }
    }
}
