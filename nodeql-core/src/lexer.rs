use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use super::SyntaxError;

/// A position within the source text, tracked independently of byte offset
/// so error messages can report 1-based line/column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SourcePosition {
    line: usize,
    column: usize,
}

impl SourcePosition {
    fn new() -> SourcePosition {
        SourcePosition { line: 1, column: 1 }
    }

    fn advance_column(&mut self) {
        self.column += 1;
    }

    fn advance_line(&mut self) {
        self.line += 1;
        self.column = 1;
    }

    pub(crate) fn line(&self) -> usize {
        self.line
    }

    pub(crate) fn column(&self) -> usize {
        self.column
    }
}

/// A lexical token, borrowing slices of the original source where possible.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token<'a> {
    Ident(&'a str),
    As,
    Int(i64),
    Str(String),
    Dollar,
    Colon,
    Comma,
    Dot,
    LParen,
    RParen,
    LBrace,
    RBrace,
    EndOfFile,
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "{name}"),
            Token::As => write!(f, "as"),
            Token::Int(value) => write!(f, "{value}"),
            Token::Str(value) => write!(f, "\"{value}\""),
            Token::Dollar => write!(f, "$"),
            Token::Colon => write!(f, ":"),
            Token::Comma => write!(f, ","),
            Token::Dot => write!(f, "."),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::EndOfFile => write!(f, "<eof>"),
        }
    }
}

/// A token paired with the source position it started at.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Spanning<'a> {
    pub token: Token<'a>,
    pub start: SourcePosition,
}

/// Hand-rolled tokenizer over a `Peekable<CharIndices>`. Whitespace and
/// commas are separators and are never emitted as tokens.
pub(crate) struct Lexer<'a> {
    source: &'a str,
    iterator: Peekable<CharIndices<'a>>,
    position: SourcePosition,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(source: &'a str) -> Lexer<'a> {
        Lexer {
            source,
            iterator: source.char_indices().peekable(),
            position: SourcePosition::new(),
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        self.iterator.peek().map(|&(_, c)| c)
    }

    fn next_char(&mut self) -> Option<(usize, char)> {
        let next = self.iterator.next();
        if let Some((_, c)) = next {
            if c == '\n' {
                self.position.advance_line();
            } else {
                self.position.advance_column();
            }
        }
        next
    }

    fn skip_ignored(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() || c == ',' {
                self.next_char();
            } else {
                break;
            }
        }
    }

    /// Produces the excerpt of the current line for a [`SyntaxError`],
    /// bounded to a reasonable width.
    fn line_excerpt(&self) -> String {
        const MAX_WIDTH: usize = 72;

        let line = self
            .source
            .lines()
            .nth(self.position.line().saturating_sub(1))
            .unwrap_or("");

        if line.len() > MAX_WIDTH {
            format!("{}...", &line[..MAX_WIDTH])
        } else {
            line.to_owned()
        }
    }

    fn error(&self, message: impl Into<String>) -> SyntaxError {
        SyntaxError {
            line: self.position.line(),
            column: self.position.column(),
            text_snippet: self.line_excerpt(),
            message: message.into(),
        }
    }

    fn scan_ident(&mut self, start: usize) -> &'a str {
        let mut end = start;
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '_' {
                end += c.len_utf8();
                self.next_char();
            } else {
                break;
            }
        }
        &self.source[start..end]
    }

    fn scan_int(&mut self, start: usize) -> Result<Token<'a>, SyntaxError> {
        let mut end = start;
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                end += c.len_utf8();
                self.next_char();
            } else {
                break;
            }
        }

        self.source[start..end]
            .parse::<i64>()
            .map(Token::Int)
            .map_err(|_| self.error(format!("invalid integer literal `{}`", &self.source[start..end])))
    }

    fn scan_string(&mut self) -> Result<Token<'a>, SyntaxError> {
        let mut value = String::new();
        loop {
            match self.next_char() {
                Some((_, '"')) => return Ok(Token::Str(value)),
                Some((_, '\\')) => match self.next_char() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 't')) => value.push('\t'),
                    Some((_, '"')) => value.push('"'),
                    Some((_, '\\')) => value.push('\\'),
                    Some((_, c)) => return Err(self.error(format!("unknown escape sequence `\\{c}`"))),
                    None => return Err(self.error("unterminated string literal")),
                },
                Some((_, c)) => value.push(c),
                None => return Err(self.error("unterminated string literal")),
            }
        }
    }

    /// Produces the next token. Returns `Token::EndOfFile` repeatedly once
    /// the source is exhausted, rather than an `Option`, so callers can
    /// hold a single lookahead token uniformly.
    pub(crate) fn next_token(&mut self) -> Result<Spanning<'a>, SyntaxError> {
        self.skip_ignored();

        let start = self.position;

        let (offset, c) = match self.iterator.peek().copied() {
            Some(pair) => pair,
            None => {
                return Ok(Spanning {
                    token: Token::EndOfFile,
                    start,
                })
            }
        };

        let token = match c {
            '$' => {
                self.next_char();
                Token::Dollar
            }
            ':' => {
                self.next_char();
                Token::Colon
            }
            '.' => {
                self.next_char();
                Token::Dot
            }
            '(' => {
                self.next_char();
                Token::LParen
            }
            ')' => {
                self.next_char();
                Token::RParen
            }
            '{' => {
                self.next_char();
                Token::LBrace
            }
            '}' => {
                self.next_char();
                Token::RBrace
            }
            '"' => {
                self.next_char();
                self.scan_string()?
            }
            c if c.is_ascii_digit() => self.scan_int(offset)?,
            c if c == '_' || c.is_alphabetic() => {
                let ident = self.scan_ident(offset);
                if ident == "as" {
                    Token::As
                } else {
                    Token::Ident(ident)
                }
            }
            other => return Err(self.error(format!("unexpected character `{other}`"))),
        };

        Ok(Spanning { token, start })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token<'_>> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let spanning = lexer.next_token().unwrap();
            let done = spanning.token == Token::EndOfFile;
            tokens.push(spanning.token);
            if done {
                break;
            }
        }
        tokens
    }

    #[test]
    fn tokenizes_a_call_chain_with_an_alias() {
        assert_eq!(
            tokens("letters.from(3).for(2) as snippet"),
            vec![
                Token::Ident("letters"),
                Token::Dot,
                Token::Ident("from"),
                Token::LParen,
                Token::Int(3),
                Token::RParen,
                Token::Dot,
                Token::Ident("for"),
                Token::LParen,
                Token::Int(2),
                Token::RParen,
                Token::As,
                Token::Ident("snippet"),
                Token::EndOfFile,
            ]
        );
    }

    #[test]
    fn treats_commas_as_separators() {
        assert_eq!(
            tokens("title, content"),
            vec![
                Token::Ident("title"),
                Token::Ident("content"),
                Token::EndOfFile,
            ]
        );
    }

    #[test]
    fn reads_escape_sequences_inside_strings() {
        assert_eq!(
            tokens(r#""a\"b""#),
            vec![Token::Str("a\"b".to_owned()), Token::EndOfFile]
        );
    }

    #[test]
    fn reports_an_unterminated_string() {
        let mut lexer = Lexer::new("\"unterminated");
        assert!(lexer.next_token().is_err());
    }
}
