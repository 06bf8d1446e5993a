use std::collections::HashMap;

use super::ast::{Call, Document, Fragment, Selection};
use super::lexer::{Lexer, Token};
use super::value::Literal;
use super::SyntaxError;

/// Recursive-descent parser: a single-token lookahead held as `current`,
/// advanced explicitly by each production.
pub(crate) struct Parser<'a> {
    source: &'a str,
    lexer: Lexer<'a>,
    current: Token<'a>,
    line: usize,
    column: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Result<Parser<'a>, SyntaxError> {
        let mut lexer = Lexer::new(source);
        let spanning = lexer.next_token()?;
        Ok(Parser {
            source,
            lexer,
            current: spanning.token,
            line: spanning.start.line(),
            column: spanning.start.column(),
        })
    }

    /// Bounded excerpt of the line an error was detected on, mirroring
    /// `Lexer`'s own excerpt bound so `SyntaxError` text is consistent
    /// regardless of which stage raised it.
    fn line_excerpt(&self) -> String {
        const MAX_WIDTH: usize = 72;

        let line = self
            .source
            .lines()
            .nth(self.line.saturating_sub(1))
            .unwrap_or("");

        if line.len() > MAX_WIDTH {
            format!("{}...", &line[..MAX_WIDTH])
        } else {
            line.to_owned()
        }
    }

    fn advance(&mut self) -> Result<Token<'a>, SyntaxError> {
        let spanning = self.lexer.next_token()?;
        self.line = spanning.start.line();
        self.column = spanning.start.column();
        Ok(std::mem::replace(&mut self.current, spanning.token))
    }

    fn error(&self, message: impl Into<String>) -> SyntaxError {
        SyntaxError {
            line: self.line,
            column: self.column,
            text_snippet: self.line_excerpt(),
            message: message.into(),
        }
    }

    fn expect_ident(&mut self) -> Result<String, SyntaxError> {
        match self.current {
            Token::Ident(name) => {
                let name = name.to_owned();
                self.advance()?;
                Ok(name)
            }
            _ => Err(self.error(format!("expected identifier, found `{}`", self.current))),
        }
    }

    fn expect(&mut self, token: Token<'_>) -> Result<(), SyntaxError> {
        if self.current == token {
            self.advance()?;
            Ok(())
        } else {
            Err(self.error(format!("expected `{token}`, found `{}`", self.current)))
        }
    }

    fn at(&self, token: &Token<'_>) -> bool {
        &self.current == token
    }

    /// `query := selection_list fragment_defs?`
    fn parse_document(&mut self) -> Result<Document, SyntaxError> {
        let root_calls = self.parse_selection_list_as_calls()?;
        let fragments = self.parse_fragment_defs()?;

        if !self.at(&Token::EndOfFile) {
            return Err(self.error(format!("unexpected trailing input `{}`", self.current)));
        }

        Ok(Document {
            root_calls,
            fragments,
        })
    }

    /// The root of a query is itself a `selection_list`, but every entry
    /// must be a root call rather than a fragment reference
    /// (`Document.root_calls` is a sequence of `Call`).
    fn parse_selection_list_as_calls(&mut self) -> Result<Vec<Call>, SyntaxError> {
        let mut calls = Vec::new();

        loop {
            if self.at(&Token::EndOfFile) || self.at(&Token::Dollar) {
                break;
            }

            calls.push(self.parse_field()?);

            if !self.at(&Token::EndOfFile) && !self.at(&Token::Dollar) {
                // Commas are consumed as whitespace by the lexer, so the
                // next selection simply follows directly.
            }
        }

        if calls.is_empty() {
            return Err(self.error("expected at least one root call"));
        }

        Ok(calls)
    }

    /// `fragment_defs := fragment_def*`
    fn parse_fragment_defs(&mut self) -> Result<HashMap<String, Fragment>, SyntaxError> {
        let mut fragments = HashMap::new();

        while self.at(&Token::Dollar) {
            let fragment = self.parse_fragment_def()?;
            fragments.insert(fragment.identifier.clone(), fragment);
        }

        Ok(fragments)
    }

    /// `fragment_def := "$" ident ":" "{" selection_list "}"`
    fn parse_fragment_def(&mut self) -> Result<Fragment, SyntaxError> {
        self.expect(Token::Dollar)?;
        let name = self.expect_ident()?;
        self.expect(Token::Colon)?;
        self.expect(Token::LBrace)?;
        let fields = self.parse_selection_list()?;
        self.expect(Token::RBrace)?;

        Ok(Fragment {
            identifier: format!("${name}"),
            fields,
        })
    }

    /// `selection_list := selection ("," selection)*`
    ///
    /// Commas are swallowed by the lexer as separators, so this just
    /// collects selections until a closing brace or end of input.
    fn parse_selection_list(&mut self) -> Result<Vec<Selection>, SyntaxError> {
        let mut selections = Vec::new();

        while !self.at(&Token::RBrace) && !self.at(&Token::EndOfFile) {
            selections.push(self.parse_selection()?);
        }

        Ok(selections)
    }

    /// `selection := fragment_ref | field`
    fn parse_selection(&mut self) -> Result<Selection, SyntaxError> {
        if self.at(&Token::Dollar) {
            self.advance()?;
            let name = self.expect_ident()?;
            Ok(Selection::FragmentRef(format!("${name}")))
        } else {
            Ok(Selection::FieldSel(self.parse_field()?))
        }
    }

    /// `field := call ("as" ident)? ( "{" selection_list "}" )?`
    ///
    /// The alias is stored on the head of the chain; the trailing
    /// selection set is stored on the tail: chaining sees the underlying
    /// field, renaming only affects the output key.
    fn parse_field(&mut self) -> Result<Call, SyntaxError> {
        let mut head = self.parse_call()?;

        if self.at(&Token::As) {
            self.advance()?;
            let alias = self.expect_ident()?;
            head.alias = Some(alias);
        }

        if self.at(&Token::LBrace) {
            self.advance()?;
            let selections = self.parse_selection_list()?;
            self.expect(Token::RBrace)?;
            head.tail_mut().selections = selections;
        }

        Ok(head)
    }

    /// `call := ident ( "(" arglist? ")" )? ( "." call )?`
    fn parse_call(&mut self) -> Result<Call, SyntaxError> {
        let identifier = self.expect_ident()?;
        let mut call = Call::new(identifier);

        if self.at(&Token::LParen) {
            self.advance()?;
            if !self.at(&Token::RParen) {
                call.arguments = self.parse_arglist()?;
            }
            self.expect(Token::RParen)?;
        }

        if self.at(&Token::Dot) {
            self.advance()?;
            call.chained_call = Some(Box::new(self.parse_call()?));
        }

        Ok(call)
    }

    /// `arglist := literal ("," literal)*`
    fn parse_arglist(&mut self) -> Result<Vec<Literal>, SyntaxError> {
        let mut arguments = vec![self.parse_literal()?];

        while !self.at(&Token::RParen) {
            arguments.push(self.parse_literal()?);
        }

        Ok(arguments)
    }

    /// `literal := integer | quoted_string`
    fn parse_literal(&mut self) -> Result<Literal, SyntaxError> {
        match self.current.clone() {
            Token::Int(value) => {
                self.advance()?;
                Ok(Literal::Int(value))
            }
            Token::Str(value) => {
                self.advance()?;
                Ok(Literal::Str(value))
            }
            other => Err(self.error(format!("expected a literal, found `{other}`"))),
        }
    }
}

/// Parses query source text into a [`Document`].
pub fn parse(source: &str) -> Result<Document, SyntaxError> {
    log::trace!("parsing {} bytes of query source", source.len());
    let mut parser = Parser::new(source)?;
    let result = parser.parse_document();

    if let Err(err) = &result {
        log::debug!("syntax error at {}:{}: {}", err.line, err.column, err.message);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Selection;

    #[test]
    fn parses_a_single_root_call_with_arguments() {
        let document = parse("post(123) { title, content }").unwrap();

        assert_eq!(document.root_calls.len(), 1);

        let post = &document.root_calls[0];
        assert_eq!(post.identifier, "post");
        assert_eq!(post.arguments, vec![Literal::Int(123)]);
        assert_eq!(post.selections.len(), 2);
    }

    #[test]
    fn parses_multiple_root_calls_in_source_order() {
        let document = parse("comment(444) { content }, comment(445) { content }").unwrap();

        let ids: Vec<_> = document
            .root_calls
            .iter()
            .map(|call| call.arguments[0].clone())
            .collect();

        assert_eq!(ids, vec![Literal::Int(444), Literal::Int(445)]);
    }

    #[test]
    fn stores_alias_on_the_head_and_selections_on_the_tail_of_a_chain() {
        let document = parse("comment(444) { letters.from(3).for(2) as snippet }").unwrap();

        let comment = &document.root_calls[0];
        let field = match &comment.selections[0] {
            Selection::FieldSel(call) => call,
            _ => panic!("expected a field selection"),
        };

        assert_eq!(field.identifier, "letters");
        assert_eq!(field.alias, Some("snippet".to_owned()));
        assert_eq!(field.chained_call.as_ref().unwrap().identifier, "from");
        assert_eq!(field.tail().identifier, "for");
    }

    #[test]
    fn parses_fragment_definitions_alongside_the_query_body() {
        let document = parse("post(123) { $summary }, $summary: { title, content }").unwrap();

        let fragment = document.fragments.get("$summary").unwrap();
        assert_eq!(fragment.identifier, "$summary");
        assert_eq!(fragment.fields.len(), 2);

        match &document.root_calls[0].selections[0] {
            Selection::FragmentRef(identifier) => assert_eq!(identifier, "$summary"),
            _ => panic!("expected a fragment reference"),
        }
    }

    #[test]
    fn reports_line_and_column_of_the_offending_token() {
        let err = parse("\n\n<< bogus >>").unwrap_err();

        assert_eq!(err.line, 3);
        assert_eq!(err.column, 1);
        assert!(err.text_snippet.contains("<< bogus >>"));
    }

    #[test]
    fn rejects_a_field_name_that_is_not_an_identifier() {
        let err = parse("123").unwrap_err();
        assert_eq!(err.line, 1);
    }
}
