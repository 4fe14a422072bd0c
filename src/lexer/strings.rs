//! String and regular-expression literal scanning.
//!
//! String values are the raw source between the quotes: escape sequences are
//! not decoded (a backslash only keeps the following character from ending
//! the literal). Regex literals are captured as an opaque (body, flags) pair.

use super::Scanner;
use super::tokens::TokenKind;
use crate::ast::Span;
use crate::diagnostics::ParseError;

impl<'a> Scanner<'a> {
    /// Scan a string literal after its opening quote was consumed.
    pub(super) fn scan_string(&mut self, start: usize, quote: char) -> Result<TokenKind, ParseError> {
        let content_start = self.current_pos;
        loop {
            match self.advance() {
                None => break,
                Some(c) if c == quote => {
                    let content_end = self.current_pos - quote.len_utf8();
                    return Ok(TokenKind::Str(self.source[content_start..content_end].to_string()));
                }
                Some('\\') => {
                    // Keep the escaped character raw; only skip it so an
                    // escaped quote does not end the literal.
                    if self.advance().is_none() {
                        break;
                    }
                }
                Some(c) if Self::is_line_terminator(c) => break,
                Some(_) => {}
            }
        }
        Err(ParseError::syntax(
            "unterminated string literal",
            Span::new(start, self.current_pos),
        ))
    }

    /// Scan a regex literal after its opening `/` was consumed.
    ///
    /// A `/` inside a `[...]` character class does not terminate the body.
    pub(super) fn scan_regex(&mut self, start: usize) -> Result<TokenKind, ParseError> {
        let body_start = self.current_pos;
        let mut in_class = false;
        loop {
            match self.advance() {
                None => break,
                Some('/') if !in_class => {
                    let body_end = self.current_pos - 1;

                    let flags_start = self.current_pos;
                    while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
                        self.advance();
                    }

                    return Ok(TokenKind::Regex {
                        body: self.source[body_start..body_end].to_string(),
                        flags: self.source[flags_start..self.current_pos].to_string(),
                    });
                }
                Some('[') => in_class = true,
                Some(']') => in_class = false,
                Some('\\') => {
                    if self.advance().is_none() {
                        break;
                    }
                }
                Some(c) if Self::is_line_terminator(c) => break,
                Some(_) => {}
            }
        }
        Err(ParseError::syntax(
            "unterminated regular expression literal",
            Span::new(start, self.current_pos),
        ))
    }
}
