//! Numeric literal scanning.
//!
//! Radix selection follows the grammar's legacy rule: a literal beginning
//! with `0` is octal unless the next character is `x`/`X` (hex); anything
//! else is decimal. A decimal point or exponent selects `f64` parsing.

use super::Scanner;
use super::tokens::TokenKind;
use crate::ast::Span;
use crate::diagnostics::ParseError;

impl<'a> Scanner<'a> {
    /// Scan a numeric literal whose first character (`first`) was already
    /// consumed. `first` is a digit, or `.` when the literal has no integer
    /// part.
    pub(super) fn scan_number(&mut self, start: usize, first: char) -> Result<TokenKind, ParseError> {
        // Hex short-circuits: no float forms, no octal reinterpretation.
        if first == '0' && matches!(self.peek(), Some('x' | 'X')) {
            self.advance();
            let digits_start = self.current_pos;
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.advance();
            }
            let digits = &self.source[digits_start..self.current_pos];
            return i64::from_str_radix(digits, 16)
                .map(TokenKind::Int)
                .map_err(|_| self.bad_literal("hexadecimal", start));
        }

        let mut is_float = first == '.';

        // Integer part — or the fraction, when the literal started at `.`.
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        // Fraction part.
        if !is_float && self.peek() == Some('.') {
            is_float = true;
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        // Exponent part.
        if matches!(self.peek(), Some('e' | 'E')) {
            is_float = true;
            self.advance();
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let text = &self.source[start..self.current_pos];

        if is_float {
            return text
                .parse::<f64>()
                .map(TokenKind::Float)
                .map_err(|_| self.bad_literal("floating-point", start));
        }

        if first == '0' && text.len() > 1 {
            return i64::from_str_radix(&text[1..], 8)
                .map(TokenKind::Int)
                .map_err(|_| self.bad_literal("octal", start));
        }

        text.parse::<i64>()
            .map(TokenKind::Int)
            .map_err(|_| self.bad_literal("integer", start))
    }

    fn bad_literal(&self, what: &str, start: usize) -> ParseError {
        ParseError::syntax(
            format!("invalid {} literal '{}'", what, &self.source[start..self.current_pos]),
            Span::new(start, self.current_pos),
        )
    }
}
