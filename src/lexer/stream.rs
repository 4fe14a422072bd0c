//! Lazily-filled token stream with arbitrary lookahead.
//!
//! The stream owns the scanner and a queue of materialized, not-yet-consumed
//! tokens. Two invariants hold for the parser's benefit:
//!
//! - lookahead is never discarded: any token reachable via `peek_n(k)` stays
//!   available to `pop_n(k)` without re-scanning;
//! - the scan cursor only advances — there is no backtracking past the
//!   active lookahead window.
//!
//! End-of-source materializes as a synthetic `End` token positioned at
//! end-of-text; [`TokenStream::ended`] is what distinguishes exhaustion from
//! a literal `;`.

use std::collections::VecDeque;

use super::Scanner;
use super::tokens::{Token, TokenKind};
use crate::diagnostics::ParseError;
use sigscript_vocab::reserved;

/// Token stream over one snippet.
pub struct TokenStream<'a> {
    scanner: Scanner<'a>,
    lookahead: VecDeque<Token>,
    ended: bool,
    last: Option<Token>,
}

impl<'a> TokenStream<'a> {
    /// Create a stream over `source`, scanning from byte offset `start`.
    pub fn new(source: &'a str, start: usize) -> Self {
        Self {
            scanner: Scanner::new(source, start),
            lookahead: VecDeque::new(),
            ended: false,
            last: None,
        }
    }

    /// Whether the scanner has consumed the entire source text.
    ///
    /// Once true, every further `peek`/`pop` yields the synthetic end token.
    pub fn ended(&self) -> bool {
        self.ended
    }

    /// The most recently consumed token.
    pub fn last(&self) -> Option<&Token> {
        self.last.as_ref()
    }

    /// Materialize tokens until `n` are buffered.
    fn fill(&mut self, n: usize) -> Result<(), ParseError> {
        while self.lookahead.len() < n {
            if self.ended {
                self.lookahead.push_back(self.scanner.end_token());
                continue;
            }
            match self.scanner.next_token()? {
                Some(token) => self.lookahead.push_back(token),
                None => {
                    self.ended = true;
                    self.lookahead.push_back(self.scanner.end_token());
                }
            }
        }
        Ok(())
    }

    /// Peek the next not-yet-consumed token.
    pub fn peek(&mut self) -> Result<&Token, ParseError> {
        self.peek_n(1)
    }

    /// Peek through the `n`-th not-yet-consumed token (1-based) without
    /// consuming anything.
    pub fn peek_n(&mut self, n: usize) -> Result<&Token, ParseError> {
        debug_assert!(n >= 1);
        self.fill(n)?;
        Ok(&self.lookahead[n - 1])
    }

    /// Consume the next token.
    pub fn pop(&mut self) -> Result<Token, ParseError> {
        self.pop_n(1)
    }

    /// Consume through the `n`-th token, discarding any intervening ones,
    /// and return the last one consumed.
    pub fn pop_n(&mut self, n: usize) -> Result<Token, ParseError> {
        debug_assert!(n >= 1);
        self.fill(n)?;
        let mut token = None;
        for _ in 0..n {
            token = self.lookahead.pop_front();
        }
        let token = token.unwrap_or_else(|| unreachable!("fill guarantees n buffered tokens"));
        self.last = Some(token.clone());
        Ok(token)
    }

    // ========================================================================
    // Identifier validation
    // ========================================================================

    /// Validate that the next token is a non-reserved identifier.
    ///
    /// Invoked before consuming an identifier the grammar is about to bind
    /// (labels, function parameters, catch bindings).
    pub fn check_id(&mut self) -> Result<(), ParseError> {
        self.fill(1)?;
        validate_ident(&self.lookahead[0])
    }

    /// Re-validate the most recently consumed token as a non-reserved
    /// identifier (used where the grammar pops first and validates after,
    /// e.g. `var` declaration names).
    pub fn check_last_id(&self) -> Result<(), ParseError> {
        match &self.last {
            Some(token) => validate_ident(token),
            None => Err(ParseError::syntax("expected identifier", Default::default())),
        }
    }
}

fn validate_ident(token: &Token) -> Result<(), ParseError> {
    match &token.kind {
        TokenKind::Ident(name) => {
            if reserved::is_reserved(name) {
                Err(ParseError::ReservedIdent {
                    name: name.clone(),
                    span: token.span,
                })
            } else {
                Ok(())
            }
        }
        _ => Err(ParseError::syntax(
            format!("expected identifier, found {:?}", token.kind),
            token.span,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigscript_vocab::punctuation::Punct;

    #[test]
    fn test_peek_is_stable_and_never_discarded() {
        let mut stream = TokenStream::new("a b c", 0);
        let third = stream.peek_n(3).unwrap().clone();
        assert_eq!(third.kind, TokenKind::Ident("c".to_string()));

        // Everything peeked remains poppable, in order, without re-scanning.
        assert_eq!(stream.pop().unwrap().kind, TokenKind::Ident("a".to_string()));
        assert_eq!(stream.pop().unwrap().kind, TokenKind::Ident("b".to_string()));
        assert_eq!(stream.pop().unwrap(), third);
    }

    #[test]
    fn test_pop_n_discards_intervening() {
        let mut stream = TokenStream::new("a b c d", 0);
        let token = stream.pop_n(3).unwrap();
        assert_eq!(token.kind, TokenKind::Ident("c".to_string()));
        assert_eq!(stream.last().unwrap().kind, TokenKind::Ident("c".to_string()));
        assert_eq!(stream.pop().unwrap().kind, TokenKind::Ident("d".to_string()));
    }

    #[test]
    fn test_synthetic_end_at_end_of_text() {
        let mut stream = TokenStream::new("ab", 0);
        stream.pop().unwrap();

        let end = stream.peek().unwrap().clone();
        assert_eq!(end.kind, TokenKind::Punct(Punct::End));
        assert_eq!(end.span.start, 2);
        assert!(stream.ended());

        // The end token is inexhaustible.
        stream.pop().unwrap();
        assert_eq!(stream.peek().unwrap().kind, TokenKind::Punct(Punct::End));
    }

    #[test]
    fn test_literal_semicolon_is_not_ended() {
        let mut stream = TokenStream::new("; a", 0);
        assert_eq!(stream.peek().unwrap().kind, TokenKind::Punct(Punct::End));
        assert!(!stream.ended());
    }

    #[test]
    fn test_check_id() {
        let mut stream = TokenStream::new("sig var 42", 0);
        assert!(stream.check_id().is_ok());
        stream.pop().unwrap();

        let err = stream.check_id().unwrap_err();
        assert!(matches!(&err, ParseError::ReservedIdent { name, .. } if name == "var"));
        assert_eq!(err.offset(), Some(4));
        stream.pop().unwrap();

        // Non-identifier tokens are rejected too.
        assert!(stream.check_id().unwrap_err().is_syntax());
    }

    #[test]
    fn test_check_last_id() {
        let mut stream = TokenStream::new("for x", 0);
        stream.pop().unwrap();
        assert!(matches!(
            stream.check_last_id().unwrap_err(),
            ParseError::ReservedIdent { .. }
        ));
        stream.pop().unwrap();
        assert!(stream.check_last_id().is_ok());
    }
}
