//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites,
//! and to give the parser one place to ask the questions it asks constantly
//! ("is this the end token?", "which statement keyword is this?").

use crate::lexer::{Token, TokenKind};
use sigscript_vocab::punctuation::Punct;
use sigscript_vocab::reserved::{self, ReservedWord};

impl TokenKind {
    /// Return `true` if this is the given punctuation.
    pub fn is_punct(&self, id: Punct) -> bool {
        matches!(self, TokenKind::Punct(p) if *p == id)
    }

    /// Return `true` for the `;` / end-of-source token.
    pub fn is_end(&self) -> bool {
        self.is_punct(Punct::End)
    }

    /// Return the identifier spelling, if this is an identifier token.
    pub fn ident(&self) -> Option<&str> {
        match self {
            TokenKind::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// Return the reserved word this identifier spells, if any.
    ///
    /// Statement keywords (`var`, `if`, `function`, …) reach the parser as
    /// identifier tokens; this is how the grammar recognizes them.
    pub fn reserved(&self) -> Option<ReservedWord> {
        self.ident().and_then(reserved::from_str)
    }

    /// Return `true` if this identifier spells the given reserved word.
    pub fn is_reserved(&self, word: ReservedWord) -> bool {
        self.reserved() == Some(word)
    }
}

impl Token {
    /// Convenience wrapper for `self.kind.is_punct(id)`.
    pub fn is_punct(&self, id: Punct) -> bool {
        self.kind.is_punct(id)
    }

    /// Convenience wrapper for `self.kind.is_end()`.
    pub fn is_end(&self) -> bool {
        self.kind.is_end()
    }

    /// Convenience wrapper for `self.kind.ident()`.
    pub fn ident(&self) -> Option<&str> {
        self.kind.ident()
    }

    /// Convenience wrapper for `self.kind.reserved()`.
    pub fn reserved(&self) -> Option<ReservedWord> {
        self.kind.reserved()
    }

    /// Convenience wrapper for `self.kind.is_reserved(word)`.
    pub fn is_reserved(&self, word: ReservedWord) -> bool {
        self.kind.is_reserved(word)
    }
}
