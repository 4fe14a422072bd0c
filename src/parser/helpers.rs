/// Token matching, expectation, and recursion-budget helpers.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - The recursion-budget guard every production runs under (`descend`)
/// - Matching / expecting punctuation and identifiers
/// - Statement-terminator handling
impl<'a> Parser<'a> {
    /// Run one nested grammar production under the recursion budget.
    ///
    /// The budget strictly decreases on every nested call and is restored on
    /// the way out, bounding parse depth independently of the host stack.
    fn descend<T>(
        &mut self,
        production: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.budget == 0 {
            return Err(ParseError::RecursionLimit);
        }
        self.budget -= 1;
        let result = production(self);
        self.budget += 1;
        result
    }

    /// Run `f` with `in` suppressed as a relational operator (a `for` head's
    /// init clause).
    fn no_in<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let prev = self.in_allowed;
        self.in_allowed = false;
        let result = f(self);
        self.in_allowed = prev;
        result
    }

    /// Clone the next token. Used where a production needs the token's kind
    /// and position across later stream calls.
    fn peek_clone(&mut self) -> Result<Token, ParseError> {
        Ok(self.stream.peek()?.clone())
    }

    /// Return `true` at the synthetic end-of-source token (as opposed to a
    /// literal `;`).
    fn at_eos(&mut self) -> Result<bool, ParseError> {
        let is_end = self.stream.peek()?.is_end();
        Ok(is_end && self.stream.ended())
    }

    /// If the next token is the given punctuation, consume it.
    fn match_punct(&mut self, id: Punct) -> Result<bool, ParseError> {
        if self.stream.peek()?.is_punct(id) {
            self.stream.pop()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consume a token that must be the given punctuation.
    fn expect_punct(&mut self, id: Punct, msg: &str) -> Result<Token, ParseError> {
        let token = self.stream.pop()?;
        if token.is_punct(id) {
            Ok(token)
        } else {
            Err(ParseError::syntax(
                format!("{msg}, found {:?}", token.kind),
                token.span,
            ))
        }
    }

    /// Consume the closing delimiter of a bracketed construct. Running into
    /// end-of-source instead is an unbalanced-delimiter failure pointing at
    /// the opener.
    fn expect_close(
        &mut self,
        id: Punct,
        delimiter: char,
        open_span: Span,
        msg: &str,
    ) -> Result<(), ParseError> {
        let token = self.stream.pop()?;
        if token.is_punct(id) {
            return Ok(());
        }
        if token.is_end() && self.stream.ended() {
            return Err(ParseError::UnbalancedDelimiter {
                delimiter,
                span: open_span,
            });
        }
        Err(ParseError::syntax(
            format!("{msg}, found {:?}", token.kind),
            token.span,
        ))
    }

    /// Consume a token that must be an identifier and return its spelling.
    /// Reserved-word validation is the caller's business (`check_id` /
    /// `check_last_id` on the stream).
    fn pop_ident(&mut self, msg: &str) -> Result<Ident, ParseError> {
        let token = self.stream.pop()?;
        match token.kind {
            TokenKind::Ident(name) => Ok(name),
            kind => Err(ParseError::syntax(format!("{msg}, found {kind:?}"), token.span)),
        }
    }

    /// Require the next token to open a block, without consuming it (block
    /// and function-body productions consume their own opener).
    fn expect_block_open(&mut self, what: &str) -> Result<(), ParseError> {
        let peek = self.stream.peek()?;
        if peek.is_punct(Punct::LBrace) {
            Ok(())
        } else {
            Err(ParseError::syntax(
                format!("expected block after {what}, found {:?}", peek.kind),
                peek.span,
            ))
        }
    }

    /// Consume a statement terminator: a `;`, or nothing immediately before
    /// a closing `}` or at end-of-source (where the synthetic end token
    /// stands in for it).
    fn expect_terminator(&mut self) -> Result<(), ParseError> {
        let peek = self.stream.peek()?;
        if peek.is_end() {
            self.stream.pop()?;
            Ok(())
        } else if peek.is_punct(Punct::RBrace) {
            Ok(())
        } else {
            Err(ParseError::syntax(
                format!("expected ';', found {:?}", peek.kind),
                peek.span,
            ))
        }
    }
}
