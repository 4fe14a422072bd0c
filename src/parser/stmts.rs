/// Statement parsing methods.
///
/// Statement keywords reach the parser as identifier tokens; the grammar
/// recognizes them by spelling via the reserved-word registry. Anything that
/// is not a recognized statement form falls through to the labeled-statement
/// lookahead and finally to an expression statement.
impl<'a> Parser<'a> {
    fn statement(&mut self) -> Result<Stmt, ParseError> {
        self.descend(|p| {
            let token = p.peek_clone()?;

            // Empty statement: a bare terminator.
            if token.is_end() {
                p.stream.pop()?;
                return Ok(Stmt::Empty);
            }

            if token.is_punct(Punct::LBrace) {
                return p.block();
            }

            match token.reserved() {
                Some(ReservedWord::Var) => return p.var_statement(),
                Some(ReservedWord::If) => return p.if_statement(),
                Some(ReservedWord::For) => return p.for_statement(),
                Some(ReservedWord::Do) => return p.do_statement(),
                Some(ReservedWord::While) => return p.while_statement(),
                Some(ReservedWord::Break) | Some(ReservedWord::Continue) => {
                    return p.break_or_continue_statement();
                }
                Some(ReservedWord::Return) => return p.return_statement(),
                Some(ReservedWord::With) => return p.with_statement(),
                Some(ReservedWord::Switch) => return p.switch_statement(),
                Some(ReservedWord::Throw) => return p.throw_statement(),
                Some(ReservedWord::Try) => return p.try_statement(),
                Some(ReservedWord::Debugger) => return p.debugger_statement(),
                _ => {}
            }

            // Labeled statement: identifier immediately followed by `:`.
            if token.kind.ident().is_some() && p.stream.peek_n(2)?.is_punct(Punct::Colon) {
                p.stream.check_id()?;
                let name = p.pop_ident("expected label name")?;
                p.stream.pop()?; // `:`
                let body = p.statement()?;
                return Ok(Stmt::Label {
                    name,
                    body: Box::new(body),
                });
            }

            // Expression statement.
            let expr = p.expression()?;
            p.expect_terminator()?;
            Ok(Stmt::Expr(expr))
        })
    }

    /// `{` zero-or-more statements `}`; running past end-of-source is an
    /// unbalanced-delimiter failure pointing at the opener.
    fn block(&mut self) -> Result<Stmt, ParseError> {
        self.descend(|p| {
            let open = p.stream.pop()?;
            let open_span = open.span;
            let mut body = Vec::new();
            loop {
                if p.match_punct(Punct::RBrace)? {
                    break;
                }
                if p.at_eos()? {
                    return Err(ParseError::UnbalancedDelimiter {
                        delimiter: '{',
                        span: open_span,
                    });
                }
                body.push(p.statement()?);
            }
            Ok(Stmt::Block(body))
        })
    }

    fn var_statement(&mut self) -> Result<Stmt, ParseError> {
        self.descend(|p| {
            p.stream.pop()?; // `var`
            let decls = p.var_declaration_list()?;
            p.expect_terminator()?;
            Ok(Stmt::Var(decls))
        })
    }

    /// Comma-separated `name` / `name = init` pairs. Each name is popped
    /// first and then re-validated as a non-reserved identifier.
    fn var_declaration_list(&mut self) -> Result<Vec<VarDecl>, ParseError> {
        let mut decls = Vec::new();
        loop {
            let name = self.pop_ident("missing variable name")?;
            self.stream.check_last_id()?;

            let init = if matches!(self.stream.peek()?.kind, TokenKind::AssignOp(None)) {
                self.stream.pop()?;
                Some(self.assign_expression()?)
            } else {
                None
            };
            decls.push(VarDecl { name, init });

            if !self.match_punct(Punct::Comma)? {
                break;
            }
        }
        Ok(decls)
    }

    fn if_statement(&mut self) -> Result<Stmt, ParseError> {
        self.descend(|p| {
            p.stream.pop()?; // `if`
            let open = p.stream.pop()?;
            if !open.is_punct(Punct::LParen) {
                return Err(ParseError::syntax("missing condition", open.span));
            }
            let cond = p.expression()?;
            p.expect_close(Punct::RParen, '(', open.span, "expected ')' after condition")?;
            let then = p.statement()?;
            let otherwise = if p.stream.peek()?.is_reserved(ReservedWord::Else) {
                p.stream.pop()?;
                Some(Box::new(p.statement()?))
            } else {
                None
            };
            Ok(Stmt::If {
                cond,
                then: Box::new(then),
                otherwise,
            })
        })
    }

    /// Classic three-clause `for` and the `for-in` form. `for-of` is
    /// explicitly rejected. While the init clause parses, `in` is suppressed
    /// as a relational operator so the separating token stays visible.
    fn for_statement(&mut self) -> Result<Stmt, ParseError> {
        self.descend(|p| {
            p.stream.pop()?; // `for`
            let open = p.stream.pop()?;
            if !open.is_punct(Punct::LParen) {
                return Err(ParseError::syntax("expected '(' after 'for'", open.span));
            }

            let peek = p.peek_clone()?;
            let init = if peek.is_end() {
                None
            } else if peek.is_reserved(ReservedWord::Var) {
                p.stream.pop()?;
                Some(ForInit::Var(p.no_in(Self::var_declaration_list)?))
            } else {
                Some(ForInit::Expr(p.no_in(Self::expression)?))
            };

            let sep = p.stream.pop()?;
            if matches!(&sep.kind, TokenKind::RelOp(RelationOp::In)) {
                // for-in: the iterated object lands in the condition slot
                // and the step slot stays empty.
                let object = p.expression()?;
                p.expect_close(Punct::RParen, '(', open.span, "expected ')' after for-in object")?;
                let body = p.statement()?;
                return Ok(Stmt::For {
                    init,
                    cond: Some(object),
                    step: None,
                    body: Box::new(body),
                });
            }
            if sep.kind.ident() == Some("of") {
                return Err(ParseError::Unsupported {
                    feature: "for-of loop",
                    span: sep.span,
                });
            }
            if !sep.is_end() {
                return Err(ParseError::syntax(
                    "invalid for-loop initialization",
                    sep.span,
                ));
            }

            let cond = if p.stream.peek()?.is_end() {
                None
            } else {
                Some(p.expression()?)
            };
            let sep = p.stream.pop()?;
            if !sep.is_end() {
                return Err(ParseError::syntax("expected ';' in for-loop head", sep.span));
            }

            let step = if p.stream.peek()?.is_punct(Punct::RParen) {
                None
            } else {
                Some(p.expression()?)
            };
            p.expect_close(Punct::RParen, '(', open.span, "expected ')' after for-loop head")?;
            let body = p.statement()?;
            Ok(Stmt::For {
                init,
                cond,
                step,
                body: Box::new(body),
            })
        })
    }

    fn do_statement(&mut self) -> Result<Stmt, ParseError> {
        self.descend(|p| {
            p.stream.pop()?; // `do`
            let body = p.statement()?;
            let token = p.stream.pop()?;
            if !token.is_reserved(ReservedWord::While) {
                return Err(ParseError::syntax(
                    format!("expected 'while' after do-loop body, found {:?}", token.kind),
                    token.span,
                ));
            }
            let open = p.stream.pop()?;
            if !open.is_punct(Punct::LParen) {
                return Err(ParseError::syntax("expected '(' after 'while'", open.span));
            }
            let cond = p.expression()?;
            p.expect_close(Punct::RParen, '(', open.span, "expected ')' after condition")?;
            p.expect_terminator()?;
            Ok(Stmt::Do {
                body: Box::new(body),
                cond,
            })
        })
    }

    fn while_statement(&mut self) -> Result<Stmt, ParseError> {
        self.descend(|p| {
            p.stream.pop()?; // `while`
            let open = p.stream.pop()?;
            if !open.is_punct(Punct::LParen) {
                return Err(ParseError::syntax("expected '(' after 'while'", open.span));
            }
            let cond = p.expression()?;
            p.expect_close(Punct::RParen, '(', open.span, "expected ')' after condition")?;
            let body = p.statement()?;
            Ok(Stmt::While {
                cond,
                body: Box::new(body),
            })
        })
    }

    /// `break` / `continue` with an optional label on the same line.
    fn break_or_continue_statement(&mut self) -> Result<Stmt, ParseError> {
        self.descend(|p| {
            let keyword = p.stream.pop()?;
            let is_break = keyword.is_reserved(ReservedWord::Break);

            let peek = p.peek_clone()?;
            let label = if !peek.is_end() && !peek.is_punct(Punct::RBrace) && peek.line == keyword.line
            {
                p.stream.check_id()?;
                Some(p.pop_ident("expected label name")?)
            } else {
                None
            };
            p.expect_terminator()?;

            Ok(if is_break {
                Stmt::Break(label)
            } else {
                Stmt::Continue(label)
            })
        })
    }

    fn return_statement(&mut self) -> Result<Stmt, ParseError> {
        self.descend(|p| {
            p.stream.pop()?; // `return`
            let peek = p.stream.peek()?;
            let expr = if peek.is_end() || peek.is_punct(Punct::RBrace) {
                None
            } else {
                Some(p.expression()?)
            };
            p.expect_terminator()?;
            Ok(Stmt::Return(expr))
        })
    }

    fn with_statement(&mut self) -> Result<Stmt, ParseError> {
        self.descend(|p| {
            p.stream.pop()?; // `with`
            let open = p.stream.pop()?;
            if !open.is_punct(Punct::LParen) {
                return Err(ParseError::syntax("missing expression", open.span));
            }
            let subject = p.expression()?;
            p.expect_close(Punct::RParen, '(', open.span, "expected ')' after with-subject")?;
            let body = p.statement()?;
            Ok(Stmt::With {
                subject,
                body: Box::new(body),
            })
        })
    }

    /// `switch` with an ordered clause list; a second `default` clause is a
    /// hard failure.
    fn switch_statement(&mut self) -> Result<Stmt, ParseError> {
        self.descend(|p| {
            p.stream.pop()?; // `switch`
            let open = p.stream.pop()?;
            if !open.is_punct(Punct::LParen) {
                return Err(ParseError::syntax("missing expression", open.span));
            }
            let discriminant = p.expression()?;
            p.expect_close(Punct::RParen, '(', open.span, "expected ')' after switch-expression")?;

            let open = p.stream.pop()?;
            if !open.is_punct(Punct::LBrace) {
                return Err(ParseError::syntax("missing case block", open.span));
            }
            let open_span = open.span;

            let mut has_default = false;
            let mut cases = Vec::new();
            loop {
                let peek = p.peek_clone()?;
                if peek.is_punct(Punct::RBrace) {
                    p.stream.pop()?;
                    break;
                }

                let test = if peek.is_reserved(ReservedWord::Case) {
                    p.stream.pop()?;
                    Some(p.expression()?)
                } else if peek.is_reserved(ReservedWord::Default) {
                    if has_default {
                        return Err(ParseError::syntax("multiple default clauses", peek.span));
                    }
                    has_default = true;
                    p.stream.pop()?;
                    None
                } else if p.at_eos()? {
                    return Err(ParseError::UnbalancedDelimiter {
                        delimiter: '{',
                        span: open_span,
                    });
                } else {
                    return Err(ParseError::syntax(
                        "expected 'case' or 'default' clause",
                        peek.span,
                    ));
                };
                p.expect_punct(Punct::Colon, "expected ':' after clause")?;

                let mut body = Vec::new();
                loop {
                    let peek = p.peek_clone()?;
                    if peek.is_punct(Punct::RBrace)
                        || peek.is_reserved(ReservedWord::Case)
                        || peek.is_reserved(ReservedWord::Default)
                    {
                        break;
                    }
                    if p.at_eos()? {
                        return Err(ParseError::UnbalancedDelimiter {
                            delimiter: '{',
                            span: open_span,
                        });
                    }
                    body.push(p.statement()?);
                }
                cases.push(SwitchCase { test, body });
            }

            Ok(Stmt::Switch {
                discriminant,
                cases,
            })
        })
    }

    fn throw_statement(&mut self) -> Result<Stmt, ParseError> {
        self.descend(|p| {
            p.stream.pop()?; // `throw`
            let expr = p.expression()?;
            p.expect_terminator()?;
            Ok(Stmt::Throw(expr))
        })
    }

    /// `try` requires at least one of `catch` (binding exactly one
    /// identifier) or `finally`.
    fn try_statement(&mut self) -> Result<Stmt, ParseError> {
        self.descend(|p| {
            p.stream.pop()?; // `try`
            p.expect_block_open("'try'")?;
            let block = p.statement()?;

            let catch = if p.stream.peek()?.is_reserved(ReservedWord::Catch) {
                p.stream.pop()?;
                let open = p.stream.pop()?;
                if !open.is_punct(Punct::LParen) {
                    return Err(ParseError::syntax(
                        "catch clause is missing an identifier",
                        open.span,
                    ));
                }
                p.stream.check_id()?;
                let param = p.pop_ident("expected catch binding")?;
                let close = p.stream.pop()?;
                if !close.is_punct(Punct::RParen) {
                    return Err(ParseError::syntax(
                        "catch clause expects a single identifier",
                        close.span,
                    ));
                }
                p.expect_block_open("'catch'")?;
                Some(CatchClause {
                    param,
                    body: Box::new(p.statement()?),
                })
            } else {
                None
            };

            let finally = if p.stream.peek()?.is_reserved(ReservedWord::Finally) {
                p.stream.pop()?;
                p.expect_block_open("'finally'")?;
                Some(Box::new(p.statement()?))
            } else {
                None
            };

            if catch.is_none() && finally.is_none() {
                let span = p.stream.peek()?.span;
                return Err(ParseError::syntax(
                    "try statement is expecting catch or finally",
                    span,
                ));
            }

            Ok(Stmt::Try {
                block: Box::new(block),
                catch,
                finally,
            })
        })
    }

    fn debugger_statement(&mut self) -> Result<Stmt, ParseError> {
        self.descend(|p| {
            p.stream.pop()?; // `debugger`
            p.expect_terminator()?;
            Ok(Stmt::Debugger)
        })
    }
}
