/// Member/call/primary expression parsing, plus functions, literals, and
/// argument lists.
impl<'a> Parser<'a> {
    /// `new` + member-expression + optional constructor arguments, or a
    /// primary expression; either way followed by a member-tail.
    fn member_expression(&mut self) -> Result<MemberExpr, ParseError> {
        self.member_expression_impl(true)
    }

    /// `allow_call` is cleared for the target of a `new` expression so the
    /// constructor argument list is not swallowed as a call-tail.
    fn member_expression_impl(&mut self, allow_call: bool) -> Result<MemberExpr, ParseError> {
        self.descend(|p| {
            if p.stream.peek()?.is_reserved(ReservedWord::New) {
                p.stream.pop()?;
                let target = p.member_expression_impl(false)?;
                let args = p.arguments_opt()?;
                let tail = p.member_tail(allow_call)?;
                return Ok(MemberExpr {
                    target: MemberTarget::New(Box::new(target)),
                    args,
                    tail,
                });
            }

            let primary = p.primary_expression()?;
            let tail = p.member_tail(allow_call)?;
            Ok(MemberExpr {
                target: MemberTarget::Primary(primary),
                args: None,
                tail,
            })
        })
    }

    /// The right-recursive chain of `.field`, `[element]`, and `(call)`
    /// accesses following a primary or `new` expression.
    fn member_tail(&mut self, allow_call: bool) -> Result<Option<Box<MemberTail>>, ParseError> {
        self.descend(|p| {
            let peek = p.peek_clone()?;

            if peek.is_punct(Punct::Dot) {
                p.stream.pop()?;
                let mut next = p.peek_clone()?;
                if next.is_punct(Punct::Dot) {
                    // A `.` immediately following another `.` is tolerated
                    // rather than rejected; real extracted inputs rely on
                    // previously-parseable text staying parseable.
                    p.stream.pop()?;
                    next = p.peek_clone()?;
                } else if next.is_punct(Punct::LParen) {
                    return Err(ParseError::Unsupported {
                        feature: "field query",
                        span: next.span,
                    });
                }

                return match next.kind {
                    TokenKind::Ident(name) => {
                        p.stream.pop()?;
                        Ok(Some(Box::new(MemberTail::Field {
                            name,
                            rest: p.member_tail(allow_call)?,
                        })))
                    }
                    _ => Err(ParseError::syntax("expected field name", next.span)),
                };
            }

            if peek.is_punct(Punct::LBracket) {
                let open = p.stream.pop()?;
                let index = p.expression()?;
                p.expect_close(Punct::RBracket, '[', open.span, "expected ']' after element index")?;
                return Ok(Some(Box::new(MemberTail::Element {
                    index,
                    rest: p.member_tail(allow_call)?,
                })));
            }

            if peek.is_punct(Punct::LParen) && allow_call {
                let args = p.arguments()?;
                return Ok(Some(Box::new(MemberTail::Call {
                    args,
                    rest: p.member_tail(allow_call)?,
                })));
            }

            Ok(None)
        })
    }

    fn primary_expression(&mut self) -> Result<PrimaryExpr, ParseError> {
        self.descend(|p| {
            let token = p.peek_clone()?;
            match token.kind {
                // Literal leaves pass through as (kind, value).
                TokenKind::Int(value) => {
                    p.stream.pop()?;
                    Ok(PrimaryExpr::Int(value))
                }
                TokenKind::Float(value) => {
                    p.stream.pop()?;
                    Ok(PrimaryExpr::Float(value))
                }
                TokenKind::Str(value) => {
                    p.stream.pop()?;
                    Ok(PrimaryExpr::Str(value))
                }
                TokenKind::Bool(value) => {
                    p.stream.pop()?;
                    Ok(PrimaryExpr::Bool(value))
                }
                TokenKind::Null => {
                    p.stream.pop()?;
                    Ok(PrimaryExpr::Null)
                }
                TokenKind::Regex { body, flags } => {
                    p.stream.pop()?;
                    Ok(PrimaryExpr::Regex { body, flags })
                }

                TokenKind::Ident(name) => match sigscript_vocab::reserved::from_str(&name) {
                    Some(ReservedWord::This) => {
                        p.stream.pop()?;
                        Ok(PrimaryExpr::This)
                    }
                    Some(ReservedWord::Function) => Ok(PrimaryExpr::Function(p.function(true)?)),
                    // Any other reserved word fails identifier validation.
                    _ => {
                        p.stream.check_id()?;
                        p.stream.pop()?;
                        Ok(PrimaryExpr::Ident(name))
                    }
                },

                TokenKind::Punct(Punct::LBracket) => p.array_literal(),
                TokenKind::Punct(Punct::LBrace) => p.object_literal(),
                TokenKind::Punct(Punct::LParen) => {
                    let open = p.stream.pop()?;
                    let expr = p.expression()?;
                    if !p.match_punct(Punct::RParen)? {
                        return Err(ParseError::UnbalancedDelimiter {
                            delimiter: '(',
                            span: open.span,
                        });
                    }
                    Ok(PrimaryExpr::Grouping(expr))
                }

                kind => Err(ParseError::syntax(
                    format!("unexpected token in expression: {kind:?}"),
                    token.span,
                )),
            }
        })
    }

    /// `function` [name] `(` params `)` `{` body `}`. A declaration requires
    /// the name; an expression may omit it.
    fn function(&mut self, is_expr: bool) -> Result<Function, ParseError> {
        self.descend(|p| {
            p.stream.pop()?; // `function`

            let peek = p.peek_clone()?;
            let name = if peek.kind.ident().is_some() {
                p.stream.check_id()?;
                Some(p.pop_ident("expected function name")?)
            } else if is_expr {
                None
            } else {
                return Err(ParseError::syntax(
                    "function declaration is missing a name",
                    peek.span,
                ));
            };

            let open = p.stream.pop()?;
            if !open.is_punct(Punct::LParen) {
                return Err(ParseError::syntax("expected parameter list", open.span));
            }
            let open_span = open.span;

            let mut params = Vec::new();
            loop {
                if p.match_punct(Punct::RParen)? {
                    break;
                }
                p.stream.check_id()?;
                params.push(p.pop_ident("expected parameter name")?);

                let sep = p.peek_clone()?;
                if sep.is_punct(Punct::Comma) {
                    p.stream.pop()?;
                } else if sep.is_punct(Punct::RParen) {
                    // Loop closes the list.
                } else if p.at_eos()? {
                    return Err(ParseError::UnbalancedDelimiter {
                        delimiter: '(',
                        span: open_span,
                    });
                } else {
                    return Err(ParseError::syntax(
                        "expected ',' between parameters",
                        sep.span,
                    ));
                }
            }

            p.expect_block_open("parameter list")?;
            let body = p.function_body()?;
            Ok(Function { name, params, body })
        })
    }

    /// `{` source elements `}` — nested function declarations are allowed.
    fn function_body(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.descend(|p| {
            let open = p.stream.pop()?; // `{` (verified by the caller)
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
                body.push(p.source_element()?);
            }
            Ok(body)
        })
    }

    /// A parenthesized, comma-separated argument list. Generator-expression
    /// arguments are explicitly rejected.
    fn arguments(&mut self) -> Result<Vec<AssignExpr>, ParseError> {
        self.descend(|p| {
            let open = p.stream.pop()?; // `(` (verified by the caller)
            let open_span = open.span;
            let mut args = Vec::new();
            loop {
                if p.match_punct(Punct::RParen)? {
                    break;
                }
                if p.at_eos()? {
                    return Err(ParseError::UnbalancedDelimiter {
                        delimiter: '(',
                        span: open_span,
                    });
                }
                args.push(p.assign_expression()?);

                let sep = p.peek_clone()?;
                if sep.is_punct(Punct::Comma) {
                    p.stream.pop()?;
                } else if sep.is_punct(Punct::RParen) {
                    // Loop closes the list.
                } else if sep.is_reserved(ReservedWord::For) {
                    return Err(ParseError::Unsupported {
                        feature: "generator expression",
                        span: sep.span,
                    });
                } else if p.at_eos()? {
                    return Err(ParseError::UnbalancedDelimiter {
                        delimiter: '(',
                        span: open_span,
                    });
                } else {
                    return Err(ParseError::syntax(
                        format!("expected ',' between arguments, found {:?}", sep.kind),
                        sep.span,
                    ));
                }
            }
            Ok(args)
        })
    }

    /// An argument list if one is present (`new` without parens is legal).
    fn arguments_opt(&mut self) -> Result<Option<Vec<AssignExpr>>, ParseError> {
        if self.stream.peek()?.is_punct(Punct::LParen) {
            Ok(Some(self.arguments()?))
        } else {
            Ok(None)
        }
    }

    /// `[` comma-separated optional elements `]`; a bare comma yields an
    /// elision slot, and comprehension syntax is explicitly rejected.
    fn array_literal(&mut self) -> Result<PrimaryExpr, ParseError> {
        self.descend(|p| {
            let open = p.stream.pop()?; // `[` (verified by the caller)
            let open_span = open.span;
            let mut elements = Vec::new();
            loop {
                let peek = p.peek_clone()?;
                if peek.is_punct(Punct::RBracket) {
                    p.stream.pop()?;
                    break;
                }
                if peek.is_punct(Punct::Comma) {
                    p.stream.pop()?;
                    elements.push(None);
                    continue;
                }
                if peek.is_reserved(ReservedWord::For) {
                    return Err(ParseError::Unsupported {
                        feature: "array comprehension",
                        span: peek.span,
                    });
                }
                if p.at_eos()? {
                    return Err(ParseError::UnbalancedDelimiter {
                        delimiter: '[',
                        span: open_span,
                    });
                }

                elements.push(Some(p.assign_expression()?));
                let sep = p.stream.pop()?;
                if sep.is_punct(Punct::RBracket) {
                    break;
                }
                if !sep.is_punct(Punct::Comma) {
                    if sep.is_reserved(ReservedWord::For) {
                        return Err(ParseError::Unsupported {
                            feature: "array comprehension",
                            span: sep.span,
                        });
                    }
                    if sep.is_end() && p.stream.ended() {
                        return Err(ParseError::UnbalancedDelimiter {
                            delimiter: '[',
                            span: open_span,
                        });
                    }
                    return Err(ParseError::syntax(
                        format!("expected ',' after array element, found {:?}", sep.kind),
                        sep.span,
                    ));
                }
            }
            Ok(PrimaryExpr::Array(elements))
        })
    }

    /// `{` comma-separated properties `}`: `name: value` pairs and
    /// `get name() {…}` / `set name(arg) {…}` accessors.
    fn object_literal(&mut self) -> Result<PrimaryExpr, ParseError> {
        self.descend(|p| {
            let open = p.stream.pop()?; // `{` (verified by the caller)
            let open_span = open.span;
            let mut properties = Vec::new();
            loop {
                let token = p.stream.pop()?;
                if token.is_punct(Punct::RBrace) {
                    break;
                }
                if token.is_punct(Punct::Comma) {
                    continue;
                }
                if token.is_end() && p.stream.ended() {
                    return Err(ParseError::UnbalancedDelimiter {
                        delimiter: '{',
                        span: open_span,
                    });
                }

                // `get`/`set` introduce an accessor unless used as a plain
                // property name (`{get: 1}`).
                let is_get_set = matches!(token.kind.ident(), Some("get" | "set"));
                let accessor = if is_get_set && !p.stream.peek()?.is_punct(Punct::Colon) {
                    token.kind.ident().map(str::to_string)
                } else {
                    None
                };

                match accessor.as_deref() {
                    Some(kind) => {
                        let is_set = kind == "set";
                        let name = prop_name(p.stream.pop()?)?;
                        let paren = p.expect_punct(Punct::LParen, "expected '(' after property name")?;
                        let property = if is_set {
                            p.stream.check_id()?;
                            let param = p.pop_ident("expected setter parameter")?;
                            p.expect_close(
                                Punct::RParen,
                                '(',
                                paren.span,
                                "expected ')' after setter parameter",
                            )?;
                            p.expect_block_open("setter parameter list")?;
                            Property::Setter {
                                param,
                                body: p.function_body()?,
                            }
                        } else {
                            p.expect_close(
                                Punct::RParen,
                                '(',
                                paren.span,
                                "expected ')' after getter name",
                            )?;
                            p.expect_block_open("getter parameter list")?;
                            Property::Getter(p.function_body()?)
                        };
                        properties.push((name, property));
                    }
                    None => {
                        let name = prop_name(token)?;
                        p.expect_punct(Punct::Colon, "expected ':' after property name")?;
                        properties.push((name, Property::Value(p.assign_expression()?)));
                    }
                }
            }
            Ok(PrimaryExpr::Object(properties))
        })
    }
}

/// Convert a popped token into a property name; identifiers, strings, and
/// numeric literals are the accepted forms.
fn prop_name(token: Token) -> Result<PropName, ParseError> {
    match token.kind {
        TokenKind::Ident(name) => Ok(PropName::Ident(name)),
        TokenKind::Str(value) => Ok(PropName::Str(value)),
        TokenKind::Int(value) => Ok(PropName::Int(value)),
        TokenKind::Float(value) => Ok(PropName::Float(value)),
        kind => Err(ParseError::syntax(
            format!("expected property name, found {kind:?}"),
            token.span,
        )),
    }
}
