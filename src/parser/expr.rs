/// Expression parsing methods.
///
/// Comma expressions wrap assignment expressions, which wrap conditional
/// expressions, which wrap the operator-precedence engine. Rather than one
/// recursive-descent level per precedence tier, binary/relational/logical
/// chains are resolved with an explicit-stack shunting-yard loop for O(n)
/// behavior; its output is the flat, evaluation-ordered `OperatorExpr`.
//
// Precedence (high binds tighter):
//
// 17 postfix ++/--
// 16 prefix (unary +/-, ++/--, !, ~, delete, void, typeof)
// 14 * / %
// 13 binary + -
// 12 << >> >>>
// 11 relational / equality / in / instanceof
//  9 &      8 ^      7 |
//  6 &&     5 ||
//  4 conditional ?: — resolved one level above the loop; doubles as the
//    "no operator" rank that drains the stack.
const PREC_POSTFIX: u8 = 17;
const PREC_PREFIX: u8 = 16;
const PREC_NONE: u8 = 4;

/// Precedence of a binary operator in the engine's table.
fn binary_precedence(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 14,
        BinaryOp::Add | BinaryOp::Sub => 13,
        BinaryOp::ShiftLeft | BinaryOp::ShiftRight | BinaryOp::ShiftRightUnsigned => 12,
        BinaryOp::BitAnd => 9,
        BinaryOp::BitXor => 8,
        BinaryOp::BitOr => 7,
    }
}

fn logical_precedence(op: LogicalOp) -> u8 {
    match op {
        LogicalOp::And => 6,
        LogicalOp::Or => 5,
    }
}

/// Pop every stacked operator of precedence `min_prec` or higher into the
/// output (left-associative resolution).
fn drain_ops(stack: &mut Vec<(u8, OperatorTag)>, out: &mut Vec<OpExprItem>, min_prec: u8) {
    while let Some((prec, tag)) = stack.last().copied() {
        if prec < min_prec {
            break;
        }
        stack.pop();
        out.push(OpExprItem::Op(tag));
    }
}

impl<'a> Parser<'a> {
    /// A comma-separated sequence of assignment expressions.
    fn expression(&mut self) -> Result<Expression, ParseError> {
        self.descend(|p| {
            let mut exprs = vec![p.assign_expression()?];
            while p.match_punct(Punct::Comma)? {
                exprs.push(p.assign_expression()?);
            }
            Ok(Expression { exprs })
        })
    }

    /// One conditional expression, optionally followed by an assignment
    /// operator and a right-associative assignment expression.
    fn assign_expression(&mut self) -> Result<AssignExpr, ParseError> {
        self.descend(|p| {
            // `yield` would otherwise pass identifier validation; fail it
            // explicitly.
            let peek = p.stream.peek()?;
            if peek.kind.ident() == Some("yield") {
                return Err(ParseError::Unsupported {
                    feature: "yield expression",
                    span: peek.span,
                });
            }

            let lhs = p.conditional_expression()?;
            let assign_op = match p.stream.peek()?.kind {
                TokenKind::AssignOp(op) => Some(op),
                _ => None,
            };
            let assign = match assign_op {
                Some(op) => {
                    p.stream.pop()?;
                    Some((op, Box::new(p.assign_expression()?)))
                }
                None => None,
            };
            Ok(AssignExpr { lhs, assign })
        })
    }

    /// One operator expression, optionally `? assign-expr : assign-expr`.
    fn conditional_expression(&mut self) -> Result<CondExpr, ParseError> {
        self.descend(|p| {
            let cond = p.operator_expression()?;
            let hook = p.peek_clone()?;
            if !hook.is_punct(Punct::Hook) {
                return Ok(CondExpr::Plain(cond));
            }
            p.stream.pop()?;
            let then = p.assign_expression()?;
            if !p.match_punct(Punct::Colon)? {
                return Err(ParseError::syntax(
                    "missing ':' in conditional expression",
                    hook.span,
                ));
            }
            let otherwise = p.assign_expression()?;
            Ok(CondExpr::Ternary {
                cond,
                then: Box::new(then),
                otherwise: Box::new(otherwise),
            })
        })
    }

    /// The precedence engine. Per operand position: consume a run of prefix
    /// operators, one member expression, at most one postfix `++`/`--`, then
    /// either push the next binary/relational/logical operator (after
    /// popping everything of greater-or-equal precedence — left-associative
    /// resolution) and repeat, or drain the stack and stop.
    fn operator_expression(&mut self) -> Result<OperatorExpr, ParseError> {
        self.descend(|p| {
            let mut out: Vec<OpExprItem> = Vec::new();
            let mut stack: Vec<(u8, OperatorTag)> = Vec::new();

            loop {
                // Prefix run. A binary `+`/`-` in prefix position is
                // reclassified as unary before it is pushed.
                let mut had_inc = false;
                loop {
                    let token = p.peek_clone()?;
                    let unary = match token.kind {
                        TokenKind::UnaryOp(op) => Some(op),
                        TokenKind::BinOp(op) => operators::unary_from_binary(op),
                        _ => None,
                    };
                    let Some(op) = unary else { break };

                    had_inc = matches!(op, UnaryOp::Increment | UnaryOp::Decrement);
                    let tag = if had_inc {
                        OperatorTag::Prefix(op)
                    } else {
                        OperatorTag::Unary(op)
                    };
                    drain_ops(&mut stack, &mut out, PREC_POSTFIX);
                    stack.push((PREC_PREFIX, tag));
                    p.stream.pop()?;

                    if had_inc {
                        let next = p.stream.peek()?;
                        if next.kind.ident().is_none() {
                            return Err(ParseError::syntax(
                                "prefix operator must be followed by an identifier",
                                next.span,
                            ));
                        }
                    }
                }

                out.push(OpExprItem::Operand(p.member_expression()?));

                // At most one postfix increment/decrement; combining it with
                // a prefix one on the same operand is a hard failure.
                let mut token = p.peek_clone()?;
                if let TokenKind::UnaryOp(op) = &token.kind {
                    let op = *op;
                    if !matches!(op, UnaryOp::Increment | UnaryOp::Decrement) {
                        return Err(ParseError::syntax("unexpected operator", token.span));
                    }
                    if had_inc {
                        return Err(ParseError::syntax(
                            "cannot combine prefix and postfix operators on one operand",
                            token.span,
                        ));
                    }
                    drain_ops(&mut stack, &mut out, PREC_POSTFIX);
                    stack.push((PREC_POSTFIX, OperatorTag::Postfix(op)));
                    p.stream.pop()?;
                    token = p.peek_clone()?;
                }

                // Incoming binary/relational/logical operator, if any.
                let incoming = match &token.kind {
                    TokenKind::RelOp(RelationOp::In) if !p.in_allowed => None,
                    TokenKind::RelOp(op) => Some((11, OperatorTag::Relation(*op))),
                    TokenKind::BinOp(op) => {
                        Some((binary_precedence(*op), OperatorTag::Binary(*op)))
                    }
                    TokenKind::LogicalOp(op) => {
                        Some((logical_precedence(*op), OperatorTag::Logical(*op)))
                    }
                    _ => None,
                };
                let prec = incoming.map_or(PREC_NONE, |(prec, _)| prec);
                drain_ops(&mut stack, &mut out, prec);

                match incoming {
                    None => break,
                    Some((prec, tag)) => {
                        stack.push((prec, tag));
                        p.stream.pop()?;
                    }
                }
            }

            Ok(OperatorExpr { items: out })
        })
    }
}
