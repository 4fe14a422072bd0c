//! Property-based tests for the sigscript parser.
//!
//! These use proptest to verify invariants across many generated inputs,
//! catching edge cases that hand-written fixtures might miss: literal
//! round-trips, reserved-word rejection, whitespace insensitivity, and the
//! recursion budget's behavior on pathologically nested input.

use proptest::prelude::*;

use sigscript::ast::{CondExpr, MemberTarget, OpExprItem, PrimaryExpr, Script, Stmt};
use sigscript::diagnostics::ParseError;
use sigscript::parser;
use sigscript_vocab::reserved;

fn parse(source: &str) -> Result<Script, ParseError> {
    parser::parse(source, 0)
}

/// Extract the single primary expression of a `return <expr>;` script.
fn returned_primary(script: &Script) -> &PrimaryExpr {
    let Stmt::Return(Some(expr)) = &script.body[0] else {
        panic!("expected return statement, got {:?}", script.body);
    };
    let CondExpr::Plain(operator_expr) = &expr.exprs[0].lhs else {
        panic!("expected plain operator expression");
    };
    let OpExprItem::Operand(operand) = &operator_expr.items[0] else {
        panic!("expected operand");
    };
    let MemberTarget::Primary(primary) = &operand.target else {
        panic!("expected primary expression");
    };
    primary
}

fn nested_parens(depth: usize) -> String {
    format!("return {}42{};", "(".repeat(depth), ")".repeat(depth))
}

proptest! {
    #[test]
    fn int_literals_round_trip(n: u32) {
        let script = parse(&format!("return {n};")).unwrap();
        prop_assert_eq!(returned_primary(&script), &PrimaryExpr::Int(i64::from(n)));
    }

    #[test]
    fn string_literals_round_trip(s in "[a-zA-Z0-9 +*/,.$_-]{0,24}") {
        let script = parse(&format!("return \"{s}\";")).unwrap();
        prop_assert_eq!(returned_primary(&script), &PrimaryExpr::Str(s));
    }

    #[test]
    fn var_names_validate_against_the_reserved_set(name in "[a-zA-Z_$][a-zA-Z0-9_$]{0,12}") {
        // `true`/`false`/`null` are literal tokens, not identifiers; they
        // fail differently and are not the property under test.
        prop_assume!(!matches!(name.as_str(), "true" | "false" | "null"));

        let source = format!("var {name} = 1;");
        match parse(&source) {
            Ok(script) => {
                prop_assert!(!reserved::is_reserved(&name), "{name:?} parsed but is reserved");
                prop_assert!(
                    matches!(&script.body[0], Stmt::Var(decls) if decls[0].name == name)
                );
            }
            Err(err) => {
                prop_assert!(reserved::is_reserved(&name), "{name:?} failed but is not reserved: {err}");
                // Syntax-failure class, positioned at the offending token.
                prop_assert!(err.is_syntax());
                prop_assert_eq!(err.offset(), Some(4));
            }
        }
    }

    #[test]
    fn whitespace_between_tokens_is_insignificant(
        pads in proptest::collection::vec("[ \t\n]{0,3}", 6)
    ) {
        let spaced = format!(
            "return{}1{}+{}2{}*{}3{};",
            pads[0], pads[1], pads[2], pads[3], pads[4], pads[5]
        );
        // Degenerate padding can glue `return` and `1` together; require a
        // separator where one is lexically necessary.
        prop_assume!(!pads[0].is_empty());

        prop_assert_eq!(parse(&spaced).unwrap(), parse("return 1+2*3;").unwrap());
    }

    #[test]
    fn nested_parens_parse_within_a_generous_budget(depth in 1usize..=20) {
        let script = parser::parse_with_recursion_budget(&nested_parens(depth), 0, 512).unwrap();
        prop_assert_eq!(script.body.len(), 1);
    }

    #[test]
    fn nested_parens_exhaust_an_undersized_budget(depth in 2usize..=20) {
        // Each paren level costs several nested productions, so three
        // budget units per level is always too few.
        let err = parser::parse_with_recursion_budget(&nested_parens(depth), 0, 3 * depth)
            .unwrap_err();
        prop_assert_eq!(err, ParseError::RecursionLimit);
    }

    #[test]
    fn unmatched_openers_fail_as_unbalanced(depth in 1usize..=8) {
        let source = format!("return {}42;", "(".repeat(depth));
        let err = parse(&source).unwrap_err();
        prop_assert!(
            matches!(err, ParseError::UnbalancedDelimiter { delimiter: '(', .. }),
            "{err:?}"
        );
    }

    #[test]
    fn comments_never_change_the_tree(pad in "[a-z0-9 ]{0,16}") {
        let commented = format!("return /* {pad} */ 1 + 2; // {pad}");
        prop_assert_eq!(parse(&commented).unwrap(), parse("return 1 + 2;").unwrap());
    }
}
