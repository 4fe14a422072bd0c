//! Operator vocabulary: the five disjoint operator families.
//!
//! Each family is a stable ID enum plus a const spelling table. The ids are
//! the "evaluator placeholders" a downstream interpreter dispatches on; this
//! crate assigns no semantics and no precedence (precedence lives in the
//! parser's expression engine, the only place it matters).
//!
//! The compound-assignment family is not written out by hand: every binary
//! operator spelling suffixed with `=` is a compound assignment, plus the
//! dedicated plain `=` entry. [`assign_from_str`] performs that derivation.
//!
//! ## Notes
//! - `+` and `-` appear in both the binary and unary tables; the tokenizer
//!   emits them as binary and the parser reclassifies them in prefix position.
//! - `typeof`, `void`, and `delete` are word-spelled unary operators;
//!   `in` and `instanceof` are word-spelled relational operators. All five are
//!   tokenized into their families, never as identifiers.

// ============================================================================
// Binary (arithmetic / bitwise / shift)
// ============================================================================

/// Stable identifier for binary arithmetic, bitwise, and shift operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    BitOr,
    BitXor,
    BitAnd,
    ShiftRight,
    ShiftLeft,
    ShiftRightUnsigned,
    Sub,
    Add,
    Mod,
    Div,
    Mul,
}

/// Registry of binary operator spellings.
pub const BINARY_OPERATORS: &[(BinaryOp, &str)] = &[
    (BinaryOp::BitOr, "|"),
    (BinaryOp::BitXor, "^"),
    (BinaryOp::BitAnd, "&"),
    (BinaryOp::ShiftRight, ">>"),
    (BinaryOp::ShiftLeft, "<<"),
    (BinaryOp::ShiftRightUnsigned, ">>>"),
    (BinaryOp::Sub, "-"),
    (BinaryOp::Add, "+"),
    (BinaryOp::Mod, "%"),
    (BinaryOp::Div, "/"),
    (BinaryOp::Mul, "*"),
];

pub fn binary_from_str(spelling: &str) -> Option<BinaryOp> {
    BINARY_OPERATORS.iter().find(|(_, s)| *s == spelling).map(|(id, _)| *id)
}

pub fn binary_as_str(id: BinaryOp) -> &'static str {
    BINARY_OPERATORS
        .iter()
        .find(|(bid, _)| *bid == id)
        .map(|(_, s)| *s)
        .unwrap_or_else(|| unreachable!("every BinaryOp has a registry entry"))
}

// ============================================================================
// Compound assignment (derived) and plain `=`
// ============================================================================

/// Resolve an assignment spelling.
///
/// Returns `Some(None)` for plain `=`, `Some(Some(op))` for a compound
/// assignment derived from binary operator `op`, and `None` for anything else.
pub fn assign_from_str(spelling: &str) -> Option<Option<BinaryOp>> {
    if spelling == "=" {
        return Some(None);
    }
    spelling
        .strip_suffix('=')
        .and_then(binary_from_str)
        .map(Some)
}

/// Canonical spelling for an assignment operator id.
pub fn assign_as_str(op: Option<BinaryOp>) -> String {
    match op {
        None => "=".to_string(),
        Some(op) => format!("{}=", binary_as_str(op)),
    }
}

// ============================================================================
// Unary (prefix / postfix)
// ============================================================================

/// Stable identifier for prefix/postfix unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Prefix `+`
    Plus,
    /// Prefix `-`
    Neg,
    Increment,
    Decrement,
    Not,
    BitNot,
    Delete,
    Void,
    TypeOf,
}

/// Registry of unary operator spellings.
pub const UNARY_OPERATORS: &[(UnaryOp, &str)] = &[
    (UnaryOp::Plus, "+"),
    (UnaryOp::Neg, "-"),
    (UnaryOp::Increment, "++"),
    (UnaryOp::Decrement, "--"),
    (UnaryOp::Not, "!"),
    (UnaryOp::BitNot, "~"),
    (UnaryOp::Delete, "delete"),
    (UnaryOp::Void, "void"),
    (UnaryOp::TypeOf, "typeof"),
];

pub fn unary_from_str(spelling: &str) -> Option<UnaryOp> {
    UNARY_OPERATORS.iter().find(|(_, s)| *s == spelling).map(|(id, _)| *id)
}

pub fn unary_as_str(id: UnaryOp) -> &'static str {
    UNARY_OPERATORS
        .iter()
        .find(|(uid, _)| *uid == id)
        .map(|(_, s)| *s)
        .unwrap_or_else(|| unreachable!("every UnaryOp has a registry entry"))
}

/// Reclassify a binary `+`/`-` encountered in prefix position.
pub fn unary_from_binary(op: BinaryOp) -> Option<UnaryOp> {
    match op {
        BinaryOp::Add => Some(UnaryOp::Plus),
        BinaryOp::Sub => Some(UnaryOp::Neg),
        _ => None,
    }
}

// ============================================================================
// Logical
// ============================================================================

/// Stable identifier for short-circuiting logical operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    And,
    Or,
}

/// Registry of logical operator spellings.
pub const LOGICAL_OPERATORS: &[(LogicalOp, &str)] = &[(LogicalOp::And, "&&"), (LogicalOp::Or, "||")];

pub fn logical_from_str(spelling: &str) -> Option<LogicalOp> {
    LOGICAL_OPERATORS.iter().find(|(_, s)| *s == spelling).map(|(id, _)| *id)
}

pub fn logical_as_str(id: LogicalOp) -> &'static str {
    LOGICAL_OPERATORS
        .iter()
        .find(|(lid, _)| *lid == id)
        .map(|(_, s)| *s)
        .unwrap_or_else(|| unreachable!("every LogicalOp has a registry entry"))
}

// ============================================================================
// Relational / equality
// ============================================================================

/// Stable identifier for relational and equality operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationOp {
    Less,
    Greater,
    LessEq,
    GreaterEq,
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
    In,
    InstanceOf,
}

/// Registry of relational operator spellings.
pub const RELATION_OPERATORS: &[(RelationOp, &str)] = &[
    (RelationOp::Less, "<"),
    (RelationOp::Greater, ">"),
    (RelationOp::LessEq, "<="),
    (RelationOp::GreaterEq, ">="),
    (RelationOp::Eq, "=="),
    (RelationOp::NotEq, "!="),
    (RelationOp::StrictEq, "==="),
    (RelationOp::StrictNotEq, "!=="),
    (RelationOp::In, "in"),
    (RelationOp::InstanceOf, "instanceof"),
];

pub fn relation_from_str(spelling: &str) -> Option<RelationOp> {
    RELATION_OPERATORS.iter().find(|(_, s)| *s == spelling).map(|(id, _)| *id)
}

pub fn relation_as_str(id: RelationOp) -> &'static str {
    RELATION_OPERATORS
        .iter()
        .find(|(rid, _)| *rid == id)
        .map(|(_, s)| *s)
        .unwrap_or_else(|| unreachable!("every RelationOp has a registry entry"))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_round_trip() {
        for (id, spelling) in BINARY_OPERATORS {
            assert_eq!(binary_from_str(spelling), Some(*id));
            assert_eq!(binary_as_str(*id), *spelling);
        }
    }

    #[test]
    fn test_assign_derivation() {
        // Every binary operator has a derived compound assignment.
        for (id, spelling) in BINARY_OPERATORS {
            let compound = format!("{spelling}=");
            assert_eq!(assign_from_str(&compound), Some(Some(*id)), "{compound}");
            assert_eq!(assign_as_str(Some(*id)), compound);
        }
        // Plus the dedicated plain entry.
        assert_eq!(assign_from_str("="), Some(None));
        assert_eq!(assign_as_str(None), "=");
    }

    #[test]
    fn test_assign_rejects_non_assignments() {
        // `==`, `<=`, `===` end in `=` but are not assignments.
        for spelling in ["==", "!=", "<=", ">=", "===", "!==", "+", ""] {
            assert_eq!(assign_from_str(spelling), None, "{spelling:?}");
        }
    }

    #[test]
    fn test_unary_round_trip() {
        for (id, spelling) in UNARY_OPERATORS {
            assert_eq!(unary_from_str(spelling), Some(*id));
            assert_eq!(unary_as_str(*id), *spelling);
        }
    }

    #[test]
    fn test_unary_reclassification() {
        assert_eq!(unary_from_binary(BinaryOp::Add), Some(UnaryOp::Plus));
        assert_eq!(unary_from_binary(BinaryOp::Sub), Some(UnaryOp::Neg));
        assert_eq!(unary_from_binary(BinaryOp::Mul), None);
    }

    #[test]
    fn test_logical_and_relational_round_trip() {
        for (id, spelling) in LOGICAL_OPERATORS {
            assert_eq!(logical_from_str(spelling), Some(*id));
            assert_eq!(logical_as_str(*id), *spelling);
        }
        for (id, spelling) in RELATION_OPERATORS {
            assert_eq!(relation_from_str(spelling), Some(*id));
            assert_eq!(relation_as_str(*id), *spelling);
        }
    }

    #[test]
    fn test_families_disjoint_by_spelling() {
        // No spelling is claimed by two symbol families (word operators are
        // checked against the symbol tables too).
        for (_, s) in RELATION_OPERATORS {
            assert!(binary_from_str(s).is_none());
            assert!(logical_from_str(s).is_none());
        }
        for (_, s) in LOGICAL_OPERATORS {
            assert!(binary_from_str(s).is_none());
            assert!(relation_from_str(s).is_none());
        }
    }
}
