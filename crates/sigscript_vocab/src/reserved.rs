//! Reserved-word vocabulary.
//!
//! This registry exists for **identifier validation only**: the parser rejects
//! any identifier that spells a reserved word. It deliberately carries no
//! syntactic metadata — statement keywords are recognized by spelling at the
//! grammar level, and the word operators (`typeof`, `in`, …) are tokenized
//! into their operator families before identifiers are ever considered.
//!
//! ## Examples
//! ```rust
//! use sigscript_vocab::reserved::{self, ReservedWord};
//!
//! assert_eq!(reserved::from_str("var"), Some(ReservedWord::Var));
//! assert_eq!(reserved::as_str(ReservedWord::Function), "function");
//! assert!(reserved::is_reserved("while"));
//! assert!(!reserved::is_reserved("decipher"));
//! ```

/// Stable identifier for every reserved word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedWord {
    Break,
    Case,
    Catch,
    Continue,
    Debugger,
    Default,
    Delete,
    Do,
    Else,
    Finally,
    For,
    Function,
    If,
    In,
    InstanceOf,
    New,
    Return,
    Switch,
    This,
    Throw,
    Try,
    TypeOf,
    Var,
    Void,
    While,
    With,
}

/// Registry of all reserved words with their canonical spellings.
pub const RESERVED_WORDS: &[(ReservedWord, &str)] = &[
    (ReservedWord::Break, "break"),
    (ReservedWord::Case, "case"),
    (ReservedWord::Catch, "catch"),
    (ReservedWord::Continue, "continue"),
    (ReservedWord::Debugger, "debugger"),
    (ReservedWord::Default, "default"),
    (ReservedWord::Delete, "delete"),
    (ReservedWord::Do, "do"),
    (ReservedWord::Else, "else"),
    (ReservedWord::Finally, "finally"),
    (ReservedWord::For, "for"),
    (ReservedWord::Function, "function"),
    (ReservedWord::If, "if"),
    (ReservedWord::In, "in"),
    (ReservedWord::InstanceOf, "instanceof"),
    (ReservedWord::New, "new"),
    (ReservedWord::Return, "return"),
    (ReservedWord::Switch, "switch"),
    (ReservedWord::This, "this"),
    (ReservedWord::Throw, "throw"),
    (ReservedWord::Try, "try"),
    (ReservedWord::TypeOf, "typeof"),
    (ReservedWord::Var, "var"),
    (ReservedWord::Void, "void"),
    (ReservedWord::While, "while"),
    (ReservedWord::With, "with"),
];

/// Resolve a spelling to a reserved word id. Case-sensitive.
pub fn from_str(name: &str) -> Option<ReservedWord> {
    RESERVED_WORDS
        .iter()
        .find(|(_, spelling)| *spelling == name)
        .map(|(id, _)| *id)
}

/// Canonical spelling for a reserved word.
pub fn as_str(id: ReservedWord) -> &'static str {
    RESERVED_WORDS
        .iter()
        .find(|(rid, _)| *rid == id)
        .map(|(_, spelling)| *spelling)
        .unwrap_or_else(|| unreachable!("every ReservedWord has a registry entry"))
}

/// Return `true` if `name` spells a reserved word.
pub fn is_reserved(name: &str) -> bool {
    from_str(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_round_trip() {
        for (id, spelling) in RESERVED_WORDS {
            assert_eq!(from_str(spelling), Some(*id));
            assert_eq!(as_str(*id), *spelling);
        }
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(from_str("Var"), None);
        assert_eq!(from_str("VAR"), None);
    }

    #[test]
    fn test_plain_identifiers_not_reserved() {
        for name in ["sig", "a", "$_axY1", "functio", "varx", "instanceOf"] {
            assert!(!is_reserved(name), "{name:?} should not be reserved");
        }
    }
}
