//! Parser for the supported JavaScript subset.
//!
//! Converts a token stream into the AST of `crate::ast`: mutually recursive
//! statement productions over a shunting-yard expression core. There is no
//! error recovery and no automatic-semicolon-insertion: the first grammar
//! violation aborts the parse, and statement terminators must be present
//! except immediately before a closing `}` or at end-of-source.
//!
//! ## Examples
//!
//! ```rust
//! use sigscript::ast::Stmt;
//! use sigscript::parser;
//!
//! let script = parser::parse("var x = 20; x += 30 + 1; return x;", 0).unwrap();
//! assert_eq!(script.body.len(), 3);
//! assert!(matches!(script.body[0], Stmt::Var(_)));
//! ```

use crate::ast::*;
use crate::diagnostics::ParseError;
use crate::lexer::{Token, TokenKind, TokenStream};
use sigscript_vocab::operators::{self, BinaryOp, LogicalOp, RelationOp, UnaryOp};
use sigscript_vocab::punctuation::Punct;
use sigscript_vocab::reserved::ReservedWord;

// NOTE: This module is split across multiple files using `include!` to keep all
// parser methods in the same Rust module (preserving privacy + call patterns)
// while avoiding a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/member.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
