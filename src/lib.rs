//! Syntax frontend for the JavaScript subset used by player signature
//! routines: tokenizer, token stream, parser, AST, diagnostics.
//!
//! The parser turns one snippet of (typically machine-generated, obfuscated)
//! JavaScript into a sequence of typed AST nodes. It implements statements,
//! expressions across the full operator-precedence table, member/call chains,
//! functions, and array/object literals — and nothing more: no
//! automatic-semicolon-insertion, no error recovery, no evaluation. An
//! external interpreter consumes the produced tree.
//!
//! ## Notes
//! - Parsing is fully synchronous and allocation-only; independent snippets
//!   can be parsed concurrently with no shared mutable state.
//! - Pathological nesting is bounded by a per-parse recursion budget rather
//!   than by the host stack.
//!
//! ## Examples
//! ```rust
//! use sigscript::parser;
//!
//! let script = parser::parse("return 1 << 5;", 0).unwrap();
//! assert_eq!(script.body.len(), 1);
//! ```
//!
//! ## See also
//! - `sigscript_vocab` for the registry-backed lexical vocabulary
//!   (reserved words, punctuation, operator families).

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod token_helpers;
