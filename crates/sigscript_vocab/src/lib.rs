//! Lexical vocabulary registries for the sigscript parser.
//!
//! This crate is the single source of truth for the grammar's fixed lookup
//! data: the reserved-word set, the punctuation-character map, and the five
//! disjoint operator families (binary, compound-assignment, unary, logical,
//! relational).
//!
//! The design goal is to avoid stringly-typed checks scattered across the
//! tokenizer and parser. Callers work with **stable IDs** (e.g. [`BinaryOp`],
//! [`Punct`]) and look up spellings via registry functions.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST types, no IO, no side
//!   effects, and nothing here is mutated after initialization.
//! - The tokenizer enforces maximal munch; registries provide spellings and
//!   identity for shared use (diagnostics, tests, downstream interpreters).
//!
//! ## Examples
//! ```rust
//! use sigscript_vocab::operators::{self, BinaryOp};
//!
//! assert_eq!(operators::binary_from_str("<<"), Some(BinaryOp::ShiftLeft));
//! assert_eq!(operators::binary_as_str(BinaryOp::ShiftLeft), "<<");
//! // Compound assignment is derived mechanically from the binary table.
//! assert_eq!(operators::assign_from_str("<<="), Some(Some(BinaryOp::ShiftLeft)));
//! assert_eq!(operators::assign_from_str("="), Some(None));
//! ```

pub mod operators;
pub mod punctuation;
pub mod reserved;
