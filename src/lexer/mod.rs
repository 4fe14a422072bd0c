//! Tokenizer for the supported JavaScript subset.
//!
//! Handles tokenization including:
//! - Identifiers and word operators (`typeof`, `instanceof`, …)
//! - Numeric literals (decimal, octal, hex, floats), strings, regexes
//! - All multi-character operator spellings (`>>>=`, `===`, `&&`, …)
//! - Punctuation and the `;` / end-of-source `End` token
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `numbers` - Numeric literal scanning
//! - `strings` - String and regular-expression literal scanning
//! - `stream` - Lazily-filled lookahead stream consumed by the parser
//!
//! Whitespace and comments are skipped transparently. The scanner never
//! raises for running out of input; end-of-source surfaces as a synthetic
//! `End` token from the stream layer, and all "unexpected end of input"
//! failures belong to the parser.

mod numbers;
mod strings;
pub mod stream;
pub mod tokens;

pub use stream::TokenStream;
pub use tokens::{Token, TokenKind};

use crate::ast::Span;
use crate::diagnostics::ParseError;
use sigscript_vocab::operators::{BinaryOp, LogicalOp, RelationOp, UnaryOp};
use sigscript_vocab::punctuation::{self, Punct};

/// Scanner over one snippet of source text.
///
/// Produces tokens one at a time from a byte offset onward; the scan cursor
/// only ever advances. Line and column are tracked across every
/// line-terminator form the grammar recognizes (`\n`, `\r\n`, `\r`, U+2028,
/// U+2029).
pub struct Scanner<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    /// Byte offset the iterator is relative to.
    base: usize,
    current_pos: usize,
    line: u32,
    /// Byte offset of the current line's first character.
    line_start: usize,
    /// Whether a `/` here starts a regex literal rather than division.
    regex_allowed: bool,
}

impl<'a> Scanner<'a> {
    /// Create a scanner starting at byte offset `start` of `source`.
    ///
    /// Callers that have already located a function boundary inside a larger
    /// payload pass the boundary offset; line/column are still reported
    /// relative to the whole text.
    pub fn new(source: &'a str, start: usize) -> Self {
        let start = start.min(source.len());
        let (lines_before, line_start) = count_line_terminators(&source[..start]);
        Self {
            source,
            chars: source[start..].char_indices().peekable(),
            base: start,
            current_pos: start,
            line: 1 + lines_before,
            line_start,
            regex_allowed: true,
        }
    }

    /// Total length of the underlying source text.
    pub fn source_len(&self) -> usize {
        self.source.len()
    }

    /// The synthetic end-of-source token, positioned at end-of-text.
    pub fn end_token(&self) -> Token {
        let pos = self.source.len();
        let (lines, line_start) = count_line_terminators(self.source);
        Token::new(
            TokenKind::Punct(Punct::End),
            Span::new(pos, pos),
            1 + lines,
            (pos - line_start) as u32,
        )
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next();
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = self.base + pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn is_line_terminator(c: char) -> bool {
        matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
    }

    /// Consume one line terminator sequence (`\r\n` counts once).
    fn consume_line_terminator(&mut self, c: char) {
        if c == '\r' && self.peek() == Some('\n') {
            self.advance();
        }
        self.line += 1;
        self.line_start = self.current_pos;
    }

    // ========================================================================
    // Trivia
    // ========================================================================

    /// Skip whitespace and comments. Comments never surface as tokens.
    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        while let Some(c) = self.peek() {
            if Self::is_line_terminator(c) {
                self.advance();
                self.consume_line_terminator(c);
            } else if c.is_whitespace() {
                self.advance();
            } else if c == '/' && self.peek_next() == Some('/') {
                self.advance();
                self.advance();
                while let Some(c) = self.peek() {
                    if Self::is_line_terminator(c) {
                        break;
                    }
                    self.advance();
                }
            } else if c == '/' && self.peek_next() == Some('*') {
                let open = self.current_pos;
                self.advance();
                self.advance();
                self.skip_block_comment(open)?;
            } else {
                break;
            }
        }
        Ok(())
    }

    fn skip_block_comment(&mut self, open: usize) -> Result<(), ParseError> {
        loop {
            match self.advance() {
                None => {
                    return Err(ParseError::syntax(
                        "unterminated comment",
                        Span::new(open, self.current_pos),
                    ));
                }
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return Ok(());
                }
                Some(c) if Self::is_line_terminator(c) => self.consume_line_terminator(c),
                Some(_) => {}
            }
        }
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    /// Produce the next token, or `None` at end-of-source.
    pub fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        self.skip_trivia()?;

        let start = self.current_pos;
        let line = self.line;
        let col = (start - self.line_start) as u32;

        let Some(c) = self.advance() else {
            return Ok(None);
        };

        let kind = match c {
            // Strings
            '"' | '\'' => self.scan_string(start, c)?,

            // Numbers (a leading `.` followed by a digit is a float)
            '0'..='9' => self.scan_number(start, c)?,
            '.' if self.peek().is_some_and(|c| c.is_ascii_digit()) => self.scan_number(start, c)?,

            // Division, regex, or comment-free slash operators
            '/' => {
                if self.regex_allowed {
                    self.scan_regex(start)?
                } else if self.match_char('=') {
                    TokenKind::AssignOp(Some(BinaryOp::Div))
                } else {
                    TokenKind::BinOp(BinaryOp::Div)
                }
            }

            // Operators
            '+' => {
                if self.match_char('+') {
                    TokenKind::UnaryOp(UnaryOp::Increment)
                } else if self.match_char('=') {
                    TokenKind::AssignOp(Some(BinaryOp::Add))
                } else {
                    TokenKind::BinOp(BinaryOp::Add)
                }
            }
            '-' => {
                if self.match_char('-') {
                    TokenKind::UnaryOp(UnaryOp::Decrement)
                } else if self.match_char('=') {
                    TokenKind::AssignOp(Some(BinaryOp::Sub))
                } else {
                    TokenKind::BinOp(BinaryOp::Sub)
                }
            }
            '*' => {
                if self.match_char('=') {
                    TokenKind::AssignOp(Some(BinaryOp::Mul))
                } else {
                    TokenKind::BinOp(BinaryOp::Mul)
                }
            }
            '%' => {
                if self.match_char('=') {
                    TokenKind::AssignOp(Some(BinaryOp::Mod))
                } else {
                    TokenKind::BinOp(BinaryOp::Mod)
                }
            }
            '&' => {
                if self.match_char('&') {
                    TokenKind::LogicalOp(LogicalOp::And)
                } else if self.match_char('=') {
                    TokenKind::AssignOp(Some(BinaryOp::BitAnd))
                } else {
                    TokenKind::BinOp(BinaryOp::BitAnd)
                }
            }
            '|' => {
                if self.match_char('|') {
                    TokenKind::LogicalOp(LogicalOp::Or)
                } else if self.match_char('=') {
                    TokenKind::AssignOp(Some(BinaryOp::BitOr))
                } else {
                    TokenKind::BinOp(BinaryOp::BitOr)
                }
            }
            '^' => {
                if self.match_char('=') {
                    TokenKind::AssignOp(Some(BinaryOp::BitXor))
                } else {
                    TokenKind::BinOp(BinaryOp::BitXor)
                }
            }
            '~' => TokenKind::UnaryOp(UnaryOp::BitNot),
            '!' => {
                if self.match_char('=') {
                    if self.match_char('=') {
                        TokenKind::RelOp(RelationOp::StrictNotEq)
                    } else {
                        TokenKind::RelOp(RelationOp::NotEq)
                    }
                } else {
                    TokenKind::UnaryOp(UnaryOp::Not)
                }
            }
            '=' => {
                if self.match_char('=') {
                    if self.match_char('=') {
                        TokenKind::RelOp(RelationOp::StrictEq)
                    } else {
                        TokenKind::RelOp(RelationOp::Eq)
                    }
                } else {
                    TokenKind::AssignOp(None)
                }
            }
            '<' => {
                if self.match_char('<') {
                    if self.match_char('=') {
                        TokenKind::AssignOp(Some(BinaryOp::ShiftLeft))
                    } else {
                        TokenKind::BinOp(BinaryOp::ShiftLeft)
                    }
                } else if self.match_char('=') {
                    TokenKind::RelOp(RelationOp::LessEq)
                } else {
                    TokenKind::RelOp(RelationOp::Less)
                }
            }
            '>' => {
                if self.match_char('>') {
                    if self.match_char('>') {
                        if self.match_char('=') {
                            TokenKind::AssignOp(Some(BinaryOp::ShiftRightUnsigned))
                        } else {
                            TokenKind::BinOp(BinaryOp::ShiftRightUnsigned)
                        }
                    } else if self.match_char('=') {
                        TokenKind::AssignOp(Some(BinaryOp::ShiftRight))
                    } else {
                        TokenKind::BinOp(BinaryOp::ShiftRight)
                    }
                } else if self.match_char('=') {
                    TokenKind::RelOp(RelationOp::GreaterEq)
                } else {
                    TokenKind::RelOp(RelationOp::Greater)
                }
            }

            // Identifiers and word operators
            _ if is_ident_start(c) => self.scan_word(start),

            // Punctuation
            _ => match punctuation::from_char(c) {
                Some(p) => TokenKind::Punct(p),
                None => {
                    return Err(ParseError::syntax(
                        format!("unexpected character '{}'", c),
                        Span::new(start, self.current_pos),
                    ));
                }
            },
        };

        self.regex_allowed = regex_can_follow(&kind);
        Ok(Some(Token::new(kind, Span::new(start, self.current_pos), line, col)))
    }

    // ========================================================================
    // Identifiers and word operators
    // ========================================================================

    fn scan_word(&mut self, start: usize) -> TokenKind {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let spelling = &self.source[start..self.current_pos];
        match spelling {
            "true" => TokenKind::Bool(true),
            "false" => TokenKind::Bool(false),
            "null" => TokenKind::Null,
            // Word operators tokenize into their families and never surface
            // as identifiers.
            "typeof" => TokenKind::UnaryOp(UnaryOp::TypeOf),
            "void" => TokenKind::UnaryOp(UnaryOp::Void),
            "delete" => TokenKind::UnaryOp(UnaryOp::Delete),
            "in" => TokenKind::RelOp(RelationOp::In),
            "instanceof" => TokenKind::RelOp(RelationOp::InstanceOf),
            _ => TokenKind::Ident(spelling.to_string()),
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier.
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

/// Check if a character can continue an identifier.
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Count line-terminator sequences in `text`; also return the byte offset
/// just past the last one (i.e. the start of the final line).
fn count_line_terminators(text: &str) -> (u32, usize) {
    let mut count = 0u32;
    let mut line_start = 0usize;
    let mut iter = text.char_indices().peekable();
    while let Some((i, c)) = iter.next() {
        match c {
            '\r' => {
                count += 1;
                if let Some((_, '\n')) = iter.peek() {
                    iter.next();
                    line_start = i + 2;
                } else {
                    line_start = i + 1;
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {
                count += 1;
                line_start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    (count, line_start)
}

/// Whether a `/` after a token of this kind starts a regex literal.
///
/// A regex cannot follow something that can end an expression: an identifier,
/// a literal, a closing `)`/`]`, or a postfix-capable `++`/`--`. Everywhere
/// else `/` in operand position is a regex.
fn regex_can_follow(kind: &TokenKind) -> bool {
    !matches!(
        kind,
        TokenKind::Ident(_)
            | TokenKind::Int(_)
            | TokenKind::Float(_)
            | TokenKind::Str(_)
            | TokenKind::Bool(_)
            | TokenKind::Null
            | TokenKind::Regex { .. }
            | TokenKind::Punct(Punct::RParen)
            | TokenKind::Punct(Punct::RBracket)
            | TokenKind::UnaryOp(UnaryOp::Increment)
            | TokenKind::UnaryOp(UnaryOp::Decrement)
    )
}

/// Convenience function to tokenize a whole source string.
///
/// Returns the real tokens only; the synthetic end-of-source token is a
/// stream-layer concern (see [`TokenStream`]).
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut scanner = Scanner::new(source, 0);
    let mut tokens = Vec::new();
    while let Some(token) = scanner.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_punctuation_registry_parity() {
        for (id, ch) in punctuation::PUNCTUATION {
            let source = ch.to_string();
            let tokens = lex(&source).unwrap_or_else(|e| panic!("lex({source:?}) failed: {e}"));
            assert_eq!(tokens.len(), 1, "lex({source:?}) produced {tokens:?}");
            assert_eq!(tokens[0].kind, TokenKind::Punct(*id));
        }
    }

    #[test]
    fn test_binary_operator_registry_parity() {
        use sigscript_vocab::operators::{BINARY_OPERATORS, binary_as_str};

        for (id, _) in BINARY_OPERATORS {
            // Lex in operand-follows position so `/` is division, not regex.
            let source = format!("a {} b", binary_as_str(*id));
            let tokens = lex(&source).unwrap();
            assert_eq!(tokens.len(), 3, "lex({source:?}) produced {tokens:?}");
            assert_eq!(tokens[1].kind, TokenKind::BinOp(*id));
        }
    }

    #[test]
    fn test_assign_operator_registry_parity() {
        use sigscript_vocab::operators::{BINARY_OPERATORS, assign_as_str};

        for (id, _) in BINARY_OPERATORS {
            let source = format!("a {} b", assign_as_str(Some(*id)));
            let tokens = lex(&source).unwrap();
            assert_eq!(tokens.len(), 3, "lex({source:?}) produced {tokens:?}");
            assert_eq!(tokens[1].kind, TokenKind::AssignOp(Some(*id)));
        }
        let tokens = lex("a = b").unwrap();
        assert_eq!(tokens[1].kind, TokenKind::AssignOp(None));
    }

    #[test]
    fn test_relation_and_logical_operators() {
        let tokens = kinds("a < b <= c === d !== e instanceof f");
        assert_eq!(tokens[1], TokenKind::RelOp(RelationOp::Less));
        assert_eq!(tokens[3], TokenKind::RelOp(RelationOp::LessEq));
        assert_eq!(tokens[5], TokenKind::RelOp(RelationOp::StrictEq));
        assert_eq!(tokens[7], TokenKind::RelOp(RelationOp::StrictNotEq));
        assert_eq!(tokens[9], TokenKind::RelOp(RelationOp::InstanceOf));

        let tokens = kinds("a && b || c");
        assert_eq!(tokens[1], TokenKind::LogicalOp(LogicalOp::And));
        assert_eq!(tokens[3], TokenKind::LogicalOp(LogicalOp::Or));
    }

    #[test]
    fn test_word_operators_never_identifiers() {
        let tokens = kinds("typeof void delete x in y instanceof z");
        assert_eq!(tokens[0], TokenKind::UnaryOp(UnaryOp::TypeOf));
        assert_eq!(tokens[1], TokenKind::UnaryOp(UnaryOp::Void));
        assert_eq!(tokens[2], TokenKind::UnaryOp(UnaryOp::Delete));
        assert_eq!(tokens[4], TokenKind::RelOp(RelationOp::In));
        assert_eq!(tokens[6], TokenKind::RelOp(RelationOp::InstanceOf));
    }

    #[test]
    fn test_shift_spellings_max_munch() {
        let tokens = kinds("a >>> b >>>= c >>= d >> e");
        assert_eq!(tokens[1], TokenKind::BinOp(BinaryOp::ShiftRightUnsigned));
        assert_eq!(tokens[3], TokenKind::AssignOp(Some(BinaryOp::ShiftRightUnsigned)));
        assert_eq!(tokens[5], TokenKind::AssignOp(Some(BinaryOp::ShiftRight)));
        assert_eq!(tokens[7], TokenKind::BinOp(BinaryOp::ShiftRight));
    }

    #[test]
    fn test_increment_decrement() {
        let tokens = kinds("++a--");
        assert_eq!(tokens[0], TokenKind::UnaryOp(UnaryOp::Increment));
        assert_eq!(tokens[2], TokenKind::UnaryOp(UnaryOp::Decrement));
    }

    #[test]
    fn test_numbers() {
        let tokens = kinds("42 0 010 0x1F 3.5 1e3 .5 0.5");
        assert_eq!(tokens[0], TokenKind::Int(42));
        assert_eq!(tokens[1], TokenKind::Int(0));
        assert_eq!(tokens[2], TokenKind::Int(8));
        assert_eq!(tokens[3], TokenKind::Int(31));
        assert_eq!(tokens[4], TokenKind::Float(3.5));
        assert_eq!(tokens[5], TokenKind::Float(1000.0));
        assert_eq!(tokens[6], TokenKind::Float(0.5));
        assert_eq!(tokens[7], TokenKind::Float(0.5));
    }

    #[test]
    fn test_invalid_octal_digit() {
        let err = lex("09").unwrap_err();
        assert!(err.is_syntax(), "{err:?}");
    }

    #[test]
    fn test_strings_quotes_stripped_escapes_raw() {
        let tokens = kinds(r#""hello" 'wo rld' "a\nb" 'it\'s'"#);
        assert_eq!(tokens[0], TokenKind::Str("hello".to_string()));
        assert_eq!(tokens[1], TokenKind::Str("wo rld".to_string()));
        // Escapes are preserved raw: backslash + n, not a newline.
        assert_eq!(tokens[2], TokenKind::Str(r"a\nb".to_string()));
        assert_eq!(tokens[3], TokenKind::Str(r"it\'s".to_string()));
    }

    #[test]
    fn test_unterminated_string() {
        assert!(lex("\"abc").unwrap_err().is_syntax());
        assert!(lex("\"abc\ndef\"").unwrap_err().is_syntax());
    }

    #[test]
    fn test_regex_literal() {
        let tokens = kinds("/ab+c/gi");
        assert_eq!(
            tokens[0],
            TokenKind::Regex {
                body: "ab+c".to_string(),
                flags: "gi".to_string()
            }
        );

        // `/` inside a character class does not terminate the literal.
        let tokens = kinds("/[/]/");
        assert_eq!(
            tokens[0],
            TokenKind::Regex {
                body: "[/]".to_string(),
                flags: String::new()
            }
        );
    }

    #[test]
    fn test_regex_vs_division() {
        // After an identifier, `/` is division.
        let tokens = kinds("a / b");
        assert_eq!(tokens[1], TokenKind::BinOp(BinaryOp::Div));

        // After `)`, `/` is division.
        let tokens = kinds("(a) / 2");
        assert_eq!(tokens[3], TokenKind::BinOp(BinaryOp::Div));

        // In argument position, `/` starts a regex.
        let tokens = kinds("a.split(/,/)");
        assert!(
            matches!(&tokens[4], TokenKind::Regex { body, .. } if body == ","),
            "{tokens:?}"
        );
    }

    #[test]
    fn test_comments_skipped() {
        let tokens = kinds("var x = /* 1 + */ 2; // trailing\nreturn");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Ident("var".to_string()),
                TokenKind::Ident("x".to_string()),
                TokenKind::AssignOp(None),
                TokenKind::Int(2),
                TokenKind::Punct(Punct::End),
                TokenKind::Ident("return".to_string()),
            ]
        );
    }

    #[test]
    fn test_comment_opener_inside_string() {
        let tokens = kinds(r#"var x = "/*";"#);
        assert_eq!(tokens[3], TokenKind::Str("/*".to_string()));
    }

    #[test]
    fn test_unterminated_comment() {
        assert!(lex("1 /* comment").unwrap_err().is_syntax());
    }

    #[test]
    fn test_dollar_and_underscore_identifiers() {
        let tokens = kinds("$_axY2 = $_axY1 + 1");
        assert_eq!(tokens[0], TokenKind::Ident("$_axY2".to_string()));
        assert_eq!(tokens[2], TokenKind::Ident("$_axY1".to_string()));
    }

    #[test]
    fn test_line_and_column_tracking() {
        let tokens = lex("a\nbb\r\n  c").unwrap();
        assert_eq!((tokens[0].line, tokens[0].col), (1, 0));
        assert_eq!((tokens[1].line, tokens[1].col), (2, 0));
        assert_eq!((tokens[2].line, tokens[2].col), (3, 2));
    }

    #[test]
    fn test_start_offset() {
        let source = "garbage %% here\nfunction f() {}";
        let start = source.find("function").unwrap();
        let mut scanner = Scanner::new(source, start);
        let token = scanner.next_token().unwrap().unwrap();
        assert_eq!(token.kind, TokenKind::Ident("function".to_string()));
        assert_eq!(token.span.start, start);
        assert_eq!(token.line, 2);
        assert_eq!(token.col, 0);
    }

    #[test]
    fn test_spans_are_byte_offsets() {
        let tokens = lex("ab + cd").unwrap();
        assert_eq!(tokens[0].span, Span::new(0, 2));
        assert_eq!(tokens[1].span, Span::new(3, 4));
        assert_eq!(tokens[2].span, Span::new(5, 7));
    }
}
