/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()`
/// entrypoint.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods
///   in a single module while avoiding a single “god file”.

/// Default recursion budget for a parse invocation.
pub const DEFAULT_RECURSION_BUDGET: usize = 100;

/// Parser state.
///
/// A `Parser` exclusively owns one [`TokenStream`] and one recursion-budget
/// counter for the lifetime of a single parse call; there is no shared or
/// global mutable state, so independent snippets can be parsed concurrently
/// on separate threads.
pub struct Parser<'a> {
    stream: TokenStream<'a>,
    /// Remaining nesting depth; every nested production decrements it on
    /// entry and fails with [`ParseError::RecursionLimit`] at zero.
    budget: usize,
    /// Cleared while parsing a `for` head's init clause so `in` is left for
    /// the `for-in` form instead of binding as a relational operator.
    in_allowed: bool,
}

impl<'a> Parser<'a> {
    /// Create a parser over `source`, scanning from byte offset `start`.
    ///
    /// Callers that have already located the function boundary inside a
    /// larger page/script payload pass a non-zero `start`.
    pub fn new(source: &'a str, start: usize) -> Self {
        Self::with_recursion_budget(source, start, DEFAULT_RECURSION_BUDGET)
    }

    /// Create a parser with an explicit recursion budget.
    pub fn with_recursion_budget(source: &'a str, start: usize, budget: usize) -> Self {
        Self {
            stream: TokenStream::new(source, start),
            budget,
            in_allowed: true,
        }
    }

    /// Parse the snippet into its finite sequence of top-level statements
    /// and function declarations.
    ///
    /// ## Errors
    /// The first grammar violation aborts the whole parse; nothing is
    /// retried or recovered.
    pub fn parse(mut self) -> Result<Script, ParseError> {
        let mut body = Vec::new();
        while !self.at_eos()? {
            body.push(self.source_element()?);
        }
        Ok(Script { body })
    }

    /// One top-level element: a function declaration or a statement.
    fn source_element(&mut self) -> Result<Stmt, ParseError> {
        self.descend(|p| {
            if p.stream.peek()?.is_reserved(ReservedWord::Function) {
                Ok(Stmt::Function(p.function(false)?))
            } else {
                p.statement()
            }
        })
    }
}
