/// Parse a snippet into a [`Script`].
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `source`: the JavaScript source text.
/// - `start`: byte offset to begin scanning at (callers that have already
///   located a function boundary inside a larger payload pass it here).
///
/// ## Errors
/// Returns the first [`ParseError`] encountered; there is no recovery.
#[tracing::instrument(skip_all, fields(source_len = source.len(), start))]
pub fn parse(source: &str, start: usize) -> Result<Script, ParseError> {
    Parser::new(source, start).parse()
}

/// Parse with an explicit recursion budget instead of
/// [`DEFAULT_RECURSION_BUDGET`].
///
/// The budget bounds grammar nesting depth per parse invocation,
/// independently of the host stack; exceeding it fails with
/// [`ParseError::RecursionLimit`].
#[tracing::instrument(skip_all, fields(source_len = source.len(), start, budget))]
pub fn parse_with_recursion_budget(
    source: &str,
    start: usize,
    budget: usize,
) -> Result<Script, ParseError> {
    Parser::with_recursion_budget(source, start, budget).parse()
}
