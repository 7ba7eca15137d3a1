use std::{iter::Peekable, slice};

use crate::{
    ast::Node,
    error::{KevalError, Malformation},
    interpreter::lexer::Token,
    registry::core::Registry,
};

pub type ParseResult<T> = Result<T, KevalError>;

/// Maximum nesting the parser descends into before giving up.
///
/// One level is spent by each parenthesized group, each function argument
/// list, each negation and each right operand of a right-associative
/// operator, counted from the outside in. Operands of left-associative
/// operators cost nothing, so `1+1+...+1` may be arbitrarily long.
pub const MAX_NESTING: usize = 128;

/// The lowest possible binding strength; every operator binds tighter.
pub(in crate::interpreter::parser) const LOWEST_PRECEDENCE: i64 = i64::MIN;

/// Parser state for a single expression.
///
/// Holds the token stream, the registry that gives operators their
/// precedence and identifiers their meaning, and the source text for error
/// reporting. Parsing methods live in the sibling `binary`, `unary` and
/// `utils` modules.
pub struct Parser<'t, 'r> {
    pub(in crate::interpreter::parser) tokens:   Peekable<slice::Iter<'t, (Token, usize)>>,
    pub(in crate::interpreter::parser) registry: &'r Registry,
    source:                                      &'t str,
    depth:                                       usize,
}

impl<'t, 'r> Parser<'t, 'r> {
    /// Creates a parser over a token sequence produced from `source`.
    #[must_use]
    pub fn new(tokens: &'t [(Token, usize)], registry: &'r Registry, source: &'t str) -> Self {
        Self { tokens: tokens.iter().peekable(),
               registry,
               source,
               depth: 0 }
    }

    /// Builds an [`KevalError::InvalidExpression`] for this source.
    pub(in crate::interpreter::parser) fn malformed(&self,
                                                    position: usize,
                                                    reason: Malformation)
                                                    -> KevalError {
        KevalError::InvalidExpression { expression: self.source.to_string(),
                                        position,
                                        reason }
    }

    /// The position just past the last character of the source.
    pub(in crate::interpreter::parser) fn end(&self) -> usize {
        self.source.chars().count()
    }

    /// The position of the next token, or the end of the source.
    pub(in crate::interpreter::parser) fn next_position(&mut self) -> usize {
        let next = self.tokens.peek().map(|(_, position)| *position);
        next.unwrap_or_else(|| self.end())
    }

    /// Descends one nesting level.
    ///
    /// # Errors
    /// Returns `TooDeep`, positioned at the next token, once more than
    /// [`MAX_NESTING`] levels are open.
    pub(in crate::interpreter::parser) fn enter(&mut self) -> ParseResult<()> {
        if self.depth >= MAX_NESTING {
            let position = self.next_position();
            return Err(self.malformed(position, Malformation::TooDeep { limit: MAX_NESTING }));
        }
        self.depth += 1;
        Ok(())
    }

    /// Leaves the current nesting level.
    pub(in crate::interpreter::parser) fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Parses the whole token stream into exactly one tree.
    ///
    /// # Errors
    /// Returns [`KevalError::InvalidExpression`] if the tokens do not form a
    /// single expression or if tokens remain after it.
    pub fn parse_all(mut self) -> ParseResult<Node<'r>> {
        let tree = self.parse_expression(LOWEST_PRECEDENCE)?;
        match self.tokens.next() {
            None => Ok(tree),
            Some((Token::RParen, position)) => {
                Err(self.malformed(*position, Malformation::UnmatchedParenthesis))
            },
            Some((token, position)) => {
                Err(self.malformed(*position,
                                   Malformation::UnexpectedToken { token: token.to_string() }))
            },
        }
    }
}

/// Parses a token sequence into a syntax tree.
///
/// This is the entry point for parsing. Binary operators are combined by
/// precedence climbing using the precedence and associativity the registry
/// assigns to each symbol; constants are resolved to leaves.
///
/// Grammar:
/// ```text
///     expression   := term (operator term)*
///     term         := number | constant | call | "(" expression ")" | "-" term
///     call         := function "(" [expression ("," expression)*] ")"
/// ```
///
/// # Parameters
/// - `tokens`: Tokens paired with their character positions, as produced by
///   [`crate::interpreter::lexer::tokenize`].
/// - `registry`: The registry the tokens were produced against.
/// - `source`: The original text, carried into errors.
///
/// # Returns
/// The root of the tree.
///
/// # Errors
/// Returns [`KevalError::InvalidExpression`] for mismatched parentheses,
/// dangling operators, unknown identifiers, arity mismatches, leftover tokens
/// or input nested beyond [`MAX_NESTING`].
///
/// # Example
/// ```
/// use keval::{
///     Registry,
///     interpreter::{lexer::tokenize, parser::core::parse},
/// };
///
/// let source = "2^3^2 - 1";
/// let registry = Registry::builtin();
/// let tokens = tokenize(source, registry).unwrap();
/// let tree = parse(&tokens, registry, source).unwrap();
///
/// assert_eq!(tree.to_string(), "((2 ^ (3 ^ 2)) - 1)");
/// ```
pub fn parse<'r>(tokens: &[(Token, usize)],
                 registry: &'r Registry,
                 source: &str)
                 -> ParseResult<Node<'r>> {
    Parser::new(tokens, registry, source).parse_all()
}
