use logos::Logos;

use crate::{
    error::KevalError,
    interpreter::parser::core::ParseResult,
    registry::core::{MULTIPLICATION_SYMBOL, Registry},
};

/// Represents a lexical token in the source input.
///
/// `Operator` and `Identifier` are produced by the derive for any candidate
/// spelling; [`tokenize`] only lets through the ones the registry knows.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"\s+")]
pub enum Token {
    /// Numeric literal tokens, such as `3`, `3.14`, `.5` or `2.`.
    #[regex(r"[0-9]+(\.[0-9]*)?", parse_number)]
    #[regex(r"\.[0-9]+", parse_number)]
    Number(f64),
    /// Function or constant names such as `sqrt`, `log10` or `PI`.
    #[regex(r"[a-zA-Z][a-zA-Z0-9]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// Any single character that could be a binary operator.
    #[regex(r"[^\s0-9a-zA-Z(),]", |lex| lex.slice().chars().next())]
    Operator(char),
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::Operator(symbol) => write!(f, "{symbol}"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::Comma => write!(f, ","),
        }
    }
}

/// Parses a numeric literal from the current token slice.
///
/// # Returns
/// - `Some(f64)`: The parsed value.
/// - `None`: If the slice is not a valid float.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Converts monotonically increasing byte offsets into character offsets.
struct CharCursor<'a> {
    source: &'a str,
    byte:   usize,
    chars:  usize,
}

impl<'a> CharCursor<'a> {
    const fn new(source: &'a str) -> Self {
        Self { source,
               byte: 0,
               chars: 0 }
    }

    fn position_of(&mut self, byte: usize) -> usize {
        if let Some(skipped) = self.source.get(self.byte..byte) {
            self.chars += skipped.chars().count();
            self.byte = byte;
        }
        self.chars
    }
}

/// Splits an expression into tokens paired with their 0-based character
/// positions.
///
/// Whitespace is skipped. Operator characters must be in the registry's
/// symbol set and identifiers must name one of its functions or constants.
/// A `*` is inserted between a `)` and a following `(`, number or
/// identifier, and between a number or constant and a following `(`; the
/// inserted token takes the position of the token after it.
///
/// # Parameters
/// - `source`: The expression text.
/// - `registry`: The registry that decides which symbols are valid.
///
/// # Returns
/// The token sequence in source order.
///
/// # Errors
/// Returns [`KevalError::InvalidSymbol`] for the first character or
/// identifier the registry does not recognize.
///
/// # Example
/// ```
/// use keval::{
///     Registry,
///     interpreter::lexer::{Token, tokenize},
/// };
///
/// let tokens = tokenize("2(3)", Registry::builtin()).unwrap();
/// let tokens: Vec<Token> = tokens.into_iter().map(|(token, _)| token).collect();
///
/// assert_eq!(tokens,
///            vec![Token::Number(2.0),
///                 Token::Operator('*'),
///                 Token::LParen,
///                 Token::Number(3.0),
///                 Token::RParen]);
/// ```
pub fn tokenize(source: &str, registry: &Registry) -> ParseResult<Vec<(Token, usize)>> {
    let symbols = registry.symbol_set();
    let mut cursor = CharCursor::new(source);
    let mut tokens: Vec<(Token, usize)> = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let position = cursor.position_of(lexer.span().start);
        let token = match result {
            Ok(Token::Operator(symbol)) if symbols.contains(&symbol) => Token::Operator(symbol),
            Ok(Token::Identifier(name)) if registry.knows_identifier(&name) => {
                Token::Identifier(name)
            },
            Ok(Token::Operator(_) | Token::Identifier(_)) | Err(()) => {
                return Err(KevalError::InvalidSymbol { expression: source.to_string(),
                                                       position,
                                                       symbol: lexer.slice().to_string() });
            },
            Ok(token) => token,
        };

        if let Some((previous, _)) = tokens.last()
           && implies_multiplication(previous, &token, registry)
        {
            tokens.push((Token::Operator(MULTIPLICATION_SYMBOL), position));
        }
        tokens.push((token, position));
    }

    Ok(tokens)
}

/// Decides whether two adjacent tokens multiply without an explicit `*`.
fn implies_multiplication(previous: &Token, next: &Token, registry: &Registry) -> bool {
    match (previous, next) {
        (Token::RParen, Token::LParen | Token::Number(_) | Token::Identifier(_))
        | (Token::Number(_), Token::LParen) => true,
        (Token::Identifier(name), Token::LParen) => registry.lookup_constant(name).is_some(),
        _ => false,
    }
}
