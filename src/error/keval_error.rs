use crate::error::{ConfigurationError, Malformation};

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur while evaluating an expression.
///
/// Every stage of the pipeline reports failures through this type: the
/// tokenizer raises [`KevalError::InvalidSymbol`], the parser raises
/// [`KevalError::InvalidExpression`], the evaluator raises
/// [`KevalError::ZeroDivision`] and registry finalization raises
/// [`KevalError::Configuration`].
pub enum KevalError {
    /// Found a character or identifier the registry does not know.
    ///
    /// An identifier that names neither a function nor a constant lands
    /// here, so `1 + foo(2)` reports the symbol `foo` rather than an
    /// [`KevalError::InvalidExpression`].
    ///
    /// This is the lexical refinement of [`KevalError::InvalidExpression`];
    /// see [`KevalError::is_invalid_expression`].
    InvalidSymbol {
        /// The full source text.
        expression: String,
        /// The 0-based character offset of the symbol.
        position:   usize,
        /// The offending character or identifier.
        symbol:     String,
    },
    /// The token sequence does not form a valid expression.
    InvalidExpression {
        /// The full source text.
        expression: String,
        /// The 0-based character offset of the offending token.
        position:   usize,
        /// Why the expression is malformed.
        reason:     Malformation,
    },
    /// Attempted division (or remainder) by exactly zero.
    ZeroDivision,
    /// A registry entry could not be finalized.
    Configuration(ConfigurationError),
}

impl KevalError {
    /// Returns `true` for both [`KevalError::InvalidExpression`] and its
    /// lexical refinement [`KevalError::InvalidSymbol`].
    ///
    /// # Example
    /// ```
    /// let err = keval::eval("2 $ 3").unwrap_err();
    /// assert!(err.is_invalid_expression());
    /// ```
    #[must_use]
    pub const fn is_invalid_expression(&self) -> bool {
        matches!(self, Self::InvalidExpression { .. } | Self::InvalidSymbol { .. })
    }

    /// The 0-based character offset the error points at, if it has one.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::InvalidSymbol { position, .. } | Self::InvalidExpression { position, .. } => {
                Some(*position)
            },
            Self::ZeroDivision | Self::Configuration(_) => None,
        }
    }

    /// The source text the error was raised for, if any.
    #[must_use]
    pub fn expression(&self) -> Option<&str> {
        match self {
            Self::InvalidSymbol { expression, .. }
            | Self::InvalidExpression { expression, .. } => Some(expression),
            Self::ZeroDivision | Self::Configuration(_) => None,
        }
    }
}

impl From<ConfigurationError> for KevalError {
    fn from(error: ConfigurationError) -> Self {
        Self::Configuration(error)
    }
}

impl std::fmt::Display for KevalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSymbol { expression,
                                  position,
                                  symbol, } => write!(f,
                                                      "Error at position {position}: Invalid symbol '{symbol}' in '{expression}'."),
            Self::InvalidExpression { expression,
                                      position,
                                      reason, } => {
                write!(f, "Error at position {position}: {reason} In '{expression}'.")
            },
            Self::ZeroDivision => write!(f, "Error: Division by zero."),
            Self::Configuration(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for KevalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Configuration(e) => Some(e),
            _ => None,
        }
    }
}
