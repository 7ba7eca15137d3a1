/// Describes why a token sequence could not be turned into a syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Malformation {
    /// A `(` was opened but never closed.
    UnclosedParenthesis,
    /// A `)` appeared without a matching `(`.
    UnmatchedParenthesis,
    /// The input ended where an operand was expected.
    UnexpectedEndOfInput,
    /// A token appeared where it cannot be used.
    UnexpectedToken {
        /// Textual form of the offending token.
        token: String,
    },
    /// An identifier names neither a function nor a constant.
    UnknownIdentifier {
        /// The identifier.
        name: String,
    },
    /// A function name was not followed by its argument list.
    MissingArguments {
        /// The function name.
        name: String,
    },
    /// A function was called with the wrong number of arguments.
    ArityMismatch {
        /// The function name.
        name:     String,
        /// The registered arity.
        expected: usize,
        /// The number of arguments supplied.
        found:    usize,
    },
    /// The expression nests deeper than the parser allows.
    TooDeep {
        /// The limit that was exceeded.
        limit: usize,
    },
}

impl std::fmt::Display for Malformation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnclosedParenthesis => write!(f, "Parenthesis '(' is never closed."),
            Self::UnmatchedParenthesis => {
                write!(f, "Closing parenthesis ')' has no matching '('.")
            },
            Self::UnexpectedEndOfInput => write!(f, "Unexpected end of input."),
            Self::UnexpectedToken { token } => write!(f, "Unexpected token: {token}."),
            Self::UnknownIdentifier { name } => {
                write!(f, "'{name}' is neither a function nor a constant.")
            },
            Self::MissingArguments { name } => {
                write!(f, "Function '{name}' must be followed by its arguments in parentheses.")
            },
            Self::ArityMismatch { name,
                                  expected,
                                  found, } => write!(f,
                                                     "Function '{name}' takes {expected} argument(s) but {found} were given."),
            Self::TooDeep { limit } => {
                write!(f, "Expression nests deeper than the limit of {limit}.")
            },
        }
    }
}
