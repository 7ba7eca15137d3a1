/// The kind of registry entry a configuration error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    /// A binary operator.
    Operator,
    /// A function.
    Function,
    /// A named constant.
    Constant,
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Operator => write!(f, "operator"),
            Self::Function => write!(f, "function"),
            Self::Constant => write!(f, "constant"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while finalizing a registry.
pub enum ConfigurationError {
    /// An entry was finalized without one of its mandatory fields.
    MissingField {
        /// The kind of entry being defined.
        entry: Entry,
        /// The name of the unset field.
        field: &'static str,
    },
    /// An operator symbol collides with a character the tokenizer reserves.
    ReservedSymbol(char),
    /// A function or constant name is not a valid identifier.
    InvalidName(String),
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { entry, field } => {
                write!(f, "Configuration error: {entry} is missing its '{field}' field.")
            },
            Self::ReservedSymbol(symbol) => write!(f,
                                                   "Configuration error: '{symbol}' is reserved and cannot be used as an operator."),
            Self::InvalidName(name) => write!(f,
                                              "Configuration error: '{name}' is not a valid function or constant name."),
        }
    }
}

impl std::error::Error for ConfigurationError {}
