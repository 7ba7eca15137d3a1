/// The error returned by every stage of the pipeline.
///
/// Defines the single closed error type raised while tokenizing, parsing,
/// evaluating or configuring a registry. Callers match on it exhaustively.
pub mod keval_error;
/// Reasons an expression is structurally malformed.
///
/// Attached to [`KevalError::InvalidExpression`] so callers and the command
/// line front-end can tell a missing parenthesis from an arity mismatch.
pub mod malformation;
/// Registry configuration errors.
///
/// Raised when a registry entry reaches finalization with a required field
/// unset, or with a symbol or name the tokenizer could never recognize.
pub mod configuration_error;

pub use configuration_error::{ConfigurationError, Entry};
pub use keval_error::KevalError;
pub use malformation::Malformation;
