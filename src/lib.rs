//! # keval
//!
//! keval is a mathematical expression evaluator written in Rust.
//! It tokenizes, parses, and evaluates arithmetic expressions such as
//! `(3+4)(2-5)` or `2^3^2 - sqrt(16)` against a configurable registry of
//! binary operators, functions, and constants.
//!
//! ```
//! use keval::Evaluate;
//!
//! assert_eq!(keval::eval("(3+4)(2-5)"), Ok(-21.0));
//! assert_eq!("2^3^2".keval(), Ok(512.0));
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::interpreter::{lexer::tokenize, parser::core::parse};

/// Defines the structure of parsed expressions.
///
/// This module declares the `Node` enum that represents an expression as a
/// strict tree. The tree is built by the parser, borrows its operators and
/// functions from a registry, and is consumed by the evaluator.
pub mod ast;
/// Provides the error types of the crate.
///
/// This module defines every error that can be raised while configuring a
/// registry or tokenizing, parsing, or evaluating an expression. Errors that
/// concern the expression text carry the text and the character position of
/// the failure.
///
/// # Responsibilities
/// - Defines [`KevalError`] and the detail enums it carries.
/// - Supports integration with standard error handling traits and reporting
///   utilities.
pub mod error;
/// Orchestrates the evaluation pipeline.
///
/// This module ties together lexing, parsing, and evaluation. Each stage is
/// a pure function of its input and the registry; nothing is kept between
/// calls.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, and evaluator.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// Describes the operators, functions, and constants an expression may use.
///
/// # Responsibilities
/// - Holds the finalized, immutable [`Registry`].
/// - Offers a fluent [`RegistryBuilder`] that validates entries.
/// - Provides the built-in registry.
pub mod registry;

pub use crate::{
    error::{ConfigurationError, Entry, KevalError, Malformation},
    interpreter::evaluator::EvalResult,
    registry::{
        builder::{ConstantBuilder, FunctionBuilder, OperatorBuilder, RegistryBuilder},
        core::{Associativity, BinaryOperator, Checked, Function, FunctionFn, OperatorFn, Registry},
    },
};

/// Evaluates an expression against a registry.
///
/// This runs the whole pipeline: the text is tokenized against the registry,
/// parsed into a tree, and the tree is evaluated. Nothing is cached; every
/// call starts from scratch.
///
/// # Parameters
/// - `expression`: The text to evaluate.
/// - `registry`: The operators, functions, and constants available to it.
///
/// # Returns
/// The value of the expression. Overflow and invalid domains yield `inf` or
/// `NaN` rather than an error.
///
/// # Errors
/// - [`KevalError::InvalidSymbol`] if the text contains a character or
///   identifier the registry does not define.
/// - [`KevalError::InvalidExpression`] if the tokens do not form a valid
///   expression.
/// - [`KevalError::ZeroDivision`] if a division or remainder by zero is
///   evaluated.
///
/// # Example
/// ```
/// use keval::{KevalError, Registry, evaluate};
///
/// let registry = Registry::builtin();
/// assert_eq!(evaluate("2 * (3 + 4)", registry), Ok(14.0));
/// assert_eq!(evaluate("1 / (2 - 2)", registry), Err(KevalError::ZeroDivision));
/// ```
pub fn evaluate(expression: &str, registry: &Registry) -> Result<f64, KevalError> {
    let tokens = tokenize(expression, registry)?;
    let tree = parse(&tokens, registry, expression)?;
    tree.eval()
}

/// Evaluates an expression against the built-in registry.
///
/// # Errors
/// See [`evaluate`].
///
/// # Example
/// ```
/// assert_eq!(keval::eval("-2^2 + sqrt(16)"), Ok(8.0));
/// assert!(keval::eval("(37+4)a+5").is_err());
/// ```
pub fn eval(expression: &str) -> Result<f64, KevalError> {
    evaluate(expression, Registry::builtin())
}

/// A reusable evaluator that owns its registry.
///
/// `Keval` is a convenience for callers who configure a registry once and
/// evaluate many expressions with it. It is `Send + Sync`, so a single
/// instance may be shared between threads.
///
/// # Example
/// ```
/// use keval::Keval;
///
/// let keval = Keval::from_builder(|b| {
///     b.include_default()
///      .constant(|c| c.name("g").value(9.81))
/// }).unwrap();
///
/// assert_eq!(keval.eval("2 * g"), Ok(19.62));
/// assert_eq!(keval.eval("g(2)"), Ok(19.62));
/// ```
#[derive(Debug, Clone)]
pub struct Keval {
    registry: Registry,
}

impl Keval {
    /// Creates an evaluator with the built-in registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(Registry::builtin().clone())
    }

    /// Creates an evaluator with an already built registry.
    #[must_use]
    pub const fn with_registry(registry: Registry) -> Self {
        Self { registry }
    }

    /// Configures a registry with a builder and wraps it.
    ///
    /// The closure receives an empty [`RegistryBuilder`]; call
    /// [`RegistryBuilder::include_default`] to start from the built-ins.
    ///
    /// # Errors
    /// Returns [`KevalError::Configuration`] if any entry is incomplete or
    /// invalid.
    pub fn from_builder<F>(configure: F) -> Result<Self, KevalError>
        where F: FnOnce(RegistryBuilder) -> RegistryBuilder
    {
        let registry = configure(Registry::builder()).build()?;
        Ok(Self::with_registry(registry))
    }

    /// Evaluates an expression with this evaluator's registry.
    ///
    /// # Errors
    /// See [`evaluate`].
    pub fn eval(&self, expression: &str) -> Result<f64, KevalError> {
        evaluate(expression, &self.registry)
    }

    /// The registry expressions are evaluated against.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl Default for Keval {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluation as a method on expression text.
///
/// # Example
/// ```
/// use keval::{Evaluate, Registry};
///
/// assert_eq!("10 % 4".keval(), Ok(2.0));
///
/// let registry = Registry::builder().operator(|op| {
///                                       op.symbol('+').precedence(1).implementation(|a, b| a + b)
///                                   })
///                                   .build()
///                                   .unwrap();
/// assert_eq!("2 + 3 * 4".keval_with(&registry), Ok(14.0));
/// assert!("2 - 3".keval_with(&registry).is_err());
/// ```
pub trait Evaluate {
    /// Evaluates `self` with the built-in registry.
    fn keval(&self) -> Result<f64, KevalError>;
    /// Evaluates `self` with the given registry.
    fn keval_with(&self, registry: &Registry) -> Result<f64, KevalError>;
}

impl Evaluate for str {
    fn keval(&self) -> Result<f64, KevalError> {
        eval(self)
    }

    fn keval_with(&self, registry: &Registry) -> Result<f64, KevalError> {
        evaluate(self, registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keval_is_shareable_between_threads() {
        let keval = std::sync::Arc::new(Keval::new());
        let handles: Vec<_> = (0..4).map(|i| {
                                        let keval = keval.clone();
                                        std::thread::spawn(move || {
                                            keval.eval(&format!("{i} * 2 + 1"))
                                        })
                                    })
                                    .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let expected = (i * 2 + 1) as f64;
            assert_eq!(handle.join().unwrap(), Ok(expected));
        }
    }

    #[test]
    fn configuration_errors_surface_from_builder() {
        let err = Keval::from_builder(|b| b.constant(|c| c.name("x"))).unwrap_err();
        assert!(matches!(err, KevalError::Configuration(_)));
    }
}
