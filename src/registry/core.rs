use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, LazyLock},
};

use crate::{
    interpreter::evaluator::EvalResult,
    registry::{builder::RegistryBuilder, builtin},
};

/// The symbol the tokenizer inserts for implicit multiplication.
pub const MULTIPLICATION_SYMBOL: char = '*';
/// The fixed precedence of the multiplication operator.
pub const MULTIPLICATION_PRECEDENCE: i32 = 3;

static BUILTIN: LazyLock<Registry> = LazyLock::new(|| {
    Registry::from_parts(builtin::operators(), builtin::functions(), builtin::constants())
});

/// The implementation of a binary operator.
///
/// Any `Fn(f64, f64) -> f64` closure or function pointer is an operator
/// implementation. Implementations that can fail, such as a division that
/// reports [`crate::KevalError::ZeroDivision`], are wrapped in [`Checked`].
pub trait OperatorFn: Send + Sync {
    /// Applies the operator to its two operands.
    fn apply(&self, lhs: f64, rhs: f64) -> EvalResult<f64>;
}

/// The implementation of a function.
///
/// Any `Fn(&[f64]) -> f64` closure or function pointer is a function
/// implementation. The argument slice always has the registered arity when
/// the call comes from a parsed expression.
pub trait FunctionFn: Send + Sync {
    /// Applies the function to its arguments.
    fn apply(&self, args: &[f64]) -> EvalResult<f64>;
}

impl<F> OperatorFn for F where F: Fn(f64, f64) -> f64 + Send + Sync
{
    fn apply(&self, lhs: f64, rhs: f64) -> EvalResult<f64> {
        Ok(self(lhs, rhs))
    }
}

impl<F> FunctionFn for F where F: Fn(&[f64]) -> f64 + Send + Sync
{
    fn apply(&self, args: &[f64]) -> EvalResult<f64> {
        Ok(self(args))
    }
}

/// Wraps a fallible closure so it can serve as an operator or function
/// implementation.
///
/// # Example
/// ```
/// use keval::{Checked, KevalError, OperatorFn};
///
/// let safe_div = Checked(|a: f64, b: f64| {
///     if b == 0.0 { Err(KevalError::ZeroDivision) } else { Ok(a / b) }
/// });
///
/// assert_eq!(safe_div.apply(6.0, 3.0), Ok(2.0));
/// assert_eq!(safe_div.apply(1.0, 0.0), Err(KevalError::ZeroDivision));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Checked<F>(pub F);

impl<F> OperatorFn for Checked<F> where F: Fn(f64, f64) -> EvalResult<f64> + Send + Sync
{
    fn apply(&self, lhs: f64, rhs: f64) -> EvalResult<f64> {
        (self.0)(lhs, rhs)
    }
}

impl<F> FunctionFn for Checked<F> where F: Fn(&[f64]) -> EvalResult<f64> + Send + Sync
{
    fn apply(&self, args: &[f64]) -> EvalResult<f64> {
        (self.0)(args)
    }
}

/// How operators of equal precedence group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Associativity {
    /// `a - b - c` groups as `(a - b) - c`.
    #[default]
    Left,
    /// `a ^ b ^ c` groups as `a ^ (b ^ c)`.
    Right,
}

/// A binary infix operator.
#[derive(Clone)]
pub struct BinaryOperator {
    /// The single character that spells the operator.
    pub symbol:         char,
    /// Binding strength; higher binds tighter.
    pub precedence:     i32,
    /// Grouping of operators with equal precedence.
    pub associativity:  Associativity,
    /// What the operator computes.
    pub implementation: Arc<dyn OperatorFn>,
}

impl BinaryOperator {
    /// Builds the multiplication operator that every registry contains.
    #[must_use]
    pub fn multiplication() -> Self {
        Self { symbol:         MULTIPLICATION_SYMBOL,
               precedence:     MULTIPLICATION_PRECEDENCE,
               associativity:  Associativity::Left,
               implementation: Arc::new(|a: f64, b: f64| a * b), }
    }

    /// Returns `true` if the operator groups left to right.
    #[must_use]
    pub fn is_left_associative(&self) -> bool {
        self.associativity == Associativity::Left
    }
}

impl std::fmt::Debug for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinaryOperator")
         .field("symbol", &self.symbol)
         .field("precedence", &self.precedence)
         .field("associativity", &self.associativity)
         .finish_non_exhaustive()
    }
}

/// A named function with a fixed arity.
#[derive(Clone)]
pub struct Function {
    /// The identifier the function is called by.
    pub name:           String,
    /// The exact number of arguments the function takes.
    pub arity:          usize,
    /// What the function computes.
    pub implementation: Arc<dyn FunctionFn>,
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
         .field("name", &self.name)
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}

/// The finalized set of operators, functions and constants an expression is
/// evaluated against.
///
/// A registry is immutable once built. It is `Send + Sync` and clones
/// cheaply, so one instance can serve any number of concurrent evaluations.
/// It always contains the multiplication operator `*`, which the tokenizer
/// relies on for implicit multiplication.
#[derive(Debug, Clone)]
pub struct Registry {
    operators: HashMap<char, BinaryOperator>,
    functions: HashMap<String, Function>,
    constants: HashMap<String, f64>,
}

impl Registry {
    /// Assembles a registry from finished tables, forcing in `*`.
    pub(crate) fn from_parts(mut operators: HashMap<char, BinaryOperator>,
                             functions: HashMap<String, Function>,
                             constants: HashMap<String, f64>)
                             -> Self {
        operators.insert(MULTIPLICATION_SYMBOL, BinaryOperator::multiplication());
        Self { operators,
               functions,
               constants }
    }

    /// Returns the shared built-in registry.
    ///
    /// It defines the operators `+ - * / % ^`, common single-argument
    /// functions such as `sqrt`, `sin` or `abs`, and the constants `PI`,
    /// `pi` and `e`.
    ///
    /// # Example
    /// ```
    /// use keval::Registry;
    ///
    /// let registry = Registry::builtin();
    /// assert!(registry.lookup_operator('^').is_some());
    /// assert_eq!(registry.lookup_constant("e"), Some(std::f64::consts::E));
    /// ```
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Starts an empty [`RegistryBuilder`].
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Looks up a binary operator by its symbol.
    #[must_use]
    pub fn lookup_operator(&self, symbol: char) -> Option<&BinaryOperator> {
        self.operators.get(&symbol)
    }

    /// Looks up a function by name.
    #[must_use]
    pub fn lookup_function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    /// Looks up the value of a constant by name.
    #[must_use]
    pub fn lookup_constant(&self, name: &str) -> Option<f64> {
        self.constants.get(name).copied()
    }

    /// Returns `true` if `name` is a function or a constant.
    #[must_use]
    pub fn knows_identifier(&self, name: &str) -> bool {
        self.functions.contains_key(name) || self.constants.contains_key(name)
    }

    /// The set of every operator symbol, as used by the tokenizer.
    #[must_use]
    pub fn symbol_set(&self) -> HashSet<char> {
        self.operators.keys().copied().collect()
    }

    /// Iterates over all operators in no particular order.
    pub fn operators(&self) -> impl Iterator<Item = &BinaryOperator> {
        self.operators.values()
    }

    /// Iterates over all functions in no particular order.
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.functions.values()
    }

    /// Iterates over all `(name, value)` constants in no particular order.
    pub fn constants(&self) -> impl Iterator<Item = (&str, f64)> {
        self.constants.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

/// Returns `true` if `symbol` can never be an operator because the tokenizer
/// gives it another meaning.
#[must_use]
pub fn is_reserved_symbol(symbol: char) -> bool {
    symbol.is_whitespace()
    || symbol.is_ascii_alphanumeric()
    || matches!(symbol, '.' | '(' | ')' | ',')
}

/// Returns `true` if `name` is spelled like an identifier the tokenizer
/// produces: an ASCII letter followed by ASCII letters or digits.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
    && chars.all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_contains_the_documented_operators() {
        let registry = Registry::builtin();
        for symbol in ['+', '-', '*', '/', '%', '^'] {
            assert!(registry.lookup_operator(symbol).is_some(), "missing {symbol}");
        }
        let pow = registry.lookup_operator('^').unwrap();
        assert_eq!(pow.associativity, Associativity::Right);
        assert!(pow.precedence > registry.lookup_operator('*').unwrap().precedence);
    }

    #[test]
    fn multiplication_is_always_present() {
        let registry = Registry::from_parts(HashMap::new(), HashMap::new(), HashMap::new());
        let mul = registry.lookup_operator('*').unwrap();
        assert_eq!(mul.precedence, MULTIPLICATION_PRECEDENCE);
        assert!(mul.is_left_associative());
        assert_eq!(mul.implementation.apply(6.0, 7.0), Ok(42.0));
        assert_eq!(registry.symbol_set(), HashSet::from(['*']));
    }

    #[test]
    fn identifiers_and_reserved_symbols() {
        assert!(is_identifier("log10"));
        assert!(is_identifier("x"));
        assert!(!is_identifier("10log"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("my_fn"));

        assert!(is_reserved_symbol('('));
        assert!(is_reserved_symbol('7'));
        assert!(is_reserved_symbol('a'));
        assert!(is_reserved_symbol(' '));
        assert!(!is_reserved_symbol(';'));
        assert!(!is_reserved_symbol('#'));
    }

    #[test]
    fn registry_is_shareable_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Registry>();
    }
}
