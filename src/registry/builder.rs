use std::{collections::HashMap, sync::Arc};

use crate::{
    error::{ConfigurationError, Entry, KevalError},
    interpreter::evaluator::EvalResult,
    registry::{
        builtin,
        core::{
            Associativity, BinaryOperator, Checked, Function, FunctionFn, OperatorFn, Registry,
            is_identifier, is_reserved_symbol,
        },
    },
};

/// Collects operators, functions and constants and finalizes them into a
/// [`Registry`].
///
/// Each entry is described by a closure that fills in a partial entry
/// builder. Entries are validated when they are added; the first invalid
/// entry is reported by [`RegistryBuilder::build`]. Adding an entry whose
/// symbol or name is already present replaces the earlier one, and
/// functions and constants share a single namespace.
///
/// # Example
/// ```
/// use keval::{Associativity, Registry};
///
/// let registry = Registry::builder().include_default()
///                                   .operator(|op| {
///                                       op.symbol(';')
///                                         .precedence(3)
///                                         .associativity(Associativity::Left)
///                                         .implementation(|a, b| a.max(b))
///                                   })
///                                   .function(|f| {
///                                       f.name("hypot")
///                                        .arity(2)
///                                        .implementation(|args| args[0].hypot(args[1]))
///                                   })
///                                   .constant(|c| c.name("tau").value(std::f64::consts::TAU))
///                                   .build()
///                                   .unwrap();
///
/// assert_eq!(keval::evaluate("2;5 + hypot(3, 4)", &registry), Ok(10.0));
/// ```
#[derive(Default)]
pub struct RegistryBuilder {
    operators: HashMap<char, BinaryOperator>,
    functions: HashMap<String, Function>,
    constants: HashMap<String, f64>,
    error:     Option<ConfigurationError>,
}

impl RegistryBuilder {
    /// Creates a builder with no entries at all.
    ///
    /// The finished registry still contains `*`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every built-in operator, function and constant.
    ///
    /// Entries added before this call are overridden by built-ins with the
    /// same key; entries added after it override the built-ins.
    #[must_use]
    pub fn include_default(mut self) -> Self {
        self.operators.extend(builtin::operators());
        for (name, function) in builtin::functions() {
            self.constants.remove(&name);
            self.functions.insert(name, function);
        }
        for (name, value) in builtin::constants() {
            self.functions.remove(&name);
            self.constants.insert(name, value);
        }
        self
    }

    /// Adds or replaces a binary operator.
    #[must_use]
    pub fn operator(mut self, define: impl FnOnce(OperatorBuilder) -> OperatorBuilder) -> Self {
        match define(OperatorBuilder::default()).finish() {
            Ok(operator) => {
                self.operators.insert(operator.symbol, operator);
            },
            Err(e) => self.record(e),
        }
        self
    }

    /// Adds or replaces a function.
    #[must_use]
    pub fn function(mut self, define: impl FnOnce(FunctionBuilder) -> FunctionBuilder) -> Self {
        match define(FunctionBuilder::default()).finish() {
            Ok(function) => {
                self.constants.remove(&function.name);
                self.functions.insert(function.name.clone(), function);
            },
            Err(e) => self.record(e),
        }
        self
    }

    /// Adds or replaces a constant.
    #[must_use]
    pub fn constant(mut self, define: impl FnOnce(ConstantBuilder) -> ConstantBuilder) -> Self {
        match define(ConstantBuilder::default()).finish() {
            Ok((name, value)) => {
                self.functions.remove(&name);
                self.constants.insert(name, value);
            },
            Err(e) => self.record(e),
        }
        self
    }

    /// Finalizes the registry.
    ///
    /// # Errors
    /// Returns [`KevalError::Configuration`] describing the first entry that
    /// was missing a mandatory field or used a reserved symbol or an invalid
    /// name.
    pub fn build(self) -> Result<Registry, KevalError> {
        if let Some(error) = self.error {
            return Err(error.into());
        }
        Ok(Registry::from_parts(self.operators, self.functions, self.constants))
    }

    fn record(&mut self, error: ConfigurationError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

/// A partially described binary operator.
///
/// `symbol`, `precedence` and an implementation are mandatory;
/// associativity defaults to [`Associativity::Left`].
#[derive(Default)]
pub struct OperatorBuilder {
    symbol:         Option<char>,
    precedence:     Option<i32>,
    associativity:  Option<Associativity>,
    implementation: Option<Arc<dyn OperatorFn>>,
}

impl OperatorBuilder {
    /// Sets the operator symbol.
    #[must_use]
    pub const fn symbol(mut self, symbol: char) -> Self {
        self.symbol = Some(symbol);
        self
    }

    /// Sets the precedence; higher binds tighter.
    #[must_use]
    pub const fn precedence(mut self, precedence: i32) -> Self {
        self.precedence = Some(precedence);
        self
    }

    /// Sets the associativity.
    #[must_use]
    pub const fn associativity(mut self, associativity: Associativity) -> Self {
        self.associativity = Some(associativity);
        self
    }

    /// Shorthand for [`OperatorBuilder::associativity`].
    #[must_use]
    pub const fn left_associative(self, left: bool) -> Self {
        self.associativity(if left { Associativity::Left } else { Associativity::Right })
    }

    /// Sets an infallible implementation.
    #[must_use]
    pub fn implementation<F>(mut self, implementation: F) -> Self
        where F: Fn(f64, f64) -> f64 + Send + Sync + 'static
    {
        self.implementation = Some(Arc::new(implementation));
        self
    }

    /// Sets an implementation that may fail, e.g. with
    /// [`KevalError::ZeroDivision`].
    #[must_use]
    pub fn checked_implementation<F>(mut self, implementation: F) -> Self
        where F: Fn(f64, f64) -> EvalResult<f64> + Send + Sync + 'static
    {
        self.implementation = Some(Arc::new(Checked(implementation)));
        self
    }

    fn finish(self) -> Result<BinaryOperator, ConfigurationError> {
        let symbol = self.symbol.ok_or(missing(Entry::Operator, "symbol"))?;
        if is_reserved_symbol(symbol) {
            return Err(ConfigurationError::ReservedSymbol(symbol));
        }
        Ok(BinaryOperator { symbol,
                            precedence: self.precedence
                                            .ok_or(missing(Entry::Operator, "precedence"))?,
                            associativity: self.associativity.unwrap_or_default(),
                            implementation: self.implementation
                                                .ok_or(missing(Entry::Operator,
                                                               "implementation"))? })
    }
}

/// A partially described function.
///
/// `name`, `arity` and an implementation are all mandatory.
#[derive(Default)]
pub struct FunctionBuilder {
    name:           Option<String>,
    arity:          Option<usize>,
    implementation: Option<Arc<dyn FunctionFn>>,
}

impl FunctionBuilder {
    /// Sets the function name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the exact number of arguments.
    #[must_use]
    pub const fn arity(mut self, arity: usize) -> Self {
        self.arity = Some(arity);
        self
    }

    /// Sets an infallible implementation.
    #[must_use]
    pub fn implementation<F>(mut self, implementation: F) -> Self
        where F: Fn(&[f64]) -> f64 + Send + Sync + 'static
    {
        self.implementation = Some(Arc::new(implementation));
        self
    }

    /// Sets an implementation that may fail.
    #[must_use]
    pub fn checked_implementation<F>(mut self, implementation: F) -> Self
        where F: Fn(&[f64]) -> EvalResult<f64> + Send + Sync + 'static
    {
        self.implementation = Some(Arc::new(Checked(implementation)));
        self
    }

    fn finish(self) -> Result<Function, ConfigurationError> {
        let name = self.name.ok_or(missing(Entry::Function, "name"))?;
        if !is_identifier(&name) {
            return Err(ConfigurationError::InvalidName(name));
        }
        Ok(Function { name,
                      arity: self.arity.ok_or(missing(Entry::Function, "arity"))?,
                      implementation: self.implementation
                                          .ok_or(missing(Entry::Function, "implementation"))? })
    }
}

/// A partially described constant.
///
/// `name` and `value` are both mandatory.
#[derive(Default)]
pub struct ConstantBuilder {
    name:  Option<String>,
    value: Option<f64>,
}

impl ConstantBuilder {
    /// Sets the constant name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the constant value.
    #[must_use]
    pub const fn value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    fn finish(self) -> Result<(String, f64), ConfigurationError> {
        let name = self.name.ok_or(missing(Entry::Constant, "name"))?;
        if !is_identifier(&name) {
            return Err(ConfigurationError::InvalidName(name));
        }
        let value = self.value.ok_or(missing(Entry::Constant, "value"))?;
        Ok((name, value))
    }
}

const fn missing(entry: Entry, field: &'static str) -> ConfigurationError {
    ConfigurationError::MissingField { entry, field }
}
