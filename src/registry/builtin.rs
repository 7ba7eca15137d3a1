use std::{collections::HashMap, sync::Arc};

use crate::{
    error::KevalError,
    interpreter::evaluator::EvalResult,
    registry::core::{
        Associativity, BinaryOperator, Checked, Function, FunctionFn, MULTIPLICATION_PRECEDENCE,
        OperatorFn,
    },
};

/// Precedence of `+` and `-`.
pub const ADDITIVE_PRECEDENCE: i32 = 2;
/// Precedence of `*`, `/` and `%`.
pub const MULTIPLICATIVE_PRECEDENCE: i32 = MULTIPLICATION_PRECEDENCE;
/// Precedence of `^`.
pub const POWER_PRECEDENCE: i32 = 4;

/// A single-argument built-in backed by a plain `f64` method.
struct Unary(fn(f64) -> f64);

impl FunctionFn for Unary {
    fn apply(&self, args: &[f64]) -> EvalResult<f64> {
        Ok(args.first().map_or(f64::NAN, |&x| (self.0)(x)))
    }
}

/// Defines the built-in functions by generating the lookup table and a name
/// list.
///
/// Every built-in takes exactly one argument.
macro_rules! builtin_functions {
    (
        $(
            $name:literal => $func:expr
        ),* $(,)?
    ) => {
        /// Names of all built-in functions.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];

        /// Builds the built-in function table.
        pub(crate) fn functions() -> HashMap<String, Function> {
            let mut table = HashMap::new();
            $(
                table.insert($name.to_string(),
                             Function { name:           $name.to_string(),
                                        arity:          1,
                                        implementation: Arc::new(Unary($func)), });
            )*
            table
        }
    };
}

builtin_functions! {
    "neg"   => |x| -x,
    "abs"   => f64::abs,
    "sqrt"  => f64::sqrt,
    "cbrt"  => f64::cbrt,
    "exp"   => f64::exp,
    "ln"    => f64::ln,
    "log10" => f64::log10,
    "log2"  => f64::log2,
    "sin"   => f64::sin,
    "cos"   => f64::cos,
    "tan"   => f64::tan,
    "asin"  => f64::asin,
    "acos"  => f64::acos,
    "atan"  => f64::atan,
    "ceil"  => f64::ceil,
    "floor" => f64::floor,
    "round" => f64::round_ties_even,
}

/// Builds the built-in operator table.
///
/// `/` and `%` report [`KevalError::ZeroDivision`] when the right operand is
/// exactly zero.
pub(crate) fn operators() -> HashMap<char, BinaryOperator> {
    [operator('+', ADDITIVE_PRECEDENCE, Associativity::Left, Arc::new(|a: f64, b: f64| a + b)),
     operator('-', ADDITIVE_PRECEDENCE, Associativity::Left, Arc::new(|a: f64, b: f64| a - b)),
     BinaryOperator::multiplication(),
     operator('/',
              MULTIPLICATIVE_PRECEDENCE,
              Associativity::Left,
              Arc::new(Checked(|a: f64, b: f64| nonzero(b).map(|b| a / b)))),
     operator('%',
              MULTIPLICATIVE_PRECEDENCE,
              Associativity::Left,
              Arc::new(Checked(|a: f64, b: f64| nonzero(b).map(|b| a % b)))),
     operator('^', POWER_PRECEDENCE, Associativity::Right, Arc::new(f64::powf))]
        .into_iter()
        .map(|op| (op.symbol, op))
        .collect()
}

/// Builds the built-in constant table.
pub(crate) fn constants() -> HashMap<String, f64> {
    [("PI", std::f64::consts::PI), ("pi", std::f64::consts::PI), ("e", std::f64::consts::E)]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

fn operator(symbol: char,
            precedence: i32,
            associativity: Associativity,
            implementation: Arc<dyn OperatorFn>)
            -> BinaryOperator {
    BinaryOperator { symbol,
                     precedence,
                     associativity,
                     implementation }
}

fn nonzero(divisor: f64) -> EvalResult<f64> {
    if divisor == 0.0 { Err(KevalError::ZeroDivision) } else { Ok(divisor) }
}
