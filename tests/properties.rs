//! Property-based tests for expression evaluation.

use keval::{KevalError, Registry, eval, evaluate};
use proptest::prelude::*;

// Strategy for generating small integers
fn small_int() -> impl Strategy<Value = i32> {
    -1000i32..1000i32
}

// Strategy for generating non-zero integers
fn non_zero_int() -> impl Strategy<Value = i32> {
    prop_oneof![(-1000i32..=-1i32), (1i32..=1000i32)]
}

// Fully parenthesized expressions paired with the value Rust computes for them
fn arithmetic() -> impl Strategy<Value = (String, f64)> {
    let leaf = small_int().prop_map(|n| (n.to_string(), f64::from(n)));
    leaf.prop_recursive(6, 64, 2, |inner| {
            (inner.clone(), prop_oneof![Just('+'), Just('-'), Just('*')], inner).prop_map(
                |((left, a), op, (right, b))| {
                    let value = match op {
                        '+' => a + b,
                        '-' => a - b,
                        _ => a * b,
                    };
                    (format!("({left} {op} {right})"), value)
                },
            )
        })
}

proptest! {
    #[test]
    fn matches_rust_arithmetic((source, expected) in arithmetic()) {
        prop_assert_eq!(eval(&source), Ok(expected));
    }

    #[test]
    fn multiplication_binds_tighter_than_addition(a in small_int(), b in small_int(), c in small_int()) {
        let (x, y, z) = (f64::from(a), f64::from(b), f64::from(c));
        prop_assert_eq!(eval(&format!("{a} + {b} * {c}")), Ok(x + y * z));
        prop_assert_eq!(eval(&format!("{a} * {b} - {c}")), Ok(x * y - z));
    }

    #[test]
    fn subtraction_and_division_are_left_associative(a in small_int(), b in non_zero_int(), c in non_zero_int()) {
        let (x, y, z) = (f64::from(a), f64::from(b), f64::from(c));
        prop_assert_eq!(eval(&format!("{a} - {b} - {c}")), Ok(x - y - z));
        prop_assert_eq!(eval(&format!("{a} / {b} / {c}")), Ok(x / y / z));
        prop_assert_eq!(eval(&format!("{a} % {b}")), Ok(x % y));
    }

    #[test]
    fn power_is_right_associative(a in 1i32..4, b in 0i32..3, c in 0i32..3) {
        let (x, y, z) = (f64::from(a), f64::from(b), f64::from(c));
        prop_assert_eq!(eval(&format!("{a} ^ {b} ^ {c}")), Ok(x.powf(y.powf(z))));
    }

    #[test]
    fn adjacent_groups_multiply(a in small_int(), b in small_int(), c in 0i32..1000) {
        let product = f64::from(a) * f64::from(b);
        prop_assert_eq!(eval(&format!("({a})({b})")), Ok(product));
        prop_assert_eq!(eval(&format!("({a}) ({b})")), Ok(product));
        prop_assert_eq!(eval(&format!("({a}){c}")), Ok(f64::from(a) * f64::from(c)));
    }

    #[test]
    fn division_by_zero_is_always_reported(
        (source, _) in arithmetic(),
        divisor in prop_oneof![Just("0"), Just("(1 - 1)"), Just("-0"), Just("0.0")],
        first in any::<bool>(),
    ) {
        let expression = if first {
            format!("(1 / {divisor}) + {source}")
        } else {
            format!("{source} * (2 % {divisor})")
        };
        prop_assert_eq!(eval(&expression), Err(KevalError::ZeroDivision));
    }

    #[test]
    fn evaluation_is_idempotent((source, _) in arithmetic(), wrap in "(sin|cos|sqrt|ln|abs)") {
        let source = format!("{wrap}({source})");
        let registry = Registry::builtin();
        let first = evaluate(&source, registry).map(f64::to_bits);
        let second = evaluate(&source, registry).map(f64::to_bits);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn arbitrary_input_never_panics(source in "\\PC{0,40}") {
        let _ = eval(&source);
    }

    #[test]
    fn arbitrary_punctuation_never_panics(source in "[0-9+*/%^().,a-z -]{0,60}") {
        if let Err(e) = eval(&source) {
            prop_assert!(!e.to_string().is_empty());
        }
    }
}
