use crate::{
    ast::Node,
    error::KevalError,
    registry::core::{BinaryOperator, Function},
};

pub type EvalResult<T> = Result<T, KevalError>;

/// Pending work of the evaluation walk.
enum Step<'a, 'r> {
    /// Evaluate a subtree and push its value.
    Visit(&'a Node<'r>),
    /// Negate the top value.
    Negate,
    /// Combine the two top values.
    Apply(&'r BinaryOperator),
    /// Call a function on the top `n` values.
    Call(&'r Function, usize),
}

impl Node<'_> {
    /// Evaluates the tree rooted at this node.
    ///
    /// Evaluation is a post-order walk. Operands and arguments are evaluated
    /// left to right before their operator or function is applied, and the
    /// first error aborts the walk. The walk keeps its own stack, so the
    /// height of the tree does not matter.
    ///
    /// # Returns
    /// The numeric value of the tree. Non-finite results such as `inf` or
    /// `NaN` are returned as ordinary values.
    ///
    /// # Errors
    /// Propagates whatever an operator or function implementation raises,
    /// typically [`KevalError::ZeroDivision`].
    ///
    /// # Example
    /// ```
    /// use keval::{
    ///     Registry,
    ///     interpreter::{lexer::tokenize, parser::core::parse},
    /// };
    ///
    /// let registry = Registry::builtin();
    /// let tokens = tokenize("2 * (3 + 4)", registry).unwrap();
    /// let tree = parse(&tokens, registry, "2 * (3 + 4)").unwrap();
    ///
    /// assert_eq!(tree.eval(), Ok(14.0));
    /// ```
    pub fn eval(&self) -> EvalResult<f64> {
        let mut steps = vec![Step::Visit(self)];
        let mut values: Vec<f64> = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(Self::Leaf(value)) => values.push(*value),
                Step::Visit(Self::Negate(operand)) => {
                    steps.push(Step::Negate);
                    steps.push(Step::Visit(operand));
                },
                Step::Visit(Self::Call { function,
                                         arguments, }) => {
                    steps.push(Step::Call(*function, arguments.len()));
                    steps.extend(arguments.iter().rev().map(Step::Visit));
                },
                Step::Visit(Self::Binary { operator,
                                           left,
                                           right, }) => {
                    steps.extend([Step::Apply(*operator), Step::Visit(right), Step::Visit(left)]);
                },
                Step::Negate => {
                    let Some(value) = values.pop() else {
                        unreachable!("negation without an operand");
                    };
                    values.push(-value);
                },
                Step::Apply(operator) => {
                    let (Some(rhs), Some(lhs)) = (values.pop(), values.pop()) else {
                        unreachable!("binary operator without two operands");
                    };
                    values.push(operator.implementation.apply(lhs, rhs)?);
                },
                Step::Call(function, count) => {
                    let arguments = values.split_off(values.len() - count);
                    values.push(function.implementation.apply(&arguments)?);
                },
            }
        }

        match values.pop() {
            Some(value) if values.is_empty() => Ok(value),
            _ => unreachable!("evaluation leaves exactly one value"),
        }
    }
}

/// Evaluates a syntax tree.
///
/// Free-standing form of [`Node::eval`].
///
/// # Errors
/// See [`Node::eval`].
pub fn eval(node: &Node) -> EvalResult<f64> {
    node.eval()
}
