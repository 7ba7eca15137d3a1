use crate::registry::core::{BinaryOperator, Function};

/// An abstract syntax tree (AST) node representing a parsed expression.
///
/// The tree is strict: every node has exactly one owner and there are no
/// shared subtrees. Operator and function nodes borrow their entries from the
/// [`crate::Registry`] the expression was parsed against, so a tree cannot
/// outlive its registry. Constants are already resolved to leaves.
///
/// A flat chain such as `1+1+...+1` produces a tree as tall as it is long.
/// Evaluating, printing and dropping a tree therefore walk it with an
/// explicit stack instead of recursion.
pub enum Node<'r> {
    /// A literal number or a resolved constant.
    Leaf(f64),
    /// Prefix negation, `-term`.
    Negate(Box<Self>),
    /// A function call such as `sqrt(x)`.
    Call {
        /// The function being called.
        function:  &'r Function,
        /// Argument subtrees, in call order.
        arguments: Vec<Self>,
    },
    /// A binary operation such as `a + b`.
    Binary {
        /// The operator applied.
        operator: &'r BinaryOperator,
        /// Left operand.
        left:     Box<Self>,
        /// Right operand.
        right:    Box<Self>,
    },
}

impl Node<'_> {
    /// Moves the children of this node onto `stack`, leaving leaves behind.
    fn detach_children(&mut self, stack: &mut Vec<Self>) {
        match self {
            Self::Leaf(_) => {},
            Self::Negate(operand) => stack.push(std::mem::replace(&mut **operand, Self::Leaf(0.0))),
            Self::Call { arguments, .. } => stack.append(arguments),
            Self::Binary { left, right, .. } => {
                stack.push(std::mem::replace(&mut **left, Self::Leaf(0.0)));
                stack.push(std::mem::replace(&mut **right, Self::Leaf(0.0)));
            },
        }
    }
}

impl Drop for Node<'_> {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.detach_children(&mut stack);
        while let Some(mut node) = stack.pop() {
            node.detach_children(&mut stack);
        }
    }
}

/// A pending piece of output while printing a tree.
enum Piece<'a, 'r> {
    Node(&'a Node<'r>),
    Operator(char),
    Text(&'static str),
}

impl std::fmt::Display for Node<'_> {
    /// Writes the tree fully parenthesized, e.g. `(2 ^ (3 ^ 2))`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut pending = vec![Piece::Node(self)];
        while let Some(piece) = pending.pop() {
            match piece {
                Piece::Text(text) => write!(f, "{text}")?,
                Piece::Operator(symbol) => write!(f, " {symbol} ")?,
                Piece::Node(Node::Leaf(value)) => write!(f, "{value}")?,
                Piece::Node(Node::Negate(operand)) => {
                    write!(f, "-")?;
                    pending.push(Piece::Node(operand));
                },
                Piece::Node(Node::Call { function,
                                         arguments, }) => {
                    write!(f, "{}(", function.name)?;
                    pending.push(Piece::Text(")"));
                    for (i, argument) in arguments.iter().enumerate().rev() {
                        pending.push(Piece::Node(argument));
                        if i > 0 {
                            pending.push(Piece::Text(", "));
                        }
                    }
                },
                Piece::Node(Node::Binary { operator,
                                           left,
                                           right, }) => {
                    write!(f, "(")?;
                    pending.extend([Piece::Text(")"),
                                    Piece::Node(right),
                                    Piece::Operator(operator.symbol),
                                    Piece::Node(left)]);
                },
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Node").field(&format_args!("{self}")).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Registry;

    fn chain(length: usize) -> Node<'static> {
        let plus = Registry::builtin().lookup_operator('+').unwrap();
        let mut tree = Node::Leaf(1.0);
        for _ in 1..length {
            tree = Node::Binary { operator: plus,
                                  left:     Box::new(tree),
                                  right:    Box::new(Node::Leaf(1.0)), };
        }
        tree
    }

    #[test]
    fn display_is_fully_parenthesized() {
        let registry = Registry::builtin();
        let sqrt = registry.lookup_function("sqrt").unwrap();
        let minus = registry.lookup_operator('-').unwrap();
        let tree = Node::Binary { operator: minus,
                                  left:     Box::new(Node::Negate(Box::new(Node::Leaf(2.0)))),
                                  right:    Box::new(Node::Call { function:  sqrt,
                                                                  arguments: vec![Node::Leaf(4.0)], }), };
        assert_eq!(tree.to_string(), "(-2 - sqrt(4))");
        assert_eq!(format!("{tree:?}"), "Node((-2 - sqrt(4)))");
    }

    #[test]
    fn very_tall_trees_print_and_drop_on_a_small_stack() {
        let printed = std::thread::Builder::new().stack_size(256 * 1024)
                                                 .spawn(|| {
                                                     let tree = chain(200_000);
                                                     let text = tree.to_string();
                                                     drop(tree);
                                                     text.len()
                                                 })
                                                 .unwrap()
                                                 .join()
                                                 .unwrap();
        assert!(printed > 200_000);
    }
}
