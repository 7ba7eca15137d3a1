/// The evaluator module computes the value of a syntax tree.
///
/// The evaluator walks the tree bottom-up, reading leaf values and calling
/// the operator and function implementations the tree borrows from its
/// registry. It holds no state between calls.
///
/// # Responsibilities
/// - Evaluates AST nodes in post-order.
/// - Propagates errors raised by implementations, such as division by zero.
pub mod evaluator;
/// The lexer module tokenizes expressions for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a sequence of
/// tokens paired with their character positions: numbers, identifiers,
/// operator symbols, parentheses and commas. Which symbols and identifiers
/// are valid depends on the registry the expression is evaluated against.
///
/// # Responsibilities
/// - Converts the input text into positioned tokens.
/// - Rejects characters and identifiers the registry does not define.
/// - Inserts the multiplication operator between adjacent operands.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token sequence produced by the lexer and
/// constructs a tree whose shape follows the precedence and associativity the
/// registry assigns to each operator.
///
/// # Responsibilities
/// - Converts tokens into AST nodes.
/// - Validates grammar, parentheses and call arity, reporting errors with
///   their position.
/// - Bounds how deeply an expression may nest.
pub mod parser;
