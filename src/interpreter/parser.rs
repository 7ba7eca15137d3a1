/// Core parser state, entry point and limits.
pub mod core;
/// Binary operators.
///
/// Combines terms with the registry's binary operators using precedence
/// climbing, honouring each operator's precedence and associativity.
pub mod binary;
/// Terms.
///
/// Parses the operands binary operators combine: numbers, constants,
/// function calls, parenthesized groups and negation.
pub mod unary;
/// Helpers shared by the parser, such as argument lists.
pub mod utils;
