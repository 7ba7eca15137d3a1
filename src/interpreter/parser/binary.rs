use crate::{
    ast::Node,
    error::Malformation,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, Parser},
    },
};

impl<'r> Parser<'_, 'r> {
    /// Parses an expression whose operators all bind at least as tightly as
    /// `min_precedence`.
    ///
    /// This is precedence climbing: after a term, every following operator
    /// whose precedence reaches `min_precedence` is absorbed. Its right
    /// operand is parsed with a raised minimum, one above the operator's own
    /// precedence for left-associative operators (so an equal operator
    /// reduces first) and equal to it for right-associative ones (so an equal
    /// operator nests to the right).
    ///
    /// Left-associative chains are built in this loop and may be of any
    /// length. Each right-associative operand costs one nesting level.
    ///
    /// Examples with the built-in registry:
    /// ```text
    ///     8 - 3 - 2   =>  ((8 - 3) - 2)
    ///     2 ^ 3 ^ 2   =>  (2 ^ (3 ^ 2))
    ///     1 + 2 * 3   =>  (1 + (2 * 3))
    /// ```
    ///
    /// # Parameters
    /// - `min_precedence`: The weakest binding operator this call may absorb.
    ///
    /// # Returns
    /// The combined subtree.
    ///
    /// # Errors
    /// Propagates errors from the operands and reports operator tokens the
    /// registry does not define.
    pub(in crate::interpreter::parser) fn parse_expression(&mut self,
                                                           min_precedence: i64)
                                                           -> ParseResult<Node<'r>> {
        let mut left = self.parse_term()?;

        while let Some(&&(Token::Operator(symbol), position)) = self.tokens.peek() {
            let Some(operator) = self.registry.lookup_operator(symbol) else {
                return Err(self.malformed(position,
                                          Malformation::UnexpectedToken { token:
                                                                              symbol.to_string() }));
            };

            let precedence = i64::from(operator.precedence);
            if precedence < min_precedence {
                break;
            }
            self.tokens.next();

            let right = if operator.is_left_associative() {
                self.parse_expression(precedence + 1)?
            } else {
                self.enter()?;
                let right = self.parse_expression(precedence)?;
                self.leave();
                right
            };

            left = Node::Binary { operator,
                                  left: Box::new(left),
                                  right: Box::new(right) };
        }

        Ok(left)
    }
}
