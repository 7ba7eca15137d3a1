use crate::{
    ast::Node,
    error::Malformation,
    interpreter::{
        lexer::Token,
        parser::core::{LOWEST_PRECEDENCE, ParseResult, Parser},
    },
};

impl<'r> Parser<'_, 'r> {
    /// Parses a comma-separated argument list up to its closing `)`.
    ///
    /// The opening `(` must already be consumed. Each argument is a full
    /// expression; after it the parser expects either:
    ///
    /// - a comma, to continue the list, or
    /// - `)`, to end it.
    ///
    /// An immediately encountered `)` produces an empty list. The list as a
    /// whole costs one nesting level.
    ///
    /// Grammar (simplified): `arguments := [expression ("," expression)*]`
    ///
    /// # Parameters
    /// - `open`: Position of the opening `(`, reported if it is never closed.
    ///
    /// # Returns
    /// The parsed arguments, in order.
    ///
    /// # Errors
    /// Returns an `InvalidExpression` if:
    /// - an argument fails to parse,
    /// - an unexpected token follows an argument,
    /// - the stream ends before the closing `)`.
    pub(in crate::interpreter::parser) fn parse_arguments(&mut self,
                                                          open: usize)
                                                          -> ParseResult<Vec<Node<'r>>> {
        let mut arguments = Vec::new();
        if let Some((Token::RParen, _)) = self.tokens.peek() {
            self.tokens.next();

            return Ok(arguments);
        }
        self.enter()?;
        loop {
            arguments.push(self.parse_expression(LOWEST_PRECEDENCE)?);
            match self.tokens.next() {
                Some((Token::Comma, _)) => {},
                Some((Token::RParen, _)) => break,
                Some((token, position)) => {
                    return Err(self.malformed(*position,
                                              Malformation::UnexpectedToken { token:
                                                                                  token.to_string() }));
                },
                None => return Err(self.malformed(open, Malformation::UnclosedParenthesis)),
            }
        }
        self.leave();
        Ok(arguments)
    }
}
