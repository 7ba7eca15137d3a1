use crate::{
    ast::Node,
    error::Malformation,
    interpreter::{
        lexer::Token,
        parser::core::{LOWEST_PRECEDENCE, ParseResult, Parser},
    },
};

impl<'r> Parser<'_, 'r> {
    /// Parses a term: the operand a binary operator combines.
    ///
    /// A `-` in operand position negates the term that follows it; it does
    /// not need a unary entry in the registry. Negation applies to the term
    /// only, so `-2 ^ 2` is `(-2) ^ 2`. Each negation, group and argument
    /// list costs one nesting level.
    ///
    /// Grammar:
    /// ```text
    ///     term := NUMBER
    ///           | constant
    ///           | function "(" arguments ")"
    ///           | "(" expression ")"
    ///           | "-" term
    /// ```
    /// # Returns
    /// The parsed subtree.
    ///
    /// # Errors
    /// Returns an `InvalidExpression` if the input ends, or if the next token
    /// cannot start a term.
    pub(in crate::interpreter::parser) fn parse_term(&mut self) -> ParseResult<Node<'r>> {
        let Some((token, position)) = self.tokens.next() else {
            return Err(self.malformed(self.end(), Malformation::UnexpectedEndOfInput));
        };
        let position = *position;

        match token {
            Token::Number(value) => Ok(Node::Leaf(*value)),
            Token::Identifier(name) => self.parse_identifier(name, position),
            Token::LParen => self.parse_grouping(position),
            Token::Operator('-') => {
                self.enter()?;
                let operand = self.parse_term()?;
                self.leave();
                Ok(Node::Negate(Box::new(operand)))
            },
            token => {
                Err(self.malformed(position,
                                   Malformation::UnexpectedToken { token: token.to_string() }))
            },
        }
    }

    /// Parses a constant or a function call, given its already consumed
    /// identifier.
    ///
    /// Constants become leaves holding their value. A function name must be
    /// followed by a parenthesized argument list whose length matches the
    /// registered arity.
    ///
    /// # Parameters
    /// - `name`: The identifier.
    /// - `position`: Position of the identifier, used for every error raised
    ///   here.
    ///
    /// # Errors
    /// Returns an `InvalidExpression` positioned at the identifier if the
    /// name is unknown, if the argument list is missing, or if the number of
    /// arguments differs from the arity.
    fn parse_identifier(&mut self, name: &str, position: usize) -> ParseResult<Node<'r>> {
        if let Some(value) = self.registry.lookup_constant(name) {
            return Ok(Node::Leaf(value));
        }
        let Some(function) = self.registry.lookup_function(name) else {
            return Err(self.malformed(position,
                                      Malformation::UnknownIdentifier { name: name.to_string() }));
        };

        let open = match self.tokens.next() {
            Some((Token::LParen, open)) => *open,
            _ => {
                return Err(self.malformed(position,
                                          Malformation::MissingArguments { name:
                                                                               name.to_string() }));
            },
        };
        let arguments = self.parse_arguments(open)?;

        if arguments.len() != function.arity {
            return Err(self.malformed(position,
                                      Malformation::ArityMismatch { name:     name.to_string(),
                                                                    expected: function.arity,
                                                                    found:    arguments.len(), }));
        }

        Ok(Node::Call { function, arguments })
    }

    /// Parses a parenthesized expression whose `(` at `open` is already
    /// consumed.
    ///
    /// # Returns
    /// The inner expression as-is (no wrapper node).
    ///
    /// # Errors
    /// Returns `UnclosedParenthesis` at `open` if the input ends before the
    /// matching `)`.
    fn parse_grouping(&mut self, open: usize) -> ParseResult<Node<'r>> {
        self.enter()?;
        let inner = self.parse_expression(LOWEST_PRECEDENCE)?;
        self.leave();
        match self.tokens.next() {
            Some((Token::RParen, _)) => Ok(inner),
            Some((token, position)) => {
                Err(self.malformed(*position,
                                   Malformation::UnexpectedToken { token: token.to_string() }))
            },
            None => Err(self.malformed(open, Malformation::UnclosedParenthesis)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Registry,
        error::{KevalError, Malformation},
        interpreter::{lexer::tokenize, parser::core::parse},
    };

    fn shape(source: &str) -> String {
        let registry = Registry::builtin();
        let tokens = tokenize(source, registry).unwrap();
        parse(&tokens, registry, source).unwrap().to_string()
    }

    fn failure(source: &str, registry: &Registry) -> (usize, Malformation) {
        let tokens = tokenize(source, registry).unwrap();
        match parse(&tokens, registry, source).unwrap_err() {
            KevalError::InvalidExpression { position,
                                            reason,
                                            expression, } => {
                assert_eq!(expression, source);
                (position, reason)
            },
            other => panic!("expected an invalid expression, got {other:?}"),
        }
    }

    #[test]
    fn negation_applies_to_the_next_term() {
        assert_eq!(shape("-2 ^ 2"), "(-2 ^ 2)");
        assert_eq!(shape("--3"), "--3");
        assert_eq!(shape("2 * -3"), "(2 * -3)");
        assert_eq!(shape("-(1 + 2)"), "-(1 + 2)");
    }

    #[test]
    fn constants_become_leaves() {
        assert_eq!(shape("e"), std::f64::consts::E.to_string());
        assert_eq!(shape("pi(2)"), format!("({} * 2)", std::f64::consts::PI));
    }

    #[test]
    fn function_calls() {
        assert_eq!(shape("sqrt(4)"), "sqrt(4)");
        assert_eq!(shape("sqrt(abs(-16)) + 1"), "(sqrt(abs(-16)) + 1)");
    }

    #[test]
    fn parenthesis_errors_point_at_the_culprit() {
        let registry = Registry::builtin();
        assert_eq!(failure("(1+2", registry), (0, Malformation::UnclosedParenthesis));
        assert_eq!(failure("1+2)", registry), (3, Malformation::UnmatchedParenthesis));
        assert_eq!(failure("((1)", registry), (0, Malformation::UnclosedParenthesis));
        assert_eq!(failure("(1 2)", registry),
                   (3, Malformation::UnexpectedToken { token: "2".to_string() }));
    }

    #[test]
    fn function_errors_point_at_the_identifier() {
        let registry = Registry::builder().include_default()
                                          .function(|f| {
                                              f.name("hypot")
                                               .arity(2)
                                               .implementation(|args| args[0].hypot(args[1]))
                                          })
                                          .build()
                                          .unwrap();
        assert_eq!(failure("1 + hypot(3)", &registry),
                   (4,
                    Malformation::ArityMismatch { name:     "hypot".to_string(),
                                                  expected: 2,
                                                  found:    1, }));
        assert_eq!(failure("1 + sqrt(1, 2)", &registry),
                   (4,
                    Malformation::ArityMismatch { name:     "sqrt".to_string(),
                                                  expected: 1,
                                                  found:    2, }));
        assert_eq!(failure("sqrt 4", &registry),
                   (0, Malformation::MissingArguments { name: "sqrt".to_string() }));
        assert_eq!(failure("hypot(3, 4", &registry), (5, Malformation::UnclosedParenthesis));
    }

    #[test]
    fn zero_arity_functions() {
        let registry = Registry::builder().function(|f| {
                                              f.name("answer").arity(0).implementation(|_| 42.0)
                                          })
                                          .build()
                                          .unwrap();
        let tokens = tokenize("answer()", &registry).unwrap();
        assert_eq!(parse(&tokens, &registry, "answer()").unwrap().to_string(), "answer()");
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let registry = Registry::builtin();
        let source = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        let (_, reason) = failure(&source, registry);
        assert!(matches!(reason, Malformation::TooDeep { .. }));

        let source = format!("{}1", "-".repeat(10_000));
        let (_, reason) = failure(&source, registry);
        assert!(matches!(reason, Malformation::TooDeep { .. }));

        let source = format!("{}1{}", "(".repeat(50), ")".repeat(50));
        assert_eq!(shape(&source), "1");
    }

    #[test]
    fn unknown_identifiers_in_hand_built_tokens() {
        use crate::interpreter::lexer::Token;

        let registry = Registry::builtin();
        let tokens = vec![(Token::Identifier("nope".to_string()), 0)];
        assert_eq!(parse(&tokens, registry, "nope").unwrap_err(),
                   KevalError::InvalidExpression { expression: "nope".to_string(),
                                                   position:   0,
                                                   reason:     Malformation::UnknownIdentifier {
                                                       name: "nope".to_string(),
                                                   }, });
    }
}
