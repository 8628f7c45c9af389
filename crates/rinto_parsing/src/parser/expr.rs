//! Expression parsing with the shunting-yard algorithm

use crate::lexer::source::SourceStream;
use crate::parser::Parser;
use rinto_ast::{
    Backend, BinaryExpression, ConditionalExpression, Expression, FloatLiteral, UnaryExpression,
    VarReference,
};
use rinto_common::{Diagnostics, Located, Location};
use rinto_tokens::{OperatorTag, TokenKind, NOT_IN_EXPRESSION};
use tracing::trace;

/// An entry of the output queue, in postfix order
#[derive(Debug)]
enum Node {
    Operand(Expression),
    Operator(OperatorTag, Location),
}

impl<S: SourceStream, B: Backend> Parser<S, B> {
    /// Parses an expression ending just before `terminal`, which is left unconsumed.
    ///
    /// When the terminal is `;` the expression also ends at a line break, end of file or `}`,
    /// unless the last token still wants an operand (`x = 1 +` continues on the next line).
    /// Identifiers are bound to their declarations as they are read.
    ///
    /// Returns `None` after reporting an error; nothing is reported twice.
    pub fn parse_expression(&mut self, terminal: OperatorTag) -> Option<Expression> {
        let start = self.scanner.peek_token().location();
        let ends_statement = terminal == OperatorTag::Semicolon;

        let mut operators: Vec<(OperatorTag, Location)> = vec![];
        let mut output: Vec<Node> = vec![];
        let mut continues = false;

        loop {
            let token = self.scanner.peek_token().clone();
            match token.kind() {
                TokenKind::Operator(tag) if *tag == terminal => break,
                TokenKind::Operator(OperatorTag::RBrace) if ends_statement && !continues => break,
                TokenKind::EndOfLine => {
                    if ends_statement && !continues {
                        break;
                    }
                    self.scanner.next_token();
                    continue;
                }
                TokenKind::EndOfFile => {
                    if ends_statement && !continues {
                        break;
                    }
                    self.scanner.next_token();
                    self.diagnostics.error_at(
                        token.location(),
                        "unresolved expression: reached EOF before expected %s",
                        &[&terminal.name()],
                    );
                    return None;
                }
                TokenKind::Numeric(value) => {
                    self.scanner.next_token();
                    output.push(Node::Operand(
                        FloatLiteral::new(value.clone(), token.location()).into(),
                    ));
                    continues = false;
                }
                TokenKind::Identifier(identifier) => {
                    self.scanner.next_token();
                    let object = self.resolve(identifier, token.location())?;
                    output.push(Node::Operand(
                        VarReference::new(object, token.location()).into(),
                    ));
                    continues = false;
                }
                TokenKind::Reserved(word) => {
                    self.scanner.next_token();
                    self.diagnostics.error_at(
                        token.location(),
                        "cannot use reserved word %qs in expression",
                        &[word],
                    );
                    return None;
                }
                TokenKind::Invalid(_) => {
                    // reported by the scanner
                    self.scanner.next_token();
                    return None;
                }
                &TokenKind::Operator(tag) => {
                    let errors = self.diagnostics.error_count();
                    self.scanner.next_token();
                    if tag.precedence() == NOT_IN_EXPRESSION {
                        if self.diagnostics.error_count() == errors {
                            self.diagnostics.error_at(
                                token.location(),
                                "cannot use %s in expression",
                                &[&tag.name()],
                            );
                        }
                        return None;
                    }
                    match tag {
                        OperatorTag::LParen => operators.push((tag, token.location())),
                        OperatorTag::RParen => {
                            let mut matched = false;
                            while let Some((top, location)) = operators.pop() {
                                if top == OperatorTag::LParen {
                                    matched = true;
                                    break;
                                }
                                output.push(Node::Operator(top, location));
                            }
                            if !matched {
                                if self.diagnostics.error_count() == errors {
                                    self.diagnostics.error_at(
                                        token.location(),
                                        "unmatched close parenthesis",
                                        &[],
                                    );
                                }
                                return None;
                            }
                        }
                        // postfix, applies to the operand just read
                        OperatorTag::Inc | OperatorTag::Dec => {
                            output.push(Node::Operator(tag, token.location()))
                        }
                        // prefix, nothing to its left to pop
                        OperatorTag::Not => operators.push((tag, token.location())),
                        _ => {
                            while let Some(&(top, _)) = operators.last() {
                                if top.precedence() < tag.precedence() {
                                    break;
                                }
                                let (top, location) = operators.pop().expect("just peeked");
                                output.push(Node::Operator(top, location));
                            }
                            operators.push((tag, token.location()));
                        }
                    }
                    continues = tag.expects_operand();
                }
            }
        }

        let mut unclosed = false;
        while let Some((top, location)) = operators.pop() {
            if top == OperatorTag::LParen {
                trace!("expression left parenthesis at {location} open");
                if let Some(kind) = self.scanner.forget_expectation(&location) {
                    self.diagnostics
                        .error_at(location, "unmatched %s", &[&kind]);
                }
                unclosed = true;
                continue;
            }
            output.push(Node::Operator(top, location));
        }
        if unclosed {
            return None;
        }

        if output.is_empty() {
            self.diagnostics
                .error_at(start, "expected expression", &[]);
            return None;
        }

        let mut reported = false;
        let root = assemble(&mut output, &self.diagnostics, &mut reported)?;
        if !output.is_empty() {
            let leaf = leftmost_leaf(&root);
            self.diagnostics
                .error_at(leaf.location(), "expected ';' before %qs", &[leaf]);
            return None;
        }
        trace!("parsed expression {root}");
        Some(root)
    }

    /// An expression ended by a statement terminator
    pub fn parse_binary_expression(&mut self) -> Option<Expression> {
        self.parse_expression(OperatorTag::Semicolon)
    }

    /// An expression used as a condition, ended by `terminal`
    pub fn parse_conditional_expression(
        &mut self,
        terminal: OperatorTag,
    ) -> Option<ConditionalExpression> {
        let condition = self.parse_expression(terminal)?;
        let location = condition.location();
        Some(ConditionalExpression::new(condition, location))
    }
}

/// Builds a tree from the back of a postfix queue. A missing operand is reported once, however
/// many operators were waiting on it.
fn assemble(
    output: &mut Vec<Node>,
    diagnostics: &Diagnostics,
    reported: &mut bool,
) -> Option<Expression> {
    let (op, location) = match output.pop()? {
        Node::Operand(expression) => return Some(expression),
        Node::Operator(op, location) => (op, location),
    };
    let Some(right) = assemble(output, diagnostics, reported) else {
        missing_operand(op, &location, diagnostics, reported);
        return None;
    };
    if op.is_unary() {
        if matches!(op, OperatorTag::Inc | OperatorTag::Dec)
            && !matches!(right, Expression::VarReference(_))
        {
            if !*reported {
                let what = if op == OperatorTag::Inc {
                    "increment"
                } else {
                    "decrement"
                };
                diagnostics.error_at(location, "lvalue required as %s operand", &[&what]);
                *reported = true;
            }
            return None;
        }
        return Some(UnaryExpression::new(op, right, location).into());
    }
    let Some(left) = assemble(output, diagnostics, reported) else {
        missing_operand(op, &location, diagnostics, reported);
        return None;
    };
    Some(BinaryExpression::new(op, left, right, location).into())
}

fn missing_operand(
    op: OperatorTag,
    location: &Location,
    diagnostics: &Diagnostics,
    reported: &mut bool,
) {
    if !*reported {
        diagnostics.error_at(
            location.clone(),
            "expected expression as operand of %s",
            &[&op.name()],
        );
        *reported = true;
    }
}

/// The first operand written in an expression
fn leftmost_leaf(expression: &Expression) -> &Expression {
    match expression {
        Expression::Binary(binary) => leftmost_leaf(binary.left()),
        Expression::Unary(unary) => leftmost_leaf(unary.operand()),
        other => other,
    }
}
