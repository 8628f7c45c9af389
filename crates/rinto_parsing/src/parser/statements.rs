//! Statement productions

use crate::lexer::source::SourceStream;
use crate::parser::Parser;
use rinto_ast::{
    AssignmentStatement, Backend, CompoundStatement, Direction, ExpressionStatement, ForStatement,
    IfStatement, IncDecStatement, Statement, VarReference, VariableDeclaration,
};
use rinto_common::Located;
use rinto_tokens::{OperatorTag, ReservedWord, TokenKind};
use tracing::trace;

impl<S: SourceStream, B: Backend> Parser<S, B> {
    /// Parses the next statement, choosing the production from the lookahead
    pub fn parse_next(&mut self) -> Statement {
        let token = self.scanner.peek_token().clone();
        match token.kind() {
            TokenKind::Reserved(ReservedWord::Float) => return self.parse_variable_declaration(),
            TokenKind::Reserved(ReservedWord::If) => return self.parse_if_statement(),
            TokenKind::Reserved(ReservedWord::For) => return self.parse_for_statement(),
            TokenKind::Identifier(_) => {
                let after = self.scanner.peek_nth_token(1).clone();
                match after.operator_tag() {
                    Some(OperatorTag::Inc | OperatorTag::Dec) => {
                        return self.parse_inc_dec_statement(true)
                    }
                    Some(_) => return self.parse_assignment_statement(),
                    None => {
                        self.scanner.next_token();
                        self.diagnostics.error_at(
                            after.location(),
                            "expected operator after identifier, but received %s instead",
                            &[&after],
                        );
                    }
                }
            }
            _ => {
                let errors = self.diagnostics.error_count();
                self.scanner.next_token();
                // invalid tokens and unmatched brackets were already reported by the scanner
                if self.diagnostics.error_count() == errors {
                    self.diagnostics.error_at(
                        token.location(),
                        "expected statement but received %s instead",
                        &[&token],
                    );
                }
            }
        }
        self.synchronize();
        Statement::Invalid(token.location())
    }

    /// `float x` or `float x = expr`
    pub fn parse_variable_declaration(&mut self) -> Statement {
        let keyword = self.scanner.next_token();
        debug_assert_eq!(keyword.reserved(), Some(ReservedWord::Float));

        let ident = self.scanner.peek_token().clone();
        let Some(identifier) = ident.identifier() else {
            self.diagnostics.error_at(
                ident.location(),
                "variable declaration expected identifier but received %s instead",
                &[&ident],
            );
            self.synchronize();
            return Statement::Invalid(ident.location());
        };

        let after = self.scanner.peek_nth_token(1);
        if after.is_terminator() || after.is_operator(OperatorTag::RBrace) {
            self.scanner.next_token();
            self.expect_terminator();
            return match self.define(identifier, ident.location()) {
                Some(object) => VariableDeclaration::new(object).into(),
                None => Statement::Invalid(ident.location()),
            };
        }

        let Some(object) = self.define(identifier, ident.location()) else {
            self.synchronize();
            return Statement::Invalid(ident.location());
        };
        let declaration = VariableDeclaration::new(object);
        let assignment = self.parse_assignment_statement();
        CompoundStatement::new(declaration.into(), assignment, keyword.location()).into()
    }

    /// `x = expr`
    pub fn parse_assignment_statement(&mut self) -> Statement {
        let ident = self.scanner.next_token();
        let identifier = ident.identifier().unwrap_or_default().to_string();

        let assign = self.scanner.next_token();
        if !assign.is_operator(OperatorTag::Assign) {
            self.diagnostics.error_at(
                assign.location(),
                "assignment statement expected '=' operator, but received %s instead",
                &[&assign],
            );
            self.synchronize();
            return Statement::Invalid(assign.location());
        }

        let Some(object) = self.resolve(&identifier, ident.location()) else {
            self.synchronize();
            return Statement::Invalid(ident.location());
        };
        let lhs = VarReference::new(object, ident.location());

        let Some(rhs) = self.parse_binary_expression() else {
            self.synchronize();
            return Statement::Invalid(assign.location());
        };
        if !self.expect_terminator() {
            return Statement::Invalid(assign.location());
        }
        AssignmentStatement::new(lhs, rhs, ident.location()).into()
    }

    /// `x++` or `x--`. The terminator is only required when `terminated` is set, a for loop's
    /// increment clause is followed directly by `{`.
    pub fn parse_inc_dec_statement(&mut self, terminated: bool) -> Statement {
        let ident = self.scanner.next_token();
        let op = self.scanner.next_token();
        let direction = op
            .operator_tag()
            .and_then(Direction::of)
            .expect("increment statements are only parsed ahead of '++' or '--'");

        let identifier = ident.identifier().unwrap_or_default();
        let Some(object) = self.resolve(identifier, ident.location()) else {
            if terminated {
                self.synchronize();
            }
            return Statement::Invalid(ident.location());
        };
        if terminated && !self.expect_terminator() {
            return Statement::Invalid(ident.location());
        }
        let reference = VarReference::new(object, ident.location());
        IncDecStatement::new(direction, reference, ident.location()).into()
    }

    /// `if cond { ... }`
    pub fn parse_if_statement(&mut self) -> Statement {
        let keyword = self.scanner.next_token();
        debug_assert_eq!(keyword.reserved(), Some(ReservedWord::If));

        let Some(condition) = self.parse_conditional_expression(OperatorTag::LBrace) else {
            self.synchronize();
            return Statement::Invalid(keyword.location());
        };
        let brace = self.scanner.next_token();
        if !brace.is_operator(OperatorTag::LBrace) {
            self.diagnostics.error_at(
                brace.location(),
                "if statement expected '{' but received %s instead",
                &[&brace],
            );
            self.synchronize();
            return Statement::Invalid(keyword.location());
        }

        let body = self.parse_block();
        IfStatement::new(condition, body, keyword.location()).into()
    }

    /// `for init; cond; inc { ... }`, where every clause may be left out.
    ///
    /// The loop owns a single scope, entered before the init clause, so variables declared there
    /// are visible to the rest of the header and to the body.
    pub fn parse_for_statement(&mut self) -> Statement {
        let keyword = self.scanner.next_token();
        debug_assert_eq!(keyword.reserved(), Some(ReservedWord::For));
        let location = keyword.location();

        self.scopes.enter();
        match self.parse_for_header() {
            Some((condition, increment)) => {
                let init = self.scopes.pop_statement();
                self.parse_scope(false);
                let body = self.scopes.leave();
                ForStatement::new(init, condition, increment, body, location).into()
            }
            None => {
                let abandoned = self.scopes.leave();
                trace!(
                    "abandoned for loop header with {} speculative statements",
                    abandoned.len()
                );
                Statement::Invalid(location)
            }
        }
    }

    /// Parses everything between `for` and the body, leaving the init statement speculatively
    /// pushed to the loop scope. Consumes the opening `{` of the body.
    fn parse_for_header(&mut self) -> Option<(Option<Statement>, Option<Statement>)> {
        if self.scanner.peek_token().is_operator(OperatorTag::Semicolon) {
            self.scanner.next_token();
        } else {
            let init = self.parse_next();
            let failed = match &init {
                // a declaration whose initializer failed already skipped the rest of the header
                Statement::Compound(compound) => {
                    compound.first().is_invalid() || compound.second().is_invalid()
                }
                init => init.is_invalid(),
            };
            if failed {
                return None;
            }
            let is_block = init.is_block();
            self.scopes.push_statement(init);
            if is_block && !self.expect_for_semicolon("init statement") {
                return None;
            }
        }

        let condition = if self.scanner.peek_token().is_operator(OperatorTag::Semicolon) {
            self.scanner.next_token();
            None
        } else {
            let Some(condition) = self.parse_conditional_expression(OperatorTag::Semicolon) else {
                self.synchronize();
                return None;
            };
            let location = condition.location();
            if !self.expect_for_semicolon("condition") {
                return None;
            }
            Some(ExpressionStatement::new(condition.into(), location).into())
        };

        let increment = if self.scanner.peek_token().identifier().is_some() {
            let after = self.scanner.peek_nth_token(1).clone();
            if !matches!(
                after.operator_tag(),
                Some(OperatorTag::Inc | OperatorTag::Dec)
            ) {
                self.scanner.next_token();
                self.diagnostics.error_at(
                    after.location(),
                    "for loop expected increment or decrement statement",
                    &[],
                );
                self.synchronize();
                return None;
            }
            let increment = self.parse_inc_dec_statement(false);
            if increment.is_invalid() {
                self.synchronize();
                return None;
            }
            Some(increment)
        } else {
            None
        };

        let brace = self.scanner.next_token();
        if !brace.is_operator(OperatorTag::LBrace) {
            self.diagnostics.error_at(
                brace.location(),
                "for loop expected '{' but received %s instead",
                &[&brace],
            );
            self.synchronize();
            return None;
        }
        Some((condition, increment))
    }

    fn expect_for_semicolon(&mut self, after: &str) -> bool {
        let token = self.scanner.next_token();
        if token.is_operator(OperatorTag::Semicolon) {
            return true;
        }
        self.diagnostics.error_at(
            token.location(),
            "for loop expected ';' after %s but received %s instead",
            &[&after, &token],
        );
        self.synchronize();
        false
    }

    /// Consumes the `;`, line break or end of file ending a statement. A `}` also ends a statement
    /// but is left for the enclosing scope.
    fn expect_terminator(&mut self) -> bool {
        let token = self.scanner.peek_token();
        if token.is_operator(OperatorTag::RBrace) {
            return true;
        }
        if token.is_terminator() {
            self.scanner.next_token();
            return true;
        }
        let token = self.scanner.next_token();
        self.diagnostics.error_at(
            token.location(),
            "expected ';' at end of statement, but received %s instead",
            &[&token],
        );
        self.synchronize();
        false
    }
}
