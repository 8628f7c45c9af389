//! The capability interface the syntax tree lowers into.
//!
//! A backend turns each node into a handle of its own choosing. The tree never depends on any
//! concrete backend: code generators, interpreters and pretty printers are all just
//! implementations of [Backend].
//!
//! Lowering is post-order, children before parents. The exception is a block statement, which
//! brackets its body with [Backend::enter_scope] and [Backend::leave_scope] before handing the
//! lowered body to the backend.

use crate::named::NamedObject;
use crate::scope::ScopeId;
use rinto_common::Location;
use rinto_tokens::{FloatValue, OperatorTag};

/// A scope whose statements have been lowered into backend handles
#[derive(Debug)]
pub struct LoweredScope<S> {
    pub id: ScopeId,
    /// Objects declared directly in the scope, in declaration order
    pub objects: Vec<NamedObject>,
    pub statements: Vec<S>,
}

/// A target the syntax tree can be lowered into.
///
/// Operands passed to [unary_expression](Backend::unary_expression) and
/// [binary_expression](Backend::binary_expression) always come from literals, references, unary or
/// binary expressions; anything else is lowered through
/// [invalid_expression](Backend::invalid_expression) before reaching the backend.
pub trait Backend {
    /// Handle for a declared variable
    type Variable;
    /// Handle for a lowered expression
    type Expression;
    /// Handle for a lowered statement
    type Statement;

    fn variable(&mut self, object: &NamedObject) -> Self::Variable;

    fn invalid_expression(&mut self) -> Self::Expression;

    fn unary_expression(
        &mut self,
        op: OperatorTag,
        operand: Self::Expression,
        location: &Location,
    ) -> Self::Expression;

    fn binary_expression(
        &mut self,
        op: OperatorTag,
        left: Self::Expression,
        right: Self::Expression,
        location: &Location,
    ) -> Self::Expression;

    fn var_reference(&mut self, variable: Self::Variable, location: &Location) -> Self::Expression;

    fn float_expression(&mut self, value: &FloatValue, location: &Location) -> Self::Expression;

    fn conditional_expression(
        &mut self,
        condition: Self::Expression,
        location: &Location,
    ) -> Self::Expression;

    fn invalid_statement(&mut self) -> Self::Statement;

    fn var_dec_statement(&mut self, variable: Self::Variable) -> Self::Statement;

    fn assignment_statement(
        &mut self,
        lhs: Self::Expression,
        rhs: Self::Expression,
        location: &Location,
    ) -> Self::Statement;

    fn inc_statement(&mut self, operand: Self::Expression, location: &Location) -> Self::Statement;

    fn dec_statement(&mut self, operand: Self::Expression, location: &Location) -> Self::Statement;

    fn if_statement(
        &mut self,
        condition: Self::Expression,
        body: LoweredScope<Self::Statement>,
        location: &Location,
    ) -> Self::Statement;

    fn for_statement(
        &mut self,
        init: Option<Self::Statement>,
        condition: Option<Self::Statement>,
        increment: Option<Self::Statement>,
        body: LoweredScope<Self::Statement>,
        location: &Location,
    ) -> Self::Statement;

    fn expression_statement(
        &mut self,
        expression: Self::Expression,
        location: &Location,
    ) -> Self::Statement;

    fn compound_statement(
        &mut self,
        first: Self::Statement,
        second: Self::Statement,
        location: &Location,
    ) -> Self::Statement;

    /// Called before the statements of a nested scope are lowered
    fn enter_scope(&mut self);

    /// Called after the statements of a nested scope are lowered
    fn leave_scope(&mut self);
}
