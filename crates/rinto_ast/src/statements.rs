//! Statements

use crate::backend::Backend;
use crate::expr::{ConditionalExpression, Expression, UnaryExpression, VarReference};
use crate::named::NamedObject;
use crate::scope::Scope;
use rinto_common::{Located, Location};
use rinto_tokens::OperatorTag;
use std::fmt::{Display, Formatter};

/// A statement
#[derive(Debug, Clone)]
pub enum Statement {
    Invalid(Location),
    VariableDeclaration(VariableDeclaration),
    Assignment(AssignmentStatement),
    IncDec(IncDecStatement),
    If(IfStatement),
    For(ForStatement),
    Expression(ExpressionStatement),
    Compound(CompoundStatement),
}

impl Statement {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Statement::Invalid(_))
    }

    /// Whether this statement is a block statement, owning a nested scope
    pub fn is_block(&self) -> bool {
        matches!(self, Statement::If(_) | Statement::For(_))
    }

    /// Lowers this statement into the backend
    pub fn lower<B: Backend + ?Sized>(self, backend: &mut B) -> B::Statement {
        match self {
            Statement::Invalid(_) => backend.invalid_statement(),
            Statement::VariableDeclaration(declaration) => declaration.lower(backend),
            Statement::Assignment(assignment) => assignment.lower(backend),
            Statement::IncDec(inc_dec) => inc_dec.lower(backend),
            Statement::If(if_statement) => if_statement.lower(backend),
            Statement::For(for_statement) => for_statement.lower(backend),
            Statement::Expression(expression) => expression.lower(backend),
            Statement::Compound(compound) => compound.lower(backend),
        }
    }
}

impl Located for Statement {
    fn location(&self) -> Location {
        match self {
            Statement::Invalid(location) => location.clone(),
            Statement::VariableDeclaration(declaration) => declaration.object.location(),
            Statement::Assignment(assignment) => assignment.location.clone(),
            Statement::IncDec(inc_dec) => inc_dec.location.clone(),
            Statement::If(if_statement) => if_statement.location.clone(),
            Statement::For(for_statement) => for_statement.location.clone(),
            Statement::Expression(expression) => expression.location.clone(),
            Statement::Compound(compound) => compound.location.clone(),
        }
    }
}

/// Renders as an s-expression, e.g. `(assign x (+ x 1))`
impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::Invalid(_) => write!(f, "<invalid>"),
            Statement::VariableDeclaration(declaration) => {
                write!(f, "(var-dec {})", declaration.object)
            }
            Statement::Assignment(assignment) => {
                write!(f, "(assign {} {})", assignment.lhs, assignment.rhs)
            }
            Statement::IncDec(inc_dec) => {
                write!(f, "({} {})", inc_dec.direction, inc_dec.operand)
            }
            Statement::If(if_statement) => {
                write!(f, "(if {} {})", if_statement.condition, if_statement.body)
            }
            Statement::For(for_statement) => {
                write!(f, "(for")?;
                for clause in [
                    &for_statement.init,
                    &for_statement.condition,
                    &for_statement.increment,
                ] {
                    match clause {
                        Some(clause) => write!(f, " {clause}")?,
                        None => write!(f, " _")?,
                    }
                }
                write!(f, " {})", for_statement.body)
            }
            Statement::Expression(expression) => write!(f, "(expr {})", expression.expression),
            Statement::Compound(compound) => {
                write!(f, "(compound {} {})", compound.first, compound.second)
            }
        }
    }
}

/// `float x`
#[derive(Debug, Clone)]
pub struct VariableDeclaration {
    object: NamedObject,
}

impl VariableDeclaration {
    pub fn new(object: NamedObject) -> Self {
        Self { object }
    }

    pub fn object(&self) -> &NamedObject {
        &self.object
    }

    pub fn lower<B: Backend + ?Sized>(self, backend: &mut B) -> B::Statement {
        let variable = backend.variable(&self.object);
        backend.var_dec_statement(variable)
    }
}

/// `x = expr`
#[derive(Debug, Clone)]
pub struct AssignmentStatement {
    lhs: VarReference,
    rhs: Expression,
    location: Location,
}

impl AssignmentStatement {
    pub fn new(lhs: VarReference, rhs: Expression, location: Location) -> Self {
        Self { lhs, rhs, location }
    }

    pub fn lhs(&self) -> &VarReference {
        &self.lhs
    }

    pub fn rhs(&self) -> &Expression {
        &self.rhs
    }

    pub fn lower<B: Backend + ?Sized>(self, backend: &mut B) -> B::Statement {
        if !self.rhs.is_operand() {
            return backend.invalid_statement();
        }
        let lhs = self.lhs.lower(backend);
        let rhs = self.rhs.lower(backend);
        backend.assignment_statement(lhs, rhs, &self.location)
    }
}

/// Whether an [IncDecStatement] increments or decrements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Increment,
    Decrement,
}

impl Direction {
    /// The direction an operator steps in, if it is `++` or `--`
    pub fn of(op: OperatorTag) -> Option<Self> {
        match op {
            OperatorTag::Inc => Some(Direction::Increment),
            OperatorTag::Dec => Some(Direction::Decrement),
            _ => None,
        }
    }

    pub fn op(self) -> OperatorTag {
        match self {
            Direction::Increment => OperatorTag::Inc,
            Direction::Decrement => OperatorTag::Dec,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Increment => f.write_str("inc"),
            Direction::Decrement => f.write_str("dec"),
        }
    }
}

/// `x++` or `x--`
#[derive(Debug, Clone)]
pub struct IncDecStatement {
    operand: UnaryExpression,
    direction: Direction,
    location: Location,
}

impl IncDecStatement {
    /// Creates the statement, wrapping the reference in the matching unary expression
    pub fn new(direction: Direction, reference: VarReference, location: Location) -> Self {
        let operand = UnaryExpression::new(direction.op(), reference.into(), location.clone());
        Self {
            operand,
            direction,
            location,
        }
    }

    pub fn operand(&self) -> &UnaryExpression {
        &self.operand
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn lower<B: Backend + ?Sized>(self, backend: &mut B) -> B::Statement {
        let operand = self.operand.lower(backend);
        match self.direction {
            Direction::Increment => backend.inc_statement(operand, &self.location),
            Direction::Decrement => backend.dec_statement(operand, &self.location),
        }
    }
}

/// `if cond { ... }`
#[derive(Debug, Clone)]
pub struct IfStatement {
    condition: ConditionalExpression,
    body: Scope,
    location: Location,
}

impl IfStatement {
    pub fn new(condition: ConditionalExpression, body: Scope, location: Location) -> Self {
        Self {
            condition,
            body,
            location,
        }
    }

    pub fn condition(&self) -> &ConditionalExpression {
        &self.condition
    }

    pub fn body(&self) -> &Scope {
        &self.body
    }

    pub fn lower<B: Backend + ?Sized>(self, backend: &mut B) -> B::Statement {
        backend.enter_scope();
        let body = self.body.lower(backend);
        backend.leave_scope();
        let condition = self.condition.lower(backend);
        backend.if_statement(condition, body, &self.location)
    }
}

/// `for init; cond; inc { ... }`
#[derive(Debug, Clone)]
pub struct ForStatement {
    init: Option<Box<Statement>>,
    condition: Option<Box<Statement>>,
    increment: Option<Box<Statement>>,
    body: Scope,
    location: Location,
}

impl ForStatement {
    pub fn new(
        init: Option<Statement>,
        condition: Option<Statement>,
        increment: Option<Statement>,
        body: Scope,
        location: Location,
    ) -> Self {
        Self {
            init: init.map(Box::new),
            condition: condition.map(Box::new),
            increment: increment.map(Box::new),
            body,
            location,
        }
    }

    pub fn init(&self) -> Option<&Statement> {
        self.init.as_deref()
    }

    pub fn condition(&self) -> Option<&Statement> {
        self.condition.as_deref()
    }

    pub fn increment(&self) -> Option<&Statement> {
        self.increment.as_deref()
    }

    /// The loop body. Variables declared by the init clause live here too.
    pub fn body(&self) -> &Scope {
        &self.body
    }

    pub fn lower<B: Backend + ?Sized>(self, backend: &mut B) -> B::Statement {
        backend.enter_scope();
        let init = self.init.map(|init| (*init).lower(backend));
        let condition = self.condition.map(|condition| (*condition).lower(backend));
        let increment = self.increment.map(|increment| (*increment).lower(backend));
        let body = self.body.lower(backend);
        backend.leave_scope();
        backend.for_statement(init, condition, increment, body, &self.location)
    }
}

/// An expression evaluated for its own sake
#[derive(Debug, Clone)]
pub struct ExpressionStatement {
    expression: Expression,
    location: Location,
}

impl ExpressionStatement {
    pub fn new(expression: Expression, location: Location) -> Self {
        Self {
            expression,
            location,
        }
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn lower<B: Backend + ?Sized>(self, backend: &mut B) -> B::Statement {
        if self.expression.is_invalid() {
            return backend.invalid_statement();
        }
        let expression = self.expression.lower(backend);
        backend.expression_statement(expression, &self.location)
    }
}

/// Two statements written as one, such as a declaration with an initializer
#[derive(Debug, Clone)]
pub struct CompoundStatement {
    first: Box<Statement>,
    second: Box<Statement>,
    location: Location,
}

impl CompoundStatement {
    pub fn new(first: Statement, second: Statement, location: Location) -> Self {
        Self {
            first: Box::new(first),
            second: Box::new(second),
            location,
        }
    }

    pub fn first(&self) -> &Statement {
        &self.first
    }

    pub fn second(&self) -> &Statement {
        &self.second
    }

    /// Lowers both halves, unless either is invalid in which case nothing but an invalid
    /// statement reaches the backend
    pub fn lower<B: Backend + ?Sized>(self, backend: &mut B) -> B::Statement {
        if self.first.is_invalid() || self.second.is_invalid() {
            return backend.invalid_statement();
        }
        let first = (*self.first).lower(backend);
        let second = (*self.second).lower(backend);
        backend.compound_statement(first, second, &self.location)
    }
}

impl From<VariableDeclaration> for Statement {
    fn from(value: VariableDeclaration) -> Self {
        Statement::VariableDeclaration(value)
    }
}

impl From<AssignmentStatement> for Statement {
    fn from(value: AssignmentStatement) -> Self {
        Statement::Assignment(value)
    }
}

impl From<IncDecStatement> for Statement {
    fn from(value: IncDecStatement) -> Self {
        Statement::IncDec(value)
    }
}

impl From<IfStatement> for Statement {
    fn from(value: IfStatement) -> Self {
        Statement::If(value)
    }
}

impl From<ForStatement> for Statement {
    fn from(value: ForStatement) -> Self {
        Statement::For(value)
    }
}

impl From<ExpressionStatement> for Statement {
    fn from(value: ExpressionStatement) -> Self {
        Statement::Expression(value)
    }
}

impl From<CompoundStatement> for Statement {
    fn from(value: CompoundStatement) -> Self {
        Statement::Compound(value)
    }
}
