//! Expressions

use crate::backend::Backend;
use crate::named::NamedObject;
use log::warn;
use rinto_common::{Located, Location};
use rinto_tokens::{FloatValue, OperatorTag};
use std::fmt::{Display, Formatter};

/// An expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Invalid(Location),
    Unary(UnaryExpression),
    Binary(BinaryExpression),
    VarReference(VarReference),
    Float(FloatLiteral),
    Conditional(ConditionalExpression),
}

impl Expression {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Expression::Invalid(_))
    }

    /// Whether this expression may be the operand of a unary or binary operator
    pub fn is_operand(&self) -> bool {
        matches!(
            self,
            Expression::Unary(_)
                | Expression::Binary(_)
                | Expression::VarReference(_)
                | Expression::Float(_)
        )
    }

    /// Lowers this expression into the backend, children first
    pub fn lower<B: Backend + ?Sized>(self, backend: &mut B) -> B::Expression {
        match self {
            Expression::Invalid(_) => backend.invalid_expression(),
            Expression::Unary(unary) => unary.lower(backend),
            Expression::Binary(binary) => binary.lower(backend),
            Expression::VarReference(reference) => reference.lower(backend),
            Expression::Float(float) => float.lower(backend),
            Expression::Conditional(conditional) => conditional.lower(backend),
        }
    }
}

impl Located for Expression {
    fn location(&self) -> Location {
        match self {
            Expression::Invalid(location) => location.clone(),
            Expression::Unary(unary) => unary.location(),
            Expression::Binary(binary) => binary.location(),
            Expression::VarReference(reference) => reference.location(),
            Expression::Float(float) => float.location(),
            Expression::Conditional(conditional) => conditional.location(),
        }
    }
}

/// Renders as an s-expression, e.g. `(+ 1 (* 2 3))`
impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Invalid(_) => write!(f, "<invalid>"),
            Expression::Unary(unary) => unary.fmt(f),
            Expression::Binary(binary) => binary.fmt(f),
            Expression::VarReference(reference) => reference.fmt(f),
            Expression::Float(float) => float.fmt(f),
            Expression::Conditional(conditional) => conditional.fmt(f),
        }
    }
}

/// An operator applied to a single operand
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    op: OperatorTag,
    operand: Box<Expression>,
    location: Location,
}

impl UnaryExpression {
    pub fn new(op: OperatorTag, operand: Expression, location: Location) -> Self {
        Self {
            op,
            operand: Box::new(operand),
            location,
        }
    }

    pub fn op(&self) -> OperatorTag {
        self.op
    }

    pub fn operand(&self) -> &Expression {
        &self.operand
    }

    /// `++` and `--` need something to store into
    pub fn requires_lvalue(&self) -> bool {
        matches!(self.op, OperatorTag::Inc | OperatorTag::Dec)
    }

    pub fn lower<B: Backend + ?Sized>(self, backend: &mut B) -> B::Expression {
        if self.requires_lvalue() && !matches!(*self.operand, Expression::VarReference(_)) {
            warn!(
                "{}: lvalue required as {} operand, lowering as invalid",
                self.location,
                self.op.name()
            );
            return backend.invalid_expression();
        }
        if !self.operand.is_operand() {
            return backend.invalid_expression();
        }
        let operand = (*self.operand).lower(backend);
        backend.unary_expression(self.op, operand, &self.location)
    }
}

impl Located for UnaryExpression {
    fn location(&self) -> Location {
        self.location.clone()
    }
}

impl Display for UnaryExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {})", self.op, self.operand)
    }
}

/// An operator applied to two operands
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    op: OperatorTag,
    left: Box<Expression>,
    right: Box<Expression>,
    location: Location,
}

impl BinaryExpression {
    pub fn new(op: OperatorTag, left: Expression, right: Expression, location: Location) -> Self {
        Self {
            op,
            left: Box::new(left),
            right: Box::new(right),
            location,
        }
    }

    pub fn op(&self) -> OperatorTag {
        self.op
    }

    pub fn left(&self) -> &Expression {
        &self.left
    }

    pub fn right(&self) -> &Expression {
        &self.right
    }

    pub fn lower<B: Backend + ?Sized>(self, backend: &mut B) -> B::Expression {
        if !self.left.is_operand() || !self.right.is_operand() {
            return backend.invalid_expression();
        }
        let left = (*self.left).lower(backend);
        let right = (*self.right).lower(backend);
        backend.binary_expression(self.op, left, right, &self.location)
    }
}

impl Located for BinaryExpression {
    fn location(&self) -> Location {
        self.location.clone()
    }
}

impl Display for BinaryExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.op, self.left, self.right)
    }
}

/// A use of a declared variable
#[derive(Debug, Clone, PartialEq)]
pub struct VarReference {
    object: NamedObject,
    location: Location,
}

impl VarReference {
    pub fn new(object: NamedObject, location: Location) -> Self {
        Self { object, location }
    }

    /// The declaration this reference is bound to
    pub fn object(&self) -> &NamedObject {
        &self.object
    }

    pub fn lower<B: Backend + ?Sized>(self, backend: &mut B) -> B::Expression {
        let variable = backend.variable(&self.object);
        backend.var_reference(variable, &self.location)
    }
}

impl Located for VarReference {
    fn location(&self) -> Location {
        self.location.clone()
    }
}

impl Display for VarReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.object.fmt(f)
    }
}

/// A numeric literal
#[derive(Debug, Clone, PartialEq)]
pub struct FloatLiteral {
    value: FloatValue,
    location: Location,
}

impl FloatLiteral {
    pub fn new(value: FloatValue, location: Location) -> Self {
        Self { value, location }
    }

    pub fn value(&self) -> &FloatValue {
        &self.value
    }

    pub fn lower<B: Backend + ?Sized>(self, backend: &mut B) -> B::Expression {
        backend.float_expression(&self.value, &self.location)
    }
}

impl Located for FloatLiteral {
    fn location(&self) -> Location {
        self.location.clone()
    }
}

impl Display for FloatLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.value.fmt(f)
    }
}

/// An expression used as the condition of an `if` or `for`
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpression {
    condition: Box<Expression>,
    location: Location,
}

impl ConditionalExpression {
    pub fn new(condition: Expression, location: Location) -> Self {
        Self {
            condition: Box::new(condition),
            location,
        }
    }

    pub fn condition(&self) -> &Expression {
        &self.condition
    }

    pub fn lower<B: Backend + ?Sized>(self, backend: &mut B) -> B::Expression {
        if !self.condition.is_operand() {
            return backend.invalid_expression();
        }
        let condition = (*self.condition).lower(backend);
        backend.conditional_expression(condition, &self.location)
    }
}

impl Located for ConditionalExpression {
    fn location(&self) -> Location {
        self.location.clone()
    }
}

impl Display for ConditionalExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "(cond {})", self.condition)
    }
}

impl From<UnaryExpression> for Expression {
    fn from(value: UnaryExpression) -> Self {
        Expression::Unary(value)
    }
}

impl From<BinaryExpression> for Expression {
    fn from(value: BinaryExpression) -> Self {
        Expression::Binary(value)
    }
}

impl From<VarReference> for Expression {
    fn from(value: VarReference) -> Self {
        Expression::VarReference(value)
    }
}

impl From<FloatLiteral> for Expression {
    fn from(value: FloatLiteral) -> Self {
        Expression::Float(value)
    }
}

impl From<ConditionalExpression> for Expression {
    fn from(value: ConditionalExpression) -> Self {
        Expression::Conditional(value)
    }
}
