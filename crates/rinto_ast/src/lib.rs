//! The rinto abstract syntax tree.
//!
//! Nodes are produced by the parser with every identifier already bound to its declaration. Each
//! node is consumed exactly once by its `lower` method, which drives a [Backend].

pub mod backend;
pub mod expr;
pub mod named;
pub mod scope;
pub mod statements;

pub use backend::{Backend, LoweredScope};
pub use expr::{
    BinaryExpression, ConditionalExpression, Expression, FloatLiteral, UnaryExpression,
    VarReference,
};
pub use named::NamedObject;
pub use scope::{Redefinition, Scope, ScopeChain, ScopeId};
pub use statements::{
    AssignmentStatement, CompoundStatement, Direction, ExpressionStatement, ForStatement,
    IfStatement, IncDecStatement, Statement, VariableDeclaration,
};
