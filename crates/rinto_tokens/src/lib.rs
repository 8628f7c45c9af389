//! The lexical vocabulary of rinto: tokens, operators and the values of numeric literals

pub mod float;
pub mod operator;
pub mod token;

pub use float::{FloatValue, ParseFloatError, DEFAULT_PRECISION};
pub use operator::{BracketKind, OperatorTag, NOT_IN_EXPRESSION, NO_PRECEDENCE};
pub use token::{LexError, ReservedWord, Token, TokenKind};
