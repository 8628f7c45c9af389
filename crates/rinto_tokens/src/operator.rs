//! The operator table.
//!
//! Every operator is identified by an [OperatorTag]. The tag indexes immutable tables holding its
//! spelling, precedence and human-readable name. Opening bracket tags are laid out contiguously
//! followed by their closing tags in the same order, so the pair of any bracket is a fixed distance
//! away.

use std::fmt::{Display, Formatter};
use strum::{EnumCount, EnumIter, FromRepr};

/// Precedence of an operator that cannot appear in an expression at all
pub const NOT_IN_EXPRESSION: i8 = -2;
/// Precedence of an operator that may appear in an expression, but never combines by precedence
pub const NO_PRECEDENCE: i8 = -1;

/// Distance between an opening bracket tag and its closing tag
const PAIR_OFFSET: u8 = 3;

/// An operator
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, FromRepr, EnumIter, EnumCount,
)]
#[repr(u8)]
pub enum OperatorTag {
    Illegal = 0,
    /// +
    Add,
    /// -
    Sub,
    /// *
    Mul,
    /// /
    Quo,
    /// %
    Rem,
    /// &&
    LogicalAnd,
    /// ||
    LogicalOr,
    /// ++
    Inc,
    /// --
    Dec,
    /// ==
    Eq,
    /// <
    Lt,
    /// >
    Gt,
    /// =
    Assign,
    /// !
    Not,
    /// !=
    Neq,
    /// <=
    Le,
    /// >=
    Ge,
    LParen,
    LBrack,
    LBrace,
    RParen,
    RBrack,
    RBrace,
    Semicolon,
}

const SPELLINGS: [&str; OperatorTag::COUNT] = [
    "", "+", "-", "*", "/", "%", "&&", "||", "++", "--", "==", "<", ">", "=", "!", "!=", "<=", ">=",
    "(", "[", "{", ")", "]", "}", ";",
];

const PRECEDENCE: [i8; OperatorTag::COUNT] = [
    -2, // illegal
    4, 4, // + -
    5, 5, 5, // * / %
    1, 0, // && ||
    0, 0, // ++ --
    2, 3, 3, // == < >
    -2, // =
    6, // !
    2, 3, 3, // != <= >=
    -1, -2, -2, // ( [ {
    -1, -2, -2, // ) ] }
    -2, // ;
];

const NAMES: [&str; OperatorTag::COUNT] = [
    "illegal operator",
    "'+' operator",
    "'-' operator",
    "'*' operator",
    "'/' operator",
    "'%' operator",
    "'&&' operator",
    "'||' operator",
    "'++' operator",
    "'--' operator",
    "'==' operator",
    "'<' operator",
    "'>' operator",
    "'=' operator",
    "'!' operator",
    "'!=' operator",
    "'<=' operator",
    "'>=' operator",
    "'(' operator",
    "'[' operator",
    "'{' operator",
    "')' operator",
    "']' operator",
    "'}' operator",
    "';' operator",
];

impl OperatorTag {
    /// Looks up the operator with exactly this spelling
    pub fn lookup(spelling: &str) -> Option<Self> {
        if spelling.is_empty() {
            return None;
        }
        SPELLINGS
            .iter()
            .position(|known| *known == spelling)
            .and_then(|index| Self::from_repr(index as u8))
    }

    /// Checks whether this string is the spelling of some operator
    pub fn is_operator(spelling: &str) -> bool {
        Self::lookup(spelling).is_some()
    }

    /// Checks whether some operator's spelling begins with this character
    pub fn starts_operator(c: char) -> bool {
        SPELLINGS.iter().any(|spelling| spelling.starts_with(c))
    }

    /// How the operator is written in source. Empty for [OperatorTag::Illegal].
    pub fn spelling(self) -> &'static str {
        SPELLINGS[self as usize]
    }

    /// The precedence of this operator.
    ///
    /// Higher binds tighter. [NO_PRECEDENCE] marks operators allowed in expressions that do not
    /// take part in precedence climbing (parentheses), [NOT_IN_EXPRESSION] marks operators that
    /// may not appear in an expression at all.
    pub fn precedence(self) -> i8 {
        PRECEDENCE[self as usize]
    }

    /// A human readable name, for use in diagnostics
    pub fn name(self) -> &'static str {
        NAMES[self as usize]
    }

    /// Opening brackets
    pub fn is_left_hand(self) -> bool {
        (Self::LParen..=Self::LBrace).contains(&self)
    }

    /// Closing brackets
    pub fn is_right_hand(self) -> bool {
        (Self::RParen..=Self::RBrace).contains(&self)
    }

    pub fn is_paired(self) -> bool {
        self.is_left_hand() || self.is_right_hand()
    }

    /// The opposite bracket of a bracket operator
    pub fn pair(self) -> Option<Self> {
        if self.is_left_hand() {
            Self::from_repr(self as u8 + PAIR_OFFSET)
        } else if self.is_right_hand() {
            Self::from_repr(self as u8 - PAIR_OFFSET)
        } else {
            None
        }
    }

    /// Operators taking a single operand
    pub fn is_unary(self) -> bool {
        matches!(self, Self::Inc | Self::Dec | Self::Not)
    }

    /// Whether an expression ending in this operator still needs an operand to its right
    pub fn expects_operand(self) -> bool {
        match self {
            Self::Inc | Self::Dec | Self::RParen => false,
            other => other.precedence() != NOT_IN_EXPRESSION,
        }
    }

    /// The kind of bracket, for bracket operators
    pub fn bracket_kind(self) -> Option<BracketKind> {
        match self {
            Self::LParen | Self::RParen => Some(BracketKind::Parenthesis),
            Self::LBrack | Self::RBrack => Some(BracketKind::Bracket),
            Self::LBrace | Self::RBrace => Some(BracketKind::Brace),
            _ => None,
        }
    }
}

impl Display for OperatorTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.spelling())
    }
}

/// The different bracket families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BracketKind {
    Parenthesis,
    Bracket,
    Brace,
}

impl BracketKind {
    pub fn name(self) -> &'static str {
        match self {
            BracketKind::Parenthesis => "parenthesis",
            BracketKind::Bracket => "bracket",
            BracketKind::Brace => "brace",
        }
    }
}

impl Display for BracketKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
