//! A lexical token from a source file

use crate::float::FloatValue;
use crate::operator::OperatorTag;
use rinto_common::{Located, Location};
use std::fmt::{Display, Formatter};
use strum::{EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

/// Words that cannot be used as identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ReservedWord {
    Float,
    If,
    For,
}

impl ReservedWord {
    /// How the word is written in source
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// A human readable name, for use in diagnostics
    pub fn name(self) -> String {
        format!("{} keyword", self.as_str())
    }
}

impl Display for ReservedWord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the scanner could not produce a meaningful token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unknown character '{character}'{}", in_word(.word))]
    UnknownCharacter { character: char, word: String },
    #[error("invalid numeric literal '{0}'")]
    InvalidNumericLiteral(String),
    #[error("unterminated block comment")]
    UnterminatedComment,
}

fn in_word(word: &str) -> String {
    if word.chars().count() > 1 {
        format!(" in '{word}'")
    } else {
        String::new()
    }
}

/// The classification of a token, along with its payload
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    EndOfFile,
    EndOfLine,
    Reserved(ReservedWord),
    Identifier(String),
    Operator(OperatorTag),
    Numeric(FloatValue),
    /// Could not be scanned. The error is reported when the token is consumed.
    Invalid(LexError),
}

/// A lexical token from a source file
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    kind: TokenKind,
    location: Location,
    spelling: String,
}

impl Token {
    /// Creates a new token
    pub fn new(kind: TokenKind, location: Location, spelling: impl Into<String>) -> Self {
        Self {
            kind,
            location,
            spelling: spelling.into(),
        }
    }

    pub fn eof(location: Location) -> Self {
        Self::new(TokenKind::EndOfFile, location, "")
    }

    pub fn eol(location: Location) -> Self {
        Self::new(TokenKind::EndOfLine, location, "\n")
    }

    pub fn operator(tag: OperatorTag, location: Location) -> Self {
        Self::new(TokenKind::Operator(tag), location, tag.spelling())
    }

    /// Gets the kind for this token
    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// The exact source text of this token
    pub fn spelling(&self) -> &str {
        &self.spelling
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::EndOfFile)
    }

    pub fn is_eol(&self) -> bool {
        matches!(self.kind, TokenKind::EndOfLine)
    }

    /// `;`, a line break or the end of the file, all of which end a statement
    pub fn is_terminator(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::EndOfLine | TokenKind::EndOfFile | TokenKind::Operator(OperatorTag::Semicolon)
        )
    }

    pub fn operator_tag(&self) -> Option<OperatorTag> {
        match self.kind {
            TokenKind::Operator(tag) => Some(tag),
            _ => None,
        }
    }

    /// Checks if this token is exactly the given operator
    pub fn is_operator(&self, tag: OperatorTag) -> bool {
        self.operator_tag() == Some(tag)
    }

    pub fn identifier(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Identifier(identifier) => Some(identifier),
            _ => None,
        }
    }

    pub fn reserved(&self) -> Option<ReservedWord> {
        match self.kind {
            TokenKind::Reserved(word) => Some(word),
            _ => None,
        }
    }

    pub fn numeric(&self) -> Option<&FloatValue> {
        match &self.kind {
            TokenKind::Numeric(value) => Some(value),
            _ => None,
        }
    }

    /// A short name for what kind of token this is
    pub fn classification_name(&self) -> String {
        match &self.kind {
            TokenKind::EndOfFile => "EOF".to_string(),
            TokenKind::EndOfLine => "EOL".to_string(),
            TokenKind::Reserved(word) => word.name(),
            TokenKind::Identifier(_) => "identifier".to_string(),
            TokenKind::Operator(tag) => tag.name().to_string(),
            TokenKind::Numeric(_) => "float literal".to_string(),
            TokenKind::Invalid(_) => "invalid token".to_string(),
        }
    }
}

impl Located for Token {
    fn location(&self) -> Location {
        self.location.clone()
    }
}

/// Describes the token the way diagnostics refer to it
impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            TokenKind::EndOfFile => f.write_str("EOF"),
            TokenKind::EndOfLine => f.write_str("end of line"),
            TokenKind::Operator(tag) => f.write_str(tag.name()),
            _ => write!(f, "'{}'", self.spelling),
        }
    }
}
