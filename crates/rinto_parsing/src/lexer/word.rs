//! Classification of scanned words

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{alpha1, alphanumeric1, char, digit1};
use nom::combinator::{all_consuming, opt, recognize};
use nom::multi::many0_count;
use nom::sequence::{pair, tuple};
use nom::IResult;
use rinto_tokens::{FloatValue, LexError, ReservedWord, TokenKind};
use std::str::FromStr;

type Result<'a, O = &'a str> = IResult<&'a str, O>;

/// `[A-Za-z][A-Za-z0-9_]*`
fn recognize_identifier(src: &str) -> Result {
    recognize(pair(alpha1, many0_count(alt((alphanumeric1, tag("_"))))))(src)
}

/// `\d+(\.\d+)?f?`
fn recognize_numeric(src: &str) -> Result {
    recognize(tuple((
        digit1,
        opt(pair(char('.'), digit1)),
        opt(char('f')),
    )))(src)
}

/// Classifies a complete word, one that contains no whitespace or operator characters
pub fn classify_word(word: &str) -> TokenKind {
    if word.starts_with(|c: char| c.is_ascii_digit()) {
        return match all_consuming(recognize_numeric)(word) {
            Ok(_) => match FloatValue::parse(word) {
                Ok(value) => TokenKind::Numeric(value),
                Err(_) => TokenKind::Invalid(LexError::InvalidNumericLiteral(word.to_string())),
            },
            Err(_) => TokenKind::Invalid(LexError::InvalidNumericLiteral(word.to_string())),
        };
    }
    if all_consuming(recognize_identifier)(word).is_ok() {
        return match ReservedWord::from_str(word) {
            Ok(reserved) => TokenKind::Reserved(reserved),
            Err(_) => TokenKind::Identifier(word.to_string()),
        };
    }
    let character = word
        .char_indices()
        .find(|&(index, c)| {
            if index == 0 {
                !c.is_ascii_alphabetic()
            } else {
                !(c.is_ascii_alphanumeric() || c == '_')
            }
        })
        .map(|(_, c)| c)
        .unwrap_or_default();
    TokenKind::Invalid(LexError::UnknownCharacter {
        character,
        word: word.to_string(),
    })
}
