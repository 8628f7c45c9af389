//! Responsible for converting a [SourceStream] into a stream of [Token]s

use crate::lexer::source::SourceStream;
use crate::lexer::word::classify_word;
use rinto_common::{Diagnostics, Located, Location};
use rinto_tokens::{BracketKind, LexError, OperatorTag, Token, TokenKind};
use std::collections::VecDeque;
use tracing::trace;

pub mod source;
mod word;

/// A closing bracket the scanner is waiting for
#[derive(Debug, Clone)]
struct Expectation {
    opened: Location,
    want: OperatorTag,
    kind: BracketKind,
}

/// Converts characters into tokens, with arbitrary lookahead.
///
/// Tokens are *acknowledged* as they are handed out by [next_token](Scanner::next_token): that is
/// when bracket matching happens and when the errors of invalid tokens are reported, so peeking
/// ahead never reorders diagnostics.
#[derive(Debug)]
pub struct Scanner<S> {
    source: S,
    buffer: VecDeque<Token>,
    expectations: Vec<Expectation>,
    line_count: usize,
    diagnostics: Diagnostics,
    last_consumed: Option<Token>,
}

impl<S: SourceStream> Scanner<S> {
    /// Creates a new scanner reporting into the given diagnostics
    pub fn new(source: S, diagnostics: Diagnostics) -> Self {
        Self {
            source,
            buffer: VecDeque::new(),
            expectations: vec![],
            line_count: 0,
            diagnostics,
            last_consumed: None,
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Number of line breaks scanned so far, including ones inside block comments
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Starts scanning a new source, returning the old one.
    ///
    /// Lookahead and pending bracket expectations are discarded without being reported.
    pub fn reset(&mut self, source: S) -> S {
        self.buffer.clear();
        self.expectations.clear();
        self.line_count = 0;
        self.last_consumed = None;
        std::mem::replace(&mut self.source, source)
    }

    /// Whether anything besides end of file remains, either buffered or in the source
    pub fn has_next(&self) -> bool {
        self.buffer.iter().any(|token| !token.is_eof()) || self.source.has_next()
    }

    /// The next token, without consuming it
    pub fn peek_token(&mut self) -> &Token {
        self.peek_nth_token(0)
    }

    /// The token `n` places ahead, without consuming anything. `peek_nth_token(0)` is the next
    /// token.
    pub fn peek_nth_token(&mut self, n: usize) -> &Token {
        while self.buffer.len() <= n {
            let token = self.scan_token();
            self.buffer.push_back(token);
        }
        &self.buffer[n]
    }

    /// Consumes the next token.
    ///
    /// Once the source is exhausted this keeps returning end of file tokens.
    pub fn next_token(&mut self) -> Token {
        let token = match self.buffer.pop_front() {
            Some(token) => token,
            None => self.scan_token(),
        };
        trace!("next token: {:?} at {}", token.kind(), token.location());
        self.acknowledge(&token);
        self.last_consumed = Some(token.clone());
        token
    }

    /// The most recent token returned by [next_token](Self::next_token)
    pub fn last_consumed(&self) -> Option<&Token> {
        self.last_consumed.as_ref()
    }

    /// Discards tokens up to and including the next end of line or end of file
    pub fn skip_line(&mut self) {
        loop {
            let token = self.next_token();
            if token.is_eol() || token.is_eof() {
                break;
            }
        }
    }

    /// Reports every bracket still waiting to be closed, innermost first.
    ///
    /// Returns whether anything was reported.
    pub fn flush_expectations(&mut self) -> bool {
        let mut reported = false;
        while let Some(expectation) = self.expectations.pop() {
            trace!("{} never received {}", expectation.opened, expectation.want);
            self.diagnostics
                .error_at(expectation.opened, "unmatched %s", &[&expectation.kind]);
            reported = true;
        }
        reported
    }

    /// Drops the expectation of the bracket opened at `opened`, so a later closing bracket no
    /// longer matches it and it is never flushed. Returns its kind if it was still waiting.
    pub fn forget_expectation(&mut self, opened: &Location) -> Option<BracketKind> {
        let index = self
            .expectations
            .iter()
            .rposition(|expectation| &expectation.opened == opened)?;
        Some(self.expectations.remove(index).kind)
    }

    fn acknowledge(&mut self, token: &Token) {
        match token.kind() {
            TokenKind::Invalid(error) => {
                self.diagnostics.error_at(token.location(), "%s", &[error]);
            }
            TokenKind::Operator(tag) if tag.is_left_hand() => {
                let (Some(want), Some(kind)) = (tag.pair(), tag.bracket_kind()) else {
                    unreachable!("every opening bracket has a pair")
                };
                self.expectations.push(Expectation {
                    opened: token.location(),
                    want,
                    kind,
                });
            }
            TokenKind::Operator(tag) if tag.is_right_hand() => {
                match self.expectations.last() {
                    Some(expectation) if expectation.want == *tag => {
                        self.expectations.pop();
                    }
                    _ => {
                        self.diagnostics
                            .error_at(token.location(), "unmatched %s", &[&tag.name()]);
                    }
                }
            }
            _ => {}
        }
    }

    fn scan_token(&mut self) -> Token {
        loop {
            while matches!(self.source.peek_char(), Some(b' ' | b'\t')) {
                self.source.next_char();
            }
            let location = self.source.location();
            let Some(c) = self.source.next_char() else {
                return Token::eof(location);
            };
            let c = c as char;
            match c {
                '\n' => {
                    self.line_count += 1;
                    return Token::eol(location);
                }
                '/' if self.source.peek_char() == Some(b'/') => {
                    self.skip_line_comment();
                }
                '/' if self.source.peek_char() == Some(b'*') => {
                    self.source.next_char();
                    if !self.skip_block_comment() {
                        return Token::new(
                            TokenKind::Invalid(LexError::UnterminatedComment),
                            location,
                            "/*",
                        );
                    }
                }
                c if OperatorTag::starts_operator(c) => return self.scan_operator(c, location),
                c => return self.scan_word(c, location),
            }
        }
    }

    /// Skips to the end of the line, leaving the line break to be scanned
    fn skip_line_comment(&mut self) {
        while !matches!(self.source.peek_char(), None | Some(b'\n')) {
            self.source.next_char();
        }
    }

    /// Skips past the closing `*/`, returning false if the source ended first
    fn skip_block_comment(&mut self) -> bool {
        while let Some(c) = self.source.next_char() {
            match c {
                b'\n' => self.line_count += 1,
                b'*' if self.source.peek_char() == Some(b'/') => {
                    self.source.next_char();
                    return true;
                }
                _ => {}
            }
        }
        false
    }

    /// Takes the longest operator spelling starting with `first`
    fn scan_operator(&mut self, first: char, location: Location) -> Token {
        let mut spelling = first.to_string();
        while let Some(next) = self.source.peek_char() {
            let mut extended = spelling.clone();
            extended.push(next as char);
            if !OperatorTag::is_operator(&extended) {
                break;
            }
            self.source.next_char();
            spelling = extended;
        }
        match OperatorTag::lookup(&spelling) {
            Some(tag) => Token::operator(tag, location),
            None => Token::new(
                TokenKind::Invalid(LexError::UnknownCharacter {
                    character: first,
                    word: spelling.clone(),
                }),
                location,
                spelling,
            ),
        }
    }

    fn scan_word(&mut self, first: char, location: Location) -> Token {
        let mut word = first.to_string();
        while let Some(next) = self.source.peek_char() {
            let next = next as char;
            if matches!(next, ' ' | '\t' | '\n') || OperatorTag::starts_operator(next) {
                break;
            }
            self.source.next_char();
            word.push(next);
        }
        Token::new(classify_word(&word), location, word)
    }
}
