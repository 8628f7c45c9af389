//! The parser, building a scope resolved syntax tree from a token stream.
//!
//! Statements are parsed by recursive descent, one production per statement form. Expressions are
//! parsed with the shunting-yard algorithm, see [parse_expression](Parser::parse_expression).
//!
//! Every syntax or semantic error is reported exactly once, after which the parser skips the rest
//! of the line and carries on with the next statement.

use crate::lexer::source::{SourceFile, SourceStream};
use crate::lexer::Scanner;
use rinto_ast::{Backend, NamedObject, Scope, ScopeChain};
use rinto_common::{Diagnostics, Located, Location};
use rinto_tokens::OperatorTag;
use std::io;
use std::path::Path;
use tracing::{debug, trace};

mod expr;
mod statements;

/// Parses rinto source into the scopes of a [ScopeChain], ready to be lowered into a backend
#[derive(Debug)]
pub struct Parser<S, B> {
    scanner: Scanner<S>,
    backend: B,
    scopes: ScopeChain,
    diagnostics: Diagnostics,
}

impl<B: Backend> Parser<SourceFile, B> {
    /// Creates a parser reading the file at the given path
    pub fn with_file(path: &Path, backend: B) -> io::Result<Self> {
        let source = SourceFile::read_path(path)?;
        Ok(Self::new(Scanner::new(source, Diagnostics::new()), backend))
    }

    /// Creates a parser over source text already in memory
    pub fn from_source(name: impl AsRef<Path>, src: &str, backend: B) -> Self {
        let source = SourceFile::from_source(name, src);
        Self::new(Scanner::new(source, Diagnostics::new()), backend)
    }
}

impl<S: SourceStream, B: Backend> Parser<S, B> {
    /// Creates a parser driving an existing scanner. Diagnostics are reported into the scanner's
    /// sink.
    pub fn new(scanner: Scanner<S>, backend: B) -> Self {
        let diagnostics = scanner.diagnostics().clone();
        Self {
            scanner,
            backend,
            scopes: ScopeChain::new(),
            diagnostics,
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn scanner(&self) -> &Scanner<S> {
        &self.scanner
    }

    pub fn scanner_mut(&mut self) -> &mut Scanner<S> {
        &mut self.scanner
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// The scopes currently open. Once parsing finishes only the supercontext remains.
    pub fn scopes(&self) -> &ScopeChain {
        &self.scopes
    }

    /// Parses the whole source into the supercontext
    pub fn parse(&mut self) {
        self.parse_scope(true);
    }

    /// Parses statements into the current scope.
    ///
    /// At the top level this runs until the end of file, then reports any bracket left open. A
    /// nested scope ends at its closing `}`, which is consumed, or at the end of file. Blank
    /// lines and stray `;` separate statements without being statements themselves.
    pub fn parse_scope(&mut self, is_top_level: bool) {
        loop {
            let token = self.scanner.peek_token();
            if token.is_eof() {
                break;
            }
            if token.is_eol() || token.is_operator(OperatorTag::Semicolon) {
                self.scanner.next_token();
                continue;
            }
            if token.is_operator(OperatorTag::RBrace) {
                // the scanner reports a brace nothing opened
                self.scanner.next_token();
                if is_top_level {
                    continue;
                }
                return;
            }

            let statement = self.parse_next();
            if statement.is_invalid() {
                trace!("dropping invalid statement at {}", statement.location());
            } else {
                debug!("parsed {statement}");
                self.scopes.push_statement(statement);
            }
        }
        if is_top_level {
            self.scanner.flush_expectations();
        }
    }

    /// Parses a `{ ... }` body into a new scope. The opening brace must already be consumed.
    pub fn parse_block(&mut self) -> Scope {
        self.scopes.enter();
        self.parse_scope(false);
        self.scopes.leave()
    }

    /// Lowers every statement of the supercontext into the backend, in order
    pub fn lower(&mut self) -> Vec<B::Statement> {
        let statements = self.scopes.supercontext_mut().take_statements();
        debug!("lowering {} statements", statements.len());
        statements
            .into_iter()
            .map(|statement| statement.lower(&mut self.backend))
            .collect()
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Splits the parser into its backend and diagnostics
    pub fn into_parts(self) -> (B, Diagnostics) {
        (self.backend, self.diagnostics)
    }

    /// Skips the rest of the current line, unless the line was already finished
    fn synchronize(&mut self) {
        match self.scanner.last_consumed() {
            Some(token) if token.is_eol() || token.is_eof() => {}
            _ => self.scanner.skip_line(),
        }
    }

    /// Declares an identifier in the current scope, reporting a redefinition
    fn define(&mut self, identifier: &str, location: Location) -> Option<NamedObject> {
        match self.scopes.define(identifier, location) {
            Ok(object) => Some(object),
            Err(redefinition) => {
                self.diagnostics.error_at(
                    redefinition.location,
                    "duplicate definition of %qs",
                    &[&identifier],
                );
                self.diagnostics.inform(
                    redefinition.previous.location(),
                    "previous definition of %qs was here",
                    &[&identifier],
                );
                None
            }
        }
    }

    /// Binds an identifier to its declaration, reporting it if there is none
    fn resolve(&mut self, identifier: &str, location: Location) -> Option<NamedObject> {
        match self.scopes.resolve(identifier) {
            Some(object) => Some(object.clone()),
            None => {
                self.diagnostics
                    .error_at(location, "%qs is undefined", &[&identifier]);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rinto_ast::LoweredScope;
    use rinto_common::Severity;
    use rinto_tokens::FloatValue;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use test_log::test;

    /// Accepts every lowering call and produces nothing
    pub(crate) struct NullBackend;

    impl Backend for NullBackend {
        type Variable = ();
        type Expression = ();
        type Statement = ();

        fn variable(&mut self, _: &NamedObject) {}
        fn invalid_expression(&mut self) {}
        fn unary_expression(&mut self, _: OperatorTag, _: (), _: &Location) {}
        fn binary_expression(&mut self, _: OperatorTag, _: (), _: (), _: &Location) {}
        fn var_reference(&mut self, _: (), _: &Location) {}
        fn float_expression(&mut self, _: &FloatValue, _: &Location) {}
        fn conditional_expression(&mut self, _: (), _: &Location) {}
        fn invalid_statement(&mut self) {}
        fn var_dec_statement(&mut self, _: ()) {}
        fn assignment_statement(&mut self, _: (), _: (), _: &Location) {}
        fn inc_statement(&mut self, _: (), _: &Location) {}
        fn dec_statement(&mut self, _: (), _: &Location) {}
        fn if_statement(&mut self, _: (), _: LoweredScope<()>, _: &Location) {}
        fn for_statement(
            &mut self,
            _: Option<()>,
            _: Option<()>,
            _: Option<()>,
            _: LoweredScope<()>,
            _: &Location,
        ) {
        }
        fn expression_statement(&mut self, _: (), _: &Location) {}
        fn compound_statement(&mut self, _: (), _: (), _: &Location) {}
        fn enter_scope(&mut self) {}
        fn leave_scope(&mut self) {}
    }

    /// Parses the source and renders each top level statement
    pub(crate) fn parse(src: &str) -> (Vec<String>, Vec<String>) {
        let mut parser = Parser::from_source("main.rin", src, NullBackend);
        parser.parse();
        let statements = parser
            .scopes()
            .supercontext()
            .statements()
            .iter()
            .map(|statement| statement.to_string())
            .collect();
        let messages = parser
            .diagnostics()
            .messages()
            .iter()
            .filter(|diagnostic| diagnostic.severity() >= Severity::Error)
            .map(|diagnostic| diagnostic.message().to_string())
            .collect();
        (statements, messages)
    }

    fn test_parser<F: FnOnce(Parser<SourceFile, NullBackend>)>(src: &str, callback: F) {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{src}").unwrap();
        let parser = Parser::with_file(file.path(), NullBackend).expect("could not create parser");
        callback(parser);
    }

    #[test]
    fn test_parse_file() {
        test_parser("float x = 1\nx++", |mut parser| {
            parser.parse();
            assert!(parser.diagnostics().is_empty());
            assert_eq!(parser.scopes().supercontext().len(), 2);
            assert!(parser.scopes().resolve("x").is_some());
            assert_eq!(parser.lower().len(), 2);
            assert!(parser.scopes().supercontext().is_empty());
        });
    }

    #[test]
    fn test_blank_lines_are_not_statements() {
        let (statements, errors) = parse("\n\nfloat x;;\n\n");
        assert_eq!(statements, ["(var-dec x)"]);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_recovers_after_error() {
        let (statements, errors) = parse("float x\n5\nx = 2\n");
        assert_eq!(statements, ["(var-dec x)", "(assign x 2)"]);
        assert_eq!(errors, ["expected statement but received '5' instead"]);
    }

    #[test]
    fn test_stray_close_brace() {
        let (statements, errors) = parse("}\nfloat x");
        assert_eq!(statements, ["(var-dec x)"]);
        assert_eq!(errors, ["unmatched '}' operator"]);
    }

    #[test]
    fn test_redefinition_keeps_first_declaration() {
        let mut parser = Parser::from_source("main.rin", "float x;\nfloat x;\n", NullBackend);
        parser.parse();
        let messages = parser.diagnostics().messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].severity(), Severity::Error);
        assert_eq!(messages[0].message(), "duplicate definition of 'x'");
        assert_eq!(messages[0].location().line(), 1);
        assert_eq!(messages[1].severity(), Severity::Inform);
        assert_eq!(messages[1].message(), "previous definition of 'x' was here");
        assert_eq!(messages[1].location().line(), 0);
        let x = parser.scopes().resolve("x").unwrap();
        assert_eq!(x.location().line(), 0);
        assert_eq!(parser.scopes().supercontext().len(), 1);
    }
}
