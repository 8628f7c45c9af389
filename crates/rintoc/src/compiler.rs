//! Responsible with compiling rinto files into a lowered tree

use crate::tree_backend::TreeBackend;
use rinto_common::{Diagnostic, Diagnostics, Location, QuoteChars, Severity};
use rinto_parsing::{Parser, Scanner, SourceFile};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info_span};

pub mod error;

pub use error::{RintoCError, RintoCErrorKind, RintoCResult};

/// What a successful compilation hands back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Emit {
    /// The s-expression rendering of every top level statement
    #[default]
    Tree,
    /// Nothing, only diagnostics
    None,
}

/// Responsible with compiling rinto files.
///
/// Must be configured using a [RintoCBuilder].
#[derive(Debug)]
pub struct RintoC {
    quotes: QuoteChars,
    warnings_as_errors: bool,
    emit: Emit,
}

impl RintoC {
    /// Creates the default RintoCBuilder
    #[inline]
    pub fn builder() -> RintoCBuilder {
        RintoCBuilder::new()
    }

    /// Compile a file at a given path.
    ///
    /// A file that can't be read is fatal and nothing is parsed. Otherwise the whole file is
    /// parsed and lowered, and the compilation fails if any errors were reported.
    pub fn compile(&mut self, path: &Path) -> RintoCResult<Compilation> {
        let _span = info_span!("compile", path = ?path).entered();
        let diagnostics = Diagnostics::with_quote_chars(self.quotes);

        let source = match SourceFile::read_path(path) {
            Ok(source) => source,
            Err(error) => {
                let fatal = diagnostics.fatal_at(
                    Location::start_of(path),
                    "cannot read %qs: %s",
                    &[&path.display(), &error],
                );
                return Err(RintoCError::new(fatal, diagnostics.take()));
            }
        };

        let mut parser = Parser::new(
            Scanner::new(source, diagnostics.clone()),
            TreeBackend::new(),
        );
        parser.parse();
        debug!(
            "parsed {} statements with {} diagnostics",
            parser.scopes().supercontext().len(),
            diagnostics.len()
        );
        let statements = parser.lower();

        let mut errors = diagnostics.error_count();
        if self.warnings_as_errors {
            errors += diagnostics.warning_count();
        }
        let messages = diagnostics.take();
        if errors > 0 {
            return Err(RintoCError::new(
                RintoCErrorKind::Diagnostics {
                    path: path.to_path_buf(),
                    errors,
                },
                messages,
            ));
        }

        Ok(Compilation {
            path: path.to_path_buf(),
            statements: match self.emit {
                Emit::Tree => statements,
                Emit::None => vec![],
            },
            diagnostics: messages,
        })
    }

    /// Compile every file at the given paths.
    ///
    /// Every file is compiled even after one fails. If any did, their errors are gathered into
    /// one [Multi](RintoCErrorKind::Multi) error.
    pub fn compile_all(&mut self, paths: Vec<PathBuf>) -> RintoCResult<Vec<Compilation>> {
        let mut compilations = vec![];
        let mut errors = vec![];
        for path in paths {
            match self.compile(&path) {
                Ok(compilation) => compilations.push(compilation),
                Err(error) => errors.push(error),
            }
        }
        if errors.is_empty() {
            Ok(compilations)
        } else {
            Err(RintoCError::from(errors))
        }
    }
}

/// The result of compiling a single file
#[derive(Debug)]
pub struct Compilation {
    path: PathBuf,
    statements: Vec<String>,
    diagnostics: Vec<Diagnostic>,
}

impl Compilation {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The rendered top level statements, empty unless the tree is emitted
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// Warnings and informs reported while compiling
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity() == Severity::Warning)
            .count()
    }
}

/// Builder for creating a [RintoC] instance.
#[derive(Debug)]
pub struct RintoCBuilder {
    /// What `%q`, `%<` and `%>` expand to in diagnostics
    pub quotes: QuoteChars,
    pub warnings_as_errors: bool,
    pub emit: Emit,
}

impl RintoCBuilder {
    /// Creates a RintoCBuilder with default settings
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the characters quoted diagnostic arguments are wrapped in
    pub fn quote_chars(mut self, open: &'static str, close: &'static str) -> Self {
        self.quotes = QuoteChars::new(open, close);
        self
    }

    /// Sets whether a warning fails the compilation
    pub fn warnings_as_errors(mut self, warnings_as_errors: bool) -> Self {
        self.warnings_as_errors = warnings_as_errors;
        self
    }

    pub fn emit(mut self, emit: Emit) -> Self {
        self.emit = emit;
        self
    }

    /// Builds a [RintoC] instance from this builder
    pub fn build(self) -> Result<RintoC, BuildRintoCError> {
        if self.quotes.open.is_empty() || self.quotes.close.is_empty() {
            return Err(BuildRintoCError::EmptyQuoteChars);
        }
        Ok(RintoC {
            quotes: self.quotes,
            warnings_as_errors: self.warnings_as_errors,
            emit: self.emit,
        })
    }
}

impl Default for RintoCBuilder {
    fn default() -> Self {
        Self {
            quotes: QuoteChars::default(),
            warnings_as_errors: false,
            emit: Emit::Tree,
        }
    }
}

/// An error occurred while building a [RintoC] instance
#[derive(Debug, Error)]
pub enum BuildRintoCError {
    #[error("quote characters can't be empty")]
    EmptyQuoteChars,
}
