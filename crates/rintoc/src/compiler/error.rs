//! A rinto compilation error

use itertools::Itertools as _;
use rinto_common::{Diagnostic, FatalError};
use std::path::PathBuf;
use thiserror::Error;

/// The kind of error
#[derive(Debug, Error)]
pub enum RintoCErrorKind {
    /// The run was aborted before anything could be parsed
    #[error(transparent)]
    Fatal(#[from] FatalError),
    /// The file was parsed and lowered, but errors were reported along the way
    #[error("could not compile {} due to {errors} previous error(s)", .path.display())]
    Diagnostics { path: PathBuf, errors: usize },
    #[error("{}", .0.iter().join("\n"))]
    Multi(Vec<RintoCError>),
}

/// An error occurred while attempting to compile rinto files.
///
/// Carries every diagnostic reported before the compilation gave up, in the order they were
/// reported.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct RintoCError {
    kind: RintoCErrorKind,
    diagnostics: Vec<Diagnostic>,
}

impl RintoCError {
    /// Creates a new [RintoCError] using a quick constructor
    #[inline]
    pub fn new(kind: impl Into<RintoCErrorKind>, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            kind: kind.into(),
            diagnostics,
        }
    }

    pub fn kind(&self) -> &RintoCErrorKind {
        &self.kind
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Gathers the errors of several compilations. Their diagnostics move up into the combined error.
impl From<Vec<RintoCError>> for RintoCError {
    fn from(mut errors: Vec<RintoCError>) -> Self {
        let diagnostics = errors
            .iter_mut()
            .flat_map(|error| std::mem::take(&mut error.diagnostics))
            .collect();
        Self::new(RintoCErrorKind::Multi(errors), diagnostics)
    }
}

/// A type alias for general results in rintoc
pub type RintoCResult<T> = Result<T, RintoCError>;
