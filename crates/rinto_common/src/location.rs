//! A position within a source file, and a way of getting the source text surrounding it

use std::fmt::{Display, Formatter};
use std::io;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

const UNKNOWN_FILE: &str = "unknown";

/// A trait for anything that can report the [Location] it was created at
pub trait Located {
    fn location(&self) -> Location;
}

/// A position within a source file.
///
/// Offsets, lines and columns are all 0-based. Use [Location::unknown] for diagnostics that have no
/// meaningful position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    file: Arc<Path>,
    offset: usize,
    line: usize,
    column: usize,
}

impl Location {
    /// Creates a new location
    pub fn new(file: impl Into<Arc<Path>>, offset: usize, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            offset,
            line,
            column,
        }
    }

    /// The location of the first byte of a file
    pub fn start_of(file: impl Into<Arc<Path>>) -> Self {
        Self::new(file, 0, 0, 0)
    }

    /// The sentinel location used for synthetic diagnostics
    pub fn unknown() -> Self {
        Self::new(Path::new(UNKNOWN_FILE), usize::MAX, usize::MAX, usize::MAX)
    }

    /// Checks whether this is the [unknown](Self::unknown) location
    pub fn is_unknown(&self) -> bool {
        self.line == usize::MAX && self.column == usize::MAX
    }

    /// Gets the file this location is from
    #[inline]
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Gets the shared handle to the file path, for creating further locations in the same file
    #[inline]
    pub fn file_handle(&self) -> &Arc<Path> {
        &self.file
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    #[inline]
    pub fn column(&self) -> usize {
        self.column
    }
}

impl Located for Location {
    fn location(&self) -> Location {
        self.clone()
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_unknown() {
            write!(f, "{UNKNOWN_FILE}")
        } else {
            write!(
                f,
                "{}:{}:{}",
                self.file.display(),
                self.line + 1,
                self.column + 1
            )
        }
    }
}

/// A line reader struct that's responsible for getting the lines surrounding a location
#[derive(Debug, Default)]
pub struct LineReader {
    before: usize,
    after: usize,
}

impl LineReader {
    /// Creates a new line reader that gets `before` number of lines before a location and `after`
    /// number of lines after.
    pub fn new(before: usize, after: usize) -> Self {
        Self { before, after }
    }

    /// Reads the lines surrounding a location from its file
    pub fn lines(&self, location: &Location) -> io::Result<Vec<Line>> {
        let string = std::fs::read_to_string(location.file())?;
        self.lines_in(&string, location)
    }

    /// Gets the lines surrounding a location from already loaded source text
    pub fn lines_in(&self, source: &str, location: &Location) -> io::Result<Vec<Line>> {
        if location.is_unknown() {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                "unknown location has no source lines",
            ));
        }
        let base = location.line();
        let first = base.saturating_sub(self.before);
        let last = base.saturating_add(self.after);
        let lines = source
            .split('\n')
            .enumerate()
            .skip(first)
            .take_while(|(index, _)| *index <= last)
            .map(|(index, src)| Line {
                line: index + 1,
                is_base: index == base,
                src: src.trim_end_matches('\r').to_string(),
            })
            .collect::<Vec<_>>();
        if !lines.iter().any(|line| line.is_base) {
            return Err(io::Error::new(
                ErrorKind::UnexpectedEof,
                "location out of bounds",
            ));
        }
        Ok(lines)
    }
}

/// A single line of source, numbered from 1
#[derive(Debug, PartialEq, Eq)]
pub struct Line {
    pub line: usize,
    pub is_base: bool,
    pub src: String,
}
