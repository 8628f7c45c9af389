//! Character sources the scanner pulls from

use rinto_common::Location;
use std::fs::File;
use std::io;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

/// A pull based character cursor that knows where it is
pub trait SourceStream {
    /// Consumes the next character
    fn next_char(&mut self) -> Option<u8>;

    /// The next character, without consuming it
    fn peek_char(&self) -> Option<u8>;

    /// The location of the next character
    fn location(&self) -> Location;

    fn has_next(&self) -> bool {
        self.peek_char().is_some()
    }
}

/// A source read entirely into memory
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: Arc<Path>,
    bytes: Vec<u8>,
    offset: usize,
    line: usize,
    column: usize,
}

impl SourceFile {
    /// Reads the file at a path
    pub fn read_path(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        Self::new(path, file)
    }

    /// Reads a source to its end, attributing it to the given path
    pub fn new<R: Read>(path: &Path, reader: R) -> io::Result<Self> {
        let mut bytes = vec![];
        BufReader::new(reader).read_to_end(&mut bytes)?;
        Ok(Self::from_bytes(path, bytes))
    }

    /// Creates a source from text already in memory
    pub fn from_source(name: impl AsRef<Path>, src: &str) -> Self {
        Self::from_bytes(name.as_ref(), src.as_bytes().to_vec())
    }

    fn from_bytes(path: &Path, bytes: Vec<u8>) -> Self {
        Self {
            path: Arc::from(path),
            bytes,
            offset: 0,
            line: 0,
            column: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SourceStream for SourceFile {
    fn next_char(&mut self) -> Option<u8> {
        let c = *self.bytes.get(self.offset)?;
        self.offset += 1;
        if c == b'\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn peek_char(&self) -> Option<u8> {
        self.bytes.get(self.offset).copied()
    }

    fn location(&self) -> Location {
        Location::new(self.path.clone(), self.offset, self.line, self.column)
    }
}
