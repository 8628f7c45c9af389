//! Turns rinto source text into a scope resolved syntax tree.
//!
//! A [SourceStream] feeds characters to the [Scanner], which produces a lookahead buffered stream of
//! tokens. The [Parser] drives the scanner, binding identifiers to their declarations as it builds
//! the tree, and lowers the finished tree into a [Backend](rinto_ast::Backend).

use rinto_ast::Backend;
use std::io;
use std::path::Path;

pub mod lexer;
pub mod parser;

pub use lexer::source::{SourceFile, SourceStream};
pub use lexer::Scanner;
pub use parser::Parser;

/// Parses a file into the supercontext of a new parser.
///
/// The returned parser holds every diagnostic produced and is ready to
/// [lower](Parser::lower) into the backend.
pub fn parse_file<B: Backend>(path: &Path, backend: B) -> io::Result<Parser<SourceFile, B>> {
    let mut parser = Parser::with_file(path, backend)?;
    parser.parse();
    Ok(parser)
}
