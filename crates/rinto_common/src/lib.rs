//! Common structures used throughout the rinto front end: where things are in a source file, and
//! the diagnostics reported about them.

pub mod diagnostic;
pub mod location;

pub use diagnostic::{Diagnostic, Diagnostics, FatalError, QuoteChars, Severity};
pub use location::{Located, Location};
