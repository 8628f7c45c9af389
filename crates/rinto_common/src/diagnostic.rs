//! Location-tagged diagnostics and the sink they accumulate in.
//!
//! Messages are written with printf-style format strings. Along with the usual conversions
//! (`%s`, `%d`, `%i`, `%u`, `%f`, `%g`, `%c`, `%x`), which all take the next argument by its
//! [Display] impl, the following extensions are understood:
//!
//! - `%q<conversion>` wraps the argument in the configured [QuoteChars]
//! - `%<` and `%>` emit the open and close quote characters on their own
//! - `%m` emits the text of the last operating system error
//! - `%%` emits a literal `%`

use crate::location::Location;
use std::cell::RefCell;
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use thiserror::Error;
use tracing::{error, info, warn};

/// How bad a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Inform,
    Warning,
    Error,
    Fatal,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Inform => "inform",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single reported message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    location: Location,
    message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, location: Location, message: impl Into<String>) -> Self {
        Self {
            severity,
            location,
            message: message.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.location, self.message)
    }
}

/// The characters `%q`, `%<` and `%>` expand to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteChars {
    pub open: &'static str,
    pub close: &'static str,
}

impl QuoteChars {
    pub const fn new(open: &'static str, close: &'static str) -> Self {
        Self { open, close }
    }
}

impl Default for QuoteChars {
    fn default() -> Self {
        Self::new("'", "'")
    }
}

/// A diagnostic that aborts the run.
#[derive(Debug, Clone, Error)]
#[error("{location}: {message}")]
pub struct FatalError {
    location: Location,
    message: String,
}

impl FatalError {
    pub fn new(location: Location, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Default)]
struct Sink {
    messages: Vec<Diagnostic>,
    quotes: QuoteChars,
}

/// An ordered sink of diagnostics.
///
/// Cloning a [Diagnostics] produces another handle to the *same* sink, so a scanner and the parser
/// driving it can report into one list that keeps the order messages were emitted in.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    sink: Rc<RefCell<Sink>>,
}

impl Diagnostics {
    /// Creates a new, empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty sink which quotes with the given characters
    pub fn with_quote_chars(quotes: QuoteChars) -> Self {
        let diagnostics = Self::new();
        diagnostics.set_quote_chars(quotes);
        diagnostics
    }

    pub fn quote_chars(&self) -> QuoteChars {
        self.sink.borrow().quotes
    }

    pub fn set_quote_chars(&self, quotes: QuoteChars) {
        self.sink.borrow_mut().quotes = quotes;
    }

    /// Formats and records a diagnostic of any severity
    pub fn report(
        &self,
        severity: Severity,
        location: Location,
        fmt: &str,
        args: &[&dyn Display],
    ) {
        let message = expand_message(fmt, args, &self.quote_chars());
        self.push(Diagnostic::new(severity, location, message));
    }

    pub fn error_at(&self, location: Location, fmt: &str, args: &[&dyn Display]) {
        self.report(Severity::Error, location, fmt, args)
    }

    pub fn warning_at(&self, location: Location, fmt: &str, args: &[&dyn Display]) {
        self.report(Severity::Warning, location, fmt, args)
    }

    pub fn inform(&self, location: Location, fmt: &str, args: &[&dyn Display]) {
        self.report(Severity::Inform, location, fmt, args)
    }

    /// Records a fatal diagnostic, returning the error the caller should abort with
    #[must_use]
    pub fn fatal_at(&self, location: Location, fmt: &str, args: &[&dyn Display]) -> FatalError {
        let message = expand_message(fmt, args, &self.quote_chars());
        self.push(Diagnostic::new(
            Severity::Fatal,
            location.clone(),
            message.clone(),
        ));
        FatalError::new(location, message)
    }

    /// Records an already formatted message without any format expansion
    pub fn debug(&self, location: Location, message: impl Display) {
        self.push(Diagnostic::new(
            Severity::Inform,
            location,
            message.to_string(),
        ));
    }

    fn push(&self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Inform => info!("{diagnostic}"),
            Severity::Warning => warn!("{diagnostic}"),
            Severity::Error | Severity::Fatal => error!("{diagnostic}"),
        }
        self.sink.borrow_mut().messages.push(diagnostic);
    }

    /// A copy of every diagnostic recorded so far, in emission order
    pub fn messages(&self) -> Vec<Diagnostic> {
        self.sink.borrow().messages.clone()
    }

    /// Removes and returns every diagnostic recorded so far
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.sink.borrow_mut().messages)
    }

    pub fn len(&self) -> usize {
        self.sink.borrow().messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of error and fatal diagnostics
    pub fn error_count(&self) -> usize {
        self.count_where(|severity| severity >= Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count_where(|severity| severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    fn count_where(&self, predicate: impl Fn(Severity) -> bool) -> usize {
        self.sink
            .borrow()
            .messages
            .iter()
            .filter(|diagnostic| predicate(diagnostic.severity))
            .count()
    }
}

/// Expands a printf-style format string. See the [module docs](self) for the recognized
/// directives.
///
/// A conversion with no argument left to consume is kept as written.
pub fn expand_message(fmt: &str, args: &[&dyn Display], quotes: &QuoteChars) -> String {
    let mut out = String::with_capacity(fmt.len());
    let mut args = args.iter();
    let mut chars = fmt.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            None => out.push('%'),
            Some('%') => out.push('%'),
            Some('m') => out.push_str(&last_os_error()),
            Some('<') => out.push_str(quotes.open),
            Some('>') => out.push_str(quotes.close),
            Some('q') => match chars.next() {
                Some('m') => {
                    out.push_str(quotes.open);
                    out.push_str(&last_os_error());
                    out.push_str(quotes.close);
                }
                Some(conversion) if is_conversion(conversion) => match args.next() {
                    Some(arg) => {
                        out.push_str(quotes.open);
                        out.push_str(&arg.to_string());
                        out.push_str(quotes.close);
                    }
                    None => {
                        out.push_str("%q");
                        out.push(conversion);
                    }
                },
                Some(other) => {
                    out.push_str("%q");
                    out.push(other);
                }
                None => out.push_str("%q"),
            },
            Some(conversion) if is_conversion(conversion) => match args.next() {
                Some(arg) => out.push_str(&arg.to_string()),
                None => {
                    out.push('%');
                    out.push(conversion);
                }
            },
            Some(other) => {
                out.push('%');
                out.push(other);
            }
        }
    }
    out
}

fn is_conversion(c: char) -> bool {
    matches!(c, 's' | 'd' | 'i' | 'u' | 'f' | 'g' | 'c' | 'x')
}

fn last_os_error() -> String {
    std::io::Error::last_os_error().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use test_log::test;

    fn location() -> Location {
        Location::new(Path::new("main.rin"), 0, 0, 0)
    }

    #[test]
    fn test_expand_plain_conversions() {
        let message = expand_message("%s is %d", &[&"x", &5], &QuoteChars::default());
        assert_eq!(message, "x is 5");
    }

    #[test]
    fn test_expand_quoted() {
        let quotes = QuoteChars::new("`", "'");
        assert_eq!(
            expand_message("%qs is undefined", &[&"x"], &quotes),
            "`x' is undefined"
        );
        assert_eq!(expand_message("%<;%>", &[], &quotes), "`;'");
    }

    #[test]
    fn test_expand_percent_and_missing_args() {
        let quotes = QuoteChars::default();
        assert_eq!(expand_message("100%%", &[], &quotes), "100%");
        assert_eq!(expand_message("%s and %s", &[&"a"], &quotes), "a and %s");
        assert_eq!(expand_message("%y", &[], &quotes), "%y");
        assert_eq!(expand_message("trailing %", &[], &quotes), "trailing %");
    }

    #[test]
    fn test_expand_os_error_is_not_empty() {
        let message = expand_message("%m", &[], &QuoteChars::default());
        assert!(!message.is_empty());
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic::new(
            Severity::Error,
            Location::new(Path::new("main.rin"), 4, 1, 2),
            "oops",
        );
        assert_eq!(diagnostic.to_string(), "error: main.rin:2:3: oops");
    }

    #[test]
    fn test_sink_is_shared_between_clones() {
        let diagnostics = Diagnostics::new();
        let other = diagnostics.clone();
        diagnostics.error_at(location(), "first", &[]);
        other.warning_at(location(), "second", &[]);
        let messages = diagnostics.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].message(), "first");
        assert_eq!(messages[1].severity(), Severity::Warning);
        assert_eq!(other.error_count(), 1);
        assert_eq!(other.warning_count(), 1);
    }

    #[test]
    fn test_fatal_counts_as_error() {
        let diagnostics = Diagnostics::new();
        let fatal = diagnostics.fatal_at(location(), "cannot open %qs", &[&"main.rin"]);
        assert_eq!(fatal.message(), "cannot open 'main.rin'");
        assert!(diagnostics.has_errors());
    }

    #[test]
    fn test_debug_skips_expansion() {
        let diagnostics = Diagnostics::new();
        diagnostics.debug(location(), "50%s");
        assert_eq!(diagnostics.messages()[0].message(), "50%s");
        assert_eq!(diagnostics.messages()[0].severity(), Severity::Inform);
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn test_take_empties_sink() {
        let diagnostics = Diagnostics::with_quote_chars(QuoteChars::new("<", ">"));
        diagnostics.error_at(location(), "%qs", &[&"x"]);
        let taken = diagnostics.take();
        assert_eq!(taken[0].message(), "<x>");
        assert!(diagnostics.is_empty());
    }
}
