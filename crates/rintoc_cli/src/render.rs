//! Renders diagnostics for the terminal

use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;
use rinto_common::location::LineReader;
use rinto_common::{Diagnostic, Severity};
use std::fmt::Write as _;

/// Renders a diagnostic as its header line, optionally followed by the source lines it points at
#[derive(Debug)]
pub struct Renderer {
    reader: Option<LineReader>,
}

impl Renderer {
    pub fn new(excerpts: bool) -> Self {
        Self {
            reader: excerpts.then(|| LineReader::new(1, 0)),
        }
    }

    /// `severity: file:line:col: message`, with the severity colored when stderr supports it
    pub fn header(&self, diagnostic: &Diagnostic) -> String {
        let severity = diagnostic.severity();
        let label = severity.if_supports_color(Stderr, |text| match severity {
            Severity::Inform => text.bright_cyan().to_string(),
            Severity::Warning => text.bright_yellow().to_string(),
            Severity::Error | Severity::Fatal => text.bright_red().to_string(),
        });
        format!(
            "{label}: {}: {}",
            diagnostic.location(),
            diagnostic.message()
        )
    }

    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let mut rendered = self.header(diagnostic);
        if let Some(excerpt) = self.excerpt(diagnostic) {
            rendered.push('\n');
            rendered.push_str(&excerpt);
        }
        rendered
    }

    /// The numbered source lines up to the diagnostic, with a caret under its column. Nothing if
    /// the source can't be read.
    fn excerpt(&self, diagnostic: &Diagnostic) -> Option<String> {
        let reader = self.reader.as_ref()?;
        let location = diagnostic.location();
        let lines = reader.lines(location).ok()?;
        let width = lines.iter().map(|line| line.line).max().unwrap_or(0) / 10 + 1;
        let mut excerpt = String::new();
        for line in &lines {
            let _ = writeln!(excerpt, "{:width$} | {}", line.line, line.src.trim_end());
            if line.is_base {
                let _ = writeln!(
                    excerpt,
                    "{}{}^",
                    " ".repeat(width + 3),
                    "-".repeat(location.column())
                );
            }
        }
        Some(excerpt.trim_end().to_string())
    }
}
