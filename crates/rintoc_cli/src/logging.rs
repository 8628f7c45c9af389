//! Logging setup for the rintoc binary

use clap::{value_parser, ArgAction, Args};
use std::io;
use std::io::{stderr, stdout, Stderr, StderrLock, Stdout, StdoutLock};
use tracing::level_filters::LevelFilter;
use tracing::{Level, Metadata};
use tracing_error::ErrorLayer;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt::{format, MakeWriter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{Layer, Registry};

/// Common way to set logging levels
#[derive(Debug, Clone, Copy, Args)]
pub struct LoggingArgs {
    /// Log more, `-vv` logs everything
    #[clap(short = 'v', value_parser = value_parser!(u8).range(0..=2), action=ArgAction::Count, conflicts_with="quiet")]
    verbose: u8,
    /// Log less, `-qq` logs nothing
    #[clap(short = 'q', value_parser = value_parser!(u8).range(0..=2), action=ArgAction::Count, conflicts_with="verbose")]
    quiet: u8,
}

impl LoggingArgs {
    /// Gets the logging level based on whether `-v[v]` or `-q[q]` has been used,
    pub fn log_level_filter(&self) -> LevelFilter {
        let sum = self.verbose as i8 - self.quiet as i8;
        match sum {
            -2 => LevelFilter::OFF,
            -1 => LevelFilter::ERROR,
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            2 => LevelFilter::TRACE,
            _ => unreachable!(),
        }
    }
}

/// The standard stream a log line ends up on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    /// Warnings and errors go to stderr, the rest shares stdout with the emitted tree
    fn for_level(level: &Level) -> Self {
        if level <= &Level::WARN {
            Stream::Stderr
        } else {
            Stream::Stdout
        }
    }
}

struct StdioWriter {
    stdout: Stdout,
    stderr: Stderr,
}

impl StdioWriter {
    fn lock(&self, stream: Stream) -> StdioLock<'_> {
        match stream {
            Stream::Stdout => StdioLock::Stdout(self.stdout.lock()),
            Stream::Stderr => StdioLock::Stderr(self.stderr.lock()),
        }
    }
}

enum StdioLock<'a> {
    Stdout(StdoutLock<'a>),
    Stderr(StderrLock<'a>),
}

impl io::Write for StdioLock<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            StdioLock::Stdout(stdout) => stdout.write(buf),
            StdioLock::Stderr(stderr) => stderr.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            StdioLock::Stdout(stdout) => stdout.flush(),
            StdioLock::Stderr(stderr) => stderr.flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for StdioWriter {
    type Writer = StdioLock<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        self.lock(Stream::Stderr)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        self.lock(Stream::for_level(meta.level()))
    }
}

/// Installs the global subscriber. Warnings and errors are logged to stderr, the rest to stdout.
///
/// Diagnostics are rendered by rintoc itself, so their log mirror only shows when logging at
/// debug or above.
pub fn init_logging(level_filter: LevelFilter) -> eyre::Result<()> {
    let diagnostic_level = if level_filter >= LevelFilter::DEBUG {
        level_filter
    } else {
        LevelFilter::OFF
    };
    let filter = Targets::new()
        .with_default(level_filter)
        .with_target("rinto_common::diagnostic", diagnostic_level);

    let registry = Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format().with_thread_ids(true))
                .with_writer(StdioWriter {
                    stdout: stdout(),
                    stderr: stderr(),
                })
                .with_filter(filter),
        )
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(registry)?;

    Ok(())
}
