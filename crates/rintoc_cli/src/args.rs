//! the args for running rintoc

use crate::logging::LoggingArgs;
use rintoc::Emit;
use std::path::{Path, PathBuf};

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(author, version, about = "Parses rinto source and lowers it into a syntax tree")]
pub struct Args {
    #[command(flatten)]
    logging: LoggingArgs,

    /// Specify which source files to compile
    #[clap(required = true, value_name="source file", value_hint=clap::ValueHint::FilePath)]
    pub files: Vec<PathBuf>,
    /// What to print for each compiled file
    #[clap(long, value_enum, default_value_t = EmitArg::Tree)]
    pub emit: EmitArg,
    /// Fail when any warning is reported
    #[clap(short = 'W', long)]
    pub warnings_as_errors: bool,
    /// Don't print the source lines a diagnostic points at
    #[clap(long)]
    pub no_excerpt: bool,
}

impl Args {
    pub fn logging(&self) -> &LoggingArgs {
        &self.logging
    }

    /// Whether a file looks like rinto source
    pub fn is_source_file(path: &Path) -> bool {
        path.extension().is_some_and(|extension| extension == "rin")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EmitArg {
    Tree,
    None,
}

impl From<EmitArg> for Emit {
    fn from(value: EmitArg) -> Self {
        match value {
            EmitArg::Tree => Emit::Tree,
            EmitArg::None => Emit::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_args_parsing() {
        let test = "rintoc file.rin";
        let args = Args::try_parse_from(test.split(" ")).expect("could not parse test string");
        assert_eq!(args.files[0], Path::new("file.rin"));
        assert_eq!(args.emit, EmitArg::Tree);
        assert!(!args.warnings_as_errors);
        assert!(!args.no_excerpt);
    }

    #[test]
    fn test_files_required() {
        assert!(Args::try_parse_from(["rintoc"]).is_err());
    }

    #[test]
    fn test_flags() {
        let test = "rintoc -W --emit none --no-excerpt a.rin b.rin";
        let args = Args::try_parse_from(test.split(" ")).expect("could not parse test string");
        assert_eq!(args.files, [Path::new("a.rin"), Path::new("b.rin")]);
        assert_eq!(Emit::from(args.emit), Emit::None);
        assert!(args.warnings_as_errors);
        assert!(args.no_excerpt);
    }

    #[test]
    fn test_source_extension() {
        assert!(Args::is_source_file(Path::new("dir/main.rin")));
        assert!(!Args::is_source_file(Path::new("main.rs")));
        assert!(!Args::is_source_file(Path::new("rin")));
    }
}
