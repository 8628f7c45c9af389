use crate::args::Args;
use crate::logging::init_logging;
use crate::render::Renderer;
use clap::Parser;
use eyre::eyre;
use rinto_common::{Diagnostic, Location, Severity};
use rintoc::RintoC;
use tracing::{debug, trace};

mod args;
mod logging;
mod render;

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.logging().log_level_filter())?;
    trace!("starting rintoc with args: {args:?}");
    debug!("rintoc version: {}", env!("CARGO_PKG_VERSION"));

    let renderer = Renderer::new(!args.no_excerpt);
    let mut rintoc = RintoC::builder()
        .warnings_as_errors(args.warnings_as_errors)
        .emit(args.emit.into())
        .build()?;

    let mut failed = 0_usize;
    for path in &args.files {
        if !Args::is_source_file(path) {
            let warning = Diagnostic::new(
                Severity::Warning,
                Location::start_of(path.as_path()),
                format!("'{}' is not a rinto source file, skipping", path.display()),
            );
            eprintln!("{}", renderer.header(&warning));
            if args.warnings_as_errors {
                failed += 1;
            }
            continue;
        }

        match rintoc.compile(path) {
            Ok(compilation) => {
                for diagnostic in compilation.diagnostics() {
                    eprintln!("{}", renderer.render(diagnostic));
                }
                for statement in compilation.statements() {
                    println!("{statement}");
                }
            }
            Err(error) => {
                for diagnostic in error.diagnostics() {
                    eprintln!("{}", renderer.render(diagnostic));
                }
                debug!("{error}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(eyre!("could not compile {failed} file(s)"));
    }
    Ok(())
}
