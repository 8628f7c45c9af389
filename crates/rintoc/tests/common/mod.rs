use std::io::Write;
use tempfile::NamedTempFile;

/// Writes rinto source into a temporary `.rin` file, removed when dropped
pub fn source_file(src: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".rin")
        .tempfile()
        .expect("could not create temporary file");
    file.write_all(src.as_bytes())
        .expect("could not write source");
    file
}
