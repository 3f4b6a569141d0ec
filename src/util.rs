use anyhow::{anyhow, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Opens `path` as a buffered reader, tagging any failure with the kind of
/// file being opened so top-level errors name their source. Both the
/// project file and the keyword files are read line- or stream-wise, so
/// callers always want the buffering.
pub fn open(path: &Path, kind: &str) -> Result<BufReader<File>> {
    match File::open(path) {
        Ok(file) => Ok(BufReader::new(file)),
        Err(e) => Err(anyhow!("Opening {} file `{}`: {}", kind, path.display(), e)),
    }
}
