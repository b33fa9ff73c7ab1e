//! Binary catalog snapshots using `MessagePack`.
//!
//! A snapshot stores a loaded catalog, derived indices included, so a
//! checker can skip parsing and validation on startup.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use webshape_foundation::{Error, ErrorKind, Result};

use crate::catalog::Catalog;

/// Serializes a catalog to `MessagePack` bytes.
///
/// # Errors
///
/// Returns a `Serialization` error if encoding fails.
pub fn to_bytes(catalog: &Catalog) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(catalog).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

/// Deserializes a catalog from `MessagePack` bytes.
///
/// # Errors
///
/// Returns a `Serialization` error if the bytes are not a catalog snapshot.
pub fn from_bytes(bytes: &[u8]) -> Result<Catalog> {
    rmp_serde::from_slice(bytes).map_err(|e| Error::new(ErrorKind::Serialization(e.to_string())))
}

/// Writes a catalog snapshot to a file, replacing any existing file.
///
/// # Errors
///
/// Returns an `Io` error if the file cannot be written, or a
/// `Serialization` error if encoding fails.
pub fn save_to_file<P: AsRef<Path>>(catalog: &Catalog, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(catalog)?;
    let file = File::create(path).map_err(|e| io_error("create", path, &e))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&bytes).map_err(|e| io_error("write", path, &e))?;
    writer.flush().map_err(|e| io_error("flush", path, &e))
}

/// Reads a catalog snapshot from a file.
///
/// # Errors
///
/// Returns an `Io` error if the file cannot be read, or a `Serialization`
/// error if it is not a catalog snapshot.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| io_error("open", path, &e))?;
    let mut bytes = Vec::new();
    BufReader::new(file)
        .read_to_end(&mut bytes)
        .map_err(|e| io_error("read", path, &e))?;
    from_bytes(&bytes)
}

fn io_error(action: &str, path: &Path, error: &std::io::Error) -> Error {
    Error::new(ErrorKind::Io(format!(
        "failed to {action} '{}': {error}",
        path.display()
    )))
}
