// Delimited text import/export

use std::io::Read;
use std::path::Path;

use sps_core::Delimiters;
use sps_engine::Table;

use crate::{ingest, serialize, IoError};

pub fn import(path: &Path, delimiters: &Delimiters) -> Result<Table, IoError> {
    let content = read_file_as_utf8(path)?;
    let table = ingest::parse(&content, delimiters);
    log::info!(
        "loaded {} ({} rows x {} cols)",
        path.display(),
        table.row_count(),
        table.max_row_length()
    );
    Ok(table)
}

pub fn export(table: &Table, path: &Path, delimiters: &Delimiters) -> Result<(), IoError> {
    let content = serialize::serialize(table, delimiters);
    std::fs::write(path, content).map_err(|e| IoError::new(path, e.to_string()))?;
    log::info!("wrote {} ({} rows)", path.display(), table.row_count());
    Ok(())
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, IoError> {
    let mut file = std::fs::File::open(path).map_err(|e| IoError::new(path, e.to_string()))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| IoError::new(path, e.to_string()))?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            log::warn!("{} is not valid UTF-8, decoding as Windows-1252", path.display());
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}
