//! Credential file reading

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::StoreError;

/// Reads the credential file as UTF-8 text.
///
/// Invalid byte sequences decode to U+FFFD, so only the lines containing them
/// are affected. A missing file is not an error: it yields `Ok(None)`, meaning "no credentials".
pub fn read_credential_file(path: &Path) -> Result<Option<String>, StoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}
