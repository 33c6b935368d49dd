use std::io::ErrorKind;
use std::path::Path;

use crate::error::Error;

pub fn read_document(path: impl AsRef<Path>) -> Result<String, Error> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => Error::DocumentNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::Read {
            path: path.to_path_buf(),
            source,
        },
    })
}
