//! Document id derivation.

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::settings::Fs;

/// Id of the index document for the file at `path`.
///
/// With `filename_as_id` the bare file name is used, otherwise the hex
/// SHA-256 of the full path, which stays stable across re-scans.
pub fn document_id(fs: &Fs, path: &Path) -> String {
    if fs.filename_as_id() {
        if let Some(name) = path.file_name() {
            return name.to_string_lossy().to_string();
        }
    }
    let mut hasher = Sha256::new();
    hasher.update(path.to_string_lossy().as_bytes());
    hex::encode(hasher.finalize())
}
