use crate::format::Format;
use std::path::Path;

/// Return true if the file exists and has a .json, .yaml, .yml or .xml extension
pub fn is_supported_file(path: &Path) -> bool {
    path.is_file() && Format::from_path(path).is_some()
}

/// Return true if the file is supported and, when `only` is set, of that format
pub fn matches_format(path: &Path, only: Option<Format>) -> bool {
    match (Format::from_path(path), only) {
        (Some(found), Some(wanted)) => path.is_file() && found == wanted,
        (Some(_), None) => path.is_file(),
        (None, _) => false,
    }
}
