use crate::format::Format;
use crate::parser::filter::matches_format;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Find convertible files in a directory. If recursive is true, use walkdir; otherwise list files.
///
/// When `only` is given, files of other formats are skipped. Results are sorted
/// so batch runs are reproducible.
pub fn find_supported_files(
    dir: &Path,
    recursive: bool,
    only: Option<Format>,
) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = Vec::new();

    if recursive {
        for entry in WalkDir::new(dir) {
            let entry = entry?;
            let path = entry.path();
            if matches_format(path, only) {
                files.push(path.to_path_buf());
            }
        }
    } else {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if matches_format(&path, only) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}
