//! CSV Catalog Module
//! Recursive discovery of candidate dataset files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Find every `*.csv` file under `root`, recursively.
///
/// Paths come back sorted so repeated scans of the same tree are stable.
/// Unreadable subdirectories are skipped with a warning rather than
/// aborting the scan.
pub fn find_csv_files(root: impl AsRef<Path>) -> io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    walk(root.as_ref(), &mut found)?;
    found.sort();
    Ok(found)
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            if let Err(err) = walk(&path, found) {
                log::warn!("skipping unreadable directory {}: {}", path.display(), err);
            }
        } else if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        {
            found.push(path);
        }
    }
    Ok(())
}
