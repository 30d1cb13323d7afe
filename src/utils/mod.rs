//! Utility functions and helpers.
//!
//! Small filesystem helpers shared by the scanner and the flattener.

use std::path::Path;

use walkdir::WalkDir;

/// Calculate the total size of a file, or of a directory and all its contents.
///
/// Entries that cannot be read (permission issues, broken symbolic links,
/// files removed while walking) are skipped rather than reported.
#[must_use]
pub fn entry_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_entry_size_of_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("app.exe");
        fs::write(&file, b"12345").unwrap();

        assert_eq!(entry_size(&file), 5);
    }

    #[test]
    fn test_entry_size_of_nested_directory() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("extra").join("deeper");
        fs::create_dir_all(&nested).unwrap();
        fs::write(tmp.path().join("extra").join("a.dll"), b"abc").unwrap();
        fs::write(nested.join("b.dll"), b"defg").unwrap();

        assert_eq!(entry_size(&tmp.path().join("extra")), 7);
    }

    #[test]
    fn test_entry_size_of_missing_path_is_zero() {
        let tmp = TempDir::new().unwrap();

        assert_eq!(entry_size(&tmp.path().join("missing")), 0);
    }
}
