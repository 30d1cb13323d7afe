//! A candidate directory holding a bin folder.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    fs,
    path::PathBuf,
};

use anyhow::{Context, Result};

use crate::{
    candidate::{BinEntry, EntryKind},
    config::FlattenOptions,
    utils::entry_size,
};

/// An immediate child of the root directory that contains a bin folder.
#[derive(Clone, Debug)]
pub struct Candidate {
    /// The candidate directory itself; relocated entries land here
    pub root_path: PathBuf,

    /// The bin folder inside the candidate
    pub bin_path: PathBuf,

    /// Total size of the bin folder in bytes, measured at scan time
    pub bin_size: u64,
}

impl Candidate {
    /// Create a new candidate.
    #[must_use]
    pub const fn new(root_path: PathBuf, bin_path: PathBuf, bin_size: u64) -> Self {
        Self {
            root_path,
            bin_path,
            bin_size,
        }
    }

    /// Display name of the candidate (its directory name).
    #[must_use]
    pub fn name(&self) -> String {
        match self.root_path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => self.root_path.display().to_string(),
        }
    }

    /// List the entries found directly inside the bin folder.
    ///
    /// Entries are returned sorted by file name, each classified according
    /// to `options`. The listing is not recursive: nested directories are
    /// returned as single [`EntryKind::Directory`] entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the bin folder or one of its entries cannot be read.
    pub fn entries(&self, options: &FlattenOptions) -> Result<Vec<BinEntry>> {
        let read_dir = fs::read_dir(&self.bin_path)
            .with_context(|| format!("Failed to read {}", self.bin_path.display()))?;

        let mut entries = Vec::new();

        for entry in read_dir {
            let entry =
                entry.with_context(|| format!("Failed to read {}", self.bin_path.display()))?;
            let path = entry.path();
            let file_type = entry
                .file_type()
                .with_context(|| format!("Failed to inspect {}", path.display()))?;
            let name = entry.file_name();
            let kind = EntryKind::classify(&name, file_type.is_dir(), options);
            let size = entry_size(&path);

            entries.push(BinEntry {
                path,
                name,
                kind,
                size,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(entries)
    }
}

impl Display for Candidate {
    /// Format as `📁 name (path/to/bin)`.
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "📁 {} ({})", self.name(), self.bin_path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_candidate(tmp: &TempDir, name: &str) -> Candidate {
        let root = tmp.path().join(name);
        let bin = root.join("bin");
        fs::create_dir_all(&bin).unwrap();

        Candidate::new(root, bin, 0)
    }

    #[test]
    fn test_name_is_directory_name() {
        let tmp = TempDir::new().unwrap();
        let candidate = create_candidate(&tmp, "x64-windows");

        assert_eq!(candidate.name(), "x64-windows");
    }

    #[test]
    fn test_entries_are_sorted_and_classified() {
        let tmp = TempDir::new().unwrap();
        let candidate = create_candidate(&tmp, "app");
        fs::write(candidate.bin_path.join("b.exe"), b"exe").unwrap();
        fs::write(candidate.bin_path.join("a.PDB"), b"symbols").unwrap();
        fs::create_dir(candidate.bin_path.join("c")).unwrap();

        let entries = candidate.entries(&FlattenOptions::default()).unwrap();
        let summary: Vec<_> = entries
            .iter()
            .map(|e| (e.name.to_string_lossy().into_owned(), e.kind, e.size))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("a.PDB".to_string(), EntryKind::DebugSymbol, 7),
                ("b.exe".to_string(), EntryKind::File, 3),
                ("c".to_string(), EntryKind::Directory, 0),
            ]
        );
    }

    #[test]
    fn test_entries_of_missing_bin_errors() {
        let tmp = TempDir::new().unwrap();
        let candidate = Candidate::new(tmp.path().join("gone"), tmp.path().join("gone/bin"), 0);

        let err = candidate.entries(&FlattenOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_display_contains_name_and_bin_path() {
        let tmp = TempDir::new().unwrap();
        let candidate = create_candidate(&tmp, "arm64-linux");
        let shown = candidate.to_string();

        assert!(shown.contains("arm64-linux"));
        assert!(shown.contains("bin"));
    }
}
