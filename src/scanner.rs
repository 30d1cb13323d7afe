//! Candidate discovery.
//!
//! This module lists the immediate children of a root directory and decides,
//! for each one, whether it is a candidate (a directory holding a bin folder)
//! or has to be skipped. The walk is exactly one level deep.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use crate::{candidate::Candidate, utils::entry_size};

/// Why a child of the root was not flattened.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The child is a file (or anything other than a directory)
    NotADirectory,

    /// The child is a directory without a bin folder
    NoBinFolder,

    /// The user left the candidate out of the interactive selection
    Deselected,
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let reason = match self {
            Self::NotADirectory => "not a directory",
            Self::NoBinFolder => "no bin directory",
            Self::Deselected => "not selected",
        };

        write!(f, "{reason}")
    }
}

/// Classification of one immediate child of the root directory.
#[derive(Clone, Debug)]
pub enum Discovery {
    /// A directory holding a bin folder
    Candidate(Candidate),

    /// Anything else, left untouched
    Skipped {
        /// Path of the skipped child
        path: PathBuf,

        /// Why it was skipped
        reason: SkipReason,
    },
}

impl Discovery {
    /// The candidate, if this child has a bin folder.
    #[must_use]
    pub const fn as_candidate(&self) -> Option<&Candidate> {
        match self {
            Self::Candidate(candidate) => Some(candidate),
            Self::Skipped { .. } => None,
        }
    }
}

/// One-level directory scanner for bin folders.
pub struct Scanner {
    /// Name of the folder to look for inside each child
    bin_name: String,
}

impl Scanner {
    /// Create a scanner looking for folders named `bin_name`.
    #[must_use]
    pub fn new(bin_name: impl Into<String>) -> Self {
        Self {
            bin_name: bin_name.into(),
        }
    }

    /// Classify every immediate child of `root`.
    ///
    /// Children are returned sorted by path so runs are deterministic.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` cannot be listed.
    pub fn scan(&self, root: &Path) -> Result<Vec<Discovery>> {
        let mut children = fs::read_dir(root)
            .with_context(|| format!("Failed to read root directory {}", root.display()))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()
            .with_context(|| format!("Failed to list root directory {}", root.display()))?;

        children.sort();

        debug!(
            event = "scan",
            root = %root.display(),
            children = children.len(),
            "listed root directory"
        );

        Ok(children.into_iter().map(|path| self.classify(path)).collect())
    }

    /// Classify a single child of the root.
    #[must_use]
    pub fn classify(&self, path: PathBuf) -> Discovery {
        if !path.is_dir() {
            return Discovery::Skipped {
                path,
                reason: SkipReason::NotADirectory,
            };
        }

        let bin_path = path.join(&self.bin_name);

        if !bin_path.is_dir() {
            return Discovery::Skipped {
                path,
                reason: SkipReason::NoBinFolder,
            };
        }

        let bin_size = entry_size(&bin_path);

        Discovery::Candidate(Candidate::new(path, bin_path, bin_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scan_classifies_children() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("app/bin")).unwrap();
        fs::write(root.join("app/bin/app.exe"), b"exe").unwrap();
        fs::create_dir_all(root.join("lib")).unwrap();
        fs::write(root.join("move_bins_up.txt"), b"notes").unwrap();

        let discoveries = Scanner::new("bin").scan(root).unwrap();

        assert_eq!(discoveries.len(), 3);

        let candidate = discoveries[0].as_candidate().unwrap();
        assert_eq!(candidate.root_path, root.join("app"));
        assert_eq!(candidate.bin_path, root.join("app/bin"));
        assert_eq!(candidate.bin_size, 3);

        assert!(matches!(
            &discoveries[1],
            Discovery::Skipped { reason: SkipReason::NoBinFolder, path } if path == &root.join("lib")
        ));
        assert!(matches!(
            &discoveries[2],
            Discovery::Skipped { reason: SkipReason::NotADirectory, .. }
        ));
    }

    #[test]
    fn test_bin_must_be_a_directory() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("svc")).unwrap();
        fs::write(tmp.path().join("svc/bin"), b"not a folder").unwrap();

        let discovery = Scanner::new("bin").classify(tmp.path().join("svc"));

        assert!(matches!(
            discovery,
            Discovery::Skipped { reason: SkipReason::NoBinFolder, .. }
        ));
    }

    #[test]
    fn test_custom_bin_name() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("app/out")).unwrap();

        let discovery = Scanner::new("out").classify(tmp.path().join("app"));

        assert!(discovery.as_candidate().is_some());
    }

    #[test]
    fn test_scan_missing_root_errors() {
        let tmp = TempDir::new().unwrap();

        let err = Scanner::new("bin")
            .scan(&tmp.path().join("missing"))
            .unwrap_err();

        assert!(err.to_string().contains("Failed to read root directory"));
    }

    #[test]
    fn test_scan_empty_root() {
        let tmp = TempDir::new().unwrap();

        assert!(Scanner::new("bin").scan(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::NotADirectory.to_string(), "not a directory");
        assert_eq!(SkipReason::NoBinFolder.to_string(), "no bin directory");
        assert_eq!(SkipReason::Deselected.to_string(), "not selected");
    }
}
