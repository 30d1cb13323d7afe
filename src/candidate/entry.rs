//! Bin folder entries and their classification.

use std::{
    ffi::OsString,
    fmt::{Display, Formatter, Result},
    path::PathBuf,
};

use serde::Serialize;

use crate::config::FlattenOptions;

/// Disposal class of an entry found inside a bin folder.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A file whose name ends in a debug extension; it is deleted
    DebugSymbol,

    /// Any other file (or symlink); it is relocated one level up
    File,

    /// A nested directory; it is relocated one level up as a whole
    Directory,
}

impl EntryKind {
    /// Classify an entry by its name and whether it is a directory.
    ///
    /// Directories are never treated as debug symbols, even when their
    /// name carries a debug extension.
    #[must_use]
    pub fn classify(name: &std::ffi::OsStr, is_dir: bool, options: &FlattenOptions) -> Self {
        if is_dir {
            Self::Directory
        } else if options.is_debug_symbol(name) {
            Self::DebugSymbol
        } else {
            Self::File
        }
    }
}

impl Display for EntryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let label = match self {
            Self::DebugSymbol => "debug symbol",
            Self::File => "file",
            Self::Directory => "directory",
        };

        write!(f, "{label}")
    }
}

/// An entry located directly inside a bin folder.
#[derive(Clone, Debug)]
pub struct BinEntry {
    /// Full path of the entry inside the bin folder
    pub path: PathBuf,

    /// File name of the entry, reused as the relocation target name
    pub name: OsString,

    /// Disposal class
    pub kind: EntryKind,

    /// Size in bytes (recursive for directories)
    pub size: u64,
}
