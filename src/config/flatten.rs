//! Flattening rules.
//!
//! This module defines which folder gets flattened, which entries count as
//! debug symbols, and what happens when a relocated entry collides with an
//! existing one.

use std::{
    ffi::OsStr,
    fmt::{Display, Formatter, Result},
    path::{Component, Path},
};

use anyhow::bail;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Name of the folder whose contents are moved up one level.
pub const DEFAULT_BIN_NAME: &str = "bin";

/// Extensions (without the leading dot) that mark a debug symbol file.
pub const DEFAULT_DEBUG_EXTENSIONS: &[&str] = &["pdb"];

/// What to do when an entry is relocated onto a path that already exists.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Replace an existing entry of the same kind (file or directory)
    #[default]
    Overwrite,

    /// Leave the entry inside the bin folder, which is then kept
    Skip,

    /// Fail the candidate being processed
    Fail,
}

impl Display for CollisionPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let name = match self {
            Self::Overwrite => "overwrite",
            Self::Skip => "skip",
            Self::Fail => "fail",
        };

        write!(f, "{name}")
    }
}

/// Rules applied to every candidate directory during a run.
#[derive(Clone, Debug)]
pub struct FlattenOptions {
    /// Name of the nested folder to flatten (`bin` by default)
    pub bin_name: String,

    /// Lowercased debug symbol extensions, without leading dots
    pub debug_extensions: Vec<String>,

    /// Behavior when the relocation target already exists
    pub on_collision: CollisionPolicy,

    /// Stop the run after the first failed candidate
    pub fail_fast: bool,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            bin_name: DEFAULT_BIN_NAME.to_string(),
            debug_extensions: normalize_extensions(DEFAULT_DEBUG_EXTENSIONS),
            on_collision: CollisionPolicy::default(),
            fail_fast: false,
        }
    }
}

impl FlattenOptions {
    /// Check whether a file name ends with one of the debug extensions.
    ///
    /// The comparison is case-insensitive, so `App.PDB` matches `pdb`.
    #[must_use]
    pub fn is_debug_symbol(&self, name: &OsStr) -> bool {
        let name = name.to_string_lossy().to_lowercase();

        self.debug_extensions.iter().any(|ext| {
            name.strip_suffix(ext.as_str())
                .is_some_and(|stem| stem.ends_with('.'))
        })
    }
}

/// Check that `name` is a plain folder name.
///
/// The bin folder is joined onto every child of the root, so anything that
/// resolves elsewhere (`.`, `..`, an absolute path, a nested path) would
/// flatten the wrong directory.
///
/// # Errors
///
/// Returns an error describing why the name was rejected.
pub fn validate_bin_name(name: &str) -> anyhow::Result<()> {
    let mut components = Path::new(name).components();

    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == name => Ok(()),
        _ => bail!(
            "Invalid bin folder name {name:?}: expected a single folder name such as \"bin\""
        ),
    }
}

/// Lowercase extensions and strip any leading dots, dropping empty ones.
///
/// Accepts `"pdb"`, `".pdb"` and `"PDB"` alike.
#[must_use]
pub fn normalize_extensions<S: AsRef<str>>(extensions: &[S]) -> Vec<String> {
    extensions
        .iter()
        .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}
