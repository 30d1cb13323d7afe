//! Candidate directories and the entries of their bin folders.
//!
//! ## Main Parts
//!
//! - [`Candidate`] - An immediate child of the root that holds a bin folder
//! - [`Candidates`] - A collection of candidates with selection and summary helpers
//! - [`BinEntry`] - One entry found directly inside a bin folder
//! - [`EntryKind`] - How an entry is disposed of (delete or relocate)

#[allow(clippy::module_inception)]
pub mod candidate;
pub mod candidates;
pub mod entry;

pub use candidate::Candidate;
pub use candidates::Candidates;
pub use entry::{BinEntry, EntryKind};
