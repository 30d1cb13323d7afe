//! Collection management for candidate directories.

use anyhow::Result;
use colored::Colorize;
use humansize::{DECIMAL, format_size};
use inquire::MultiSelect;

use super::Candidate;

/// A collection of candidates discovered under a root directory.
#[derive(Clone, Debug, Default)]
pub struct Candidates(Vec<Candidate>);

impl From<Vec<Candidate>> for Candidates {
    fn from(candidates: Vec<Candidate>) -> Self {
        Self(candidates)
    }
}

impl IntoIterator for Candidates {
    type Item = Candidate;
    type IntoIter = std::vec::IntoIter<Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Candidates {
    /// Total size of every bin folder in the collection, in bytes.
    #[must_use]
    pub fn get_total_size(&self) -> u64 {
        self.0.iter().map(|c| c.bin_size).sum()
    }

    /// Number of candidates in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the collection holds no candidates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Present a multi-select prompt for choosing which candidates to flatten.
    ///
    /// All candidates are selected by default.
    ///
    /// # Errors
    ///
    /// This method can fail if the terminal doesn't support interactive input
    /// or the user cancels the prompt.
    pub fn interactive_selection(&self) -> Result<Vec<Candidate>> {
        let defaults: Vec<usize> = (0..self.0.len()).collect();

        let selected = MultiSelect::new("Select bin folders to flatten:", self.0.clone())
            .with_default(&defaults)
            .prompt()?;

        Ok(selected)
    }

    /// Print the discovered bin folders and their combined size.
    ///
    /// ```text
    ///   📁 x64-windows (1.2 MB)
    ///   📁 arm64-linux (900 kB)
    ///   💾 Total in bin folders: 2.1 MB
    /// ```
    pub fn print_summary(&self) {
        for candidate in &self.0 {
            println!(
                "  📁 {} ({})",
                candidate.name().bright_white(),
                format_size(candidate.bin_size, DECIMAL)
            );
        }

        println!(
            "  💾 Total in bin folders: {}",
            format_size(self.get_total_size(), DECIMAL)
                .bright_green()
                .bold()
        );
    }
}
