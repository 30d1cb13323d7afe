//! Per-candidate outcomes and the aggregated run report.
//!
//! Every action the flattener takes (or would take, in a dry run) is recorded
//! here, so callers and tests can inspect what happened without parsing
//! console output.

use std::path::PathBuf;

use colored::Colorize;
use humansize::{DECIMAL, format_size};
use serde::Serialize;

use crate::scanner::SkipReason;

/// A single filesystem action performed on a bin folder entry.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// A debug symbol file was deleted (or sent to the trash)
    Delete {
        /// Path of the deleted file
        path: PathBuf,
        /// Bytes reclaimed
        size: u64,
        /// Whether the file went to the system trash
        trashed: bool,
    },

    /// An entry was moved out of the bin folder
    Relocate {
        /// Original path inside the bin folder
        from: PathBuf,
        /// New path in the candidate directory
        to: PathBuf,
        /// Bytes moved
        size: u64,
        /// Whether an existing destination was replaced
        replaced: bool,
    },

    /// An entry collided with an existing destination and was left in place
    Keep {
        /// Path of the entry, still inside the bin folder
        path: PathBuf,
        /// The destination that already existed
        conflict: PathBuf,
    },

    /// The emptied bin folder was removed
    RemoveDir {
        /// Path of the removed bin folder
        path: PathBuf,
    },
}

/// Final state of one child of the root directory.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Status {
    /// The bin folder was processed. With `leftovers > 0` some entries were
    /// kept because of collisions and the bin folder still exists.
    Flattened {
        /// Entries left inside the bin folder
        leftovers: usize,
    },

    /// The child was left untouched
    Skipped {
        /// Why it was skipped
        reason: SkipReason,
    },

    /// Processing stopped partway; earlier actions were not rolled back
    Failed {
        /// Error chain describing the failure
        reason: String,
    },
}

/// Outcome of processing one child of the root directory.
#[derive(Clone, Debug, Serialize)]
pub struct CandidateOutcome {
    /// Path of the child
    pub path: PathBuf,

    /// How processing ended
    #[serde(flatten)]
    pub status: Status,

    /// Actions performed, in order, including those before a failure
    pub actions: Vec<Action>,
}

impl CandidateOutcome {
    /// Outcome for a child that was not processed.
    #[must_use]
    pub const fn skipped(path: PathBuf, reason: SkipReason) -> Self {
        Self {
            path,
            status: Status::Skipped { reason },
            actions: Vec::new(),
        }
    }

    /// Whether processing this child failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self.status, Status::Failed { .. })
    }
}

/// Aggregated counters over a whole run.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize)]
pub struct Summary {
    /// Candidates whose bin folder was processed
    pub flattened: usize,
    /// Children left untouched
    pub skipped: usize,
    /// Candidates that failed
    pub failed: usize,
    /// Entries moved out of bin folders
    pub relocated: usize,
    /// Entries kept in place because of a collision
    pub kept: usize,
    /// Debug symbols deleted
    pub deleted: usize,
    /// Bin folders removed
    pub removed_dirs: usize,
    /// Bytes moved out of bin folders
    pub relocated_bytes: u64,
    /// Bytes reclaimed by deleting debug symbols
    pub reclaimed_bytes: u64,
}

/// Everything a flatten run did, returned to the caller.
#[derive(Clone, Debug, Serialize)]
pub struct FlattenReport {
    /// The root directory that was processed
    pub root: PathBuf,

    /// Whether this was a dry run (nothing was touched)
    pub dry_run: bool,

    /// Whether the run stopped early because of `fail_fast`
    pub aborted: bool,

    /// One outcome per processed child, in processing order
    pub outcomes: Vec<CandidateOutcome>,
}

impl FlattenReport {
    /// Create an empty report for `root`.
    #[must_use]
    pub const fn new(root: PathBuf, dry_run: bool) -> Self {
        Self {
            root,
            dry_run,
            aborted: false,
            outcomes: Vec::new(),
        }
    }

    /// Whether any candidate failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(CandidateOutcome::is_failed)
    }

    /// Outcomes of the candidates that failed.
    pub fn failures(&self) -> impl Iterator<Item = &CandidateOutcome> {
        self.outcomes.iter().filter(|o| o.is_failed())
    }

    /// Compute aggregated counters over all outcomes.
    #[must_use]
    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();

        for outcome in &self.outcomes {
            match outcome.status {
                Status::Flattened { .. } => summary.flattened += 1,
                Status::Skipped { .. } => summary.skipped += 1,
                Status::Failed { .. } => summary.failed += 1,
            }

            for action in &outcome.actions {
                match action {
                    Action::Delete { size, .. } => {
                        summary.deleted += 1;
                        summary.reclaimed_bytes += size;
                    }
                    Action::Relocate { size, .. } => {
                        summary.relocated += 1;
                        summary.relocated_bytes += size;
                    }
                    Action::Keep { .. } => summary.kept += 1,
                    Action::RemoveDir { .. } => summary.removed_dirs += 1,
                }
            }
        }

        summary
    }

    /// One `path: reason` line per failed candidate.
    fn failure_lines(&self) -> Vec<String> {
        self.failures()
            .filter_map(|outcome| match &outcome.status {
                Status::Failed { reason } => Some(format!("{}: {reason}", outcome.path.display())),
                _ => None,
            })
            .collect()
    }

    /// Print a colored summary of the run to stdout.
    ///
    /// Failed candidates are listed first, header included, on stderr.
    ///
    /// ```text
    /// 📊 Flatten Summary:
    ///   ✅ Flattened: 3 directories
    ///   ✨ Skipped: 1 entries
    ///   📦 Relocated: 12 entries (4.1 MB)
    ///   🗑️  Deleted: 5 debug symbols (18.2 MB reclaimed)
    /// ```
    pub fn print_summary(&self) {
        let summary = self.summary();

        let failures = self.failure_lines();
        if !failures.is_empty() {
            eprintln!("\n{}", "⚠️  Some errors occurred while flattening:".yellow());
            for line in failures {
                eprintln!("  {}", line.red());
            }
        }

        let title = if self.dry_run {
            "📊 Dry Run Summary:"
        } else {
            "📊 Flatten Summary:"
        };
        println!("\n{}", title.bold());

        println!(
            "  ✅ Flattened: {} directories",
            summary.flattened.to_string().green()
        );
        println!("  ✨ Skipped: {} entries", summary.skipped);

        if summary.failed > 0 {
            println!(
                "  ❌ Failed: {} directories",
                summary.failed.to_string().red()
            );
        }

        println!(
            "  📦 Relocated: {} entries ({})",
            summary.relocated.to_string().bright_white(),
            format_size(summary.relocated_bytes, DECIMAL)
        );
        println!(
            "  🗑️  Deleted: {} debug symbols ({} reclaimed)",
            summary.deleted.to_string().bright_white(),
            format_size(summary.reclaimed_bytes, DECIMAL)
                .bright_green()
                .bold()
        );

        if summary.kept > 0 {
            println!(
                "  📌 Kept in bin after collisions: {}",
                summary.kept.to_string().yellow()
            );
        }

        if self.aborted {
            println!(
                "  {}",
                "⛔ Stopped after the first failure (--fail-fast)".yellow()
            );
        }
    }
}
