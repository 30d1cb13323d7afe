//! Bin folder flattening.
//!
//! This module provides the core logic of the tool: for every candidate it
//! deletes debug symbols, relocates every other entry of the bin folder one
//! level up, and removes the emptied bin folder. Each step is recorded in the
//! returned [`FlattenReport`] and emitted as a structured log event.

use std::{fs, path::Path};

use anyhow::{Result, anyhow, bail};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, warn};

use crate::{
    candidate::{BinEntry, Candidate, EntryKind},
    config::{ExecutionOptions, FlattenOptions, validate_bin_name},
    relocate::{self, RelocateOutcome},
    report::{Action, CandidateOutcome, FlattenReport, Status},
    scanner::{Discovery, Scanner},
};

/// Flattens the bin folders of the candidates found under a root directory.
pub struct Flattener {
    /// Flattening rules (bin name, debug extensions, collision policy)
    options: FlattenOptions,

    /// Execution mode (dry run, trash)
    execution: ExecutionOptions,

    /// When `true`, no progress bar or per-action console lines are printed
    quiet: bool,
}

impl Flattener {
    /// Create a new flattener.
    #[must_use]
    pub const fn new(options: FlattenOptions, execution: ExecutionOptions) -> Self {
        Self {
            options,
            execution,
            quiet: false,
        }
    }

    /// Enable or disable quiet mode.
    ///
    /// Quiet mode is required for `--json` output so that only the final
    /// document is printed to stdout. Log events are still emitted.
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Classify every immediate child of `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured bin name is not a plain folder
    /// name, or if `root` cannot be listed.
    pub fn scan(&self, root: &Path) -> Result<Vec<Discovery>> {
        validate_bin_name(&self.options.bin_name)?;

        Scanner::new(self.options.bin_name.as_str()).scan(root)
    }

    /// Scan `root` and flatten every candidate found under it.
    ///
    /// # Errors
    ///
    /// Returns an error only if the bin name is invalid or `root` cannot be
    /// listed. Failures inside a candidate are recorded in the report instead.
    pub fn flatten_root(&self, root: &Path) -> Result<FlattenReport> {
        let discoveries = self.scan(root)?;

        Ok(self.flatten_discoveries(root, discoveries))
    }

    /// Process already classified children of `root`, in order.
    ///
    /// Skipped children produce a skip outcome. With `fail_fast`, processing
    /// stops after the first failed candidate and the report is marked as
    /// aborted; the remaining children are left untouched and unreported.
    ///
    /// # Panics
    ///
    /// This method may panic if the progress bar template string is invalid,
    /// though this should not occur as the template is hardcoded and valid.
    pub fn flatten_discoveries(&self, root: &Path, discoveries: Vec<Discovery>) -> FlattenReport {
        let mut report = FlattenReport::new(root.to_path_buf(), self.execution.dry_run);

        let progress = if self.quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(discoveries.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                    .unwrap()
                    .progress_chars("█▉▊▋▌▍▎▏  "),
            );
            pb
        };

        for discovery in discoveries {
            let outcome = match discovery {
                Discovery::Skipped { path, reason } => {
                    info!(
                        event = "skip",
                        path = %path.display(),
                        reason = %reason,
                        "skipping directory"
                    );
                    self.say(&progress, || {
                        format!("✨ {}: {reason}, skipping.", path.display())
                            .dimmed()
                            .to_string()
                    });
                    CandidateOutcome::skipped(path, reason)
                }
                Discovery::Candidate(candidate) => {
                    progress.set_message(candidate.name());
                    self.flatten_candidate_with(&candidate, &progress)
                }
            };

            progress.inc(1);

            let failed = outcome.is_failed();
            report.outcomes.push(outcome);

            if failed && self.options.fail_fast {
                warn!(event = "abort", "stopping after first failure");
                report.aborted = true;
                break;
            }
        }

        progress.finish_and_clear();

        let summary = report.summary();
        info!(
            event = "summary",
            root = %root.display(),
            dry_run = report.dry_run,
            flattened = summary.flattened,
            skipped = summary.skipped,
            failed = summary.failed,
            relocated = summary.relocated,
            deleted = summary.deleted,
            reclaimed_bytes = summary.reclaimed_bytes,
            "flatten complete"
        );

        report
    }

    /// Flatten a single candidate.
    ///
    /// Never fails: errors end the processing of the candidate and are
    /// returned as [`Status::Failed`], together with the actions already
    /// performed (which are not rolled back).
    #[must_use]
    pub fn flatten_candidate(&self, candidate: &Candidate) -> CandidateOutcome {
        self.flatten_candidate_with(candidate, &ProgressBar::hidden())
    }

    fn flatten_candidate_with(
        &self,
        candidate: &Candidate,
        progress: &ProgressBar,
    ) -> CandidateOutcome {
        let mut actions = Vec::new();

        let status = match self.process(candidate, &mut actions, progress) {
            Ok(leftovers) => Status::Flattened { leftovers },
            Err(e) => {
                let reason = format!("{e:#}");
                error!(
                    event = "failed",
                    path = %candidate.root_path.display(),
                    error = %reason,
                    "failed to flatten directory"
                );
                self.say(progress, || {
                    format!("❌ {}: {reason}", candidate.root_path.display())
                        .red()
                        .to_string()
                });
                Status::Failed { reason }
            }
        };

        CandidateOutcome {
            path: candidate.root_path.clone(),
            status,
            actions,
        }
    }

    /// Run the delete / relocate / remove steps, returning the number of
    /// entries left in the bin folder.
    fn process(
        &self,
        candidate: &Candidate,
        actions: &mut Vec<Action>,
        progress: &ProgressBar,
    ) -> Result<usize> {
        let entries = candidate.entries(&self.options)?;
        let mut leftovers = 0;

        for entry in entries {
            if entry.kind == EntryKind::DebugSymbol {
                actions.push(self.delete(&entry, progress)?);
                continue;
            }

            let action = self.relocate(candidate, &entry, progress)?;
            if matches!(action, Action::Keep { .. }) {
                leftovers += 1;
            }
            actions.push(action);
        }

        if leftovers > 0 {
            warn!(
                event = "keep_dir",
                path = %candidate.bin_path.display(),
                leftovers,
                "bin directory kept, entries collided with existing ones"
            );
            self.say(progress, || {
                format!(
                    "📌 Keeping {} ({leftovers} entries left after collisions)",
                    candidate.bin_path.display()
                )
                .yellow()
                .to_string()
            });
            return Ok(leftovers);
        }

        if !self.execution.dry_run {
            fs::remove_dir(&candidate.bin_path).map_err(|e| {
                anyhow!(
                    "Failed to remove bin directory {}: {e}",
                    candidate.bin_path.display()
                )
            })?;
        }

        info!(
            event = "remove_dir",
            path = %candidate.bin_path.display(),
            dry_run = self.execution.dry_run,
            "removed bin directory"
        );
        self.say(progress, || {
            format!("Removing bin directory: {}", candidate.bin_path.display())
        });
        actions.push(Action::RemoveDir {
            path: candidate.bin_path.clone(),
        });

        Ok(0)
    }

    fn delete(&self, entry: &BinEntry, progress: &ProgressBar) -> Result<Action> {
        let trashed = self.execution.use_trash;

        if !self.execution.dry_run {
            if trashed {
                trash::delete(&entry.path).map_err(|e| {
                    anyhow!("Failed to move {} to trash: {e}", entry.path.display())
                })?;
            } else {
                fs::remove_file(&entry.path)
                    .map_err(|e| anyhow!("Failed to delete {}: {e}", entry.path.display()))?;
            }
        }

        info!(
            event = "delete",
            path = %entry.path.display(),
            size = entry.size,
            trashed,
            dry_run = self.execution.dry_run,
            "deleted debug symbol"
        );
        self.say(progress, || {
            format!("Deleting: {}", entry.path.display())
                .red()
                .to_string()
        });

        Ok(Action::Delete {
            path: entry.path.clone(),
            size: entry.size,
            trashed,
        })
    }

    fn relocate(
        &self,
        candidate: &Candidate,
        entry: &BinEntry,
        progress: &ProgressBar,
    ) -> Result<Action> {
        let destination = candidate.root_path.join(&entry.name);

        // An entry named like the bin folder would land on the folder itself.
        if destination == candidate.bin_path || destination == entry.path {
            bail!(
                "Cannot relocate {}: it has the same name as its bin directory",
                entry.path.display()
            );
        }

        let policy = self.options.on_collision;
        let outcome = if self.execution.dry_run {
            relocate::plan(&entry.path, &destination, policy)?
        } else {
            relocate::relocate(&entry.path, &destination, policy)?
        };

        match outcome {
            RelocateOutcome::Moved { replaced } => {
                info!(
                    event = "relocate",
                    from = %entry.path.display(),
                    to = %destination.display(),
                    kind = %entry.kind,
                    size = entry.size,
                    replaced,
                    dry_run = self.execution.dry_run,
                    "relocated entry"
                );
                self.say(progress, || {
                    format!(
                        "Moving: {} -> {}",
                        entry.path.display(),
                        destination.display()
                    )
                });

                Ok(Action::Relocate {
                    from: entry.path.clone(),
                    to: destination,
                    size: entry.size,
                    replaced,
                })
            }
            RelocateOutcome::Kept => {
                warn!(
                    event = "collision",
                    path = %entry.path.display(),
                    conflict = %destination.display(),
                    policy = %policy,
                    "destination exists, leaving entry in place"
                );
                self.say(progress, || {
                    format!(
                        "Keeping: {} ({} already exists)",
                        entry.path.display(),
                        destination.display()
                    )
                    .yellow()
                    .to_string()
                });

                Ok(Action::Keep {
                    path: entry.path.clone(),
                    conflict: destination,
                })
            }
        }
    }

    /// Print a console line above the progress bar unless quiet.
    fn say(&self, progress: &ProgressBar, line: impl FnOnce() -> String) {
        if !self.quiet {
            let line = line();
            progress.suspend(|| println!("{line}"));
        }
    }
}
