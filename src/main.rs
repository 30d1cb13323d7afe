//! # bin-flatten
//!
//! A small CLI tool that flattens build output trees.
//!
//! For every immediate subdirectory of a root folder it moves the contents of
//! the subdirectory's `bin/` folder up one level, deletes `.pdb` debug symbol
//! files, and removes the emptied `bin/` folder.
//!
//! ## Features
//!
//! - Per-directory outcome reporting (flattened, skipped, failed)
//! - Explicit collision policy (overwrite, skip, fail)
//! - Optional fail-fast mode
//! - Dry-run mode for safe previewing
//! - Interactive selection of the bin folders to flatten
//! - Structured log events and a JSON report
//! - Persistent configuration via `~/.config/bin-flatten/config.toml`
//!
//! ## Usage
//!
//! ```bash
//! # Flatten the directory holding the executable
//! bin-flatten
//!
//! # Flatten another directory, previewing first
//! bin-flatten ./dist --dry-run
//!
//! # Refuse to overwrite anything
//! bin-flatten ./dist --on-collision fail --fail-fast
//! ```

mod cli;

use std::process::exit;

use anyhow::{Result, bail};
use bin_flatten::{
    candidate::{Candidate, Candidates},
    config::FileConfig,
    flattener::Flattener,
    logging,
    output::JsonOutput,
    scanner::{Discovery, SkipReason},
};
use clap::Parser;
use cli::Cli;
use colored::Colorize;

/// Entry point for the bin-flatten application.
///
/// Errors from [`inner_main`] are printed to stderr before exiting with a
/// non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err:#}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// This function:
/// 1. Parses command-line arguments and installs the log subscriber
/// 2. Loads the persistent configuration file (if present)
/// 3. Scans the root directory for bin folders
/// 4. Optionally lets the user pick which ones to flatten
/// 5. Flattens them (or plans it, in a dry run)
/// 6. Prints a summary, or a JSON document with `--json`
///
/// # Errors
///
/// Returns an error if the root cannot be listed, the config file is invalid,
/// the interactive prompt fails, or any directory failed to flatten.
fn inner_main() -> Result<()> {
    let args = Cli::parse();
    let json_mode = args.json();

    logging::init(args.verbosity())?;

    let file_config = FileConfig::load()?;

    let root = args.root(&file_config)?;
    let flatten_options = args.flatten_options(&file_config)?;
    let execution_options = args.execution_options(&file_config);

    // --json is incompatible with --interactive
    if json_mode && execution_options.interactive {
        bail!("--json and --interactive cannot be used together");
    }

    let interactive = execution_options.interactive;
    let flattener =
        Flattener::new(flatten_options, execution_options).with_quiet(json_mode || args.quiet());

    let mut discoveries = flattener.scan(&root)?;

    let candidates: Candidates = discoveries
        .iter()
        .filter_map(Discovery::as_candidate)
        .cloned()
        .collect::<Vec<_>>()
        .into();

    if !json_mode {
        println!(
            "Found {} bin directories under {}",
            candidates.len(),
            root.display()
        );

        if candidates.is_empty() {
            println!("{}", "✨ No bin directories found!".green());
        } else {
            candidates.print_summary();
        }
    }

    if interactive && !candidates.is_empty() {
        let selected = candidates.interactive_selection()?;

        if selected.is_empty() {
            println!("{}", "✨ No bin directories selected!".green());
            return Ok(());
        }

        discoveries = deselect(discoveries, &selected);
    }

    if !json_mode {
        println!();
    }

    let report = flattener.flatten_discoveries(&root, discoveries);

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOutput::from_report(&report))?
        );
    } else {
        report.print_summary();

        if !report.has_failures() {
            let done = if report.dry_run {
                "🧪 Dry run complete: nothing was moved or deleted."
            } else {
                "✅ Done: moved binaries up from bin and deleted debug symbols."
            };
            println!("\n{}", done.green());
        }
    }

    let failed = report.summary().failed;
    if failed > 0 {
        bail!("{failed} directories could not be flattened");
    }

    Ok(())
}

/// Turn every candidate the user did not select into a skip.
fn deselect(discoveries: Vec<Discovery>, selected: &[Candidate]) -> Vec<Discovery> {
    discoveries
        .into_iter()
        .map(|discovery| match discovery {
            Discovery::Candidate(candidate)
                if !selected.iter().any(|s| s.root_path == candidate.root_path) =>
            {
                Discovery::Skipped {
                    path: candidate.root_path,
                    reason: SkipReason::Deselected,
                }
            }
            other => other,
        })
        .collect()
}
