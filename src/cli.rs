//! Command-line interface definition.
//!
//! Every option can also come from the config file; the accessor methods on
//! [`Cli`] apply the layering **CLI argument > config file > default**.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bin_flatten::config::{
    CollisionPolicy, ExecutionOptions, FileConfig, FlattenOptions,
    file::expand_tilde,
    flatten::{DEFAULT_BIN_NAME, DEFAULT_DEBUG_EXTENSIONS, normalize_extensions},
    validate_bin_name,
};
use clap::{ArgAction, Parser};

#[derive(Parser)]
struct FlattenArgs {
    /// Name of the folder to flatten inside each directory [default: bin]
    #[arg(long, value_name = "NAME")]
    bin_name: Option<String>,

    /// Extension of debug symbol files to delete; repeatable [default: pdb]
    #[arg(long = "debug-ext", value_name = "EXT", action = ArgAction::Append)]
    debug_extensions: Vec<String>,

    /// What to do when a relocated entry already exists one level up
    #[arg(long, value_enum, value_name = "POLICY")]
    on_collision: Option<CollisionPolicy>,

    /// Stop at the first directory that fails instead of continuing
    #[arg(long)]
    fail_fast: bool,
}

#[derive(Parser)]
struct ExecutionArgs {
    /// Only report what would be moved and deleted
    #[arg(long)]
    dry_run: bool,

    /// Choose which bin folders to flatten
    #[arg(short = 'i', long)]
    interactive: bool,

    /// Send debug symbols to the system trash instead of deleting them
    #[arg(long)]
    trash: bool,
}

#[derive(Parser)]
struct OutputArgs {
    /// Print a single JSON report to stdout
    #[arg(long)]
    json: bool,

    /// Don't print a line per moved or deleted entry
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Parser)]
#[command(name = "bin-flatten", version)]
#[command(
    about = "Move the contents of every <dir>/bin/ up one level, drop .pdb files and remove the emptied bin/ folders"
)]
pub(crate) struct Cli {
    /// The root directory whose subdirectories are flattened
    /// [default: the directory containing this executable]
    dir: Option<PathBuf>,

    /// Flattening rules
    #[command(flatten)]
    flatten: FlattenArgs,

    /// Execution options
    #[command(flatten)]
    execution: ExecutionArgs,

    /// Output options
    #[command(flatten)]
    output: OutputArgs,
}

impl Cli {
    pub(crate) const fn json(&self) -> bool {
        self.output.json
    }

    pub(crate) const fn quiet(&self) -> bool {
        self.output.quiet
    }

    pub(crate) const fn verbosity(&self) -> u8 {
        self.output.verbose
    }

    /// Resolve the root directory.
    ///
    /// Falls back to the directory holding the running executable when
    /// neither the CLI nor the config file names one.
    pub(crate) fn root(&self, config: &FileConfig) -> Result<PathBuf> {
        if let Some(dir) = &self.dir {
            return Ok(dir.clone());
        }

        if let Some(dir) = &config.dir {
            return Ok(expand_tilde(dir));
        }

        let exe = std::env::current_exe().context("Failed to locate the running executable")?;
        exe.parent()
            .map(PathBuf::from)
            .with_context(|| format!("{} has no parent directory", exe.display()))
    }

    /// Resolve the flattening rules.
    ///
    /// Fails when the resulting bin folder name is not a single plain name.
    pub(crate) fn flatten_options(&self, config: &FileConfig) -> Result<FlattenOptions> {
        let file = &config.flatten;

        let bin_name = self
            .flatten
            .bin_name
            .clone()
            .or_else(|| file.bin_name.clone())
            .unwrap_or_else(|| DEFAULT_BIN_NAME.to_string());
        validate_bin_name(&bin_name)?;

        let debug_extensions = if !self.flatten.debug_extensions.is_empty() {
            normalize_extensions(&self.flatten.debug_extensions)
        } else if let Some(extensions) = &file.debug_extensions {
            normalize_extensions(extensions)
        } else {
            normalize_extensions(DEFAULT_DEBUG_EXTENSIONS)
        };

        Ok(FlattenOptions {
            bin_name,
            debug_extensions,
            on_collision: self
                .flatten
                .on_collision
                .or(file.on_collision)
                .unwrap_or_default(),
            fail_fast: self.flatten.fail_fast || file.fail_fast.unwrap_or(false),
        })
    }

    pub(crate) fn execution_options(&self, config: &FileConfig) -> ExecutionOptions {
        let file = &config.execution;

        ExecutionOptions {
            dry_run: self.execution.dry_run || file.dry_run.unwrap_or(false),
            interactive: self.execution.interactive || file.interactive.unwrap_or(false),
            use_trash: self.execution.trash || file.use_trash.unwrap_or(false),
        }
    }
}
