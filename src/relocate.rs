//! Moving entries out of a bin folder.
//!
//! Relocation is a rename when source and destination share a filesystem,
//! and a recursive copy followed by removal of the source otherwise. Existing
//! destinations are handled according to a [`CollisionPolicy`]. A destination
//! is only ever replaced by an entry of the same kind (file by file, directory
//! by directory), and the old destination is kept aside until the new entry
//! is in place.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use walkdir::WalkDir;

use crate::config::CollisionPolicy;

/// Result of a single relocation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RelocateOutcome {
    /// The entry now lives at the destination
    Moved {
        /// Whether an existing destination was replaced
        replaced: bool,
    },

    /// The destination existed and the entry was left where it was
    Kept,
}

/// Check what relocating `src` onto `dst` would do, without touching anything.
///
/// # Errors
///
/// Returns an error when `dst` exists and `policy` is [`CollisionPolicy::Fail`],
/// when `policy` is [`CollisionPolicy::Overwrite`] but `src` and `dst` are of
/// different kinds (a file and a directory), or when either path cannot be
/// inspected.
pub fn plan(src: &Path, dst: &Path, policy: CollisionPolicy) -> Result<RelocateOutcome> {
    if src == dst {
        bail!("{} cannot be relocated onto itself", src.display());
    }

    let Some(existing) = inspect(dst)? else {
        return Ok(RelocateOutcome::Moved { replaced: false });
    };

    match policy {
        CollisionPolicy::Skip => Ok(RelocateOutcome::Kept),
        CollisionPolicy::Fail => bail!(
            "Destination {} already exists (on-collision: {policy})",
            dst.display()
        ),
        CollisionPolicy::Overwrite => {
            let incoming = fs::symlink_metadata(src)
                .with_context(|| format!("Failed to inspect {}", src.display()))?;

            if incoming.is_dir() != existing.is_dir() {
                bail!(
                    "Refusing to replace {} {} with {} {}",
                    kind_label(&existing),
                    dst.display(),
                    kind_label(&incoming),
                    src.display()
                );
            }

            Ok(RelocateOutcome::Moved { replaced: true })
        }
    }
}

/// Move `src` to `dst`, resolving an existing `dst` with `policy`.
///
/// Files, symlinks and whole directories are supported.
///
/// # Errors
///
/// Returns every error [`plan`] reports, and an error if the move itself
/// fails. When a replacing move fails, the previous destination is restored.
pub fn relocate(src: &Path, dst: &Path, policy: CollisionPolicy) -> Result<RelocateOutcome> {
    let outcome = plan(src, dst, policy)?;

    match outcome {
        RelocateOutcome::Moved { replaced: false } => move_path(src, dst)?,
        RelocateOutcome::Moved { replaced: true } => replace(src, dst)?,
        RelocateOutcome::Kept => {}
    }

    Ok(outcome)
}

fn inspect(path: &Path) -> Result<Option<fs::Metadata>> {
    match fs::symlink_metadata(path) {
        Ok(metadata) => Ok(Some(metadata)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to inspect {}", path.display())),
    }
}

fn kind_label(metadata: &fs::Metadata) -> &'static str {
    if metadata.is_dir() {
        "directory"
    } else {
        "file"
    }
}

/// Replace an existing `dst` of the same kind as `src`.
///
/// A file is renamed straight over the old one. Otherwise the old destination
/// is parked next to it, and only removed once `src` is in place.
fn replace(src: &Path, dst: &Path) -> Result<()> {
    let dst_is_dir = fs::symlink_metadata(dst)
        .with_context(|| format!("Failed to inspect {}", dst.display()))?
        .is_dir();

    if !dst_is_dir {
        match fs::rename(src, dst) {
            Ok(()) => return Ok(()),
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {}
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to move {} to {}", src.display(), dst.display())
                });
            }
        }
    }

    let backup = backup_path(dst)?;
    fs::rename(dst, &backup).with_context(|| {
        format!("Failed to set aside {} as {}", dst.display(), backup.display())
    })?;

    if let Err(e) = move_path(src, dst) {
        if let Err(restore_err) = restore(&backup, dst) {
            bail!(
                "{e:#}; restoring {} from {} also failed: {restore_err:#}",
                dst.display(),
                backup.display()
            );
        }
        return Err(e);
    }

    remove_path(&backup)
}

fn backup_path(dst: &Path) -> Result<PathBuf> {
    let Some(name) = dst.file_name() else {
        bail!("{} has no file name", dst.display());
    };

    let backup = dst.with_file_name(format!(
        ".{}.bin-flatten-old-{}",
        name.to_string_lossy(),
        std::process::id()
    ));

    if inspect(&backup)?.is_some() {
        bail!("Leftover {} is in the way", backup.display());
    }

    Ok(backup)
}

/// Put the parked destination back, dropping whatever a failed move left.
fn restore(backup: &Path, dst: &Path) -> Result<()> {
    if inspect(dst)?.is_some() {
        remove_path(dst)?;
    }

    fs::rename(backup, dst)
        .with_context(|| format!("Failed to move {} back to {}", backup.display(), dst.display()))
}

fn remove_path(path: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .with_context(|| format!("Failed to inspect {}", path.display()))?;

    let removed = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    removed.with_context(|| format!("Failed to remove {}", path.display()))
}

fn move_path(src: &Path, dst: &Path) -> Result<()> {
    match fs::rename(src, dst) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => copy_then_remove(src, dst),
        Err(e) => Err(e).with_context(|| {
            format!("Failed to move {} to {}", src.display(), dst.display())
        }),
    }
}

/// Fallback for moves across filesystems.
fn copy_then_remove(src: &Path, dst: &Path) -> Result<()> {
    let metadata =
        fs::symlink_metadata(src).with_context(|| format!("Failed to inspect {}", src.display()))?;

    if !metadata.is_dir() {
        fs::copy(src, dst).with_context(|| {
            format!("Failed to copy {} to {}", src.display(), dst.display())
        })?;
        fs::remove_file(src).with_context(|| format!("Failed to remove {}", src.display()))?;
        return Ok(());
    }

    for entry in WalkDir::new(src) {
        let entry = entry.with_context(|| format!("Failed to walk {}", src.display()))?;
        let target: PathBuf = dst.join(entry.path().strip_prefix(src)?);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
        } else {
            fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    entry.path().display(),
                    target.display()
                )
            })?;
        }
    }

    fs::remove_dir_all(src).with_context(|| format!("Failed to remove {}", src.display()))
}
