//! Execution configuration for flatten operations.
//!
//! This module defines the options that control how a flatten run is executed,
//! including dry-run mode and interactive selection.

/// Configuration for flatten execution behavior.
#[derive(Clone, Debug, Default)]
pub struct ExecutionOptions {
    /// Whether to run in dry-run mode (plan and report, touch nothing)
    pub dry_run: bool,

    /// Whether to use interactive candidate selection
    pub interactive: bool,

    /// Whether to move debug symbols to the system trash instead of permanently deleting them.
    ///
    /// Defaults to `false`. Set to `true` via the `--trash` CLI flag or
    /// `use_trash = true` in the config file.
    pub use_trash: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_options_default() {
        let exec_opts = ExecutionOptions::default();

        assert!(!exec_opts.dry_run);
        assert!(!exec_opts.interactive);
        assert!(!exec_opts.use_trash);
    }

    #[test]
    fn test_execution_options_clone() {
        let original = ExecutionOptions {
            dry_run: true,
            interactive: false,
            use_trash: true,
        };
        let cloned = original.clone();

        assert_eq!(original.dry_run, cloned.dry_run);
        assert_eq!(original.interactive, cloned.interactive);
        assert_eq!(original.use_trash, cloned.use_trash);
    }
}
