//! Configuration file support for persistent settings.
//!
//! This module provides support for loading configuration from a TOML file
//! located at `~/.config/bin-flatten/config.toml` (or the platform-specific
//! equivalent). Configuration file values serve as defaults that can be
//! overridden by CLI arguments.
//!
//! # Layering
//!
//! The precedence order is: **CLI argument > config file > hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! dir = "~/dist"
//!
//! [flatten]
//! bin_name = "bin"
//! debug_extensions = ["pdb"]
//! on_collision = "overwrite"   # or "skip" / "fail"
//! fail_fast = false
//!
//! [execution]
//! dry_run = false
//! interactive = false
//! use_trash = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::{CollisionPolicy, validate_bin_name};

/// Top-level configuration file structure.
///
/// All fields are `Option<T>` so we can detect which values are present in the
/// config file and apply layered configuration (CLI > config file > defaults).
#[derive(Deserialize, Default, Debug)]
pub struct FileConfig {
    /// Default root directory to flatten
    pub dir: Option<PathBuf>,

    /// Flattening rules
    #[serde(default)]
    pub flatten: FileFlattenConfig,

    /// Execution options
    #[serde(default)]
    pub execution: FileExecutionConfig,
}

/// Flattening rules from the configuration file.
#[derive(Deserialize, Default, Debug)]
pub struct FileFlattenConfig {
    /// Name of the folder to flatten
    pub bin_name: Option<String>,

    /// Debug symbol extensions to delete instead of relocating
    pub debug_extensions: Option<Vec<String>>,

    /// Collision policy (`"overwrite"`, `"skip"`, `"fail"`)
    pub on_collision: Option<CollisionPolicy>,

    /// Whether to stop after the first failed candidate
    pub fail_fast: Option<bool>,
}

/// Execution options from the configuration file.
#[derive(Deserialize, Default, Debug)]
pub struct FileExecutionConfig {
    /// Whether to run in dry-run mode
    pub dry_run: Option<bool>,

    /// Whether to use interactive selection
    pub interactive: Option<bool>,

    /// Whether to send debug symbols to the system trash.
    /// Defaults to `false` when absent.
    pub use_trash: Option<bool>,
}

/// Expand a leading `~` in a path to the user's home directory.
///
/// Paths that don't start with `~` are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// The configuration file is located at `<config_dir>/bin-flatten/config.toml`,
    /// where `<config_dir>` is the platform-specific configuration directory
    /// (e.g., `~/.config` on Linux, `%APPDATA%` on Windows).
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("bin-flatten").join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// If the config file doesn't exist, returns a default (empty) configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> anyhow::Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };

        Self::load_from(&path)
    }

    /// Load configuration from an explicit path.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, contains
    /// invalid TOML, or names an invalid bin folder.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file at {}: {e}", path.display())
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file at {}: {e}", path.display())
        })?;

        if let Some(bin_name) = &config.flatten.bin_name {
            validate_bin_name(bin_name).map_err(|e| {
                anyhow::anyhow!("Invalid config file at {}: {e}", path.display())
            })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_config() {
        let config = FileConfig::default();

        assert!(config.dir.is_none());
        assert!(config.flatten.bin_name.is_none());
        assert!(config.flatten.debug_extensions.is_none());
        assert!(config.flatten.on_collision.is_none());
        assert!(config.flatten.fail_fast.is_none());
        assert!(config.execution.dry_run.is_none());
        assert!(config.execution.interactive.is_none());
        assert!(config.execution.use_trash.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
dir = "~/dist"

[flatten]
bin_name = "out"
debug_extensions = ["pdb", "ilk"]
on_collision = "skip"
fail_fast = true

[execution]
dry_run = true
interactive = false
use_trash = true
"#;

        let config: FileConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.dir, Some(PathBuf::from("~/dist")));
        assert_eq!(config.flatten.bin_name, Some("out".to_string()));
        assert_eq!(
            config.flatten.debug_extensions,
            Some(vec!["pdb".to_string(), "ilk".to_string()])
        );
        assert_eq!(config.flatten.on_collision, Some(CollisionPolicy::Skip));
        assert_eq!(config.flatten.fail_fast, Some(true));
        assert_eq!(config.execution.dry_run, Some(true));
        assert_eq!(config.execution.interactive, Some(false));
        assert_eq!(config.execution.use_trash, Some(true));
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
[flatten]
on_collision = "fail"
"#;

        let config: FileConfig = toml::from_str(toml_content).unwrap();

        assert!(config.dir.is_none());
        assert_eq!(config.flatten.on_collision, Some(CollisionPolicy::Fail));
        assert!(config.flatten.bin_name.is_none());
        assert!(config.execution.dry_run.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let config: FileConfig = toml::from_str("").unwrap();

        assert!(config.dir.is_none());
        assert!(config.flatten.on_collision.is_none());
    }

    #[test]
    fn test_unknown_collision_policy_errors() {
        let toml_content = r#"
[flatten]
on_collision = "rename"
"#;
        let result = toml::from_str::<FileConfig>(toml_content);
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_config_errors() {
        let toml_content = r#"
[execution]
dry_run = "yes please"
"#;
        let result = toml::from_str::<FileConfig>(toml_content);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_path_returns_expected_suffix() {
        if let Some(p) = FileConfig::config_path() {
            assert!(p.ends_with("bin-flatten/config.toml"));
        }
    }

    #[test]
    fn test_load_from_missing_file_returns_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = FileConfig::load_from(&tmp.path().join("absent.toml")).unwrap();

        assert!(config.dir.is_none());
    }

    #[test]
    fn test_load_from_reports_path_on_parse_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[flatten\nbin_name = ").unwrap();

        let err = FileConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_from_rejects_bin_name_outside_candidate() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[flatten]\nbin_name = \"..\"\n").unwrap();

        let err = FileConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid bin folder name"));
    }

    #[test]
    fn test_expand_tilde_with_home() {
        let expanded = expand_tilde(&PathBuf::from("~/dist"));

        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("dist"));
        }
    }

    #[test]
    fn test_expand_tilde_absolute_path_unchanged() {
        let expanded = expand_tilde(&PathBuf::from("/absolute/path"));
        assert_eq!(expanded, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_expand_tilde_relative_path_unchanged() {
        let expanded = expand_tilde(&PathBuf::from("relative/path"));
        assert_eq!(expanded, PathBuf::from("relative/path"));
    }
}
