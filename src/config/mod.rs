//! Configuration types and options for the application.
//!
//! This module contains all configuration structures used throughout the application,
//! including flattening rules, execution options and the persistent config file.

pub mod execution;
pub mod file;
pub mod flatten;

pub use execution::ExecutionOptions;
pub use file::FileConfig;
pub use flatten::{CollisionPolicy, FlattenOptions, validate_bin_name};
