//! # bin-flatten
//!
//! A small CLI tool that flattens build output trees: for every immediate
//! subdirectory of a root folder it moves the contents of its `bin/` folder
//! up one level, deletes `.pdb` debug symbols and removes the emptied `bin/`.
//!
//! This library provides the core functionality for the bin-flatten CLI tool,
//! allowing for scanning, flattening and reporting on candidate directories.

pub mod candidate;
pub mod config;
pub mod flattener;
pub mod logging;
pub mod output;
pub mod relocate;
pub mod report;
pub mod scanner;
pub mod utils;
