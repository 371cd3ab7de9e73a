//! Batch checking and CLI for pdxscript.
//!
//! This crate provides:
//! - [`CheckConfig`] - Worker count plus parse and extraction settings
//! - [`check_source`] / [`check_files`] - Parse and extract files, in parallel
//! - [`load_registry`] - Build a resolver registry from a script file

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod check;
pub mod config;

pub use check::{FileReport, Summary, check_file, check_files, check_source, load_registry, read_source};
pub use config::CheckConfig;
