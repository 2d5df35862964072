//! File, environment and reporting plumbing around `flb-classic-core`.
//!
//! The engine crate turns classic Fluent Bit configuration text into YAML.
//! This crate decides which files to convert and how:
//!
//! - [`settings`] — resolve flags from the CLI, `FLB_*` environment variables
//!   and an optional TOML settings file into one [`settings::Settings`] value
//! - [`batch`] — pick the source files (conversion list, arguments or
//!   environment) and derive output/report paths
//! - [`report`] — terminal rendering and the per-output `.report` audit file
//! - [`conversion_summary`] — per-file outcome and block counts
//!
//! Each source file is converted with fresh engine state; one failing file
//! never stops the rest of a batch.

pub mod batch;
pub mod conversion_summary;
pub mod report;
pub mod settings;
