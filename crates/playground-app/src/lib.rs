//! Design Playground Application
//!
//! Command line shell around the core library: loads designs from files or
//! the local store, writes code exports and reports statistics.

pub mod cli;
pub mod commands;

pub use commands::{ExportRequest, load_design, load_stored_design};
