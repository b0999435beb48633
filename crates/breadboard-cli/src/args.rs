//! Command-line argument definitions for the Breadboard CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the project to load, the edits to apply,
//! where to save the result, configuration file selection, and logging
//! verbosity.

use clap::Parser;

use crate::edit::Edit;

/// Command-line arguments for the Breadboard project editor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Project file to load; an empty diagram is used when omitted
    #[arg(help = "Path to the input project file")]
    pub input: Option<String>,

    /// Where to save the edited project; `.fga` is appended if missing
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Edit to apply, in order, e.g. `-e "add U1 ic 8"` or `-e "connect U1.0 U2.3"`
    #[arg(short, long = "edit", value_name = "EDIT")]
    pub edits: Vec<Edit>,
}
