//! Errors raised by the CLI.

use thiserror::Error;

use breadboard::BreadboardError;

use crate::config::ConfigError;

/// Everything that can stop a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Breadboard(#[from] BreadboardError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Edit `{edit}` refers to unknown component `{label}`")]
    UnknownLabel { edit: String, label: String },

    #[error("Edit `{edit}` failed: {error}")]
    Edit {
        edit: String,
        #[source]
        error: BreadboardError,
    },

    #[error("Edit `{edit}` found no connection between those pins")]
    NotConnected { edit: String },
}
