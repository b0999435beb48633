//! Error types for Breadboard operations.
//!
//! This module provides the main error type [`BreadboardError`]. Every
//! variant is recoverable: an operation that returns an error leaves the
//! diagram exactly as it was before the call.

use std::io;

use thiserror::Error;

use breadboard_core::{
    identifier::{ComponentId, ConnectionId},
    pin::LayoutError,
};

/// The main error type for Breadboard operations.
#[derive(Debug, Error)]
pub enum BreadboardError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A project file could not be parsed as JSON of the expected shape.
    #[error("Invalid project file: {err}")]
    Project { err: serde_json::Error, src: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid pin layout: {0}")]
    InvalidLayout(#[from] LayoutError),

    #[error("Component {0} not found")]
    ComponentNotFound(ComponentId),

    #[error("Connection {0} not found")]
    ConnectionNotFound(ConnectionId),

    #[error("Cannot connect a pin to itself")]
    SamePin,

    #[error("Cannot connect two pins of the same component `{0}`")]
    SameComponent(String),

    #[error("A component labelled `{0}` already exists")]
    DuplicateLabel(String),

    #[error("Connection references unknown component `{0}`")]
    DanglingReference(String),

    #[error("Pin index {index} is out of range for `{label}` with {pin_count} pins")]
    PinIndexOutOfRange {
        label: String,
        index: usize,
        pin_count: usize,
    },
}

impl BreadboardError {
    /// Create a new `Project` error with the associated source text.
    pub fn new_project_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Project {
            err,
            src: src.into(),
        }
    }

    /// Returns true for the "referenced entity does not exist" kind.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ComponentNotFound(_) | Self::ConnectionNotFound(_))
    }
}
