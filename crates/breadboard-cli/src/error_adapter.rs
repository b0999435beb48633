//! Error adapter for converting CLI errors to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Project files that
//! fail to parse are shown with a snippet of the offending JSON; every other
//! error gets a stable code and, where one helps, a hint.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use breadboard::BreadboardError;

use crate::{CliError, config::ConfigError};

/// Adapter for a project file that is not valid project JSON.
///
/// Points at the line and column where parsing stopped.
pub struct ProjectDiagnostic<'a> {
    err: &'a serde_json::Error,
    src: &'a str,
}

impl<'a> ProjectDiagnostic<'a> {
    pub fn new(err: &'a serde_json::Error, src: &'a str) -> Self {
        Self { err, src }
    }

    /// Byte span of the position serde_json reported.
    fn span(&self) -> SourceSpan {
        let offset = line_column_to_offset(self.src, self.err.line(), self.err.column());
        let len = self.src[offset..].chars().next().map_or(0, char::len_utf8);
        SourceSpan::new(offset.into(), len)
    }
}

impl fmt::Debug for ProjectDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectDiagnostic")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for ProjectDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid project file")
    }
}

impl std::error::Error for ProjectDiagnostic<'_> {}

impl MietteDiagnostic for ProjectDiagnostic<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("breadboard::project"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "a project file holds `components` and `connections` arrays",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new_primary_with_span(Some(self.err.to_string()), self.span());
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for errors without source text.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            CliError::Breadboard(err) | CliError::Edit { error: err, .. } => library_code(err),
            CliError::Config(_) => "breadboard::config",
            CliError::UnknownLabel { .. } => "breadboard::edit::unknown_label",
            CliError::NotConnected { .. } => "breadboard::edit::not_connected",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            CliError::Breadboard(err) | CliError::Edit { error: err, .. } => library_help(err)?,
            CliError::Config(ConfigError::Validation { .. }) => {
                "grid.size, component.width and component.height must be positive"
            }
            CliError::Config(_) => return None,
            CliError::UnknownLabel { .. } => "components are named by the label given to `add`",
            CliError::NotConnected { .. } => "`disconnect` needs the two pins of an existing wire",
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

fn library_code(err: &BreadboardError) -> &'static str {
    match err {
        BreadboardError::Io(_) => "breadboard::io",
        BreadboardError::Project { .. } => "breadboard::project",
        BreadboardError::InvalidConfig(_) => "breadboard::config",
        BreadboardError::InvalidLayout(_) => "breadboard::layout",
        BreadboardError::ComponentNotFound(_) | BreadboardError::ConnectionNotFound(_) => {
            "breadboard::not_found"
        }
        BreadboardError::SamePin => "breadboard::same_pin",
        BreadboardError::InvalidConfig(_) => {
            "grid.size, component.width and component.height must be positive"
        }
        BreadboardError::SameComponent(_) => "breadboard::same_component",
        BreadboardError::DuplicateLabel(_) => "breadboard::duplicate_label",
        BreadboardError::DanglingReference(_) => "breadboard::dangling_reference",
        BreadboardError::PinIndexOutOfRange { .. } => "breadboard::pin_index",
    }
}

fn library_help(err: &BreadboardError) -> Option<&'static str> {
    let help = match err {
        BreadboardError::InvalidLayout(_) => {
            "components need 2 to 64 pins and a `left-right`, `top-bottom` or `all-sides` layout"
        }
        BreadboardError::SameComponent(_) => "connections must join pins on two different components",
        BreadboardError::DuplicateLabel(_) => "every component needs a unique label",
        BreadboardError::DanglingReference(_) => {
            "every connection label must match a component in the same file"
        }
        BreadboardError::PinIndexOutOfRange { .. } => "pin indices start at 0",
        _ => return None,
    };
    Some(help)
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A project parse error with its source text.
    Project(ProjectDiagnostic<'a>),
    /// An error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Project(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Project(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Project(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Project(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Project(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Project(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Converts a 1-based line and column, as serde_json reports them, into a
/// byte offset clamped to the source length.
fn line_column_to_offset(src: &str, line: usize, column: usize) -> usize {
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let offset = (line_start + column.saturating_sub(1)).min(src.len());
    // Step back to a char boundary
    (0..=offset)
        .rev()
        .find(|&i| src.is_char_boundary(i))
        .unwrap_or(0)
}

/// Convert a [`CliError`] into a reportable error.
pub fn to_reportable(err: &CliError) -> Reportable<'_> {
    match err {
        CliError::Breadboard(BreadboardError::Project { err, src }) => {
            Reportable::Project(ProjectDiagnostic::new(err, src))
        }
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}
