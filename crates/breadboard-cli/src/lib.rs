//! CLI logic for the Breadboard project editor.
//!
//! A run loads a project (or starts empty), applies the requested edits in
//! order, prints a report of the result and optionally saves it.

pub mod edit;
pub mod error_adapter;

mod args;
mod config;
mod error;

pub use args::Args;
pub use error::CliError;

use std::fmt;

use log::{debug, info};

use breadboard::{
    BreadboardError, ComponentSpec, Diagram, PinRef, geometry::Point, identifier::ComponentId,
    project,
};

use edit::{Edit, PinAddress};

/// Run the Breadboard CLI application
///
/// Loads the input project if one is given, applies every edit, prints the
/// resulting diagram and writes it to the output path when one is given.
///
/// # Errors
///
/// Returns `CliError` for:
/// - Configuration loading errors
/// - File I/O and project parsing errors
/// - Edits that name unknown components or fail to apply
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path:? = args.input,
        output_path:? = args.output,
        edits = args.edits.len();
        "Processing project"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let mut diagram = Diagram::new(app_config)?;

    if let Some(input) = &args.input {
        diagram.load_from_path(input)?;
    }

    for edit in &args.edits {
        apply_edit(&mut diagram, edit)?;
    }

    print!("{}", Report(&diagram));

    if let Some(output) = &args.output {
        let path = project::with_project_extension(output);
        diagram.save_to_path(&path)?;
        info!(output_file = path.display().to_string(); "Project saved successfully");
    }

    Ok(())
}

/// Applies one edit to `diagram`.
///
/// # Errors
///
/// Fails when the edit names a component that does not exist, when a
/// `disconnect` finds no wire, or when the diagram rejects the edit.
pub fn apply_edit(diagram: &mut Diagram, edit: &Edit) -> Result<(), CliError> {
    debug!(edit = edit.to_string(); "Applying edit");
    let failed = |error: BreadboardError| CliError::Edit {
        edit: edit.to_string(),
        error,
    };

    match edit {
        Edit::Add {
            label,
            kind,
            pin_count,
            layout,
        } => {
            let spec = ComponentSpec::for_kind(label.as_str(), *kind, *pin_count, *layout);
            diagram.add_component(&spec).map_err(failed)?;
        }
        Edit::Move { label, x, y } => {
            let id = lookup(diagram, edit, label)?;
            diagram
                .move_component(id, Point::new(*x, *y))
                .map_err(failed)?;
        }
        Edit::Rotate { label } => {
            let id = lookup(diagram, edit, label)?;
            diagram.rotate_component(id).map_err(failed)?;
        }
        Edit::Rename { label, new_label } => {
            let id = lookup(diagram, edit, label)?;
            diagram.rename_component(id, new_label).map_err(failed)?;
        }
        Edit::Connect { source, target } => {
            let source = pin_ref(diagram, edit, source)?;
            let target = pin_ref(diagram, edit, target)?;
            diagram.connect(source, target).map_err(failed)?;
        }
        Edit::Disconnect { source, target } => {
            let ends = [pin_ref(diagram, edit, source)?, pin_ref(diagram, edit, target)?];
            let wires: Vec<_> = diagram
                .list_connections()
                .into_iter()
                .filter(|connection| {
                    let endpoints = connection.endpoints();
                    endpoints == ends || endpoints == [ends[1], ends[0]]
                })
                .map(|connection| connection.id())
                .collect();
            if wires.is_empty() {
                return Err(CliError::NotConnected {
                    edit: edit.to_string(),
                });
            }
            for wire in wires {
                diagram.delete_connection(wire).map_err(failed)?;
            }
        }
        Edit::Delete { label } => {
            let id = lookup(diagram, edit, label)?;
            diagram.delete_component(id).map_err(failed)?;
        }
        Edit::Undo => {
            if !diagram.undo().map_err(failed)? {
                info!("Nothing to undo");
            }
        }
        Edit::Redo => {
            if !diagram.redo().map_err(failed)? {
                info!("Nothing to redo");
            }
        }
    }
    Ok(())
}

fn lookup(diagram: &Diagram, edit: &Edit, label: &str) -> Result<ComponentId, CliError> {
    diagram
        .component_by_label(label)
        .map(|component| component.id())
        .ok_or_else(|| CliError::UnknownLabel {
            edit: edit.to_string(),
            label: label.to_string(),
        })
}

fn pin_ref(diagram: &Diagram, edit: &Edit, address: &PinAddress) -> Result<PinRef, CliError> {
    lookup(diagram, edit, &address.label).map(|id| PinRef::new(id, address.pin))
}

/// Plain-text summary of a diagram's components and connection routes.
pub struct Report<'a>(pub &'a Diagram);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let diagram = self.0;
        let components = diagram.list_components();
        let connections = diagram.list_connections();

        let label_of = |pin: PinRef| {
            diagram
                .get_component(pin.component())
                .map(|component| component.label().to_string())
                .unwrap_or_default()
        };

        writeln!(f, "Components ({}):", components.len())?;
        for component in components {
            writeln!(
                f,
                "  {} [{}] at {} rotated {}, {} pins {}",
                component.label(),
                component.kind(),
                component.position(),
                component.rotation(),
                component.pin_count(),
                component.layout(),
            )?;
        }

        writeln!(f, "Connections ({}):", connections.len())?;
        for connection in connections {
            write!(
                f,
                "  {}.{} -> {}.{} via",
                label_of(connection.source()),
                connection.source().pin(),
                label_of(connection.target()),
                connection.target().pin(),
            )?;
            for point in connection.route().points() {
                write!(f, " {point}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_all(diagram: &mut Diagram, edits: &[&str]) -> Result<(), CliError> {
        for edit in edits {
            let edit: Edit = edit.parse().unwrap();
            apply_edit(diagram, &edit)?;
        }
        Ok(())
    }

    #[test]
    fn test_edits_build_a_diagram() {
        let mut diagram = Diagram::default();
        apply_all(
            &mut diagram,
            &[
                "add U1 ic 8",
                "add R1 resistor",
                "move R1 240 120",
                "connect U1.1 R1.0",
                "rotate R1",
                "rename R1 R9",
            ],
        )
        .unwrap();

        let r9 = diagram.component_by_label("R9").unwrap();
        assert_eq!(r9.pin_count(), 2);
        assert_eq!(r9.position(), Point::new(240.0, 120.0));
        assert_eq!(diagram.list_connections().len(), 1);
    }

    #[test]
    fn test_disconnect_matches_either_direction() {
        let mut diagram = Diagram::default();
        apply_all(
            &mut diagram,
            &["add A", "add B", "move B 200 0", "connect A.1 B.0"],
        )
        .unwrap();
        apply_all(&mut diagram, &["disconnect B.0 A.1"]).unwrap();
        assert!(diagram.list_connections().is_empty());

        let err = apply_all(&mut diagram, &["disconnect B.0 A.1"]).unwrap_err();
        assert!(matches!(err, CliError::NotConnected { .. }));
    }

    #[test]
    fn test_unknown_label() {
        let mut diagram = Diagram::default();
        let err = apply_all(&mut diagram, &["rotate U7"]).unwrap_err();
        assert!(matches!(err, CliError::UnknownLabel { label, .. } if label == "U7"));
    }

    #[test]
    fn test_rejected_edit_keeps_context() {
        let mut diagram = Diagram::default();
        let err = apply_all(&mut diagram, &["add A", "add A"]).unwrap_err();
        match err {
            CliError::Edit { edit, error } => {
                assert!(edit.starts_with("add A"));
                assert!(matches!(error, BreadboardError::DuplicateLabel(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_undo_on_empty_history_is_fine() {
        let mut diagram = Diagram::default();
        apply_all(&mut diagram, &["undo", "redo"]).unwrap();
    }

    #[test]
    fn test_report() {
        let mut diagram = Diagram::default();
        apply_all(
            &mut diagram,
            &["add A ic 2", "add B ic 2", "move B 200 100", "connect A.1 B.0"],
        )
        .unwrap();
        let text = Report(&diagram).to_string();
        assert!(text.contains("Components (2):"));
        assert!(text.contains("  A [ic] at (0, 0) rotated 0°, 2 pins left-right"));
        assert!(text.contains("Connections (1):"));
        assert!(text.contains("  A.1 -> B.0 via (100, 25) (100, 125) (200, 125)\n"));
    }

    #[test]
    fn test_report_empty_diagram() {
        let diagram = Diagram::default();
        assert_eq!(
            Report(&diagram).to_string(),
            "Components (0):\nConnections (0):\n"
        );
    }

    #[test]
    fn test_oversized_add_is_rejected() {
        let mut diagram = Diagram::default();
        let err = apply_all(&mut diagram, &["add U1 ic 100000"]).unwrap_err();
        assert!(matches!(
            err,
            CliError::Edit {
                error: BreadboardError::InvalidLayout(_),
                ..
            }
        ));
        assert!(diagram.list_components().is_empty());
    }
}
