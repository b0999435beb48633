//! Project files: the JSON form of a diagram.
//!
//! A project file lists components by label and connections by label and pin
//! index:
//!
//! ```json
//! {
//!   "components": [
//!     {"label": "U1", "pin_count": 8, "pin_orientation": "left-right", "x": 0.0, "y": 0.0}
//!   ],
//!   "connections": [
//!     {"source_label": "U1", "source_pin_index": 0, "target_label": "U2", "target_pin_index": 3}
//!   ]
//! }
//! ```
//!
//! Sizes, kinds and rotations are not stored. Loaded components are IC chips
//! at the configured default size with no rotation.

use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use breadboard_core::{geometry::Point, identifier::Label, pin::PinLayout};

use crate::{
    component::{Component, ComponentSpec},
    connection::PinRef,
    diagram::Diagram,
    error::BreadboardError,
    scene::Scene,
};

/// File extension of project files, without the dot.
pub const PROJECT_EXTENSION: &str = "fga";

/// Serialized form of a whole diagram.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub components: Vec<ComponentRecord>,
    pub connections: Vec<ConnectionRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub label: String,
    pub pin_count: usize,
    /// One of `left-right`, `top-bottom` or `all-sides`
    pub pin_orientation: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub source_label: String,
    pub source_pin_index: usize,
    pub target_label: String,
    pub target_pin_index: usize,
}

impl ProjectFile {
    /// Parses a project file.
    ///
    /// # Errors
    ///
    /// Returns [`BreadboardError::Project`] carrying `src` when the text is
    /// not a project file.
    pub fn from_json(src: &str) -> Result<Self, BreadboardError> {
        serde_json::from_str(src).map_err(|err| BreadboardError::new_project_error(err, src))
    }

    pub fn to_json(&self) -> Result<String, BreadboardError> {
        serde_json::to_string_pretty(self)
            .map_err(|err| BreadboardError::new_project_error(err, String::new()))
    }
}

impl Diagram {
    /// Captures the diagram as a project file, in insertion order.
    pub fn to_project(&self) -> ProjectFile {
        let scene = self.scene();
        let label_of = |pin: PinRef| {
            scene
                .component(pin.component())
                .map(|component| component.label().to_string())
                .unwrap_or_default()
        };

        let components = scene
            .components()
            .map(|component| ComponentRecord {
                label: component.label().to_string(),
                pin_count: component.pin_count(),
                pin_orientation: component.layout().as_str().to_string(),
                x: component.position().x(),
                y: component.position().y(),
            })
            .collect();

        let connections = scene
            .connections()
            .map(|connection| ConnectionRecord {
                source_label: label_of(connection.source()),
                source_pin_index: connection.source().pin(),
                target_label: label_of(connection.target()),
                target_pin_index: connection.target().pin(),
            })
            .collect();

        ProjectFile {
            components,
            connections,
        }
    }

    /// Replaces the diagram's contents with `project` and clears the history.
    ///
    /// The new scene is built completely before anything is replaced, so on
    /// error the diagram and its history are untouched.
    ///
    /// # Errors
    ///
    /// - [`BreadboardError::DuplicateLabel`] if two components share a label.
    /// - [`BreadboardError::InvalidLayout`] for a bad pin count or orientation.
    /// - [`BreadboardError::DanglingReference`] for a connection naming an
    ///   unknown label.
    /// - [`BreadboardError::PinIndexOutOfRange`] for a bad pin index.
    /// - [`BreadboardError::SamePin`] / [`BreadboardError::SameComponent`] for
    ///   a connection from a component to itself.
    pub fn load_project(&mut self, project: &ProjectFile) -> Result<(), BreadboardError> {
        let grid = self.config().grid().size();
        let size = self.config().component().default_size();
        let mut scene = Scene::default();

        for record in &project.components {
            let label = Label::new(&record.label);
            scene.ensure_label_free(label, None)?;

            let layout: PinLayout = record.pin_orientation.parse()?;
            let position = Point::new(record.x, record.y).snap_to_grid(grid);
            let spec = ComponentSpec::new(&record.label, record.pin_count, layout)
                .with_size(size)
                .with_position(position);
            let id = scene.allocate_component_id();
            scene.insert_component(Component::build(id, &spec)?);
        }

        for record in &project.connections {
            let source = pin_ref(&scene, &record.source_label, record.source_pin_index)?;
            let target = pin_ref(&scene, &record.target_label, record.target_pin_index)?;
            scene.add_connection(source, target)?;
        }

        info!(
            components = project.components.len(),
            connections = project.connections.len();
            "Project loaded"
        );
        self.replace_scene(scene);
        Ok(())
    }

    /// Serializes the diagram as pretty-printed project JSON.
    pub fn to_json(&self) -> Result<String, BreadboardError> {
        self.to_project().to_json()
    }

    /// Parses project JSON and loads it. See [`Diagram::load_project`].
    pub fn load_json(&mut self, src: &str) -> Result<(), BreadboardError> {
        let project = ProjectFile::from_json(src)?;
        self.load_project(&project)
    }

    /// Reads and loads a project file.
    pub fn load_from_path(&mut self, path: impl AsRef<Path>) -> Result<(), BreadboardError> {
        let path = path.as_ref();
        debug!(path = path.display().to_string(); "Reading project file");
        let src = fs::read_to_string(path)?;
        self.load_json(&src)
    }

    /// Writes the diagram to `path` as is; see [`with_project_extension`]
    /// for the conventional file name.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> Result<(), BreadboardError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json)?;
        info!(path = path.display().to_string(); "Project saved");
        Ok(())
    }
}

fn pin_ref(scene: &Scene, label: &str, pin: usize) -> Result<PinRef, BreadboardError> {
    scene
        .component_by_label(Label::new(label))
        .map(|component| PinRef::new(component.id(), pin))
        .ok_or_else(|| BreadboardError::DanglingReference(label.to_string()))
}

/// Appends `.fga` unless the path already ends with it.
///
/// # Examples
///
/// ```
/// # use std::path::Path;
/// # use breadboard::project::with_project_extension;
/// assert_eq!(with_project_extension("board"), Path::new("board.fga"));
/// assert_eq!(with_project_extension("board.fga"), Path::new("board.fga"));
/// assert_eq!(with_project_extension("board.v2"), Path::new("board.v2.fga"));
/// ```
pub fn with_project_extension(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.extension() == Some(OsStr::new(PROJECT_EXTENSION)) {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(PROJECT_EXTENSION);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use breadboard_core::{geometry::Rotation, pin::LayoutError};

    use super::*;

    const SAMPLE: &str = r#"{
        "components": [
            {"label": "U1", "pin_count": 4, "pin_orientation": "left-right", "x": 0, "y": 0},
            {"label": "U2", "pin_count": 6, "pin_orientation": "top-bottom", "x": 203, "y": 11}
        ],
        "connections": [
            {"source_label": "U1", "source_pin_index": 1, "target_label": "U2", "target_pin_index": 4}
        ]
    }"#;

    #[test]
    fn test_load_sample() {
        let mut diagram = Diagram::default();
        diagram.load_json(SAMPLE).unwrap();

        let u2 = diagram.component_by_label("U2").unwrap();
        assert_eq!(u2.position(), Point::new(200.0, 20.0));
        assert_eq!(u2.layout(), PinLayout::TopBottom);
        assert_eq!(u2.rotation(), Rotation::Deg0);

        let connections = diagram.list_connections();
        assert_eq!(connections.len(), 1);
        assert_eq!(connections[0].target().pin(), 4);
        assert!(!diagram.can_undo());
    }

    #[test]
    fn test_load_uses_configured_size() {
        let mut diagram = Diagram::default();
        diagram.load_json(SAMPLE).unwrap();
        for component in diagram.list_components() {
            assert_eq!(component.size(), diagram.config().component().default_size());
        }
    }

    #[test]
    fn test_save_uses_insertion_order() {
        let mut diagram = Diagram::default();
        diagram.load_json(SAMPLE).unwrap();
        let project = diagram.to_project();
        let labels: Vec<&str> = project.components.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["U1", "U2"]);
        assert_eq!(project.components[1].pin_orientation, "top-bottom");
        assert_eq!(
            project.connections[0],
            ConnectionRecord {
                source_label: "U1".to_string(),
                source_pin_index: 1,
                target_label: "U2".to_string(),
                target_pin_index: 4,
            }
        );
    }

    #[test]
    fn test_load_clears_history() {
        let mut diagram = Diagram::default();
        diagram
            .add_component(&ComponentSpec::new("X", 2, PinLayout::LeftRight))
            .unwrap();
        diagram.undo().unwrap();
        assert!(diagram.can_redo());

        diagram.load_json(SAMPLE).unwrap();
        assert!(!diagram.can_undo());
        assert!(!diagram.can_redo());
    }

    #[test]
    fn test_load_rejects_duplicate_label() {
        let src = r#"{"components": [
            {"label": "U1", "pin_count": 2, "pin_orientation": "left-right", "x": 0, "y": 0},
            {"label": "U1", "pin_count": 2, "pin_orientation": "left-right", "x": 100, "y": 0}
        ], "connections": []}"#;
        let err = Diagram::default().load_json(src).unwrap_err();
        assert!(matches!(err, BreadboardError::DuplicateLabel(label) if label == "U1"));
    }

    #[test]
    fn test_load_rejects_unknown_orientation() {
        let src = r#"{"components": [
            {"label": "U1", "pin_count": 2, "pin_orientation": "diagonal", "x": 0, "y": 0}
        ], "connections": []}"#;
        let err = Diagram::default().load_json(src).unwrap_err();
        assert!(matches!(err, BreadboardError::InvalidLayout(_)));
    }

    #[test]
    fn test_load_rejects_oversized_pin_count() {
        let mut diagram = Diagram::default();
        diagram.load_json(SAMPLE).unwrap();

        let src = r#"{"components": [
            {"label": "U9", "pin_count": 18446744073709551615, "pin_orientation": "left-right", "x": 0, "y": 0}
        ], "connections": []}"#;
        let err = diagram.load_json(src).unwrap_err();
        assert!(matches!(
            err,
            BreadboardError::InvalidLayout(LayoutError::TooManyPins(usize::MAX))
        ));
        assert_eq!(diagram.list_components().len(), 2);
        assert!(diagram.component_by_label("U9").is_none());
    }

    #[test]
    fn test_load_rejects_bad_pin_index() {
        let src = r#"{"components": [
            {"label": "U1", "pin_count": 2, "pin_orientation": "left-right", "x": 0, "y": 0},
            {"label": "U2", "pin_count": 2, "pin_orientation": "left-right", "x": 200, "y": 0}
        ], "connections": [
            {"source_label": "U1", "source_pin_index": 0, "target_label": "U2", "target_pin_index": 2}
        ]}"#;
        let err = Diagram::default().load_json(src).unwrap_err();
        match err {
            BreadboardError::PinIndexOutOfRange {
                label,
                index,
                pin_count,
            } => {
                assert_eq!(label, "U2");
                assert_eq!(index, 2);
                assert_eq!(pin_count, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_rejects_self_connection() {
        let src = r#"{"components": [
            {"label": "U1", "pin_count": 2, "pin_orientation": "left-right", "x": 0, "y": 0}
        ], "connections": [
            {"source_label": "U1", "source_pin_index": 0, "target_label": "U1", "target_pin_index": 1}
        ]}"#;
        let err = Diagram::default().load_json(src).unwrap_err();
        assert!(matches!(err, BreadboardError::SameComponent(_)));
    }

    #[test]
    fn test_malformed_json_keeps_source() {
        let src = "{\"components\": [}";
        let err = Diagram::default().load_json(src).unwrap_err();
        match err {
            BreadboardError::Project { err, src: kept } => {
                assert_eq!(kept, src);
                assert_eq!(err.line(), 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_with_project_extension_keeps_directories() {
        assert_eq!(
            with_project_extension("out/boards/main"),
            Path::new("out/boards/main.fga")
        );
    }
}
