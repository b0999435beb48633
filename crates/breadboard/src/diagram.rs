//! The editable diagram: components, connections and their edit history.

use log::{debug, info};

use breadboard_core::{
    geometry::{Bounds, Point, Rotation},
    identifier::{ComponentId, ConnectionId, Label},
    kind::ComponentKind,
};

use crate::{
    component::{Component, ComponentSpec},
    config::AppConfig,
    connection::{Connection, PinRef},
    error::BreadboardError,
    history::{Command, CommandLog},
    route::Route,
    scene::Scene,
};

/// A schematic diagram.
///
/// The diagram owns every component and connection. All mutation goes through
/// `&mut self` methods, each of which either succeeds or leaves the diagram
/// exactly as it was. Structural edits (adding and deleting components or
/// connections) are recorded for [`undo`](Diagram::undo) and
/// [`redo`](Diagram::redo); moves, rotations and renames are not.
///
/// # Examples
///
/// ```
/// # use breadboard::{ComponentSpec, Diagram, PinRef};
/// # use breadboard::{geometry::Point, pin::PinLayout};
/// let mut diagram = Diagram::default();
/// let u1 = diagram
///     .add_component(&ComponentSpec::new("U1", 4, PinLayout::LeftRight))
///     .unwrap();
/// let u2 = diagram
///     .add_component(
///         &ComponentSpec::new("U2", 4, PinLayout::LeftRight).with_position(Point::new(205.0, 92.0)),
///     )
///     .unwrap();
///
/// // Positions land on the grid
/// assert_eq!(diagram.get_component(u2).unwrap().position(), Point::new(200.0, 100.0));
///
/// let wire = diagram.connect(PinRef::new(u1, 1), PinRef::new(u2, 0)).unwrap();
/// assert_eq!(diagram.list_connections().len(), 1);
///
/// diagram.undo().unwrap();
/// assert!(diagram.get_connection(wire).is_none());
/// ```
#[derive(Debug, Default)]
pub struct Diagram {
    config: AppConfig,
    scene: Scene,
    history: CommandLog,
}

impl Diagram {
    /// Creates an empty diagram using `config` for grid snapping and for
    /// components loaded from project files.
    ///
    /// # Errors
    ///
    /// Returns [`BreadboardError::InvalidConfig`] when `config` fails
    /// [`AppConfig::validate`].
    pub fn new(config: AppConfig) -> Result<Self, BreadboardError> {
        config.validate().map_err(BreadboardError::InvalidConfig)?;
        Ok(Self {
            config,
            scene: Scene::default(),
            history: CommandLog::default(),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn snap(&self, position: Point) -> Point {
        position.snap_to_grid(self.config.grid().size())
    }

    /// Adds a component and records the addition.
    ///
    /// The requested position is snapped to the grid.
    ///
    /// # Errors
    ///
    /// - [`BreadboardError::DuplicateLabel`] if the label is already in use.
    /// - [`BreadboardError::InvalidLayout`] if the pins cannot be laid out.
    pub fn add_component(&mut self, spec: &ComponentSpec) -> Result<ComponentId, BreadboardError> {
        let label = Label::new(spec.label());
        self.scene.ensure_label_free(label, None)?;

        let id = self.scene.allocate_component_id();
        let mut component = Component::build(id, spec)?;
        component.set_position(self.snap(spec.position()));

        info!(
            id = id.to_string(),
            label = spec.label(),
            kind = component.kind().as_str(),
            pins = component.pin_count();
            "Component added"
        );
        self.scene.insert_component(component.clone());
        self.history.record(Command::AddComponent(component));
        Ok(id)
    }

    /// Deletes a component together with every connection touching it.
    ///
    /// Undoing the deletion restores the component and those connections.
    ///
    /// # Errors
    ///
    /// Returns [`BreadboardError::ComponentNotFound`] for an unknown id.
    pub fn delete_component(&mut self, id: ComponentId) -> Result<(), BreadboardError> {
        let (component, connections) = self
            .scene
            .remove_component(id)
            .ok_or(BreadboardError::ComponentNotFound(id))?;

        info!(
            id = id.to_string(),
            label = component.label().to_string(),
            cascaded = connections.len();
            "Component deleted"
        );
        self.history.record(Command::DeleteComponent {
            component,
            connections,
        });
        Ok(())
    }

    /// Connects two pins on different components with an orthogonal route.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - [`BreadboardError::ComponentNotFound`] if either component is unknown.
    /// - [`BreadboardError::PinIndexOutOfRange`] if either pin index is too large.
    /// - [`BreadboardError::SamePin`] if both ends are the same pin.
    /// - [`BreadboardError::SameComponent`] if both pins are on one component.
    pub fn connect(
        &mut self,
        source: PinRef,
        target: PinRef,
    ) -> Result<ConnectionId, BreadboardError> {
        let id = self.scene.add_connection(source, target)?;
        if let Some(connection) = self.scene.connection(id) {
            info!(id = id.to_string(), source = source.to_string(), target = target.to_string(); "Connection added");
            self.history
                .record(Command::AddConnection(connection.clone()));
        }
        Ok(id)
    }

    /// Deletes a connection and records the deletion.
    ///
    /// # Errors
    ///
    /// Returns [`BreadboardError::ConnectionNotFound`] for an unknown id.
    pub fn delete_connection(&mut self, id: ConnectionId) -> Result<(), BreadboardError> {
        let connection = self
            .scene
            .remove_connection(id)
            .ok_or(BreadboardError::ConnectionNotFound(id))?;
        info!(id = id.to_string(); "Connection deleted");
        self.history.record(Command::DeleteConnection(connection));
        Ok(())
    }

    /// Moves a component, snapping the position to the grid, and re-routes
    /// its connections. Returns the snapped position.
    ///
    /// # Errors
    ///
    /// Returns [`BreadboardError::ComponentNotFound`] for an unknown id.
    pub fn move_component(
        &mut self,
        id: ComponentId,
        position: Point,
    ) -> Result<Point, BreadboardError> {
        let snapped = self.snap(position);
        self.scene
            .set_position(id, snapped)
            .ok_or(BreadboardError::ComponentNotFound(id))?;
        debug!(id = id.to_string(), position = snapped.to_string(); "Component moved");
        Ok(snapped)
    }

    /// Rotates a component a quarter turn clockwise about its origin and
    /// re-routes its connections. Returns the new rotation.
    ///
    /// # Errors
    ///
    /// Returns [`BreadboardError::ComponentNotFound`] for an unknown id.
    pub fn rotate_component(&mut self, id: ComponentId) -> Result<Rotation, BreadboardError> {
        let rotation = self
            .scene
            .rotate(id)
            .ok_or(BreadboardError::ComponentNotFound(id))?;
        debug!(id = id.to_string(), rotation = rotation.degrees(); "Component rotated");
        Ok(rotation)
    }

    /// Changes a component's label.
    ///
    /// # Errors
    ///
    /// - [`BreadboardError::ComponentNotFound`] for an unknown id.
    /// - [`BreadboardError::DuplicateLabel`] if another component has the label.
    pub fn rename_component(&mut self, id: ComponentId, label: &str) -> Result<(), BreadboardError> {
        if self.scene.component(id).is_none() {
            return Err(BreadboardError::ComponentNotFound(id));
        }
        let label = Label::new(label);
        self.scene.ensure_label_free(label, Some(id))?;
        if let Some(previous) = self.scene.relabel(id, label) {
            debug!(id = id.to_string(), from = previous.to_string(), to = label.to_string(); "Component renamed");
        }
        Ok(())
    }

    /// Reverts the most recent structural edit.
    ///
    /// Returns `false` when there is nothing to undo.
    ///
    /// # Errors
    ///
    /// Fails if the edit can no longer be reverted, for example because a
    /// deleted component's label has since been given to another component.
    /// The history and the diagram are then left unchanged.
    pub fn undo(&mut self) -> Result<bool, BreadboardError> {
        let command = self.history.undo(&mut self.scene)?;
        if let Some(command) = command {
            info!(command = command.name(); "Undo");
        }
        Ok(command.is_some())
    }

    /// Re-applies the most recently undone edit.
    ///
    /// Returns `false` when there is nothing to redo.
    ///
    /// # Errors
    ///
    /// Same as [`undo`](Diagram::undo).
    pub fn redo(&mut self) -> Result<bool, BreadboardError> {
        let command = self.history.redo(&mut self.scene)?;
        if let Some(command) = command {
            info!(command = command.name(); "Redo");
        }
        Ok(command.is_some())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Replaces the scene wholesale and forgets all history.
    pub(crate) fn replace_scene(&mut self, scene: Scene) {
        self.scene = scene;
        self.history.clear();
    }

    pub(crate) fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Components in insertion order
    pub fn list_components(&self) -> Vec<&Component> {
        self.scene.components().collect()
    }

    /// Connections in insertion order
    pub fn list_connections(&self) -> Vec<&Connection> {
        self.scene.connections().collect()
    }

    pub fn get_component(&self, id: ComponentId) -> Option<&Component> {
        self.scene.component(id)
    }

    pub fn get_connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.scene.connection(id)
    }

    pub fn component_by_label(&self, label: &str) -> Option<&Component> {
        self.scene.component_by_label(Label::new(label))
    }

    /// Connections touching the component, in the order they were attached.
    pub fn connections_of(&self, id: ComponentId) -> Vec<&Connection> {
        self.scene.connections_of(id).collect()
    }

    /// Returns the scene position of a pin.
    ///
    /// # Errors
    ///
    /// - [`BreadboardError::ComponentNotFound`] for an unknown component.
    /// - [`BreadboardError::PinIndexOutOfRange`] for a bad pin index.
    pub fn get_pin_scene_position(
        &self,
        component: ComponentId,
        pin_index: usize,
    ) -> Result<Point, BreadboardError> {
        self.scene.resolve_pin(PinRef::new(component, pin_index))
    }

    /// Route geometry of a connection
    pub fn route_of(&self, id: ConnectionId) -> Option<&Route> {
        self.scene.connection(id).map(Connection::route)
    }

    /// Everything a presentation layer needs to draw a component.
    pub fn render_data(&self, id: ComponentId) -> Option<RenderData> {
        self.scene.component(id).map(RenderData::from_component)
    }

    /// Every item in the scene, bottom to top: connections, then components,
    /// then pins.
    pub fn items(&self) -> impl Iterator<Item = SceneItem<'_>> {
        let connections = self.scene.connections().map(SceneItem::Connection);
        let components = self.scene.components().map(SceneItem::Component);
        let pins = self.scene.components().flat_map(|component| {
            (0..component.pin_count()).filter_map(move |index| {
                component.pin_position(index).map(|position| SceneItem::Pin {
                    component,
                    index,
                    position,
                })
            })
        });
        connections.chain(components).chain(pins)
    }

    /// Returns the topmost item within `tolerance` of `point`.
    ///
    /// Pins sit above components, which sit above connections. Within a layer
    /// later items are on top.
    pub fn hit_test(&self, point: Point, tolerance: f32) -> Option<SceneItem<'_>> {
        let items: Vec<SceneItem<'_>> = self.items().collect();
        items
            .into_iter()
            .rev()
            .find(|item| item.is_hit(point, tolerance))
    }
}

/// Drawing data for one component, in diagram space.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderData {
    pub id: ComponentId,
    pub label: String,
    pub kind: ComponentKind,
    /// Corners of the rotated outline
    pub outline: [Point; 4],
    pub bounds: Bounds,
    pub rotation: Rotation,
    /// Pin positions, indexed like the component's pins
    pub pins: Vec<Point>,
}

impl RenderData {
    fn from_component(component: &Component) -> Self {
        Self {
            id: component.id(),
            label: component.label().to_string(),
            kind: component.kind(),
            outline: component.outline(),
            bounds: component.bounds(),
            rotation: component.rotation(),
            pins: (0..component.pin_count())
                .filter_map(|index| component.pin_position(index))
                .collect(),
        }
    }
}

/// Something a user can point at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneItem<'a> {
    Component(&'a Component),
    Connection(&'a Connection),
    Pin {
        component: &'a Component,
        index: usize,
        position: Point,
    },
}

impl SceneItem<'_> {
    fn is_hit(&self, point: Point, tolerance: f32) -> bool {
        match self {
            Self::Component(component) => component.bounds().inflate(tolerance).contains(point),
            Self::Connection(connection) => connection.route().is_near(point, tolerance),
            Self::Pin { position, .. } => position.distance(point) <= tolerance,
        }
    }
}
