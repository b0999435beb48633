//! Entity storage behind a [`Diagram`](crate::Diagram).
//!
//! The scene owns components and connections in insertion order and keeps two
//! indexes in step with them:
//! - a label index, so labels stay unique and can be looked up directly
//! - an incidence index from each component to the connections touching it,
//!   so moving a component re-routes only the affected wires
//!
//! Every public-to-the-crate mutation either completes or leaves the scene
//! untouched. Nothing here records history; that is the diagram's job.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};
use log::{trace, warn};

use breadboard_core::{
    geometry::{Point, Rotation},
    identifier::{ComponentId, ConnectionId, Label},
};

use crate::{
    component::Component,
    connection::{Connection, PinRef},
    error::BreadboardError,
    route::{self, Route},
};

#[derive(Debug, Default)]
pub(crate) struct Scene {
    components: IndexMap<ComponentId, Component>,
    connections: IndexMap<ConnectionId, Connection>,
    labels: HashMap<Label, ComponentId>,
    incidence: HashMap<ComponentId, IndexSet<ConnectionId>>,
    next_component: u64,
    next_connection: u64,
}

impl Scene {
    /// Reserves a fresh component id. Ids are never handed out twice.
    pub fn allocate_component_id(&mut self) -> ComponentId {
        let id = ComponentId::new(self.next_component);
        self.next_component += 1;
        id
    }

    fn allocate_connection_id(&mut self) -> ConnectionId {
        let id = ConnectionId::new(self.next_connection);
        self.next_connection += 1;
        id
    }

    pub fn components(&self) -> impl ExactSizeIterator<Item = &Component> {
        self.components.values()
    }

    pub fn connections(&self) -> impl ExactSizeIterator<Item = &Connection> {
        self.connections.values()
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(&id)
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&id)
    }

    pub fn component_by_label(&self, label: Label) -> Option<&Component> {
        self.labels
            .get(&label)
            .and_then(|id| self.components.get(id))
    }

    /// Connections touching `id`, in the order they were attached.
    pub fn connections_of(&self, id: ComponentId) -> impl Iterator<Item = &Connection> {
        self.incidence
            .get(&id)
            .into_iter()
            .flatten()
            .filter_map(|connection_id| self.connections.get(connection_id))
    }

    /// Fails with `DuplicateLabel` if `label` belongs to a component other
    /// than `owner`.
    pub fn ensure_label_free(
        &self,
        label: Label,
        owner: Option<ComponentId>,
    ) -> Result<(), BreadboardError> {
        match self.labels.get(&label) {
            Some(existing) if Some(*existing) != owner => {
                Err(BreadboardError::DuplicateLabel(label.to_string()))
            }
            _ => Ok(()),
        }
    }

    /// Returns the scene position of a pin.
    ///
    /// # Errors
    ///
    /// `ComponentNotFound` for an unknown component, `PinIndexOutOfRange` for
    /// a pin index past the component's pin count.
    pub fn resolve_pin(&self, pin: PinRef) -> Result<Point, BreadboardError> {
        let component = self
            .components
            .get(&pin.component())
            .ok_or(BreadboardError::ComponentNotFound(pin.component()))?;
        component
            .pin_position(pin.pin())
            .ok_or_else(|| BreadboardError::PinIndexOutOfRange {
                label: component.label().to_string(),
                index: pin.pin(),
                pin_count: component.pin_count(),
            })
    }

    fn route_between(&self, source: PinRef, target: PinRef) -> Result<Route, BreadboardError> {
        let from = self.resolve_pin(source)?;
        let to = self.resolve_pin(target)?;
        Ok(route::orthogonal(from, to))
    }

    /// Inserts a component whose label the caller has already checked.
    pub fn insert_component(&mut self, component: Component) {
        let id = component.id();
        self.labels.insert(component.label(), id);
        self.incidence.entry(id).or_default();
        self.components.insert(id, component);
    }

    /// Removes a component together with every connection touching it.
    ///
    /// The cascaded connections are returned in the order they were attached.
    pub fn remove_component(&mut self, id: ComponentId) -> Option<(Component, Vec<Connection>)> {
        let component = self.components.shift_remove(&id)?;
        self.labels.remove(&component.label());

        let attached = self.incidence.remove(&id).unwrap_or_default();
        let connections: Vec<Connection> = attached
            .into_iter()
            .filter_map(|connection_id| self.remove_connection(connection_id))
            .collect();

        trace!(component = id.to_string(), cascaded = connections.len(); "Removed component");
        Some((component, connections))
    }

    /// Puts back a removed component and its cascaded connections.
    ///
    /// Everything is validated before anything is inserted. Routes are
    /// recomputed from the current pin positions.
    pub fn restore_component(
        &mut self,
        component: Component,
        connections: Vec<Connection>,
    ) -> Result<(), BreadboardError> {
        let id = component.id();
        self.ensure_label_free(component.label(), Some(id))?;
        for connection in &connections {
            for end in connection.endpoints() {
                if end.component() == id {
                    if component.pin(end.pin()).is_none() {
                        return Err(BreadboardError::PinIndexOutOfRange {
                            label: component.label().to_string(),
                            index: end.pin(),
                            pin_count: component.pin_count(),
                        });
                    }
                } else {
                    self.resolve_pin(end)?;
                }
            }
        }

        self.insert_component(component);
        for connection in connections {
            // Endpoints were checked above
            self.restore_connection(connection)?;
        }
        Ok(())
    }

    /// Validates a new connection and inserts it with a fresh id.
    ///
    /// Checks run in order: both components exist, both pin indices are in
    /// range, the pins differ, the components differ.
    pub fn add_connection(
        &mut self,
        source: PinRef,
        target: PinRef,
    ) -> Result<ConnectionId, BreadboardError> {
        for end in [source, target] {
            if !self.components.contains_key(&end.component()) {
                return Err(BreadboardError::ComponentNotFound(end.component()));
            }
        }
        let route = self.route_between(source, target)?;
        if source == target {
            return Err(BreadboardError::SamePin);
        }
        if source.component() == target.component() {
            let label = self
                .components
                .get(&source.component())
                .map(|component| component.label().to_string())
                .unwrap_or_default();
            return Err(BreadboardError::SameComponent(label));
        }

        let id = self.allocate_connection_id();
        self.insert_connection(Connection::new(id, source, target, route));
        Ok(id)
    }

    /// Puts back a removed connection under its original id, re-routing it.
    pub fn restore_connection(
        &mut self,
        mut connection: Connection,
    ) -> Result<Connection, BreadboardError> {
        let route = self.route_between(connection.source(), connection.target())?;
        connection.set_route(route);
        self.insert_connection(connection.clone());
        Ok(connection)
    }

    fn insert_connection(&mut self, connection: Connection) {
        let id = connection.id();
        for end in connection.endpoints() {
            self.incidence.entry(end.component()).or_default().insert(id);
        }
        self.connections.insert(id, connection);
    }

    pub fn remove_connection(&mut self, id: ConnectionId) -> Option<Connection> {
        let connection = self.connections.shift_remove(&id)?;
        for end in connection.endpoints() {
            if let Some(attached) = self.incidence.get_mut(&end.component()) {
                attached.shift_remove(&id);
            }
        }
        Some(connection)
    }

    /// Moves a component to an already snapped position and re-routes its
    /// connections.
    pub fn set_position(&mut self, id: ComponentId, position: Point) -> Option<()> {
        self.components.get_mut(&id)?.set_position(position);
        self.reroute(id);
        Some(())
    }

    pub fn rotate(&mut self, id: ComponentId) -> Option<Rotation> {
        let rotation = self.components.get_mut(&id)?.rotate();
        self.reroute(id);
        Some(rotation)
    }

    /// Relabels a component whose new label the caller has already checked.
    pub fn relabel(&mut self, id: ComponentId, label: Label) -> Option<Label> {
        let component = self.components.get_mut(&id)?;
        let previous = component.label();
        component.set_label(label);
        self.labels.remove(&previous);
        self.labels.insert(label, id);
        Some(previous)
    }

    /// Recomputes routes of the connections touching `id`, and only those.
    fn reroute(&mut self, id: ComponentId) {
        let Some(attached) = self.incidence.get(&id) else {
            return;
        };
        let attached: Vec<ConnectionId> = attached.iter().copied().collect();
        for connection_id in attached {
            let Some((source, target)) = self
                .connections
                .get(&connection_id)
                .map(|connection| (connection.source(), connection.target()))
            else {
                continue;
            };
            match self.route_between(source, target) {
                Ok(route) => {
                    if let Some(connection) = self.connections.get_mut(&connection_id) {
                        connection.set_route(route);
                    }
                }
                Err(err) => {
                    warn!(connection = connection_id.to_string(), error:% = err; "Failed to re-route connection");
                }
            }
        }
        trace!(component = id.to_string(); "Re-routed attached connections");
    }
}
