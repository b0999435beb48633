//! Undo/redo history of structural edits.
//!
//! Each [`Command`] carries the entity state needed both to perform and to
//! invert itself. Moving a command between the two stacks re-captures that
//! state from the scene, so a component that was moved after being added
//! comes back where it was last seen.

use breadboard_core::identifier::ComponentId;

use crate::{
    component::Component, connection::Connection, error::BreadboardError, scene::Scene,
};

/// A reversible structural edit.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddComponent(Component),
    /// A component deletion, with the connections that were removed along
    /// with it.
    DeleteComponent {
        component: Component,
        connections: Vec<Connection>,
    },
    AddConnection(Connection),
    DeleteConnection(Connection),
}

impl Command {
    /// Short name used in log output
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddComponent(_) => "add component",
            Self::DeleteComponent { .. } => "delete component",
            Self::AddConnection(_) => "add connection",
            Self::DeleteConnection(_) => "delete connection",
        }
    }

    /// Performs the edit again and returns it with freshly captured state.
    ///
    /// On error the scene is unchanged.
    pub(crate) fn apply(&self, scene: &mut Scene) -> Result<Command, BreadboardError> {
        match self {
            Self::AddComponent(component) => {
                scene.restore_component(component.clone(), Vec::new())?;
                Ok(Self::AddComponent(component.clone()))
            }
            Self::DeleteComponent { component, .. } => {
                let (component, connections) = take_component(scene, component.id())?;
                Ok(Self::DeleteComponent {
                    component,
                    connections,
                })
            }
            Self::AddConnection(connection) => scene
                .restore_connection(connection.clone())
                .map(Self::AddConnection),
            Self::DeleteConnection(connection) => scene
                .remove_connection(connection.id())
                .map(Self::DeleteConnection)
                .ok_or(BreadboardError::ConnectionNotFound(connection.id())),
        }
    }

    /// Inverts the edit and returns it with freshly captured state.
    ///
    /// On error the scene is unchanged.
    pub(crate) fn revert(&self, scene: &mut Scene) -> Result<Command, BreadboardError> {
        match self {
            Self::AddComponent(component) => {
                let (component, _) = take_component(scene, component.id())?;
                Ok(Self::AddComponent(component))
            }
            Self::DeleteComponent {
                component,
                connections,
            } => {
                scene.restore_component(component.clone(), connections.clone())?;
                let connections = scene.connections_of(component.id()).cloned().collect();
                Ok(Self::DeleteComponent {
                    component: component.clone(),
                    connections,
                })
            }
            Self::AddConnection(connection) => scene
                .remove_connection(connection.id())
                .map(Self::AddConnection)
                .ok_or(BreadboardError::ConnectionNotFound(connection.id())),
            Self::DeleteConnection(connection) => scene
                .restore_connection(connection.clone())
                .map(Self::DeleteConnection),
        }
    }
}

fn take_component(
    scene: &mut Scene,
    id: ComponentId,
) -> Result<(Component, Vec<Connection>), BreadboardError> {
    scene
        .remove_component(id)
        .ok_or(BreadboardError::ComponentNotFound(id))
}

/// Two stacks of commands: done and undone.
#[derive(Debug, Default)]
pub(crate) struct CommandLog {
    undo: Vec<Command>,
    redo: Vec<Command>,
}

impl CommandLog {
    /// Records a direct edit. Anything previously undone is forgotten.
    pub fn record(&mut self, command: Command) {
        self.undo.push(command);
        self.redo.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Reverts the newest command, if any.
    ///
    /// Returns the command that was reverted. A command that fails to revert
    /// stays on the undo stack.
    pub fn undo(&mut self, scene: &mut Scene) -> Result<Option<&Command>, BreadboardError> {
        let Some(command) = self.undo.last() else {
            return Ok(None);
        };
        let refreshed = command.revert(scene)?;
        self.undo.pop();
        self.redo.push(refreshed);
        Ok(self.redo.last())
    }

    /// Re-applies the newest undone command, if any.
    pub fn redo(&mut self, scene: &mut Scene) -> Result<Option<&Command>, BreadboardError> {
        let Some(command) = self.redo.last() else {
            return Ok(None);
        };
        let refreshed = command.apply(scene)?;
        self.redo.pop();
        self.undo.push(refreshed);
        Ok(self.undo.last())
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

#[cfg(test)]
mod tests {
    use breadboard_core::{geometry::Point, pin::PinLayout};

    use super::*;
    use crate::{component::ComponentSpec, connection::PinRef};

    fn place(scene: &mut Scene, label: &str, x: f32) -> ComponentId {
        let id = scene.allocate_component_id();
        let spec = ComponentSpec::new(label, 2, PinLayout::LeftRight).with_position(Point::new(x, 0.0));
        scene.insert_component(Component::build(id, &spec).unwrap());
        id
    }

    #[test]
    fn test_empty_log_is_noop() {
        let mut scene = Scene::default();
        let mut log = CommandLog::default();
        assert!(!log.can_undo());
        assert!(!log.can_redo());
        assert!(log.undo(&mut scene).unwrap().is_none());
        assert!(log.redo(&mut scene).unwrap().is_none());
    }

    #[test]
    fn test_record_clears_redo() {
        let mut scene = Scene::default();
        let mut log = CommandLog::default();

        let a = place(&mut scene, "A", 0.0);
        log.record(Command::AddComponent(scene.component(a).unwrap().clone()));
        log.undo(&mut scene).unwrap();
        assert!(log.can_redo());

        let b = place(&mut scene, "B", 200.0);
        log.record(Command::AddComponent(scene.component(b).unwrap().clone()));
        assert!(!log.can_redo());
    }

    #[test]
    fn test_delete_component_round_trip() {
        let mut scene = Scene::default();
        let mut log = CommandLog::default();
        let a = place(&mut scene, "A", 0.0);
        let b = place(&mut scene, "B", 200.0);
        let wire = scene
            .add_connection(PinRef::new(a, 1), PinRef::new(b, 0))
            .unwrap();

        let (component, connections) = scene.remove_component(a).unwrap();
        log.record(Command::DeleteComponent {
            component,
            connections,
        });
        assert!(scene.connection(wire).is_none());

        let reverted = log.undo(&mut scene).unwrap().unwrap();
        assert_eq!(reverted.name(), "delete component");
        assert!(scene.component(a).is_some());
        assert!(scene.connection(wire).is_some());

        log.redo(&mut scene).unwrap();
        assert!(scene.component(a).is_none());
        assert!(scene.connection(wire).is_none());
        assert_eq!(scene.connections_of(b).count(), 0);
    }

    #[test]
    fn test_failed_undo_keeps_command() {
        let mut scene = Scene::default();
        let mut log = CommandLog::default();
        let a = place(&mut scene, "A", 0.0);
        let (component, connections) = scene.remove_component(a).unwrap();
        log.record(Command::DeleteComponent {
            component,
            connections,
        });
        place(&mut scene, "A", 100.0);

        assert!(matches!(
            log.undo(&mut scene),
            Err(BreadboardError::DuplicateLabel(_))
        ));
        assert!(log.can_undo());
        assert!(!log.can_redo());
    }
}
