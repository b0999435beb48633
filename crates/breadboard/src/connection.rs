//! Wires between pins of two different components.

use std::fmt;

use breadboard_core::identifier::{ComponentId, ConnectionId};

use crate::route::Route;

/// Non-owning reference to one pin of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinRef {
    component: ComponentId,
    pin: usize,
}

impl PinRef {
    pub fn new(component: ComponentId, pin: usize) -> Self {
        Self { component, pin }
    }

    pub fn component(self) -> ComponentId {
        self.component
    }

    /// Index into the component's pin list
    pub fn pin(self) -> usize {
        self.pin
    }
}

impl fmt::Display for PinRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.component, self.pin)
    }
}

/// An orthogonally routed wire.
///
/// Connections are undirected for queries. The source/target order is kept so
/// that saving a diagram twice produces the same file.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    id: ConnectionId,
    source: PinRef,
    target: PinRef,
    route: Route,
}

impl Connection {
    pub(crate) fn new(id: ConnectionId, source: PinRef, target: PinRef, route: Route) -> Self {
        Self {
            id,
            source,
            target,
            route,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn source(&self) -> PinRef {
        self.source
    }

    pub fn target(&self) -> PinRef {
        self.target
    }

    pub fn endpoints(&self) -> [PinRef; 2] {
        [self.source, self.target]
    }

    /// Current route geometry
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Returns true if either endpoint is on `component`.
    pub fn touches(&self, component: ComponentId) -> bool {
        self.source.component == component || self.target.component == component
    }

    /// Returns the endpoint on the other side from `component`, if the
    /// connection touches it.
    pub fn opposite(&self, component: ComponentId) -> Option<PinRef> {
        if self.source.component == component {
            Some(self.target)
        } else if self.target.component == component {
            Some(self.source)
        } else {
            None
        }
    }

    pub(crate) fn set_route(&mut self, route: Route) {
        self.route = route;
    }
}
