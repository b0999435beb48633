//! Breadboard - An editor core for schematic component diagrams.
//!
//! Components (chips and passive parts) are placed on a grid and wired pin to
//! pin with orthogonal connections. Structural edits can be undone and redone,
//! and a diagram can be saved to and loaded from a JSON project file.
//!
//! The [`Diagram`] type is the entry point. A presentation layer drives it
//! through its mutation methods and reads back geometry through
//! [`Diagram::render_data`], [`Diagram::route_of`] and [`Diagram::hit_test`].
//!
//! # Examples
//!
//! ```
//! use breadboard::{ComponentSpec, Diagram, PinRef, config::AppConfig};
//! use breadboard::{geometry::Point, kind::ComponentKind, pin::PinLayout};
//!
//! let mut diagram = Diagram::new(AppConfig::default()).unwrap();
//!
//! let mcu = diagram
//!     .add_component(&ComponentSpec::new("MCU", 8, PinLayout::LeftRight))
//!     .unwrap();
//! let r1 = diagram
//!     .add_component(
//!         &ComponentSpec::for_kind("R1", ComponentKind::Resistor, 2, PinLayout::LeftRight)
//!             .with_position(Point::new(240.0, 120.0)),
//!     )
//!     .unwrap();
//!
//! let wire = diagram.connect(PinRef::new(mcu, 1), PinRef::new(r1, 0)).unwrap();
//! let route = diagram.route_of(wire).unwrap();
//! assert_eq!(route.bends().len(), 1);
//!
//! // Deleting a component takes its connections with it...
//! diagram.delete_component(r1).unwrap();
//! assert!(diagram.list_connections().is_empty());
//!
//! // ...and undo brings both back
//! diagram.undo().unwrap();
//! assert!(diagram.get_connection(wire).is_some());
//!
//! let json = diagram.to_json().unwrap();
//! let mut copy = Diagram::default();
//! copy.load_json(&json).unwrap();
//! assert_eq!(copy.list_components().len(), 2);
//! ```

pub mod config;
pub mod project;
pub mod route;

mod component;
mod connection;
mod diagram;
mod error;
mod history;
mod scene;

pub use breadboard_core::{geometry, identifier, kind, pin};

pub use component::{Component, ComponentSpec};
pub use connection::{Connection, PinRef};
pub use diagram::{Diagram, RenderData, SceneItem};
pub use error::BreadboardError;
pub use history::Command;
