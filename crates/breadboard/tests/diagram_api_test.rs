//! Integration tests for the Diagram editing API
//!
//! These tests drive the public API the way an editor front end would.

use breadboard::{
    BreadboardError, ComponentSpec, Diagram, PinRef, SceneItem,
    geometry::{Point, Rotation},
    identifier::ComponentId,
    kind::ComponentKind,
    pin::PinLayout,
};

fn chip(label: &str, x: f32, y: f32) -> ComponentSpec {
    ComponentSpec::new(label, 4, PinLayout::LeftRight).with_position(Point::new(x, y))
}

/// Three chips in a row with A-B and B-C wired.
fn three_in_a_row() -> (Diagram, [ComponentId; 3]) {
    let mut diagram = Diagram::default();
    let a = diagram.add_component(&chip("A", 0.0, 0.0)).unwrap();
    let b = diagram.add_component(&chip("B", 200.0, 0.0)).unwrap();
    let c = diagram.add_component(&chip("C", 400.0, 0.0)).unwrap();
    diagram.connect(PinRef::new(a, 1), PinRef::new(b, 0)).unwrap();
    diagram.connect(PinRef::new(b, 1), PinRef::new(c, 0)).unwrap();
    (diagram, [a, b, c])
}

#[test]
fn test_connect_rejects_same_pin() {
    let mut diagram = Diagram::default();
    let a = diagram.add_component(&chip("A", 0.0, 0.0)).unwrap();
    let err = diagram
        .connect(PinRef::new(a, 0), PinRef::new(a, 0))
        .unwrap_err();
    assert!(matches!(err, BreadboardError::SamePin));
}

#[test]
fn test_connect_rejects_same_component() {
    let mut diagram = Diagram::default();
    let a = diagram.add_component(&chip("A", 0.0, 0.0)).unwrap();
    let err = diagram
        .connect(PinRef::new(a, 0), PinRef::new(a, 1))
        .unwrap_err();
    assert!(matches!(err, BreadboardError::SameComponent(label) if label == "A"));
    assert!(diagram.list_connections().is_empty());
}

#[test]
fn test_connect_checks_existence_before_pins() {
    let mut diagram = Diagram::default();
    let a = diagram.add_component(&chip("A", 0.0, 0.0)).unwrap();
    let missing = ComponentId::new(42);

    let err = diagram
        .connect(PinRef::new(a, 99), PinRef::new(missing, 0))
        .unwrap_err();
    assert!(matches!(err, BreadboardError::ComponentNotFound(id) if id == missing));

    let b = diagram.add_component(&chip("B", 200.0, 0.0)).unwrap();
    let err = diagram
        .connect(PinRef::new(a, 4), PinRef::new(b, 0))
        .unwrap_err();
    assert!(matches!(
        err,
        BreadboardError::PinIndexOutOfRange { index: 4, pin_count: 4, .. }
    ));
}

#[test]
fn test_connect_succeeds_and_is_retrievable() {
    let mut diagram = Diagram::default();
    let a = diagram.add_component(&chip("A", 0.0, 0.0)).unwrap();
    let b = diagram.add_component(&chip("B", 200.0, 100.0)).unwrap();
    let wire = diagram.connect(PinRef::new(a, 1), PinRef::new(b, 0)).unwrap();

    let connection = diagram.get_connection(wire).unwrap();
    assert_eq!(connection.source(), PinRef::new(a, 1));
    assert_eq!(connection.target(), PinRef::new(b, 0));
    assert!(connection.touches(a) && connection.touches(b));

    let route = connection.route();
    assert_eq!(route.start(), diagram.get_pin_scene_position(a, 1).unwrap());
    assert_eq!(route.end(), diagram.get_pin_scene_position(b, 0).unwrap());
    for (from, to) in route.segments() {
        assert!(from.x() == to.x() || from.y() == to.y());
    }
}

#[test]
fn test_delete_component_undo_redo() {
    let (mut diagram, [a, b, c]) = three_in_a_row();
    let before: Vec<_> = diagram.connections_of(b).into_iter().cloned().collect();

    diagram.delete_component(b).unwrap();
    assert!(diagram.get_component(b).is_none());
    assert!(diagram.list_connections().is_empty());
    assert!(diagram.connections_of(a).is_empty());

    assert!(diagram.undo().unwrap());
    let restored: Vec<_> = diagram.connections_of(b).into_iter().cloned().collect();
    assert_eq!(restored, before);
    assert_eq!(diagram.connections_of(c).len(), 1);

    assert!(diagram.redo().unwrap());
    assert!(diagram.get_component(b).is_none());
    assert!(diagram.list_connections().is_empty());
    assert_eq!(diagram.list_components().len(), 2);
}

#[test]
fn test_mutation_after_undo_clears_redo() {
    let (mut diagram, [a, _, c]) = three_in_a_row();
    diagram.undo().unwrap();
    assert!(diagram.can_redo());

    diagram.connect(PinRef::new(a, 2), PinRef::new(c, 3)).unwrap();
    assert!(!diagram.can_redo());
    assert!(!diagram.redo().unwrap());
}

#[test]
fn test_undo_walks_back_to_empty() {
    let (mut diagram, _) = three_in_a_row();
    let mut steps = 0;
    while diagram.undo().unwrap() {
        steps += 1;
    }
    assert_eq!(steps, 5);
    assert!(diagram.list_components().is_empty());

    while diagram.redo().unwrap() {}
    assert_eq!(diagram.list_components().len(), 3);
    assert_eq!(diagram.list_connections().len(), 2);
}

#[test]
fn test_undo_delete_connection() {
    let (mut diagram, [a, b, _]) = three_in_a_row();
    let wire = diagram.connections_of(a)[0].id();
    diagram.delete_connection(wire).unwrap();
    assert_eq!(diagram.connections_of(b).len(), 1);

    diagram.undo().unwrap();
    assert!(diagram.get_connection(wire).is_some());
    assert_eq!(diagram.connections_of(b).len(), 2);
}

#[test]
fn test_restored_connections_follow_moves() {
    let (mut diagram, [a, b, _]) = three_in_a_row();
    let wire = diagram.connections_of(a)[0].id();

    diagram.delete_connection(wire).unwrap();
    diagram.move_component(a, Point::new(0.0, 200.0)).unwrap();
    diagram.undo().unwrap();

    let route = diagram.route_of(wire).unwrap();
    assert_eq!(route.start(), diagram.get_pin_scene_position(a, 1).unwrap());
    assert_eq!(route.end(), diagram.get_pin_scene_position(b, 0).unwrap());
}

#[test]
fn test_rotation_cycle_returns_pins() {
    let (mut diagram, [_, b, _]) = three_in_a_row();
    let pins: Vec<Point> = (0..4)
        .map(|index| diagram.get_pin_scene_position(b, index).unwrap())
        .collect();

    let rotations: Vec<Rotation> = (0..4).map(|_| diagram.rotate_component(b).unwrap()).collect();
    assert_eq!(
        rotations,
        [Rotation::Deg90, Rotation::Deg180, Rotation::Deg270, Rotation::Deg0]
    );

    let after: Vec<Point> = (0..4)
        .map(|index| diagram.get_pin_scene_position(b, index).unwrap())
        .collect();
    assert_eq!(pins, after);
}

#[test]
fn test_render_data_for_every_kind() {
    let mut diagram = Diagram::default();
    let kinds = [
        ComponentKind::Capacitor,
        ComponentKind::Resistor,
        ComponentKind::Inductor,
        ComponentKind::CrystalOscillator,
        ComponentKind::Diode,
        ComponentKind::DipSwitch,
    ];
    for (i, kind) in kinds.into_iter().enumerate() {
        let spec = ComponentSpec::for_kind(format!("P{i}"), kind, 6, PinLayout::AllSides)
            .with_position(Point::new(i as f32 * 200.0, 0.0));
        let id = diagram.add_component(&spec).unwrap();
        let data = diagram.render_data(id).unwrap();
        assert_eq!(data.kind, kind);
        assert_eq!(data.pins.len(), diagram.get_component(id).unwrap().pin_count());
        for pin in &data.pins {
            assert!(data.bounds.inflate(0.01).contains(*pin));
        }
    }
}

#[test]
fn test_hit_test_prefers_pins() {
    let (diagram, [a, _, _]) = three_in_a_row();
    let pin = diagram.get_pin_scene_position(a, 1).unwrap();
    match diagram.hit_test(pin, 2.0) {
        Some(SceneItem::Pin { component, index, position }) => {
            assert_eq!(component.id(), a);
            assert_eq!(index, 1);
            assert_eq!(position, pin);
        }
        other => panic!("expected a pin, got {other:?}"),
    }
}
