//! Placed components and the specs they are built from.

use breadboard_core::{
    geometry::{Bounds, Point, Rotation, Size},
    identifier::{ComponentId, Label},
    kind::ComponentKind,
    pin::{LayoutError, Pin, PinLayout},
};

/// Everything needed to create a component.
///
/// # Examples
///
/// ```
/// # use breadboard::ComponentSpec;
/// # use breadboard::{geometry::Point, kind::ComponentKind, pin::PinLayout};
/// let spec = ComponentSpec::new("U1", 16, PinLayout::AllSides).with_position(Point::new(40.0, 60.0));
/// assert_eq!(spec.pin_count(), 16);
///
/// // Kind presets override pin count and layout for fixed parts
/// let resistor = ComponentSpec::for_kind("R1", ComponentKind::Resistor, 8, PinLayout::TopBottom);
/// assert_eq!(resistor.pin_count(), 2);
/// assert_eq!(resistor.layout(), PinLayout::LeftRight);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSpec {
    label: String,
    kind: ComponentKind,
    pin_count: usize,
    layout: PinLayout,
    size: Option<Size>,
    position: Point,
}

impl ComponentSpec {
    /// Creates a spec for a regular IC chip at the origin.
    pub fn new(label: impl Into<String>, pin_count: usize, layout: PinLayout) -> Self {
        Self {
            label: label.into(),
            kind: ComponentKind::default(),
            pin_count,
            layout,
            size: None,
            position: Point::default(),
        }
    }

    /// Creates a spec for `kind`, applying the kind's pin presets.
    pub fn for_kind(
        label: impl Into<String>,
        kind: ComponentKind,
        pin_count: usize,
        layout: PinLayout,
    ) -> Self {
        let (pin_count, layout) = kind.constrain(pin_count, layout);
        Self::new(label, pin_count, layout).with_kind(kind)
    }

    /// Sets the kind without touching pin count or layout.
    pub fn with_kind(mut self, kind: ComponentKind) -> Self {
        self.kind = kind;
        self
    }

    /// Overrides the kind's default size.
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the requested position. The diagram snaps it to the grid.
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn pin_count(&self) -> usize {
        self.pin_count
    }

    pub fn layout(&self) -> PinLayout {
        self.layout
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns the explicit size, or the kind's default size.
    pub fn size(&self) -> Size {
        self.size
            .unwrap_or_else(|| self.kind.default_size(self.pin_count))
    }
}

/// A positioned, rotatable component that owns its pins.
///
/// Pin offsets are generated once, in [`Component::build`], and never change.
/// Moving or rotating a component changes only where those offsets land in
/// diagram space (see [`Component::pin_position`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    id: ComponentId,
    label: Label,
    kind: ComponentKind,
    layout: PinLayout,
    size: Size,
    position: Point,
    rotation: Rotation,
    pins: Vec<Pin>,
}

impl Component {
    /// Builds a component from a spec, generating its pins.
    ///
    /// The position is used as given; grid snapping is the diagram's job.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] when the pin count, size or layout is invalid.
    pub(crate) fn build(id: ComponentId, spec: &ComponentSpec) -> Result<Self, LayoutError> {
        let size = spec.size();
        let pins = spec.layout.generate(size, spec.pin_count)?;
        Ok(Self {
            id,
            label: Label::new(&spec.label),
            kind: spec.kind,
            layout: spec.layout,
            size,
            position: spec.position,
            rotation: Rotation::default(),
            pins,
        })
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn layout(&self) -> PinLayout {
        self.layout
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Position of the component origin in diagram space
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    pub fn pin(&self, index: usize) -> Option<&Pin> {
        self.pins.get(index)
    }

    /// Maps a local offset to diagram space: `position + rotate(offset)`.
    pub fn to_scene(&self, offset: Point) -> Point {
        self.position.add_point(self.rotation.apply(offset))
    }

    /// Returns the diagram-space position of the pin at `index`.
    pub fn pin_position(&self, index: usize) -> Option<Point> {
        self.pins.get(index).map(|pin| self.to_scene(pin.offset()))
    }

    /// Corners of the component outline in diagram space, clockwise from the
    /// local origin.
    pub fn outline(&self) -> [Point; 4] {
        let (w, h) = (self.size.width(), self.size.height());
        [
            Point::new(0.0, 0.0),
            Point::new(w, 0.0),
            Point::new(w, h),
            Point::new(0.0, h),
        ]
        .map(|corner| self.to_scene(corner))
    }

    /// Axis-aligned bounds of the rotated outline.
    pub fn bounds(&self) -> Bounds {
        Bounds::enclosing(self.outline()).unwrap_or_default()
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub(crate) fn set_label(&mut self, label: Label) {
        self.label = label;
    }

    /// Advances the rotation one quarter turn and returns the new rotation.
    pub(crate) fn rotate(&mut self) -> Rotation {
        self.rotation = self.rotation.next();
        self.rotation
    }
}
