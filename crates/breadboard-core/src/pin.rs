//! Pin layout policies.
//!
//! A component's pins are generated once, at construction, from its size, its
//! pin count and a [`PinLayout`]. Each side places its pins at interior
//! positions `(i + 1) * span / (count + 1)`, so a pin never lands on a corner.

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::geometry::{Point, Size};

/// Smallest number of pins a component may have.
pub const MIN_PIN_COUNT: usize = 2;

/// Largest number of pins a component may have.
pub const MAX_PIN_COUNT: usize = 64;

/// Errors raised while generating a pin layout.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("a component needs at least 2 pins, got {0}")]
    TooFewPins(usize),

    #[error("a component can have at most 64 pins, got {0}")]
    TooManyPins(usize),

    #[error("component size must be positive, got {width}x{height}")]
    InvalidSize { width: f32, height: f32 },

    #[error("unknown pin orientation `{0}`")]
    UnknownOrientation(String),
}

/// The edge of a component a pin sits on, in unrotated local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

/// An anchor point on a component's boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pin {
    index: usize,
    offset: Point,
    side: Side,
}

impl Pin {
    fn new(index: usize, offset: Point, side: Side) -> Self {
        Self {
            index,
            offset,
            side,
        }
    }

    /// Position of the pin in the owning component's pin list
    pub fn index(&self) -> usize {
        self.index
    }

    /// Offset from the component origin, before rotation
    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn side(&self) -> Side {
        self.side
    }
}

/// How pins are distributed around a component's edges.
///
/// The parsed and displayed names match the project file's `pin_orientation`
/// field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PinLayout {
    /// Pins split between the left and right edges
    #[default]
    LeftRight,
    /// Pins split between the top and bottom edges
    TopBottom,
    /// Pins spread over all four edges, surplus on top
    AllSides,
}

impl PinLayout {
    /// Returns the name used in project files
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LeftRight => "left-right",
            Self::TopBottom => "top-bottom",
            Self::AllSides => "all-sides",
        }
    }

    /// Generates exactly `pin_count` pins for a component of the given size.
    ///
    /// Pin order is deterministic, so a diagram reloaded from a project file
    /// resolves the same pin indices to the same positions:
    ///
    /// - [`PinLayout::LeftRight`] and [`PinLayout::TopBottom`] interleave the
    ///   two sides (first, second, first, second, ...). The first side takes
    ///   the extra pin when the count is odd.
    /// - [`PinLayout::AllSides`] emits top, bottom, left, then right. Every
    ///   side gets `pin_count / 4` pins and the top also takes the remainder.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] when `pin_count` is outside
    /// [`MIN_PIN_COUNT`]..=[`MAX_PIN_COUNT`] or the size is not strictly
    /// positive.
    ///
    /// # Examples
    ///
    /// ```
    /// # use breadboard_core::geometry::{Point, Size};
    /// # use breadboard_core::pin::PinLayout;
    /// let pins = PinLayout::LeftRight.generate(Size::new(100.0, 50.0), 2).unwrap();
    /// assert_eq!(pins.len(), 2);
    /// assert_eq!(pins[0].offset(), Point::new(0.0, 25.0));
    /// assert_eq!(pins[1].offset(), Point::new(100.0, 25.0));
    /// ```
    pub fn generate(self, size: Size, pin_count: usize) -> Result<Vec<Pin>, LayoutError> {
        if pin_count < MIN_PIN_COUNT {
            return Err(LayoutError::TooFewPins(pin_count));
        }
        if pin_count > MAX_PIN_COUNT {
            return Err(LayoutError::TooManyPins(pin_count));
        }
        if !size.is_positive() {
            return Err(LayoutError::InvalidSize {
                width: size.width(),
                height: size.height(),
            });
        }

        let width = size.width();
        let height = size.height();
        let mut pins = Vec::with_capacity(pin_count);

        match self {
            Self::LeftRight => {
                let (first, second) = split_two(pin_count);
                interleave(
                    &mut pins,
                    spread(first, height).map(|y| (Point::new(0.0, y), Side::Left)),
                    spread(second, height).map(|y| (Point::new(width, y), Side::Right)),
                );
            }
            Self::TopBottom => {
                let (first, second) = split_two(pin_count);
                interleave(
                    &mut pins,
                    spread(first, width).map(|x| (Point::new(x, 0.0), Side::Top)),
                    spread(second, width).map(|x| (Point::new(x, height), Side::Bottom)),
                );
            }
            Self::AllSides => {
                let per_side = pin_count / 4;
                let top = per_side + pin_count % 4;
                let sides = spread(top, width)
                    .map(|x| (Point::new(x, 0.0), Side::Top))
                    .chain(spread(per_side, width).map(|x| (Point::new(x, height), Side::Bottom)))
                    .chain(spread(per_side, height).map(|y| (Point::new(0.0, y), Side::Left)))
                    .chain(spread(per_side, height).map(|y| (Point::new(width, y), Side::Right)));
                for (offset, side) in sides {
                    pins.push(Pin::new(pins.len(), offset, side));
                }
            }
        }

        debug_assert_eq!(pins.len(), pin_count);
        Ok(pins)
    }
}

impl fmt::Display for PinLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PinLayout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left-right" => Ok(Self::LeftRight),
            "top-bottom" => Ok(Self::TopBottom),
            "all-sides" => Ok(Self::AllSides),
            other => Err(LayoutError::UnknownOrientation(other.to_string())),
        }
    }
}

/// Splits a pin count over two sides, the first side taking the odd pin.
fn split_two(pin_count: usize) -> (usize, usize) {
    (pin_count.div_ceil(2), pin_count / 2)
}

/// Interior positions of `count` pins along a side of length `span`.
fn spread(count: usize, span: f32) -> impl Iterator<Item = f32> {
    let spacing = span / (count as f32 + 1.0);
    (0..count).map(move |i| (i as f32 + 1.0) * spacing)
}

fn interleave(
    pins: &mut Vec<Pin>,
    first: impl Iterator<Item = (Point, Side)>,
    second: impl Iterator<Item = (Point, Side)>,
) {
    let mut first = first.fuse();
    let mut second = second.fuse();
    loop {
        let a = first.next();
        let b = second.next();
        if a.is_none() && b.is_none() {
            break;
        }
        for (offset, side) in a.into_iter().chain(b) {
            pins.push(Pin::new(pins.len(), offset, side));
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn layout_strategy() -> impl Strategy<Value = PinLayout> {
        prop_oneof![
            Just(PinLayout::LeftRight),
            Just(PinLayout::TopBottom),
            Just(PinLayout::AllSides),
        ]
    }

    fn size_strategy() -> impl Strategy<Value = Size> {
        (1.0f32..400.0, 1.0f32..400.0).prop_map(|(w, h)| Size::new(w, h))
    }

    /// Every policy produces exactly the requested number of pins.
    fn check_pin_count_matches(
        layout: PinLayout,
        size: Size,
        pin_count: usize,
    ) -> Result<(), TestCaseError> {
        let pins = layout.generate(size, pin_count).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(pins.len(), pin_count);
        Ok(())
    }

    /// Pins sit on the component boundary and never on a corner.
    fn check_pins_on_boundary(
        layout: PinLayout,
        size: Size,
        pin_count: usize,
    ) -> Result<(), TestCaseError> {
        let pins = layout.generate(size, pin_count).map_err(|e| TestCaseError::fail(e.to_string()))?;
        for pin in pins {
            let (x, y) = (pin.offset().x(), pin.offset().y());
            let on_vertical_edge = (x == 0.0 || x == size.width()) && y > 0.0 && y < size.height();
            let on_horizontal_edge = (y == 0.0 || y == size.height()) && x > 0.0 && x < size.width();
            prop_assert!(on_vertical_edge || on_horizontal_edge);
        }
        Ok(())
    }

    /// Generation is a pure function of its inputs.
    fn check_generation_is_deterministic(
        layout: PinLayout,
        size: Size,
        pin_count: usize,
    ) -> Result<(), TestCaseError> {
        let a = layout.generate(size, pin_count).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let b = layout.generate(size, pin_count).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(a, b);
        Ok(())
    }

    proptest! {
        #[test]
        fn pin_count_matches(layout in layout_strategy(), size in size_strategy(), pin_count in 2usize..=64) {
            check_pin_count_matches(layout, size, pin_count)?;
        }

        #[test]
        fn pins_on_boundary(layout in layout_strategy(), size in size_strategy(), pin_count in 2usize..=64) {
            check_pins_on_boundary(layout, size, pin_count)?;
        }

        #[test]
        fn generation_is_deterministic(layout in layout_strategy(), size in size_strategy(), pin_count in 2usize..=64) {
            check_generation_is_deterministic(layout, size, pin_count)?;
        }
    }
}
