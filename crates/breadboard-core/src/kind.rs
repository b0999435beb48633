//! Component kinds.
//!
//! The kind of a component decides how a presentation layer draws it and which
//! defaults are offered when the component is created. It never changes the
//! topology of an existing component: pins are fixed once generated.

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::{geometry::Size, pin::PinLayout};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown component kind `{0}`")]
pub struct UnknownKind(pub String);

/// Package outline of an IC chip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ChipPackage {
    #[default]
    Regular,
    Wide,
    Square,
}

/// What a component represents on the schematic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    IcChip(ChipPackage),
    Capacitor,
    Resistor,
    CrystalOscillator,
    Inductor,
    Diode,
    DipSwitch,
}

impl Default for ComponentKind {
    fn default() -> Self {
        Self::IcChip(ChipPackage::Regular)
    }
}

impl ComponentKind {
    /// Returns the size a freshly created component of this kind gets.
    ///
    /// DIP switches grow with their pin count, every other kind has a fixed
    /// footprint.
    ///
    /// # Examples
    ///
    /// ```
    /// # use breadboard_core::kind::{ChipPackage, ComponentKind};
    /// # use breadboard_core::geometry::Size;
    /// assert_eq!(ComponentKind::IcChip(ChipPackage::Wide).default_size(16), Size::new(150.0, 50.0));
    /// assert_eq!(ComponentKind::DipSwitch.default_size(8), Size::new(80.0, 30.0));
    /// assert_eq!(ComponentKind::DipSwitch.default_size(1), Size::new(20.0, 30.0));
    /// ```
    pub fn default_size(self, pin_count: usize) -> Size {
        match self {
            Self::IcChip(ChipPackage::Regular) => Size::new(100.0, 50.0),
            Self::IcChip(ChipPackage::Wide) => Size::new(150.0, 50.0),
            Self::IcChip(ChipPackage::Square) => Size::new(100.0, 100.0),
            Self::Capacitor => Size::new(20.0, 40.0),
            Self::Resistor | Self::Inductor => Size::new(60.0, 20.0),
            Self::CrystalOscillator => Size::new(40.0, 60.0),
            Self::Diode => Size::new(40.0, 40.0),
            Self::DipSwitch => Size::new((pin_count as f32 * 10.0).max(20.0), 30.0),
        }
    }

    /// Pin count this kind always uses, if it is not user-selectable
    pub fn fixed_pin_count(self) -> Option<usize> {
        match self {
            Self::Capacitor | Self::Resistor | Self::Inductor | Self::Diode => Some(2),
            Self::CrystalOscillator => Some(4),
            Self::IcChip(_) | Self::DipSwitch => None,
        }
    }

    /// Pin layout this kind always uses, if it is not user-selectable
    pub fn fixed_layout(self) -> Option<PinLayout> {
        match self {
            Self::Capacitor
            | Self::Resistor
            | Self::Inductor
            | Self::Diode
            | Self::CrystalOscillator => Some(PinLayout::LeftRight),
            Self::DipSwitch => Some(PinLayout::TopBottom),
            Self::IcChip(_) => None,
        }
    }

    /// Applies this kind's presets to a requested pin count and layout.
    ///
    /// # Examples
    ///
    /// ```
    /// # use breadboard_core::kind::ComponentKind;
    /// # use breadboard_core::pin::PinLayout;
    /// let (pins, layout) = ComponentKind::Resistor.constrain(8, PinLayout::AllSides);
    /// assert_eq!((pins, layout), (2, PinLayout::LeftRight));
    /// ```
    pub fn constrain(self, pin_count: usize, layout: PinLayout) -> (usize, PinLayout) {
        (
            self.fixed_pin_count().unwrap_or(pin_count),
            self.fixed_layout().unwrap_or(layout),
        )
    }

    /// Short machine-friendly name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IcChip(ChipPackage::Regular) => "ic",
            Self::IcChip(ChipPackage::Wide) => "ic-wide",
            Self::IcChip(ChipPackage::Square) => "ic-square",
            Self::Capacitor => "capacitor",
            Self::Resistor => "resistor",
            Self::CrystalOscillator => "crystal",
            Self::Inductor => "inductor",
            Self::Diode => "diode",
            Self::DipSwitch => "dip-switch",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "ic" => Self::IcChip(ChipPackage::Regular),
            "ic-wide" => Self::IcChip(ChipPackage::Wide),
            "ic-square" => Self::IcChip(ChipPackage::Square),
            "capacitor" => Self::Capacitor,
            "resistor" => Self::Resistor,
            "crystal" => Self::CrystalOscillator,
            "inductor" => Self::Inductor,
            "diode" => Self::Diode,
            "dip-switch" => Self::DipSwitch,
            other => return Err(UnknownKind(other.to_string())),
        };
        Ok(kind)
    }
}
