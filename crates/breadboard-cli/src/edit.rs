//! Textual edit commands applied from the command line.
//!
//! Each edit is a whitespace-separated command:
//!
//! | Edit | Effect |
//! |------|--------|
//! | `add LABEL [KIND [PINS [LAYOUT]]]` | Add a component at the origin |
//! | `move LABEL X Y` | Move a component (snapped to the grid) |
//! | `rotate LABEL` | Rotate a component a quarter turn |
//! | `rename LABEL NEW` | Relabel a component |
//! | `connect LABEL.PIN LABEL.PIN` | Wire two pins |
//! | `disconnect LABEL.PIN LABEL.PIN` | Remove the wires between two pins |
//! | `delete LABEL` | Delete a component and its wires |
//! | `undo` / `redo` | Step through the edit history |

use std::{fmt, str::FromStr};

use thiserror::Error;

use breadboard::{
    kind::{ComponentKind, UnknownKind},
    pin::{LayoutError, PinLayout},
};

/// Pin count used by `add` when none is given.
pub const DEFAULT_PIN_COUNT: usize = 8;

/// Errors from parsing an edit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error("empty edit")]
    Empty,

    #[error("unknown edit command `{0}`")]
    UnknownCommand(String),

    #[error("`{command}` is missing its {argument} argument")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("`{command}` takes at most {max} arguments")]
    TooManyArguments { command: &'static str, max: usize },

    #[error("`{0}` is not a number")]
    InvalidNumber(String),

    #[error("`{0}` is not a pin address, expected LABEL.PIN")]
    InvalidPin(String),

    #[error(transparent)]
    UnknownKind(#[from] UnknownKind),

    #[error(transparent)]
    InvalidLayout(#[from] LayoutError),
}

/// A pin named by component label and pin index, e.g. `U1.3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinAddress {
    pub label: String,
    pub pin: usize,
}

impl FromStr for PinAddress {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (label, pin) = s
            .rsplit_once('.')
            .ok_or_else(|| EditError::InvalidPin(s.to_string()))?;
        if label.is_empty() {
            return Err(EditError::InvalidPin(s.to_string()));
        }
        let pin = pin
            .parse()
            .map_err(|_| EditError::InvalidPin(s.to_string()))?;
        Ok(Self {
            label: label.to_string(),
            pin,
        })
    }
}

impl fmt::Display for PinAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.label, self.pin)
    }
}

/// One edit to apply to a diagram.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    Add {
        label: String,
        kind: ComponentKind,
        pin_count: usize,
        layout: PinLayout,
    },
    Move {
        label: String,
        x: f32,
        y: f32,
    },
    Rotate {
        label: String,
    },
    Rename {
        label: String,
        new_label: String,
    },
    Connect {
        source: PinAddress,
        target: PinAddress,
    },
    Disconnect {
        source: PinAddress,
        target: PinAddress,
    },
    Delete {
        label: String,
    },
    Undo,
    Redo,
}

/// Pulls positional arguments off an edit, tracking which command they
/// belong to.
struct Arguments<'a> {
    command: &'static str,
    words: std::slice::Iter<'a, &'a str>,
}

impl<'a> Arguments<'a> {
    fn required(&mut self, argument: &'static str) -> Result<&'a str, EditError> {
        self.words
            .next()
            .copied()
            .ok_or(EditError::MissingArgument {
                command: self.command,
                argument,
            })
    }

    fn optional(&mut self) -> Option<&'a str> {
        self.words.next().copied()
    }

    fn finish(mut self, max: usize) -> Result<(), EditError> {
        if self.words.next().is_some() {
            return Err(EditError::TooManyArguments {
                command: self.command,
                max,
            });
        }
        Ok(())
    }
}

fn number(word: &str) -> Result<f32, EditError> {
    word.parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| EditError::InvalidNumber(word.to_string()))
}

impl FromStr for Edit {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = s.split_whitespace().collect();
        let (command, rest) = words.split_first().ok_or(EditError::Empty)?;

        let command: &'static str = match *command {
            "add" => "add",
            "move" => "move",
            "rotate" => "rotate",
            "rename" => "rename",
            "connect" => "connect",
            "disconnect" => "disconnect",
            "delete" => "delete",
            "undo" => "undo",
            "redo" => "redo",
            other => return Err(EditError::UnknownCommand(other.to_string())),
        };
        let mut args = Arguments {
            command,
            words: rest.iter(),
        };

        let edit = match command {
            "add" => {
                let label = args.required("LABEL")?.to_string();
                let kind = args
                    .optional()
                    .map(str::parse::<ComponentKind>)
                    .transpose()?
                    .unwrap_or_default();
                let pin_count = match args.optional() {
                    Some(word) => word
                        .parse()
                        .map_err(|_| EditError::InvalidNumber(word.to_string()))?,
                    None => DEFAULT_PIN_COUNT,
                };
                let layout = args
                    .optional()
                    .map(str::parse::<PinLayout>)
                    .transpose()?
                    .unwrap_or_default();
                args.finish(4)?;
                Self::Add {
                    label,
                    kind,
                    pin_count,
                    layout,
                }
            }
            "move" => {
                let label = args.required("LABEL")?.to_string();
                let x = number(args.required("X")?)?;
                let y = number(args.required("Y")?)?;
                args.finish(3)?;
                Self::Move { label, x, y }
            }
            "rotate" | "delete" => {
                let label = args.required("LABEL")?.to_string();
                args.finish(1)?;
                if command == "rotate" {
                    Self::Rotate { label }
                } else {
                    Self::Delete { label }
                }
            }
            "rename" => {
                let label = args.required("LABEL")?.to_string();
                let new_label = args.required("NEW")?.to_string();
                args.finish(2)?;
                Self::Rename { label, new_label }
            }
            "connect" | "disconnect" => {
                let source: PinAddress = args.required("source pin")?.parse()?;
                let target: PinAddress = args.required("target pin")?.parse()?;
                args.finish(2)?;
                if command == "connect" {
                    Self::Connect { source, target }
                } else {
                    Self::Disconnect { source, target }
                }
            }
            "undo" => {
                args.finish(0)?;
                Self::Undo
            }
            _ => {
                args.finish(0)?;
                Self::Redo
            }
        };
        Ok(edit)
    }
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add {
                label,
                kind,
                pin_count,
                layout,
            } => write!(f, "add {label} {kind} {pin_count} {layout}"),
            Self::Move { label, x, y } => write!(f, "move {label} {x} {y}"),
            Self::Rotate { label } => write!(f, "rotate {label}"),
            Self::Rename { label, new_label } => write!(f, "rename {label} {new_label}"),
            Self::Connect { source, target } => write!(f, "connect {source} {target}"),
            Self::Disconnect { source, target } => write!(f, "disconnect {source} {target}"),
            Self::Delete { label } => write!(f, "delete {label}"),
            Self::Undo => f.write_str("undo"),
            Self::Redo => f.write_str("redo"),
        }
    }
}

#[cfg(test)]
mod tests {
    use breadboard::kind::ChipPackage;

    use super::*;

    #[test]
    fn test_parse_add_defaults() {
        assert_eq!(
            "add U1".parse::<Edit>().unwrap(),
            Edit::Add {
                label: "U1".to_string(),
                kind: ComponentKind::IcChip(ChipPackage::Regular),
                pin_count: DEFAULT_PIN_COUNT,
                layout: PinLayout::LeftRight,
            }
        );
    }

    #[test]
    fn test_parse_add_full() {
        assert_eq!(
            "add  SW1   dip-switch 6 top-bottom".parse::<Edit>().unwrap(),
            Edit::Add {
                label: "SW1".to_string(),
                kind: ComponentKind::DipSwitch,
                pin_count: 6,
                layout: PinLayout::TopBottom,
            }
        );
    }

    #[test]
    fn test_parse_connect() {
        let edit: Edit = "connect U1.0 R1.1".parse().unwrap();
        assert_eq!(
            edit,
            Edit::Connect {
                source: PinAddress {
                    label: "U1".to_string(),
                    pin: 0
                },
                target: PinAddress {
                    label: "R1".to_string(),
                    pin: 1
                },
            }
        );
        assert_eq!(edit.to_string(), "connect U1.0 R1.1");
    }

    #[test]
    fn test_pin_address_uses_last_dot() {
        let address: PinAddress = "bus.a.12".parse().unwrap();
        assert_eq!(address.label, "bus.a");
        assert_eq!(address.pin, 12);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Edit>(), Err(EditError::Empty));
        assert_eq!(
            "spin U1".parse::<Edit>(),
            Err(EditError::UnknownCommand("spin".to_string()))
        );
        assert_eq!(
            "move U1 10".parse::<Edit>(),
            Err(EditError::MissingArgument {
                command: "move",
                argument: "Y"
            })
        );
        assert_eq!(
            "undo now".parse::<Edit>(),
            Err(EditError::TooManyArguments {
                command: "undo",
                max: 0
            })
        );
        assert_eq!(
            "move U1 ten 0".parse::<Edit>(),
            Err(EditError::InvalidNumber("ten".to_string()))
        );
        assert_eq!(
            "connect U1 U2.0".parse::<Edit>(),
            Err(EditError::InvalidPin("U1".to_string()))
        );
        assert!(matches!(
            "add U1 transistor".parse::<Edit>(),
            Err(EditError::UnknownKind(_))
        ));
        assert!(matches!(
            "add U1 ic 8 diagonal".parse::<Edit>(),
            Err(EditError::InvalidLayout(_))
        ));
    }
}
