//! Identifiers for diagram entities.
//!
//! Components and connections are keyed by opaque numeric ids handed out by
//! the diagram that owns them. Component labels are user-facing names and are
//! interned through a global string interner so they can be used as cheap
//! `Copy` lookup keys.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for component labels.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut interner)
}

/// Interned component label.
///
/// Labels compare and hash by symbol, so equality checks never touch the
/// underlying string.
///
/// # Examples
///
/// ```
/// use breadboard_core::identifier::Label;
///
/// let cpu = Label::new("U1");
/// assert_eq!(cpu, Label::new("U1"));
/// assert_eq!(cpu, "U1");
/// assert_eq!(cpu.to_string(), "U1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label(DefaultSymbol);

impl Label {
    /// Creates a `Label` from a string, interning it on first use.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Returns true if the label text is empty
    pub fn is_empty(&self) -> bool {
        self == ""
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = with_interner(|interner| interner.resolve(self.0).map(str::to_owned));
        match text {
            Some(text) => f.write_str(&text),
            None => Err(fmt::Error),
        }
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Label {
    /// Allows direct comparison with string slices: `label == "U1"`
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| interner.resolve(self.0) == Some(other))
    }
}

impl PartialEq<&str> for Label {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// Identifier of a component within a diagram.
///
/// Ids are never reused by the diagram that issued them, so a command held in
/// the undo history can safely refer to a component by id after it has been
/// removed and restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(u64);

impl ComponentId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Identifier of a connection within a diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_interning() {
        let a = Label::new("R1");
        let b = Label::from("R1");
        let c = Label::new("R2");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_label_string_comparison() {
        let label = Label::new("crystal");
        assert!(label == "crystal");
        assert!(label != "crystals");
        assert_eq!(label.to_string(), "crystal");
    }

    #[test]
    fn test_label_is_empty() {
        assert!(Label::new("").is_empty());
        assert!(!Label::new("U7").is_empty());
    }

    #[test]
    fn test_id_display() {
        assert_eq!(ComponentId::new(3).to_string(), "c3");
        assert_eq!(ConnectionId::new(12).to_string(), "w12");
        assert_eq!(ComponentId::new(9).get(), 9);
    }
}
