#![forbid(unsafe_code)]

//! Stable identifiers for model entities.
//!
//! Ids are allocated from per-store monotonic counters and never reused,
//! so a command that captured an id stays valid for the lifetime of the
//! session (or fails cleanly if the target was deleted).

use std::fmt;

/// Unique identifier of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// Create a widget id from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw id value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// Unique identifier of a property record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyId(pub u64);

impl PropertyId {
    /// Create a property id from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Identifier of a screen (a logical partition of the widget forest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScreenId(pub u64);

impl ScreenId {
    /// Create a screen id from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_id_display() {
        assert_eq!(WidgetId::new(42).to_string(), "w42");
    }

    #[test]
    fn ids_are_value_types() {
        assert_eq!(WidgetId::new(1), WidgetId::new(1));
        assert_ne!(ScreenId::new(1), ScreenId::new(2));
    }
}
