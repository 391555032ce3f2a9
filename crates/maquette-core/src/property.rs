#![forbid(unsafe_code)]

//! Widget properties.
//!
//! A property is a single named, typed attribute of one widget. The value
//! is a tagged union — exactly one slot is populated, selected by the
//! type tag — so readers dispatch on the tag instead of probing a sparse
//! record. A default set is instantiated from the kind's template when a
//! widget is created; values are edited in place (same id); properties
//! are only deleted together with their widget.

use crate::id::{PropertyId, ScreenId, WidgetId};

/// The type tag of a property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyType {
    /// Free-form text.
    Text,
    /// Whole number.
    Integer,
    /// Floating-point number.
    Decimal,
    /// True/false flag.
    Boolean,
    /// Color expression (hex string).
    Color,
    /// Alignment keyword.
    Alignment,
    /// Resource URL.
    Url,
    /// Raw JSON blob.
    Json,
    /// Reference to an action definition.
    ActionRef,
    /// Reference to a data-source field.
    DataFieldRef,
    /// Reference to another screen.
    ScreenRef,
}

/// A property value. Exactly one slot, selected by the tag.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyValue {
    /// Free-form text.
    Text(String),
    /// Whole number.
    Integer(i64),
    /// Floating-point number.
    Decimal(f64),
    /// True/false flag.
    Boolean(bool),
    /// Color expression, e.g. `#4B39EF` or `#CC000000`.
    Color(String),
    /// Alignment keyword, e.g. `center`, `spaceBetween`, `topLeft`.
    Alignment(String),
    /// Resource URL.
    Url(String),
    /// Raw JSON blob.
    Json(String),
    /// Reference to an action definition (by raw id).
    ActionRef(u64),
    /// Reference to a data-source field (by field path).
    DataFieldRef(String),
    /// Reference to another screen.
    ScreenRef(ScreenId),
}

impl PropertyValue {
    /// The type tag of this value.
    #[must_use]
    pub const fn value_type(&self) -> PropertyType {
        match self {
            Self::Text(_) => PropertyType::Text,
            Self::Integer(_) => PropertyType::Integer,
            Self::Decimal(_) => PropertyType::Decimal,
            Self::Boolean(_) => PropertyType::Boolean,
            Self::Color(_) => PropertyType::Color,
            Self::Alignment(_) => PropertyType::Alignment,
            Self::Url(_) => PropertyType::Url,
            Self::Json(_) => PropertyType::Json,
            Self::ActionRef(_) => PropertyType::ActionRef,
            Self::DataFieldRef(_) => PropertyType::DataFieldRef,
            Self::ScreenRef(_) => PropertyType::ScreenRef,
        }
    }

    /// Text slot, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Integer slot, if this is an integer value.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Decimal slot, if this is a decimal value.
    #[must_use]
    pub const fn as_decimal(&self) -> Option<f64> {
        match self {
            Self::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// Boolean slot, if this is a boolean value.
    #[must_use]
    pub const fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Color slot, if this is a color value.
    #[must_use]
    pub fn as_color(&self) -> Option<&str> {
        match self {
            Self::Color(c) => Some(c),
            _ => None,
        }
    }

    /// Alignment slot, if this is an alignment value.
    #[must_use]
    pub fn as_alignment(&self) -> Option<&str> {
        match self {
            Self::Alignment(a) => Some(a),
            _ => None,
        }
    }

    /// Either numeric slot widened to `f64`. Dimension-valued properties
    /// accept integers or decimals interchangeably.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Decimal(d) => Some(*d),
            _ => None,
        }
    }
}

/// A single named, typed attribute of a widget.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Property {
    /// Stable record id, kept across value edits.
    pub id: PropertyId,
    /// Owning widget.
    pub widget_id: WidgetId,
    /// Name, unique within the owning widget.
    pub name: String,
    /// The value (and, via its tag, the type).
    pub value: PropertyValue,
}

impl Property {
    /// Create a new property record.
    #[must_use]
    pub fn new(
        id: PropertyId,
        widget_id: WidgetId,
        name: impl Into<String>,
        value: PropertyValue,
    ) -> Self {
        Self {
            id,
            widget_id,
            name: name.into(),
            value,
        }
    }

    /// The type tag of the current value.
    #[must_use]
    pub const fn value_type(&self) -> PropertyType {
        self.value.value_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_matches_slot() {
        assert_eq!(
            PropertyValue::Integer(3).value_type(),
            PropertyType::Integer
        );
        assert_eq!(
            PropertyValue::Color("#FFF".into()).value_type(),
            PropertyType::Color
        );
        assert_eq!(
            PropertyValue::ScreenRef(ScreenId::new(1)).value_type(),
            PropertyType::ScreenRef
        );
    }

    #[test]
    fn accessors_dispatch_on_tag() {
        let v = PropertyValue::Integer(42);
        assert_eq!(v.as_integer(), Some(42));
        assert_eq!(v.as_text(), None);
        assert_eq!(v.as_color(), None);
    }

    #[test]
    fn as_number_widens_both_numeric_slots() {
        assert_eq!(PropertyValue::Integer(7).as_number(), Some(7.0));
        assert_eq!(PropertyValue::Decimal(1.5).as_number(), Some(1.5));
        assert_eq!(PropertyValue::Text("7".into()).as_number(), None);
    }

    #[test]
    fn property_keeps_id_across_value_edit() {
        let mut p = Property::new(
            PropertyId::new(1),
            WidgetId::new(9),
            "width",
            PropertyValue::Integer(100),
        );
        let id = p.id;
        p.value = PropertyValue::Integer(200);
        assert_eq!(p.id, id);
        assert_eq!(p.value.as_integer(), Some(200));
    }
}
