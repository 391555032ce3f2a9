#![forbid(unsafe_code)]

//! The widget record.

use crate::id::{ScreenId, WidgetId};
use crate::kind::WidgetKind;
use crate::property::{Property, PropertyValue};

/// One node of the editable UI hierarchy.
///
/// Parent/child relations are id lookups into the owning store, never
/// owned references — the arena avoids cyclic ownership while keeping
/// O(1) lookup.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Widget {
    /// Stable unique id, assigned at creation, never reused.
    pub id: WidgetId,
    /// Owning screen.
    pub screen_id: ScreenId,
    /// Kind, from the closed vocabulary.
    pub kind: WidgetKind,
    /// Optional user-assigned name (searchable).
    pub name: Option<String>,
    /// Parent widget; `None` means this is a root of its screen.
    pub parent_id: Option<WidgetId>,
    /// Sibling rank, unique and contiguous among same-parent siblings.
    pub order: u32,
    /// Property records (names unique within the widget).
    pub properties: Vec<Property>,
}

impl Widget {
    /// Whether this widget is a root of its screen.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Look up a property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Look up a property value by name.
    #[must_use]
    pub fn property_value(&self, name: &str) -> Option<&PropertyValue> {
        self.property(name).map(|p| &p.value)
    }

    /// The label shown in the layer tree: the user-assigned name if set,
    /// otherwise the kind's display name.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(self.kind.display_name())
    }
}
