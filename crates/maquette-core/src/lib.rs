#![forbid(unsafe_code)]

//! Widget tree model for the Maquette UI builder.
//!
//! Owns the canonical flat widget collection ([`WidgetStore`]), the closed
//! vocabulary of widget kinds, the tagged property union, and the
//! hierarchy/query algorithms that keep the tree structurally valid under
//! editing: cycle-free reparenting, cascade collection, contiguous sibling
//! reindexing, and the searchable layer-tree view.

pub mod geometry;
pub mod id;
pub mod kind;
pub mod property;
pub mod store;
pub mod tree;
pub mod widget;

pub use geometry::{Axis, Point, RectF};
pub use id::{PropertyId, ScreenId, WidgetId};
pub use kind::{WidgetCaps, WidgetGroup, WidgetKind};
pub use property::{Property, PropertyType, PropertyValue};
pub use store::{EditError, WidgetStore};
pub use tree::{TreeRow, TreeView, WidgetNode, build_hierarchy};
pub use widget::Widget;
