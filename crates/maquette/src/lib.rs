#![forbid(unsafe_code)]

//! Maquette: the composition core of a visual mobile-app UI builder.
//!
//! A screen is a flat, id-keyed collection of typed widgets with
//! parent/order edges. This crate ties the layers together:
//!
//! - [`maquette_core`]: the widget tree model and its invariants.
//! - [`maquette_style`]: pure compilation of property bags into
//!   render-ready style descriptors.
//! - [`maquette_canvas`]: viewport mapping, drop zones, and the drag
//!   session state machine.
//! - [`maquette_history`]: bounded generic undo/redo.
//! - [`edit`] / [`editor`] (here): concrete commands over the store and
//!   the [`Editor`] controller that routes every mutation through the
//!   history.

pub mod edit;
pub mod editor;

pub use maquette_canvas::{
    DragCoordinator, DragNotice, DragPayload, DropEvent, DropKind, DropZone, HoverTarget,
    Viewport, ZoneId, ZoneRegistry,
};
pub use maquette_core::{
    Axis, EditError, Point, Property, PropertyId, PropertyType, PropertyValue, RectF, ScreenId,
    TreeRow, TreeView, Widget, WidgetCaps, WidgetGroup, WidgetId, WidgetKind, WidgetNode,
    WidgetStore, build_hierarchy,
};
pub use maquette_history::{Batch, Command, CommandError, History, HistoryError};
pub use maquette_style::{FlexStyle, Insets, Rgba, Shadow, StyleDescriptor, compile};

pub use edit::{InsertSubtree, MoveWidget, RemoveWidget, RenameWidget, SetProperty};
pub use editor::{Editor, EditorError};
