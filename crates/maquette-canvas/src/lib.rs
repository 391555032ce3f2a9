#![forbid(unsafe_code)]

//! Canvas coordinate mapping and drag-and-drop coordination.
//!
//! Three layers, bottom up:
//!
//! - [`viewport`]: screen ↔ canvas coordinate translation under zoom.
//! - [`zone`]: drop zone registry with deepest-zone hit-testing and
//!   midpoint-bisection insertion indices.
//! - [`coordinator`]: the single drag session state machine that ties
//!   pointer input, the registry, and tree validity checks together and
//!   fans drop/cancel notices out to subscribers.
//!
//! The coordinator never mutates the widget tree. It only validates
//! against it and emits [`DropEvent`]s for a controller to apply.

pub mod coordinator;
pub mod viewport;
pub mod zone;

pub use coordinator::{
    DragCoordinator, DragNotice, DragPayload, DropEvent, DropKind, HoverTarget,
};
pub use viewport::{MIN_ZOOM, Viewport};
pub use zone::{DropZone, ZoneId, ZoneRegistry};
