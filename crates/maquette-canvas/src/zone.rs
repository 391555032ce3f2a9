#![forbid(unsafe_code)]

//! Drop zone registry and hit-testing.
//!
//! Every container rendered on the canvas registers a [`DropZone`]
//! describing its canvas-space bounds and the boxes of its direct
//! children (the insertion indicator itself is never registered as a
//! child box). The registry answers two questions during a drag:
//! which zone is under the pointer, and at which sibling index an
//! insertion there would land.
//!
//! Invariants
//!
//! - `hit_test` returns the deepest zone: smallest area among all zones
//!   containing the point, ties broken by latest registration. Nested
//!   containers always paint inside their parents, so area is a faithful
//!   depth proxy without walking the tree.
//! - `insertion_index` is in `0..=child_boxes.len()`.

use maquette_core::geometry::{Axis, Point, RectF};
use maquette_core::id::WidgetId;

/// Identifier for a registered drop zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneId(pub u64);

impl ZoneId {
    /// Wrap a raw zone id.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// One container's droppable region on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct DropZone {
    /// Registry key.
    pub id: ZoneId,
    /// The container widget this zone belongs to. `None` is the screen
    /// root, which accepts drops even when no widget exists yet.
    pub parent_id: Option<WidgetId>,
    /// Direction children flow in, fixed by the container's kind.
    pub axis: Axis,
    /// Canvas-space bounds of the droppable region.
    pub bounds: RectF,
    /// Canvas-space boxes of the container's direct children, in
    /// sibling order.
    pub child_boxes: Vec<RectF>,
}

impl DropZone {
    /// Sibling index a drop at `pointer` would produce.
    ///
    /// Bisection over child midpoints along the zone's axis: the first
    /// child whose midpoint lies beyond the pointer claims its position;
    /// past every midpoint, the drop appends.
    #[must_use]
    pub fn insertion_index(&self, pointer: Point) -> usize {
        let coord = pointer.along(self.axis);
        self.child_boxes
            .iter()
            .position(|b| b.midpoint(self.axis) > coord)
            .unwrap_or(self.child_boxes.len())
    }
}

/// All drop zones currently live on the canvas.
///
/// Rebuilt incrementally as the renderer lays containers out; the
/// coordinator only reads it.
#[derive(Debug, Default)]
pub struct ZoneRegistry {
    // Registration order doubles as the tie-breaker in hit_test.
    zones: Vec<DropZone>,
}

impl ZoneRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a zone, replacing any previous zone with the same id.
    ///
    /// Replacement re-registers: the zone moves to the back of the
    /// tie-break order, matching "latest layout wins".
    pub fn register(&mut self, zone: DropZone) {
        self.unregister(zone.id);
        self.zones.push(zone);
    }

    /// Remove a zone. Unknown ids are ignored.
    pub fn unregister(&mut self, id: ZoneId) {
        self.zones.retain(|z| z.id != id);
    }

    /// Drop every registered zone.
    pub fn clear(&mut self) {
        self.zones.clear();
    }

    /// Number of registered zones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Whether no zones are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Look a zone up by id.
    #[must_use]
    pub fn get(&self, id: ZoneId) -> Option<&DropZone> {
        self.zones.iter().find(|z| z.id == id)
    }

    /// The deepest zone containing a canvas-space point.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<&DropZone> {
        let mut best: Option<&DropZone> = None;
        for zone in &self.zones {
            if !zone.bounds.contains(point) {
                continue;
            }
            // `<=` keeps the later registration on equal area.
            match best {
                Some(b) if zone.bounds.area() <= b.bounds.area() => best = Some(zone),
                Some(_) => {}
                None => best = Some(zone),
            }
        }
        best
    }
}
