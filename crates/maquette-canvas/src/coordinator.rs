#![forbid(unsafe_code)]

//! Drag-and-drop session coordination.
//!
//! One coordinator owns the single global drag session. A session is a
//! well-formed sequence: one `pointer_down`, zero or more `pointer_moved`
//! calls, ending in `pointer_up` or `cancel`. Touch input flows through
//! the same three entry points, so mouse and touch share one hit-test
//! and acceptance path.
//!
//! Invariants
//!
//! - At most one session is active. Starting a new drag implicitly
//!   cancels a stale one, so a missed release can never wedge the canvas.
//! - A hover is only held while the hovered zone accepts the payload;
//!   every failed check drops back to plain dragging.
//! - Every exit path (drop, cancel, restart) returns to `Idle`.

use std::sync::mpsc;

use maquette_core::geometry::Point;
use maquette_core::id::WidgetId;
use maquette_core::kind::WidgetKind;
use maquette_core::store::WidgetStore;

use crate::zone::{DropZone, ZoneId, ZoneRegistry};

/// What is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPayload {
    /// A palette entry; the widget does not exist yet.
    NewWidget(WidgetKind),
    /// A widget already on the canvas. The origin fields are a snapshot
    /// taken at drag start so an undo can restore the original slot.
    ExistingWidget {
        /// The widget being moved.
        id: WidgetId,
        /// Its parent when the drag started.
        original_parent: Option<WidgetId>,
        /// Its sibling index when the drag started.
        original_order: u32,
    },
}

/// How a drop should be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropKind {
    /// Instantiate a new widget at the target slot.
    Create,
    /// Reparent or reorder an existing widget.
    Move,
}

/// A completed, validated drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropEvent {
    /// Create or move.
    pub kind: DropKind,
    /// Target container (`None` is the screen root).
    pub target_parent_id: Option<WidgetId>,
    /// Sibling index in the target, straight from midpoint bisection.
    /// `move_widget` splices with the moved widget still in its list,
    /// which absorbs the vacated slot on a same-parent reorder, so the
    /// index is consumed as-is.
    pub target_index: usize,
    /// The payload as snapshotted at drag start.
    pub payload: DragPayload,
}

/// Session notifications published to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragNotice {
    /// A session began.
    Started(DragPayload),
    /// The accepted hover target changed (`None` clears the indicator).
    HoverChanged(Option<HoverTarget>),
    /// The session ended in a valid drop.
    Dropped(DropEvent),
    /// The session ended without a drop.
    Cancelled,
}

/// The zone and slot an active drag currently points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverTarget {
    /// Accepting zone.
    pub zone: ZoneId,
    /// Insertion index in that zone, from midpoint bisection.
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragPhase {
    Idle,
    Dragging,
    Hovering(HoverTarget),
}

/// The single drag-and-drop session for one canvas.
pub struct DragCoordinator {
    registry: ZoneRegistry,
    phase: DragPhase,
    payload: Option<DragPayload>,
    subscribers: Vec<mpsc::Sender<DragNotice>>,
}

impl Default for DragCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl DragCoordinator {
    /// Create an idle coordinator with an empty zone registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: ZoneRegistry::new(),
            phase: DragPhase::Idle,
            payload: None,
            subscribers: Vec::new(),
        }
    }

    /// Read access to the zone registry.
    #[must_use]
    pub fn registry(&self) -> &ZoneRegistry {
        &self.registry
    }

    /// Mutable access for the layout pass that (re)registers zones.
    pub fn registry_mut(&mut self) -> &mut ZoneRegistry {
        &mut self.registry
    }

    /// Whether a drag session is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.phase != DragPhase::Idle
    }

    /// The currently accepted hover target, if any.
    #[must_use]
    pub fn hover(&self) -> Option<HoverTarget> {
        match self.phase {
            DragPhase::Hovering(h) => Some(h),
            _ => None,
        }
    }

    /// Receive session notifications. Receivers that disconnect are
    /// pruned on the next publish.
    pub fn subscribe(&mut self) -> mpsc::Receiver<DragNotice> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Begin a drag session. An already-active session is cancelled first.
    pub fn pointer_down(&mut self, payload: DragPayload, pos: Point) {
        if self.phase != DragPhase::Idle {
            self.cancel();
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(?payload, x = pos.x, y = pos.y, "drag started");
        let _ = pos;
        self.phase = DragPhase::Dragging;
        self.payload = Some(payload);
        self.publish(DragNotice::Started(payload));
    }

    /// Update the session for a pointer (or touch point) at `pos`,
    /// re-evaluating the hovered zone and acceptance.
    pub fn pointer_moved(&mut self, pos: Point, store: &WidgetStore) {
        if self.phase == DragPhase::Idle {
            return;
        }
        let Some(payload) = self.payload else {
            return;
        };
        let target = self
            .registry
            .hit_test(pos)
            .filter(|zone| accepts(zone, payload, store))
            .map(|zone| HoverTarget {
                zone: zone.id,
                index: zone.insertion_index(pos),
            });

        let next = match target {
            Some(h) => DragPhase::Hovering(h),
            None => DragPhase::Dragging,
        };
        if next != self.phase {
            #[cfg(feature = "tracing")]
            tracing::trace!(?target, "drag hover changed");
            self.phase = next;
            self.publish(DragNotice::HoverChanged(target));
        }
    }

    /// End the session. Returns the drop if the release happened over an
    /// accepting zone, `None` otherwise. Either way the session clears.
    pub fn pointer_up(&mut self, pos: Point, store: &WidgetStore) -> Option<DropEvent> {
        // The final position may differ from the last move; re-run the
        // same checks rather than trusting the cached hover.
        self.pointer_moved(pos, store);

        let DragPhase::Hovering(hover) = self.phase else {
            if self.phase != DragPhase::Idle {
                self.cancel();
            }
            return None;
        };
        let (Some(payload), Some(zone)) = (self.payload, self.registry.get(hover.zone)) else {
            self.cancel();
            return None;
        };
        let event = DropEvent {
            kind: match payload {
                DragPayload::NewWidget(_) => DropKind::Create,
                DragPayload::ExistingWidget { .. } => DropKind::Move,
            },
            target_parent_id: zone.parent_id,
            target_index: hover.index,
            payload,
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(?event, "drop accepted");
        self.reset();
        self.publish(DragNotice::Dropped(event));
        Some(event)
    }

    /// Abort the session without a drop. No-op when idle.
    pub fn cancel(&mut self) {
        if self.phase == DragPhase::Idle {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!("drag cancelled");
        self.reset();
        self.publish(DragNotice::Cancelled);
    }

    fn reset(&mut self) {
        self.phase = DragPhase::Idle;
        self.payload = None;
    }

    fn publish(&mut self, notice: DragNotice) {
        self.subscribers.retain(|tx| tx.send(notice).is_ok());
    }
}

/// Whether a zone accepts a payload against the current tree.
fn accepts(zone: &DropZone, payload: DragPayload, store: &WidgetStore) -> bool {
    // The screen root always accepts; a widget parent must exist and be
    // a container kind.
    if let Some(parent) = zone.parent_id {
        let Some(widget) = store.get(parent) else {
            return false;
        };
        if !widget.kind.can_have_children() {
            return false;
        }
    }
    match payload {
        DragPayload::NewWidget(_) => true,
        DragPayload::ExistingWidget { id, .. } => store.can_move(id, zone.parent_id),
    }
}
