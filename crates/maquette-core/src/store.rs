#![forbid(unsafe_code)]

//! The widget arena.
//!
//! [`WidgetStore`] owns the canonical flat collection of widgets, keyed by
//! id. All structural mutations go through it so the sibling-order
//! invariant can be restored after every committed edit.
//!
//! # Invariants
//!
//! 1. The parent graph is acyclic — no widget is its own ancestor.
//! 2. `parent_id` only ever points at a container-capable kind.
//! 3. For any parent, child `order` values form a contiguous, duplicate-free
//!    `0..n-1` range after every committed mutation (transient gaps during a
//!    splice are normalized by [`WidgetStore::reindex_siblings`]).

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::id::{PropertyId, ScreenId, WidgetId};
use crate::kind::WidgetKind;
use crate::property::{Property, PropertyValue};
use crate::widget::Widget;

/// A structural edit was rejected. Not fatal: callers degrade to "no edit
/// performed" and surface feedback out of band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// The referenced widget does not exist (deleted or never created).
    WidgetNotFound(WidgetId),
    /// The target kind cannot own children.
    NotAContainer(WidgetKind),
    /// The move would make a widget its own ancestor.
    WouldCycle,
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WidgetNotFound(id) => write!(f, "widget {id} not found"),
            Self::NotAContainer(kind) => {
                write!(f, "{} cannot have children", kind.display_name())
            }
            Self::WouldCycle => write!(f, "move would create a cycle"),
        }
    }
}

impl std::error::Error for EditError {}

/// Arena of widgets keyed by id.
#[derive(Debug, Default, Clone)]
pub struct WidgetStore {
    widgets: HashMap<WidgetId, Widget>,
    next_widget_id: u64,
    next_property_id: u64,
}

impl WidgetStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            widgets: HashMap::new(),
            next_widget_id: 1,
            next_property_id: 1,
        }
    }

    /// Build a store view over an externally produced flat list (e.g. a
    /// screen loaded by the persistence layer).
    #[must_use]
    pub fn from_widgets(widgets: Vec<Widget>) -> Self {
        let mut store = Self::new();
        for w in widgets {
            store.reserve_ids(&w);
            store.widgets.insert(w.id, w);
        }
        store
    }

    fn alloc_widget_id(&mut self) -> WidgetId {
        let id = WidgetId::new(self.next_widget_id);
        self.next_widget_id += 1;
        id
    }

    fn alloc_property_id(&mut self) -> PropertyId {
        let id = PropertyId::new(self.next_property_id);
        self.next_property_id += 1;
        id
    }

    /// Keep the id counters ahead of any reinserted snapshot so ids are
    /// never reused.
    fn reserve_ids(&mut self, widget: &Widget) {
        self.next_widget_id = self.next_widget_id.max(widget.id.0 + 1);
        for p in &widget.properties {
            self.next_property_id = self.next_property_id.max(p.id.0 + 1);
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Look up a widget by id.
    #[must_use]
    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.get(&id)
    }

    /// Whether the store contains the given id.
    #[must_use]
    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(&id)
    }

    /// Number of widgets across all screens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Iterate over all widgets (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &Widget> {
        self.widgets.values()
    }

    /// All widgets of one screen (unordered).
    pub fn screen_widgets(&self, screen: ScreenId) -> impl Iterator<Item = &Widget> {
        self.widgets.values().filter(move |w| w.screen_id == screen)
    }

    /// Direct children of `parent` on `screen`, sorted by order.
    /// `parent = None` yields the screen's roots.
    #[must_use]
    pub fn children_of(&self, screen: ScreenId, parent: Option<WidgetId>) -> Vec<WidgetId> {
        let mut children: Vec<&Widget> = self
            .widgets
            .values()
            .filter(|w| w.screen_id == screen && w.parent_id == parent)
            .collect();
        children.sort_by_key(|w| w.order);
        children.iter().map(|w| w.id).collect()
    }

    /// Walk `parent_id` links upward from `candidate`; true if `ancestor`
    /// is encountered before reaching a root. A widget is not its own
    /// descendant. Unresolvable parent references terminate the walk (the
    /// orphan is treated as a root); a visited set guards against
    /// malformed cyclic input.
    #[must_use]
    pub fn is_descendant(&self, candidate: WidgetId, ancestor: WidgetId) -> bool {
        let mut visited = HashSet::new();
        let mut current = self.widgets.get(&candidate).and_then(|w| w.parent_id);
        while let Some(id) = current {
            // Unresolvable parent reference: the child is effectively a
            // root (transient state from the persistence layer).
            let Some(parent) = self.widgets.get(&id) else {
                return false;
            };
            if id == ancestor {
                return true;
            }
            if !visited.insert(id) {
                return false;
            }
            current = parent.parent_id;
        }
        false
    }

    /// Whether `widget` may be reparented under `new_parent`.
    ///
    /// Rejects self-parenting, cycle creation (the target being a
    /// descendant of the moved widget), and non-container targets.
    /// `new_parent = None` (screen root) is always structurally valid.
    #[must_use]
    pub fn can_move(&self, widget: WidgetId, new_parent: Option<WidgetId>) -> bool {
        if !self.contains(widget) {
            return false;
        }
        let Some(parent) = new_parent else {
            return true;
        };
        if parent == widget {
            return false;
        }
        let Some(target) = self.get(parent) else {
            return false;
        };
        if !target.kind.can_have_children() {
            return false;
        }
        !self.is_descendant(parent, widget)
    }

    /// Pre-order traversal of `id`'s strict descendants plus itself.
    ///
    /// Used to cascade deletes and to deep-copy on duplicate.
    #[must_use]
    pub fn collect_subtree(&self, id: WidgetId) -> Vec<Widget> {
        let mut out = Vec::new();
        let Some(root) = self.get(id) else {
            return out;
        };
        self.collect_subtree_into(root, &mut out);
        out
    }

    fn collect_subtree_into(&self, widget: &Widget, out: &mut Vec<Widget>) {
        out.push(widget.clone());
        for child in self.children_of(widget.screen_id, Some(widget.id)) {
            if let Some(w) = self.get(child) {
                self.collect_subtree_into(w, out);
            }
        }
    }

    /// Ordered id path from the screen root down to `id` (inclusive).
    /// Empty if the widget does not exist.
    #[must_use]
    pub fn find_path(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut path = Vec::new();
        let mut visited = HashSet::new();
        let mut current = Some(id);
        while let Some(wid) = current {
            let Some(w) = self.get(wid) else {
                break;
            };
            if !visited.insert(wid) {
                break;
            }
            path.push(wid);
            current = w.parent_id;
        }
        path.reverse();
        path
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Build, but do not insert, a widget of `kind` with its default
    /// property template and freshly allocated ids. The parent is
    /// validated the same way [`WidgetStore::create`] validates it.
    /// Snapshot-based insert commands are built from this.
    pub fn instantiate(
        &mut self,
        screen: ScreenId,
        kind: WidgetKind,
        parent: Option<WidgetId>,
        order: u32,
    ) -> Result<Widget, EditError> {
        if let Some(pid) = parent {
            let target = self.get(pid).ok_or(EditError::WidgetNotFound(pid))?;
            if !target.kind.can_have_children() {
                return Err(EditError::NotAContainer(target.kind));
            }
        }

        let id = self.alloc_widget_id();
        let properties = kind
            .default_properties()
            .into_iter()
            .map(|(name, value)| Property::new(self.alloc_property_id(), id, name, value))
            .collect();

        Ok(Widget {
            id,
            screen_id: screen,
            kind,
            name: None,
            parent_id: parent,
            order,
            properties,
        })
    }

    /// Create a widget of `kind` under `parent` at `index`, instantiating
    /// the kind's default property template. Returns the new id.
    pub fn create(
        &mut self,
        screen: ScreenId,
        kind: WidgetKind,
        parent: Option<WidgetId>,
        index: usize,
    ) -> Result<WidgetId, EditError> {
        let widget = self.instantiate(screen, kind, parent, index as u32)?;
        let id = widget.id;
        self.insert_snapshot(widget);
        Ok(id)
    }

    /// Deep-copy the subtree rooted at `id` with fresh widget and
    /// property ids, without inserting. The copied root keeps the
    /// source's parent and sits one slot after it; internal parent
    /// references are remapped onto the copies. Returns `None` for an
    /// unknown id.
    #[must_use]
    pub fn clone_subtree(&mut self, id: WidgetId) -> Option<Vec<Widget>> {
        let snapshots = self.collect_subtree(id);
        if snapshots.is_empty() {
            return None;
        }
        let mut remap: HashMap<WidgetId, WidgetId> = HashMap::new();
        for w in &snapshots {
            remap.insert(w.id, self.alloc_widget_id());
        }
        let mut out = Vec::with_capacity(snapshots.len());
        for (i, mut w) in snapshots.into_iter().enumerate() {
            let new_id = remap[&w.id];
            w.id = new_id;
            if i == 0 {
                w.order += 1;
            }
            // The root's parent lies outside the subtree and stays.
            if let Some(p) = w.parent_id {
                w.parent_id = Some(*remap.get(&p).unwrap_or(&p));
            }
            for prop in &mut w.properties {
                prop.id = self.alloc_property_id();
                prop.widget_id = new_id;
            }
            out.push(w);
        }
        Some(out)
    }

    /// Reinsert an exact snapshot (undo path). The snapshot keeps its id,
    /// parent and order; the affected sibling list is reindexed.
    pub fn insert_snapshot(&mut self, widget: Widget) {
        self.reserve_ids(&widget);
        let screen = widget.screen_id;
        let parent = widget.parent_id;
        self.splice_open(screen, parent, widget.order as usize);
        self.widgets.insert(widget.id, widget);
        self.reindex_siblings(screen, parent);
    }

    /// Remove a single widget, returning its snapshot. Children are left
    /// in place (they become orphans); subtree deletion removes leaves
    /// first. The vacated sibling list is reindexed.
    pub fn remove(&mut self, id: WidgetId) -> Option<Widget> {
        let widget = self.widgets.remove(&id)?;
        self.reindex_siblings(widget.screen_id, widget.parent_id);
        Some(widget)
    }

    /// Remove `id` and all its descendants, returning pre-order snapshots
    /// (the root of the removed subtree first).
    #[must_use]
    pub fn remove_subtree(&mut self, id: WidgetId) -> Vec<Widget> {
        let snapshots = self.collect_subtree(id);
        if snapshots.is_empty() {
            return snapshots;
        }
        for w in &snapshots {
            self.widgets.remove(&w.id);
        }
        let root = &snapshots[0];
        self.reindex_siblings(root.screen_id, root.parent_id);
        snapshots
    }

    /// Reparent/reorder a widget. Validated by [`WidgetStore::can_move`];
    /// both the vacated and the receiving sibling lists are reindexed.
    pub fn move_widget(
        &mut self,
        id: WidgetId,
        new_parent: Option<WidgetId>,
        index: usize,
    ) -> Result<(), EditError> {
        if !self.contains(id) {
            return Err(EditError::WidgetNotFound(id));
        }
        if !self.can_move(id, new_parent) {
            let err = match new_parent.and_then(|p| self.get(p)) {
                Some(t) if !t.kind.can_have_children() => EditError::NotAContainer(t.kind),
                Some(_) => EditError::WouldCycle,
                None => EditError::WidgetNotFound(new_parent.unwrap_or(id)),
            };
            return Err(err);
        }

        let (screen, old_parent) = {
            let w = &self.widgets[&id];
            (w.screen_id, w.parent_id)
        };

        self.splice_open(screen, new_parent, index);
        if let Some(w) = self.widgets.get_mut(&id) {
            w.parent_id = new_parent;
            w.order = index as u32;
        }
        self.reindex_siblings(screen, old_parent);
        if new_parent != old_parent {
            self.reindex_siblings(screen, new_parent);
        }
        Ok(())
    }

    /// Set (or add) a property value on a widget, in place. Returns the
    /// previous value if the property already existed.
    pub fn set_property(
        &mut self,
        id: WidgetId,
        name: &str,
        value: PropertyValue,
    ) -> Result<Option<PropertyValue>, EditError> {
        if !self.contains(id) {
            return Err(EditError::WidgetNotFound(id));
        }
        if let Some(p) = self
            .widgets
            .get_mut(&id)
            .and_then(|w| w.properties.iter_mut().find(|p| p.name == name))
        {
            return Ok(Some(std::mem::replace(&mut p.value, value)));
        }
        // Only a brand-new record consumes an id.
        let property_id = self.alloc_property_id();
        let widget = self
            .widgets
            .get_mut(&id)
            .ok_or(EditError::WidgetNotFound(id))?;
        widget
            .properties
            .push(Property::new(property_id, id, name, value));
        Ok(None)
    }

    /// Remove a property by name, returning it. Used to revert a
    /// property-add.
    pub fn remove_property(&mut self, id: WidgetId, name: &str) -> Option<Property> {
        let widget = self.widgets.get_mut(&id)?;
        let pos = widget.properties.iter().position(|p| p.name == name)?;
        Some(widget.properties.remove(pos))
    }

    /// Set the user-assigned name, returning the previous one.
    pub fn rename(
        &mut self,
        id: WidgetId,
        name: Option<String>,
    ) -> Result<Option<String>, EditError> {
        let widget = self
            .widgets
            .get_mut(&id)
            .ok_or(EditError::WidgetNotFound(id))?;
        Ok(std::mem::replace(&mut widget.name, name))
    }

    /// Renumber the sibling list of (`screen`, `parent`) to a contiguous
    /// `0..n-1` range, preserving relative order. This is the mechanism
    /// that restores the order invariant after any splice.
    pub fn reindex_siblings(&mut self, screen: ScreenId, parent: Option<WidgetId>) {
        let ids = self.children_of(screen, parent);
        for (i, id) in ids.into_iter().enumerate() {
            if let Some(w) = self.widgets.get_mut(&id) {
                w.order = i as u32;
            }
        }
    }

    /// Shift orders of siblings at `index` and later up by one, opening a
    /// slot for an insert. Transient gaps are allowed; callers reindex
    /// afterwards.
    fn splice_open(&mut self, screen: ScreenId, parent: Option<WidgetId>, index: usize) {
        for w in self.widgets.values_mut() {
            if w.screen_id == screen && w.parent_id == parent && (w.order as usize) >= index {
                w.order += 1;
            }
        }
    }
}
