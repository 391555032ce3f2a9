#![forbid(unsafe_code)]

//! Concrete edit commands over a [`WidgetStore`].
//!
//! Every command closes over snapshots captured at construction time;
//! none holds a live reference into the store. Apply and revert go
//! through the store's validated mutators, so the tree invariants hold
//! after replay in either direction.

use maquette_core::id::WidgetId;
use maquette_core::property::PropertyValue;
use maquette_core::store::{EditError, WidgetStore};
use maquette_core::widget::Widget;
use maquette_history::{Command, CommandError};

fn edit_err(err: EditError) -> CommandError {
    match err {
        EditError::WidgetNotFound(id) => CommandError::TargetMissing(format!("widget {id}")),
        other => CommandError::Rejected(other.to_string()),
    }
}

/// Insert a pre-built subtree (pre-order snapshots, root first).
///
/// Backs both widget creation and duplication: the snapshots already
/// carry their final ids, parents, and orders, so redo after undo puts
/// back exactly the same widgets.
#[derive(Debug)]
pub struct InsertSubtree {
    snapshots: Vec<Widget>,
}

impl InsertSubtree {
    /// Wrap pre-order snapshots. The first snapshot is the subtree root.
    #[must_use]
    pub fn new(snapshots: Vec<Widget>) -> Self {
        Self { snapshots }
    }

    /// Id of the subtree root being inserted.
    #[must_use]
    pub fn root_id(&self) -> Option<WidgetId> {
        self.snapshots.first().map(|w| w.id)
    }
}

impl Command<WidgetStore> for InsertSubtree {
    fn apply(&self, store: &mut WidgetStore) -> Result<(), CommandError> {
        // Pre-order: parents land before their children.
        for w in &self.snapshots {
            store.insert_snapshot(w.clone());
        }
        Ok(())
    }

    fn revert(&self, store: &mut WidgetStore) -> Result<(), CommandError> {
        for w in self.snapshots.iter().rev() {
            store
                .remove(w.id)
                .ok_or_else(|| CommandError::TargetMissing(format!("widget {}", w.id)))?;
        }
        Ok(())
    }

    fn description(&self) -> String {
        match self.snapshots.first() {
            Some(root) => format!("insert {}", root.label()),
            None => "insert nothing".to_string(),
        }
    }
}

/// Remove one widget, restored from its snapshot on revert.
///
/// The widget must be a leaf when the command applies; subtree deletion
/// is a [`maquette_history::Batch`] of these, leaves first.
#[derive(Debug)]
pub struct RemoveWidget {
    snapshot: Widget,
}

impl RemoveWidget {
    /// Capture the widget to remove.
    #[must_use]
    pub fn new(snapshot: Widget) -> Self {
        Self { snapshot }
    }
}

impl Command<WidgetStore> for RemoveWidget {
    fn apply(&self, store: &mut WidgetStore) -> Result<(), CommandError> {
        store
            .remove(self.snapshot.id)
            .map(|_| ())
            .ok_or_else(|| CommandError::TargetMissing(format!("widget {}", self.snapshot.id)))
    }

    fn revert(&self, store: &mut WidgetStore) -> Result<(), CommandError> {
        store.insert_snapshot(self.snapshot.clone());
        Ok(())
    }

    fn description(&self) -> String {
        format!("remove {}", self.snapshot.label())
    }
}

/// Reparent or reorder a widget between two recorded slots.
#[derive(Debug)]
pub struct MoveWidget {
    id: WidgetId,
    old_parent: Option<WidgetId>,
    old_index: usize,
    new_parent: Option<WidgetId>,
    new_index: usize,
}

impl MoveWidget {
    /// Record both slots of the move.
    #[must_use]
    pub fn new(
        id: WidgetId,
        old_parent: Option<WidgetId>,
        old_index: usize,
        new_parent: Option<WidgetId>,
        new_index: usize,
    ) -> Self {
        Self {
            id,
            old_parent,
            old_index,
            new_parent,
            new_index,
        }
    }
}

impl Command<WidgetStore> for MoveWidget {
    fn apply(&self, store: &mut WidgetStore) -> Result<(), CommandError> {
        store
            .move_widget(self.id, self.new_parent, self.new_index)
            .map_err(edit_err)
    }

    fn revert(&self, store: &mut WidgetStore) -> Result<(), CommandError> {
        store
            .move_widget(self.id, self.old_parent, self.old_index)
            .map_err(edit_err)
    }

    fn description(&self) -> String {
        format!("move widget {}", self.id)
    }
}

/// Set a property value, recording the previous value (or its absence).
#[derive(Debug)]
pub struct SetProperty {
    id: WidgetId,
    name: String,
    old: Option<PropertyValue>,
    new: PropertyValue,
}

impl SetProperty {
    /// Record the transition `old -> new` for `name` on `id`.
    #[must_use]
    pub fn new(
        id: WidgetId,
        name: impl Into<String>,
        old: Option<PropertyValue>,
        new: PropertyValue,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            old,
            new,
        }
    }
}

impl Command<WidgetStore> for SetProperty {
    fn apply(&self, store: &mut WidgetStore) -> Result<(), CommandError> {
        store
            .set_property(self.id, &self.name, self.new.clone())
            .map(|_| ())
            .map_err(edit_err)
    }

    fn revert(&self, store: &mut WidgetStore) -> Result<(), CommandError> {
        match &self.old {
            Some(value) => store
                .set_property(self.id, &self.name, value.clone())
                .map(|_| ())
                .map_err(edit_err),
            // The property did not exist before; undo removes it.
            None => {
                store.remove_property(self.id, &self.name);
                Ok(())
            }
        }
    }

    fn description(&self) -> String {
        format!("set {}", self.name)
    }
}

/// Change the user-assigned widget name.
#[derive(Debug)]
pub struct RenameWidget {
    id: WidgetId,
    old: Option<String>,
    new: Option<String>,
}

impl RenameWidget {
    /// Record the transition `old -> new`.
    #[must_use]
    pub fn new(id: WidgetId, old: Option<String>, new: Option<String>) -> Self {
        Self { id, old, new }
    }
}

impl Command<WidgetStore> for RenameWidget {
    fn apply(&self, store: &mut WidgetStore) -> Result<(), CommandError> {
        store
            .rename(self.id, self.new.clone())
            .map(|_| ())
            .map_err(edit_err)
    }

    fn revert(&self, store: &mut WidgetStore) -> Result<(), CommandError> {
        store
            .rename(self.id, self.old.clone())
            .map(|_| ())
            .map_err(edit_err)
    }

    fn description(&self) -> String {
        format!("rename widget {}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maquette_core::id::ScreenId;
    use maquette_core::kind::WidgetKind;

    const SCREEN: ScreenId = ScreenId(1);

    #[test]
    fn insert_subtree_round_trips() {
        let mut store = WidgetStore::new();
        let snapshot = store
            .instantiate(SCREEN, WidgetKind::Container, None, 0)
            .unwrap();
        let id = snapshot.id;
        let cmd = InsertSubtree::new(vec![snapshot]);

        cmd.apply(&mut store).unwrap();
        assert!(store.contains(id));
        cmd.revert(&mut store).unwrap();
        assert!(!store.contains(id));
        // Replay lands the same id.
        cmd.apply(&mut store).unwrap();
        assert!(store.contains(id));
    }

    #[test]
    fn remove_widget_restores_slot() {
        let mut store = WidgetStore::new();
        let col = store.create(SCREEN, WidgetKind::Column, None, 0).unwrap();
        let a = store.create(SCREEN, WidgetKind::Text, Some(col), 0).unwrap();
        let b = store.create(SCREEN, WidgetKind::Icon, Some(col), 1).unwrap();

        let cmd = RemoveWidget::new(store.get(a).unwrap().clone());
        cmd.apply(&mut store).unwrap();
        assert_eq!(store.get(b).unwrap().order, 0);

        cmd.revert(&mut store).unwrap();
        assert_eq!(store.get(a).unwrap().order, 0);
        assert_eq!(store.get(b).unwrap().order, 1);
    }

    #[test]
    fn set_property_undo_removes_added_property() {
        let mut store = WidgetStore::new();
        let col = store.create(SCREEN, WidgetKind::Column, None, 0).unwrap();
        let cmd = SetProperty::new(col, "padding", None, PropertyValue::Text("all(8)".into()));

        cmd.apply(&mut store).unwrap();
        assert!(store.get(col).unwrap().property_value("padding").is_some());
        cmd.revert(&mut store).unwrap();
        assert!(store.get(col).unwrap().property_value("padding").is_none());
    }

    #[test]
    fn move_revert_rejects_cycle_like_any_move() {
        let mut store = WidgetStore::new();
        let a = store.create(SCREEN, WidgetKind::Container, None, 0).unwrap();
        let _b = store.create(SCREEN, WidgetKind::Container, None, 1).unwrap();
        // A move whose recorded origin no longer exists fails cleanly.
        let cmd = MoveWidget::new(a, Some(WidgetId::new(404)), 0, None, 1);
        let err = cmd.revert(&mut store).unwrap_err();
        assert!(matches!(err, CommandError::TargetMissing(_)));
    }
}
