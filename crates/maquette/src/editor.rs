#![forbid(unsafe_code)]

//! The editing controller for one screen.
//!
//! [`Editor`] owns the widget store and the undo history and is the only
//! place the two meet: every mutation is wrapped in a command and runs
//! through [`History::execute`], so everything the user can do is also
//! something the user can undo. Drop events from the drag coordinator
//! enter the document here.

use std::fmt;

use maquette_canvas::{DragPayload, DropEvent};
use maquette_core::id::{ScreenId, WidgetId};
use maquette_core::property::PropertyValue;
use maquette_core::store::{EditError, WidgetStore};
use maquette_history::{Batch, History, HistoryError};

use crate::edit::{InsertSubtree, MoveWidget, RemoveWidget, RenameWidget, SetProperty};

/// An editor operation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// The store rejected the edit while the command was being built.
    Edit(EditError),
    /// The history rejected or failed the command.
    History(HistoryError),
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Edit(err) => write!(f, "{err}"),
            Self::History(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for EditorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Edit(err) => Some(err),
            Self::History(err) => Some(err),
        }
    }
}

impl From<EditError> for EditorError {
    fn from(err: EditError) -> Self {
        Self::Edit(err)
    }
}

impl From<HistoryError> for EditorError {
    fn from(err: HistoryError) -> Self {
        Self::History(err)
    }
}

/// Stateful editing facade over one screen's widget tree.
pub struct Editor {
    screen: ScreenId,
    store: WidgetStore,
    history: History<WidgetStore>,
}

impl Editor {
    /// Create an editor for `screen` with an empty store and default
    /// history depth.
    #[must_use]
    pub fn new(screen: ScreenId) -> Self {
        Self::with_store(screen, WidgetStore::new())
    }

    /// Create an editor over an existing store (e.g. a loaded screen).
    #[must_use]
    pub fn with_store(screen: ScreenId, store: WidgetStore) -> Self {
        Self {
            screen,
            store,
            history: History::new(),
        }
    }

    /// The screen this editor edits.
    #[must_use]
    pub const fn screen(&self) -> ScreenId {
        self.screen
    }

    /// Read access to the document.
    #[must_use]
    pub fn store(&self) -> &WidgetStore {
        &self.store
    }

    /// Whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Apply a validated drop from the drag coordinator. Returns the id
    /// of the created or moved widget.
    pub fn apply_drop(&mut self, event: DropEvent) -> Result<WidgetId, EditorError> {
        match event.payload {
            DragPayload::NewWidget(kind) => {
                let snapshot = self.store.instantiate(
                    self.screen,
                    kind,
                    event.target_parent_id,
                    event.target_index as u32,
                )?;
                let id = snapshot.id;
                self.history
                    .execute(Box::new(InsertSubtree::new(vec![snapshot])), &mut self.store)?;
                Ok(id)
            }
            DragPayload::ExistingWidget {
                id,
                original_parent,
                original_order,
            } => {
                let cmd = MoveWidget::new(
                    id,
                    original_parent,
                    original_order as usize,
                    event.target_parent_id,
                    event.target_index,
                );
                self.history.execute(Box::new(cmd), &mut self.store)?;
                Ok(id)
            }
        }
    }

    /// Delete a widget and its whole subtree as one undo step.
    pub fn delete_widget(&mut self, id: WidgetId) -> Result<(), EditorError> {
        let snapshots = self.store.collect_subtree(id);
        let Some(root) = snapshots.first() else {
            return Err(EditError::WidgetNotFound(id).into());
        };
        let mut batch = Batch::new(format!("delete {}", root.label()));
        // Leaves first, so every removal takes out a current leaf;
        // batch revert then restores parents before children.
        for snapshot in snapshots.iter().rev() {
            batch.push(Box::new(RemoveWidget::new(snapshot.clone())));
        }
        self.history.execute(Box::new(batch), &mut self.store)?;
        Ok(())
    }

    /// Deep-copy a widget's subtree with fresh ids, inserted right after
    /// the source. Returns the id of the copy's root.
    pub fn duplicate_widget(&mut self, id: WidgetId) -> Result<WidgetId, EditorError> {
        let clones = self
            .store
            .clone_subtree(id)
            .ok_or(EditError::WidgetNotFound(id))?;
        let cmd = InsertSubtree::new(clones);
        let root = cmd.root_id().ok_or(EditError::WidgetNotFound(id))?;
        self.history.execute(Box::new(cmd), &mut self.store)?;
        Ok(root)
    }

    /// Set (or add) a property as one undo step.
    pub fn set_property(
        &mut self,
        id: WidgetId,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), EditorError> {
        let widget = self.store.get(id).ok_or(EditError::WidgetNotFound(id))?;
        let old = widget.property_value(name).cloned();
        let cmd = SetProperty::new(id, name, old, value);
        self.history.execute(Box::new(cmd), &mut self.store)?;
        Ok(())
    }

    /// Change the user-assigned name as one undo step.
    pub fn rename_widget(
        &mut self,
        id: WidgetId,
        name: Option<String>,
    ) -> Result<(), EditorError> {
        let widget = self.store.get(id).ok_or(EditError::WidgetNotFound(id))?;
        let old = widget.name.clone();
        let cmd = RenameWidget::new(id, old, name);
        self.history.execute(Box::new(cmd), &mut self.store)?;
        Ok(())
    }

    /// Undo the latest step. `Ok(false)` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool, EditorError> {
        Ok(self.history.undo(&mut self.store)?)
    }

    /// Redo the next step. `Ok(false)` when there is nothing to redo.
    pub fn redo(&mut self) -> Result<bool, EditorError> {
        Ok(self.history.redo(&mut self.store)?)
    }
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("screen", &self.screen)
            .field("widgets", &self.store.len())
            .field("history", &self.history)
            .finish()
    }
}
