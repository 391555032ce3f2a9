#![forbid(unsafe_code)]

//! Bounded undo/redo stack.
//!
//! [`History`] keeps executed commands in a single list split by a
//! cursor: entries before the cursor are undoable, entries at and after
//! it are redoable. Executing a fresh command truncates the redoable
//! suffix (no branching history).
//!
//! Invariants
//!
//! 1. `cursor <= entries.len()` after every operation.
//! 2. `entries.len() <= capacity` after every operation.
//! 3. Undo at the left boundary and redo at the right boundary change
//!    nothing and report success.
//! 4. Re-entrant calls while an apply/revert is in flight leave the
//!    history untouched and report [`HistoryError::Reentrant`].

use std::collections::VecDeque;
use std::fmt;

use crate::command::{Command, CommandError};

/// Default number of history entries retained.
pub const DEFAULT_CAPACITY: usize = 50;

/// A history operation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// `execute`, `undo`, or `redo` was called while another apply or
    /// revert was in flight. The history is unchanged.
    Reentrant,
    /// The underlying command failed.
    Command(CommandError),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reentrant => write!(f, "history operation re-entered while busy"),
            Self::Command(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for HistoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Reentrant => None,
            Self::Command(err) => Some(err),
        }
    }
}

impl From<CommandError> for HistoryError {
    fn from(err: CommandError) -> Self {
        Self::Command(err)
    }
}

/// Bounded undo/redo history over documents of type `T`.
pub struct History<T> {
    // Front is oldest; eviction pops from the front.
    entries: VecDeque<Box<dyn Command<T>>>,
    cursor: usize,
    capacity: usize,
    in_flight: bool,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> History<T> {
    /// Create a history with [`DEFAULT_CAPACITY`] entries.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a history retaining at most `capacity` entries.
    /// A zero capacity is bumped to one so execute can always record.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: 0,
            capacity: capacity.max(1),
            in_flight: false,
        }
    }

    /// Whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// Number of recorded entries (undoable plus redoable).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Label of the next command [`History::undo`] would revert.
    #[must_use]
    pub fn undo_description(&self) -> Option<String> {
        self.cursor
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
            .map(|c| c.description())
    }

    /// Label of the next command [`History::redo`] would apply.
    #[must_use]
    pub fn redo_description(&self) -> Option<String> {
        self.entries.get(self.cursor).map(|c| c.description())
    }

    /// Apply a command and record it.
    ///
    /// On success the redoable suffix is discarded, the entry is
    /// appended, and the oldest entry is evicted if the history is over
    /// capacity. A failed apply records nothing and keeps the redoable
    /// suffix, so a rejected edit leaves the history exactly as it was.
    pub fn execute(&mut self, command: Box<dyn Command<T>>, target: &mut T) -> Result<(), HistoryError> {
        if self.in_flight {
            return Err(HistoryError::Reentrant);
        }
        self.in_flight = true;
        let applied = command.apply(target);
        self.in_flight = false;
        applied?;

        #[cfg(feature = "tracing")]
        tracing::debug!(command = %command.description(), "executed");
        self.entries.truncate(self.cursor);
        self.entries.push_back(command);
        self.cursor += 1;
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
            self.cursor -= 1;
        }
        Ok(())
    }

    /// Revert the entry before the cursor. Returns `Ok(false)` when
    /// there is nothing to undo.
    pub fn undo(&mut self, target: &mut T) -> Result<bool, HistoryError> {
        if self.in_flight {
            return Err(HistoryError::Reentrant);
        }
        if !self.can_undo() {
            return Ok(false);
        }
        self.in_flight = true;
        let reverted = self.entries[self.cursor - 1].revert(target);
        self.in_flight = false;
        reverted?;

        #[cfg(feature = "tracing")]
        tracing::debug!(command = %self.entries[self.cursor - 1].description(), "undone");
        self.cursor -= 1;
        Ok(true)
    }

    /// Re-apply the entry at the cursor. Returns `Ok(false)` when there
    /// is nothing to redo.
    pub fn redo(&mut self, target: &mut T) -> Result<bool, HistoryError> {
        if self.in_flight {
            return Err(HistoryError::Reentrant);
        }
        if !self.can_redo() {
            return Ok(false);
        }
        self.in_flight = true;
        let applied = self.entries[self.cursor].apply(target);
        self.in_flight = false;
        applied?;

        #[cfg(feature = "tracing")]
        tracing::debug!(command = %self.entries[self.cursor].description(), "redone");
        self.cursor += 1;
        Ok(true)
    }

    /// Drop every entry and reset the cursor.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

impl<T> fmt::Debug for History<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("entries", &self.entries.len())
            .field("cursor", &self.cursor)
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Add(i64);

    impl Command<i64> for Add {
        fn apply(&self, target: &mut i64) -> Result<(), CommandError> {
            *target += self.0;
            Ok(())
        }
        fn revert(&self, target: &mut i64) -> Result<(), CommandError> {
            *target -= self.0;
            Ok(())
        }
        fn description(&self) -> String {
            format!("add {}", self.0)
        }
    }

    struct AlwaysFails;

    impl Command<i64> for AlwaysFails {
        fn apply(&self, _target: &mut i64) -> Result<(), CommandError> {
            Err(CommandError::Rejected("nope".to_string()))
        }
        fn revert(&self, _target: &mut i64) -> Result<(), CommandError> {
            Ok(())
        }
        fn description(&self) -> String {
            "always fails".to_string()
        }
    }

    #[test]
    fn execute_undo_redo_round_trip() {
        let mut history = History::new();
        let mut value = 0;
        history.execute(Box::new(Add(3)), &mut value).unwrap();
        history.execute(Box::new(Add(4)), &mut value).unwrap();
        assert_eq!(value, 7);

        assert!(history.undo(&mut value).unwrap());
        assert_eq!(value, 3);
        assert!(history.redo(&mut value).unwrap());
        assert_eq!(value, 7);
    }

    #[test]
    fn boundaries_are_no_ops() {
        let mut history: History<i64> = History::new();
        let mut value = 0;
        assert!(!history.undo(&mut value).unwrap());
        assert!(!history.redo(&mut value).unwrap());
        assert_eq!(value, 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn execute_discards_redoable_suffix() {
        let mut history = History::new();
        let mut value = 0;
        history.execute(Box::new(Add(1)), &mut value).unwrap();
        history.execute(Box::new(Add(2)), &mut value).unwrap();
        history.undo(&mut value).unwrap();
        assert!(history.can_redo());

        history.execute(Box::new(Add(10)), &mut value).unwrap();
        assert!(!history.can_redo());
        assert_eq!(value, 11);
        // The old redo branch is gone.
        assert!(history.redo(&mut value).is_ok_and(|advanced| !advanced));
        assert_eq!(value, 11);
    }

    #[test]
    fn capacity_evicts_oldest_entry() {
        let mut history = History::with_capacity(2);
        let mut value = 0;
        history.execute(Box::new(Add(1)), &mut value).unwrap();
        history.execute(Box::new(Add(2)), &mut value).unwrap();
        history.execute(Box::new(Add(4)), &mut value).unwrap();
        assert_eq!(history.len(), 2);

        // Only the two newest entries can be undone.
        assert!(history.undo(&mut value).unwrap());
        assert!(history.undo(&mut value).unwrap());
        assert!(!history.undo(&mut value).unwrap());
        assert_eq!(value, 1);
    }

    #[test]
    fn failed_execute_records_nothing() {
        let mut history = History::new();
        let mut value = 0;
        let err = history.execute(Box::new(AlwaysFails), &mut value).unwrap_err();
        assert!(matches!(err, HistoryError::Command(_)));
        assert!(history.is_empty());
        assert!(!history.can_undo());
    }

    #[test]
    fn failed_execute_keeps_the_redoable_suffix() {
        let mut history = History::new();
        let mut value = 0;
        history.execute(Box::new(Add(3)), &mut value).unwrap();
        history.undo(&mut value).unwrap();
        assert!(history.can_redo());

        let err = history.execute(Box::new(AlwaysFails), &mut value).unwrap_err();
        assert!(matches!(err, HistoryError::Command(_)));
        // The rejected command performed no edit, so the redo branch
        // must survive it.
        assert!(history.can_redo());
        assert!(history.redo(&mut value).unwrap());
        assert_eq!(value, 3);
    }

    #[test]
    fn descriptions_follow_the_cursor() {
        let mut history = History::new();
        let mut value = 0;
        history.execute(Box::new(Add(1)), &mut value).unwrap();
        history.execute(Box::new(Add(2)), &mut value).unwrap();
        assert_eq!(history.undo_description().as_deref(), Some("add 2"));
        assert_eq!(history.redo_description(), None);

        history.undo(&mut value).unwrap();
        assert_eq!(history.undo_description().as_deref(), Some("add 1"));
        assert_eq!(history.redo_description().as_deref(), Some("add 2"));
    }

    #[test]
    fn reentrant_calls_are_rejected_and_harmless() {
        // Re-entrancy through &mut aliasing is unrepresentable in safe
        // code, so exercise the guard directly.
        let mut history: History<i64> = History::new();
        let mut value = 0;
        history.in_flight = true;
        assert_eq!(
            history.execute(Box::new(Add(1)), &mut value).unwrap_err(),
            HistoryError::Reentrant
        );
        assert_eq!(history.undo(&mut value).unwrap_err(), HistoryError::Reentrant);
        assert_eq!(history.redo(&mut value).unwrap_err(), HistoryError::Reentrant);
        assert!(history.is_empty());
        assert_eq!(value, 0);
        history.in_flight = false;
        history.execute(Box::new(Add(1)), &mut value).unwrap();
        assert_eq!(value, 1);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Any executed sequence fully unwinds to the initial state
            // and fully replays to the final one.
            #[test]
            fn undo_all_then_redo_all_round_trips(
                deltas in proptest::collection::vec(-1000i64..1000, 1..20),
            ) {
                let mut history = History::new();
                let mut value = 0i64;
                for d in &deltas {
                    history.execute(Box::new(Add(*d)), &mut value).unwrap();
                }
                let total: i64 = deltas.iter().sum();
                prop_assert_eq!(value, total);

                while history.undo(&mut value)? {}
                prop_assert_eq!(value, 0);
                prop_assert!(!history.can_undo());

                while history.redo(&mut value)? {}
                prop_assert_eq!(value, total);
                prop_assert!(!history.can_redo());
            }

            // Interleaving undos never desyncs the cursor from the value.
            #[test]
            fn undo_depth_tracks_the_cursor(
                deltas in proptest::collection::vec(-1000i64..1000, 1..20),
                undos in 0usize..25,
            ) {
                let mut history = History::new();
                let mut value = 0i64;
                for d in &deltas {
                    history.execute(Box::new(Add(*d)), &mut value).unwrap();
                }
                let mut undone = 0;
                for _ in 0..undos {
                    if history.undo(&mut value)? {
                        undone += 1;
                    }
                }
                let expected: i64 = deltas[..deltas.len() - undone].iter().sum();
                prop_assert_eq!(value, expected);
                prop_assert_eq!(history.can_redo(), undone > 0);
            }
        }
    }
}
