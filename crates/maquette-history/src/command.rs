#![forbid(unsafe_code)]

//! Reversible command infrastructure.
//!
//! A [`Command`] is an immutable description of one edit against a
//! document of type `T`. Commands close over snapshots taken at
//! construction time, never live references, so they stay valid no
//! matter how the document changes between construction and replay.
//!
//! Invariants
//!
//! - `apply` followed by `revert` restores the prior document exactly.
//! - `revert` followed by `apply` restores the applied document exactly.
//! - A [`Batch`] applies its sub-commands in order and reverts them in
//!   strict reverse order; a partially applied batch rolls itself back.

use std::fmt;

/// A command failed to apply or revert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The command's target no longer exists in the document.
    TargetMissing(String),
    /// The document rejected the edit.
    Rejected(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetMissing(what) => write!(f, "command target missing: {what}"),
            Self::Rejected(why) => write!(f, "edit rejected: {why}"),
        }
    }
}

impl std::error::Error for CommandError {}

/// A reversible edit against a document of type `T`.
pub trait Command<T> {
    /// Apply the edit to the document.
    fn apply(&self, target: &mut T) -> Result<(), CommandError>;

    /// Undo the edit. Must be the exact inverse of [`Command::apply`].
    fn revert(&self, target: &mut T) -> Result<(), CommandError>;

    /// Short human-readable label for history UI.
    fn description(&self) -> String;
}

/// Several commands treated as one history entry.
///
/// Apply runs sub-commands front to back; revert runs back to front.
/// If a sub-command fails mid-apply, the already-applied prefix is
/// reverted so the batch never leaves the document half-edited.
pub struct Batch<T> {
    commands: Vec<Box<dyn Command<T>>>,
    description: String,
}

impl<T> Batch<T> {
    /// Create a batch with a label for the whole group.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            commands: Vec::new(),
            description: description.into(),
        }
    }

    /// Append a sub-command.
    pub fn push(&mut self, command: Box<dyn Command<T>>) {
        self.commands.push(command);
    }

    /// Builder-style [`Batch::push`].
    #[must_use]
    pub fn with(mut self, command: Box<dyn Command<T>>) -> Self {
        self.commands.push(command);
        self
    }

    /// Number of sub-commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the batch holds no sub-commands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<T> Command<T> for Batch<T> {
    fn apply(&self, target: &mut T) -> Result<(), CommandError> {
        for (i, cmd) in self.commands.iter().enumerate() {
            if let Err(err) = cmd.apply(target) {
                // Roll the applied prefix back so the document is whole.
                for done in self.commands[..i].iter().rev() {
                    let _ = done.revert(target);
                }
                return Err(err);
            }
        }
        Ok(())
    }

    fn revert(&self, target: &mut T) -> Result<(), CommandError> {
        for cmd in self.commands.iter().rev() {
            cmd.revert(target)?;
        }
        Ok(())
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

impl<T> fmt::Debug for Batch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Batch")
            .field("description", &self.description)
            .field("len", &self.commands.len())
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

    struct FailAt(i64);

    impl Command<i64> for FailAt {
        fn apply(&self, target: &mut i64) -> Result<(), CommandError> {
            if *target == self.0 {
                return Err(CommandError::Rejected(format!("value is {}", self.0)));
            }
            Ok(())
        }
        fn revert(&self, _target: &mut i64) -> Result<(), CommandError> {
            Ok(())
        }
        fn description(&self) -> String {
            "fail at".to_string()
        }
    }

    #[test]
    fn batch_applies_in_order_and_reverts_in_reverse() {
        let batch = Batch::new("adds")
            .with(Box::new(Add(1)))
            .with(Box::new(Add(10)));
        let mut value = 0;
        batch.apply(&mut value).unwrap();
        assert_eq!(value, 11);
        batch.revert(&mut value).unwrap();
        assert_eq!(value, 0);
    }

    #[test]
    fn failing_batch_rolls_back_applied_prefix() {
        let batch = Batch::new("partial")
            .with(Box::new(Add(5)))
            .with(Box::new(FailAt(5)))
            .with(Box::new(Add(100)));
        let mut value = 0;
        let err = batch.apply(&mut value).unwrap_err();
        assert!(matches!(err, CommandError::Rejected(_)));
        assert_eq!(value, 0);
    }
}
