#![forbid(unsafe_code)]

//! Bounded undo/redo command history.
//!
//! Document-agnostic: [`Command`] and [`History`] are generic over the
//! document type `T`, so the crate knows nothing about widget trees.
//! Concrete edit commands live with the document they edit.

pub mod command;
pub mod history;

pub use command::{Batch, Command, CommandError};
pub use history::{DEFAULT_CAPACITY, History, HistoryError};
