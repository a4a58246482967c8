//! Kanban board presentation
//!
//! This module derives the three-column board (Not Started, In Progress,
//! Done) from store snapshots and turns user actions back into store
//! operations.

mod command;
mod form;
mod model;

pub use command::*;
pub use form::*;
pub use model::*;
