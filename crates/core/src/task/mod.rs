//! Task module
//!
//! This module contains the task model, its status transitions and the
//! in-memory store that owns the task collection.

mod model;
mod store;

pub use model::*;
pub use store::*;
