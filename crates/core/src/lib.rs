//! Core library for Task Notes
//!
//! This crate contains the board's business logic, including:
//! - Task model and status transitions
//! - The in-memory task store
//! - Kanban board views, commands and the add-task form

pub mod error;
pub mod kanban;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
