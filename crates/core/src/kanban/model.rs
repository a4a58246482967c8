//! Kanban board view definitions
//!
//! Views are derived from a [`TaskList`] snapshot and never point back into
//! the store, so rendering can not mutate tasks.

use serde::Serialize;

use crate::error::Error;
use crate::task::{Task, TaskId, TaskList, TaskStatus};
use crate::Result;

/// Shortest ID prefix accepted when looking up a card
pub const MIN_ID_PREFIX: usize = 4;

/// A control offered on a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Control {
    Revert,
    Advance,
    Delete,
}

/// One task as shown in a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub controls: Vec<Control>,
}

impl CardView {
    fn from_task(task: &Task) -> Self {
        let mut controls = Vec::with_capacity(3);
        if task.status().can_revert() {
            controls.push(Control::Revert);
        }
        controls.push(Control::Advance);
        controls.push(Control::Delete);

        Self {
            id: task.id(),
            title: task.title().to_string(),
            description: task.description().to_string(),
            status: task.status(),
            controls,
        }
    }

    pub fn has_control(&self, control: Control) -> bool {
        self.controls.contains(&control)
    }
}

/// A column in the kanban board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnView {
    pub id: TaskStatus,
    pub title: String,
    pub cards: Vec<CardView>,
}

/// The board as three columns in [`TaskStatus::ALL`] order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub columns: [ColumnView; 3],
}

impl BoardView {
    /// Derive the columns from a snapshot, keeping store order within each
    pub fn from_tasks(tasks: &TaskList) -> Self {
        let column = |status: TaskStatus| ColumnView {
            id: status,
            title: status.label().to_string(),
            cards: tasks.with_status(status).map(CardView::from_task).collect(),
        };

        Self {
            columns: TaskStatus::ALL.map(column),
        }
    }

    /// The column holding tasks with the given status
    pub fn column(&self, status: TaskStatus) -> &ColumnView {
        &self.columns[status.column_index()]
    }

    /// All cards in display order: column by column, store order within
    pub fn cards(&self) -> impl Iterator<Item = &CardView> {
        self.columns.iter().flat_map(|column| column.cards.iter())
    }

    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|column| column.cards.len()).sum()
    }

    /// Resolve a user supplied card reference
    ///
    /// Accepts a 1-based display position, a full task ID, or a unique ID
    /// prefix of at least [`MIN_ID_PREFIX`] characters. A number is read as a
    /// position only when it is in range.
    pub fn find_card(&self, reference: &str) -> Result<&CardView> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(Error::InvalidInput("Missing task reference".to_string()));
        }

        if let Ok(position) = reference.parse::<usize>() {
            if (1..=self.card_count()).contains(&position) {
                if let Some(card) = self.cards().nth(position - 1) {
                    return Ok(card);
                }
            }
        }

        if let Ok(id) = reference.parse::<TaskId>() {
            return self
                .cards()
                .find(|card| card.id == id)
                .ok_or_else(|| Error::TaskNotFound(reference.to_string()));
        }

        let prefix = reference.to_ascii_lowercase();
        if prefix.len() < MIN_ID_PREFIX
            || !prefix.chars().all(|c| c.is_ascii_hexdigit() || c == '-')
        {
            return Err(Error::TaskNotFound(reference.to_string()));
        }

        let mut matches = self
            .cards()
            .filter(|card| card.id.to_string().starts_with(&prefix));
        match (matches.next(), matches.next()) {
            (Some(card), None) => Ok(card),
            (Some(_), Some(_)) => Err(Error::AmbiguousId(reference.to_string())),
            (None, _) => Err(Error::TaskNotFound(reference.to_string())),
        }
    }

    /// Pretty JSON snapshot of the board
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
