//! Board rendering

use std::io::{self, Write};

use task_notes_core::kanban::{BoardView, CardView, Control};

use crate::config::{Config, OutputFormat};

/// Print the board in the configured format
pub fn board<W: Write>(out: &mut W, board: &BoardView, config: &Config) -> anyhow::Result<()> {
    match config.output {
        OutputFormat::Text => text(out, board, config.id_width)?,
        OutputFormat::Json => writeln!(out, "{}", board.to_json()?)?,
    }
    Ok(())
}

/// Plain-text board: one section per column, cards numbered across the board
pub fn text<W: Write>(out: &mut W, board: &BoardView, id_width: usize) -> io::Result<()> {
    let mut position = 0;
    for column in &board.columns {
        writeln!(out, "== {} ({}) ==", column.title, column.cards.len())?;
        if column.cards.is_empty() {
            writeln!(out, "   (no tasks)")?;
        }
        for card in &column.cards {
            position += 1;
            card_text(out, card, position, id_width)?;
        }
    }
    Ok(())
}

fn card_text<W: Write>(out: &mut W, card: &CardView, position: usize, id_width: usize) -> io::Result<()> {
    let id = card.id.to_string();
    let short_id = id.get(..id_width).unwrap_or(id.as_str());
    writeln!(out, "  [{}] {}  {}", position, short_id, card.title)?;
    if !card.description.is_empty() {
        writeln!(out, "      {}", card.description)?;
    }

    let controls: Vec<&str> = card.controls.iter().map(|control| control_label(*control)).collect();
    writeln!(out, "      {}", controls.join("  "))
}

fn control_label(control: Control) -> &'static str {
    match control {
        Control::Revert => "[< revert]",
        Control::Advance => "[> advance]",
        Control::Delete => "[x delete]",
    }
}
