//! Session command parsing

use task_notes_core::task::TaskStatus;
use task_notes_core::{Error, Result};

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Board,
    Json,
    Help,
    Quit,
    /// Open the interactive add-task form
    AddForm,
    /// `add <title> [| <description> [| <status>]]`
    AddInline {
        title: String,
        description: String,
        status: Option<TaskStatus>,
    },
    Advance(String),
    Revert(String),
    Delete(String),
}

pub const HELP: &str = "\
Commands:
  board | ls                              show the board
  add                                     open the add-task form
  add <title> [| <description> [| <status>]]
                                          add a task in one line
  advance | next <card>                   move a task forward
  revert | back <card>                    move a task back
  delete | rm <card>                      delete a task
  json                                    print the board as JSON
  help                                    show this help
  quit | exit                             end the session

<card> is the number shown on the board, or a task ID (prefix).";

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "" => Self::Empty,
            "board" | "ls" => Self::Board,
            "json" => Self::Json,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "add" if rest.is_empty() => Self::AddForm,
            "add" => parse_inline_add(rest)?,
            "advance" | "next" => Self::Advance(card_reference(word, rest)?),
            "revert" | "back" => Self::Revert(card_reference(word, rest)?),
            "delete" | "rm" => Self::Delete(card_reference(word, rest)?),
            _ => {
                return Err(Error::InvalidInput(format!(
                    "Unknown command '{}'. Type 'help' for a list of commands",
                    word
                )))
            }
        };
        Ok(command)
    }
}

fn card_reference(word: &str, rest: &str) -> Result<String> {
    if rest.is_empty() {
        return Err(Error::InvalidInput(format!("Usage: {} <card>", word)));
    }
    Ok(rest.to_string())
}

fn parse_inline_add(rest: &str) -> Result<Command> {
    let mut parts = rest.splitn(3, '|').map(str::trim);
    let title = parts.next().unwrap_or_default().to_string();
    let description = parts.next().unwrap_or_default().to_string();
    let status = match parts.next() {
        Some(raw) if !raw.is_empty() => Some(raw.parse()?),
        _ => None,
    };

    Ok(Command::AddInline {
        title,
        description,
        status,
    })
}
