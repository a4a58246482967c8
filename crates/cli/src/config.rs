//! Session configuration
//!
//! Read once at start-up from `TASK_NOTES_*` environment variables.

use tracing::warn;

/// How the board is printed after each change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub output: OutputFormat,
    /// Print prompts and form labels; turn off for scripted input
    pub prompt: bool,
    /// Number of ID characters shown on each card
    pub id_width: usize,
}

pub const DEFAULT_ID_WIDTH: usize = 8;
const MIN_ID_WIDTH: usize = 4;
const MAX_ID_WIDTH: usize = 36;

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputFormat::Text,
            prompt: true,
            id_width: DEFAULT_ID_WIDTH,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from any variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let output = match lookup("TASK_NOTES_OUTPUT") {
            None => defaults.output,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "text" | "" => OutputFormat::Text,
                "json" => OutputFormat::Json,
                other => {
                    warn!("Unknown TASK_NOTES_OUTPUT '{}', using text", other);
                    OutputFormat::Text
                }
            },
        };

        let id_width = match lookup("TASK_NOTES_ID_WIDTH") {
            None => defaults.id_width,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(width) => width.clamp(MIN_ID_WIDTH, MAX_ID_WIDTH),
                Err(e) => {
                    warn!("Invalid TASK_NOTES_ID_WIDTH '{}': {}", raw, e);
                    defaults.id_width
                }
            },
        };

        Self {
            output,
            prompt: flag(lookup("TASK_NOTES_PROMPT"), defaults.prompt),
            id_width,
        }
    }
}

fn flag(raw: Option<String>, default: bool) -> bool {
    match raw {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        None => default,
    }
}
