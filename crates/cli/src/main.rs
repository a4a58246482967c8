//! Task Notes terminal board
//!
//! Runs an interactive kanban session on stdin/stdout. Nothing is persisted;
//! the board is gone when the session ends.

mod command;
mod config;
mod render;
mod session;

use std::io;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::session::Session;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the board
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "task_notes=warn,task_notes_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env();
    tracing::debug!(?config, "Loaded configuration");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock(), config);
    session.run()
}
