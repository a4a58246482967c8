//! Interactive board session
//!
//! Reads one command per line, applies it to the store and re-renders the
//! board whenever the store publishes a new snapshot.

use std::cell::Cell;
use std::io::{BufRead, Write};
use std::ops::ControlFlow;
use std::rc::Rc;

use tracing::{debug, info};

use task_notes_core::kanban::{AddTaskForm, BoardCommand, BoardView};
use task_notes_core::task::{TaskId, TaskList, TaskStatus, TaskStore};

use crate::command::{Command, HELP};
use crate::config::Config;
use crate::render;

const STATUS_PROMPT: &str = "Status [not started / in progress / done]: ";

pub struct Session<R, W> {
    input: R,
    output: W,
    config: Config,
    store: TaskStore,
    /// Latest snapshot published since the last render
    pending: Rc<Cell<Option<TaskList>>>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, config: Config) -> Self {
        let mut store = TaskStore::new();
        let pending: Rc<Cell<Option<TaskList>>> = Rc::default();
        {
            let pending = Rc::clone(&pending);
            store.subscribe(move |tasks: &TaskList| pending.set(Some(tasks.clone())));
        }

        Self {
            input,
            output,
            config,
            store,
            pending,
        }
    }

    /// Run until `quit` or end of input
    pub fn run(&mut self) -> anyhow::Result<()> {
        info!("Session started");
        writeln!(self.output, "Task Notes - type 'help' for commands")?;
        let tasks = self.store.tasks();
        self.render(&tasks)?;

        loop {
            let Some(line) = self.ask("> ")? else {
                break;
            };

            let flow = match Command::parse(&line) {
                Ok(command) => self.execute(command)?,
                Err(e) => {
                    writeln!(self.output, "{}", e)?;
                    ControlFlow::Continue(())
                }
            };
            self.render_pending()?;
            if flow.is_break() {
                break;
            }
        }

        info!(tasks = self.store.len(), "Session ended");
        self.output.flush()?;
        Ok(())
    }

    /// Run one command; `Break` ends the session
    fn execute(&mut self, command: Command) -> anyhow::Result<ControlFlow<()>> {
        match command {
            Command::Quit => return Ok(ControlFlow::Break(())),
            Command::Empty => {}
            Command::Board => {
                let tasks = self.store.tasks();
                self.render(&tasks)?;
            }
            Command::Json => {
                let board = BoardView::from_tasks(&self.store.tasks());
                writeln!(self.output, "{}", board.to_json()?)?;
            }
            Command::Help => writeln!(self.output, "{}", HELP)?,
            Command::AddForm => self.run_form()?,
            Command::AddInline {
                title,
                description,
                status,
            } => {
                // One-line adds are never re-asked, so a rejected title
                // can not swallow the next command
                let mut form = AddTaskForm::new()
                    .with_title(title)
                    .with_description(description)
                    .with_status(status.unwrap_or_default());
                self.try_submit(&mut form)?;
            }
            Command::Advance(reference) => self.apply(&reference, BoardCommand::Advance)?,
            Command::Revert(reference) => self.apply(&reference, BoardCommand::Revert)?,
            Command::Delete(reference) => self.apply(&reference, BoardCommand::Delete)?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn apply(
        &mut self,
        reference: &str,
        command: impl FnOnce(TaskId) -> BoardCommand,
    ) -> anyhow::Result<()> {
        let board = BoardView::from_tasks(&self.store.tasks());
        let id = match board.find_card(reference) {
            Ok(card) => card.id,
            Err(e) => {
                writeln!(self.output, "{}", e)?;
                return Ok(());
            }
        };

        let outcome = command(id).apply(&mut self.store);
        writeln!(self.output, "{}", outcome.message())?;
        Ok(())
    }

    /// Collect title, description and status, then submit
    fn run_form(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "Add a New Task")?;
        let mut form = AddTaskForm::new();

        let Some(title) = self.ask("Task Title: ")? else {
            return Ok(());
        };
        form.title = title;

        let Some(description) = self.ask("Task Description: ")? else {
            return Ok(());
        };
        form.description = description;

        loop {
            let Some(raw) = self.ask(STATUS_PROMPT)? else {
                return Ok(());
            };
            if raw.trim().is_empty() {
                break;
            }
            match raw.parse::<TaskStatus>() {
                Ok(status) => {
                    form.status = status;
                    break;
                }
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }

        self.submit_form(form)
    }

    /// Submit the form, asking again for the title while it is rejected
    fn submit_form(&mut self, mut form: AddTaskForm) -> anyhow::Result<()> {
        loop {
            if self.try_submit(&mut form)? {
                return Ok(());
            }

            // Description and status stay as entered; only the title is asked again
            let retry = self.ask("Task Title (empty line to cancel): ")?;
            match retry {
                Some(title) if !title.trim().is_empty() && title.trim() != "cancel" => {
                    form.title = title;
                }
                _ => {
                    writeln!(self.output, "Cancelled")?;
                    return Ok(());
                }
            }
        }
    }

    /// Returns whether the task was added
    fn try_submit(&mut self, form: &mut AddTaskForm) -> anyhow::Result<bool> {
        match form.submit(&mut self.store) {
            Ok(task) => {
                writeln!(self.output, "Added '{}' to {}", task.title(), task.status())?;
                Ok(true)
            }
            Err(e) => {
                debug!("Add-task form rejected: {}", e);
                writeln!(self.output, "{}", e)?;
                Ok(false)
            }
        }
    }

    fn render_pending(&mut self) -> anyhow::Result<()> {
        if let Some(tasks) = self.pending.take() {
            self.render(&tasks)?;
        }
        Ok(())
    }

    fn render(&mut self, tasks: &TaskList) -> anyhow::Result<()> {
        render::board(&mut self.output, &BoardView::from_tasks(tasks), &self.config)
    }

    /// Print a prompt (if enabled) and read one line; `None` at end of input
    fn ask(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        if self.config.prompt {
            write!(self.output, "{}", prompt)?;
            self.output.flush()?;
        }

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    #[cfg(test)]
    fn store(&self) -> &TaskStore {
        &self.store
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }
}
