//! Interactive console: parses command lines and drives the task store.

mod handlers;

use std::io::{self, BufRead, Write};

use clap::{Args, Parser, Subcommand};
use taskmaster_app::{Clock, DraftError, DraftPolicy, InputError, TaskStore};
use taskmaster_core::{SortOption, TaskFilter, TaskId};
use thiserror::Error;

use crate::view::OutputFormat;

/// Commands accepted by the console (and, for read-only ones, the CLI).
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Add a new task.
    Add(AddArgs),
    /// Change fields of an existing task; omitted fields keep their value.
    Edit(EditArgs),
    /// Mark a task done, or open again.
    #[command(alias = "done")]
    Toggle {
        /// Task id (`3` or `#3`).
        id: String,
    },
    /// Delete a task.
    #[command(alias = "delete")]
    Rm {
        /// Task id (`3` or `#3`).
        id: String,
    },
    /// Show a single task.
    Show {
        /// Task id (`3` or `#3`).
        id: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// List tasks.
    Ls(ListArgs),
    /// Show completion statistics.
    Stats {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Leave the console.
    #[command(alias = "exit")]
    Quit,
}

/// Fields of a new task.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    /// low, medium or high (default: medium).
    #[arg(short = 'p', long)]
    pub priority: Option<String>,
    /// Due date as YYYY-MM-DD.
    #[arg(long = "due")]
    pub due_date: Option<String>,
}

/// Field overrides for an existing task.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct EditArgs {
    /// Task id (`3` or `#3`).
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(short = 'p', long)]
    pub priority: Option<String>,
    /// Due date as YYYY-MM-DD; pass an empty string to clear it.
    #[arg(long = "due")]
    pub due_date: Option<String>,
}

/// Filter, sort and format of a listing.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ListArgs {
    /// Leave completed tasks out.
    #[arg(long, conflicts_with = "show_completed")]
    pub hide_completed: bool,
    /// Include completed tasks even if the config hides them.
    #[arg(long)]
    pub show_completed: bool,
    /// Only tasks with this priority (`all` for any).
    #[arg(short = 'p', long)]
    pub priority: Option<String>,
    /// priority, due_date, title or completion.
    #[arg(short = 's', long)]
    pub sort: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
#[command(no_binary_name = true, name = "taskmaster", disable_version_flag = true)]
struct ConsoleLine {
    #[command(subcommand)]
    cmd: ConsoleCommand,
}

/// Failure of a single console command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Draft(#[from] DraftError),
    #[error("task #{0} not found")]
    NotFound(TaskId),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl CommandError {
    fn user_message(&self) -> String {
        match self {
            Self::Input(err) => err.describe_user_facing(),
            other => other.to_string(),
        }
    }
}

/// Whether the console keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Defaults applied to listings when a command does not override them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewDefaults {
    pub filter: TaskFilter,
    pub sort: Option<SortOption>,
}

/// Console session bound to one store and one output.
pub struct Console<C, W> {
    store: TaskStore<C>,
    policy: DraftPolicy,
    defaults: ViewDefaults,
    out: W,
    prompt: Option<String>,
}

impl<C: Clock, W: Write> Console<C, W> {
    pub const fn new(store: TaskStore<C>, policy: DraftPolicy, defaults: ViewDefaults, out: W) -> Self {
        Self {
            store,
            policy,
            defaults,
            out,
            prompt: None,
        }
    }

    /// Print `prompt` before reading each line.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub const fn store(&self) -> &TaskStore<C> {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.out
    }

    /// Read commands from `input` until EOF or `quit`.
    pub fn run(&mut self, input: impl BufRead) -> io::Result<()> {
        let mut lines = input.lines();
        loop {
            if let Some(prompt) = &self.prompt {
                write!(self.out, "{prompt}")?;
                self.out.flush()?;
            }
            let Some(line) = lines.next().transpose()? else {
                break;
            };
            if self.run_line(&line)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Parse and execute one line. Command failures are reported on the output.
    pub fn run_line(&mut self, line: &str) -> io::Result<Flow> {
        let words = match shell_words::split(line) {
            Ok(words) => words,
            Err(err) => {
                writeln!(self.out, "error: {err}")?;
                return Ok(Flow::Continue);
            }
        };
        if words.is_empty() {
            return Ok(Flow::Continue);
        }
        let command = match ConsoleLine::try_parse_from(words) {
            Ok(parsed) => parsed.cmd,
            Err(err) => {
                // Covers `help` and `--help` as well as genuine usage errors.
                write!(self.out, "{}", err.render())?;
                return Ok(Flow::Continue);
            }
        };
        self.execute(command)
    }

    /// Execute an already parsed command.
    pub fn execute(&mut self, command: ConsoleCommand) -> io::Result<Flow> {
        tracing::debug!(?command, "executing console command");
        if command == ConsoleCommand::Quit {
            return Ok(Flow::Quit);
        }
        match handlers::dispatch(self, command) {
            Ok(()) => Ok(Flow::Continue),
            // Output failures end the session; everything else only ends the command.
            Err(CommandError::Io(err)) => Err(err),
            Err(err) => {
                writeln!(self.out, "error: {}", err.user_message())?;
                Ok(Flow::Continue)
            }
        }
    }
}
