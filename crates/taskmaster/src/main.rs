//! CLI entry point for taskmaster.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use taskmaster_app::{Clock, FixedClock, ProjectConfig, SystemClock, TaskSnapshot, TaskStore, seed_examples};
use taskmaster_core::due_date::parse_date;
use time::Date;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use commands::{Console, ConsoleCommand, ListArgs, ViewDefaults};
use view::OutputFormat;

mod commands;
mod view;

/// In-memory task list: add, edit, complete, filter, sort and summarize tasks.
#[derive(Parser, Debug)]
#[command(name = "taskmaster", version, about = "taskmaster: a single-session task list")]
struct Cli {
    /// Config file (defaults to .taskmaster/config.toml in the current directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Treat this date (YYYY-MM-DD) as today when judging overdue tasks.
    #[arg(long)]
    today: Option<String>,

    /// Log store activity to stderr.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start an interactive session reading commands from stdin.
    Shell,

    /// List tasks of a fresh session.
    Ls(ListArgs),

    /// Show statistics of a fresh session.
    Stats {
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show one task of a fresh session.
    Show {
        id: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    let Cli {
        config,
        today,
        verbose,
        cmd,
    } = Cli::parse();

    install_tracing(verbose);

    let config = load_config(config)?;
    match parse_today(today.as_deref())? {
        Some(date) => execute_command(FixedClock(date), &config, cmd, io::stdout().lock()),
        None => execute_command(SystemClock, &config, cmd, io::stdout().lock()),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<ProjectConfig> {
    match path {
        Some(path) => ProjectConfig::from_path(&path),
        None => {
            let cwd = std::env::current_dir().context("failed to resolve current directory")?;
            ProjectConfig::load(cwd)
        }
    }
}

fn parse_today(raw: Option<&str>) -> Result<Option<Date>> {
    raw.map(|value| parse_date(value).with_context(|| format!("invalid --today value: {value}")))
        .transpose()
}

fn execute_command<C: Clock, W: Write>(
    clock: C,
    config: &ProjectConfig,
    command: Command,
    out: W,
) -> Result<()> {
    let mut store = TaskStore::with_clock(clock);
    if config.store.seed_examples() {
        seed_examples(&mut store);
    }
    store.subscribe(|snapshot: &TaskSnapshot| {
        tracing::debug!(
            revision = snapshot.revision(),
            tasks = snapshot.len(),
            "task list changed"
        );
    });

    let defaults = ViewDefaults {
        filter: config.view.initial_filter(),
        sort: config.view.initial_sort()?,
    };
    let mut console = Console::new(store, config.input.draft_policy(), defaults, out);

    let one_shot = match command {
        Command::Shell => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                console = console.with_prompt("taskmaster> ");
            }
            console.run(stdin.lock()).context("console I/O failed")?;
            tracing::debug!(
                tasks = console.store().len(),
                revision = console.store().revision(),
                "session ended"
            );
            return Ok(());
        }
        Command::Ls(args) => ConsoleCommand::Ls(args),
        Command::Stats { format } => ConsoleCommand::Stats { format },
        Command::Show { id, format } => ConsoleCommand::Show { id, format },
    };
    console.execute(one_shot).context("failed to write output")?;
    Ok(())
}

fn install_tracing(verbose: bool) {
    // RUST_LOG wins; otherwise stay quiet unless --verbose is given.
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .try_init();
}
