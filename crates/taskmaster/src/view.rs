//! Text and JSON rendering of store views.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;
use taskmaster_core::{SortOption, Task, TaskFilter, TaskStatistics};
use time::Date;

/// Output format for listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListOutput<'a> {
    filter: &'a TaskFilter,
    sort: Option<SortOption>,
    tasks: &'a [Task],
}

pub fn render_task_list(
    out: &mut impl Write,
    tasks: &[Task],
    filter: &TaskFilter,
    sort: Option<SortOption>,
    today: Date,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let payload = ListOutput { filter, sort, tasks };
            write_json(out, &payload)
        }
        OutputFormat::Table if tasks.is_empty() => {
            if filter.is_empty() {
                writeln!(out, "No tasks found")
            } else {
                writeln!(out, "No tasks matched the provided filters")
            }
        }
        OutputFormat::Table => render_task_table(out, tasks, today),
    }
}

fn render_task_table(out: &mut impl Write, tasks: &[Task], today: Date) -> io::Result<()> {
    writeln!(out, "ID | Done | Priority | Due | Title")?;
    writeln!(out, "-- | ---- | -------- | --- | -----")?;
    for task in tasks {
        writeln!(
            out,
            "{} | {} | {} | {} | {}",
            task.id,
            checkbox(task),
            task.priority,
            due_label(task, today),
            task.title
        )?;
    }
    Ok(())
}

pub fn render_task_detail(
    out: &mut impl Write,
    task: &Task,
    today: Date,
    format: OutputFormat,
) -> io::Result<()> {
    if format == OutputFormat::Json {
        return write_json(out, task);
    }
    writeln!(out, "#{} {}", task.id, task.title)?;
    writeln!(out, "priority: {}", task.priority)?;
    writeln!(out, "status: {}", if task.is_completed { "done" } else { "open" })?;
    writeln!(out, "due: {}", due_label(task, today))?;
    if !task.description.is_empty() {
        writeln!(out)?;
        for line in task.description.lines() {
            writeln!(out, "  {line}")?;
        }
    }
    Ok(())
}

pub fn render_statistics(
    out: &mut impl Write,
    stats: &TaskStatistics,
    format: OutputFormat,
) -> io::Result<()> {
    if format == OutputFormat::Json {
        return write_json(out, stats);
    }
    writeln!(out, "Total tasks: {}", stats.total_tasks)?;
    writeln!(
        out,
        "Completed: {} ({}%)",
        stats.completed_tasks, stats.completion_rate
    )?;
    writeln!(out, "Pending: {}", stats.pending_tasks())?;
    writeln!(out, "Pending high priority: {}", stats.pending_high_priority)?;
    writeln!(out, "Overdue: {}", stats.overdue_tasks)
}

/// One-line summary used after a mutation.
pub fn task_summary(task: &Task) -> String {
    format!("#{} {} [{}] {}", task.id, checkbox(task), task.priority, task.title)
}

const fn checkbox(task: &Task) -> &'static str {
    if task.is_completed { "[x]" } else { "[ ]" }
}

fn due_label(task: &Task, today: Date) -> String {
    if task.due_date.is_empty() {
        return "-".to_owned();
    }
    if task.due_date.is_malformed() {
        return format!("{} (unrecognized)", task.due_date);
    }
    if task.is_overdue(today) {
        format!("{} (overdue)", task.due_date)
    } else {
        task.due_date.to_string()
    }
}

fn write_json(out: &mut impl Write, value: &impl Serialize) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}
