use std::io::Write;

use taskmaster_app::{
    Clock, TaskDraft, TaskEdit, TaskFilterBuilder, changed_fields, parse_optional_priority,
    parse_priority, parse_sort_option, parse_task_id,
};
use taskmaster_core::{Task, TaskId};

use super::{AddArgs, CommandError, Console, ConsoleCommand, EditArgs, ListArgs};
use crate::view::{self, OutputFormat};

type CommandResult = Result<(), CommandError>;

pub(super) fn dispatch<C: Clock, W: Write>(
    console: &mut Console<C, W>,
    command: ConsoleCommand,
) -> CommandResult {
    match command {
        ConsoleCommand::Add(args) => handle_add(console, args),
        ConsoleCommand::Edit(args) => handle_edit(console, args),
        ConsoleCommand::Toggle { id } => handle_toggle(console, &id),
        ConsoleCommand::Rm { id } => handle_rm(console, &id),
        ConsoleCommand::Show { id, format } => handle_show(console, &id, format),
        ConsoleCommand::Ls(args) => handle_ls(console, args),
        ConsoleCommand::Stats { format } => handle_stats(console, format),
        ConsoleCommand::Quit => Ok(()),
    }
}

fn handle_add<C: Clock, W: Write>(console: &mut Console<C, W>, args: AddArgs) -> CommandResult {
    let AddArgs {
        title,
        description,
        priority,
        due_date,
    } = args;

    let mut draft = TaskDraft::new(title).description(description);
    if let Some(token) = priority {
        draft = draft.priority(parse_priority(&token)?);
    }
    if let Some(due) = due_date {
        draft = draft.due_date(due);
    }
    let fields = draft.validate(console.policy)?;

    let task = console.store.add(fields);
    writeln!(console.out, "added {}", view::task_summary(&task))?;
    Ok(())
}

fn handle_edit<C: Clock, W: Write>(console: &mut Console<C, W>, args: EditArgs) -> CommandResult {
    let EditArgs {
        id,
        title,
        description,
        priority,
        due_date,
    } = args;
    let id = parse_task_id(&id)?;
    let edit = TaskEdit {
        title,
        description,
        priority: priority.as_deref().map(parse_priority).transpose()?,
        due_date,
    };
    if edit.is_empty() {
        writeln!(console.out, "nothing to change for #{id}")?;
        return Ok(());
    }

    let before = existing(console, id)?.clone();
    let fields = edit.merge_onto(&before).validate(console.policy)?;
    let after = console
        .store
        .update(id, fields)
        .ok_or(CommandError::NotFound(id))?;

    let changed = changed_fields(&before, &after);
    if changed.is_empty() {
        writeln!(console.out, "unchanged {}", view::task_summary(&after))?;
    } else {
        writeln!(
            console.out,
            "updated {} ({})",
            view::task_summary(&after),
            changed.join(", ")
        )?;
    }
    Ok(())
}

fn handle_toggle<C: Clock, W: Write>(console: &mut Console<C, W>, raw_id: &str) -> CommandResult {
    let id = parse_task_id(raw_id)?;
    let task = console
        .store
        .toggle_task_completion(id)
        .ok_or(CommandError::NotFound(id))?;
    let verb = if task.is_completed { "completed" } else { "reopened" };
    writeln!(console.out, "{verb} {}", view::task_summary(&task))?;
    Ok(())
}

fn handle_rm<C: Clock, W: Write>(console: &mut Console<C, W>, raw_id: &str) -> CommandResult {
    let id = parse_task_id(raw_id)?;
    let task = console
        .store
        .delete_task(id)
        .ok_or(CommandError::NotFound(id))?;
    writeln!(console.out, "deleted {}", view::task_summary(&task))?;
    Ok(())
}

fn handle_show<C: Clock, W: Write>(
    console: &mut Console<C, W>,
    raw_id: &str,
    format: OutputFormat,
) -> CommandResult {
    let id = parse_task_id(raw_id)?;
    let today = console.store.clock().today();
    let task = existing(console, id)?.clone();
    view::render_task_detail(&mut console.out, &task, today, format)?;
    Ok(())
}

fn handle_ls<C: Clock, W: Write>(console: &mut Console<C, W>, args: ListArgs) -> CommandResult {
    let ListArgs {
        hide_completed,
        show_completed,
        priority,
        sort,
        format,
    } = args;

    let show = if hide_completed {
        false
    } else {
        show_completed || console.defaults.filter.show_completed
    };
    let filter = TaskFilterBuilder::new()
        .show_completed(show)
        .with_priority(parse_optional_priority(priority.as_deref())?)
        .build();
    let sort = match sort {
        Some(token) => Some(parse_sort_option(&token)?),
        None => console.defaults.sort,
    };

    let tasks = console.store.get_view(&filter, sort);
    let today = console.store.clock().today();
    view::render_task_list(&mut console.out, &tasks, &filter, sort, today, format)?;
    Ok(())
}

fn handle_stats<C: Clock, W: Write>(console: &mut Console<C, W>, format: OutputFormat) -> CommandResult {
    let stats = console.store.get_task_statistics();
    view::render_statistics(&mut console.out, &stats, format)?;
    Ok(())
}

fn existing<C: Clock, W>(console: &Console<C, W>, id: TaskId) -> Result<&Task, CommandError> {
    console
        .store
        .get_task_by_id(id)
        .ok_or(CommandError::NotFound(id))
}
