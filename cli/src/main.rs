use std::io::{self, BufRead, Write};

use anyhow::Result;
use chrono::DateTime;
use chrono_tz::Tz;
use clap::Parser;
use log::debug;
use nextup_core::{
    format_due, next_task, parse_due, time, Priority, Status, Task, TaskId, TaskStore, ZONE,
};

#[derive(Parser)]
#[command(name = "nextup", version)]
#[command(about = "Interactive console task tracker that suggests what to do next")]
struct Cli {}

type InputLines = io::Lines<io::StdinLock<'static>>;

fn main() -> Result<()> {
    env_logger::init();
    let _cli = Cli::parse();

    let mut store = TaskStore::new();
    let mut input = io::stdin().lock().lines();

    loop {
        print_menu();
        let Some(choice) = read_line(&mut input, "Enter choice: ")? else {
            break;
        };
        debug!("menu choice: '{}'", choice);
        match choice.parse::<u32>() {
            Ok(1) => add_task(&mut store, &mut input)?,
            Ok(2) => remove_task(&mut store, &mut input)?,
            Ok(3) => update_status(&mut store, &mut input)?,
            Ok(4) => view_all(&store),
            Ok(5) => view_overdue(&store),
            Ok(6) => recommend(&store),
            Ok(7) => {
                println!("Goodbye.");
                break;
            }
            Ok(_) => println!("Invalid choice, pick a number between 1 and 7."),
            Err(_) => println!("Invalid input, enter a number between 1 and 7."),
        }
    }
    Ok(())
}

fn print_menu() {
    println!();
    println!("===== Task Tracker =====");
    println!("1. Add Task");
    println!("2. Remove Task");
    println!("3. Update Task Status");
    println!("4. View All Tasks");
    println!("5. View Overdue Tasks");
    println!("6. Recommend Next Task");
    println!("7. Exit");
}

/// Prompts and reads one trimmed line. `None` means stdin is exhausted, in
/// which case every caller unwinds back to the main loop and the program
/// exits cleanly.
fn read_line(input: &mut InputLines, prompt: &str) -> Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;
    match input.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}

fn add_task(store: &mut TaskStore, input: &mut InputLines) -> Result<()> {
    let Some(raw_id) = read_line(input, "Task ID (e.g. T001): ")? else {
        return Ok(());
    };
    let id: TaskId = match raw_id.parse() {
        Ok(id) => id,
        Err(e) => {
            println!("{}", e);
            return Ok(());
        }
    };

    let Some(title) = read_line(input, "Title: ")? else {
        return Ok(());
    };
    if title.is_empty() {
        println!("Title must not be empty.");
        return Ok(());
    }

    let Some(raw_priority) = read_line(input, "Priority (1=high, 2=medium, 3=low): ")? else {
        return Ok(());
    };
    let priority = match raw_priority.parse::<u8>().ok().and_then(Priority::from_level) {
        Some(priority) => priority,
        None => {
            println!("Invalid priority, expected 1, 2 or 3.");
            return Ok(());
        }
    };

    let Some(description) = read_line(input, "Description (optional): ")? else {
        return Ok(());
    };

    let Some(due_at) = prompt_due(input)? else {
        return Ok(());
    };

    let task = Task::new(id, title, priority, description, due_at);
    match store.add(task, time::now(ZONE)) {
        Ok(()) => println!("Task added."),
        Err(e) => println!("{}", e),
    }
    Ok(())
}

/// The one prompt that retries in place: keeps asking until the date/time
/// parses, per the add-task flow.
fn prompt_due(input: &mut InputLines) -> Result<Option<DateTime<Tz>>> {
    loop {
        let Some(raw) = read_line(input, "Due (YYYY-MM-DD HH:MM, YYYY-MM-DD or HH:MM): ")? else {
            return Ok(None);
        };
        match parse_due(&raw, time::now(ZONE)) {
            Ok(due_at) => return Ok(Some(due_at)),
            Err(e) => println!("{}", e),
        }
    }
}

fn remove_task(store: &mut TaskStore, input: &mut InputLines) -> Result<()> {
    let Some(raw_id) = read_line(input, "Task ID to remove: ")? else {
        return Ok(());
    };
    match raw_id.parse::<TaskId>() {
        Ok(id) => match store.remove(&id) {
            Ok(task) => println!("Removed {}.", task.id),
            Err(e) => println!("{}", e),
        },
        Err(e) => println!("{}", e),
    }
    Ok(())
}

fn update_status(store: &mut TaskStore, input: &mut InputLines) -> Result<()> {
    let Some(raw_id) = read_line(input, "Task ID to update: ")? else {
        return Ok(());
    };
    let id: TaskId = match raw_id.parse() {
        Ok(id) => id,
        Err(e) => {
            println!("{}", e);
            return Ok(());
        }
    };

    let Some(raw_status) = read_line(input, "New status: ")? else {
        return Ok(());
    };
    let status = Status::from(raw_status.as_str());
    match store.update_status(&id, status) {
        Ok(previous) => {
            // update_status moved the new value into the task; read it back
            // for the confirmation line.
            let current = store.get(&id).map(|t| t.status.clone()).unwrap_or_default();
            println!("Status of {} changed from \"{}\" to \"{}\".", id, previous, current);
        }
        Err(e) => println!("{}", e),
    }
    Ok(())
}

fn view_all(store: &TaskStore) {
    if store.is_empty() {
        println!("No tasks.");
        return;
    }
    for task in store.iter() {
        println!("{}", display_line(task));
    }
}

fn view_overdue(store: &TaskStore) {
    let overdue = store.overdue(time::now(ZONE));
    if overdue.is_empty() {
        println!("No overdue tasks.");
        return;
    }
    for task in overdue {
        println!("{}", display_line(task));
    }
}

fn recommend(store: &TaskStore) {
    match next_task(store.iter()) {
        Some(task) => println!("Next up -> {}", display_line(task)),
        None => println!("No task to recommend."),
    }
}

fn display_line(task: &Task) -> String {
    format!(
        "ID: {}, Title: \"{}\", Due: \"{}\", Priority: {}, Status: \"{}\"",
        task.id,
        task.title,
        format_due(task.due_at),
        task.priority.level(),
        task.status
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_display_line_format() {
        let due_at = ZONE.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap();
        let mut task = Task::new(
            "T001".parse().unwrap(),
            "Write report".to_string(),
            Priority::High,
            "quarterly numbers".to_string(),
            due_at,
        );
        task.update_status(Status::from("In Progress"));

        assert_eq!(
            display_line(&task),
            "ID: T001, Title: \"Write report\", Due: \"2025-06-01 09:30:00 IST\", \
             Priority: 1, Status: \"In Progress\""
        );
    }
}
