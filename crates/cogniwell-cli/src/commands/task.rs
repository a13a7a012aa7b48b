//! Task and reminder management commands.

use chrono::{DateTime, Utc};
use clap::Subcommand;

use cogniwell_core::store::StateStore;
use cogniwell_core::task::{Task, TaskType};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Create {
        /// Task title
        title: String,
        /// Free-form note
        #[arg(long)]
        note: Option<String>,
        /// Task type: focused-work, shallow-work, errand
        #[arg(long, default_value = "focused-work")]
        task_type: String,
        /// Reminder timestamp (RFC 3339, e.g. 2026-08-06T15:00:00Z)
        #[arg(long)]
        remind_at: Option<String>,
        /// Estimated minutes
        #[arg(long)]
        estimate: Option<u32>,
    },
    /// List open tasks
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a task done
    Done {
        /// Task ID
        id: String,
        /// Minutes actually spent
        #[arg(long, default_value = "0")]
        elapsed: u32,
    },
    /// Remove a task
    Remove {
        /// Task ID
        id: String,
    },
    /// Show reminders that are due now
    Due,
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = StateStore::open_default()?;
    match action {
        TaskAction::Create {
            title,
            note,
            task_type,
            remind_at,
            estimate,
        } => {
            let mut task = Task::new(title);
            task.note = note;
            task.task_type = match task_type.as_str() {
                "focused-work" => TaskType::FocusedWork,
                "shallow-work" => TaskType::ShallowWork,
                "errand" => TaskType::Errand,
                other => return Err(format!("unknown task type '{other}'").into()),
            };
            if let Some(at) = remind_at {
                let parsed: DateTime<Utc> = at.parse()?;
                task.remind_at = Some(parsed);
            }
            task.estimated_minutes = estimate;

            let mut id = String::new();
            store.update(|state| {
                id = state.add_task(task);
            })?;
            println!("Task created: {id}");
        }
        TaskAction::List { json } => {
            let open = store.state().open_tasks();
            if json {
                let tasks: Vec<&Task> = open;
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else if open.is_empty() {
                println!("No open tasks.");
            } else {
                for task in open {
                    let reminder = task
                        .remind_at
                        .map(|at| format!("  (remind {})", at.format("%Y-%m-%d %H:%M")))
                        .unwrap_or_default();
                    println!("{}  {}{}", task.id, task.title, reminder);
                }
            }
        }
        TaskAction::Done { id, elapsed } => {
            let mut found = false;
            store.update(|state| {
                found = state.complete_task(&id, elapsed);
            })?;
            if found {
                println!("Task completed: {id}");
            } else {
                return Err(format!("no task with id {id}").into());
            }
        }
        TaskAction::Remove { id } => {
            let mut found = false;
            store.update(|state| {
                found = state.remove_task(&id);
            })?;
            if found {
                println!("Task removed: {id}");
            } else {
                return Err(format!("no task with id {id}").into());
            }
        }
        TaskAction::Due => {
            let due = store.state().due_reminders(Utc::now());
            if due.is_empty() {
                println!("No reminders due.");
            } else {
                for task in due {
                    println!("{}  {}", task.id, task.title);
                }
            }
        }
    }
    Ok(())
}
