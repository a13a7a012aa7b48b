//! Task and reminder tracking.
//!
//! Tasks are single-user, uncontested CRUD records held in the
//! [`AppState`](crate::store::AppState) document. A task with a `remind_at`
//! timestamp doubles as a reminder; completed tasks feed the suggestion
//! context summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::AppState;

/// Kind of work a task represents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    /// Deep, concentration-heavy work
    FocusedWork,
    /// Administrative or low-concentration work
    ShallowWork,
    /// Errand outside the desk
    Errand,
}

impl Default for TaskType {
    fn default() -> Self {
        TaskType::FocusedWork
    }
}

impl TaskType {
    /// Display name used in summaries and prompts.
    pub fn name(&self) -> &str {
        match self {
            TaskType::FocusedWork => "focused work",
            TaskType::ShallowWork => "shallow work",
            TaskType::Errand => "errand",
        }
    }
}

/// Task state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    /// Task is open (initial state)
    Open,
    /// Task is completed (terminal state)
    Done,
}

impl Default for TaskState {
    fn default() -> Self {
        TaskState::Open
    }
}

/// A tracked task, optionally carrying a reminder timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: String,
    /// Task title
    pub title: String,
    /// Optional free-form note
    pub note: Option<String>,
    /// Kind of work
    #[serde(default)]
    pub task_type: TaskType,
    /// Current state
    #[serde(default)]
    pub state: TaskState,
    /// When to remind the user, if at all
    pub remind_at: Option<DateTime<Utc>>,
    /// Estimated duration in minutes (null if not set)
    pub estimated_minutes: Option<u32>,
    /// Minutes actually spent
    #[serde(default)]
    pub elapsed_minutes: u32,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Completion timestamp (null if not completed)
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a new open task with default values.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Task {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            note: None,
            task_type: TaskType::FocusedWork,
            state: TaskState::Open,
            remind_at: None,
            estimated_minutes: None,
            elapsed_minutes: 0,
            created_at: now,
            completed_at: None,
        }
    }

    /// Mark the task as done, recording elapsed time.
    pub fn complete(&mut self, elapsed_minutes: u32) {
        self.state = TaskState::Done;
        self.elapsed_minutes = elapsed_minutes;
        self.completed_at = Some(Utc::now());
    }

    /// Whether the reminder is due at the given instant.
    pub fn reminder_due(&self, now: DateTime<Utc>) -> bool {
        self.state == TaskState::Open && self.remind_at.is_some_and(|at| at <= now)
    }
}

impl AppState {
    /// Add a task and return its id.
    pub fn add_task(&mut self, task: Task) -> String {
        let id = task.id.clone();
        self.tasks.push(task);
        id
    }

    /// Find a task by id.
    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Complete a task by id. Returns false if the id is unknown.
    pub fn complete_task(&mut self, id: &str, elapsed_minutes: u32) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.complete(elapsed_minutes);
                true
            }
            None => false,
        }
    }

    /// Remove a task by id. Returns false if the id is unknown.
    pub fn remove_task(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// All open tasks, oldest first.
    pub fn open_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.state == TaskState::Open)
            .collect()
    }

    /// Open tasks whose reminder timestamp has passed.
    pub fn due_reminders(&self, now: DateTime<Utc>) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.reminder_due(now)).collect()
    }

    /// Completed tasks, most recent first (up to `limit`).
    pub fn recent_completions(&self, limit: usize) -> Vec<&Task> {
        let mut done: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| t.state == TaskState::Done)
            .collect();
        done.sort_by_key(|t| std::cmp::Reverse(t.completed_at));
        done.truncate(limit);
        done
    }
}
