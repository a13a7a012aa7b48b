//! Suggestion context builders.
//!
//! Request schemas require non-empty summary strings (task history, focus
//! pattern, past completion times). These builders derive them from the
//! application state, with honest cold-start wording when no data exists
//! yet -- the pipeline never sends an empty field.

use chrono::{DateTime, Timelike, Utc};

use crate::store::AppState;
use crate::task::Task;

/// Hour of day (0-23)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hour(pub u8);

impl Hour {
    /// Get current hour.
    pub fn now() -> Self {
        Self(Utc::now().hour() as u8)
    }

    /// Check if this is morning (6-12).
    pub fn is_morning(&self) -> bool {
        (6..=12).contains(&self.0)
    }

    /// Check if this is afternoon (12-18).
    pub fn is_afternoon(&self) -> bool {
        (12..=18).contains(&self.0)
    }

    /// Check if this is evening (18-24).
    pub fn is_evening(&self) -> bool {
        (18..24).contains(&self.0) || self.0 == 0
    }

    /// Coarse label used in focus summaries.
    pub fn period_name(&self) -> &'static str {
        if self.is_morning() {
            "morning"
        } else if self.is_afternoon() {
            "afternoon"
        } else {
            "evening"
        }
    }
}

/// Summarize recently completed tasks for the prompt context.
///
/// Always returns a non-empty string.
pub fn task_history_summary(state: &AppState) -> String {
    let recent = state.recent_completions(10);
    if recent.is_empty() {
        return "No completed tasks recorded yet.".to_string();
    }

    let total_minutes: u32 = recent.iter().map(|t| t.elapsed_minutes).sum();
    let avg = total_minutes / recent.len() as u32;
    let mut kinds: Vec<&str> = recent.iter().map(|t| t.task_type.name()).collect();
    kinds.sort_unstable();
    kinds.dedup();

    format!(
        "Completed {} tasks recently ({}), averaging {} minutes each.",
        recent.len(),
        kinds.join(", "),
        avg
    )
}

/// Summarize when the user tends to finish work.
///
/// Always returns a non-empty string.
pub fn focus_pattern_summary(state: &AppState) -> String {
    let recent = state.recent_completions(20);
    let hours: Vec<Hour> = recent
        .iter()
        .filter_map(|t| t.completed_at)
        .map(|at| Hour(at.hour() as u8))
        .collect();

    if hours.is_empty() {
        return "No focus pattern data yet.".to_string();
    }

    // Buckets keyed on period_name so every hour lands in exactly one.
    let morning = hours.iter().filter(|h| h.period_name() == "morning").count();
    let afternoon = hours
        .iter()
        .filter(|h| h.period_name() == "afternoon")
        .count();
    let evening = hours.len() - morning - afternoon;

    let peak = if morning >= afternoon && morning >= evening {
        "morning"
    } else if afternoon >= evening {
        "afternoon"
    } else {
        "evening"
    };

    format!(
        "Most task completions happen in the {} ({} morning, {} afternoon, {} evening of the last {}).",
        peak,
        morning,
        afternoon,
        evening,
        hours.len()
    )
}

/// Format past completion times as a compact list.
///
/// Always returns a non-empty string.
pub fn past_completion_times(state: &AppState) -> String {
    let recent = state.recent_completions(5);
    let times: Vec<String> = recent
        .iter()
        .filter_map(|t| t.completed_at)
        .map(|at| at.format("%a %H:%M").to_string())
        .collect();

    if times.is_empty() {
        "No completion times recorded yet.".to_string()
    } else {
        times.join(", ")
    }
}

/// Minutes elapsed since the most recent completion, if any.
pub fn minutes_since_last_completion(state: &AppState, now: DateTime<Utc>) -> Option<u32> {
    state
        .recent_completions(1)
        .first()
        .and_then(|t: &&Task| t.completed_at)
        .map(|at| (now - at).num_minutes().max(0) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;
    use chrono::{Duration, TimeZone};

    fn state_with_completions(hours: &[u32]) -> AppState {
        let mut state = AppState::default();
        for (i, hour) in hours.iter().enumerate() {
            let mut task = Task::new(format!("Task {i}"));
            task.complete(25);
            task.completed_at = Some(
                Utc.with_ymd_and_hms(2026, 8, 3, *hour, 0, 0)
                    .single()
                    .unwrap()
                    + Duration::minutes(i as i64),
            );
            state.tasks.push(task);
        }
        state
    }

    #[test]
    fn summaries_are_non_empty_on_cold_start() {
        let state = AppState::default();
        assert!(!task_history_summary(&state).is_empty());
        assert!(!focus_pattern_summary(&state).is_empty());
        assert!(!past_completion_times(&state).is_empty());
        assert!(task_history_summary(&state).contains("No completed tasks"));
    }

    #[test]
    fn history_summary_reports_count_and_average() {
        let state = state_with_completions(&[9, 10, 11]);
        let summary = task_history_summary(&state);
        assert!(summary.contains("3 tasks"));
        assert!(summary.contains("25 minutes"));
    }

    #[test]
    fn focus_summary_finds_morning_peak() {
        let state = state_with_completions(&[9, 10, 11, 20]);
        let summary = focus_pattern_summary(&state);
        assert!(summary.contains("morning"), "got: {summary}");
    }

    #[test]
    fn completion_times_formatted() {
        let state = state_with_completions(&[9]);
        let times = past_completion_times(&state);
        assert!(times.contains("09:00"));
    }

    #[test]
    fn hour_period_names() {
        assert_eq!(Hour(8).period_name(), "morning");
        assert_eq!(Hour(14).period_name(), "afternoon");
        assert_eq!(Hour(21).period_name(), "evening");
    }
}
