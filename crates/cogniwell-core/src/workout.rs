//! Workout logging and point accounting.
//!
//! Logged workouts award physical-training points scaled by duration and
//! intensity; cognitive game results award cognitive-game points. Both
//! counters live in the [`AppState`](crate::store::AppState) document.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::store::AppState;

/// Workout intensity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Light,
    Moderate,
    Vigorous,
}

impl Default for Intensity {
    fn default() -> Self {
        Intensity::Moderate
    }
}

impl Intensity {
    /// Point multiplier applied to workout duration.
    pub fn point_factor(&self) -> u64 {
        match self {
            Intensity::Light => 1,
            Intensity::Moderate => 2,
            Intensity::Vigorous => 3,
        }
    }
}

/// A single logged workout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutEntry {
    /// Unique identifier
    pub id: String,
    /// Sport name (e.g. "running", "climbing")
    pub sport: String,
    /// Duration in minutes
    pub duration_min: u32,
    /// Intensity of the session
    #[serde(default)]
    pub intensity: Intensity,
    /// When the workout was logged
    pub logged_at: DateTime<Utc>,
}

impl WorkoutEntry {
    /// Create a new entry logged now.
    pub fn new(sport: impl Into<String>, duration_min: u32, intensity: Intensity) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sport: sport.into(),
            duration_min,
            intensity,
            logged_at: Utc::now(),
        }
    }

    /// Points this entry is worth.
    pub fn points(&self) -> u64 {
        u64::from(self.duration_min) * self.intensity.point_factor()
    }
}

impl AppState {
    /// Log a workout, award points, and return the points earned.
    pub fn log_workout(&mut self, entry: WorkoutEntry) -> u64 {
        let earned = entry.points();
        self.physical_training_points += earned;
        self.workouts.push(entry);
        earned
    }

    /// Record a cognitive game result, awarding its score as points.
    pub fn record_cognitive_game(&mut self, score: u64) -> u64 {
        self.cognitive_game_points += score;
        self.cognitive_game_points
    }

    /// Workouts logged in the current ISO week of `now`.
    pub fn workouts_this_week(&self, now: DateTime<Utc>) -> Vec<&WorkoutEntry> {
        let week = now.iso_week();
        self.workouts
            .iter()
            .filter(|w| w.logged_at.iso_week() == week)
            .collect()
    }

    /// Whether today's routine sport has already been logged today.
    pub fn routine_done_today(&self, now: DateTime<Utc>) -> bool {
        let day = now.weekday().num_days_from_sunday() as u8;
        let Some(sport) = self.weekly_routine.sport_for(day) else {
            return false;
        };
        self.workouts
            .iter()
            .any(|w| w.logged_at.date_naive() == now.date_naive() && w.sport == sport)
    }
}
