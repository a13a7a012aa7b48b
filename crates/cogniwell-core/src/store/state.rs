//! JSON-based application state store.
//!
//! The original storage model was a grab-bag of fixed string keys in
//! browser-style local storage (`userSettings`, `preferredSport`,
//! `weeklyRoutine`, `physicalTrainingPoints`, `cognitiveGamePoints`).
//! Here the same sections live in one explicit [`AppState`] document with a
//! single owner: [`StateStore`] controls every load/save boundary and is
//! injected into whatever needs it. There is no schema versioning or
//! migration; absent fields fall back to serde defaults.
//!
//! State is stored at `~/.config/cogniwell/state.json`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::StoreError;
use crate::task::Task;
use crate::workout::WorkoutEntry;

/// Cognitive mode selected by the user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CognitiveMode {
    /// Standard mode
    Standard,
    /// Reduced stimulation, gentler pacing
    Calm,
    /// Denser information, more prompts
    Intensive,
}

impl Default for CognitiveMode {
    fn default() -> Self {
        CognitiveMode::Standard
    }
}

/// UI theme preference.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Dark
    }
}

/// User profile settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default)]
    pub cognitive_mode: CognitiveMode,
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
    #[serde(default)]
    pub theme: Theme,
}

fn default_true() -> bool {
    true
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            cognitive_mode: CognitiveMode::Standard,
            notifications_enabled: true,
            theme: Theme::Dark,
        }
    }
}

/// Weekly workout routine: one optional sport per weekday (0=Sun ... 6=Sat).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeeklyRoutine {
    #[serde(default)]
    pub days: [Option<String>; 7],
}

impl WeeklyRoutine {
    /// Sport planned for the given weekday, if any.
    pub fn sport_for(&self, day_of_week: u8) -> Option<&str> {
        self.days
            .get(day_of_week as usize)
            .and_then(|d| d.as_deref())
    }

    /// Number of planned workout days.
    pub fn planned_days(&self) -> usize {
        self.days.iter().filter(|d| d.is_some()).count()
    }
}

/// The complete application state document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub user_settings: UserSettings,
    #[serde(default)]
    pub preferred_sport: Option<String>,
    #[serde(default)]
    pub weekly_routine: WeeklyRoutine,
    #[serde(default)]
    pub physical_training_points: u64,
    #[serde(default)]
    pub cognitive_game_points: u64,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub workouts: Vec<WorkoutEntry>,
}

/// Owner of the persisted [`AppState`].
///
/// All disk IO goes through this type; domain code receives `&AppState` or
/// `&mut AppState` and never touches the file itself.
pub struct StateStore {
    path: PathBuf,
    state: AppState,
}

impl StateStore {
    /// Open the store at an explicit path, loading existing state or
    /// starting from defaults when the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let state = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| StoreError::ParseFailed(e.to_string()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => AppState::default(),
            Err(e) => {
                return Err(StoreError::LoadFailed {
                    path,
                    message: e.to_string(),
                })
            }
        };
        Ok(Self { path, state })
    }

    /// Open the store at the default location under [`data_dir`].
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created or the
    /// state document cannot be read or parsed.
    pub fn open_default() -> Result<Self, Box<dyn std::error::Error>> {
        let path = data_dir()?.join("state.json");
        Ok(Self::open(path)?)
    }

    /// Read access to the current state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Mutable access to the current state. Call [`StateStore::save`] to
    /// persist changes.
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Persist the current state to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&self.state)
            .map_err(|e| StoreError::ParseFailed(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|e| StoreError::SaveFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Apply a mutation and persist in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if the save fails; the in-memory mutation is kept
    /// either way.
    pub fn update<F: FnOnce(&mut AppState)>(&mut self, f: F) -> Result<(), StoreError> {
        f(&mut self.state);
        self.save()
    }

    /// Get a state value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(&self.state).ok()?;
        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        match current {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
