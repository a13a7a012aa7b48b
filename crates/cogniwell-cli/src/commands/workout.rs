//! Workout logging and routine commands.

use chrono::Utc;
use clap::Subcommand;

use cogniwell_core::store::StateStore;
use cogniwell_core::workout::{Intensity, WorkoutEntry};

#[derive(Subcommand)]
pub enum WorkoutAction {
    /// Log a workout
    Log {
        /// Sport name (e.g. running)
        sport: String,
        /// Duration in minutes
        duration: u32,
        /// Intensity: light, moderate, vigorous
        #[arg(long, default_value = "moderate")]
        intensity: String,
    },
    /// List workouts logged this week
    List,
    /// Show or set the weekly routine
    Routine {
        /// Weekday to set (0=Sun ... 6=Sat)
        #[arg(long)]
        day: Option<u8>,
        /// Sport for that weekday; omit to clear
        #[arg(long)]
        sport: Option<String>,
    },
    /// Set the preferred sport
    PreferredSport {
        /// Sport name
        sport: String,
    },
}

fn parse_intensity(s: &str) -> Result<Intensity, Box<dyn std::error::Error>> {
    match s {
        "light" => Ok(Intensity::Light),
        "moderate" => Ok(Intensity::Moderate),
        "vigorous" => Ok(Intensity::Vigorous),
        other => Err(format!("unknown intensity '{other}'").into()),
    }
}

pub fn run(action: WorkoutAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = StateStore::open_default()?;
    match action {
        WorkoutAction::Log {
            sport,
            duration,
            intensity,
        } => {
            let entry = WorkoutEntry::new(sport, duration, parse_intensity(&intensity)?);
            let mut earned = 0;
            store.update(|state| {
                earned = state.log_workout(entry);
            })?;
            println!(
                "Workout logged. +{} points (total {})",
                earned,
                store.state().physical_training_points
            );
        }
        WorkoutAction::List => {
            let this_week = store.state().workouts_this_week(Utc::now());
            if this_week.is_empty() {
                println!("No workouts this week.");
            } else {
                for workout in this_week {
                    println!(
                        "{}  {} min  {}  ({} pts)",
                        workout.logged_at.format("%a %H:%M"),
                        workout.duration_min,
                        workout.sport,
                        workout.points()
                    );
                }
            }
        }
        WorkoutAction::Routine { day, sport } => match day {
            Some(day) if day <= 6 => {
                store.update(|state| {
                    state.weekly_routine.days[day as usize] = sport.clone();
                })?;
                match sport {
                    Some(sport) => println!("Routine set: day {day} -> {sport}"),
                    None => println!("Routine cleared for day {day}"),
                }
            }
            Some(day) => return Err(format!("day {day} out of range (0-6)").into()),
            None => {
                let names = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
                for (i, name) in names.iter().enumerate() {
                    let sport = store.state().weekly_routine.days[i]
                        .as_deref()
                        .unwrap_or("-");
                    println!("{name}  {sport}");
                }
                if store.state().routine_done_today(Utc::now()) {
                    println!("\nToday's routine: done");
                }
            }
        },
        WorkoutAction::PreferredSport { sport } => {
            store.update(|state| {
                state.preferred_sport = Some(sport.clone());
            })?;
            println!("Preferred sport set: {sport}");
        }
    }
    Ok(())
}
