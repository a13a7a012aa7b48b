//! Point total commands.

use clap::Subcommand;

use cogniwell_core::store::StateStore;

#[derive(Subcommand)]
pub enum PointsAction {
    /// Show both point totals
    Show,
    /// Record a cognitive game result
    Game {
        /// Score earned in the game
        score: u64,
    },
}

pub fn run(action: PointsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = StateStore::open_default()?;
    match action {
        PointsAction::Show => {
            let state = store.state();
            println!("Physical training points: {}", state.physical_training_points);
            println!("Cognitive game points:    {}", state.cognitive_game_points);
        }
        PointsAction::Game { score } => {
            let mut total = 0;
            store.update(|state| {
                total = state.record_cognitive_game(score);
            })?;
            println!("Recorded. Cognitive game points: {total}");
        }
    }
    Ok(())
}
