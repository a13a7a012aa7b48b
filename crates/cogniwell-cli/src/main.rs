use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "cogniwell", version, about = "Cogniwell CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggestion cards
    Suggest {
        #[command(subcommand)]
        action: commands::suggest::SuggestAction,
    },
    /// Task and reminder management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Workout logging and routine
    Workout {
        #[command(subcommand)]
        action: commands::workout::WorkoutAction,
    },
    /// Point totals
    Points {
        #[command(subcommand)]
        action: commands::points::PointsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generation service credentials
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Suggest { action } => commands::suggest::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Workout { action } => commands::workout::run(action),
        Commands::Points { action } => commands::points::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Auth { action } => commands::auth::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
