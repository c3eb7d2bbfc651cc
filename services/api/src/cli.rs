use crate::report::{
    run_compare, run_country, run_insights, run_leaderboard, CompareArgs, CountryArgs,
    InsightsArgs, LeaderboardArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use digital_tracker::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Digital Infrastructure Tracker",
    about = "Serve and report on the digital infrastructure country tracker",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the ranked leaderboard, optionally filtered and sorted
    Leaderboard(LeaderboardArgs),
    /// Print the detail profile of one country
    Country(CountryArgs),
    /// Compare two to four countries side by side
    Compare(CompareArgs),
    /// Print the dashboard summary and narrative insights
    Insights(InsightsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Tracker dataset JSON to serve instead of the bundled one
    #[arg(long)]
    pub(crate) data: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Leaderboard(args) => run_leaderboard(args),
        Command::Country(args) => run_country(args),
        Command::Compare(args) => run_compare(args),
        Command::Insights(args) => run_insights(args),
    }
}
