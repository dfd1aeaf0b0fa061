use crate::commands::{run_recommend, run_roster_export, RecommendArgs, RosterArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use course_advisor::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Course Advisor",
    about = "Run the course advising service or score assessments from the command line",
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
    /// Score an assessment snapshot and print the recommendation as JSON
    Recommend(RecommendArgs),
    /// Export the advisor roster from a profile dump as CSV
    Roster(RosterArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Recommend(args) => run_recommend(args),
        Command::Roster(args) => run_roster_export(args),
    }
}
