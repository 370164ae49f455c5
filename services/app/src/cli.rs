use crate::journey::{run_journey, JourneyArgs};
use crate::report::{run_logout, run_questions, run_score, QuestionsArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use ekoliv::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Ekoliv",
    about = "Score eco habits, walk the onboarding journey and serve the Ekoliv API",
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
    /// Print the eco score and results summary for a JSON answers file
    Score(ScoreArgs),
    /// List the onboarding questions and their answer options
    Questions(QuestionsArgs),
    /// Walk through onboarding, sign-up and the dashboard in the terminal
    Journey(JourneyArgs),
    /// Forget the stored identity, welcome flag and access token
    Logout,
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
        Command::Score(args) => run_score(args),
        Command::Questions(args) => run_questions(args),
        Command::Journey(args) => run_journey(args).await,
        Command::Logout => run_logout(),
    }
}
