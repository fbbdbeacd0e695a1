use crate::board::{run_list, run_review, ListArgs, ReviewArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hire_desk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Hire Desk",
    about = "Review pending candidate screenings from the terminal or over HTTP",
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
    /// Inspect the pending-screenings queue
    Screenings {
        #[command(subcommand)]
        command: ScreeningsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ScreeningsCommand {
    /// Print counters and one line per pending screening
    List(ListArgs),
    /// Open the review page (and résumé, when present) for one application
    Review(ReviewArgs),
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
        Command::Screenings {
            command: ScreeningsCommand::List(args),
        } => run_list(args).await,
        Command::Screenings {
            command: ScreeningsCommand::Review(args),
        } => run_review(args).await,
    }
}
