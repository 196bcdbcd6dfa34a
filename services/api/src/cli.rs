use crate::demo::{run_demo, run_score_report, DemoArgs, ScoreReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fiado::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Fiado Ledger",
    about = "Run the peer-debt ledger service and generate score reports from the command line",
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
    /// Score reporting backed by the one score engine
    Score {
        #[command(subcommand)]
        command: ScoreCommand,
    },
    /// Run an end-to-end CLI demo covering the debt lifecycle and scoring
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ScoreCommand {
    /// Replay a member's history from a JSON ledger snapshot and print the
    /// score breakdown
    Report(ScoreReportArgs),
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
        Command::Score {
            command: ScoreCommand::Report(args),
        } => run_score_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
