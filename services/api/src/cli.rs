use crate::runner::{run_diagnose, run_interactive, DiagnoseArgs, RunArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use unstuck::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "unstuck",
    about = "Find out what keeps you stuck and get a short action plan",
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
    /// Walk through the questionnaire interactively in the terminal
    Run(RunArgs),
    /// Score a scripted set of answers and print the report
    Diagnose(DiagnoseArgs),
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
        Command::Run(args) => run_interactive(args),
        Command::Diagnose(args) => run_diagnose(args),
    }
}
