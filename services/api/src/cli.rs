use crate::demo::{run_analyze, run_demo, AnalyzeArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use underwrite_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "underwrite-ai-api",
    about = "Run the quote and derogation advisory service or exercise it from the command line",
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
    /// Walk a sample auto quote and a vehicle-sale derogation case
    Demo(DemoArgs),
    /// Analyze a derogation case read from a JSON file
    Analyze(AnalyzeArgs),
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
        Command::Demo(args) => run_demo(args),
        Command::Analyze(args) => run_analyze(args),
    }
}
