use crate::demo::{run_catalog, run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use elo_nr01::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Elo NR-01",
    about = "Run the psychosocial risk diagnostic service or explore it from the command line",
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
    /// Print the HSE-IT questionnaire grouped by dimension
    Catalog,
    /// Seed synthetic responses and print the resulting diagnostic
    Demo(DemoArgs),
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
        Command::Catalog => {
            run_catalog();
            Ok(())
        }
        Command::Demo(args) => run_demo(args),
    }
}
