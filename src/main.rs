use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Select events from a SLAD dataset and write the histograms.
    Run(cmd::run::RunArgs),
    /// Print the tables of a previously written results file.
    Report(cmd::report::ReportArgs),
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_tracing(cli.debug);

    let outcome = match cli.command {
        Commands::Run(args) => {
            let sub_matches = matches.subcommand_matches("run").unwrap_or(&matches);
            cmd::run::run(args, sub_matches)
        }
        Commands::Report(args) => cmd::report::run(args),
    };

    if let Err(e) = outcome {
        error!("❌ FATAL: {}", e);
        process::exit(1);
    }
}
