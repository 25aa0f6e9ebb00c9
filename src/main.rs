use clap::Parser;
use secgate::{
    Cli, Commands,
    handlers::{handle_evaluate, handle_report},
    logging::init_logging,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.debug);

    match &cli.command {
        Commands::Evaluate(args) => handle_evaluate(args),
        Commands::Report(args) => handle_report(args),
    }
}
