//! Grafar CLI — functional graph database.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "grafar",
    version,
    about = "Functional graph database — dual-graph provenance for versioned functional assignments"
)]
struct Cli {
    #[command(subcommand)]
    command: grafar::cli::Commands,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = grafar::cli::dispatch(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
