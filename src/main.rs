//! goanalyze CLI entry point.

use clap::Parser;
use goanalyze::cli::{self, Cli, Commands, EXIT_ERROR};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::File(args) => cli::run_file(&args),
        Commands::Project(args) => cli::run_project(&args),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
