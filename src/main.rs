use std::process::ExitCode;

use clap::Parser;

use taskman::cli::commands::Cli;
use taskman::cli::handlers;
use taskman::tui;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result: Result<(), String> = if cli.command.is_some() {
        handlers::dispatch(cli).map_err(|e| e.to_string())
    } else {
        tui::run().map_err(|e| e.to_string())
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}
