//! pixtext CLI - render a line of text to an image file
//!
//! Exit status is 0 on success, 1 for bad arguments, and 2 when the library
//! fails to open the font or render.

mod cli;
mod render;

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and are not failures
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match render::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("pixtext: {}", e);
            if let Some(message) = pixtext::last_error() {
                log::debug!("last error: {}", message);
            }
            ExitCode::from(2)
        }
    }
}
