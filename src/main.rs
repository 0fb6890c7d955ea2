mod cli;
mod logging;

use std::process::ExitCode;

use colored::Colorize;

fn main() -> ExitCode {
    let command_line_interface = cli::CommandLineInterface::load();
    if let Err(error) = logging::init(command_line_interface.verbose) {
        eprintln!("failed to initialize logging: {error}");
    }
    match command_line_interface.run() {
        Ok(code) => code,
        Err(error) => {
            tracing::error!(error = %format!("{error:#}"), "schema-mdgen failed");
            eprintln!("{} {error:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
