use colored::Colorize;
use std::process::ExitCode;

fn main() -> ExitCode {
    match txtql::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
