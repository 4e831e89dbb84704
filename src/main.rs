//! rtm2sing - Remember The Milk to Singularity CSV converter

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = rtm2sing::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
