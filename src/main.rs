use std::process::ExitCode;

use clap::Parser;
use log::error;

use json_action::Args;

pub fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match args.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
