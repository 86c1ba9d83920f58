mod cli;

use clap::Parser;
use digaws::Client;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::Args::parse();

    match cli::log::init(args.debug).and_then(|_| cli::run(&args, &Client::new())) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("ERROR: {error}");
            ExitCode::FAILURE
        }
    }
}
