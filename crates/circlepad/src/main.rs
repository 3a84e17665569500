mod cli;
mod diagnostics;
mod run;

use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::parse();
    match run::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("circlepad: {err:#}");
            ExitCode::from(run::exit_status(&err))
        }
    }
}
