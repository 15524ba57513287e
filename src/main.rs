//! Binary entrypoint for the `cmdrelay` CLI.

use std::process::ExitCode;

use cmdrelay::CliError;

fn main() -> ExitCode {
    if let Err(err) = cmdrelay::logging::init() {
        eprintln!("warning: logging disabled: {err}");
    }

    // Recording is handled in commands::dispatch via CMDRELAY_RECORD=<file>.
    match cmdrelay::run(std::env::args_os()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Usage(err)) => {
            let _ = err.print();
            ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(2))
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
