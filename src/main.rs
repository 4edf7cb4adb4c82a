use std::process::ExitCode;

fn main() -> ExitCode {
    match episode_finder::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
