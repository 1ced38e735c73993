use std::process::ExitCode;

fn main() -> ExitCode {
    match sostenuto::runtime::run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("sostenuto: {e}");
            ExitCode::from(2)
        }
    }
}
