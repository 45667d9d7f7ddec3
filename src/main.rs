use std::process::ExitCode;

fn main() -> ExitCode {
    match house_price_estimator::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let message = err.to_string();
            if !message.is_empty() {
                eprintln!("{message}");
            }
            ExitCode::from(err.exit_code())
        }
    }
}
