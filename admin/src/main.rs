use std::process::ExitCode;

use dotenv::dotenv;
use student_admin::{AdminConfig, AdminError, Command, Session, UreqTransport};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    dotenv().ok();
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{err}");
            eprintln!("{err}");
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<bool, AdminError> {
    let config = AdminConfig::load()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| AdminError::Logging(e.to_string()))?;
    debug!(base_url = %config.base_url, page_limit = config.page_limit, "configuration loaded");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;
    let report = Session::new(&config, UreqTransport::new()).run(command);
    print!("{}", report.text);
    Ok(!report.failed)
}
