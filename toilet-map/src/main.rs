use std::env;

use toilet_map::{config::Config, logger_for, run, AppError};

/// Opens the toilet map.
///
/// # Usage
///
/// ```sh
/// cargo run -p toilet-map -- [endpoint]
/// ```
///
/// The endpoint defaults to `http://localhost:5000`; see `Config` for the
/// `TOILET_MAP_*` environment variables.
fn main() -> Result<(), AppError> {
    let args: Vec<String> = env::args().collect();
    let config = Config::from_env()?.with_args(&args);
    let logger = logger_for(&config)?;

    run(config, logger)
}
