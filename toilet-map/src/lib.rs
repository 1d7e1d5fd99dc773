use std::{fmt, sync::Arc};

use config::{Config, ConfigError};
use logger::{Logger, LoggerError};
use lookup::{HttpLookup, ToiletLookup};
use map::ToiletMapApp;

pub mod config;
pub mod feed;
pub mod location;
pub mod lookup;
mod map;
pub mod model;
mod plugins;
pub mod state;
pub mod trigger;
pub mod types;
mod widgets;
mod windows;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Logger(LoggerError),
    Ui(eframe::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "Configuration Error: {}", e),
            AppError::Logger(e) => write!(f, "Logger Error: {}", e),
            AppError::Ui(e) => write!(f, "UI Error: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        AppError::Config(error)
    }
}

impl From<LoggerError> for AppError {
    fn from(error: LoggerError) -> Self {
        AppError::Logger(error)
    }
}

impl From<eframe::Error> for AppError {
    fn from(error: eframe::Error) -> Self {
        AppError::Ui(error)
    }
}

/// Builds the logger described by `config`.
pub fn logger_for(config: &Config) -> Result<Logger, AppError> {
    match &config.log_dir {
        Some(dir) => Ok(Logger::new(dir, "toilet-map", config.verbose)?),
        None => Ok(Logger::console(config.verbose)),
    }
}

/// Opens the toilet map window and blocks until it is closed.
pub fn run(config: Config, logger: Logger) -> Result<(), AppError> {
    let lookup: Arc<dyn ToiletLookup> = Arc::new(HttpLookup::new(config.endpoint.clone()));

    eframe::run_native(
        "Toilet Map",
        Default::default(),
        Box::new(move |cc| {
            Ok(Box::new(ToiletMapApp::new(
                cc.egui_ctx.clone(),
                config,
                lookup,
                logger,
            )))
        }),
    )?;

    Ok(())
}
