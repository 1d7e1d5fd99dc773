use std::{fmt, path::PathBuf};

use crate::{
    location::{FixedLocation, IpLocation, LocationSource, NoLocation, DEFAULT_GEOLOCATION_URL},
    lookup::DEFAULT_ENDPOINT,
    types::{Coordinate, DEFAULT_LAT, DEFAULT_LNG},
};

const DEFAULT_ZOOM: f64 = 15.0;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidNumber { key: &'static str, value: String },
    InvalidLocation(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{} must be a number, got '{}'", key, value)
            }
            ConfigError::InvalidLocation(value) => {
                write!(f, "Expected 'off', 'fixed:<lat>,<lng>' or a URL, got '{}'", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// How the initial position is obtained.
#[derive(Debug, Clone, PartialEq)]
pub enum Geolocation {
    Off,
    Fixed(Coordinate),
    Ip(String),
}

impl Geolocation {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("off") {
            return Ok(Geolocation::Off);
        }
        if let Some(pair) = value.strip_prefix("fixed:") {
            let mut parts = pair.split(',').map(|part| part.trim().parse::<f64>());
            return match (parts.next(), parts.next(), parts.next()) {
                (Some(Ok(lat)), Some(Ok(lng)), None) => Ok(Geolocation::Fixed(Coordinate::new(lat, lng))),
                _ => Err(ConfigError::InvalidLocation(value.to_string())),
            };
        }
        if value.starts_with("http://") || value.starts_with("https://") {
            return Ok(Geolocation::Ip(value.to_string()));
        }
        Err(ConfigError::InvalidLocation(value.to_string()))
    }

    pub fn source(&self) -> Box<dyn LocationSource> {
        match self {
            Geolocation::Off => Box::new(NoLocation),
            Geolocation::Fixed(coordinate) => Box::new(FixedLocation(*coordinate)),
            Geolocation::Ip(url) => Box::new(IpLocation::new(url.clone())),
        }
    }
}

/// Application settings. Every value can be overridden through environment
/// variables prefixed with `TOILET_MAP_`.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub endpoint: String,
    pub default_center: Coordinate,
    pub zoom: f64,
    pub geolocation: Geolocation,
    pub log_dir: Option<PathBuf>,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            default_center: Coordinate::new(DEFAULT_LAT, DEFAULT_LNG),
            zoom: DEFAULT_ZOOM,
            geolocation: Geolocation::Ip(DEFAULT_GEOLOCATION_URL.to_string()),
            log_dir: None,
            verbose: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config reading variables through `var`.
    pub fn from_lookup<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(endpoint) = var("TOILET_MAP_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Some(lat) = number(&var, "TOILET_MAP_LAT")? {
            config.default_center.lat = lat;
        }
        if let Some(lng) = number(&var, "TOILET_MAP_LNG")? {
            config.default_center.lng = lng;
        }
        if let Some(zoom) = number(&var, "TOILET_MAP_ZOOM")? {
            config.zoom = zoom;
        }
        if let Some(geolocation) = var("TOILET_MAP_GEOLOCATION") {
            config.geolocation = Geolocation::parse(&geolocation)?;
        }
        config.log_dir = var("TOILET_MAP_LOG_DIR").map(PathBuf::from);
        if let Some(verbose) = var("TOILET_MAP_VERBOSE") {
            config.verbose = verbose.trim() != "0";
        }

        Ok(config)
    }

    /// Applies command-line arguments: `[endpoint]`.
    pub fn with_args(mut self, args: &[String]) -> Self {
        if let Some(endpoint) = args.get(1) {
            self.endpoint = endpoint.clone();
        }
        self
    }
}

fn number<F>(var: &F, key: &'static str) -> Result<Option<f64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
    }
}
