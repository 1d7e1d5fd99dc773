use std::{
    fmt,
    sync::mpsc::{self, Receiver},
    thread,
    time::Duration,
};

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::types::Coordinate;

pub const DEFAULT_GEOLOCATION_URL: &str = "http://ip-api.com/json";
const GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Why the device position could not be determined.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationError {
    PermissionDenied,
    Unavailable(String),
    Timeout,
    Unsupported,
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationError::PermissionDenied => write!(f, "Permission to read the location was denied"),
            LocationError::Unavailable(reason) => write!(f, "Position unavailable: {}", reason),
            LocationError::Timeout => write!(f, "Location request timed out"),
            LocationError::Unsupported => write!(f, "Geolocation is not supported"),
        }
    }
}

impl std::error::Error for LocationError {}

impl From<reqwest::Error> for LocationError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            LocationError::Timeout
        } else if error.status().map(|s| s.as_u16()) == Some(403) {
            LocationError::PermissionDenied
        } else {
            LocationError::Unavailable(error.to_string())
        }
    }
}

/// Something that can tell where the user is, once.
pub trait LocationSource: Send + 'static {
    fn locate(&self) -> Result<Coordinate, LocationError>;
}

#[derive(Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    message: Option<String>,
}

/// Approximates the position from the public IP address.
pub struct IpLocation {
    url: String,
}

impl IpLocation {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Default for IpLocation {
    fn default() -> Self {
        Self::new(DEFAULT_GEOLOCATION_URL)
    }
}

impl LocationSource for IpLocation {
    fn locate(&self) -> Result<Coordinate, LocationError> {
        let client = Client::builder().timeout(GEOLOCATION_TIMEOUT).build()?;
        let body: IpApiResponse = client.get(&self.url).send()?.error_for_status()?.json()?;
        parse_ip_api(body)
    }
}

fn parse_ip_api(body: IpApiResponse) -> Result<Coordinate, LocationError> {
    if body.status != "success" {
        return Err(LocationError::Unavailable(
            body.message.unwrap_or(body.status),
        ));
    }
    match (body.lat, body.lon) {
        (Some(lat), Some(lng)) => Ok(Coordinate::new(lat, lng)),
        _ => Err(LocationError::Unavailable("response without coordinates".into())),
    }
}

/// Always reports the same position.
pub struct FixedLocation(pub Coordinate);

impl LocationSource for FixedLocation {
    fn locate(&self) -> Result<Coordinate, LocationError> {
        Ok(self.0)
    }
}

/// Geolocation turned off.
pub struct NoLocation;

impl LocationSource for NoLocation {
    fn locate(&self) -> Result<Coordinate, LocationError> {
        Err(LocationError::Unsupported)
    }
}

/// Runs `source` once on a worker thread. The receiver yields exactly one
/// result; if the thread cannot be started it yields `Unavailable` instead.
pub fn locate_once(source: Box<dyn LocationSource>) -> Receiver<Result<Coordinate, LocationError>> {
    let (sender, receiver) = mpsc::channel();
    let fallback = sender.clone();

    let spawned = thread::Builder::new()
        .name("geolocation".into())
        .spawn(move || {
            let _ = sender.send(source.locate());
        });

    if let Err(e) = spawned {
        let _ = fallback.send(Err(LocationError::Unavailable(e.to_string())));
    }

    receiver
}
