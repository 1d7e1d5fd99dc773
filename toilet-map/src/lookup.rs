use std::fmt;

use reqwest::{blocking::Client, header::CONTENT_TYPE};

use crate::{trigger::ToiletQuery, types::ToiletRecord};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000";

/// Errors returned by a [`ToiletLookup`].
#[derive(Debug)]
pub enum LookupError {
    /// The request could not be sent or the body could not be read.
    Transport(reqwest::Error),
    /// The service answered with a non-success status code.
    Status(u16),
    /// The body is not a JSON array of toilet records.
    Decode(serde_json::Error),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Transport(e) => write!(f, "Transport Error: {}", e),
            LookupError::Status(code) => write!(f, "Lookup service answered with status {}", code),
            LookupError::Decode(e) => write!(f, "Malformed lookup response: {}", e),
        }
    }
}

impl std::error::Error for LookupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LookupError::Transport(e) => Some(e),
            LookupError::Status(_) => None,
            LookupError::Decode(e) => Some(e),
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(error: reqwest::Error) -> Self {
        LookupError::Transport(error)
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(error: serde_json::Error) -> Self {
        LookupError::Decode(error)
    }
}

/// A source of toilet records around a point.
///
/// Lookups run on worker threads, hence the `Send + Sync` bound.
pub trait ToiletLookup: Send + Sync {
    fn find(&self, query: &ToiletQuery) -> Result<Vec<ToiletRecord>, LookupError>;
}

/// Queries the toilet service over HTTP.
pub struct HttpLookup {
    client: Client,
    endpoint: String,
}

impl HttpLookup {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for HttpLookup {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl ToiletLookup for HttpLookup {
    fn find(&self, query: &ToiletQuery) -> Result<Vec<ToiletRecord>, LookupError> {
        let response = self
            .client
            .get(query.url(&self.endpoint))
            .header(CONTENT_TYPE, "application/json")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response.bytes()?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn status_error_has_no_source() {
        let error = LookupError::Status(503);
        assert_eq!(error.to_string(), "Lookup service answered with status 503");
        assert!(error.source().is_none());
    }

    #[test]
    fn decode_error_converts_and_chains() {
        let json_error = serde_json::from_str::<Vec<ToiletRecord>>("{").unwrap_err();
        let error: LookupError = json_error.into();
        assert!(matches!(error, LookupError::Decode(_)));
        assert!(error.source().is_some());
    }

    #[test]
    fn default_lookup_targets_local_service() {
        assert_eq!(HttpLookup::default().endpoint(), "http://localhost:5000");
    }
}
