//! Opening the works feed.
//!
//! A feed location is either an `http://`/`https://` URL, fetched once with a
//! blocking `reqwest` client, or a local file (`file://` URL or plain path).
//! Either way the caller gets a buffered reader that streams the body; the
//! body is never read into memory up front and never retried.

use crate::config::HttpConfig;
use reqwest::blocking::Client;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("cannot open feed {location}: {reason}")]
    Unavailable { location: String, reason: String },
}

impl SourceError {
    fn unavailable(location: &str, reason: impl ToString) -> Self {
        Self::Unavailable {
            location: location.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Where the feed is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedLocation {
    Http(String),
    File(PathBuf),
}

impl FeedLocation {
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Http(location.to_string())
        } else if let Some(path) = location.strip_prefix("file://") {
            Self::File(PathBuf::from(path))
        } else {
            Self::File(PathBuf::from(location))
        }
    }
}

/// Build the HTTP client from config.
pub fn create_client(http: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(http.timeout_secs))
        .user_agent(http.user_agent.clone())
        .build()
}

/// Open the feed for streaming.
///
/// Non-success HTTP statuses and missing files are reported as
/// [`SourceError::Unavailable`] before any parsing starts.
pub fn open_feed(location: &str, http: &HttpConfig) -> Result<Box<dyn BufRead>, SourceError> {
    match FeedLocation::parse(location) {
        FeedLocation::Http(url) => {
            let client = create_client(http).map_err(|e| SourceError::unavailable(location, e))?;
            tracing::info!(url = %url, "fetching feed");
            let response = client
                .get(&url)
                .send()
                .and_then(|r| r.error_for_status())
                .map_err(|e| SourceError::unavailable(location, e))?;
            Ok(Box::new(BufReader::new(response)))
        }
        FeedLocation::File(path) => {
            tracing::info!(path = %path.display(), "reading feed");
            let file = File::open(&path).map_err(|e| SourceError::unavailable(location, e))?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}
