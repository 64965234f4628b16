//! Loading raw agenda documents from disk or over HTTP.

use std::path::PathBuf;

use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{ConfcalError, ConfcalResult};

/// Where a JSON document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Url(String),
}

impl Source {
    /// `http://` and `https://` locations are URLs, anything else a file path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Source::Url(location.to_string())
        } else {
            Source::File(PathBuf::from(location))
        }
    }

    /// Load and parse the document. A single attempt; no retries.
    pub async fn load(&self) -> ConfcalResult<Value> {
        match self {
            Source::File(path) => {
                info!(path = %path.display(), "reading agenda document");
                let content = tokio::fs::read_to_string(path).await?;
                parse_document(&content)
            }
            Source::Url(url) => fetch(url).await,
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Parse a JSON document into an untyped value tree.
pub fn parse_document(content: &str) -> ConfcalResult<Value> {
    Ok(serde_json::from_str(content)?)
}

async fn fetch(url: &str) -> ConfcalResult<Value> {
    info!(%url, "fetching agenda document");

    let client = reqwest::Client::new();
    let resp = client
        .get(url)
        .header(ACCEPT, "application/json")
        .send()
        .await?;

    let status = resp.status();
    let body = resp.text().await?;
    debug!(status = status.as_u16(), bytes = body.len(), "agenda response received");

    if status != reqwest::StatusCode::OK {
        return Err(ConfcalError::Fetch {
            status: status.as_u16(),
            body,
        });
    }

    parse_document(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location() {
        assert_eq!(
            Source::parse("https://example.org/agenda"),
            Source::Url("https://example.org/agenda".to_string())
        );
        assert_eq!(
            Source::parse("http://localhost:8080/a.json"),
            Source::Url("http://localhost:8080/a.json".to_string())
        );
        assert_eq!(
            Source::parse("data/event.json"),
            Source::File(PathBuf::from("data/event.json"))
        );
    }

    #[test]
    fn test_display_shows_location() {
        assert_eq!(
            Source::parse("https://example.org/agenda").to_string(),
            "https://example.org/agenda"
        );
        assert_eq!(Source::parse("data/event.json").to_string(), "data/event.json");
    }

    #[test]
    fn test_parse_document_rejects_malformed_json() {
        let result = parse_document("{ \"agenda\": ");
        assert!(matches!(result, Err(ConfcalError::Parse(_))));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = Source::File(PathBuf::from("/nonexistent/confcal/event.json"));
        let result = source.load().await;
        assert!(matches!(result, Err(ConfcalError::Io(_))));
    }
}
