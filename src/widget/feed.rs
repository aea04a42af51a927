//! Fetching and decoding a published feed.

use reqwest::{StatusCode, blocking::Client};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Wrapper key of the object-shaped response.
const STUDENTS_KEY: &str = "students";

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request to `{url}` failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("network response was not ok, status {0}")]
    Status(u16),

    #[error("feed is not valid JSON")]
    Json(#[from] serde_json::Error),

    #[error("feed must be an array of students or an object with a `students` array")]
    Shape,
}

/// GET the feed body. Anything but `200 OK` is a failure.
///
/// One attempt, no timeout.
pub fn fetch_feed(url: &str) -> Result<String, FeedError> {
    let http_error = |source| FeedError::Http {
        url: url.to_owned(),
        source,
    };

    let client = Client::builder().timeout(None::<Duration>).build().map_err(http_error)?;
    let response = client.get(url).send().map_err(http_error)?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(FeedError::Status(status.as_u16()));
    }

    response.text().map_err(http_error)
}

/// Decode a feed body into its raw entries.
///
/// Accepts a bare array or `{"students": [...]}`. Entries are not validated here.
pub fn parse_feed(body: &str) -> Result<Vec<Value>, FeedError> {
    match serde_json::from_str(body)? {
        Value::Array(entries) => Ok(entries),
        Value::Object(mut object) => match object.remove(STUDENTS_KEY) {
            Some(Value::Array(entries)) => Ok(entries),
            _ => Err(FeedError::Shape),
        },
        _ => Err(FeedError::Shape),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_array() {
        let entries = parse_feed(r#"[{"studentName":"Alice","slug":"alice"}]"#).unwrap();
        assert_eq!(entries, vec![json!({"studentName": "Alice", "slug": "alice"})]);
    }

    #[test]
    fn test_students_wrapper() {
        let entries = parse_feed(r#"{"students":[{"studentName":"Bob"}],"generated":"today"}"#)
            .unwrap();
        assert_eq!(entries, vec![json!({"studentName": "Bob"})]);
    }

    #[test]
    fn test_empty_shapes() {
        assert!(parse_feed("[]").unwrap().is_empty());
        assert!(parse_feed(r#"{"students":[]}"#).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_feed("<html>"), Err(FeedError::Json(_))));
        assert!(matches!(parse_feed(""), Err(FeedError::Json(_))));
    }

    #[test]
    fn test_wrong_shape() {
        assert!(matches!(parse_feed(r#"{"people":[]}"#), Err(FeedError::Shape)));
        assert!(matches!(parse_feed(r#"{"students":{}}"#), Err(FeedError::Shape)));
        assert!(matches!(parse_feed("42"), Err(FeedError::Shape)));
        assert!(matches!(parse_feed("null"), Err(FeedError::Shape)));
    }

    #[test]
    fn test_status_error_message() {
        assert_eq!(
            FeedError::Status(404).to_string(),
            "network response was not ok, status 404"
        );
    }
}
