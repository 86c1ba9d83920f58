use std::path::PathBuf;
use thiserror::Error;

/*-------------------------------------------------------------------------------------------------
  Errors and Results
-------------------------------------------------------------------------------------------------*/

/// Errors raised while retrieving the AWS IP Ranges, building the prefix index, or parsing
/// lookup queries. Every variant is fatal to a `digaws` invocation.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure (DNS, connection, timeout, body read).
    #[error("Error retrieving {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The remote returned a status code other than 200 or 304.
    #[error("Unexpected response from {url}. Status code: {status}. Content: {body}")]
    UnexpectedResponse {
        url: String,
        status: u16,
        body: String,
    },

    /// The remote reported "not modified" but the cached copy is missing or unusable.
    #[error("Error reading cached ranges {}: {reason}", .path.display())]
    CacheRead { path: PathBuf, reason: String },

    #[error("Unable to create cache directory {}: {source}", .path.display())]
    CacheDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A freshly downloaded body is not a valid AWS IP Ranges document.
    #[error("Invalid AWS IP Ranges document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    /// A dataset entry carries a prefix that is not a valid network of its family.
    #[error("Malformed {field} in AWS IP Ranges: {prefix:?}: {reason}")]
    MalformedEntry {
        field: &'static str,
        prefix: String,
        reason: String,
    },

    /// A lookup query is neither an IP address nor a CIDR block.
    #[error("Wrong IP or CIDR format: {0}")]
    InvalidQuery(String),
}

// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/*--------------------------------------------------------------------------------------
  Log Error Function
--------------------------------------------------------------------------------------*/

#[cfg(test)]
pub(crate) fn log_error(error: &Error) {
    log::error!("{}", error);
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_response_message() {
        let error = Error::UnexpectedResponse {
            url: "https://ip-ranges.amazonaws.com/ip-ranges.json".to_string(),
            status: 301,
            body: "moved".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Unexpected response from https://ip-ranges.amazonaws.com/ip-ranges.json. \
             Status code: 301. Content: moved"
        );
    }

    #[test]
    fn test_cache_read_message() {
        let error = Error::CacheRead {
            path: PathBuf::from("/tmp/ip-ranges.json"),
            reason: "EOF while parsing a value at line 1 column 0".to_string(),
        };
        assert!(error
            .to_string()
            .starts_with("Error reading cached ranges /tmp/ip-ranges.json: "));
    }

    #[test]
    fn test_invalid_query_message() {
        let error = Error::InvalidQuery("not an address".to_string());
        assert_eq!(error.to_string(), "Wrong IP or CIDR format: not an address");
    }
}
