// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A composite error type for errors that can occur while interacting with Twitter.
//!
//! Any action that crosses the network to call Twitter has many places where it can go wrong.
//! Whether it's a bad network connection, a revoked authorization token, a deleted tweet, or
//! anything in between, those errors are all represented in the (rather sprawling) [`Error`]
//! enum. Any errors direct from Twitter are represented as an [`ApiError`], which carries the
//! HTTP status and whatever error payload Twitter sent back. Everything else is one of the other
//! variants.
//!
//! [`Error`]: enum.Error.html
//! [`ApiError`]: struct.ApiError.html

use std::fmt;

use hyper::StatusCode;
use serde::Deserialize;

use crate::common::RateLimit;

/// Convenient alias to a Result containing a local Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type handed back by an `HttpSend` implementation.
///
/// Errors from the underlying HTTP transport are passed through unchanged, so this is boxed to
/// allow any transport to plug in its own error type.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Represents a collection of errors returned from a Twitter API call.
///
/// This is returned as part of [`ApiErrorBody::Multiple`][] whenever Twitter has rejected a call.
///
/// [`ApiErrorBody::Multiple`]: enum.ApiErrorBody.html
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TwitterErrors {
    /// A collection of errors.
    pub errors: Vec<TwitterErrorCode>,
}

impl fmt::Display for TwitterErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for e in &self.errors {
            if first {
                first = false;
            } else {
                writeln!(f, ",")?;
            }

            write!(f, "{}", e)?;
        }

        Ok(())
    }
}

impl std::error::Error for TwitterErrors {}

/// Represents a specific error returned from a Twitter API call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TwitterErrorCode {
    /// The error message returned by Twitter.
    #[serde(default)]
    pub message: String,
    /// The numeric error code returned by Twitter. A list of possible error codes can be found in
    /// the [API documentation][error-codes].
    ///
    /// [error-codes]: https://developer.twitter.com/en/docs/basics/response-codes
    #[serde(default)]
    pub code: i32,
}

impl fmt::Display for TwitterErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}: {}", self.code, self.message)
    }
}

/// The payload of an unsuccessful response, in the first shape that could be read out of it.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiErrorBody {
    /// `{"error": "...", "request": "..."}`
    Single {
        /// The error message.
        error: String,
        /// The request path Twitter reported back.
        request: String,
    },
    /// `{"errors": "..."}`, or the v1.1 form with a list of coded errors.
    Multiple(TwitterErrors),
    /// Neither structured shape matched. This holds a dump of the status line, headers, and body
    /// of the response.
    Raw(String),
}

/// A non-2xx response from Twitter.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// The HTTP status of the response.
    pub status: StatusCode,
    /// Rate-limit information that accompanied the response, if any.
    pub rate_limit: RateLimit,
    /// The error payload.
    pub body: ApiErrorBody,
}

impl ApiError {
    /// Returns the human-readable message for this error.
    ///
    /// For the structured shapes this is the message Twitter sent. For `Raw` it reads `A <status>
    /// code was returned. Full body response:` followed by the response dump.
    pub fn message(&self) -> String {
        match self.body {
            ApiErrorBody::Single { ref error, .. } => error.clone(),
            ApiErrorBody::Multiple(ref errs) => errs.to_string(),
            ApiErrorBody::Raw(ref dump) => format!(
                "A {} code was returned. Full body response:\n{}",
                self.status.as_u16(),
                dump
            ),
        }
    }

    /// Returns whether Twitter rejected the call with the "Rate limit exceeded" code (88).
    pub fn is_rate_limited(&self) -> bool {
        match self.body {
            ApiErrorBody::Multiple(ref errs) => errs.errors.iter().any(|e| e.code == 88),
            _ => self.status == StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

/// A set of errors that can occur when interacting with Twitter.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The client was asked to send a request without any credentials to authorize it with. This
    /// is raised before any network traffic happens.
    #[error("Configuration error: {0}")]
    Config(&'static str),
    /// A parameter given to a call was not acceptable, such as an HTTP method other than `GET` or
    /// `POST`. No network call was attempted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// The underlying HTTP transport failed. The contained error is the one the transport
    /// returned, unmodified.
    #[error("Network error: {0}")]
    Net(#[source] TransportError),
    /// Twitter responded with a non-2xx status code.
    #[error("Error status received: {0}")]
    Api(#[from] ApiError),
    /// The response body was not valid JSON at all. Individual fields whose type didn't match the
    /// destination are tolerated and do not raise this error.
    #[error("Error decoding JSON: {0}")]
    Decode(#[from] serde_json::Error),
    /// A step of the OAuth handshake was rejected, or a request could not be signed.
    #[error("OAuth error: {0}")]
    OAuth(String),
}

impl Error {
    /// Returns the `ApiError` contained in this error, if it came from a non-2xx response.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_message_mentions_status() {
        let err = ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            rate_limit: RateLimit::default(),
            body: ApiErrorBody::Raw("HTTP/1.1 500 Internal Server Error\r\n\r\noops".to_string()),
        };

        let msg = err.message();
        assert!(msg.starts_with("A 500 code was returned."));
        assert!(msg.ends_with("oops"));
    }

    #[test]
    fn rate_limit_code() {
        let err = ApiError {
            status: StatusCode::BAD_REQUEST,
            rate_limit: RateLimit::default(),
            body: ApiErrorBody::Multiple(TwitterErrors {
                errors: vec![TwitterErrorCode {
                    message: "Rate limit exceeded".to_string(),
                    code: 88,
                }],
            }),
        };

        assert!(err.is_rate_limited());
        assert_eq!(err.to_string(), "#88: Rate limit exceeded");
    }
}
