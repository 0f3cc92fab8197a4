// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Infrastructure types related to packaging rate-limit information alongside responses from
//! Twitter, and the functions that sort successful responses from errors.

use std::fmt::Write;

use hyper::body::Bytes;
use hyper::{Body, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::error::{self, ApiError, ApiErrorBody, Error, TwitterErrorCode, TwitterErrors};

use super::{FieldMismatch, Headers};

const X_RATE_LIMIT_LIMIT: &str = "x-rate-limit-limit";
const X_RATE_LIMIT_REMAINING: &str = "x-rate-limit-remaining";
const X_RATE_LIMIT_RESET: &str = "x-rate-limit-reset";

/// Rate-limit information returned with a call.
///
/// Fields are set to `-1` when Twitter did not send the corresponding header. The same shape is
/// used for each entry of `service::RateLimitStatus`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RateLimit {
    /// The rate limit ceiling for the given request.
    pub limit: i32,
    /// The number of requests left for the 15-minute window.
    pub remaining: i32,
    /// The UTC Unix timestamp at which the rate window resets.
    pub reset: i32,
}

impl Default for RateLimit {
    fn default() -> Self {
        RateLimit {
            limit: -1,
            remaining: -1,
            reset: -1,
        }
    }
}

impl From<&Headers> for RateLimit {
    fn from(headers: &Headers) -> RateLimit {
        fn header(headers: &Headers, name: &str) -> i32 {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(-1)
        }

        RateLimit {
            limit: header(headers, X_RATE_LIMIT_LIMIT),
            remaining: header(headers, X_RATE_LIMIT_REMAINING),
            reset: header(headers, X_RATE_LIMIT_RESET),
        }
    }
}

/// A helper struct to wrap response data with accompanying rate limit information.
///
/// This dereferences to the decoded value, so fields of the response can be read directly off of
/// it.
#[derive(Debug, Clone, derive_more::Deref, derive_more::DerefMut)]
pub struct Response<T> {
    /// Rate-limit information that accompanied the response.
    pub rate_limit_status: RateLimit,
    /// Fields that were skipped while decoding the response because their JSON type didn't match
    /// the type they were decoded into. Empty when the whole response lined up.
    pub mismatches: Vec<FieldMismatch>,
    /// The decoded response from the request.
    #[deref]
    #[deref_mut]
    pub response: T,
}

impl<T> Response<T> {
    /// Creates a `Response` with the given rate-limit information and response value.
    pub fn new(rate_limit_status: RateLimit, response: T) -> Response<T> {
        Response {
            rate_limit_status,
            mismatches: Vec::new(),
            response,
        }
    }

    /// Convert a `Response<T>` to a `Response<U>` by running its contained response through the
    /// given function. This preserves its rate-limit information.
    pub fn map<F, U>(src: Response<T>, fun: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        Response {
            rate_limit_status: src.rate_limit_status,
            mismatches: src.mismatches,
            response: fun(src.response),
        }
    }

    /// Attempt to convert a `Response<T>` into a `Response<U>` by running its contained response
    /// through the given function, preserving its rate-limit information. If the conversion
    /// function fails, an error is returned instead.
    pub fn try_map<F, U, E>(src: Response<T>, fun: F) -> Result<Response<U>, E>
    where
        F: FnOnce(T) -> Result<U, E>,
    {
        Ok(Response {
            rate_limit_status: src.rate_limit_status,
            mismatches: src.mismatches,
            response: fun(src.response)?,
        })
    }

    /// Returns whether every field of the response decoded without a type mismatch.
    pub fn is_complete(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Iterator returned by calling `.into_iter()` on a `Response<Vec<T>>`.
///
/// Every item carries a copy of the rate-limit information from the original response. Field
/// mismatches are not copied, since they can't be attributed to a single item.
pub struct ResponseIter<T> {
    rate_limit_status: RateLimit,
    resp_iter: std::vec::IntoIter<T>,
}

impl<T> Iterator for ResponseIter<T> {
    type Item = Response<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let rate_limit_status = self.rate_limit_status;
        self.resp_iter
            .next()
            .map(|resp| Response::new(rate_limit_status, resp))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.resp_iter.size_hint()
    }
}

impl<T> DoubleEndedIterator for ResponseIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let rate_limit_status = self.rate_limit_status;
        self.resp_iter
            .next_back()
            .map(|resp| Response::new(rate_limit_status, resp))
    }
}

impl<T> ExactSizeIterator for ResponseIter<T> {
    fn len(&self) -> usize {
        self.resp_iter.len()
    }
}

impl<T> IntoIterator for Response<Vec<T>> {
    type Item = Response<T>;
    type IntoIter = ResponseIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        ResponseIter {
            rate_limit_status: self.rate_limit_status,
            resp_iter: self.response.into_iter(),
        }
    }
}

/// Reads the complete body out of the given response.
///
/// Errors while reading are transport errors, and are passed through as `Error::Net`.
pub async fn read_body(
    resp: hyper::Response<Body>,
) -> error::Result<(StatusCode, Headers, Bytes)> {
    let (parts, body) = resp.into_parts();
    let body = hyper::body::to_bytes(body)
        .await
        .map_err(|e| Error::Net(Box::new(e)))?;
    Ok((parts.status, parts.headers, body))
}

#[derive(Deserialize)]
struct SingleError {
    error: String,
    #[serde(default)]
    request: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorList {
    Text(String),
    Coded(Vec<TwitterErrorCode>),
}

#[derive(Deserialize)]
struct MultipleErrors {
    errors: ErrorList,
}

/// Sorts a response into success or failure.
///
/// Any 2xx status is a success, and the body is handed back untouched. Otherwise, the body is
/// checked against the error shapes Twitter uses, in order: a single `{"error", "request"}`
/// object, then an `{"errors"}` object. The first one that reads cleanly becomes the error. If
/// neither matches, the error carries a dump of the status, headers, and body instead.
pub fn classify_response(status: StatusCode, headers: &Headers, body: Bytes) -> error::Result<Bytes> {
    if status.is_success() {
        return Ok(body);
    }

    let err = ApiError {
        status,
        rate_limit: RateLimit::from(headers),
        body: error_body(status, headers, &body),
    };
    debug!(status = status.as_u16(), message = %err.message(), "API call returned an error");

    Err(Error::Api(err))
}

fn error_body(status: StatusCode, headers: &Headers, body: &[u8]) -> ApiErrorBody {
    if let Ok(single) = serde_json::from_slice::<SingleError>(body) {
        if !single.error.is_empty() {
            return ApiErrorBody::Single {
                error: single.error,
                request: single.request,
            };
        }
    }

    if let Ok(multiple) = serde_json::from_slice::<MultipleErrors>(body) {
        match multiple.errors {
            ErrorList::Text(text) if !text.is_empty() => {
                return ApiErrorBody::Multiple(TwitterErrors {
                    errors: vec![TwitterErrorCode {
                        message: text,
                        code: 0,
                    }],
                });
            }
            ErrorList::Coded(errors) if !errors.is_empty() => {
                return ApiErrorBody::Multiple(TwitterErrors { errors });
            }
            _ => (),
        }
    }

    ApiErrorBody::Raw(dump_response(status, headers, body))
}

/// Renders the response the way it came across the wire: status line, headers, then body.
fn dump_response(status: StatusCode, headers: &Headers, body: &[u8]) -> String {
    let mut dump = String::new();
    let _ = write!(
        dump,
        "HTTP/1.1 {} {}\r\n",
        status.as_u16(),
        status.canonical_reason().unwrap_or("")
    );
    for (name, value) in headers {
        let _ = write!(
            dump,
            "{}: {}\r\n",
            name,
            String::from_utf8_lossy(value.as_bytes())
        );
    }
    dump.push_str("\r\n");
    dump.push_str(&String::from_utf8_lossy(body));
    dump
}
