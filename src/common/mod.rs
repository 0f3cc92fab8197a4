// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Set of structs and methods that act as a sort of internal prelude.
//!
//! The elements available in this module and its children are fairly basic building blocks that
//! the other modules all glob-import to make available as a common language. A lot of
//! infrastructure code goes in here.
//!
//! # Module contents
//!
//! Since this is split into multiple files that are then "flattened" into the final module, it's
//! worth giving an inventory of what's in here, since every file has a `use crate::common::*;` in
//! it.
//!
//! ## `ParamList`
//!
//! `ParamList` is the collection of parameters handed to a web call. A key may be added more than
//! once, and every value is kept. It's consumed by the `auth` module for signing and by the
//! `client` module to build query strings and form bodies. Values go in through the `ParamValue`
//! trait, so strings, booleans, and numbers can all be handed over directly.
//!
//! `add_user_param` provides some special handling for the `UserID` enum, since Twitter always
//! handles user parameters the same way: either as a `"user_id"` parameter with the ID, or as a
//! `"screen_name"` parameter with the screen name.
//!
//! `multiple_names_param` is for when a function takes an `IntoIterator<Item=UserID>`. It splits
//! the iterator into two comma-separated strings: one for the user IDs, one for the screen names.
//!
//! ## Percent-encoding
//!
//! `percent_encode` implements the RFC 3986 encoding that both the OAuth signature and the
//! request bodies use.
//!
//! ## `Response`, classification, and decoding
//!
//! `response` holds `Response<T>` (a decoded value alongside the rate-limit headers) and the
//! functions every web call goes through to read a body and sort successes from errors. `decode`
//! holds the lenient JSON decoder, and `multipart` builds `multipart/form-data` bodies for calls
//! that carry a file.
//!
//! ## Deserialization helpers
//!
//! `deserialize_opt_datetime` is a glue function to read timestamps out in a `Deserialize`
//! implementation. Twitter always gives timestamps in the same format, so having that function
//! here saves us from having to write the format out everywhere. A timestamp that's missing or
//! `null` comes out as `None`.

use std::borrow::Cow;
use std::collections::BTreeMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, PercentEncode, NON_ALPHANUMERIC};
use serde::de::Error;
use serde::{Deserialize, Deserializer};

mod decode;
mod multipart;
mod response;

pub use crate::common::decode::*;
pub use crate::common::multipart::*;
pub use crate::common::response::*;
use crate::user;

/// A set of headers returned with a response.
pub type Headers = hyper::HeaderMap<hyper::header::HeaderValue>;
pub type CowStr = Cow<'static, str>;

/// Represents a list of parameters to a Twitter API call.
///
/// This type is a wrapper around a `BTreeMap<Cow<'static, str>, Vec<Cow<'static, str>>>` to
/// collect a set of parameter key/value pairs. The same key may be added several times, and every
/// value is kept. These are then used to assemble and sign a Twitter API request. The `Cow` type
/// is used to avoid having to allocate a `String` if a string literal is used for a parameter.
///
/// Most of the functions to add parameters follow a builder pattern, so that you can assemble a
/// `ParamList` in a single statement:
///
/// ```
/// use tweetwire::raw::ParamList;
///
/// let params = ParamList::new()
///     .add_param("status", "Hello, world")
///     .add_param("lat", 37.7821120598956)
///     .add_param("long", -122.400612831116)
///     .add_param("display_coordinates", true);
///
/// assert_eq!(params.get("display_coordinates"), Some("true"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, derive_more::Deref, derive_more::From)]
pub struct ParamList(BTreeMap<CowStr, Vec<CowStr>>);

impl ParamList {
    /// Creates a new, empty `ParamList`.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds the given key/value parameter to this `ParamList`. If the key is already present, the
    /// new value is kept alongside the existing ones.
    pub fn add_param(mut self, key: impl Into<CowStr>, value: impl ParamValue) -> Self {
        self.add_param_ref(key, value);
        self
    }

    /// Adds the given key/value parameter to this `ParamList` only if the given value is `Some`.
    ///
    /// This can be a convenient wrapper to use in case you may or may not want to include
    /// something based on some condition. If the given value is `None`, then the `ParamList` is
    /// returned unmodified.
    pub fn add_opt_param(self, key: impl Into<CowStr>, value: Option<impl ParamValue>) -> Self {
        match value {
            Some(val) => self.add_param(key, val),
            None => self,
        }
    }

    /// Adds the given key/value to this `ParamList` by mutating it in place, rather than consuming
    /// it as in `add_param`.
    pub fn add_param_ref(&mut self, key: impl Into<CowStr>, value: impl ParamValue) {
        self.0
            .entry(key.into())
            .or_insert_with(Vec::new)
            .push(value.into_param());
    }

    /// Sets the given key to the given value, replacing any values it already had.
    pub fn set_param(mut self, key: impl Into<CowStr>, value: impl ParamValue) -> Self {
        self.0.insert(key.into(), vec![value.into_param()]);
        self
    }

    /// Adds the given `UserID` as a parameter to this `ParamList` by adding either a `user_id` or
    /// `screen_name` parameter as appropriate.
    pub fn add_user_param(self, id: user::UserID) -> Self {
        match id {
            user::UserID::ID(id) => self.add_param("user_id", id),
            user::UserID::ScreenName(name) => self.add_param("screen_name", name),
        }
    }

    /// Returns the first value stored under the given key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(|vals| vals.first())
            .map(|v| v.as_ref())
    }

    /// Returns every value stored under the given key, in the order they were added.
    pub fn get_all(&self, key: &str) -> &[CowStr] {
        self.0.get(key).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Iterates over every key/value pair, repeating the key once per stored value.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .flat_map(|(k, vals)| vals.iter().map(move |v| (k.as_ref(), v.as_ref())))
    }

    /// Merge the parameters from the given `ParamList` into this one.
    pub(crate) fn combine(&mut self, other: ParamList) {
        for (k, vals) in other.0 {
            self.0.entry(k).or_insert_with(Vec::new).extend(vals);
        }
    }

    /// Renders this `ParamList` as an `application/x-www-form-urlencoded` string.
    ///
    /// The key/value pairs are printed as `key1=value1&key2=value2`, with all keys and values
    /// being percent-encoded according to Twitter's requirements. Repeated keys are printed once
    /// per value.
    pub fn to_urlencoded(&self) -> String {
        self.pairs()
            .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K, V> std::iter::FromIterator<(K, V)> for ParamList
where
    K: Into<CowStr>,
    V: ParamValue,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut list = ParamList::new();
        for (k, v) in iter {
            list.add_param_ref(k, v);
        }
        list
    }
}

/// A value that can be stored in a `ParamList`.
///
/// Strings are stored as-is. Booleans become `true`/`false`, integers are printed without digit
/// grouping, and floats use the shortest decimal form that reads back as the same number.
pub trait ParamValue {
    /// Converts this value into its parameter representation.
    fn into_param(self) -> CowStr;
}

impl ParamValue for &'static str {
    fn into_param(self) -> CowStr {
        Cow::Borrowed(self)
    }
}

impl ParamValue for String {
    fn into_param(self) -> CowStr {
        Cow::Owned(self)
    }
}

impl ParamValue for Cow<'static, str> {
    fn into_param(self) -> CowStr {
        self
    }
}

impl ParamValue for bool {
    fn into_param(self) -> CowStr {
        Cow::Borrowed(if self { "true" } else { "false" })
    }
}

macro_rules! display_param {
    ($($t:ty),*) => {
        $(
            impl ParamValue for $t {
                fn into_param(self) -> CowStr {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

display_param!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char);

// Helper trait to stringify the contents of an Option
pub(crate) trait MapString {
    fn map_string(&self) -> Option<String>;
}

impl<T: std::fmt::Display> MapString for Option<T> {
    fn map_string(&self) -> Option<String> {
        self.as_ref().map(|v| v.to_string())
    }
}

pub fn multiple_names_param<T, I>(accts: I) -> (String, String)
where
    T: Into<user::UserID>,
    I: IntoIterator<Item = T>,
{
    let mut ids = Vec::new();
    let mut names = Vec::new();

    for x in accts {
        match x.into() {
            user::UserID::ID(id) => ids.push(id.to_string()),
            user::UserID::ScreenName(name) => names.push(name.into_owned()),
        }
    }

    (ids.join(","), names.join(","))
}

const TWITTER_TIME_FORMAT: &str = "%a %b %d %T %z %Y";

pub fn deserialize_opt_datetime<'de, D>(
    ser: D,
) -> Result<Option<chrono::DateTime<chrono::Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(ser)? {
        Some(s) => parse_datetime(&s).map(Some).map_err(D::Error::custom),
        None => Ok(None),
    }
}

fn parse_datetime(s: &str) -> Result<chrono::DateTime<chrono::Utc>, chrono::ParseError> {
    chrono::DateTime::parse_from_str(s, TWITTER_TIME_FORMAT)
        .map(|date| date.with_timezone(&chrono::Utc))
}

const TWITTER_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encodes the given string based on the Twitter API specification.
///
/// Twitter bases its encoding scheme on RFC 3986, Section 2.1. They describe the process in full
/// [in their documentation][twitter-percent], but the process can be summarized by saying that
/// every *byte* that is not an ASCII number or letter, or the ASCII characters `-`, `.`, `_`, or
/// `~` must be replaced with a percent sign (`%`) and the byte value in uppercase hexadecimal.
///
/// [twitter-percent]: https://developer.twitter.com/en/docs/basics/authentication/oauth-1-0a/percent-encoding-parameters
pub fn percent_encode(src: &str) -> PercentEncode {
    utf8_percent_encode(src, TWITTER_ENCODE_SET)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Read;
    use std::sync::{Arc, Mutex};

    use futures::future::{BoxFuture, FutureExt};
    use hyper::{Body, Request, StatusCode};

    use crate::auth::{KeyPair, OAuthConfig, Signer};
    use crate::client::Client;
    use crate::error::TransportError;
    use crate::transport::HttpSend;

    pub(crate) const MOCK_BASE: &str = "http://mock.test/1.1";

    pub(crate) fn load_file(path: &str) -> String {
        let mut file = File::open(path).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    /// A user-signed `Client` pointed at `MOCK_BASE` that sends everything through `http`.
    pub(crate) fn mock_client(http: &MockHttp) -> Client {
        let signer = Signer::with_token(
            OAuthConfig::new(KeyPair::new("ckey", "csecret")),
            KeyPair::new("tkey", "tsecret"),
        );
        Client::builder()
            .base_url(MOCK_BASE)
            .signer(Arc::new(signer))
            .http(http.clone())
            .build()
    }

    /// A request captured by `MockHttp`, with its body already read out.
    #[derive(Debug, Clone)]
    pub(crate) struct SeenRequest {
        pub method: hyper::Method,
        pub uri: String,
        pub headers: Headers,
        pub body: Vec<u8>,
    }

    impl SeenRequest {
        pub fn header(&self, name: &str) -> Option<&str> {
            self.headers.get(name).and_then(|v| v.to_str().ok())
        }

        pub fn body_str(&self) -> &str {
            std::str::from_utf8(&self.body).unwrap()
        }
    }

    enum Canned {
        Reply(StatusCode, Vec<(&'static str, String)>, String),
        Fail(String),
    }

    /// An `HttpSend` that records every request and answers with a canned response.
    #[derive(Clone)]
    pub(crate) struct MockHttp {
        canned: Arc<Mutex<Vec<Canned>>>,
        pub seen: Arc<Mutex<Vec<SeenRequest>>>,
    }

    impl MockHttp {
        pub fn new() -> MockHttp {
            MockHttp {
                canned: Arc::new(Mutex::new(Vec::new())),
                seen: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn reply(status: u16, body: &str) -> MockHttp {
            MockHttp::new().then_reply(status, body)
        }

        pub fn then_reply(self, status: u16, body: &str) -> MockHttp {
            self.then_reply_with_headers(status, Vec::new(), body)
        }

        pub fn then_reply_with_headers(
            self,
            status: u16,
            headers: Vec<(&'static str, String)>,
            body: &str,
        ) -> MockHttp {
            self.canned.lock().unwrap().push(Canned::Reply(
                StatusCode::from_u16(status).unwrap(),
                headers,
                body.to_string(),
            ));
            self
        }

        pub fn fail(message: &str) -> MockHttp {
            let mock = MockHttp::new();
            mock.canned
                .lock()
                .unwrap()
                .push(Canned::Fail(message.to_string()));
            mock
        }

        pub fn requests(&self) -> Vec<SeenRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl HttpSend for MockHttp {
        fn send(
            &self,
            request: Request<Body>,
        ) -> BoxFuture<'static, Result<hyper::Response<Body>, TransportError>> {
            let canned = {
                let mut canned = self.canned.lock().unwrap();
                if canned.is_empty() {
                    None
                } else {
                    Some(canned.remove(0))
                }
            };

            respond(request, canned, self.seen.clone()).boxed()
        }
    }

    async fn respond(
        request: Request<Body>,
        canned: Option<Canned>,
        seen: Arc<Mutex<Vec<SeenRequest>>>,
    ) -> Result<hyper::Response<Body>, TransportError> {
        let (parts, body) = request.into_parts();
        let body = hyper::body::to_bytes(body).await?;
        seen.lock().unwrap().push(SeenRequest {
            method: parts.method,
            uri: parts.uri.to_string(),
            headers: parts.headers,
            body: body.to_vec(),
        });

        match canned {
            Some(Canned::Reply(status, headers, body)) => {
                let mut resp = hyper::Response::builder().status(status);
                for (name, value) in headers {
                    resp = resp.header(name, value);
                }
                Ok(resp.body(Body::from(body))?)
            }
            Some(Canned::Fail(message)) => Err(message.into()),
            None => Err("no canned response left".into()),
        }
    }

    #[test]
    fn percent_encoding_matches_unreserved_set() {
        let unreserved = "ABCXYZabcxyz0189-._~";
        assert_eq!(percent_encode(unreserved).to_string(), unreserved);

        assert_eq!(
            percent_encode("Hello Ladies + Gentlemen, a signed OAuth request!").to_string(),
            "Hello%20Ladies%20%2B%20Gentlemen%2C%20a%20signed%20OAuth%20request%21"
        );
        assert_eq!(percent_encode("*/:?&=").to_string(), "%2A%2F%3A%3F%26%3D");
        assert_eq!(percent_encode("☃").to_string(), "%E2%98%83");
    }

    #[test]
    fn percent_encoding_escapes_the_percent_sign() {
        let once = percent_encode("a b").to_string();
        let twice = percent_encode(&once).to_string();
        assert_eq!(once, "a%20b");
        assert_eq!(twice, "a%2520b");
    }

    #[test]
    fn params_keep_repeated_keys() {
        let params = ParamList::new()
            .add_param("media_ids", 1u64)
            .add_param("media_ids", 2u64)
            .add_param("status", "hi there");

        assert_eq!(params.get_all("media_ids").len(), 2);
        assert_eq!(params.get("media_ids"), Some("1"));
        assert_eq!(
            params.to_urlencoded(),
            "media_ids=1&media_ids=2&status=hi%20there"
        );
    }

    #[test]
    fn params_stringify_values() {
        let params = ParamList::new()
            .add_param("trim_user", true)
            .add_param("include_rts", false)
            .add_param("count", 1_000_000i64)
            .add_param("lat", 37.7821120598956f64)
            .add_param("long", -122.5f64)
            .add_opt_param("since_id", None::<u64>)
            .add_opt_param("max_id", Some(42u64));

        assert_eq!(params.get("trim_user"), Some("true"));
        assert_eq!(params.get("include_rts"), Some("false"));
        assert_eq!(params.get("count"), Some("1000000"));
        assert_eq!(params.get("lat"), Some("37.7821120598956"));
        assert_eq!(params.get("long"), Some("-122.5"));
        assert_eq!(params.get("since_id"), None);
        assert_eq!(params.get("max_id"), Some("42"));
    }

    #[test]
    fn set_param_replaces() {
        let params = ParamList::new()
            .add_param("count", 1)
            .add_param("count", 2)
            .set_param("count", 3);

        assert_eq!(params.get_all("count"), &[Cow::Borrowed("3")]);
    }

    #[test]
    fn combine_merges_values() {
        let mut left = ParamList::new().add_param("a", "1");
        left.combine(ParamList::new().add_param("a", "2").add_param("b", "3"));

        assert_eq!(left.pairs().collect::<Vec<_>>(), vec![("a", "1"), ("a", "2"), ("b", "3")]);
    }

    #[test]
    fn names_param_splits_ids_and_names() {
        let accts: Vec<user::UserID> = vec![1234u64.into(), "rustlang".into(), 5678u64.into()];
        let (ids, names) = multiple_names_param(accts);

        assert_eq!(ids, "1234,5678");
        assert_eq!(names, "rustlang");
    }

    #[test]
    fn parses_twitter_timestamps() {
        let date = parse_datetime("Wed Oct 10 20:19:24 +0000 2018").unwrap();
        assert_eq!(date.to_rfc3339(), "2018-10-10T20:19:24+00:00");
    }
}
