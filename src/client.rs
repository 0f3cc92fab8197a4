// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The generic call pipeline that every endpoint goes through.
//!
//! A [`Client`] turns a method, an endpoint path, and a [`ParamList`] into a request against its
//! base URL, sends it through its [`Transport`], sorts the response into success or failure, and
//! decodes the body. The resource groups in the rest of this crate (`client.tweets()`,
//! `client.users()`, and so on) are thin wrappers around [`Client::call`]. Endpoints without a
//! wrapper can be reached with the same functions directly:
//!
//! ```rust,no_run
//! # async fn doc() -> tweetwire::error::Result<()> {
//! use std::sync::Arc;
//! use hyper::Method;
//! use tweetwire::{Client, KeyPair, OAuthConfig, ParamList, Signer};
//!
//! let config = OAuthConfig::new(KeyPair::new("consumer key", "consumer secret"));
//! let signer = Signer::with_token(config, KeyPair::new("access token", "access secret"));
//! let client = Client::builder().signer(Arc::new(signer)).build();
//!
//! let params = ParamList::new().add_param("id", 20u64);
//! let tweet = client
//!     .call_json(Method::GET, "statuses/show", &params)
//!     .await?;
//! println!("{}", String::from_utf8_lossy(&tweet));
//! # Ok(())
//! # }
//! ```
//!
//! [`Client`]: struct.Client.html
//! [`ParamList`]: ../common/struct.ParamList.html
//! [`Transport`]: ../transport/struct.Transport.html
//! [`Client::call`]: struct.Client.html#method.call

use std::sync::Arc;

use hyper::body::Bytes;
use hyper::Method;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::account::Account;
use crate::auth::raw::RequestBuilder;
use crate::auth::Signer;
use crate::common::*;
use crate::direct::Direct;
use crate::error::{Error, Result};
use crate::links;
use crate::list::Lists;
use crate::search::Search;
use crate::service::Help;
use crate::transport::{Credentials, HttpSend, HyperClient, Transport};
use crate::tweet::Tweets;
use crate::user::{Followers, Friends, Users};

/// Builder for a [`Client`](struct.Client.html).
#[derive(Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    http: Option<Arc<dyn HttpSend>>,
    credentials: Option<Credentials>,
}

impl ClientBuilder {
    /// Creates a builder with the default base URL and no credentials.
    pub fn new() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Sets the URL endpoint paths are resolved against. Defaults to
    /// `https://api.twitter.com/1.1`.
    pub fn base_url(self, base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder {
            base_url: Some(base_url.into()),
            ..self
        }
    }

    /// Signs requests with the given `Signer`, on behalf of the user it was authorized by.
    pub fn signer(self, signer: Arc<Signer>) -> ClientBuilder {
        self.credentials(Credentials::User(signer))
    }

    /// Sends the given application-only bearer token with every request.
    ///
    /// Fails with `Error::Config` if the token is empty.
    pub fn bearer(self, token: impl Into<String>) -> Result<ClientBuilder> {
        Ok(self.credentials(Credentials::bearer(token)?))
    }

    /// Sets the credentials to authorize requests with.
    pub fn credentials(self, credentials: Credentials) -> ClientBuilder {
        ClientBuilder {
            credentials: Some(credentials),
            ..self
        }
    }

    /// Sends requests through the given `HttpSend` instead of a default `HyperClient`.
    pub fn http(self, http: impl HttpSend + 'static) -> ClientBuilder {
        ClientBuilder {
            http: Some(Arc::new(http)),
            ..self
        }
    }

    /// Creates the `Client`.
    ///
    /// Missing credentials aren't an error yet: every call made through the resulting client will
    /// fail with `Error::Config` until it's rebuilt with some.
    pub fn build(self) -> Client {
        let base_url = self
            .base_url
            .unwrap_or_else(|| links::API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();
        let http = self
            .http
            .unwrap_or_else(|| Arc::new(HyperClient::new()));

        Client {
            base_url,
            transport: Transport::new(http, self.credentials),
        }
    }
}

/// A handle to the Twitter API, bundling a base URL with an authorized transport.
///
/// `Client` is cheap to clone, and clones share the same underlying connection pool and
/// credentials.
#[derive(Clone, Debug)]
pub struct Client {
    base_url: String,
    transport: Transport,
}

impl Client {
    /// Starts building a new `Client`.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The URL endpoint paths are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The transport this client sends requests through.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Returns the absolute URL for the given endpoint path: `<base>/<endpoint>.json`.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}.json",
            self.base_url,
            endpoint.trim_start_matches('/')
        )
    }

    /// Calls the given endpoint and decodes its response into `T`.
    ///
    /// `GET` calls send `params` as a query string, and `POST` calls send them as a form body. Any
    /// other method fails with `Error::InvalidArgument` before anything is sent.
    ///
    /// Fields of the response whose JSON type doesn't match `T` are skipped and listed in the
    /// `mismatches` of the result, rather than failing the call. Only a body that isn't JSON at
    /// all is an `Error::Decode`.
    pub async fn call<T>(&self, method: Method, endpoint: &str, params: &ParamList) -> Result<Response<T>>
    where
        T: DeserializeOwned + Default,
    {
        let resp = self.call_json(method, endpoint, params).await?;
        decode_response(resp)
    }

    /// Calls the given endpoint and returns its response body without decoding it.
    ///
    /// Non-2xx responses are still sorted into `Error::Api`.
    pub async fn call_json(
        &self,
        method: Method,
        endpoint: &str,
        params: &ParamList,
    ) -> Result<Response<Bytes>> {
        check_method(&method)?;

        let url = self.endpoint_url(endpoint);
        let mut request = RequestBuilder::new(method.clone(), &url);
        if !params.is_empty() {
            request = if method == Method::GET {
                request.with_query_params(params)
            } else {
                request.with_body_params(params)
            };
        }

        self.dispatch(request).await
    }

    /// Calls the given endpoint, discarding any response body.
    pub async fn call_empty(&self, method: Method, endpoint: &str, params: &ParamList) -> Result<Response<()>> {
        let resp = self.call_json(method, endpoint, params).await?;
        Ok(Response::map(resp, |_| ()))
    }

    /// POSTs the given `multipart/form-data` body to the given endpoint, and decodes the response
    /// into `T`.
    ///
    /// The form's contents are not part of the request signature.
    pub async fn call_multipart<T>(&self, endpoint: &str, form: MultipartForm) -> Result<Response<T>>
    where
        T: DeserializeOwned + Default,
    {
        let url = self.endpoint_url(endpoint);
        let content_type = form.content_type();
        let request = RequestBuilder::new(Method::POST, &url).with_body(form.finish(), content_type);

        let resp = self.dispatch(request).await?;
        decode_response(resp)
    }

    /// Tweet and timeline calls.
    pub fn tweets(&self) -> Tweets<'_> {
        Tweets::new(self)
    }

    /// Tweet search.
    pub fn search(&self) -> Search<'_> {
        Search::new(self)
    }

    /// Direct message calls.
    pub fn direct(&self) -> Direct<'_> {
        Direct::new(self)
    }

    /// User lookup calls.
    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    /// The accounts a user follows.
    pub fn friends(&self) -> Friends<'_> {
        Friends::new(self)
    }

    /// The accounts following a user.
    pub fn followers(&self) -> Followers<'_> {
        Followers::new(self)
    }

    /// List calls.
    pub fn lists(&self) -> Lists<'_> {
        Lists::new(self)
    }

    /// Settings and profile of the authenticated user.
    pub fn account(&self) -> Account<'_> {
        Account::new(self)
    }

    /// Calls about the service itself: terms, configuration, and rate limits.
    pub fn help(&self) -> Help<'_> {
        Help::new(self)
    }

    async fn dispatch(&self, request: RequestBuilder<'_>) -> Result<Response<Bytes>> {
        debug!(method = %request.method(), endpoint = request.uri(), "dispatching call");
        let resp = self.transport.send(request).await?;
        let (status, headers, body) = read_body(resp).await?;
        debug!(status = status.as_u16(), "response received");

        let rate_limit = RateLimit::from(&headers);
        let body = classify_response(status, &headers, body)?;

        Ok(Response::new(rate_limit, body))
    }
}

fn check_method(method: &Method) -> Result<()> {
    if *method == Method::GET || *method == Method::POST {
        Ok(())
    } else {
        Err(Error::InvalidArgument(format!(
            "unsupported HTTP method {}, only GET and POST are allowed",
            method
        )))
    }
}

fn decode_response<T>(resp: Response<Bytes>) -> Result<Response<T>>
where
    T: DeserializeOwned + Default,
{
    let decoded = decode_lenient::<T>(&resp.response)?;
    Ok(Response {
        rate_limit_status: resp.rate_limit_status,
        mismatches: decoded.mismatches,
        response: decoded.value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::auth::raw::{sign_hmac_sha1, signature_base_string};
    use crate::auth::{KeyPair, OAuthConfig};
    use crate::common::tests::MockHttp;
    use crate::error::ApiErrorBody;
    use crate::tweet::Tweet;

    const BASE: &str = "http://mock.test/1.1";

    fn client(http: &MockHttp) -> Client {
        let signer = Signer::with_token(
            OAuthConfig::new(KeyPair::new("ckey", "csecret")),
            KeyPair::new("tkey", "tsecret"),
        );
        Client::builder()
            .base_url(BASE)
            .signer(Arc::new(signer))
            .http(http.clone())
            .build()
    }

    fn header_params(auth: &str) -> HashMap<String, String> {
        auth.trim_start_matches("OAuth ")
            .split(", ")
            .map(|pair| {
                let (k, v) = pair.split_once('=').unwrap();
                let v = percent_encoding::percent_decode_str(v.trim_matches('"'))
                    .decode_utf8()
                    .unwrap()
                    .into_owned();
                (k.to_string(), v)
            })
            .collect()
    }

    #[test]
    fn endpoint_urls() {
        let http = MockHttp::new();
        let client = Client::builder()
            .base_url("http://mock.test/1.1/")
            .http(http)
            .build();

        assert_eq!(
            client.endpoint_url("statuses/update"),
            "http://mock.test/1.1/statuses/update.json"
        );
        assert_eq!(
            client.endpoint_url("/help/tos"),
            "http://mock.test/1.1/help/tos.json"
        );
        assert_eq!(Client::builder().http(MockHttp::new()).build().base_url(), links::API_BASE);
    }

    #[tokio::test]
    async fn unsupported_method_sends_nothing() {
        let http = MockHttp::reply(200, "{}");
        let client = client(&http);

        match client.call_json(Method::DELETE, "statuses/destroy/1", &ParamList::new()).await {
            Err(Error::InvalidArgument(_)) => (),
            other => panic!("expected an invalid argument error, got {:?}", other),
        }
        assert!(http.requests().is_empty());
    }

    #[tokio::test]
    async fn get_sends_query_string() {
        let http = MockHttp::reply(200, "[]");
        let client = client(&http);
        let params = ParamList::new().add_param("count", 5).add_param("screen_name", "rust lang");

        client.call_json(Method::GET, "statuses/user_timeline", &params).await.unwrap();

        let seen = http.requests();
        assert_eq!(seen[0].method, Method::GET);
        assert_eq!(
            seen[0].uri,
            "http://mock.test/1.1/statuses/user_timeline.json?count=5&screen_name=rust%20lang"
        );
        assert!(seen[0].body.is_empty());
        assert!(seen[0].header("content-type").is_none());
    }

    #[tokio::test]
    async fn post_sends_form_body_and_signs_it() {
        let http = MockHttp::reply(200, "{}");
        let client = client(&http);
        let params = ParamList::new().add_param("status", "Hello Ladies + Gentlemen!");

        client.call_json(Method::POST, "statuses/update", &params).await.unwrap();

        let seen = http.requests();
        let url = "http://mock.test/1.1/statuses/update.json";
        assert_eq!(seen[0].uri, url);
        assert_eq!(
            seen[0].header("content-type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(seen[0].body_str(), "status=Hello%20Ladies%20%2B%20Gentlemen%21");

        let mut oauth = header_params(seen[0].header("authorization").unwrap());
        let signature = oauth.remove("oauth_signature").unwrap();
        let mut signed = params.clone();
        for (k, v) in oauth {
            signed.add_param_ref(k, v);
        }
        let base = signature_base_string(&Method::POST, url, &signed);
        assert_eq!(sign_hmac_sha1("csecret", "tsecret", &base).unwrap(), signature);
    }

    #[tokio::test]
    async fn update_status_end_to_end() {
        let http = MockHttp::reply(
            200,
            r#"{"id":1050118621198921728,"id_str":"1050118621198921728","text":"hello","user":{"id":6253282,"screen_name":"TwitterAPI"}}"#,
        );
        let client = client(&http);
        let params = ParamList::new().add_param("status", "hello");

        let tweet: Response<Tweet> = client.call(Method::POST, "statuses/update", &params).await.unwrap();

        assert_eq!(tweet.text, "hello");
        assert_eq!(tweet.id, 1050118621198921728);
        assert!(tweet.is_complete());
        assert_eq!(http.requests()[0].body_str(), "status=hello");
    }

    #[tokio::test]
    async fn rate_limits_reported() {
        let http = MockHttp::new().then_reply_with_headers(
            200,
            vec![
                ("x-rate-limit-limit", "900".to_string()),
                ("x-rate-limit-remaining", "899".to_string()),
                ("x-rate-limit-reset", "1600000000".to_string()),
            ],
            "{}",
        );
        let client = client(&http);

        let resp = client.call_empty(Method::GET, "help/tos", &ParamList::new()).await.unwrap();

        assert_eq!(resp.rate_limit_status.limit, 900);
        assert_eq!(resp.rate_limit_status.remaining, 899);
        assert_eq!(resp.rate_limit_status.reset, 1600000000);
    }

    #[tokio::test]
    async fn mismatched_fields_tolerated() {
        let http = MockHttp::reply(200, r#"{"id":"not-a-number","text":"still here"}"#);
        let client = client(&http);

        let tweet: Response<Tweet> = client
            .call(Method::GET, "statuses/show", &ParamList::new().add_param("id", 1))
            .await
            .unwrap();

        assert_eq!(tweet.id, 0);
        assert_eq!(tweet.text, "still here");
        assert_eq!(tweet.mismatches.len(), 1);
        assert_eq!(tweet.mismatches[0].path, "id");
    }

    #[tokio::test]
    async fn malformed_json_is_fatal() {
        let http = MockHttp::reply(200, r#"{"id": 12"#);
        let client = client(&http);

        match client.call::<Tweet>(Method::GET, "statuses/show", &ParamList::new()).await {
            Err(Error::Decode(_)) => (),
            other => panic!("expected a decode error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn api_errors_classified() {
        let http = MockHttp::reply(401, r#"{"error":"Invalid token","request":"/1.1/x"}"#);
        let client = client(&http);

        let err = client
            .call::<Tweet>(Method::GET, "statuses/show", &ParamList::new())
            .await
            .unwrap_err();

        let api = err.api_error().unwrap();
        assert_eq!(api.message(), "Invalid token");
        assert!(matches!(api.body, ApiErrorBody::Single { .. }));
    }

    #[tokio::test]
    async fn missing_credentials_are_a_config_error() {
        let http = MockHttp::reply(200, "{}");
        let client = Client::builder().base_url(BASE).http(http.clone()).build();

        match client.call_empty(Method::GET, "help/tos", &ParamList::new()).await {
            Err(Error::Config(_)) => (),
            other => panic!("expected a config error, got {:?}", other),
        }
        assert!(http.requests().is_empty());
    }

    #[tokio::test]
    async fn multipart_call() {
        let http = MockHttp::reply(200, r#"{"id":5,"text":"pic"}"#);
        let client = client(&http);
        let form = MultipartForm::with_boundary("BOUNDARY")
            .add_text("status", "pic")
            .add_file("media[]", "pic.png", b"PNGDATA");

        let tweet: Response<Tweet> = client
            .call_multipart("statuses/update_with_media", form)
            .await
            .unwrap();

        assert_eq!(tweet.text, "pic");
        let seen = http.requests();
        assert_eq!(
            seen[0].header("content-type"),
            Some("multipart/form-data; boundary=BOUNDARY")
        );
        assert!(seen[0].body_str().contains("PNGDATA"));
        assert!(seen[0].header("authorization").unwrap().starts_with("OAuth "));
    }

    #[tokio::test]
    async fn bearer_client() {
        let http = MockHttp::reply(200, r#"{"statuses":[]}"#);
        let client = Client::builder()
            .base_url(BASE)
            .bearer("AAAA")
            .unwrap()
            .http(http.clone())
            .build();

        client.call_json(Method::GET, "search/tweets", &ParamList::new().add_param("q", "rust")).await.unwrap();

        assert_eq!(http.requests()[0].header("authorization"), Some("Bearer AAAA"));
    }
}
