// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The layer between a `Client` and the network.
//!
//! Actual I/O goes through an [`HttpSend`] implementation. By default this is [`HyperClient`],
//! which speaks HTTPS with whichever TLS backend was selected through Cargo features. Anything
//! else that can turn a `hyper::Request` into a `hyper::Response` can be plugged in instead,
//! which is also how timeouts or proxies are configured.
//!
//! [`Transport`] sits in front of the `HttpSend` and authorizes every outgoing request, either by
//! signing it with a [`Signer`] or by attaching an application-only bearer token.
//!
//! [`HttpSend`]: trait.HttpSend.html
//! [`HyperClient`]: struct.HyperClient.html
//! [`Transport`]: struct.Transport.html
//! [`Signer`]: ../auth/struct.Signer.html

use std::fmt;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, TryFutureExt};
use hyper::client::HttpConnector;
use hyper::{Body, Request};
use tracing::debug;

use crate::auth::raw::RequestBuilder;
use crate::auth::Signer;
use crate::error::{Error, Result, TransportError};

/// Something that can send an HTTP request and hand back the response.
///
/// Errors are passed through to the caller as `Error::Net` without any further interpretation.
pub trait HttpSend: Send + Sync {
    /// Sends the given request.
    fn send(
        &self,
        request: Request<Body>,
    ) -> BoxFuture<'static, std::result::Result<hyper::Response<Body>, TransportError>>;
}

#[cfg(feature = "native_tls")]
type Connector = hyper_tls::HttpsConnector<HttpConnector>;

#[cfg(all(
    not(feature = "native_tls"),
    any(feature = "rustls", feature = "rustls_webpki")
))]
type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

#[cfg(not(any(feature = "native_tls", feature = "rustls", feature = "rustls_webpki")))]
type Connector = HttpConnector;

#[cfg(feature = "native_tls")]
fn new_connector() -> Connector {
    hyper_tls::HttpsConnector::new()
}

#[cfg(all(not(feature = "native_tls"), feature = "rustls"))]
fn new_connector() -> Connector {
    hyper_rustls::HttpsConnector::with_native_roots()
}

#[cfg(all(
    not(feature = "native_tls"),
    not(feature = "rustls"),
    feature = "rustls_webpki"
))]
fn new_connector() -> Connector {
    hyper_rustls::HttpsConnector::with_webpki_roots()
}

#[cfg(not(any(feature = "native_tls", feature = "rustls", feature = "rustls_webpki")))]
fn new_connector() -> Connector {
    HttpConnector::new()
}

/// The default `HttpSend`: a pooled `hyper::Client` using the TLS backend selected at compile time.
#[derive(Clone)]
pub struct HyperClient {
    client: hyper::Client<Connector, Body>,
}

impl HyperClient {
    /// Creates a client with default settings.
    pub fn new() -> HyperClient {
        HyperClient {
            client: hyper::Client::builder().build(new_connector()),
        }
    }
}

impl Default for HyperClient {
    fn default() -> Self {
        HyperClient::new()
    }
}

impl fmt::Debug for HyperClient {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("HyperClient").finish()
    }
}

impl HttpSend for HyperClient {
    fn send(
        &self,
        request: Request<Body>,
    ) -> BoxFuture<'static, std::result::Result<hyper::Response<Body>, TransportError>> {
        self.client
            .request(request)
            .map_err(|e| Box::new(e) as TransportError)
            .boxed()
    }
}

/// How a `Transport` authorizes outgoing requests.
///
/// The two modes are exclusive: a client either acts on behalf of a user, or as the application
/// itself.
#[derive(Clone)]
pub enum Credentials {
    /// Sign every request with OAuth 1.0a.
    User(Arc<Signer>),
    /// Send an application-only bearer token with every request.
    Bearer(String),
}

impl Credentials {
    /// Creates `Bearer` credentials, rejecting an empty token.
    pub fn bearer(token: impl Into<String>) -> Result<Credentials> {
        let token = token.into();
        if token.is_empty() {
            return Err(Error::Config("the bearer token is empty"));
        }
        Ok(Credentials::Bearer(token))
    }
}

// The bearer token is a credential in its own right, so it's left out.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Credentials::User(signer) => f.debug_tuple("User").field(signer).finish(),
            Credentials::Bearer(_) => f.debug_tuple("Bearer").field(&"<hidden>").finish(),
        }
    }
}

/// Authorizes requests and hands them to the underlying `HttpSend`.
#[derive(Clone)]
pub struct Transport {
    http: Arc<dyn HttpSend>,
    credentials: Option<Credentials>,
}

impl Transport {
    /// Wraps the given `HttpSend`. Without credentials, every request fails with `Error::Config`.
    pub fn new(http: Arc<dyn HttpSend>, credentials: Option<Credentials>) -> Transport {
        Transport { http, credentials }
    }

    /// The credentials requests are authorized with, if any.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// The underlying `HttpSend`.
    pub fn http(&self) -> &dyn HttpSend {
        &*self.http
    }

    /// Attaches an `Authorization` header to the given request and assembles it.
    ///
    /// User requests get a fresh signature every time this is called.
    pub fn authorize(&self, request: RequestBuilder) -> Result<Request<Body>> {
        match self.credentials {
            Some(Credentials::User(ref signer)) => signer.sign(request),
            Some(Credentials::Bearer(ref token)) if token.is_empty() => {
                Err(Error::Config("the bearer token is empty"))
            }
            Some(Credentials::Bearer(ref token)) => request.request_bearer(token),
            None => Err(Error::Config(
                "no credentials were configured to authorize the request",
            )),
        }
    }

    /// Authorizes and sends the given request.
    ///
    /// No network traffic happens if the request can't be authorized. Errors from the underlying
    /// `HttpSend` are returned unchanged inside `Error::Net`.
    pub async fn send(&self, request: RequestBuilder<'_>) -> Result<hyper::Response<Body>> {
        let request = self.authorize(request)?;
        debug!(method = %request.method(), uri = %request.uri(), "sending request");
        self.http.send(request).await.map_err(Error::Net)
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Transport")
            .field("credentials", &self.credentials)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{KeyPair, OAuthConfig};
    use crate::common::tests::MockHttp;
    use hyper::Method;

    const URL: &str = "https://api.twitter.com/1.1/help/tos.json";

    fn signer() -> Arc<Signer> {
        Arc::new(Signer::with_token(
            OAuthConfig::new(KeyPair::new("ckey", "csecret")),
            KeyPair::new("tkey", "tsecret"),
        ))
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_sending() {
        let http = MockHttp::reply(200, "{}");
        let transport = Transport::new(Arc::new(http.clone()), None);

        match transport.send(RequestBuilder::new(Method::GET, URL)).await {
            Err(Error::Config(_)) => (),
            other => panic!("expected a config error, got {:?}", other),
        }
        assert!(http.requests().is_empty());
    }

    #[tokio::test]
    async fn bearer_header_attached() {
        let http = MockHttp::reply(200, "{}");
        let creds = Credentials::bearer("AAAAtoken").unwrap();
        let transport = Transport::new(Arc::new(http.clone()), Some(creds));

        transport
            .send(RequestBuilder::new(Method::GET, URL))
            .await
            .unwrap();

        let seen = http.requests();
        assert_eq!(seen[0].header("authorization"), Some("Bearer AAAAtoken"));
    }

    #[test]
    fn empty_bearer_rejected() {
        match Credentials::bearer("") {
            Err(Error::Config(_)) => (),
            other => panic!("expected a config error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_bearer_built_directly_is_not_sent() {
        let http = MockHttp::reply(200, "{}");
        let creds = Credentials::Bearer(String::new());
        let transport = Transport::new(Arc::new(http.clone()), Some(creds));

        match transport.send(RequestBuilder::new(Method::GET, URL)).await {
            Err(Error::Config(_)) => (),
            other => panic!("expected a config error, got {:?}", other),
        }
        assert!(http.requests().is_empty());
    }

    #[tokio::test]
    async fn every_request_signed_afresh() {
        let http = MockHttp::reply(200, "{}").then_reply(200, "{}");
        let transport = Transport::new(Arc::new(http.clone()), Some(Credentials::User(signer())));

        for _ in 0..2 {
            transport
                .send(RequestBuilder::new(Method::GET, URL))
                .await
                .unwrap();
        }

        let seen = http.requests();
        let first = seen[0].header("authorization").unwrap();
        let second = seen[1].header("authorization").unwrap();
        assert!(first.starts_with("OAuth "));
        assert!(first.contains("oauth_token=\"tkey\""));
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn transport_errors_pass_through() {
        let http = MockHttp::fail("dns lookup failed");
        let transport = Transport::new(Arc::new(http), Some(Credentials::User(signer())));

        match transport.send(RequestBuilder::new(Method::GET, URL)).await {
            Err(Error::Net(err)) => assert_eq!(err.to_string(), "dns lookup failed"),
            other => panic!("expected a network error, got {:?}", other),
        }
    }

    #[test]
    fn debug_output_hides_bearer() {
        let creds = Credentials::bearer("AAAAtoken").unwrap();
        assert!(!format!("{:?}", creds).contains("AAAAtoken"));
    }
}
