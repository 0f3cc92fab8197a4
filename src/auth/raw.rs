// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Internal mechanisms for the `auth` module.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac, NewMac};
use hyper::header::{AUTHORIZATION, CONTENT_TYPE};
use hyper::{Body, Method, Request};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::Sha1;

use crate::common::*;
use crate::error::{Error, Result};

use super::KeyPair;

/// An outgoing request, waiting to be given its `Authorization` header.
///
/// The parameters given through `with_query_params` and `with_body_params` are kept aside so they
/// can be folded into the OAuth signature once the request is signed.
pub struct RequestBuilder<'a> {
    base_uri: &'a str,
    method: Method,
    params: Option<ParamList>,
    query: Option<String>,
    body: Option<(Body, String)>,
    addon: OAuthAddOn,
}

impl<'a> RequestBuilder<'a> {
    /// Starts a request with the given method and URL.
    pub fn new(method: Method, base_uri: &'a str) -> Self {
        RequestBuilder {
            base_uri,
            method,
            params: None,
            query: None,
            body: None,
            addon: OAuthAddOn::None,
        }
    }

    /// The method this request will be sent with.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The URL this request will be sent to, without any query parameters added by this builder.
    pub fn uri(&self) -> &str {
        self.base_uri
    }

    /// Appends the given parameters to the URL as a query string. They are also signed.
    pub fn with_query_params(self, params: &ParamList) -> Self {
        let total_params = self.merge_params(params);
        RequestBuilder {
            query: Some(params.to_urlencoded()),
            params: Some(total_params),
            ..self
        }
    }

    /// Sends the given parameters as an `application/x-www-form-urlencoded` body. They are also
    /// signed.
    pub fn with_body_params(self, params: &ParamList) -> Self {
        let total_params = self.merge_params(params);
        RequestBuilder {
            body: Some((
                Body::from(params.to_urlencoded()),
                mime::APPLICATION_WWW_FORM_URLENCODED.to_string(),
            )),
            params: Some(total_params),
            ..self
        }
    }

    /// Sends the given body with the given content type. The body is not part of the signature.
    pub fn with_body(self, body: impl Into<Body>, content: impl Into<String>) -> Self {
        RequestBuilder {
            body: Some((body.into(), content.into())),
            ..self
        }
    }

    /// Adds an `oauth_callback` to the signed header, for requesting a temporary token.
    pub fn oauth_callback(self, callback: impl Into<String>) -> Self {
        RequestBuilder {
            addon: OAuthAddOn::Callback(callback.into()),
            ..self
        }
    }

    /// Adds an `oauth_verifier` to the signed header, for exchanging a temporary token.
    pub fn oauth_verifier(self, verifier: impl Into<String>) -> Self {
        RequestBuilder {
            addon: OAuthAddOn::Verifier(verifier.into()),
            ..self
        }
    }

    /// Signs the request with the given consumer key and optional token, and assembles it.
    ///
    /// A fresh nonce and timestamp are generated on every call.
    pub fn request_keys(self, consumer_key: &KeyPair, token: Option<&KeyPair>) -> Result<Request<Body>> {
        let oauth = OAuthParams::from_keys(consumer_key.clone(), token.cloned())
            .with_addon(self.addon.clone())
            .sign_request(&self.method, self.base_uri, self.params.as_ref())?;
        self.request_authorization(oauth.to_string())
    }

    /// Assembles the request with an application-only bearer token.
    pub fn request_bearer(self, bearer: &str) -> Result<Request<Body>> {
        self.request_authorization(format!("Bearer {}", bearer))
    }

    /// Assembles the request with HTTP Basic consumer credentials, for the bearer token endpoint.
    pub fn request_consumer_bearer(self, consumer_key: &KeyPair) -> Result<Request<Body>> {
        self.request_authorization(bearer_request(consumer_key))
    }

    fn merge_params(&self, params: &ParamList) -> ParamList {
        if let Some(ref my_params) = self.params {
            let mut total = my_params.clone();
            total.combine(params.clone());
            total
        } else {
            params.clone()
        }
    }

    fn request_authorization(self, authorization: String) -> Result<Request<Body>> {
        let full_url = match self.query {
            Some(ref query) if query.is_empty() => self.base_uri.to_string(),
            Some(ref query) if self.base_uri.contains('?') => format!("{}&{}", self.base_uri, query),
            Some(ref query) => format!("{}?{}", self.base_uri, query),
            None => self.base_uri.to_string(),
        };
        let request = Request::builder()
            .method(self.method)
            .uri(full_url)
            .header(AUTHORIZATION, authorization);

        let request = if let Some((body, content)) = self.body {
            request.header(CONTENT_TYPE, content).body(body)
        } else {
            request.body(Body::empty())
        };

        request.map_err(|e| Error::InvalidArgument(format!("could not assemble request: {}", e)))
    }
}

/// Builds the OAuth 1.0a signature base string for a request.
///
/// Any query string already on `uri` is removed from the URL and its parameters are signed along
/// with `params`. The encoded `key=value` pairs are sorted, so the result doesn't depend on the
/// order parameters were added in, or on whether they travel in the URL or the body.
pub fn signature_base_string(method: &Method, uri: &str, params: &ParamList) -> String {
    let (base_uri, query) = match uri.find('?') {
        Some(idx) => (&uri[..idx], Some(&uri[idx + 1..])),
        None => (uri, None),
    };

    let mut pairs = params
        .pairs()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>();
    if let Some(query) = query {
        pairs.extend(
            url::form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| format!("{}={}", percent_encode(&k), percent_encode(&v))),
        );
    }
    pairs.sort();

    format!(
        "{}&{}&{}",
        percent_encode(method.as_str()),
        percent_encode(base_uri),
        percent_encode(&pairs.join("&"))
    )
}

/// Signs the given base string with HMAC-SHA1, returning the base64-encoded digest.
///
/// `token_secret` is empty when no token is involved yet, like when requesting a temporary token.
pub fn sign_hmac_sha1(consumer_secret: &str, token_secret: &str, base_string: &str) -> Result<String> {
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );

    let mut digest = Hmac::<Sha1>::new_from_slice(key.as_bytes())
        .map_err(|e| Error::OAuth(format!("could not create signing key: {}", e)))?;
    digest.update(base_string.as_bytes());

    Ok(base64::encode(&digest.finalize().into_bytes()))
}

/// OAuth header set used to create an OAuth signature.
#[derive(Clone, Debug)]
struct OAuthParams {
    /// The consumer key that represents the app making the API request.
    consumer_key: KeyPair,
    /// The token that represents the user authorizing the request (or the temporary token
    /// representing a user authorizing the app).
    token: Option<KeyPair>,
    /// A random token representing the request itself. Used to de-duplicate requests on Twitter's
    /// end.
    nonce: String,
    /// A Unix timestamp for when the request was created.
    timestamp: u64,
    /// A callback or verifier parameter, if necessary.
    addon: OAuthAddOn,
}

impl OAuthParams {
    /// Creates a new `OAuthParams` header with the given keys, and a new `timestamp` and `nonce`.
    ///
    /// The `token` is optional specifically for when you're requesting a temporary token;
    /// otherwise it should be the temporary token (for when you're exchanging it for an access
    /// token) or an access token (for when you're calling a regular API function).
    fn from_keys(consumer_key: KeyPair, token: Option<KeyPair>) -> OAuthParams {
        let timestamp = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(dur) => dur,
            Err(err) => err.duration(),
        }
        .as_secs();
        let nonce = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect::<String>();

        OAuthParams::from_parts(consumer_key, token, nonce, timestamp)
    }

    fn from_parts(
        consumer_key: KeyPair,
        token: Option<KeyPair>,
        nonce: String,
        timestamp: u64,
    ) -> OAuthParams {
        OAuthParams {
            consumer_key,
            token,
            nonce,
            timestamp,
            addon: OAuthAddOn::None,
        }
    }

    /// Adds the given callback or verifier to this `OAuthParams` header.
    fn with_addon(self, addon: OAuthAddOn) -> OAuthParams {
        OAuthParams { addon, ..self }
    }

    /// The protocol parameters that go in the header, minus the signature.
    fn protocol_params(&self) -> BTreeMap<&'static str, Cow<'static, str>> {
        let mut params: BTreeMap<&'static str, Cow<'static, str>> = BTreeMap::new();
        params.insert("oauth_signature_method", "HMAC-SHA1".into());
        params.insert("oauth_version", "1.0".into());
        params.insert("oauth_consumer_key", self.consumer_key.key.clone());
        if let Some(ref token) = self.token {
            params.insert("oauth_token", token.key.clone());
        }
        params.insert("oauth_nonce", self.nonce.clone().into());
        params.insert("oauth_timestamp", self.timestamp.to_string().into());

        match self.addon {
            OAuthAddOn::Callback(ref c) => {
                params.insert("oauth_callback", c.clone().into());
            }
            OAuthAddOn::Verifier(ref v) => {
                params.insert("oauth_verifier", v.clone().into());
            }
            OAuthAddOn::None => (),
        }

        params
    }

    /// Uses the parameters in this `OAuthParams` instance to generate a signature for the given
    /// request, returning it as a `SignedHeader`.
    fn sign_request(self, method: &Method, uri: &str, params: Option<&ParamList>) -> Result<SignedHeader> {
        let protocol = self.protocol_params();

        let mut sig_params = params.cloned().unwrap_or_default();
        for (k, v) in &protocol {
            sig_params.add_param_ref(*k, v.clone());
        }

        let base_str = signature_base_string(method, uri, &sig_params);
        let token_secret = self.token.as_ref().map(|t| t.secret.as_ref()).unwrap_or("");
        let signature = sign_hmac_sha1(&self.consumer_key.secret, token_secret, &base_str)?;

        Ok(SignedHeader {
            params: protocol,
            signature,
        })
    }
}

/// Represents an "addon" to an OAuth header.
#[derive(Clone, Debug)]
enum OAuthAddOn {
    /// An `oauth_callback` parameter, used when requesting a temporary token.
    Callback(String),
    /// An `oauth_verifier` parameter, used when exchanging it for an access token.
    Verifier(String),
    /// Neither an `oauth_callback` nor an `oauth_verifier` parameter are present in this header.
    /// This is the default used when signing a regular API request.
    None,
}

/// A set of `OAuthParams` parameters combined with a request signature, ready to be attached to a
/// request.
struct SignedHeader {
    /// The OAuth parameters used to create the signature.
    params: BTreeMap<&'static str, Cow<'static, str>>,
    /// The base64-encoded signature.
    signature: String,
}

/// The `Display` impl for `SignedHeader` formats it as an `Authorization` header for an HTTP
/// request.
impl fmt::Display for SignedHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // authorization scheme
        write!(f, "OAuth ")?;

        for (k, v) in &self.params {
            write!(f, "{}=\"{}\", ", k, percent_encode(v))?;
        }

        write!(f, "oauth_signature=\"{}\"", percent_encode(&self.signature))
    }
}

/// Creates a basic `Authorization` header based on the given consumer token.
///
/// The authorization created by this function can only be used with requests to generate or
/// invalidate a bearer token. Using this authorization with any other endpoint will result in an
/// invalid request.
fn bearer_request(con_token: &KeyPair) -> String {
    let text = format!("{}:{}", con_token.key, con_token.secret);
    format!("Basic {}", base64::encode(&text))
}
