// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Types and functions to authenticate with Twitter.
//!
//! ## Authenticating as a user
//!
//! Calls made on behalf of a user are signed with OAuth 1.0a. That takes two key pairs: the
//! consumer key that identifies your app, and an access token that represents a user's permission
//! for your app to act on their account. The consumer key comes from Twitter's developer portal.
//! The access token comes from a three-step handshake:
//!
//! 1. [`Signer::request_temporary_token`] asks Twitter for a short-lived token tied to your
//!    callback URL (or `"oob"`, for PIN-based authorization).
//! 2. [`TemporaryToken::authorize_url`] gives the URL the user needs to visit to approve your app.
//!    Twitter then hands back a verifier, either through your callback or as a PIN the user types
//!    into your app.
//! 3. [`Signer::exchange_access_token`] trades the temporary token and verifier for the access
//!    token. The `Signer` starts signing with it right away.
//!
//! Access tokens don't expire on their own, so you can save the one handed back in
//! [`AccessGrant`] and load it into a new `Signer` with [`Signer::with_token`] later.
//!
//! ## Authenticating as an app
//!
//! Some calls don't need a user at all. For those, [`bearer_token`] trades your consumer key for
//! an application-only token, which is then sent as-is with each request.
//!
//! [`Signer::request_temporary_token`]: struct.Signer.html#method.request_temporary_token
//! [`TemporaryToken::authorize_url`]: struct.TemporaryToken.html#method.authorize_url
//! [`Signer::exchange_access_token`]: struct.Signer.html#method.exchange_access_token
//! [`AccessGrant`]: struct.AccessGrant.html
//! [`Signer::with_token`]: struct.Signer.html#method.with_token
//! [`bearer_token`]: fn.bearer_token.html

use std::collections::HashMap;
use std::sync::RwLock;

use hyper::{Body, Method, Request};
use serde::Deserialize;
use tracing::debug;

use crate::common::*;
use crate::error::{Error, Result};
use crate::links;
use crate::transport::HttpSend;

pub mod raw;

use raw::RequestBuilder;

/// A key/secret pair representing an OAuth token.
///
/// This struct is used as part of the authentication process. You'll need to manually create at
/// least one of these, to hold onto your consumer token.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    /// A key used to identify an application or user.
    pub key: CowStr,
    /// A private key used to sign messages from an application or user.
    pub secret: CowStr,
}

impl KeyPair {
    /// Creates a KeyPair with the given key and secret.
    ///
    /// This can be called with either `&'static str` (a string literal) or `String`.
    pub fn new<K, S>(key: K, secret: S) -> KeyPair
    where
        K: Into<CowStr>,
        S: Into<CowStr>,
    {
        KeyPair {
            key: key.into(),
            secret: secret.into(),
        }
    }
}

// Secrets stay out of debug output, and therefore out of any logs.
impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("key", &self.key)
            .field("secret", &"<hidden>")
            .finish()
    }
}

/// The application-level settings for signing requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthConfig {
    /// The consumer key identifying the application.
    pub consumer: KeyPair,
    /// The URL Twitter should send users back to after they authorize the application. When this
    /// is `None`, the handshake uses PIN-based authorization (`"oob"`).
    pub callback: Option<String>,
}

impl OAuthConfig {
    /// Creates a config for the given consumer key, using PIN-based authorization.
    pub fn new(consumer: KeyPair) -> OAuthConfig {
        OAuthConfig {
            consumer,
            callback: None,
        }
    }

    /// Sets the callback URL used when requesting a temporary token.
    pub fn with_callback(self, callback: impl Into<String>) -> OAuthConfig {
        OAuthConfig {
            callback: Some(callback.into()),
            ..self
        }
    }

    fn callback_or_oob(&self) -> &str {
        self.callback.as_deref().unwrap_or("oob")
    }
}

/// A temporary token issued by the first step of the handshake.
///
/// This dereferences to its `KeyPair`. It is only good for one call to
/// `Signer::exchange_access_token`, and isn't worth saving past that.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Deref)]
pub struct TemporaryToken(KeyPair);

impl TemporaryToken {
    /// Wraps a key pair received from an earlier temporary-token request.
    pub fn new(key_pair: KeyPair) -> TemporaryToken {
        TemporaryToken(key_pair)
    }

    /// Returns the URL the user should visit to authorize the application.
    pub fn authorize_url(&self) -> String {
        authorize_url(self)
    }
}

/// Returns the URL a user should visit to authorize the given temporary token.
pub fn authorize_url(temp: &TemporaryToken) -> String {
    format!(
        "{}?oauth_token={}",
        links::auth::AUTHORIZE,
        percent_encode(&temp.key)
    )
}

/// The result of a successful access-token exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGrant {
    /// The access token, now held by the `Signer` that performed the exchange.
    pub token: KeyPair,
    /// The numeric ID of the user who authorized the application, if Twitter sent it.
    pub user_id: Option<u64>,
    /// The screen name of the user who authorized the application, if Twitter sent it.
    pub screen_name: Option<String>,
}

/// Signs requests with OAuth 1.0a on behalf of a user, and performs the handshake to get an access
/// token.
///
/// The access token is held behind a lock so that concurrent requests can sign while it is read,
/// and so the exchange at the end of the handshake can swap it in atomically. Each signature gets
/// its own nonce and timestamp, so no other state is shared between requests.
#[derive(Debug)]
pub struct Signer {
    config: OAuthConfig,
    access: RwLock<Option<KeyPair>>,
}

impl Signer {
    /// Creates a `Signer` that has not been authorized yet.
    pub fn new(config: OAuthConfig) -> Signer {
        Signer {
            config,
            access: RwLock::new(None),
        }
    }

    /// Creates a `Signer` with an access token saved from an earlier handshake.
    pub fn with_token(config: OAuthConfig, token: KeyPair) -> Signer {
        Signer {
            config,
            access: RwLock::new(Some(token)),
        }
    }

    /// The application-level settings this `Signer` was created with.
    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    /// Returns the access token currently in use, if there is one.
    pub fn token(&self) -> Option<KeyPair> {
        match self.access.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Replaces the access token used to sign requests.
    pub fn set_token(&self, token: KeyPair) {
        let mut guard = match self.access.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(token);
    }

    /// Returns whether this `Signer` has an access token to sign with.
    pub fn is_authorized(&self) -> bool {
        self.token().is_some()
    }

    /// Signs and assembles the given request with the current access token.
    ///
    /// Fails with `Error::OAuth` if the handshake hasn't been completed.
    pub fn sign(&self, request: RequestBuilder) -> Result<Request<Body>> {
        let token = self
            .token()
            .ok_or_else(|| Error::OAuth("no access token to sign the request with".to_string()))?;
        request.request_keys(&self.config.consumer, Some(&token))
    }

    /// Asks Twitter for a temporary token, the first step of the handshake.
    ///
    /// The request carries the configured callback URL, or `"oob"` if there isn't one. Twitter has
    /// to confirm the callback, or this fails with `Error::OAuth`.
    pub async fn request_temporary_token(&self, http: &dyn HttpSend) -> Result<TemporaryToken> {
        debug!("requesting temporary token");
        let request = RequestBuilder::new(Method::POST, links::auth::REQUEST_TOKEN)
            .oauth_callback(self.config.callback_or_oob())
            .request_keys(&self.config.consumer, None)?;

        let mut reply = send_form(http, request).await?;

        if reply.get("oauth_callback_confirmed").map(String::as_str) != Some("true") {
            return Err(Error::OAuth(
                "temporary token request was not confirmed".to_string(),
            ));
        }

        let key = take_field(&mut reply, "oauth_token")?;
        let secret = take_field(&mut reply, "oauth_token_secret")?;
        debug!("received temporary token");

        Ok(TemporaryToken(KeyPair::new(key, secret)))
    }

    /// Trades an authorized temporary token and its verifier for an access token, the last step
    /// of the handshake.
    ///
    /// On success, the new token replaces whatever this `Signer` held before. Later requests are
    /// signed with it without further setup.
    pub async fn exchange_access_token(
        &self,
        http: &dyn HttpSend,
        temp: &TemporaryToken,
        verifier: &str,
    ) -> Result<AccessGrant> {
        debug!("exchanging temporary token for an access token");
        let request = RequestBuilder::new(Method::POST, links::auth::ACCESS_TOKEN)
            .oauth_verifier(verifier)
            .request_keys(&self.config.consumer, Some(&temp.0))?;

        let mut reply = send_form(http, request).await?;

        let key = take_field(&mut reply, "oauth_token")?;
        let secret = take_field(&mut reply, "oauth_token_secret")?;
        let token = KeyPair::new(key, secret);

        self.set_token(token.clone());
        debug!("access token exchanged");

        Ok(AccessGrant {
            token,
            user_id: reply.get("user_id").and_then(|id| id.parse().ok()),
            screen_name: reply.remove("screen_name"),
        })
    }
}

/// Sends a handshake request and reads its form-encoded reply.
async fn send_form(http: &dyn HttpSend, request: Request<Body>) -> Result<HashMap<String, String>> {
    let body = send_checked(http, request).await?;
    Ok(url::form_urlencoded::parse(&body).into_owned().collect())
}

async fn send_checked(http: &dyn HttpSend, request: Request<Body>) -> Result<hyper::body::Bytes> {
    let resp = http.send(request).await.map_err(Error::Net)?;
    let (status, headers, body) = read_body(resp).await?;
    debug!(status = status.as_u16(), "handshake response received");
    classify_response(status, &headers, body)
}

fn take_field(reply: &mut HashMap<String, String>, name: &str) -> Result<String> {
    match reply.remove(name) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::OAuth(format!("response was missing {}", name))),
    }
}

#[derive(Deserialize)]
struct BearerReply {
    #[serde(default)]
    token_type: String,
    #[serde(default)]
    access_token: String,
}

/// Trades the given consumer key for an application-only bearer token.
///
/// The token can be given to `ClientBuilder::bearer` to make calls that don't act on behalf of a
/// user. Twitter hands back the same token until it's invalidated, so there's no refresh step.
pub async fn bearer_token(http: &dyn HttpSend, consumer: &KeyPair) -> Result<String> {
    debug!("requesting bearer token");
    let params = ParamList::new().add_param("grant_type", "client_credentials");
    let request = RequestBuilder::new(Method::POST, links::auth::BEARER_TOKEN)
        .with_body_params(&params)
        .request_consumer_bearer(consumer)?;

    let body = send_checked(http, request).await?;
    let reply: BearerReply = serde_json::from_slice(&body)?;

    if reply.access_token.is_empty() || !reply.token_type.eq_ignore_ascii_case("bearer") {
        return Err(Error::OAuth("response did not contain a bearer token".to_string()));
    }

    Ok(reply.access_token)
}
