// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A client for the Twitter REST API v1.1.
//!
//! Every call goes through a [`Client`], which owns the base URL, the credentials, and the HTTP
//! transport. Calls made on behalf of a user are signed with OAuth 1.0a by a [`Signer`]; calls
//! made as an app carry a bearer token instead. See the [`auth`] module for how to obtain either.
//!
//! ```rust,no_run
//! # async fn doc() -> tweetwire::error::Result<()> {
//! use std::sync::Arc;
//! use tweetwire::tweet::TimelineOptions;
//! use tweetwire::{Client, KeyPair, OAuthConfig, Signer};
//!
//! let config = OAuthConfig::new(KeyPair::new("consumer key", "consumer secret"));
//! let signer = Signer::with_token(config, KeyPair::new("access token", "access secret"));
//! let client = Client::builder().signer(Arc::new(signer)).build();
//!
//! let home = client
//!     .tweets()
//!     .home_timeline(&TimelineOptions::default().count(10))
//!     .await?;
//! for tweet in home.iter() {
//!     println!("{}", tweet.text);
//! }
//! println!("{} calls left", home.rate_limit_status.remaining);
//! # Ok(())
//! # }
//! ```
//!
//! The calls are grouped by resource, each group borrowed from the client: `tweets()`,
//! `search()`, `direct()`, `users()`, `friends()`, `followers()`, `lists()`, `account()` and
//! `help()`. Endpoints without a wrapper can be called through [`Client::call`] with a
//! [`ParamList`], and the lower-level pieces are collected in the [`raw`] module.
//!
//! Every call hands back a [`Response`], which dereferences to the decoded value and also carries
//! the rate-limit headers. Twitter doesn't always send the JSON types it documents, so fields
//! that don't match are skipped rather than failing the call; they're listed in
//! `Response::mismatches`.
//!
//! Diagnostics are emitted through `tracing`. Nothing is printed unless the application installs
//! a subscriber.
//!
//! [`Client`]: client/struct.Client.html
//! [`Client::call`]: client/struct.Client.html#method.call
//! [`Signer`]: auth/struct.Signer.html
//! [`auth`]: auth/index.html
//! [`ParamList`]: common/struct.ParamList.html
//! [`raw`]: raw/index.html
//! [`Response`]: common/struct.Response.html

pub mod account;
pub mod auth;
pub mod client;
pub mod common;
pub mod cursor;
pub mod direct;
pub mod entities;
pub mod error;
mod links;
pub mod list;
pub mod raw;
pub mod search;
pub mod service;
pub mod transport;
pub mod tweet;
pub mod user;

pub use crate::auth::{bearer_token, AccessGrant, KeyPair, OAuthConfig, Signer, TemporaryToken};
pub use crate::client::{Client, ClientBuilder};
pub use crate::common::{FieldMismatch, ParamList, RateLimit, Response};
pub use crate::transport::{Credentials, HttpSend, HyperClient};
