// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Methods to inquire about the Twitter service itself.
//!
//! Reached through `client.help()`. These calls work with either user or application-only
//! credentials.

use std::collections::HashMap;

use hyper::Method;
use serde::Deserialize;

use crate::client::Client;
use crate::common::*;
use crate::entities;
use crate::error::Result;
use crate::links;

///The maximum dimensions of one size category of uploaded photos.
pub type PhotoSize = entities::MediaSize;

///Represents a service configuration from Twitter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Configuration {
    ///How many characters an attached media link takes away from a tweet.
    pub characters_reserved_per_media: i32,
    ///The character limit in direct messages.
    pub dm_text_character_limit: i32,
    ///The most media files that can be attached to one tweet.
    pub max_media_per_upload: i32,
    ///A list of URL slugs that are not valid usernames when in a URL like
    ///`https://twitter.com/[slug]`.
    pub non_username_paths: Vec<String>,
    ///The largest photo upload accepted, in bytes.
    pub photo_size_limit: i64,
    ///The maximum photo sizes for received media, keyed by size name (`thumb`, `small`, `medium`,
    ///`large`). If an uploaded photo is above the dimensions for a given size category, it will be
    ///scaled to that size according to the `resize` property on each entry.
    pub photo_sizes: HashMap<String, PhotoSize>,
    ///The maximum length for a t.co URL when given a URL with protocol `http`.
    pub short_url_length: i32,
    ///The maximum length for a t.co URL when given a URL with protocol `https`.
    pub short_url_length_https: i32,
}

///Represents the current rate-limit status of many Twitter API calls.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RateLimitStatus {
    ///Which credentials the limits apply to.
    pub rate_limit_context: RateLimitContext,
    ///The limits, keyed first by resource family (like `statuses`) and then by endpoint path
    ///(like `/statuses/show/:id`).
    pub resources: HashMap<String, HashMap<String, RateLimit>>,
}

impl RateLimitStatus {
    ///Looks up the limit for the given endpoint path, like `/statuses/home_timeline`.
    pub fn get(&self, endpoint: &str) -> Option<&RateLimit> {
        let family = endpoint.trim_start_matches('/').split('/').next()?;
        self.resources.get(family)?.get(endpoint)
    }
}

///The credentials a `RateLimitStatus` was measured against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RateLimitContext {
    ///The access token, for user-signed calls.
    pub access_token: Option<String>,
    ///The consumer key, for application-only calls.
    pub application: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Terms {
    tos: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Privacy {
    privacy: String,
}

///Calls about the service itself. Obtained from `Client::help`.
#[derive(Debug, Clone, Copy)]
pub struct Help<'a> {
    client: &'a Client,
}

impl<'a> Help<'a> {
    pub(crate) fn new(client: &'a Client) -> Help<'a> {
        Help { client }
    }

    ///Return the current configuration from Twitter, including the maximum length of a t.co URL
    ///and maximum photo resolutions per size, among others.
    ///
    ///From Twitter: "It is recommended applications request this endpoint when they are loaded,
    ///but no more than once a day."
    pub async fn configuration(&self) -> Result<Response<Configuration>> {
        self.client
            .call(Method::GET, links::service::CONFIG, &ParamList::new())
            .await
    }

    ///Returns the current Twitter Privacy Policy as plain text.
    pub async fn privacy(&self) -> Result<Response<String>> {
        let resp = self
            .client
            .call::<Privacy>(Method::GET, links::service::PRIVACY, &ParamList::new())
            .await?;
        Ok(Response::map(resp, |p| p.privacy))
    }

    ///Returns the current Twitter Terms of Service as plain text.
    pub async fn tos(&self) -> Result<Response<String>> {
        let resp = self
            .client
            .call::<Terms>(Method::GET, links::service::TERMS, &ParamList::new())
            .await?;
        Ok(Response::map(resp, |t| t.tos))
    }

    ///Return the current rate-limit status for every endpoint, for the credentials the client
    ///uses.
    ///
    ///`resources` narrows the response down to the given families, like `statuses` or `users`.
    pub async fn limits(&self, resources: &[&str]) -> Result<Response<RateLimitStatus>> {
        let families = Some(resources.join(",")).filter(|r| !r.is_empty());
        let params = ParamList::new().add_opt_param("resources", families);

        self.client
            .call(Method::GET, links::service::RATE_LIMIT_STATUS, &params)
            .await
    }
}
