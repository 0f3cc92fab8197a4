// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Structs and methods for searching for tweets.
//!
//! Since there are several optional parameters for searches, they're collected in a
//! `SearchOptions` built up with a builder pattern. Hand it to `client.search().tweets` along
//! with the search term to load the first page of results.
//!
//! ```rust,no_run
//! # async fn doc(client: tweetwire::Client) -> tweetwire::error::Result<()> {
//! use tweetwire::search::{ResultType, SearchOptions};
//!
//! let opts = SearchOptions::default().result_type(ResultType::Recent);
//! let search = client.search().tweets("rustlang", &opts).await?;
//!
//! for tweet in &search.statuses {
//!     println!("(@{}) {}", tweet.user.as_ref().unwrap().screen_name, tweet.text);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The search parameter given in the initial call has several options itself. A full reference is
//! available in [Twitter's Search API documentation][search-doc].
//!
//! [search-doc]: https://developer.twitter.com/en/docs/tweets/search/api-reference/get-search-tweets

use std::fmt;

use hyper::Method;
use serde::Deserialize;

use crate::client::Client;
use crate::common::*;
use crate::error::Result;
use crate::links;
use crate::tweet::Tweet;

///Represents what kind of tweets should be included in search results.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResultType {
    ///Return only the most recent tweets in the response.
    Recent,
    ///Return only the most popular tweets in the response.
    Popular,
    ///Include both popular and real-time results in the response.
    Mixed,
}

///Display impl that turns the variants into strings that can be used as search parameters.
impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ResultType::Recent => write!(f, "recent"),
            ResultType::Popular => write!(f, "popular"),
            ResultType::Mixed => write!(f, "mixed"),
        }
    }
}

///Represents a radius around a given location to return search results for.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Distance {
    ///A radius given in miles.
    Miles(f32),
    ///A radius given in kilometers.
    Kilometers(f32),
}

///Optional parameters for a tweet search.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    lang: Option<String>,
    result_type: Option<ResultType>,
    count: Option<u32>,
    until: Option<chrono::NaiveDate>,
    geocode: Option<(f32, f32, Distance)>,
    since_id: Option<u64>,
    max_id: Option<u64>,
}

impl SearchOptions {
    ///Restrict search results to those that have been machine-parsed as the given two-letter
    ///language code.
    pub fn lang(self, lang: impl Into<String>) -> Self {
        SearchOptions {
            lang: Some(lang.into()),
            ..self
        }
    }

    ///Specify the type of search results to include. The default is `Mixed`.
    pub fn result_type(self, result_type: ResultType) -> Self {
        SearchOptions {
            result_type: Some(result_type),
            ..self
        }
    }

    ///Set the number of tweets to return per-page, up to a maximum of 100. The default is 15.
    pub fn count(self, count: u32) -> Self {
        SearchOptions {
            count: Some(count),
            ..self
        }
    }

    ///Returns tweets created before the given date. Keep in mind that search is limited to the
    ///last 7 days of results, so giving a date here that's older than a week will return no
    ///results.
    pub fn until(self, date: chrono::NaiveDate) -> Self {
        SearchOptions {
            until: Some(date),
            ..self
        }
    }

    ///Restricts results to users located within the given radius of the given coordinate. This is
    ///preferably populated from location-tagged tweets, but can be filled in from the user's
    ///profile as a fallback.
    pub fn geocode(self, latitude: f32, longitude: f32, radius: Distance) -> Self {
        SearchOptions {
            geocode: Some((latitude, longitude, radius)),
            ..self
        }
    }

    ///Restricts results to those with higher IDs than (i.e. that were posted after) the given
    ///tweet ID.
    pub fn since_tweet(self, since_id: u64) -> Self {
        SearchOptions {
            since_id: Some(since_id),
            ..self
        }
    }

    ///Restricts results to those with IDs no higher than (i.e. were posted earlier than) the given
    ///tweet ID. Will include the given tweet in search results.
    pub fn max_tweet(self, max_id: u64) -> Self {
        SearchOptions {
            max_id: Some(max_id),
            ..self
        }
    }

    fn add_to(&self, params: ParamList) -> ParamList {
        let geocode = self.geocode.map(|(lat, lon, radius)| match radius {
            Distance::Miles(r) => format!("{:.6},{:.6},{}mi", lat, lon, r),
            Distance::Kilometers(r) => format!("{:.6},{:.6},{}km", lat, lon, r),
        });

        params
            .add_opt_param("lang", self.lang.clone())
            .add_opt_param("result_type", self.result_type.map_string())
            .add_opt_param("count", self.count)
            .add_opt_param("until", self.until.map_string())
            .add_opt_param("geocode", geocode)
            .add_opt_param("since_id", self.since_id)
            .add_opt_param("max_id", self.max_id)
    }
}

///Represents a page of search results, along with metadata to request the next page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchResults {
    ///The list of statuses in this page of results.
    pub statuses: Vec<Tweet>,
    ///Information about the search that produced this page.
    pub search_metadata: SearchMetadata,
}

///Describes the search that produced a page of `SearchResults`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchMetadata {
    ///How long the search took, in seconds.
    pub completed_in: f64,
    ///The number of tweets requested per page.
    pub count: u32,
    ///Highest tweet ID in this page of results.
    pub max_id: u64,
    ///String representation of `max_id`.
    pub max_id_str: String,
    ///Query string that loads the page before this one, if there is one.
    pub next_results: Option<String>,
    ///The query, as Twitter understood it.
    pub query: String,
    ///Query string that loads tweets newer than this page.
    pub refresh_url: Option<String>,
    ///The `since_id` the search was restricted with, or 0.
    pub since_id: u64,
    ///String representation of `since_id`.
    pub since_id_str: String,
}

///Tweet search calls. Obtained from `Client::search`.
#[derive(Debug, Clone, Copy)]
pub struct Search<'a> {
    client: &'a Client,
}

impl<'a> Search<'a> {
    pub(crate) fn new(client: &'a Client) -> Search<'a> {
        Search { client }
    }

    ///Searches recent tweets for the given query, and returns the first page of results.
    pub async fn tweets(
        &self,
        query: impl Into<CowStr>,
        opts: &SearchOptions,
    ) -> Result<Response<SearchResults>> {
        let params = opts.add_to(ParamList::new().add_param("q", query.into()));

        self.client
            .call(Method::GET, links::statuses::SEARCH, &params)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::tests::{load_file, mock_client, MockHttp};

    #[tokio::test]
    async fn search_with_options() {
        let http = MockHttp::reply(200, &load_file("sample_payloads/search.json"));
        let client = mock_client(&http);
        let opts = SearchOptions::default()
            .result_type(ResultType::Recent)
            .count(2)
            .until(chrono::NaiveDate::from_ymd_opt(2018, 10, 11).unwrap());

        let results = client.search().tweets("#rust", &opts).await.unwrap();

        assert!(results.is_complete(), "{:?}", results.mismatches);
        assert_eq!(results.statuses.len(), 2);
        assert_eq!(results.search_metadata.max_id, 1050118621198921728);
        assert_eq!(
            http.requests()[0].uri,
            "http://mock.test/1.1/search/tweets.json?count=2&q=%23rust&result_type=recent&until=2018-10-11"
        );
    }

    #[test]
    fn geocode_param() {
        let params = SearchOptions::default()
            .geocode(37.5, -122.25, Distance::Miles(1.0))
            .add_to(ParamList::new());

        assert_eq!(params.get("geocode"), Some("37.500000,-122.250000,1mi"));
    }
}
