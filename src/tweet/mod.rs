// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Structs and functions for working with statuses and timelines.
//!
//! In this module, you can find various structs and methods to load and interact with tweets and
//! their metadata. This also includes loading a user's timeline, posting a new tweet, or
//! retweeting another tweet. However, this does *not* include searching for tweets; that
//! functionality is in the [`search`][] module.
//!
//! [`search`]: ../search/index.html
//!
//! ## Types
//!
//! - `Tweet`/`TweetEntities`: At the bottom of it all, this is the struct that represents a
//!   single tweet. `TweetEntities` contains information about media, links, and hashtags within
//!   its parent tweet.
//! - `TimelineOptions`/`UpdateOptions`: the optional parameters for loading timelines and posting
//!   tweets.
//! - `TweetMedia`: a file to attach with `update_with_media`.
//!
//! ## Functions
//!
//! Everything here is reached through `client.tweets()`:
//!
//! - `home_timeline`/`mentions`/`retweets_of_me`/`user_timeline`
//! - `show`/`retweets`
//! - `update`/`update_with_media`
//! - `retweet`/`destroy`

use serde::Deserialize;

use crate::common::*;
use crate::entities;
use crate::user::User;

mod fun;

pub use self::fun::*;

///Represents a single status update.
///
///The fields present in this struct can be mainly split up based on the context they're present
///for.
///
///## Base Tweet Info
///
///This information is the basic information inherent to all tweets, regardless of context.
///
///* `text`
///* `id`/`id_str`
///* `created_at`
///* `user`
///* `source`
///* `favorite_count`/`retweet_count`
///* `truncated`
///* `coordinates`/`place`
///
///## Perspective-based data
///
///This information depends on the authenticated user who is viewing this tweet.
///
///* `favorited`
///* `retweeted`
///
///## Replies
///
///This information is only present when the tweet in question is marked as being a reply to
///another tweet, or when it's threaded into a chain from the same user.
///
///* `in_reply_to_user_id`/`in_reply_to_screen_name`
///* `in_reply_to_status_id`
///
///## Retweets
///
///* `retweeted_status`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Tweet {
    ///If the user has contributors enabled, contains the IDs of the accounts that contributed to
    ///this tweet.
    pub contributors: Option<Vec<Contributor>>,
    ///If present, the location coordinate attached to the tweet.
    pub coordinates: Option<Coordinates>,
    ///UTC timestamp from when the tweet was posted.
    #[serde(deserialize_with = "deserialize_opt_datetime")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    ///Link, hashtag, and user mention information extracted from the tweet text.
    pub entities: TweetEntities,
    ///"Approximately" how many times this tweet has been liked by users.
    pub favorite_count: i32,
    ///Indicates whether the authenticated user has liked this tweet.
    pub favorited: Option<bool>,
    ///Numeric ID for this tweet.
    pub id: u64,
    ///String representation of `id`.
    pub id_str: String,
    ///If the tweet is a reply, contains the ID of the user that was replied to.
    pub in_reply_to_user_id: Option<u64>,
    ///If the tweet is a reply, contains the screen name of the user that was replied to.
    pub in_reply_to_screen_name: Option<String>,
    ///If the tweet is a reply, contains the ID of the tweet that was replied to.
    pub in_reply_to_status_id: Option<u64>,
    ///Can contain a language ID indicating the machine-detected language of the text, or "und" if
    ///no language could be detected.
    pub lang: Option<String>,
    ///When present, the place this tweet is associated with (but not necessarily where it
    ///originated from), as Twitter sent it.
    pub place: Option<serde_json::Value>,
    ///If the tweet has a link, indicates whether the link may contain content that could be
    ///identified as sensitive.
    pub possibly_sensitive: Option<bool>,
    ///The number of times this tweet has been retweeted (with native retweets).
    pub retweet_count: i32,
    ///Indicates whether the authenticated user has retweeted this tweet.
    pub retweeted: Option<bool>,
    ///If this tweet is a retweet, then this field contains the original status information.
    pub retweeted_status: Option<Box<Tweet>>,
    ///The application used to post the tweet, as an HTML link.
    pub source: String,
    ///The text of the tweet.
    pub text: String,
    ///Indicates whether the text was cut short to fit the character limit.
    pub truncated: bool,
    ///The user who posted this tweet. This field will be absent on tweets included as part of a
    ///`User`.
    pub user: Option<Box<User>>,
}

///An account that co-authored a tweet.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Contributor {
    ///Numeric ID of the contributing account.
    pub id: u64,
    ///Screen name of the contributing account.
    pub screen_name: String,
}

///A point attached to a tweet.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Coordinates {
    ///The point, as a (longitude, latitude) pair. Note the order: this is GeoJSON.
    pub coordinates: (f64, f64),
    ///The kind of geometry. Always `Point` at the time of writing.
    #[serde(rename = "type")]
    pub kind: String,
}

///Container for URL, hashtag, mention, and media information associated with a tweet.
///
///If a tweet has no hashtags, URLs, or mentions, the corresponding `Vec` will be empty. `media`
///is only present when something is attached.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TweetEntities {
    ///Collection of hashtags parsed from the tweet.
    pub hashtags: Vec<entities::HashtagEntity>,
    ///Collection of financial symbols, or "cashtags", parsed from the tweet.
    pub symbols: Vec<entities::HashtagEntity>,
    ///Collection of URLs parsed from the tweet.
    pub urls: Vec<entities::UrlEntity>,
    ///Collection of user mentions parsed from the tweet.
    pub user_mentions: Vec<entities::MentionEntity>,
    ///If the tweet contains any attached media, this contains a collection of media information
    ///from the tweet.
    pub media: Option<Vec<entities::MediaEntity>>,
}

///A file to attach to a new tweet with `update_with_media`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TweetMedia {
    ///The file name sent along with the data.
    pub filename: String,
    ///The raw file contents.
    pub data: Vec<u8>,
}

impl TweetMedia {
    ///Creates a new attachment with the given file name and contents.
    pub fn new(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> TweetMedia {
        TweetMedia {
            filename: filename.into(),
            data: data.into(),
        }
    }
}
