// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Structs and methods for pulling user information from Twitter.
//!
//! ## Types
//!
//! - `UserID`: used as a generic input to many functions, this enum allows you to refer to a user
//!   by a numeric ID or by their screen name.
//! - `User`: returned by most functions in this module, this describes the content of a user's
//!   profile and a handful of settings relating to how it's displayed.
//!
//! ## Functions
//!
//! The calls are grouped behind three handles borrowed from a `Client`:
//!
//! - `client.users()`: `search`, `show`, `lookup`
//! - `client.friends()`: `ids` of the accounts a user follows
//! - `client.followers()`: `ids` of the accounts following a user

use serde::Deserialize;

use crate::common::*;
use crate::tweet::Tweet;

mod fun;

pub use self::fun::*;

/// Convenience enum to generalize between referring to an account by numeric ID or by screen name.
///
/// Many API calls ask for a user either by either screen name (e.g. `rustlang`) or by a numeric ID
/// assigned to the account (e.g. `165262228`). These calls take any type that converts into this
/// enum, which has `From` implementations for the following types:
///
/// * `u64`
/// * `&u64` (convenient when used with iterators)
/// * `&'static str`
/// * `String`
/// * `&String` (to counteract the fact that deref coercion doesn't work with generics)
/// * `&UserID` (convenient when used with iterators)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserID {
    /// Referring via the account's numeric ID.
    ID(u64),
    /// Referring via the account's screen name.
    ScreenName(CowStr),
}

impl From<u64> for UserID {
    fn from(id: u64) -> UserID {
        UserID::ID(id)
    }
}

impl From<&u64> for UserID {
    fn from(id: &u64) -> UserID {
        UserID::ID(*id)
    }
}

impl From<&'static str> for UserID {
    fn from(name: &'static str) -> UserID {
        UserID::ScreenName(name.into())
    }
}

impl From<String> for UserID {
    fn from(name: String) -> UserID {
        UserID::ScreenName(name.into())
    }
}

impl From<&String> for UserID {
    fn from(name: &String) -> UserID {
        UserID::ScreenName(name.clone().into())
    }
}

impl From<&UserID> for UserID {
    fn from(id: &UserID) -> UserID {
        id.clone()
    }
}

/// Represents a Twitter user.
///
/// Field-level documentation is mostly taken from [Twitter's user documentation][api-user].
///
/// [api-user]: https://developer.twitter.com/en/docs/tweets/data-dictionary/overview/user-object
///
/// The `status` field holds the user's most recent tweet, if Twitter included it. That tweet does
/// not carry a copy of the user in turn.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct User {
    /// Indicates this user has an account with "contributor mode" enabled, allowing
    /// for Tweets issued by the user to be co-authored by another account. Rarely `true`.
    pub contributors_enabled: bool,
    /// The UTC timestamp for when this user account was created on Twitter.
    #[serde(deserialize_with = "deserialize_opt_datetime")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    /// The user-defined string describing their account.
    pub description: Option<String>,
    /// The number of tweets this user has liked.
    pub favourites_count: i32,
    /// Indicates whether the authenticated user has issued a follow request to this protected
    /// account.
    pub follow_request_sent: Option<bool>,
    /// Indicates whether the authenticated user follows this account.
    pub following: Option<bool>,
    /// The number of followers this account has.
    pub followers_count: i32,
    /// The number of users this account follows.
    pub friends_count: i32,
    /// Indicates whether this user has enabled their tweets to be geotagged.
    pub geo_enabled: bool,
    /// Unique identifier for this user.
    pub id: u64,
    /// The string representation of `id`.
    pub id_str: String,
    /// Indicates whether the user participates in Twitter's translator community.
    pub is_translator: bool,
    /// The BCP 47 language code the user has selected for their interface.
    pub lang: Option<String>,
    /// The number of public lists the user is a member of.
    pub listed_count: i32,
    /// The user-entered location field from their profile. Not necessarily parseable
    /// or even a location.
    pub location: Option<String>,
    /// The user-entered display name.
    pub name: String,
    /// Indicates whether the authenticated user has opted to receive this user's tweets by SMS.
    pub notifications: Option<bool>,
    /// The hex color chosen by the user for their profile background.
    pub profile_background_color: String,
    /// A URL pointing to the background image chosen by the user for their profile.
    pub profile_background_image_url: Option<String>,
    /// Indicates whether the user's `profile_background_image_url` should be tiled when
    /// displayed.
    pub profile_background_tile: Option<bool>,
    /// A URL pointing to the user's avatar image.
    pub profile_image_url: String,
    /// The hex color chosen by the user to display links in the Twitter UI.
    pub profile_link_color: String,
    /// The hex color chosen by the user to display sidebar borders in the Twitter UI.
    pub profile_sidebar_border_color: String,
    /// The hex color chosen by the user to display sidebar backgrounds in the Twitter UI.
    pub profile_sidebar_fill_color: String,
    /// The hex color chosen by the user to display text in the Twitter UI.
    pub profile_text_color: String,
    /// Indicates whether the user wants their uploaded background image to be used.
    pub profile_use_background_image: bool,
    /// Indicates whether the user is a protected account.
    pub protected: bool,
    /// The screen name or handle identifying this user.
    pub screen_name: String,
    /// Indicates whether the user wants media in tweets shown inline.
    pub show_all_inline_media: Option<bool>,
    /// The user's most recent tweet.
    pub status: Option<Box<Tweet>>,
    /// The number of tweets (including retweets) posted by this user.
    pub statuses_count: i32,
    /// The full name of the time zone the user has set their UI preference to.
    pub time_zone: Option<String>,
    /// A URL provided by the user as part of their profile.
    pub url: Option<String>,
    /// The offset from UTC, in seconds, of the user's selected time zone.
    pub utc_offset: Option<i32>,
    /// Indicates whether this user is a verified account.
    pub verified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::tests::load_file;

    #[test]
    fn roundtrip_user() {
        let content = load_file("sample_payloads/user.json");
        let decoded = decode_lenient::<User>(content.as_bytes()).unwrap();
        let user = decoded.value;

        assert!(decoded.mismatches.is_empty());
        assert_eq!(user.id, 6253282);
        assert_eq!(user.screen_name, "TwitterAPI");
        assert_eq!(user.followers_count, 6133636);
        assert_eq!(
            user.created_at.unwrap().to_rfc3339(),
            "2007-05-23T06:01:13+00:00"
        );
        assert_eq!(user.utc_offset, Some(-25200));

        let status = user.status.unwrap();
        assert_eq!(status.id, 1050118621198921728);
        assert!(status.user.is_none());
    }

    #[test]
    fn user_ids_from_various_types() {
        let owned = String::from("rustlang");
        assert_eq!(UserID::from(165262228u64), UserID::ID(165262228));
        assert_eq!(UserID::from(&owned), UserID::ScreenName("rustlang".into()));
        assert_eq!(UserID::from("rustlang"), UserID::from(owned.clone()));
        assert_eq!(UserID::from(&UserID::ID(1)), UserID::ID(1));
    }
}
