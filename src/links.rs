// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! URLs and endpoint paths used across the crate.
//!
//! The OAuth endpoints are absolute and fixed. Everything else is relative to the client's base
//! URL, without the `.json` suffix the client adds when dispatching.

pub const API_BASE: &str = "https://api.twitter.com/1.1";

pub mod auth {
    pub const REQUEST_TOKEN: &str = "https://api.twitter.com/oauth/request_token";
    pub const ACCESS_TOKEN: &str = "https://api.twitter.com/oauth/access_token";
    pub const AUTHORIZE: &str = "https://api.twitter.com/oauth/authorize";
    pub const BEARER_TOKEN: &str = "https://api.twitter.com/oauth2/token";
}

pub mod statuses {
    pub const SHOW: &str = "statuses/show";
    pub const RETWEETS_STEM: &str = "statuses/retweets";
    pub const HOME_TIMELINE: &str = "statuses/home_timeline";
    pub const MENTIONS_TIMELINE: &str = "statuses/mentions_timeline";
    pub const USER_TIMELINE: &str = "statuses/user_timeline";
    pub const RETWEETS_OF_ME: &str = "statuses/retweets_of_me";
    pub const RETWEET_STEM: &str = "statuses/retweet";
    pub const UPDATE: &str = "statuses/update";
    pub const UPDATE_WITH_MEDIA: &str = "statuses/update_with_media";
    pub const DELETE_STEM: &str = "statuses/destroy";
    pub const SEARCH: &str = "search/tweets";
}

pub mod users {
    pub const LOOKUP: &str = "users/lookup";
    pub const SHOW: &str = "users/show";
    pub const SEARCH: &str = "users/search";
    pub const FRIENDS_IDS: &str = "friends/ids";
    pub const FOLLOWERS_IDS: &str = "followers/ids";
}

pub mod lists {
    pub const LIST: &str = "lists/list";
}

pub mod direct {
    pub const SHOW: &str = "direct_messages/show";
    pub const RECEIVED: &str = "direct_messages";
    pub const SENT: &str = "direct_messages/sent";
    pub const SEND: &str = "direct_messages/new";
    pub const DELETE: &str = "direct_messages/destroy";
}

pub mod account {
    pub const SETTINGS: &str = "account/settings";
    pub const VERIFY_CREDENTIALS: &str = "account/verify_credentials";
    pub const UPDATE_DELIVERY_DEVICE: &str = "account/update_delivery_device";
    pub const UPDATE_PROFILE: &str = "account/update_profile";
    pub const UPDATE_PROFILE_BACKGROUND_IMAGE: &str = "account/update_profile_background_image";
    pub const UPDATE_PROFILE_COLORS: &str = "account/update_profile_colors";
    pub const UPDATE_PROFILE_IMAGE: &str = "account/update_profile_image";
}

pub mod service {
    pub const TERMS: &str = "help/tos";
    pub const PRIVACY: &str = "help/privacy";
    pub const CONFIG: &str = "help/configuration";
    pub const RATE_LIMIT_STATUS: &str = "application/rate_limit_status";
}
