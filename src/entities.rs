// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Data structures containing extracted URL, mention, tag, and media information.
//!
//! These structures are meant to be received in an API call to describe the data they accompany.
//! For example, a `UrlEntity` describes a hyperlink in a tweet or user description text, and a
//! `HashtagEntity` describes a hashtag extracted from a tweet.
//!
//! ## Entity Ranges
//!
//! Entities that refer to elements within a text have a `range` field that contains the text span
//! that is being referenced. Twitter gives these as character offsets, so convert them before
//! slicing into a Rust string if the text contains anything outside ASCII:
//!
//! ```rust
//! # use tweetwire::entities::HashtagEntity;
//! # let entity = HashtagEntity { range: (0, 5), text: "rust".to_string() };
//! let text = "#rust is fun";
//! let tag = text
//!     .chars()
//!     .skip(entity.range.0)
//!     .take(entity.range.1 - entity.range.0)
//!     .collect::<String>();
//! assert_eq!(tag, "#rust");
//! ```
//!
//! ### Shortened, Display, and Expanded URLs
//!
//! URL and Media entities contain references to a URL within their parent text. Each of them
//! carries three URLs:
//!
//! - `url`: This is the `t.co` shortened URL as returned directly from twitter. This is what
//!   contributes to character count in tweets and user bios.
//! - `expanded_url`: This is the original URL the user entered in their tweet.
//! - `display_url`: This is a truncated version of `expanded_url`, meant to be displayed inline
//!   with the parent text.

use serde::Deserialize;

/// Represents a hashtag extracted from another piece of text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HashtagEntity {
    /// The character offsets where the hashtag is located. The first index is the location of the
    /// # character; the second is the location of the first character following the hashtag.
    #[serde(rename = "indices")]
    pub range: (usize, usize),
    /// The text of the hashtag, without the leading # character.
    pub text: String,
}

/// Represents a link extracted from another piece of text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UrlEntity {
    /// A truncated URL meant to be displayed inline with the text.
    pub display_url: String,
    /// The URL that the t.co URL resolves to.
    pub expanded_url: String,
    /// The character offsets in the companion text where the URL was extracted from.
    #[serde(rename = "indices")]
    pub range: (usize, usize),
    /// The t.co URL extracted from the companion text.
    pub url: String,
}

/// Represents a user mention extracted from another piece of text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MentionEntity {
    /// Numeric ID of the mentioned user.
    pub id: u64,
    /// The character offsets where the user mention is located in the original text. The first
    /// index is the location of the @ symbol; the second is the location of the first character
    /// following the user screen name.
    #[serde(rename = "indices")]
    pub range: (usize, usize),
    /// Display name of the mentioned user.
    pub name: String,
    /// Screen name of the mentioned user, without the leading @ symbol.
    pub screen_name: String,
}

/// Represents a piece of media attached to a tweet.
///
/// Image links available in `media_url` and `media_url_https` can be obtained in different sizes by
/// appending a colon and one of the available sizes in the `MediaSizes` struct. For example, the
/// cropped thumbnail can be viewed by appending `:thumb` to the end of the URL.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MediaEntity {
    /// A shortened URL to display to clients.
    pub display_url: String,
    /// An expanded version of `display_url`; links to the media display page.
    pub expanded_url: String,
    /// A numeric ID for the media.
    pub id: u64,
    /// The character offsets where the media URL is located.
    #[serde(rename = "indices")]
    pub range: (usize, usize),
    /// A URL pointing directly to the media file. Uses HTTP as the protocol.
    pub media_url: String,
    /// A URL pointing directly to the media file. Uses HTTPS as the protocol.
    pub media_url_https: String,
    /// Various sizes available for the media file.
    pub sizes: MediaSizes,
    /// For tweets containing media that was originally associated with a different tweet, this
    /// contains the ID of the original tweet.
    pub source_status_id: Option<u64>,
    /// The type of media being represented.
    #[serde(rename = "type")]
    pub media_type: MediaType,
    /// The t.co link from the original text.
    pub url: String,
}

/// Represents the types of media that can be attached to a tweet.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
pub enum MediaType {
    /// A static image.
    #[serde(rename = "photo")]
    Photo,
    /// A video.
    #[serde(rename = "video")]
    Video,
    /// An animated GIF, delivered as a video without audio.
    #[serde(rename = "animated_gif")]
    Gif,
}

impl Default for MediaType {
    fn default() -> Self {
        MediaType::Photo
    }
}

/// Represents the available sizes for a media file.
#[derive(Debug, Copy, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MediaSizes {
    /// Information for a thumbnail-sized version of the media.
    pub thumb: MediaSize,
    /// Information for a small-sized version of the media.
    pub small: MediaSize,
    /// Information for a medium-sized version of the media.
    pub medium: MediaSize,
    /// Information for a large-sized version of the media.
    pub large: MediaSize,
}

/// Represents how an image has been resized for a given size variant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
pub enum ResizeMode {
    /// The media was resized to fit one dimension, keeping its aspect ratio.
    #[serde(rename = "fit")]
    Fit,
    /// The media was cropped to fit a specific resolution.
    #[serde(rename = "crop")]
    Crop,
}

impl Default for ResizeMode {
    fn default() -> Self {
        ResizeMode::Fit
    }
}

/// Represents the dimensions of a media file.
#[derive(Debug, Copy, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MediaSize {
    /// The size variant's width in pixels.
    pub w: i32,
    /// The size variant's height in pixels.
    pub h: i32,
    /// The method used to obtain the given dimensions.
    pub resize: ResizeMode,
}
