// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Structs and functions for working with lists.
//!
//! A list is a curated group of accounts whose tweets can be read as a single timeline. The only
//! call here, `client.lists().list(user)`, loads the lists a user owns or subscribes to.

use serde::Deserialize;

use crate::common::*;
use crate::user::User;

mod fun;

pub use self::fun::*;

/// Represents the metadata for a list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct List {
    /// The name of the list.
    pub name: String,
    /// The user who created the list.
    pub user: Option<Box<User>>,
    /// The "slug" of a list, that can be combined with its creator's `UserID` to refer to the
    /// list.
    pub slug: String,
    /// The numeric ID of the list.
    pub id: u64,
    /// String representation of `id`.
    pub id_str: String,
    /// The number of accounts "subscribed" to the list, for whom it will appear in their
    /// collection of available lists.
    pub subscriber_count: u64,
    /// The number of accounts added to the list.
    pub member_count: u64,
    /// The full name of the list, preceded by `@`. This is the same as the list's URL path,
    /// e.g. `@twitterapi/team`.
    pub full_name: String,
    /// The description of the list, as entered by its creator.
    pub description: String,
    /// The full name of the list, preceded by `@`, without the user's profile URL.
    pub uri: String,
    /// Either `public` or `private`.
    pub mode: String,
    /// Whether the authenticated user follows this list.
    pub following: bool,
    /// UTC timestamp of when the list was created.
    #[serde(deserialize_with = "deserialize_opt_datetime")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}
