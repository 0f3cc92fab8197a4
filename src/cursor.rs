// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Types for cursored collections.
//!
//! Twitter hands back long collections one page at a time, along with numeric references to the
//! pages on either side. Calls that return a page take the `next_cursor` of the previous page to
//! continue; `-1` asks for the first page, and a `next_cursor` of `0` means there are no more.

use serde::Deserialize;

///Represents a single-page view into a list of user IDs.
///
///Returned by the `ids` calls on `client.friends()` and `client.followers()`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct IDCursor {
    ///Numeric reference to the previous page of results.
    pub previous_cursor: i64,
    ///String representation of `previous_cursor`.
    pub previous_cursor_str: String,
    ///Numeric reference to the next page of results.
    pub next_cursor: i64,
    ///String representation of `next_cursor`.
    pub next_cursor_str: String,
    ///The list of user IDs in this page of results.
    pub ids: Vec<u64>,
}

impl IDCursor {
    /// Whether there's another page after this one.
    pub fn has_next(&self) -> bool {
        self.next_cursor != 0
    }
}
