// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Structs and methods for working with direct messages.
//!
//! Note that direct message access requires a special permissions level above regular read/write
//! access. Your app must be configured to have "read, write, and direct message" access to use any
//! function in this module, even the read-only ones.
//!
//! Everything here is reached through `client.direct()`: `list` and `sent` load the received and
//! sent messages, `show` loads one, `send` writes a new one, and `destroy` deletes one.

use serde::Deserialize;

use crate::common::*;
use crate::tweet::TweetEntities;
use crate::user::User;

mod fun;

pub use self::fun::*;

/// Represents a single direct message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DirectMessage {
    /// Numeric ID for this DM.
    pub id: u64,
    /// String representation of `id`.
    pub id_str: String,
    /// UTC timestamp from when this DM was created.
    #[serde(deserialize_with = "deserialize_opt_datetime")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    /// The text of the DM.
    pub text: String,
    /// Link, hashtag, and user mention information parsed out of the DM.
    pub entities: TweetEntities,
    /// The user who sent the DM.
    pub sender: Option<Box<User>>,
    /// The ID of the user who sent the DM.
    pub sender_id: u64,
    /// The screen name of the user who sent the DM.
    pub sender_screen_name: String,
    /// The user who received the DM.
    pub recipient: Option<Box<User>>,
    /// The ID of the user who received the DM.
    pub recipient_id: u64,
    /// The screen name of the user who received the DM.
    pub recipient_screen_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::tests::load_file;

    #[test]
    fn parse_message() {
        let content = load_file("sample_payloads/direct_message.json");
        let decoded = decode_lenient::<DirectMessage>(content.as_bytes()).unwrap();
        let dm = decoded.value;

        assert!(decoded.mismatches.is_empty(), "{:?}", decoded.mismatches);
        assert_eq!(dm.id, 240136858829479936);
        assert_eq!(dm.text, "booyakasha");
        assert_eq!(dm.sender_screen_name, "theSeanCook");
        assert_eq!(dm.recipient_id, 13);
        assert_eq!(dm.sender.unwrap().id, dm.sender_id);
        assert_eq!(
            dm.created_at.unwrap().to_rfc3339(),
            "2012-08-27T17:16:39+00:00"
        );
    }
}
