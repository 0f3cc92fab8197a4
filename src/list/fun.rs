// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use hyper::Method;

use crate::client::Client;
use crate::common::*;
use crate::error::Result;
use crate::links;
use crate::user::UserID;

use super::*;

/// List calls. Obtained from `Client::lists`.
#[derive(Debug, Clone, Copy)]
pub struct Lists<'a> {
    client: &'a Client,
}

impl<'a> Lists<'a> {
    pub(crate) fn new(client: &'a Client) -> Lists<'a> {
        Lists { client }
    }

    /// Returns all lists the given user subscribes to, including those they own.
    ///
    /// Up to 100 lists are returned. When the user has more than that, lists they own come first
    /// unless `owned_first` is `Some(false)`, in which case their subscriptions are given
    /// priority.
    pub async fn list(&self, acct: impl Into<UserID>, owned_first: Option<bool>) -> Result<Response<Vec<List>>> {
        let params = ParamList::new()
            .add_user_param(acct.into())
            .add_opt_param("reverse", owned_first.map(|owned| !owned));

        self.client
            .call(Method::GET, links::lists::LIST, &params)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::tests::{mock_client, MockHttp};

    #[tokio::test]
    async fn lists_for_user() {
        let http = MockHttp::reply(
            200,
            r#"[{
                "id": 574,
                "id_str": "574",
                "name": "team",
                "slug": "team",
                "full_name": "@twitterapi/team",
                "mode": "public",
                "member_count": 11,
                "subscriber_count": 998,
                "created_at": "Wed Nov 04 01:24:28 +0000 2009",
                "user": {"id": 6253282, "screen_name": "twitterapi"}
            }]"#,
        );
        let client = mock_client(&http);

        let lists = client.lists().list("twitterapi", Some(false)).await.unwrap();

        assert!(lists.is_complete());
        assert_eq!(lists[0].full_name, "@twitterapi/team");
        assert_eq!(lists[0].member_count, 11);
        assert_eq!(lists[0].user.as_ref().unwrap().id, 6253282);
        assert_eq!(
            http.requests()[0].uri,
            "http://mock.test/1.1/lists/list.json?reverse=true&screen_name=twitterapi"
        );
    }
}
