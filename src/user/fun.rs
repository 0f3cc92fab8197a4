// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use hyper::Method;

use crate::client::Client;
use crate::common::*;
use crate::cursor::IDCursor;
use crate::error::{Error, Result};
use crate::links;

use super::*;

/// The most accounts `Users::lookup` accepts in one call.
pub const MAX_LOOKUP: usize = 100;

/// Optional parameters for `Users::search`.
#[derive(Debug, Clone, Default)]
pub struct UserSearchOptions {
    /// Which page of results to return, starting at 1.
    pub page: Option<u32>,
    /// How many users to return per page, up to 20.
    pub count: Option<u32>,
    /// Whether to include the `entities` node in each user.
    pub include_entities: Option<bool>,
}

impl UserSearchOptions {
    /// Sets the page of results to return.
    pub fn page(self, page: u32) -> Self {
        UserSearchOptions {
            page: Some(page),
            ..self
        }
    }

    /// Sets the number of users to return per page.
    pub fn count(self, count: u32) -> Self {
        UserSearchOptions {
            count: Some(count),
            ..self
        }
    }

    /// Sets whether to include the `entities` node.
    pub fn include_entities(self, include: bool) -> Self {
        UserSearchOptions {
            include_entities: Some(include),
            ..self
        }
    }

    fn add_to(&self, params: ParamList) -> ParamList {
        params
            .add_opt_param("page", self.page)
            .add_opt_param("count", self.count)
            .add_opt_param("include_entities", self.include_entities)
    }
}

/// User lookup calls. Obtained from `Client::users`.
#[derive(Debug, Clone, Copy)]
pub struct Users<'a> {
    client: &'a Client,
}

impl<'a> Users<'a> {
    pub(crate) fn new(client: &'a Client) -> Users<'a> {
        Users { client }
    }

    /// Searches for public accounts matching the given query, in the order Twitter ranks them.
    pub async fn search(
        &self,
        query: impl Into<CowStr>,
        opts: &UserSearchOptions,
    ) -> Result<Response<Vec<User>>> {
        let params = opts.add_to(ParamList::new().add_param("q", query.into()));

        self.client
            .call(Method::GET, links::users::SEARCH, &params)
            .await
    }

    /// Lookup user information for a single user.
    pub async fn show(&self, acct: impl Into<UserID>) -> Result<Response<User>> {
        let params = ParamList::new().add_user_param(acct.into());

        self.client.call(Method::GET, links::users::SHOW, &params).await
    }

    /// Look up profile information for several Twitter users.
    ///
    /// This function is set up so it can be called with a few different Item types; whether just
    /// IDs with `u64`, just screen names with `&str` or `String`, or even a mix of both (by using
    /// `UserID` directly).
    ///
    /// Between 1 and `MAX_LOOKUP` accounts can be given. Anything else fails with
    /// `Error::InvalidArgument` without calling Twitter.
    ///
    /// ```rust,no_run
    /// # async fn doc(client: tweetwire::Client) -> tweetwire::error::Result<()> {
    /// use tweetwire::user::UserID;
    ///
    /// let list: Vec<UserID> = vec![1234u64.into(), "rustlang".into()];
    /// let users = client.users().lookup(list).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn lookup<T, I>(&self, accts: I) -> Result<Response<Vec<User>>>
    where
        T: Into<UserID>,
        I: IntoIterator<Item = T>,
    {
        let accts = accts.into_iter().map(Into::into).collect::<Vec<UserID>>();
        if accts.is_empty() || accts.len() > MAX_LOOKUP {
            return Err(Error::InvalidArgument(format!(
                "users/lookup takes between 1 and {} accounts, got {}",
                MAX_LOOKUP,
                accts.len()
            )));
        }

        let (id_param, name_param) = multiple_names_param(accts);
        let params = ParamList::new()
            .add_opt_param("user_id", Some(id_param).filter(|p| !p.is_empty()))
            .add_opt_param("screen_name", Some(name_param).filter(|p| !p.is_empty()));

        self.client.call(Method::POST, links::users::LOOKUP, &params).await
    }
}

async fn ids_page(
    client: &Client,
    endpoint: &str,
    acct: UserID,
    cursor: Option<i64>,
) -> Result<Response<IDCursor>> {
    let params = ParamList::new()
        .add_user_param(acct)
        .add_opt_param("cursor", cursor);

    client.call(Method::GET, endpoint, &params).await
}

/// Calls about the accounts a user follows. Obtained from `Client::friends`.
#[derive(Debug, Clone, Copy)]
pub struct Friends<'a> {
    client: &'a Client,
}

impl<'a> Friends<'a> {
    pub(crate) fn new(client: &'a Client) -> Friends<'a> {
        Friends { client }
    }

    /// Returns one page of IDs of the accounts the given user follows.
    ///
    /// Pass `None` or `Some(-1)` for the first page, and the previous page's `next_cursor` after
    /// that.
    pub async fn ids(&self, acct: impl Into<UserID>, cursor: Option<i64>) -> Result<Response<IDCursor>> {
        ids_page(self.client, links::users::FRIENDS_IDS, acct.into(), cursor).await
    }
}

/// Calls about the accounts following a user. Obtained from `Client::followers`.
#[derive(Debug, Clone, Copy)]
pub struct Followers<'a> {
    client: &'a Client,
}

impl<'a> Followers<'a> {
    pub(crate) fn new(client: &'a Client) -> Followers<'a> {
        Followers { client }
    }

    /// Returns one page of IDs of the accounts following the given user.
    ///
    /// Pass `None` or `Some(-1)` for the first page, and the previous page's `next_cursor` after
    /// that.
    pub async fn ids(&self, acct: impl Into<UserID>, cursor: Option<i64>) -> Result<Response<IDCursor>> {
        ids_page(self.client, links::users::FOLLOWERS_IDS, acct.into(), cursor).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::tests::{mock_client, MockHttp};

    #[tokio::test]
    async fn lookup_splits_ids_and_names() {
        let http = MockHttp::reply(200, r#"[{"id":1,"screen_name":"a"},{"id":2,"screen_name":"b"}]"#);
        let client = mock_client(&http);
        let accts: Vec<UserID> = vec![1u64.into(), "rustlang".into(), 2u64.into()];

        let users = client.users().lookup(accts).await.unwrap();

        assert_eq!(users.len(), 2);
        let seen = http.requests();
        assert_eq!(seen[0].method, Method::POST);
        assert_eq!(seen[0].uri, "http://mock.test/1.1/users/lookup.json");
        assert_eq!(seen[0].body_str(), "screen_name=rustlang&user_id=1%2C2");
    }

    #[tokio::test]
    async fn lookup_only_names() {
        let http = MockHttp::reply(200, "[]");
        let client = mock_client(&http);

        client.users().lookup(vec!["rustlang", "ThisWeekInRust"]).await.unwrap();

        assert_eq!(
            http.requests()[0].body_str(),
            "screen_name=rustlang%2CThisWeekInRust"
        );
    }

    #[tokio::test]
    async fn lookup_bounds() {
        let http = MockHttp::new();
        let client = mock_client(&http);

        match client.users().lookup(Vec::<u64>::new()).await {
            Err(Error::InvalidArgument(_)) => (),
            other => panic!("expected an invalid argument error, got {:?}", other),
        }
        match client.users().lookup(0..101u64).await {
            Err(Error::InvalidArgument(_)) => (),
            other => panic!("expected an invalid argument error, got {:?}", other),
        }
        assert!(http.requests().is_empty());
    }

    #[tokio::test]
    async fn show_by_name() {
        let http = MockHttp::reply(200, r#"{"id":6253282,"screen_name":"TwitterAPI"}"#);
        let client = mock_client(&http);

        let user = client.users().show("TwitterAPI").await.unwrap();

        assert_eq!(user.id, 6253282);
        assert_eq!(
            http.requests()[0].uri,
            "http://mock.test/1.1/users/show.json?screen_name=TwitterAPI"
        );
    }

    #[tokio::test]
    async fn search_with_options() {
        let http = MockHttp::reply(200, "[]");
        let client = mock_client(&http);
        let opts = UserSearchOptions::default().page(2).count(5);

        client.users().search("rust lang", &opts).await.unwrap();

        assert_eq!(
            http.requests()[0].uri,
            "http://mock.test/1.1/users/search.json?count=5&page=2&q=rust%20lang"
        );
    }

    #[tokio::test]
    async fn friend_and_follower_ids() {
        let http = MockHttp::reply(200, r#"{"ids":[10,20],"next_cursor":1374004777531007833,"previous_cursor":0}"#)
            .then_reply(200, r#"{"ids":[30],"next_cursor":0,"previous_cursor":0}"#);
        let client = mock_client(&http);

        let friends = client.friends().ids(12u64, None).await.unwrap();
        let followers = client
            .followers()
            .ids("rustlang", Some(1374004777531007833))
            .await
            .unwrap();

        assert_eq!(friends.ids, vec![10, 20]);
        assert!(friends.has_next());
        assert_eq!(followers.ids, vec![30]);
        assert!(!followers.has_next());
        let seen = http.requests();
        assert_eq!(seen[0].uri, "http://mock.test/1.1/friends/ids.json?user_id=12");
        assert_eq!(
            seen[1].uri,
            "http://mock.test/1.1/followers/ids.json?cursor=1374004777531007833&screen_name=rustlang"
        );
    }
}
