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

/// Optional parameters for loading received or sent messages.
#[derive(Debug, Clone, Default)]
pub struct MessageOptions {
    /// The number of messages to return, up to 200.
    pub count: Option<u32>,
    /// Only return messages with an ID greater than this one.
    pub since_id: Option<u64>,
    /// Only return messages with an ID less than or equal to this one.
    pub max_id: Option<u64>,
    /// Which page of results to return. Only applies to sent messages.
    pub page: Option<u32>,
    /// When `false`, the `entities` node is left out.
    pub include_entities: Option<bool>,
}

impl MessageOptions {
    /// Sets the number of messages to return.
    pub fn count(self, count: u32) -> Self {
        MessageOptions {
            count: Some(count),
            ..self
        }
    }

    /// Only return messages newer than the given ID.
    pub fn since_id(self, id: u64) -> Self {
        MessageOptions {
            since_id: Some(id),
            ..self
        }
    }

    /// Only return messages at or older than the given ID.
    pub fn max_id(self, id: u64) -> Self {
        MessageOptions {
            max_id: Some(id),
            ..self
        }
    }

    /// Sets the page of results to return.
    pub fn page(self, page: u32) -> Self {
        MessageOptions {
            page: Some(page),
            ..self
        }
    }

    /// Sets whether to include the `entities` node.
    pub fn include_entities(self, include: bool) -> Self {
        MessageOptions {
            include_entities: Some(include),
            ..self
        }
    }

    fn add_to(&self, params: ParamList) -> ParamList {
        params
            .add_opt_param("count", self.count)
            .add_opt_param("since_id", self.since_id)
            .add_opt_param("max_id", self.max_id)
            .add_opt_param("page", self.page)
            .add_opt_param("include_entities", self.include_entities)
    }
}

/// Direct message calls. Obtained from `Client::direct`.
#[derive(Debug, Clone, Copy)]
pub struct Direct<'a> {
    client: &'a Client,
}

impl<'a> Direct<'a> {
    pub(crate) fn new(client: &'a Client) -> Direct<'a> {
        Direct { client }
    }

    /// Loads the most recent messages sent to the authenticated user.
    pub async fn list(&self, opts: &MessageOptions) -> Result<Response<Vec<DirectMessage>>> {
        let params = opts.add_to(ParamList::new());

        self.client
            .call(Method::GET, links::direct::RECEIVED, &params)
            .await
    }

    /// Loads the most recent messages sent by the authenticated user.
    pub async fn sent(&self, opts: &MessageOptions) -> Result<Response<Vec<DirectMessage>>> {
        let params = opts.add_to(ParamList::new());

        self.client
            .call(Method::GET, links::direct::SENT, &params)
            .await
    }

    /// Loads a single message by ID.
    pub async fn show(&self, id: u64) -> Result<Response<DirectMessage>> {
        let params = ParamList::new().add_param("id", id);

        self.client
            .call(Method::GET, links::direct::SHOW, &params)
            .await
    }

    /// Deletes the given message, which must have been sent to the authenticated user. Returns
    /// the deleted message.
    pub async fn destroy(&self, id: u64) -> Result<Response<DirectMessage>> {
        let params = ParamList::new().add_param("id", id);

        self.client
            .call(Method::POST, links::direct::DELETE, &params)
            .await
    }

    /// Sends a new message with the given text to the given user.
    pub async fn send(
        &self,
        to: impl Into<UserID>,
        text: impl Into<CowStr>,
    ) -> Result<Response<DirectMessage>> {
        let params = ParamList::new()
            .add_user_param(to.into())
            .add_param("text", text.into());

        self.client
            .call(Method::POST, links::direct::SEND, &params)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::tests::{load_file, mock_client, MockHttp};

    #[tokio::test]
    async fn list_and_sent() {
        let message = load_file("sample_payloads/direct_message.json");
        let http = MockHttp::reply(200, &format!("[{}]", message)).then_reply(200, "[]");
        let client = mock_client(&http);

        let received = client
            .direct()
            .list(&MessageOptions::default().count(1))
            .await
            .unwrap();
        let sent = client
            .direct()
            .sent(&MessageOptions::default().page(3))
            .await
            .unwrap();

        assert_eq!(received[0].text, "booyakasha");
        assert!(sent.is_empty());
        let seen = http.requests();
        assert_eq!(seen[0].uri, "http://mock.test/1.1/direct_messages.json?count=1");
        assert_eq!(seen[1].uri, "http://mock.test/1.1/direct_messages/sent.json?page=3");
    }

    #[tokio::test]
    async fn send_show_destroy() {
        let message = load_file("sample_payloads/direct_message.json");
        let http = MockHttp::reply(200, &message)
            .then_reply(200, &message)
            .then_reply(200, &message);
        let client = mock_client(&http);
        let direct = client.direct();

        let new = direct.send("theSeanCook", "booyakasha").await.unwrap();
        direct.show(new.id).await.unwrap();
        direct.destroy(new.id).await.unwrap();

        let seen = http.requests();
        assert_eq!(seen[0].method, Method::POST);
        assert_eq!(seen[0].uri, "http://mock.test/1.1/direct_messages/new.json");
        assert_eq!(seen[0].body_str(), "screen_name=theSeanCook&text=booyakasha");
        assert_eq!(
            seen[1].uri,
            "http://mock.test/1.1/direct_messages/show.json?id=240136858829479936"
        );
        assert_eq!(seen[2].method, Method::POST);
        assert_eq!(seen[2].uri, "http://mock.test/1.1/direct_messages/destroy.json");
        assert_eq!(seen[2].body_str(), "id=240136858829479936");
    }
}
