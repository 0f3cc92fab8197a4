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

///Optional parameters shared by the timeline calls.
///
///`since_id` and `max_id` page through a timeline: load the newest page without either, then pass
///the lowest ID seen minus one as `max_id` to go back in time, or the highest ID seen as
///`since_id` to check for newer tweets.
#[derive(Debug, Clone, Default)]
pub struct TimelineOptions {
    ///The number of tweets to return, up to 200.
    pub count: Option<u32>,
    ///Only return tweets with an ID greater than this one.
    pub since_id: Option<u64>,
    ///Only return tweets with an ID less than or equal to this one.
    pub max_id: Option<u64>,
    ///When `true`, each tweet's `user` is trimmed down to its ID.
    pub trim_user: Option<bool>,
    ///When `true`, replies are left out. Applies to `home_timeline` and `user_timeline`.
    pub exclude_replies: Option<bool>,
    ///When `false`, native retweets are left out. Applies to `user_timeline`.
    pub include_rts: Option<bool>,
    ///When `false`, the `entities` node is left out.
    pub include_entities: Option<bool>,
}

impl TimelineOptions {
    ///Sets the number of tweets to return.
    pub fn count(self, count: u32) -> Self {
        TimelineOptions {
            count: Some(count),
            ..self
        }
    }

    ///Only return tweets newer than the given ID.
    pub fn since_id(self, id: u64) -> Self {
        TimelineOptions {
            since_id: Some(id),
            ..self
        }
    }

    ///Only return tweets at or older than the given ID.
    pub fn max_id(self, id: u64) -> Self {
        TimelineOptions {
            max_id: Some(id),
            ..self
        }
    }

    ///Sets whether to trim each tweet's `user` down to its ID.
    pub fn trim_user(self, trim: bool) -> Self {
        TimelineOptions {
            trim_user: Some(trim),
            ..self
        }
    }

    ///Sets whether to leave out replies.
    pub fn exclude_replies(self, exclude: bool) -> Self {
        TimelineOptions {
            exclude_replies: Some(exclude),
            ..self
        }
    }

    ///Sets whether to include native retweets.
    pub fn include_rts(self, include: bool) -> Self {
        TimelineOptions {
            include_rts: Some(include),
            ..self
        }
    }

    ///Sets whether to include the `entities` node.
    pub fn include_entities(self, include: bool) -> Self {
        TimelineOptions {
            include_entities: Some(include),
            ..self
        }
    }

    fn add_to(&self, params: ParamList) -> ParamList {
        params
            .add_opt_param("count", self.count)
            .add_opt_param("since_id", self.since_id)
            .add_opt_param("max_id", self.max_id)
            .add_opt_param("trim_user", self.trim_user)
            .add_opt_param("exclude_replies", self.exclude_replies)
            .add_opt_param("include_rts", self.include_rts)
            .add_opt_param("include_entities", self.include_entities)
    }
}

///Optional parameters for posting a new tweet.
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    ///Marks the new tweet as a reply to the given tweet ID. Ignored unless the text mentions the
    ///author of that tweet.
    pub in_reply_to_status_id: Option<u64>,
    ///The latitude of the location the tweet refers to.
    pub lat: Option<f64>,
    ///The longitude of the location the tweet refers to.
    pub long: Option<f64>,
    ///A place ID, as returned by Twitter's geo calls.
    pub place_id: Option<String>,
    ///Whether to put a pin on the exact coordinates the tweet was sent from.
    pub display_coordinates: Option<bool>,
    ///Marks attached media as possibly sensitive. Applies to `update_with_media`.
    pub possibly_sensitive: Option<bool>,
    ///When `true`, the returned tweet's `user` is trimmed down to its ID.
    pub trim_user: Option<bool>,
}

impl UpdateOptions {
    ///Marks the new tweet as a reply to the given tweet ID.
    pub fn in_reply_to(self, id: u64) -> Self {
        UpdateOptions {
            in_reply_to_status_id: Some(id),
            ..self
        }
    }

    ///Attaches the given location coordinate to the new tweet.
    pub fn coordinates(self, latitude: f64, longitude: f64, display: Option<bool>) -> Self {
        UpdateOptions {
            lat: Some(latitude),
            long: Some(longitude),
            display_coordinates: display,
            ..self
        }
    }

    ///Attaches the given place ID to the new tweet.
    pub fn place_id(self, id: impl Into<String>) -> Self {
        UpdateOptions {
            place_id: Some(id.into()),
            ..self
        }
    }

    ///Marks attached media as possibly sensitive.
    pub fn possibly_sensitive(self, sensitive: bool) -> Self {
        UpdateOptions {
            possibly_sensitive: Some(sensitive),
            ..self
        }
    }

    ///Sets whether to trim the returned tweet's `user` down to its ID.
    pub fn trim_user(self, trim: bool) -> Self {
        UpdateOptions {
            trim_user: Some(trim),
            ..self
        }
    }

    fn add_to(&self, params: ParamList) -> ParamList {
        params
            .add_opt_param("in_reply_to_status_id", self.in_reply_to_status_id)
            .add_opt_param("lat", self.lat)
            .add_opt_param("long", self.long)
            .add_opt_param("place_id", self.place_id.clone())
            .add_opt_param("display_coordinates", self.display_coordinates)
            .add_opt_param("possibly_sensitive", self.possibly_sensitive)
            .add_opt_param("trim_user", self.trim_user)
    }
}

///Tweet and timeline calls. Obtained from `Client::tweets`.
#[derive(Debug, Clone, Copy)]
pub struct Tweets<'a> {
    client: &'a Client,
}

impl<'a> Tweets<'a> {
    pub(crate) fn new(client: &'a Client) -> Tweets<'a> {
        Tweets { client }
    }

    async fn timeline(&self, endpoint: &str, params: ParamList) -> Result<Response<Vec<Tweet>>> {
        self.client.call(Method::GET, endpoint, &params).await
    }

    ///Loads the most recent tweets mentioning the authenticated user.
    pub async fn mentions(&self, opts: &TimelineOptions) -> Result<Response<Vec<Tweet>>> {
        self.timeline(links::statuses::MENTIONS_TIMELINE, opts.add_to(ParamList::new()))
            .await
    }

    ///Loads the most recent tweets posted by the given user.
    pub async fn user_timeline(
        &self,
        acct: impl Into<UserID>,
        opts: &TimelineOptions,
    ) -> Result<Response<Vec<Tweet>>> {
        let params = opts.add_to(ParamList::new().add_user_param(acct.into()));
        self.timeline(links::statuses::USER_TIMELINE, params).await
    }

    ///Loads the most recent tweets from the authenticated user and the accounts they follow, as
    ///seen on their home page.
    pub async fn home_timeline(&self, opts: &TimelineOptions) -> Result<Response<Vec<Tweet>>> {
        self.timeline(links::statuses::HOME_TIMELINE, opts.add_to(ParamList::new()))
            .await
    }

    ///Loads the authenticated user's tweets that have been retweeted by others.
    pub async fn retweets_of_me(&self, opts: &TimelineOptions) -> Result<Response<Vec<Tweet>>> {
        self.timeline(links::statuses::RETWEETS_OF_ME, opts.add_to(ParamList::new()))
            .await
    }

    ///Posts a new tweet with the given text.
    pub async fn update(&self, status: impl Into<CowStr>, opts: &UpdateOptions) -> Result<Response<Tweet>> {
        let params = opts.add_to(ParamList::new().add_param("status", status.into()));

        self.client
            .call(Method::POST, links::statuses::UPDATE, &params)
            .await
    }

    ///Posts a new tweet with the given text and an attached file.
    ///
    ///The request is sent as `multipart/form-data`, with the text and every option as form fields
    ///and the file under `media[]`. None of those fields are part of the OAuth signature.
    pub async fn update_with_media(
        &self,
        status: &str,
        media: &TweetMedia,
        opts: &UpdateOptions,
    ) -> Result<Response<Tweet>> {
        let mut form = MultipartForm::new().add_text("status", status);
        for (key, value) in opts.add_to(ParamList::new()).pairs() {
            form = form.add_text(key, value);
        }
        let form = form.add_file("media[]", &media.filename, &media.data);

        self.client
            .call_multipart(links::statuses::UPDATE_WITH_MEDIA, form)
            .await
    }

    ///Loads up to `count` (at most 100) of the most recent retweets of the given tweet.
    pub async fn retweets(&self, id: u64, count: Option<u32>) -> Result<Response<Vec<Tweet>>> {
        let endpoint = format!("{}/{}", links::statuses::RETWEETS_STEM, id);
        let params = ParamList::new().add_opt_param("count", count);

        self.client.call(Method::GET, &endpoint, &params).await
    }

    ///Loads a single tweet by ID.
    pub async fn show(&self, id: u64) -> Result<Response<Tweet>> {
        let params = ParamList::new().add_param("id", id);

        self.client
            .call(Method::GET, links::statuses::SHOW, &params)
            .await
    }

    ///Deletes the given tweet, which must belong to the authenticated user. Returns the deleted
    ///tweet.
    pub async fn destroy(&self, id: u64) -> Result<Response<Tweet>> {
        let endpoint = format!("{}/{}", links::statuses::DELETE_STEM, id);

        self.client
            .call(Method::POST, &endpoint, &ParamList::new())
            .await
    }

    ///Retweets the given tweet as the authenticated user. Returns the new retweet, with the
    ///original in its `retweeted_status`.
    pub async fn retweet(&self, id: u64) -> Result<Response<Tweet>> {
        let endpoint = format!("{}/{}", links::statuses::RETWEET_STEM, id);

        self.client
            .call(Method::POST, &endpoint, &ParamList::new())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::tests::{load_file, mock_client, MockHttp};

    #[tokio::test]
    async fn home_timeline_with_options() {
        let http = MockHttp::reply(200, &load_file("sample_payloads/timeline.json"));
        let client = mock_client(&http);
        let opts = TimelineOptions::default().count(2).max_id(1050118621198921728);

        let tweets = client.tweets().home_timeline(&opts).await.unwrap();

        assert!(tweets.is_complete());
        assert_eq!(tweets.len(), 2);
        let ids = tweets.into_iter().map(|t| t.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![1050118621198921728, 1049816474313228288]);
        assert_eq!(
            http.requests()[0].uri,
            "http://mock.test/1.1/statuses/home_timeline.json?count=2&max_id=1050118621198921728"
        );
    }

    #[tokio::test]
    async fn timelines_hit_their_endpoints() {
        let http = MockHttp::reply(200, "[]")
            .then_reply(200, "[]")
            .then_reply(200, "[]");
        let client = mock_client(&http);
        let tweets = client.tweets();
        let opts = TimelineOptions::default();

        tweets.mentions(&opts).await.unwrap();
        tweets.retweets_of_me(&opts).await.unwrap();
        tweets
            .user_timeline("rustlang", &opts.clone().include_rts(false))
            .await
            .unwrap();

        let uris = http.requests().into_iter().map(|r| r.uri).collect::<Vec<_>>();
        assert_eq!(
            uris,
            vec![
                "http://mock.test/1.1/statuses/mentions_timeline.json",
                "http://mock.test/1.1/statuses/retweets_of_me.json",
                "http://mock.test/1.1/statuses/user_timeline.json?include_rts=false&screen_name=rustlang",
            ]
        );
    }

    #[tokio::test]
    async fn update_posts_status() {
        let http = MockHttp::reply(200, &load_file("sample_payloads/tweet.json"));
        let client = mock_client(&http);
        let opts = UpdateOptions::default().in_reply_to(1049816474313228288);

        let tweet = client.tweets().update("@TwitterDev hi", &opts).await.unwrap();

        assert_eq!(tweet.id, 1050118621198921728);
        let seen = http.requests();
        assert_eq!(seen[0].method, Method::POST);
        assert_eq!(seen[0].uri, "http://mock.test/1.1/statuses/update.json");
        assert_eq!(
            seen[0].body_str(),
            "in_reply_to_status_id=1049816474313228288&status=%40TwitterDev%20hi"
        );
    }

    #[tokio::test]
    async fn update_with_media_sends_multipart() {
        let http = MockHttp::reply(200, r#"{"id":9,"text":"look"}"#);
        let client = mock_client(&http);
        let media = TweetMedia::new("cat.png", &b"\x89PNG"[..]);
        let opts = UpdateOptions::default().possibly_sensitive(true);

        let tweet = client
            .tweets()
            .update_with_media("look", &media, &opts)
            .await
            .unwrap();

        assert_eq!(tweet.id, 9);
        let seen = http.requests();
        assert_eq!(
            seen[0].uri,
            "http://mock.test/1.1/statuses/update_with_media.json"
        );
        assert!(seen[0]
            .header("content-type")
            .unwrap()
            .starts_with("multipart/form-data; boundary="));
        let body = String::from_utf8_lossy(&seen[0].body);
        assert!(body.contains("name=\"status\"\r\n\r\nlook\r\n"));
        assert!(body.contains("name=\"possibly_sensitive\"\r\n\r\ntrue\r\n"));
        assert!(body.contains("name=\"media[]\"; filename=\"cat.png\""));
    }

    #[tokio::test]
    async fn single_tweet_calls() {
        let http = MockHttp::reply(200, r#"{"id":20,"text":"just setting up my twttr"}"#)
            .then_reply(200, r#"[{"id":21,"retweeted_status":{"id":20}}]"#)
            .then_reply(200, r#"{"id":22,"retweeted_status":{"id":20}}"#)
            .then_reply(200, r#"{"id":20}"#);
        let client = mock_client(&http);
        let tweets = client.tweets();

        let shown = tweets.show(20).await.unwrap();
        let retweets = tweets.retweets(20, Some(10)).await.unwrap();
        let retweet = tweets.retweet(20).await.unwrap();
        let deleted = tweets.destroy(20).await.unwrap();

        assert_eq!(shown.text, "just setting up my twttr");
        assert_eq!(retweets[0].retweeted_status.as_ref().unwrap().id, 20);
        assert_eq!(retweet.id, 22);
        assert_eq!(deleted.id, 20);

        let seen = http.requests();
        assert_eq!(seen[0].uri, "http://mock.test/1.1/statuses/show.json?id=20");
        assert_eq!(seen[1].uri, "http://mock.test/1.1/statuses/retweets/20.json?count=10");
        assert_eq!(seen[2].method, Method::POST);
        assert_eq!(seen[2].uri, "http://mock.test/1.1/statuses/retweet/20.json");
        assert_eq!(seen[3].method, Method::POST);
        assert_eq!(seen[3].uri, "http://mock.test/1.1/statuses/destroy/20.json");
        assert!(seen[3].body.is_empty());
    }
}
