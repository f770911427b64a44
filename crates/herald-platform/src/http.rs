//! REST platform client.
//!
//! Speaks the X API v2 wire format:
//!
//! | Operation | Request |
//! |---|---|
//! | search | `GET /2/tweets/search/recent?query=…&max_results=…` |
//! | profile | `GET /2/users/{id}?user.fields=public_metrics` |
//! | timeline | `GET /2/users/{id}/tweets?max_results=…` |
//! | post / reply | `POST /2/tweets` |
//!
//! Metric fields missing from a payload decode as zero. A profile lookup that
//! returns 404, or a 200 without `data`, is reported as an absent profile.

use std::time::Duration;

use async_trait::async_trait;
use herald_core::{ContentItem, Profile, SubmitReceipt};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::client::PlatformClient;
use crate::errors::{PlatformError, Result};

const TWEET_FIELDS: &str = "author_id,created_at,public_metrics";

/// Search accepts 10..=100 results per request.
const SEARCH_MAX_RESULTS: (usize, usize) = (10, 100);
/// User timelines accept 5..=100 results per request.
const TIMELINE_MAX_RESULTS: (usize, usize) = (5, 100);

/// HTTP implementation of [`PlatformClient`].
#[derive(Clone, Debug)]
pub struct HttpPlatformClient {
    client: Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpPlatformClient {
    /// Create a client for `base_url` (no trailing slash needed).
    pub fn new(
        base_url: impl Into<String>,
        bearer_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer_token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn fetch_tweets(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<ContentItem>> {
        let request = self.authorize(self.client.get(self.url(path)).query(query));
        let response = ensure_success(request.send().await?).await?;
        let body: TweetList = response.json().await?;
        Ok(body.data.into_iter().map(ContentItem::from).collect())
    }

    async fn create_tweet(&self, body: serde_json::Value) -> Result<SubmitReceipt> {
        let request = self.authorize(self.client.post(self.url("/2/tweets")).json(&body));
        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            // Duplicate content and policy refusals come back as 403.
            let message = response.text().await.unwrap_or_default();
            return Err(PlatformError::Rejected { message });
        }
        let response = ensure_success(response).await?;
        let created: CreatedTweet = response.json().await?;
        Ok(SubmitReceipt {
            platform_id: created.data.id,
        })
    }
}

#[async_trait]
impl PlatformClient for HttpPlatformClient {
    async fn search_recent(&self, query: &str, max_results: usize) -> Result<Vec<ContentItem>> {
        debug!(query, max_results, "searching recent content");
        let max = clamp(max_results, SEARCH_MAX_RESULTS);
        self.fetch_tweets(
            "/2/tweets/search/recent",
            &[
                ("query", query.to_string()),
                ("max_results", max.to_string()),
                ("tweet.fields", TWEET_FIELDS.to_string()),
            ],
        )
        .await
        .map(|mut items| {
            items.truncate(max_results);
            items
        })
    }

    async fn get_profile(&self, author_id: &str) -> Result<Option<Profile>> {
        let request = self.authorize(
            self.client
                .get(self.url(&format!("/2/users/{author_id}")))
                .query(&[("user.fields", "public_metrics")]),
        );
        let response = request.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = ensure_success(response).await?;
        let body: UserEnvelope = response.json().await?;
        Ok(body.data.map(Profile::from))
    }

    async fn get_recent_content(
        &self,
        author_id: &str,
        max_results: usize,
    ) -> Result<Vec<ContentItem>> {
        let max = clamp(max_results, TIMELINE_MAX_RESULTS);
        self.fetch_tweets(
            &format!("/2/users/{author_id}/tweets"),
            &[
                ("max_results", max.to_string()),
                ("tweet.fields", TWEET_FIELDS.to_string()),
            ],
        )
        .await
        .map(|mut items| {
            items.truncate(max_results);
            items
        })
    }

    async fn submit_post(&self, text: &str) -> Result<SubmitReceipt> {
        self.create_tweet(serde_json::json!({ "text": text })).await
    }

    async fn submit_reply(&self, target_content_id: &str, text: &str) -> Result<SubmitReceipt> {
        self.create_tweet(serde_json::json!({
            "text": text,
            "reply": { "in_reply_to_tweet_id": target_content_id },
        }))
        .await
    }
}

fn clamp(requested: usize, (min, max): (usize, usize)) -> usize {
    requested.clamp(min, max)
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(PlatformError::Api {
        status: status.as_u16(),
        message,
    })
}

// ── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct TweetList {
    #[serde(default)]
    data: Vec<WireTweet>,
}

#[derive(Debug, Deserialize)]
struct WireTweet {
    id: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    author_id: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    public_metrics: TweetMetrics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TweetMetrics {
    like_count: u64,
    retweet_count: u64,
    reply_count: u64,
}

impl From<WireTweet> for ContentItem {
    fn from(t: WireTweet) -> Self {
        Self {
            id: t.id,
            author_id: t.author_id,
            text: t.text,
            like_count: t.public_metrics.like_count,
            retweet_count: t.public_metrics.retweet_count,
            reply_count: t.public_metrics.reply_count,
            created_at: t.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    #[serde(default)]
    data: Option<WireUser>,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    #[serde(default)]
    name: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    public_metrics: UserMetrics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UserMetrics {
    followers_count: u64,
}

impl From<WireUser> for Profile {
    fn from(u: WireUser) -> Self {
        Self {
            follower_count: u.public_metrics.followers_count,
            handle: u.username,
            display_name: u.name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreatedTweet {
    data: CreatedTweetData,
}

#[derive(Debug, Deserialize)]
struct CreatedTweetData {
    id: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpPlatformClient {
        HttpPlatformClient::new(server.uri(), Some("tok".into()), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn search_maps_metrics_and_defaults_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2/tweets/search/recent"))
            .and(query_param("query", "bitcoin"))
            .and(query_param("max_results", "100"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {
                        "id": "1",
                        "text": "btc up",
                        "author_id": "u1",
                        "created_at": "2024-05-01T12:00:00.000Z",
                        "public_metrics": {"like_count": 10, "retweet_count": 2, "reply_count": 1}
                    },
                    {"id": "2", "text": "no metrics", "author_id": "u2"}
                ]
            })))
            .mount(&server)
            .await;

        let items = client_for(&server).search_recent("bitcoin", 100).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].author_id.as_deref(), Some("u1"));
        assert_eq!(items[0].interaction_total(), 13);
        assert_eq!(items[1].interaction_total(), 0);
        assert!(items[1].created_at.is_none());
    }

    #[tokio::test]
    async fn search_without_data_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2/tweets/search/recent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"meta": {"result_count": 0}})))
            .mount(&server)
            .await;

        let items = client_for(&server).search_recent("nothing", 100).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn search_clamps_small_requests() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2/tweets/search/recent"))
            .and(query_param("max_results", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": "1"}, {"id": "2"}, {"id": "3"}]
            })))
            .mount(&server)
            .await;

        let items = client_for(&server).search_recent("x", 2).await.unwrap();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn profile_maps_followers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2/users/u1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "id": "u1",
                    "name": "Alice",
                    "username": "alice",
                    "public_metrics": {"followers_count": 42000}
                }
            })))
            .mount(&server)
            .await;

        let profile = client_for(&server).get_profile("u1").await.unwrap().unwrap();
        assert_eq!(profile.follower_count, 42_000);
        assert_eq!(profile.handle, "alice");
        assert_eq!(profile.display_name, "Alice");
    }

    #[tokio::test]
    async fn profile_not_found_is_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2/users/ghost"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        assert!(client_for(&server).get_profile("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn profile_errors_payload_is_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2/users/gone"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "errors": [{"detail": "Could not find user"}]
            })))
            .mount(&server)
            .await;

        assert!(client_for(&server).get_profile("gone").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn timeline_server_error_surfaces_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2/users/u1/tweets"))
            .respond_with(ResponseTemplate::new(503).set_body_string("over capacity"))
            .mount(&server)
            .await;

        let err = client_for(&server).get_recent_content("u1", 20).await.unwrap_err();
        assert_matches!(err, PlatformError::Api { status: 503, .. });
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn reply_sends_target_and_returns_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .and(body_json(json!({
                "text": "good point",
                "reply": {"in_reply_to_tweet_id": "t9"}
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "data": {"id": "r1", "text": "good point"}
            })))
            .mount(&server)
            .await;

        let receipt = client_for(&server).submit_reply("t9", "good point").await.unwrap();
        assert_eq!(receipt.platform_id, "r1");
    }

    #[tokio::test]
    async fn forbidden_post_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/2/tweets"))
            .respond_with(ResponseTemplate::new(403).set_body_string("duplicate content"))
            .mount(&server)
            .await;

        let err = client_for(&server).submit_post("again").await.unwrap_err();
        assert_matches!(err, PlatformError::Rejected { ref message } if message.contains("duplicate"));
    }
}
