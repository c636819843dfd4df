//! Pinboard v1 API client.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use url::Url;

use super::error::PinboardError;
use super::types::{Bookmark, PostSummary, ResultCodeResponse};
use crate::export::BookmarkStore;
use crate::http::{DEFAULT_TIMEOUT, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::rate_limit::MinIntervalLimiter;

/// Pinboard v1 API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.pinboard.in/v1";

/// Pinboard asks clients to wait at least three seconds between writes.
pub const DEFAULT_MIN_DELAY: Duration = Duration::from_secs(3);

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Pinboard v1 API client.
///
/// Writes through [`PinboardClient::add_bookmark`] are spaced by at least
/// the configured minimum delay for the lifetime of the client (clones share
/// the spacing).
#[derive(Clone)]
pub struct PinboardClient {
    transport: Arc<dyn HttpTransport>,
    auth_token: Arc<String>,
    api_url: String,
    limiter: MinIntervalLimiter,
}

impl PinboardClient {
    /// Create a new client with the given `user:TOKEN` auth token.
    pub fn new(auth_token: &str) -> Result<Self, PinboardError> {
        let transport = ReqwestTransport::with_timeout(DEFAULT_TIMEOUT)?;
        Ok(Self::with_transport(auth_token, Arc::new(transport)))
    }

    /// Create a client that sends requests through `transport`.
    pub fn with_transport(auth_token: &str, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            auth_token: Arc::new(auth_token.to_string()),
            api_url: DEFAULT_API_URL.to_string(),
            limiter: MinIntervalLimiter::new(DEFAULT_MIN_DELAY),
        }
    }

    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Replace the spacing between writes. Zero disables it.
    #[must_use]
    pub fn with_min_delay(mut self, min_delay: Duration) -> Self {
        self.limiter = MinIntervalLimiter::new(min_delay);
        self
    }

    /// Build an authenticated endpoint URL with JSON output.
    fn endpoint(&self, method: &str, params: &[(&str, &str)]) -> Result<String, PinboardError> {
        let mut url = Url::parse(&format!("{}/{}", self.api_url, method))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("auth_token", &self.auth_token);
            for (key, value) in params {
                query.append_pair(key, value);
            }
            query.append_pair("format", "json");
        }
        Ok(url.into())
    }

    async fn get(&self, url: String) -> Result<HttpResponse, PinboardError> {
        let response = self.transport.send(HttpRequest::get(url)).await?;
        if response.status != 200 {
            return Err(PinboardError::Status {
                status: response.status,
                body: response.body_text(),
            });
        }
        Ok(response)
    }

    /// Fetch the URLs of all bookmarks carrying `tag`.
    pub async fn list_urls_by_tag(
        &self,
        tag: &str,
        cancel: &CancellationToken,
    ) -> Result<HashSet<String>, PinboardError> {
        if cancel.is_cancelled() {
            return Err(PinboardError::Cancelled);
        }

        let url = self.endpoint("posts/all", &[("tag", tag)])?;
        let response = self.get(url).await?;
        let posts: Vec<PostSummary> = serde_json::from_slice(&response.body)?;
        let urls: HashSet<String> = posts.into_iter().map(|p| p.href).collect();

        tracing::info!(tag, count = urls.len(), "Fetched existing bookmark URLs");
        Ok(urls)
    }

    /// Create or replace a bookmark.
    ///
    /// Waits out the remainder of the minimum delay first; if `cancel` fires
    /// during that wait the call returns [`PinboardError::Cancelled`] without
    /// sending anything.
    pub async fn add_bookmark(
        &self,
        bookmark: &Bookmark,
        cancel: &CancellationToken,
    ) -> Result<(), PinboardError> {
        self.limiter.wait(cancel).await?;

        let tags = bookmark.tags.join(" ");
        let url = self.endpoint(
            "posts/add",
            &[
                ("url", bookmark.url.as_str()),
                // v1 calls the title "description" and the note "extended"
                ("description", bookmark.title.as_str()),
                ("extended", bookmark.description.as_str()),
                ("tags", tags.as_str()),
                ("replace", "yes"),
                ("shared", yes_no(!bookmark.private)),
                ("toread", yes_no(bookmark.to_read)),
            ],
        )?;

        let response = self.get(url).await?;
        let result: ResultCodeResponse = serde_json::from_slice(&response.body)?;
        if result.result_code != ResultCodeResponse::DONE {
            return Err(PinboardError::ResultCode(result.result_code));
        }

        tracing::debug!(url = %bookmark.url, "Saved bookmark");
        Ok(())
    }
}

#[async_trait]
impl BookmarkStore for PinboardClient {
    async fn list_urls_by_tag(
        &self,
        tag: &str,
        cancel: &CancellationToken,
    ) -> Result<HashSet<String>, PinboardError> {
        PinboardClient::list_urls_by_tag(self, tag, cancel).await
    }

    async fn upsert(
        &self,
        bookmark: &Bookmark,
        cancel: &CancellationToken,
    ) -> Result<(), PinboardError> {
        self.add_bookmark(bookmark, cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockTransport;
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Instant;

    const ADD: &str = "https://api.pinboard.in/v1/posts/add";
    const ALL: &str = "https://api.pinboard.in/v1/posts/all";

    fn client(transport: &MockTransport) -> PinboardClient {
        PinboardClient::with_transport("user:SECRET", Arc::new(transport.clone()))
            .with_min_delay(Duration::ZERO)
    }

    fn query_of(url: &str) -> HashMap<String, String> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn bookmark() -> Bookmark {
        Bookmark {
            url: "https://example.com".to_string(),
            title: "Example Site".to_string(),
            description: "A test bookmark".to_string(),
            tags: vec!["test".to_string(), "example".to_string()],
            private: true,
            to_read: false,
        }
    }

    #[tokio::test]
    async fn test_add_bookmark_sends_v1_parameters() {
        let transport = MockTransport::new();
        transport.push_json(ADD, json!({"result_code": "done"}));

        client(&transport)
            .add_bookmark(&bookmark(), &CancellationToken::new())
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let params = query_of(&requests[0].url);

        let expected = [
            ("auth_token", "user:SECRET"),
            ("url", "https://example.com"),
            ("description", "Example Site"),
            ("extended", "A test bookmark"),
            ("tags", "test example"),
            ("replace", "yes"),
            ("shared", "no"),
            ("toread", "no"),
            ("format", "json"),
        ];
        for (key, value) in expected {
            assert_eq!(params.get(key).map(String::as_str), Some(value), "param {key}");
        }
    }

    #[tokio::test]
    async fn test_public_to_read_flags() {
        let transport = MockTransport::new();
        transport.push_json(ADD, json!({"result_code": "done"}));

        let mut b = bookmark();
        b.private = false;
        b.to_read = true;
        client(&transport)
            .add_bookmark(&b, &CancellationToken::new())
            .await
            .unwrap();

        let params = query_of(&transport.requests()[0].url);
        assert_eq!(params["shared"], "yes");
        assert_eq!(params["toread"], "yes");
    }

    #[tokio::test]
    async fn test_empty_description_is_sent_as_empty() {
        let transport = MockTransport::new();
        transport.push_json(ADD, json!({"result_code": "done"}));

        let mut b = bookmark();
        b.description = String::new();
        client(&transport)
            .add_bookmark(&b, &CancellationToken::new())
            .await
            .unwrap();

        let params = query_of(&transport.requests()[0].url);
        assert_eq!(params["extended"], "");
    }

    #[tokio::test]
    async fn test_non_done_result_code_is_error() {
        let transport = MockTransport::new();
        transport.push_json(ADD, json!({"result_code": "missing url"}));

        let err = client(&transport)
            .add_bookmark(&bookmark(), &CancellationToken::new())
            .await
            .unwrap_err();
        match err {
            PinboardError::ResultCode(code) => assert_eq!(code, "missing url"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_error_status_includes_body() {
        let transport = MockTransport::new();
        transport.push_response(ADD, HttpResponse::new(429, "Too Many Requests"));

        let err = client(&transport)
            .add_bookmark(&bookmark(), &CancellationToken::new())
            .await
            .unwrap_err();
        match err {
            PinboardError::Status { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "Too Many Requests");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let transport = MockTransport::new();
        transport.push_response(ADD, HttpResponse::new(200, "<html>"));

        let err = client(&transport)
            .add_bookmark(&bookmark(), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, PinboardError::Decode(_)));
    }

    #[tokio::test]
    async fn test_list_urls_by_tag_builds_set() {
        let transport = MockTransport::new();
        transport.push_json(
            ALL,
            json!([
                {"href": "https://github.com/a/one", "description": "a/one"},
                {"href": "https://github.com/a/two"},
                {"href": "https://github.com/a/one"}
            ]),
        );

        let urls = client(&transport)
            .list_urls_by_tag("github-repo", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(urls.len(), 2);
        assert!(urls.contains("https://github.com/a/one"));
        assert!(urls.contains("https://github.com/a/two"));

        let params = query_of(&transport.requests()[0].url);
        assert_eq!(params["tag"], "github-repo");
        assert_eq!(params["format"], "json");
        assert_eq!(params["auth_token"], "user:SECRET");
    }

    #[tokio::test]
    async fn test_list_urls_empty_array_is_empty_set() {
        let transport = MockTransport::new();
        transport.push_json(ALL, json!([]));

        let urls = client(&transport)
            .list_urls_by_tag("github-repo", &CancellationToken::new())
            .await
            .unwrap();
        assert!(urls.is_empty());
    }

    #[tokio::test]
    async fn test_list_urls_non_200_is_status_error() {
        let transport = MockTransport::new();
        transport.push_response(ALL, HttpResponse::new(401, "401 Forbidden"));

        let err = client(&transport)
            .list_urls_by_tag("github-repo", &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, PinboardError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_cancelled_token_stops_list_before_request() {
        let transport = MockTransport::new();
        transport.push_json(ALL, json!([]));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = client(&transport)
            .list_urls_by_tag("github-repo", &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, PinboardError::Cancelled));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_api_url_is_reported() {
        let transport = MockTransport::new();
        let client = client(&transport).with_api_url("not a url");

        let err = client
            .list_urls_by_tag("github-repo", &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, PinboardError::InvalidUrl(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_writes_are_spaced_by_min_delay() {
        let transport = MockTransport::new();
        transport.push_json(ADD, json!({"result_code": "done"}));
        transport.push_json(ADD, json!({"result_code": "done"}));

        let client = client(&transport).with_min_delay(Duration::from_millis(200));
        let cancel = CancellationToken::new();

        client.add_bookmark(&bookmark(), &cancel).await.unwrap();
        let start = Instant::now();
        client.add_bookmark(&bookmark(), &cancel).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(150));
        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_cancel_during_min_delay_returns_promptly() {
        let transport = MockTransport::new();
        transport.push_json(ADD, json!({"result_code": "done"}));
        transport.push_json(ADD, json!({"result_code": "done"}));

        let client = client(&transport).with_min_delay(Duration::from_secs(30));
        let cancel = CancellationToken::new();
        client.add_bookmark(&bookmark(), &cancel).await.unwrap();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let err = tokio::time::timeout(
            Duration::from_secs(5),
            client.add_bookmark(&bookmark(), &cancel),
        )
        .await
        .expect("cancelled write should not wait out the delay")
        .unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn test_default_min_delay() {
        let client = PinboardClient::with_transport("t", Arc::new(MockTransport::new()));
        assert_eq!(client.limiter.min_interval(), DEFAULT_MIN_DELAY);
    }
}
