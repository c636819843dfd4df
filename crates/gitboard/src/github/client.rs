//! GitHub API client for listing starred repositories.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use super::error::GitHubError;
use super::pagination::parse_link_header;
use super::types::{StarredRepo, StarredRepoResponse};
use crate::export::StarredRepoSource;
use crate::http::{DEFAULT_TIMEOUT, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

/// Public GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Items requested per page (GitHub's maximum).
pub const STARRED_PAGE_SIZE: u32 = 100;

/// Media type that makes `/user/starred` include `starred_at`.
const STAR_MEDIA_TYPE: &str = "application/vnd.github.star+json";

/// Extract the rate limit reset time from a throttled response.
///
/// Returns `None` unless the response reports an exhausted quota.
fn exhausted_rate_limit_reset(response: &HttpResponse) -> Option<DateTime<Utc>> {
    let remaining = response
        .header("x-ratelimit-remaining")
        .and_then(|v| v.parse::<u64>().ok())?;
    if remaining > 0 {
        return None;
    }

    let reset_at = response
        .header("x-ratelimit-reset")
        .and_then(|v| v.parse::<i64>().ok())
        .and_then(|epoch| DateTime::from_timestamp(epoch, 0))
        .unwrap_or_else(Utc::now);
    Some(reset_at)
}

/// Map a non-2xx response to an error.
fn status_error(response: &HttpResponse) -> GitHubError {
    match response.status {
        401 => GitHubError::AuthRequired,
        403 | 429 => match exhausted_rate_limit_reset(response) {
            Some(reset_at) => GitHubError::RateLimited { reset_at },
            None => GitHubError::Status {
                status: response.status,
            },
        },
        status => GitHubError::Status { status },
    }
}

/// GitHub API client.
///
/// Fetches the authenticated user's starred repositories, following
/// Link-header pagination until the last page.
#[derive(Clone)]
pub struct GitHubClient {
    transport: Arc<dyn HttpTransport>,
    /// The authentication token.
    token: Arc<String>,
    /// Base URL of the REST API, without a trailing slash.
    api_url: String,
}

impl GitHubClient {
    /// Create a new GitHub client from an authentication token.
    pub fn new(token: &str) -> Result<Self, GitHubError> {
        let transport = ReqwestTransport::with_timeout(DEFAULT_TIMEOUT)?;
        Ok(Self::with_transport(token, Arc::new(transport)))
    }

    /// Create a client that sends requests through `transport`.
    pub fn with_transport(token: &str, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            token: Arc::new(token.to_string()),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Point the client at a different API root (e.g. GitHub Enterprise).
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    fn starred_url(&self) -> String {
        format!("{}/user/starred?per_page={}", self.api_url, STARRED_PAGE_SIZE)
    }

    /// List all repositories starred by the authenticated user.
    ///
    /// Pages are fetched sequentially. `cancel` is checked before each page
    /// request; an in-flight request is allowed to finish.
    pub async fn list_starred_repos(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<StarredRepo>, GitHubError> {
        let mut all_repos: Vec<StarredRepo> = Vec::new();
        let mut next_url = Some(self.starred_url());
        let mut page = 1u32;

        while let Some(url) = next_url.take() {
            if cancel.is_cancelled() {
                return Err(GitHubError::Cancelled);
            }

            let response = self.get(&url).await?;
            if !response.is_success() {
                tracing::warn!(page, status = response.status, "Starred page request failed");
                return Err(status_error(&response));
            }

            let items: Vec<StarredRepoResponse> = serde_json::from_slice(&response.body)?;
            let count = items.len();
            for item in items {
                all_repos.push(StarredRepo::try_from(item)?);
            }

            let pagination = response
                .header("link")
                .map(parse_link_header)
                .unwrap_or_default();

            tracing::debug!(
                page,
                count,
                total_so_far = all_repos.len(),
                expected_pages = ?pagination.total_pages(),
                "Fetched starred page"
            );

            next_url = pagination.next_url;
            if next_url.as_deref() == Some(url.as_str()) {
                tracing::warn!(page, url = %url, "Link header points back at the same page");
                next_url = None;
            }
            page += 1;
        }

        tracing::info!(total = all_repos.len(), "Fetched starred repositories");
        Ok(all_repos)
    }

    async fn get(&self, url: &str) -> Result<HttpResponse, GitHubError> {
        let request = HttpRequest::get(url)
            .with_header("Accept", STAR_MEDIA_TYPE)
            .with_header("Authorization", format!("Bearer {}", self.token.as_str()))
            .with_header("X-GitHub-Api-Version", "2022-11-28");
        Ok(self.transport.send(request).await?)
    }
}

#[async_trait]
impl StarredRepoSource for GitHubClient {
    async fn fetch_starred(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<StarredRepo>, GitHubError> {
        self.list_starred_repos(cancel).await
    }
}
