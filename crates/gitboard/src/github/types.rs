//! GitHub API data types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::error::GitHubError;

/// A repository the authenticated user has starred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarredRepo {
    /// Owner and name, e.g. `rust-lang/rust`.
    pub full_name: String,
    /// Browser URL of the repository.
    pub html_url: String,
    /// Repository description, empty when GitHub has none.
    pub description: String,
    /// Repository topics in API order.
    pub topics: Vec<String>,
    /// When the user starred the repository.
    pub starred_at: DateTime<Utc>,
}

/// One element of `GET /user/starred` with the `star+json` media type.
#[derive(Debug, Deserialize)]
pub(crate) struct StarredRepoResponse {
    pub starred_at: String,
    pub repo: StarredRepoPayload,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StarredRepoPayload {
    pub full_name: String,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub topics: Option<Vec<String>>,
}

impl TryFrom<StarredRepoResponse> for StarredRepo {
    type Error = GitHubError;

    fn try_from(response: StarredRepoResponse) -> Result<Self, Self::Error> {
        let starred_at = DateTime::parse_from_rfc3339(&response.starred_at)
            .map_err(|source| GitHubError::InvalidTimestamp {
                value: response.starred_at.clone(),
                source,
            })?
            .with_timezone(&Utc);

        Ok(Self {
            full_name: response.repo.full_name,
            html_url: response.repo.html_url,
            description: response.repo.description.unwrap_or_default(),
            topics: response.repo.topics.unwrap_or_default(),
            starred_at,
        })
    }
}
