//! GitHub API client for starred repositories.
//!
//! # Module Structure
//!
//! - [`error`] - Error types for GitHub API operations
//! - [`types`] - The `StarredRepo` domain type and its wire format
//! - [`pagination`] - Link header parsing
//! - [`client`] - The paginating client
//!
//! # Example
//!
//! ```ignore
//! use gitboard::github::GitHubClient;
//!
//! let client = GitHubClient::new(&token)?;
//! let repos = client.list_starred_repos(&cancel).await?;
//! ```

mod client;
mod error;
mod pagination;
mod types;

pub use client::{DEFAULT_API_URL, GitHubClient, STARRED_PAGE_SIZE};
pub use error::GitHubError;
pub use pagination::{LinkPagination, parse_link_header};
pub use types::StarredRepo;
