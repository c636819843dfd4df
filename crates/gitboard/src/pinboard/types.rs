use serde::Deserialize;

/// A Pinboard bookmark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub url: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub private: bool,
    pub to_read: bool,
}

/// Element of the `posts/all` response. Only the URL is needed.
#[derive(Debug, Deserialize)]
pub(crate) struct PostSummary {
    pub href: String,
}

/// Body of a `posts/add` response.
#[derive(Debug, Deserialize)]
pub(crate) struct ResultCodeResponse {
    pub result_code: String,
}

impl ResultCodeResponse {
    pub const DONE: &'static str = "done";
}
