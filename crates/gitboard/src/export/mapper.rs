//! Conversion from starred repositories to Pinboard bookmarks.

use super::types::SENTINEL_TAG;
use crate::github::StarredRepo;
use crate::pinboard::Bookmark;

/// Turn GitHub topics into Pinboard tags.
///
/// Spaces become hyphens and everything is lower-cased. Order and count are
/// preserved, including duplicates.
pub fn normalize_tags(topics: &[String]) -> Vec<String> {
    topics
        .iter()
        .map(|topic| topic.replace(' ', "-").to_lowercase())
        .collect()
}

/// Build the bookmark for a starred repository.
///
/// The sentinel tag always comes first. Exported bookmarks are private and
/// not marked to-read.
pub fn repo_to_bookmark(repo: &StarredRepo) -> Bookmark {
    let mut tags = Vec::with_capacity(repo.topics.len() + 1);
    tags.push(SENTINEL_TAG.to_string());
    tags.extend(normalize_tags(&repo.topics));

    Bookmark {
        url: repo.html_url.clone(),
        title: repo.full_name.clone(),
        description: repo.description.clone(),
        tags,
        private: true,
        to_read: false,
    }
}
