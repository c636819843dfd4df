//! Pinboard v1 API client.
//!
//! Bookmarks are read with `posts/all` (filtered by tag) and written with
//! `posts/add`, always with `replace=yes` so repeated writes overwrite.

mod client;
mod error;
mod types;

pub use client::{DEFAULT_API_URL, DEFAULT_MIN_DELAY, PinboardClient};
pub use error::PinboardError;
pub use types::Bookmark;
