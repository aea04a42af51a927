//! The embeddable profile widget's data contract.
//!
//! The widget fetches the compiled feed and turns it into cards. This module
//! implements that contract without any presentation:
//!
//! ```text
//! load(url)
//!     │
//!     ├── fetch_feed() ──► GET, 200 OK only
//!     ├── parse_feed() ──► bare array or {"students": [...]}
//!     └── render()     ──► Cards | Empty | Error
//! ```
//!
//! Failures never produce partial output: a fetch or decode error yields
//! [`Rendering::Error`] for the whole collection.

mod card;
mod feed;

pub use card::Card;
use feed::{FeedError, fetch_feed, parse_feed};

use serde_json::Value;
use std::error::Error;

/// Final state of the widget container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendering {
    /// At least one displayable profile.
    Cards(Vec<Card>),
    /// A valid feed with nothing to show: no cards and no error banner.
    Empty,
    /// The user-visible error banner.
    Error(String),
}

impl Rendering {
    /// Order cards by student name, then slug. Other states are unchanged.
    pub fn sort_by_name(&mut self) {
        if let Self::Cards(cards) = self {
            cards.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.slug.cmp(&b.slug)));
        }
    }
}

/// Turn decoded feed entries into the widget's final state.
///
/// Entries without a `studentName` are skipped rather than failing the render.
pub fn render(entries: &[Value], image_base: &str) -> Rendering {
    let cards: Vec<Card> = entries
        .iter()
        .filter_map(|entry| Card::from_entry(entry, image_base))
        .collect();

    if cards.is_empty() {
        Rendering::Empty
    } else {
        Rendering::Cards(cards)
    }
}

/// Decode a response body and render it.
pub fn render_body(body: &str, image_base: &str) -> Rendering {
    match parse_feed(body) {
        Ok(entries) => render(&entries, image_base),
        Err(err) => error_banner(&err),
    }
}

/// Fetch the feed at `url` and render it.
pub fn load(url: &str, image_base: &str) -> Rendering {
    match fetch_feed(url) {
        Ok(body) => render_body(&body, image_base),
        Err(err) => error_banner(&err),
    }
}

fn error_banner(err: &FeedError) -> Rendering {
    let mut message = format!("Could not load profiles. {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    Rendering::Error(message)
}
