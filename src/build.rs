//! Feed building orchestration.
//!
//! ```text
//! build_feed()
//!     │
//!     ├── compile()     ──► every profile in [build.content]
//!     │
//!     └── write_feed()  ──► [build.output]/[build.feed]
//! ```

use crate::{
    compiler::{StudentCollection, compile, write_feed},
    config::ProfileConfig,
    log,
    widget::Card,
};
use anyhow::Result;

/// Compile all profiles and replace the feed file.
///
/// Returns the compiled collection so callers can report on it.
pub fn build_feed(config: &ProfileConfig) -> Result<StudentCollection> {
    let content = &config.build.content;
    let feed = config.build.feed_path();

    log!("build"; "reading profiles from {}", content.display());
    let collection = compile(content, config.frontmatter.parser)?;
    log!("build"; "found {} profiles", collection.len());
    if collection.is_empty() {
        log!("build"; "no profiles in {}, writing an empty feed", content.display());
    }
    for slug in undisplayable(&collection)? {
        log!("build"; "{slug} has no studentName; the widget will skip it");
    }

    write_feed(&collection, &feed)?;
    log!("build"; "wrote {}", feed.display());

    Ok(collection)
}

/// Slugs of records the widget would not render as a card.
fn undisplayable(collection: &StudentCollection) -> Result<Vec<&str>> {
    let mut slugs = Vec::new();
    for record in collection.iter() {
        if Card::from_entry(&serde_json::to_value(record)?, "").is_none() {
            slugs.push(record.slug());
        }
    }
    Ok(slugs)
}
