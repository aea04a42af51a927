//! `[widget]` section configuration.
//!
//! Where the embeddable widget fetches the feed and its photos from.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[widget]` section in profile-feed.toml.
///
/// # Example
/// ```toml
/// [widget]
/// url = "http://127.0.0.1:5277/students.json"
/// image_base = "http://127.0.0.1:5277/uploads/media/"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct WidgetConfig {
    /// URL of the published feed.
    #[serde(default = "defaults::widget::url")]
    #[educe(Default = defaults::widget::url())]
    pub url: String,

    /// Prefix joined with a record's `photo` file name.
    #[serde(default = "defaults::widget::image_base")]
    #[educe(Default = defaults::widget::image_base())]
    pub image_base: String,
}
