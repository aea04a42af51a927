//! `[frontmatter]` section configuration.

use educe::Educe;
use serde::{Deserialize, Serialize};

/// Which frontmatter parser the compiler uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParserKind {
    /// Parse the block as YAML (default).
    #[default]
    Yaml,
    /// Split each line on its first colon; every value is a string.
    Simple,
}

/// `[frontmatter]` section in profile-feed.toml.
///
/// # Example
/// ```toml
/// [frontmatter]
/// parser = "simple"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct FrontmatterConfig {
    #[serde(default)]
    pub parser: ParserKind,
}
