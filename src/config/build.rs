//! `[build]` section configuration.
//!
//! Contains the compile paths: where profiles are read from and where the feed lands.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// `[build]` section in profile-feed.toml - compile paths.
///
/// # Example
/// ```toml
/// [build]
/// content = "src/content/students"  # Markdown profiles
/// output = "public"                 # Output directory
/// feed = "students.json"            # Feed file name inside `output`
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (set from CLI, not from file).
    #[serde(skip)]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Directory holding one Markdown file per student.
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Directory the feed is written into (and served from).
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Feed file name, relative to `output`.
    #[serde(default = "defaults::build::feed")]
    #[educe(Default = defaults::build::feed())]
    pub feed: PathBuf,
}

impl BuildConfig {
    /// Full path of the compiled feed.
    pub fn feed_path(&self) -> PathBuf {
        self.output.join(&self.feed)
    }

    /// Whether `feed` is a bare `*.json` file name.
    pub(super) fn feed_is_valid(&self) -> bool {
        let is_bare = self.feed.parent().is_none_or(|p| p == Path::new(""));
        let is_json = self.feed.extension().is_some_and(|ext| ext == "json");
        is_bare && is_json
    }
}

#[cfg(test)]
mod tests {
    use super::super::ProfileConfig;
    use std::path::PathBuf;

    #[test]
    fn test_build_config_defaults() {
        let config: ProfileConfig = toml::from_str("").unwrap();

        assert_eq!(config.build.content, PathBuf::from("src/content/students"));
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert_eq!(config.build.feed, PathBuf::from("students.json"));
        assert_eq!(
            config.build.feed_path(),
            PathBuf::from("public/students.json")
        );
    }

    #[test]
    fn test_build_config_overrides() {
        let config: ProfileConfig = toml::from_str(
            r#"
            [build]
            content = "profiles"
            output = "dist"
            feed = "feed.json"
        "#,
        )
        .unwrap();

        assert_eq!(config.build.content, PathBuf::from("profiles"));
        assert_eq!(config.build.feed_path(), PathBuf::from("dist/feed.json"));
    }

    #[test]
    fn test_feed_name_validation() {
        let mut config = ProfileConfig::default();
        assert!(config.build.feed_is_valid());

        config.build.feed = "nested/students.json".into();
        assert!(!config.build.feed_is_valid());

        config.build.feed = "students.txt".into();
        assert!(!config.build.feed_is_valid());
    }

    #[test]
    fn test_root_is_not_deserialized() {
        let result: Result<ProfileConfig, _> = toml::from_str(
            r#"
            [build]
            root = "/somewhere"
        "#,
        );

        assert!(result.is_err());
    }
}
