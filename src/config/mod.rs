//! Project configuration management for `profile-feed.toml`.
//!
//! # Sections
//!
//! | Section         | Purpose                                      |
//! |-----------------|----------------------------------------------|
//! | `[build]`       | Content directory, output directory, feed    |
//! | `[frontmatter]` | Frontmatter parser selection                 |
//! | `[serve]`       | Development server (interface, port)         |
//! | `[widget]`      | Published feed URL and photo base URL        |
//!
//! `profile-feed.toml` is optional: a project without one compiles with the
//! defaults. A file named with `--config` must exist.
//!
//! # Example
//!
//! ```toml
//! [build]
//! content = "src/content/students"
//! output = "public"
//!
//! [frontmatter]
//! parser = "yaml"
//!
//! [serve]
//! port = 5277
//! ```

mod build;
pub mod defaults;
mod error;
mod frontmatter;
mod serve;
mod widget;

pub use frontmatter::ParserKind;

use build::BuildConfig;
use error::ConfigError;
use frontmatter::FrontmatterConfig;
use serve::ServeConfig;
use widget::WidgetConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Context, Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing profile-feed.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Compile paths
    #[serde(default)]
    pub build: BuildConfig,

    /// Frontmatter parsing
    #[serde(default)]
    pub frontmatter: FrontmatterConfig,

    /// Development server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// Feed consumer settings
    #[serde(default)]
    pub widget: WidgetConfig,
}

impl ProfileConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: ProfileConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content).with_context(|| format!("in `{}`", path.display()))
    }

    /// Resolve the configuration for one CLI invocation.
    ///
    /// Reads `<root>/profile-feed.toml` when it exists and falls back to
    /// defaults otherwise. A file named with `--config` must exist. CLI
    /// overrides are applied last, then the result is validated.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli
            .root
            .as_deref()
            .map(expand_tilde)
            .unwrap_or_else(|| PathBuf::from("./"));
        let (config_name, required) = match &cli.config {
            Some(name) => (name.clone(), true),
            None => (PathBuf::from(defaults::CONFIG_FILE), false),
        };
        let config_path = root.join(&config_name);

        let mut config = if required || config_path.is_file() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli, &root, &config_name);
        config.validate()?;

        Ok(config)
    }

    /// Update configuration with CLI arguments
    fn update_with_cli(&mut self, cli: &Cli, root: &Path, config_name: &Path) {
        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        match &cli.command {
            Some(Commands::Serve { interface, port }) => {
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
            }
            Some(Commands::Preview { url, .. }) => {
                Self::update_option(&mut self.widget.url, url.as_ref());
            }
            Some(Commands::Build) | None => {}
        }

        self.update_path_with_root(root, config_name);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve all paths against the root directory and make them absolute
    fn update_path_with_root(&mut self, root: &Path, config_name: &Path) {
        let root = Self::normalize_path(root);
        self.config_path = Self::normalize_path(&root.join(config_name));
        self.build.content = Self::normalize_path(&root.join(&self.build.content));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        self.build.root = Some(root);
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration values that serde cannot check on its own
    pub fn validate(&self) -> Result<()> {
        if !self.build.feed_is_valid() {
            bail!(ConfigError::Validation(format!(
                "[build.feed] must be a bare `.json` file name, got `{}`",
                self.build.feed.display()
            )));
        }

        if self.serve.interface.parse::<std::net::IpAddr>().is_err() {
            bail!(ConfigError::Validation(format!(
                "[serve.interface] `{}` is not an IP address",
                self.serve.interface
            )));
        }

        if !self.widget.url.starts_with("http") {
            bail!(ConfigError::Validation(
                "[widget.url] must start with http:// or https://".into()
            ));
        }

        Ok(())
    }
}

/// Expand a leading `~` in a user-supplied path.
fn expand_tilde(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&raw).into_owned())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("profile-feed").chain(args.iter().copied()))
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ProfileConfig::from_str("").unwrap();

        assert_eq!(config.build.output, PathBuf::from("public"));
        assert_eq!(config.frontmatter.parser, ParserKind::Yaml);
        config.validate().unwrap();
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result = ProfileConfig::from_str(
            r#"
            [deploy]
            provider = "github"
        "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_load_without_config_file() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();

        let config = ProfileConfig::load(&cli(&["--root", root])).unwrap();
        let root = dir.path().canonicalize().unwrap();

        assert_eq!(config.build.root.as_deref(), Some(root.as_path()));
        assert_eq!(config.build.content, root.join("src/content/students"));
        assert_eq!(config.build.feed_path(), root.join("public/students.json"));
    }

    #[test]
    fn test_load_reads_config_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("profile-feed.toml"),
            "[build]\ncontent = \"people\"\n\n[frontmatter]\nparser = \"simple\"\n",
        )
        .unwrap();
        let root = dir.path().to_str().unwrap();

        let config = ProfileConfig::load(&cli(&["--root", root])).unwrap();
        let root = dir.path().canonicalize().unwrap();

        assert_eq!(config.build.content, root.join("people"));
        assert_eq!(config.frontmatter.parser, ParserKind::Simple);
        assert_eq!(config.config_path, root.join("profile-feed.toml"));
    }

    #[test]
    fn test_cli_overrides_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("profile-feed.toml"),
            "[build]\noutput = \"dist\"\n\n[serve]\nport = 3000\n",
        )
        .unwrap();
        let root = dir.path().to_str().unwrap();

        let config = ProfileConfig::load(&cli(&[
            "--root", root, "--output", "site", "serve", "--port", "9000",
        ]))
        .unwrap();
        let root = dir.path().canonicalize().unwrap();

        assert_eq!(config.build.output, root.join("site"));
        assert_eq!(config.serve.port, 9000);
    }

    #[test]
    fn test_preview_url_override() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();

        let config = ProfileConfig::load(&cli(&[
            "--root",
            root,
            "preview",
            "--url",
            "http://127.0.0.1:5277/students.json",
        ]))
        .unwrap();

        assert_eq!(config.widget.url, "http://127.0.0.1:5277/students.json");
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_str().unwrap();

        let err = ProfileConfig::load(&cli(&["--root", root, "-C", "other.toml"])).unwrap_err();

        let config_err = err.downcast_ref::<ConfigError>().unwrap();
        assert!(matches!(config_err, ConfigError::Io(path, _) if path.ends_with("other.toml")));
    }

    #[test]
    fn test_explicit_config_is_read() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("other.toml"), "[serve]\nport = 4000\n").unwrap();
        let root = dir.path().to_str().unwrap();

        let config = ProfileConfig::load(&cli(&["--root", root, "-C", "other.toml"])).unwrap();

        assert_eq!(config.serve.port, 4000);
        assert_eq!(
            config.config_path,
            dir.path().canonicalize().unwrap().join("other.toml")
        );
    }

    #[test]
    fn test_invalid_config_file_is_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("profile-feed.toml"), "[build\n").unwrap();
        let root = dir.path().to_str().unwrap();

        assert!(ProfileConfig::load(&cli(&["--root", root])).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ProfileConfig::default();
        config.build.feed = "students.yaml".into();
        assert!(config.validate().is_err());

        let mut config = ProfileConfig::default();
        config.serve.interface = "localhost".into();
        assert!(config.validate().is_err());

        let mut config = ProfileConfig::default();
        config.widget.url = "ftp://example.com/students.json".into();
        assert!(config.validate().is_err());
    }
}
