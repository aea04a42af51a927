//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Compile student profile frontmatter into a JSON feed
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file name (default: profile-feed.toml, optional unless given)
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// subcommands; compiles the feed when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compile every profile into the JSON feed
    Build,

    /// Compile, then serve the output directory for the widget
    Serve {
        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Fetch a published feed and print the cards the widget would show
    Preview {
        /// Feed URL (default: `[widget] url`)
        #[arg(short, long)]
        url: Option<String>,

        /// Order cards by student name instead of feed order
        #[arg(short, long)]
        sort: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_means_build() {
        let cli = Cli::parse_from(["profile-feed"]);

        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_serve_arguments() {
        let cli = Cli::parse_from(["profile-feed", "serve", "-p", "8080", "-i", "0.0.0.0"]);

        match cli.command {
            Some(Commands::Serve { interface, port }) => {
                assert_eq!(interface.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_preview_arguments() {
        let cli = Cli::parse_from(["profile-feed", "preview", "--sort"]);

        assert!(matches!(
            cli.command,
            Some(Commands::Preview { url: None, sort: true })
        ));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
