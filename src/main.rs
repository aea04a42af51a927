//! profile-feed - compile student profile frontmatter into a JSON feed.

mod build;
mod cli;
mod compiler;
mod config;
mod logger;
mod preview;
mod serve;
mod widget;

use anyhow::Result;
use build::build_feed;
use clap::Parser;
use cli::{Cli, Commands};
use config::ProfileConfig;
use preview::preview_feed;
use serve::serve_feed;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log!("error"; "{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = ProfileConfig::load(cli)?;

    match &cli.command {
        None | Some(Commands::Build) => build_feed(&config).map(|_| ()),
        Some(Commands::Serve { .. }) => {
            build_feed(&config)?;
            serve_feed(&config)
        }
        Some(Commands::Preview { sort, .. }) => preview_feed(&config, *sort),
    }
}
