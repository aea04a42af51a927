//! `preview` command: show a published feed the way the widget would.

use crate::{
    config::ProfileConfig,
    log,
    widget::{self, Card, Rendering},
};
use anyhow::{Result, bail};
use colored::Colorize;

/// Fetch `[widget.url]`, render it, and print the cards.
///
/// An error banner is reported as a failed command.
pub fn preview_feed(config: &ProfileConfig, sort: bool) -> Result<()> {
    log!("preview"; "fetching {}", config.widget.url);
    let mut rendering = widget::load(&config.widget.url, &config.widget.image_base);
    if sort {
        rendering.sort_by_name();
    }
    report(&rendering)
}

fn report(rendering: &Rendering) -> Result<()> {
    match rendering {
        Rendering::Cards(cards) => {
            for card in cards {
                print_card(card);
            }
            log!("preview"; "{} profiles", cards.len());
            Ok(())
        }
        Rendering::Empty => {
            log!("preview"; "feed is valid but has no profiles to show");
            Ok(())
        }
        Rendering::Error(message) => bail!("{message}"),
    }
}

fn print_card(card: &Card) {
    let text = card.to_string();
    let (title, details) = text.split_once('\n').unwrap_or((text.as_str(), ""));
    println!("{}", title.bold());
    print!("{details}");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_states() {
        assert!(report(&Rendering::Empty).is_ok());
        assert!(report(&Rendering::Cards(Vec::new())).is_ok());

        let err = report(&Rendering::Error("Could not load profiles. status 500".into()))
            .unwrap_err();
        assert_eq!(err.to_string(), "Could not load profiles. status 500");
    }
}
