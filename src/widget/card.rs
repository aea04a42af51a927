//! Display cards: what the widget shows for one feed entry.
//!
//! Only `studentName` is required. Every other field falls back to a
//! placeholder so one sparse profile never breaks the whole grid.

use serde_json::{Map, Value};
use std::fmt;

const NAME_KEY: &str = "studentName";
const MAJOR_KEY: &str = "major";
const QUOTE_KEY: &str = "quote";
const CAREER_KEY: &str = "career";
const GRAD_YEAR_KEY: &str = "gradYear";
const PHOTO_KEY: &str = "photo";
const SKILLS_KEY: &str = "skills";
const SLUG_KEY: &str = "slug";

const PLACEHOLDER_MAJOR: &str = "Explorer";
const PLACEHOLDER_QUOTE: &str = "No quote provided.";
const PLACEHOLDER_CAREER: &str = "Exploring future opportunities.";
const PLACEHOLDER_GRAD_YEAR: &str = "TBD";
/// Placeholder image service; the student's initial is appended as `text`.
const PLACEHOLDER_PHOTO: &str = "https://placehold.co/400x400/EBF4FF/7F9CF5?text=";

/// Social profile kinds, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    LinkedIn,
    GitHub,
    Portfolio,
}

impl LinkKind {
    const ALL: [LinkKind; 3] = [Self::LinkedIn, Self::GitHub, Self::Portfolio];

    fn key(self) -> &'static str {
        match self {
            Self::LinkedIn => "linkedin",
            Self::GitHub => "github",
            Self::Portfolio => "portfolio",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::LinkedIn => "LinkedIn",
            Self::GitHub => "GitHub",
            Self::Portfolio => "Portfolio",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub kind: LinkKind,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub slug: Option<String>,
    pub name: String,
    pub major: String,
    pub quote: String,
    pub career: String,
    pub grad_year: String,
    pub photo_url: String,
    pub skills: Vec<String>,
    pub links: Vec<SocialLink>,
}

impl Card {
    /// Build a card from one feed entry.
    ///
    /// Returns `None` for entries that are not objects or have no usable name.
    pub fn from_entry(entry: &Value, image_base: &str) -> Option<Self> {
        let fields = entry.as_object()?;
        let name = text(fields, NAME_KEY)?;

        let photo_url = match text(fields, PHOTO_KEY) {
            Some(photo) => format!("{image_base}{}", urlencoding::encode(&photo)),
            None => placeholder_photo(&name),
        };
        let links = LinkKind::ALL
            .into_iter()
            .filter_map(|kind| {
                text(fields, kind.key()).map(|url| SocialLink { kind, url })
            })
            .collect();

        Some(Self {
            slug: text(fields, SLUG_KEY),
            major: text(fields, MAJOR_KEY).unwrap_or_else(|| PLACEHOLDER_MAJOR.to_owned()),
            quote: text(fields, QUOTE_KEY).unwrap_or_else(|| PLACEHOLDER_QUOTE.to_owned()),
            career: text(fields, CAREER_KEY).unwrap_or_else(|| PLACEHOLDER_CAREER.to_owned()),
            grad_year: text(fields, GRAD_YEAR_KEY)
                .unwrap_or_else(|| PLACEHOLDER_GRAD_YEAR.to_owned()),
            skills: skills(fields),
            photo_url,
            links,
            name,
        })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.name, self.major)?;
        writeln!(f, "  \"{}\"", self.quote)?;
        writeln!(f, "  Career Aspirations: {}", self.career)?;
        writeln!(f, "  Graduation: {}", self.grad_year)?;
        writeln!(f, "  Photo: {}", self.photo_url)?;
        if !self.skills.is_empty() {
            writeln!(f, "  Skills: {}", self.skills.join(", "))?;
        }
        for link in &self.links {
            writeln!(f, "  {}: {}", link.kind.label(), link.url)?;
        }
        Ok(())
    }
}

/// A displayable string for `key`: trimmed non-empty strings and numbers.
fn text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_owned())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Skills come as a list, or as one comma-separated string.
fn skills(fields: &Map<String, Value>) -> Vec<String> {
    let items: Vec<String> = match fields.get(SKILLS_KEY) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::String(list)) => list.split(',').map(str::to_owned).collect(),
        _ => Vec::new(),
    };

    items
        .into_iter()
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}

fn placeholder_photo(name: &str) -> String {
    let initial: String = name.chars().take(1).collect();
    format!("{PLACEHOLDER_PHOTO}{}", urlencoding::encode(&initial))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const IMAGES: &str = "https://cdn.example.com/uploads/media/";

    #[test]
    fn test_full_entry() {
        let entry = json!({
            "studentName": "Ada Lovelace",
            "major": "Mathematics",
            "quote": "Imagination is the discovering faculty.",
            "career": "Analyst",
            "gradYear": 1835,
            "photo": "ada lovelace.jpg",
            "skills": ["analysis", "poetry"],
            "github": "https://github.com/ada",
            "linkedin": "https://linkedin.com/in/ada",
            "slug": "ada",
        });

        let card = Card::from_entry(&entry, IMAGES).unwrap();

        assert_eq!(card.slug.as_deref(), Some("ada"));
        assert_eq!(card.major, "Mathematics");
        assert_eq!(card.grad_year, "1835");
        assert_eq!(card.photo_url, format!("{IMAGES}ada%20lovelace.jpg"));
        assert_eq!(card.skills, ["analysis", "poetry"]);
        // Display order is fixed, not feed order
        assert_eq!(
            card.links,
            [
                SocialLink {
                    kind: LinkKind::LinkedIn,
                    url: "https://linkedin.com/in/ada".into()
                },
                SocialLink {
                    kind: LinkKind::GitHub,
                    url: "https://github.com/ada".into()
                },
            ]
        );
    }

    #[test]
    fn test_missing_optional_fields_use_placeholders() {
        let card = Card::from_entry(&json!({"studentName": "Bob", "slug": "bob"}), IMAGES).unwrap();

        assert_eq!(card.major, "Explorer");
        assert_eq!(card.quote, "No quote provided.");
        assert_eq!(card.career, "Exploring future opportunities.");
        assert_eq!(card.grad_year, "TBD");
        assert_eq!(
            card.photo_url,
            "https://placehold.co/400x400/EBF4FF/7F9CF5?text=B"
        );
        assert!(card.skills.is_empty());
        assert!(card.links.is_empty());
    }

    #[test]
    fn test_blank_and_null_fields_count_as_missing() {
        let entry = json!({"studentName": "Cy", "major": "  ", "photo": null, "quote": false});
        let card = Card::from_entry(&entry, IMAGES).unwrap();

        assert_eq!(card.major, "Explorer");
        assert_eq!(card.quote, "No quote provided.");
        assert!(card.photo_url.starts_with("https://placehold.co/"));
    }

    #[test]
    fn test_non_ascii_initial_is_encoded() {
        let card = Card::from_entry(&json!({"studentName": "Élodie"}), IMAGES).unwrap();
        assert!(card.photo_url.ends_with("?text=%C3%89"));
    }

    #[test]
    fn test_entries_without_name_are_rejected() {
        assert!(Card::from_entry(&json!({"slug": "bob"}), IMAGES).is_none());
        assert!(Card::from_entry(&json!({"studentName": ""}), IMAGES).is_none());
        assert!(Card::from_entry(&json!("Alice"), IMAGES).is_none());
        assert!(Card::from_entry(&Value::Null, IMAGES).is_none());
    }

    #[test]
    fn test_comma_separated_skills() {
        let entry = json!({"studentName": "Dee", "skills": "Rust, SQL, ,Figma"});
        let card = Card::from_entry(&entry, IMAGES).unwrap();

        assert_eq!(card.skills, ["Rust", "SQL", "Figma"]);
    }

    #[test]
    fn test_display() {
        let entry = json!({"studentName": "Eve", "major": "CS", "portfolio": "https://eve.dev"});
        let text = Card::from_entry(&entry, IMAGES).unwrap().to_string();

        assert!(text.starts_with("Eve (CS)\n"));
        assert!(text.contains("  Graduation: TBD\n"));
        assert!(text.contains("  Portfolio: https://eve.dev\n"));
        assert!(!text.contains("Skills"));
    }
}
