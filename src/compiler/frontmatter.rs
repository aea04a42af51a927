//! Frontmatter extraction.
//!
//! A profile may open with a block fenced by `---` lines:
//!
//! ```text
//! ---
//! studentName: Ada Lovelace
//! major: Mathematics
//! skills: [analysis, poetry]
//! ---
//! Body text is ignored.
//! ```
//!
//! [`parse_frontmatter`] turns that block into a JSON object. Files that do not
//! start with `---` have empty frontmatter.

use crate::config::ParserKind;
use serde_json::{Map, Number, Value};
use serde_yaml::Value as YamlValue;
use thiserror::Error;

/// Parsed frontmatter, in declaration order.
pub type Frontmatter = Map<String, Value>;

/// Fence line that opens and closes the block.
const DELIMITER: &str = "---";

#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("frontmatter block opened with `---` is never closed")]
    Unterminated,

    #[error("invalid YAML in frontmatter")]
    Yaml(#[from] serde_yaml::Error),

    #[error("frontmatter must be a mapping of keys to values, found {0}")]
    NotMapping(&'static str),
}

/// Lines between the fences, plus whether the closing fence was found.
struct Block<'a> {
    lines: Vec<&'a str>,
    closed: bool,
}

/// Extract the frontmatter mapping from a profile's text.
pub fn parse_frontmatter(text: &str, parser: ParserKind) -> Result<Frontmatter, FrontmatterError> {
    let Some(block) = split_block(text) else {
        return Ok(Frontmatter::new());
    };

    match parser {
        ParserKind::Yaml if !block.closed => Err(FrontmatterError::Unterminated),
        ParserKind::Yaml => parse_yaml(&block.lines),
        // Line splitting reads an unterminated block to the end of the file.
        ParserKind::Simple => Ok(parse_simple(&block.lines)),
    }
}

fn split_block(text: &str) -> Option<Block<'_>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.lines();
    if lines.next()?.trim() != DELIMITER {
        return None;
    }

    let mut body = Vec::new();
    for line in lines {
        if line.trim() == DELIMITER {
            return Some(Block {
                lines: body,
                closed: true,
            });
        }
        body.push(line);
    }

    Some(Block {
        lines: body,
        closed: false,
    })
}

// ============================================================================
// Line splitter
// ============================================================================

fn parse_simple(lines: &[&str]) -> Frontmatter {
    lines
        .iter()
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            let value = strip_quotes(value.trim());
            Some((key.to_owned(), Value::String(value.to_owned())))
        })
        .collect()
}

/// Remove one pair of matching surrounding quotes.
fn strip_quotes(value: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|quote| {
            value
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
        })
        .unwrap_or(value)
}

// ============================================================================
// YAML
// ============================================================================

fn parse_yaml(lines: &[&str]) -> Result<Frontmatter, FrontmatterError> {
    let mut source = lines.join("\n");
    source.push('\n');
    if source.trim().is_empty() {
        return Ok(Frontmatter::new());
    }

    match untag(serde_yaml::from_str(&source)?) {
        YamlValue::Null => Ok(Frontmatter::new()),
        YamlValue::Mapping(mapping) => Ok(mapping
            .into_iter()
            .map(|(key, value)| (key_to_string(key), yaml_to_json(value)))
            .collect()),
        other => Err(FrontmatterError::NotMapping(kind_of(&other))),
    }
}

fn untag(value: YamlValue) -> YamlValue {
    match value {
        YamlValue::Tagged(tagged) => untag(tagged.value),
        other => other,
    }
}

fn yaml_to_json(value: YamlValue) -> Value {
    match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(b),
        YamlValue::Number(n) => number_to_json(&n),
        YamlValue::String(s) => Value::String(s),
        YamlValue::Sequence(items) => Value::Array(items.into_iter().map(yaml_to_json).collect()),
        YamlValue::Mapping(mapping) => Value::Object(
            mapping
                .into_iter()
                .map(|(key, value)| (key_to_string(key), yaml_to_json(value)))
                .collect(),
        ),
        YamlValue::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

/// JSON has no NaN or infinities; those become `null`.
fn number_to_json(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::from(i)
    } else if let Some(u) = n.as_u64() {
        Value::from(u)
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number)
    }
}

fn key_to_string(key: YamlValue) -> String {
    match untag(key) {
        YamlValue::String(s) => s,
        YamlValue::Number(n) => n.to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Null => "null".to_owned(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_owned())
            .unwrap_or_default(),
    }
}

fn kind_of(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "null",
        YamlValue::Bool(_) => "a boolean",
        YamlValue::Number(_) => "a number",
        YamlValue::String(_) => "a string",
        YamlValue::Sequence(_) => "a sequence",
        YamlValue::Mapping(_) => "a mapping",
        YamlValue::Tagged(_) => "a tagged value",
    }
}
