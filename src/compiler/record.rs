//! Student records and the compiled collection.

use super::frontmatter::Frontmatter;
use serde::Serialize;
use serde_json::Value;

/// Key every record carries, derived from the source file name.
pub const SLUG_KEY: &str = "slug";

/// One profile: its frontmatter fields passed through as-is, plus `slug`.
///
/// Serializes as a flat JSON object. A frontmatter `slug` key keeps its
/// position but takes the file-derived value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StudentRecord {
    fields: Frontmatter,
}

impl StudentRecord {
    pub fn new(slug: impl Into<String>, frontmatter: Frontmatter) -> Self {
        let mut fields = frontmatter;
        fields.insert(SLUG_KEY.to_owned(), Value::String(slug.into()));
        Self { fields }
    }

    pub fn slug(&self) -> &str {
        self.fields
            .get(SLUG_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    #[cfg(test)]
    pub fn fields(&self) -> &Frontmatter {
        &self.fields
    }
}

/// All records of one compile run, in file-name order.
///
/// Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StudentCollection {
    records: Vec<StudentRecord>,
}

impl StudentCollection {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Pretty-printed JSON array, as written to the feed file.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StudentRecord> {
        self.records.iter()
    }
}

impl FromIterator<StudentRecord> for StudentCollection {
    fn from_iter<I: IntoIterator<Item = StudentRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
