//! # Puzzle Metadata Record
//!
//! The frontmatter contract every puzzle document must satisfy:
//!
//! ```yaml
//! author: "0x…"            # required, an address
//! contributors:            # required, non-empty, addresses, includes author
//!   - "0x…"
//! adapted_from: "…"        # optional attribution string
//! ```
//!
//! The document validator inspects raw frontmatter check by check so every
//! violation is reported. [`PuzzleMetadata::from_frontmatter`] is the typed
//! view used once a record is known to be well formed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::address::Address;
use crate::error::ValidationError;

/// Frontmatter keys that make up the metadata record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataField {
    /// `author`
    Author,
    /// `contributors`
    Contributors,
    /// `adapted_from`
    AdaptedFrom,
}

impl MetadataField {
    /// Required fields, in the order they are reported.
    pub const REQUIRED: [MetadataField; 2] = [MetadataField::Author, MetadataField::Contributors];

    /// The frontmatter key for this field.
    pub fn key(self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Contributors => "contributors",
            Self::AdaptedFrom => "adapted_from",
        }
    }

    /// Look the field up in a frontmatter value. `null` counts as absent.
    pub fn get(self, frontmatter: &Value) -> Option<&Value> {
        frontmatter.get(self.key()).filter(|v| !v.is_null())
    }
}

impl std::fmt::Display for MetadataField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A well-formed puzzle metadata record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleMetadata {
    /// Primary author.
    pub author: Address,
    /// Everyone who contributed, author included.
    pub contributors: Vec<Address>,
    /// Source the puzzle was adapted from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adapted_from: Option<String>,
}

impl PuzzleMetadata {
    /// Build the typed record from a frontmatter value.
    ///
    /// Fails on the first problem found. Use the document validator when
    /// every violation must be reported.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] for an absent required key,
    /// [`ValidationError::InvalidAddress`] for a malformed address, and
    /// [`ValidationError::InvalidField`] for shape problems, including a
    /// contributor list that is empty or omits the author.
    pub fn from_frontmatter(frontmatter: &Value) -> Result<Self, ValidationError> {
        let author = match MetadataField::Author.get(frontmatter) {
            None => return Err(ValidationError::MissingField("author")),
            Some(Value::String(s)) => Address::new(s.as_str())?,
            Some(other) => {
                return Err(ValidationError::InvalidField {
                    field: "author",
                    reason: format!("expected a string, found {other}"),
                })
            }
        };

        let contributors = match MetadataField::Contributors.get(frontmatter) {
            None => return Err(ValidationError::MissingField("contributors")),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Address::new(s.as_str()),
                    other => Err(ValidationError::InvalidAddress(other.to_string())),
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(ValidationError::InvalidField {
                    field: "contributors",
                    reason: format!("expected a sequence, found {other}"),
                })
            }
        };

        if contributors.is_empty() {
            return Err(ValidationError::InvalidField {
                field: "contributors",
                reason: "must contain at least one address".to_string(),
            });
        }

        let adapted_from = match MetadataField::AdaptedFrom.get(frontmatter) {
            None => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                return Err(ValidationError::InvalidField {
                    field: "adapted_from",
                    reason: format!("expected a string, found {other}"),
                })
            }
        };

        let metadata = Self {
            author,
            contributors,
            adapted_from,
        };
        if !metadata.includes_author() {
            return Err(ValidationError::InvalidField {
                field: "contributors",
                reason: format!("does not include author {}", metadata.author),
            });
        }
        Ok(metadata)
    }

    /// Whether the contributor list contains the author.
    pub fn includes_author(&self) -> bool {
        self.contributors.contains(&self.author)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn addr(c: char) -> String {
        format!("0x{}", c.to_string().repeat(40))
    }

    #[test]
    fn parses_well_formed_record() {
        let fm = json!({
            "author": addr('a'),
            "contributors": [addr('a'), addr('b')],
            "adapted_from": "https://example.org/original",
        });
        let meta = PuzzleMetadata::from_frontmatter(&fm).unwrap();
        assert_eq!(meta.author.as_str(), addr('a'));
        assert_eq!(meta.contributors.len(), 2);
        assert_eq!(meta.adapted_from.as_deref(), Some("https://example.org/original"));
        assert!(meta.includes_author());
    }

    #[test]
    fn missing_author_is_reported() {
        let fm = json!({ "contributors": [addr('a')] });
        assert_eq!(
            PuzzleMetadata::from_frontmatter(&fm).unwrap_err(),
            ValidationError::MissingField("author")
        );
    }

    #[test]
    fn null_contributors_count_as_missing() {
        let fm = json!({ "author": addr('a'), "contributors": null });
        assert_eq!(
            PuzzleMetadata::from_frontmatter(&fm).unwrap_err(),
            ValidationError::MissingField("contributors")
        );
    }

    #[test]
    fn empty_contributors_rejected() {
        let fm = json!({ "author": addr('a'), "contributors": [] });
        assert!(matches!(
            PuzzleMetadata::from_frontmatter(&fm).unwrap_err(),
            ValidationError::InvalidField { field: "contributors", .. }
        ));
    }

    #[test]
    fn author_not_in_contributors_rejected() {
        let fm = json!({ "author": addr('a'), "contributors": [addr('b')] });
        let err = PuzzleMetadata::from_frontmatter(&fm).unwrap_err();
        assert!(err.to_string().contains("does not include author"));
    }

    #[test]
    fn non_string_contributor_rejected() {
        let fm = json!({ "author": addr('a'), "contributors": [addr('a'), 42] });
        assert_eq!(
            PuzzleMetadata::from_frontmatter(&fm).unwrap_err(),
            ValidationError::InvalidAddress("42".to_string())
        );
    }

    #[test]
    fn deserializes_from_yaml_frontmatter() {
        let yaml = format!(
            "author: \"{a}\"\ncontributors:\n  - \"{a}\"\n",
            a = addr('f')
        );
        let meta: PuzzleMetadata = serde_yaml::from_str(&yaml).unwrap();
        assert!(meta.includes_author());
        assert!(meta.adapted_from.is_none());
    }

    #[test]
    fn field_keys() {
        assert_eq!(MetadataField::Author.key(), "author");
        assert_eq!(MetadataField::Contributors.to_string(), "contributors");
        assert_eq!(MetadataField::AdaptedFrom.key(), "adapted_from");
    }
}
