//! # Document Validator
//!
//! Runs every check in [`CheckName::ALL`] against one document. Checks are
//! independent: a missing `author` fails `metadata-presence`,
//! `author-format` and `author-inclusion` alike, and never prevents the
//! content checks from running.
//!
//! The frontmatter is inspected as an untyped value so that a malformed
//! record is still reported field by field.
//!
//! `prohibited-raw-content` scans the raw source with the same grammar the
//! allow-list check applies to compiled output. Compiled-looking syntax in
//! the source could otherwise smuggle elements past the allow-list, which
//! only ever sees compiler output.

use std::sync::Arc;

use serde_json::Value;

use pzl_core::{is_address, MetadataField, PuzzleMetadata};
use pzl_elements::{extract_elements, CallExpressionGrammar, ElementAllowList};

use crate::document::Document;
use crate::report::{CheckName, CheckOutcome, DocumentReport};

/// Validates documents against the metadata and content contracts.
///
/// Cheap to clone; the allow-list is shared.
#[derive(Debug, Clone)]
pub struct DocumentValidator {
    allow_list: Arc<ElementAllowList>,
}

impl DocumentValidator {
    /// Create a validator enforcing `allow_list`.
    pub fn new(allow_list: Arc<ElementAllowList>) -> Self {
        Self { allow_list }
    }

    /// The allow-list this validator enforces.
    pub fn allow_list(&self) -> &ElementAllowList {
        &self.allow_list
    }

    /// Run every check against `doc`.
    pub fn validate(&self, doc: &Document) -> DocumentReport {
        let frontmatter = doc.frontmatter();
        let elements = extract_elements(doc.compiled_source());

        let checks = vec![
            check_metadata_presence(frontmatter),
            check_author_format(frontmatter),
            check_contributors_shape(frontmatter),
            check_author_inclusion(frontmatter),
            check_adapted_from_format(frontmatter),
            check_prohibited_raw_content(doc.raw()),
            self.check_element_allow_list(&elements),
        ];

        let metadata = frontmatter.and_then(|fm| PuzzleMetadata::from_frontmatter(fm).ok());

        let report = DocumentReport {
            document: doc.id().to_string(),
            checks,
            elements,
            metadata,
        };
        tracing::debug!(
            document = doc.id(),
            passed = report.passed(),
            elements = report.elements.len(),
            "validated document"
        );
        report
    }

    fn check_element_allow_list(&self, elements: &[String]) -> CheckOutcome {
        let disallowed = self
            .allow_list
            .disallowed(elements)
            .into_iter()
            .map(str::to_string)
            .collect();
        CheckOutcome::from_details(CheckName::ElementAllowList, disallowed)
    }
}

fn field(frontmatter: Option<&Value>, field: MetadataField) -> Option<&Value> {
    frontmatter.and_then(|fm| field.get(fm))
}

fn missing(field: MetadataField) -> String {
    format!("missing field: {field}")
}

/// Render a non-string value for a detail line.
fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn check_metadata_presence(frontmatter: Option<&Value>) -> CheckOutcome {
    let Some(fm) = frontmatter else {
        return CheckOutcome::fail(CheckName::MetadataPresence, vec!["missing frontmatter".to_string()]);
    };
    let details = MetadataField::REQUIRED
        .into_iter()
        .filter(|f| f.get(fm).is_none())
        .map(missing)
        .collect();
    CheckOutcome::from_details(CheckName::MetadataPresence, details)
}

fn check_author_format(frontmatter: Option<&Value>) -> CheckOutcome {
    let detail = match field(frontmatter, MetadataField::Author) {
        None => Some(missing(MetadataField::Author)),
        Some(Value::String(s)) if is_address(s) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(format!("not a string: {other}")),
    };
    CheckOutcome::from_details(CheckName::AuthorFormat, detail.into_iter().collect())
}

fn check_contributors_shape(frontmatter: Option<&Value>) -> CheckOutcome {
    let details = match field(frontmatter, MetadataField::Contributors) {
        None => vec![missing(MetadataField::Contributors)],
        Some(Value::Array(items)) if items.is_empty() => {
            vec!["contributors is empty".to_string()]
        }
        Some(Value::Array(items)) => items
            .iter()
            .filter(|item| !item.as_str().is_some_and(is_address))
            .map(describe)
            .collect(),
        Some(other) => vec![format!("not a sequence: {other}")],
    };
    CheckOutcome::from_details(CheckName::ContributorsShape, details)
}

fn check_author_inclusion(frontmatter: Option<&Value>) -> CheckOutcome {
    let author = field(frontmatter, MetadataField::Author);
    let contributors = field(frontmatter, MetadataField::Contributors);

    let detail = match (author, contributors) {
        (None, _) => Some(missing(MetadataField::Author)),
        (_, None) => Some(missing(MetadataField::Contributors)),
        (Some(author), Some(Value::Array(items))) => {
            if items.contains(author) {
                None
            } else {
                Some(format!("{} not in contributors", describe(author)))
            }
        }
        (Some(_), Some(other)) => Some(format!("contributors is not a sequence: {other}")),
    };
    CheckOutcome::from_details(CheckName::AuthorInclusion, detail.into_iter().collect())
}

fn check_adapted_from_format(frontmatter: Option<&Value>) -> CheckOutcome {
    let detail = match field(frontmatter, MetadataField::AdaptedFrom) {
        None | Some(Value::String(_)) => None,
        Some(other) => Some(format!("not a string: {other}")),
    };
    CheckOutcome::from_details(CheckName::AdaptedFromFormat, detail.into_iter().collect())
}

fn check_prohibited_raw_content(raw: &str) -> CheckOutcome {
    let mut details: Vec<String> = Vec::new();
    for m in CallExpressionGrammar::global().match_all(raw) {
        if !details.iter().any(|d| d == m.as_str()) {
            details.push(m.as_str().to_string());
        }
    }
    CheckOutcome::from_details(CheckName::ProhibitedRawContent, details)
}
