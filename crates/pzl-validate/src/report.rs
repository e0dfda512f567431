//! # Validation Reports
//!
//! Every document gets one [`CheckOutcome`] per [`CheckName`], pass or
//! fail, with the offending values on failure. Documents that could not be
//! read or compiled appear as [`DocumentFailure`] entries instead. The
//! [`CorpusReport`] serializes to JSON for CI artifacts and renders a
//! plain-text summary through `Display`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use pzl_core::PuzzleMetadata;

/// The independent checks run against every document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckName {
    /// Frontmatter has `author` and `contributors`.
    MetadataPresence,
    /// `author` is an address.
    AuthorFormat,
    /// `contributors` is a non-empty sequence of addresses.
    ContributorsShape,
    /// `contributors` contains `author`.
    AuthorInclusion,
    /// `adapted_from`, when present, is a string.
    AdaptedFromFormat,
    /// The raw source contains no compiled-looking call expressions.
    ProhibitedRawContent,
    /// Every element in the compiled output is allow-listed.
    ElementAllowList,
}

impl CheckName {
    /// All checks, in the order they run and are reported.
    pub const ALL: [CheckName; 7] = [
        CheckName::MetadataPresence,
        CheckName::AuthorFormat,
        CheckName::ContributorsShape,
        CheckName::AuthorInclusion,
        CheckName::AdaptedFromFormat,
        CheckName::ProhibitedRawContent,
        CheckName::ElementAllowList,
    ];

    /// Kebab-case identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MetadataPresence => "metadata-presence",
            Self::AuthorFormat => "author-format",
            Self::ContributorsShape => "contributors-shape",
            Self::AuthorInclusion => "author-inclusion",
            Self::AdaptedFromFormat => "adapted-from-format",
            Self::ProhibitedRawContent => "prohibited-raw-content",
            Self::ElementAllowList => "element-allow-list",
        }
    }

    /// One-line description for human output.
    pub fn description(self) -> &'static str {
        match self {
            Self::MetadataPresence => "frontmatter defines author and contributors",
            Self::AuthorFormat => "author is an address",
            Self::ContributorsShape => "contributors is a non-empty list of addresses",
            Self::AuthorInclusion => "contributors includes the author",
            Self::AdaptedFromFormat => "adapted_from is a string when present",
            Self::ProhibitedRawContent => "source contains no compiled JSX call syntax",
            Self::ElementAllowList => "only allow-listed elements are rendered",
        }
    }
}

impl fmt::Display for CheckName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one check on one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    /// Which check ran.
    pub check: CheckName,
    /// Whether it passed.
    pub passed: bool,
    /// Offending values when it failed; empty when it passed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl CheckOutcome {
    /// A passing outcome.
    pub fn pass(check: CheckName) -> Self {
        Self {
            check,
            passed: true,
            details: Vec::new(),
        }
    }

    /// A failing outcome with the given details.
    pub fn fail(check: CheckName, details: Vec<String>) -> Self {
        Self {
            check,
            passed: false,
            details,
        }
    }

    /// Pass when `details` is empty, fail with them otherwise.
    pub fn from_details(check: CheckName, details: Vec<String>) -> Self {
        if details.is_empty() {
            Self::pass(check)
        } else {
            Self::fail(check, details)
        }
    }
}

/// Outcome of validating one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentReport {
    /// Document identifier.
    pub document: String,
    /// One outcome per check, in [`CheckName::ALL`] order.
    pub checks: Vec<CheckOutcome>,
    /// Distinct elements found in the compiled output.
    pub elements: Vec<String>,
    /// Typed metadata, when the frontmatter is fully valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PuzzleMetadata>,
}

impl DocumentReport {
    /// Whether every check passed.
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// The failing checks.
    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.checks.iter().filter(|c| !c.passed)
    }

    /// Look up the outcome of one check.
    pub fn outcome(&self, check: CheckName) -> Option<&CheckOutcome> {
        self.checks.iter().find(|c| c.check == check)
    }
}

/// A document that could not be validated at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentFailure {
    /// Document identifier.
    pub document: String,
    /// Why it could not be read or compiled.
    pub error: String,
}

/// Aggregate outcome of a corpus run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusReport {
    /// Content root that was scanned.
    pub root: String,
    /// When the run finished.
    pub generated_at: DateTime<Utc>,
    /// Validated documents, sorted by identifier.
    pub documents: Vec<DocumentReport>,
    /// Documents that could not be validated, sorted by identifier.
    pub failures: Vec<DocumentFailure>,
}

impl CorpusReport {
    /// Build a report, sorting entries by document identifier.
    pub fn new(
        root: impl Into<String>,
        mut documents: Vec<DocumentReport>,
        mut failures: Vec<DocumentFailure>,
    ) -> Self {
        documents.sort_by(|a, b| a.document.cmp(&b.document));
        failures.sort_by(|a, b| a.document.cmp(&b.document));
        Self {
            root: root.into(),
            generated_at: Utc::now(),
            documents,
            failures,
        }
    }

    /// Number of documents discovered.
    pub fn total(&self) -> usize {
        self.documents.len() + self.failures.len()
    }

    /// Number of documents whose every check passed.
    pub fn passed_count(&self) -> usize {
        self.documents.iter().filter(|d| d.passed()).count()
    }

    /// Whether every document was validated and passed every check.
    pub fn passed(&self) -> bool {
        self.failures.is_empty() && self.documents.iter().all(DocumentReport::passed)
    }

    /// Process exit status for this report.
    pub fn exit_code(&self) -> u8 {
        if self.passed() {
            0
        } else {
            1
        }
    }
}

impl fmt::Display for CorpusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for doc in &self.documents {
            let status = if doc.passed() { "PASS" } else { "FAIL" };
            writeln!(f, "{status} {}", doc.document)?;
            for outcome in doc.failures() {
                writeln!(f, "  ✗ {} ({})", outcome.check, outcome.check.description())?;
                for detail in &outcome.details {
                    writeln!(f, "      {detail}")?;
                }
            }
        }
        for failure in &self.failures {
            writeln!(f, "ERROR {}", failure.document)?;
            writeln!(f, "      {}", failure.error)?;
        }

        let failed = self.documents.len() - self.passed_count();
        writeln!(f)?;
        writeln!(f, "=== Puzzle Content Validation ===")?;
        writeln!(f, "Root:    {}", self.root)?;
        writeln!(f, "Total:   {}", self.total())?;
        writeln!(f, "Passed:  {}", self.passed_count())?;
        writeln!(f, "Failed:  {failed}")?;
        write!(f, "Errored: {}", self.failures.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(name: &str, failing: &[CheckName]) -> DocumentReport {
        DocumentReport {
            document: name.to_string(),
            checks: CheckName::ALL
                .into_iter()
                .map(|c| {
                    if failing.contains(&c) {
                        CheckOutcome::fail(c, vec![format!("bad {c}")])
                    } else {
                        CheckOutcome::pass(c)
                    }
                })
                .collect(),
            elements: vec![],
            metadata: None,
        }
    }

    #[test]
    fn check_names_serialize_kebab_case() {
        for check in CheckName::ALL {
            let json = serde_json::to_value(check).unwrap();
            assert_eq!(json, check.as_str());
        }
    }

    #[test]
    fn from_details_passes_on_empty() {
        assert!(CheckOutcome::from_details(CheckName::AuthorFormat, vec![]).passed);
        let failed = CheckOutcome::from_details(CheckName::AuthorFormat, vec!["x".into()]);
        assert!(!failed.passed);
        assert_eq!(failed.details, vec!["x"]);
    }

    #[test]
    fn document_report_failures_and_lookup() {
        let doc = report("a.mdx", &[CheckName::AuthorInclusion]);
        assert!(!doc.passed());
        assert_eq!(doc.failures().count(), 1);
        assert!(!doc.outcome(CheckName::AuthorInclusion).unwrap().passed);
        assert!(doc.outcome(CheckName::AuthorFormat).unwrap().passed);
    }

    #[test]
    fn corpus_report_sorts_and_counts() {
        let corpus = CorpusReport::new(
            "puzzles",
            vec![report("b.mdx", &[]), report("a.mdx", &[CheckName::ElementAllowList])],
            vec![DocumentFailure {
                document: "c.mdx".into(),
                error: "compiler exited with 1".into(),
            }],
        );
        assert_eq!(corpus.documents[0].document, "a.mdx");
        assert_eq!(corpus.total(), 3);
        assert_eq!(corpus.passed_count(), 1);
        assert!(!corpus.passed());
        assert_eq!(corpus.exit_code(), 1);
    }

    #[test]
    fn document_failure_alone_fails_the_run() {
        let corpus = CorpusReport::new(
            "puzzles",
            vec![report("a.mdx", &[])],
            vec![DocumentFailure {
                document: "b.mdx".into(),
                error: "unreadable".into(),
            }],
        );
        assert_eq!(corpus.exit_code(), 1);
    }

    #[test]
    fn clean_run_exits_zero() {
        let corpus = CorpusReport::new("puzzles", vec![report("a.mdx", &[])], vec![]);
        assert!(corpus.passed());
        assert_eq!(corpus.exit_code(), 0);
    }

    #[test]
    fn summary_names_failing_checks_and_details() {
        let corpus = CorpusReport::new(
            "puzzles",
            vec![report("eth/4.mdx", &[CheckName::ElementAllowList])],
            vec![],
        );
        let text = corpus.to_string();
        assert!(text.contains("FAIL eth/4.mdx"));
        assert!(text.contains("element-allow-list"));
        assert!(text.contains("bad element-allow-list"));
        assert!(text.contains("Failed:  1"));
    }

    #[test]
    fn json_report_omits_empty_details() {
        let corpus = CorpusReport::new("puzzles", vec![report("a.mdx", &[])], vec![]);
        let json = serde_json::to_value(&corpus).unwrap();
        assert!(json["documents"][0]["checks"][0].get("details").is_none());
        assert_eq!(json["documents"][0]["checks"][0]["check"], "metadata-presence");
    }
}
