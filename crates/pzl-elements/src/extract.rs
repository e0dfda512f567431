//! # Deduplicating Extractor
//!
//! `extract_elements(text)` is `dedupe(map(normalize, match_all(text)))`.
//! Deduplication happens once, after normalization, which yields the same
//! set as deduping raw matches first and again afterwards. Output order is
//! first occurrence in the scanned text; no check depends on it.

use std::collections::HashMap;

use serde::Serialize;

use crate::grammar::CallExpressionGrammar;
use crate::normalize::normalize;

/// A canonical element name and how many times it was instantiated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementCount {
    /// Canonical element name.
    pub name: String,
    /// Number of call-expression occurrences.
    pub occurrences: usize,
}

/// Distinct canonical element names in `text`, in first-occurrence order.
///
/// Returns an empty vector when nothing matches.
pub fn extract_elements(text: &str) -> Vec<String> {
    extract_element_counts(text)
        .into_iter()
        .map(|count| count.name)
        .collect()
}

/// Like [`extract_elements`], keeping an occurrence count per name.
pub fn extract_element_counts(text: &str) -> Vec<ElementCount> {
    let mut counts: Vec<ElementCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for raw in CallExpressionGrammar::global().match_all(text) {
        let name = normalize(raw.as_str());
        match index.get(name) {
            Some(&i) => counts[i].occurrences += 1,
            None => {
                index.insert(name, counts.len());
                counts.push(ElementCount {
                    name: name.to_string(),
                    occurrences: 1,
                });
            }
        }
    }

    counts
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::grammar::{CallWrapper, OperandShape};
    use crate::normalize::wrap;
    use proptest::prelude::*;

    fn occurrence() -> impl Strategy<Value = (usize, CallWrapper, OperandShape)> {
        (
            0usize..6,
            prop_oneof![Just(CallWrapper::Multi), Just(CallWrapper::Single)],
            prop_oneof![
                Just(OperandShape::Member),
                Just(OperandShape::Literal),
                Just(OperandShape::Ident),
            ],
        )
    }

    proptest! {
        /// N distinct names repeated M >= N times yield exactly N entries,
        /// ordered by first occurrence.
        #[test]
        fn dedupes_to_distinct_names_in_order(
            names in prop::collection::hash_set("[a-z][a-zA-Z0-9]{0,8}", 6..=6),
            picks in prop::collection::vec(occurrence(), 1..40),
        ) {
            let names: Vec<String> = names.into_iter().collect();
            let mut text = String::new();
            let mut expected: Vec<String> = Vec::new();
            for (i, wrapper, shape) in &picks {
                let name = &names[*i];
                text.push_str(&wrap(*wrapper, *shape, name));
                text.push_str(", {children: []});\n");
                if !expected.contains(name) {
                    expected.push(name.clone());
                }
            }
            prop_assert_eq!(extract_elements(&text), expected);
        }

        /// Text built from characters the wrappers cannot form never matches.
        #[test]
        fn no_matches_without_wrapper(text in "[a-zA-Z0-9 \n.,\"(){}-]{0,200}") {
            prop_assert!(extract_elements(&text).is_empty());
        }
    }
}
