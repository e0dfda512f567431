//! # Call-Expression Grammar
//!
//! Recognizes JSX runtime calls in compiled MDX output.
//!
//! ```text
//! call      := wrapper "(" operand
//! wrapper   := "_jsxs" | "_jsx"
//! operand   := member | literal | ident
//! member    := "_components." name
//! literal   := '"' name '"'
//! ident     := name
//! name      := [a-zA-Z0-9_-]+
//! ```
//!
//! `member` is an element routed through the MDX override table (headings,
//! paragraphs, code blocks), `literal` is an intrinsic tag the compiler
//! emits directly, and `ident` is a component referenced by name. Operand
//! alternatives are tried in the order listed and the leftmost match wins,
//! so `_jsx(_components.h1` is a `member` and never an `ident` named
//! `_components`.
//!
//! The grammar under-approximates real call syntax on purpose. Spread
//! props, nested calls and dotted references deeper than one level of
//! `_components.` are not matched.
//!
//! The separator in `member` is a literal dot. A looser any-character
//! separator would read `_jsx(_components$h1` as the member
//! `_components$h1`; here `$` ends the name, so the match is the ident
//! `_components`. Real compiler output only ever uses the dot, so
//! allow-list outcomes are the same either way.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Name character class shared by every operand shape.
const NAME: &str = "[a-zA-Z0-9_-]+";

/// Prefix of the override namespace member access.
pub const COMPONENTS_PREFIX: &str = "_components.";

static GRAMMAR: Lazy<CallExpressionGrammar> = Lazy::new(CallExpressionGrammar::compile);

/// The runtime helper a compiled element invocation goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallWrapper {
    /// `_jsxs(`: element with several children.
    Multi,
    /// `_jsx(`: element with zero or one child.
    Single,
}

impl CallWrapper {
    /// Both wrappers, multi-child first (the order they are tried in).
    pub const ALL: [CallWrapper; 2] = [CallWrapper::Multi, CallWrapper::Single];

    /// The call prefix, opening parenthesis included.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Multi => "_jsxs(",
            Self::Single => "_jsx(",
        }
    }
}

/// Syntactic shape of the first operand of a wrapper call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandShape {
    /// `_components.<name>`
    Member,
    /// `"<name>"`
    Literal,
    /// `<name>`
    Ident,
}

impl OperandShape {
    /// All shapes, in grammar order.
    pub const ALL: [OperandShape; 3] = [OperandShape::Member, OperandShape::Literal, OperandShape::Ident];

    fn group(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Literal => "literal",
            Self::Ident => "ident",
        }
    }
}

/// One grammar match inside a scanned string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMatch<'t> {
    text: &'t str,
    start: usize,
    wrapper: CallWrapper,
    shape: OperandShape,
}

impl<'t> RawMatch<'t> {
    /// The matched substring, wrapper prefix included.
    pub fn as_str(&self) -> &'t str {
        self.text
    }

    /// Byte offset of the match in the scanned string.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset one past the end of the match.
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// Which call wrapper was matched.
    pub fn wrapper(&self) -> CallWrapper {
        self.wrapper
    }

    /// Which operand shape was matched.
    pub fn shape(&self) -> OperandShape {
        self.shape
    }
}

/// The compiled call-expression matcher.
///
/// Obtain the shared instance with [`CallExpressionGrammar::global`]. All
/// methods take `&self` and scan from offset zero on every call.
#[derive(Debug)]
pub struct CallExpressionGrammar {
    regex: Regex,
}

impl CallExpressionGrammar {
    /// The process-wide grammar instance.
    pub fn global() -> &'static CallExpressionGrammar {
        &GRAMMAR
    }

    fn compile() -> Self {
        let pattern = Self::pattern();
        // Built from constants only; `pattern_compiles` covers it.
        let regex = Regex::new(&pattern).expect("call-expression grammar must compile");
        Self { regex }
    }

    /// The regular expression implementing the grammar.
    pub fn pattern() -> String {
        let wrapper = r"(?P<wrapper>_jsxs|_jsx)\(";
        let member = format!(r"(?P<member>_components\.{NAME})");
        let literal = format!(r#"(?P<literal>"{NAME}")"#);
        let ident = format!(r"(?P<ident>{NAME})");
        format!("{wrapper}(?:{member}|{literal}|{ident})")
    }

    /// Every non-overlapping match in `text`, ordered by start offset.
    pub fn match_all<'t>(&self, text: &'t str) -> Vec<RawMatch<'t>> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| Self::classify(&caps))
            .collect()
    }

    /// The first match in `text`, if any.
    pub fn first_match<'t>(&self, text: &'t str) -> Option<RawMatch<'t>> {
        self.regex.captures(text).and_then(|caps| Self::classify(&caps))
    }

    /// Whether `text` contains at least one match.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    fn classify<'t>(caps: &Captures<'t>) -> Option<RawMatch<'t>> {
        let whole = caps.get(0)?;
        let wrapper = match caps.name("wrapper")?.as_str() {
            "_jsxs" => CallWrapper::Multi,
            _ => CallWrapper::Single,
        };
        let shape = OperandShape::ALL
            .into_iter()
            .find(|shape| caps.name(shape.group()).is_some())?;
        Some(RawMatch {
            text: whole.as_str(),
            start: whole.start(),
            wrapper,
            shape,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(text: &str) -> Vec<&str> {
        CallExpressionGrammar::global()
            .match_all(text)
            .into_iter()
            .map(|m| m.as_str())
            .collect()
    }

    #[test]
    fn pattern_compiles() {
        assert!(Regex::new(&CallExpressionGrammar::pattern()).is_ok());
    }

    #[test]
    fn matches_all_three_shapes_with_both_wrappers() {
        let text = r#"_jsx(_components.h1, {}) _jsxs("div", {}) _jsx(Callout, {})"#;
        let found = CallExpressionGrammar::global().match_all(text);
        assert_eq!(found.len(), 3);

        assert_eq!(found[0].as_str(), "_jsx(_components.h1");
        assert_eq!(found[0].wrapper(), CallWrapper::Single);
        assert_eq!(found[0].shape(), OperandShape::Member);

        assert_eq!(found[1].as_str(), r#"_jsxs("div""#);
        assert_eq!(found[1].wrapper(), CallWrapper::Multi);
        assert_eq!(found[1].shape(), OperandShape::Literal);

        assert_eq!(found[2].as_str(), "_jsx(Callout");
        assert_eq!(found[2].shape(), OperandShape::Ident);
    }

    #[test]
    fn member_wins_over_ident() {
        let found = CallExpressionGrammar::global().match_all("_jsxs(_components.code");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].shape(), OperandShape::Member);
    }

    #[test]
    fn namespace_separator_is_a_literal_dot() {
        // Without the dot the operand is just an identifier.
        assert_eq!(matches("_jsx(_componentsXh1"), vec!["_jsx(_componentsXh1"]);
        let found = CallExpressionGrammar::global().match_all("_jsx(_componentsXh1");
        assert_eq!(found[0].shape(), OperandShape::Ident);
    }

    #[test]
    fn non_name_separator_ends_the_ident() {
        let found = CallExpressionGrammar::global().match_all("_jsx(_components$h1, {})");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].as_str(), "_jsx(_components");
        assert_eq!(found[0].shape(), OperandShape::Ident);
        assert_eq!(crate::extract_elements("_jsx(_components$h1, {})"), vec!["_components"]);
    }

    #[test]
    fn unterminated_literal_is_not_matched() {
        assert!(matches(r#"_jsx("div, {})"#).is_empty());
    }

    #[test]
    fn operands_outside_character_class_are_not_matched() {
        assert!(matches("_jsx({...props})").is_empty());
        assert!(matches("_jsx((x) => x)").is_empty());
        assert!(matches("_jsx( Callout)").is_empty());
        assert!(matches(r#"_jsx("data.table")"#).is_empty());
    }

    #[test]
    fn dotted_reference_matches_only_first_segment() {
        assert_eq!(matches("_jsx(Foo.Bar, {})"), vec!["_jsx(Foo"]);
        assert_eq!(matches("_jsx(_components.a.b)"), vec!["_jsx(_components.a"]);
    }

    #[test]
    fn hyphens_and_underscores_are_name_characters() {
        assert_eq!(matches(r#"_jsx("my-tag_2", {})"#), vec![r#"_jsx("my-tag_2""#]);
    }

    #[test]
    fn wrapper_must_be_followed_by_parenthesis() {
        assert!(matches("_jsx Callout").is_empty());
        assert!(matches("_jsxs").is_empty());
        assert!(matches("jsx(Callout)").is_empty());
    }

    #[test]
    fn matches_are_ordered_by_position() {
        let text = r#"_jsx("b") _jsx("a") _jsx("c")"#;
        let found = CallExpressionGrammar::global().match_all(text);
        let starts: Vec<usize> = found.iter().map(|m| m.start()).collect();
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        assert_eq!(starts, sorted);
        assert_eq!(found[0].end(), r#"_jsx("b""#.len());
    }

    #[test]
    fn repeated_scans_start_from_zero() {
        let grammar = CallExpressionGrammar::global();
        let text = r#"_jsx("p", {children: "x"})"#;
        for _ in 0..3 {
            assert!(grammar.is_match(text));
            assert_eq!(grammar.match_all(text).len(), 1);
            assert_eq!(grammar.first_match(text).map(|m| m.start()), Some(0));
        }
    }

    #[test]
    fn no_match_in_plain_markdown() {
        let text = "# Title\n\nSome *emphasis* and `code`.\n";
        assert!(matches(text).is_empty());
        assert!(!CallExpressionGrammar::global().is_match(text));
        assert!(CallExpressionGrammar::global().first_match(text).is_none());
    }
}
