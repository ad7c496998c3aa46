//! Property-based tests using proptest
//!
//! These tests generate many random inputs to check the invariants of the
//! filtering primitives and of parameter validation.

use bson::{Bson, Document};
use proptest::prelude::*;

use query_shield::application::query::pagination::{PageSpec, MAX_PAGE_SIZE};
use query_shield::application::validation::validate_parameters;
use query_shield::domain::filtering::injection::is_suspicious;
use query_shield::domain::filtering::operator_filter::{contains_disallowed_operator, sanitize};
use query_shield::domain::filtering::safe_regex::escape;
use query_shield::domain::filtering::{RawParameters, SafePattern};

/// Printable ASCII, including every regex metacharacter
fn printable() -> impl Strategy<Value = String> {
    "[ -~]{0,40}"
}

/// Keys mixing plain field names, allow-listed and forbidden operators
fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}",
        Just("$eq".to_string()),
        Just("$gte".to_string()),
        Just("$in".to_string()),
        Just("$or".to_string()),
        Just("$ne".to_string()),
        Just("$where".to_string()),
        Just("$regex".to_string()),
        Just("$gt".to_string()),
    ]
}

fn bson_strategy() -> impl Strategy<Value = Bson> {
    let leaf = prop_oneof![
        any::<i32>().prop_map(Bson::Int32),
        "[a-z$ ]{0,10}".prop_map(Bson::String),
        any::<bool>().prop_map(Bson::Boolean),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Bson::Array),
            prop::collection::vec((key_strategy(), inner), 0..4).prop_map(|entries| {
                Bson::Document(entries.into_iter().collect::<Document>())
            }),
        ]
    })
}

fn document_strategy() -> impl Strategy<Value = Document> {
    prop::collection::vec((key_strategy(), bson_strategy()), 0..5)
        .prop_map(|entries| entries.into_iter().collect())
}

proptest! {
    /// Any string with the sigil followed by a letter is suspicious
    #[test]
    fn test_sigil_followed_by_letter_is_suspicious(
        prefix in "[ -~]{0,10}",
        letter in "[a-zA-Z]",
        suffix in "[ -~]{0,10}",
    ) {
        let value = format!("{}${}{}", prefix, letter, suffix);
        prop_assert!(is_suspicious(&value));
    }

    /// Plain words and numbers are never flagged
    #[test]
    fn test_plain_text_is_not_suspicious(value in "[a-zA-Z0-9 @.,'-]{0,30}") {
        prop_assume!(!value.to_lowercase().contains("function"));
        prop_assume!(!value.to_lowercase().contains("benchmark"));
        prop_assume!(!value.to_lowercase().contains("this."));
        prop_assert!(!is_suspicious(&value));
    }

    /// The escaped pattern matches exactly the literal input
    #[test]
    fn test_escape_matches_only_literal(value in printable()) {
        let anchored = regex::Regex::new(&format!("^{}$", escape(&value))).unwrap();
        prop_assert!(anchored.is_match(&value));

        let compiled = SafePattern::new(&value).compile().unwrap();
        prop_assert!(compiled.is_match(&value));
        prop_assert!(compiled.is_match(&value.to_uppercase()));
    }

    /// Metacharacters never widen the match to unrelated text
    #[test]
    fn test_escape_never_widens(value in "[.*+?^${}()|\\[\\]\\\\]{1,12}") {
        let compiled = SafePattern::new(&value).compile().unwrap();
        prop_assert!(!compiled.is_match("plain customer name"));
    }

    /// Sanitizing removes every forbidden key and is idempotent
    #[test]
    fn test_sanitize_is_idempotent(doc in document_strategy()) {
        let once = sanitize(doc);
        prop_assert!(!contains_disallowed_operator(once.as_document()));

        let twice = sanitize(once.as_document().clone());
        prop_assert_eq!(once, twice);
    }

    /// Limits above the maximum are capped, never rejected
    #[test]
    fn test_limit_is_capped(limit in 1u64..1_000_000, page in 1u64..1_000) {
        let raw = RawParameters::from_pairs([
            ("limit", limit.to_string()),
            ("page", page.to_string()),
        ]);
        let params = validate_parameters(&raw).unwrap();
        let spec = PageSpec::resolve(&params);

        prop_assert_eq!(spec.page_size(), limit.min(MAX_PAGE_SIZE));
        prop_assert_eq!(spec.skip(), (page - 1) * spec.page_size());
    }

    /// Zero, negative and non-numeric limits are rejected
    #[test]
    fn test_invalid_limit_is_rejected(limit in prop_oneof![
        Just("0".to_string()),
        (1i64..1_000).prop_map(|n| (-n).to_string()),
        "[a-z]{1,6}",
    ]) {
        let raw = RawParameters::from_pairs([("limit", limit)]);
        prop_assert!(validate_parameters(&raw).is_err());
    }
}
