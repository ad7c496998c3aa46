//! In-process evaluation of sanitized filters against BSON documents.
//!
//! Supports exactly the operators of the allow-list. Anything else fails
//! to match.

use std::cmp::Ordering;

use bson::{Bson, Document};
use regex::RegexBuilder;

use crate::domain::filtering::{FilterOperator, SanitizedFilter};

const REGEX_SIZE_LIMIT: usize = 1 << 20;

/// True when `doc` satisfies every clause of `filter`
pub fn matches(doc: &Document, filter: &SanitizedFilter) -> bool {
    matches_document(doc, filter.as_document())
}

fn matches_document(doc: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, condition)| {
        if key.starts_with('$') {
            match FilterOperator::from_key(key) {
                Some(FilterOperator::Or) => matches_any(doc, condition),
                _ => false,
            }
        } else {
            matches_field(doc.get(key), condition)
        }
    })
}

fn matches_any(doc: &Document, branches: &Bson) -> bool {
    match branches {
        Bson::Array(items) => items.iter().any(|branch| match branch {
            Bson::Document(clause) => matches_document(doc, clause),
            _ => false,
        }),
        _ => false,
    }
}

fn matches_field(value: Option<&Bson>, condition: &Bson) -> bool {
    match condition {
        Bson::Document(ops) if is_operator_document(ops) => ops
            .iter()
            .all(|(op, arg)| matches_operator(value, op, arg)),
        Bson::RegularExpression(regex) => match value {
            Some(Bson::String(text)) => RegexBuilder::new(&regex.pattern)
                .case_insensitive(regex.options.contains('i'))
                .size_limit(REGEX_SIZE_LIMIT)
                .build()
                .map(|compiled| compiled.is_match(text))
                .unwrap_or(false),
            _ => false,
        },
        expected => value.is_some_and(|actual| values_equal(actual, expected)),
    }
}

fn is_operator_document(doc: &Document) -> bool {
    !doc.is_empty() && doc.keys().all(|k| k.starts_with('$'))
}

fn matches_operator(value: Option<&Bson>, op: &str, arg: &Bson) -> bool {
    let Some(operator) = FilterOperator::from_key(op) else {
        return false;
    };
    match operator {
        FilterOperator::Eq => value.is_some_and(|v| values_equal(v, arg)),
        FilterOperator::Gte => value
            .and_then(|v| compare(v, arg))
            .is_some_and(|ord| ord != Ordering::Less),
        FilterOperator::Lte => value
            .and_then(|v| compare(v, arg))
            .is_some_and(|ord| ord != Ordering::Greater),
        FilterOperator::In => match (value, arg) {
            (Some(v), Bson::Array(candidates)) => candidates.iter().any(|c| values_equal(v, c)),
            _ => false,
        },
        FilterOperator::Or => false,
    }
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(n) => Some(f64::from(*n)),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(n) => Some(*n),
        _ => None,
    }
}

fn values_equal(left: &Bson, right: &Bson) -> bool {
    match (as_number(left), as_number(right)) {
        (Some(a), Some(b)) => a == b,
        _ => left == right,
    }
}

/// Ordering between two values of comparable types, `None` otherwise
pub fn compare(left: &Bson, right: &Bson) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (as_number(left), as_number(right)) {
        return a.partial_cmp(&b);
    }
    match (left, right) {
        (Bson::DateTime(a), Bson::DateTime(b)) => Some(a.cmp(b)),
        (Bson::String(a), Bson::String(b)) => Some(a.cmp(b)),
        (Bson::ObjectId(a), Bson::ObjectId(b)) => Some(a.bytes().cmp(&b.bytes())),
        (Bson::Boolean(a), Bson::Boolean(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Sort key comparison where absent values order before present ones
pub fn compare_for_sort(left: Option<&Bson>, right: Option<&Bson>) -> Ordering {
    fn present<'a>(v: Option<&'a Bson>) -> Option<&'a Bson> {
        v.filter(|b| !matches!(b, Bson::Null))
    }
    match (present(left), present(right)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare(a, b).unwrap_or(Ordering::Equal),
    }
}
