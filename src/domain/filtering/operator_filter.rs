use bson::{Bson, Document};
use serde_json::{Map, Value};

/// Prefix reserved by the document store for operators
pub const OPERATOR_SIGIL: char = '$';

/// Containers nested deeper than this are dropped from a filter
pub const MAX_FILTER_DEPTH: usize = 16;

/// The only operators allowed to reach the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    Eq,
    Gte,
    Lte,
    In,
    Or,
}

impl FilterOperator {
    pub const ALL: [FilterOperator; 5] = [
        FilterOperator::Eq,
        FilterOperator::Gte,
        FilterOperator::Lte,
        FilterOperator::In,
        FilterOperator::Or,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "$eq",
            FilterOperator::Gte => "$gte",
            FilterOperator::Lte => "$lte",
            FilterOperator::In => "$in",
            FilterOperator::Or => "$or",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.as_str() == key)
    }
}

impl std::fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A filter that has been through [`sanitize`]. There is no other way to
/// construct one, so holding it proves the allow-list was applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SanitizedFilter(Document);

impl SanitizedFilter {
    pub fn as_document(&self) -> &Document {
        &self.0
    }

    pub fn into_document(self) -> Document {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<SanitizedFilter> for Document {
    fn from(filter: SanitizedFilter) -> Self {
        filter.0
    }
}

/// True for ordinary field names and allow-listed operators
pub fn is_allowed_key(key: &str) -> bool {
    !key.starts_with(OPERATOR_SIGIL) || FilterOperator::from_key(key).is_some()
}

/// Strip every operator key outside the allow-list, at any depth
pub fn sanitize(filter: Document) -> SanitizedFilter {
    SanitizedFilter(sanitize_document(filter, 0))
}

/// Same strip as [`sanitize`] for untyped JSON write payloads
pub fn sanitize_json(value: Value) -> Value {
    sanitize_json_at(value, 0)
}

/// True when any key at any depth falls outside the allow-list
pub fn contains_disallowed_operator(filter: &Document) -> bool {
    filter
        .iter()
        .any(|(key, value)| !is_allowed_key(key) || bson_contains_disallowed(value))
}

fn bson_contains_disallowed(value: &Bson) -> bool {
    match value {
        Bson::Document(doc) => contains_disallowed_operator(doc),
        Bson::Array(items) => items.iter().any(bson_contains_disallowed),
        _ => false,
    }
}

fn sanitize_document(doc: Document, depth: usize) -> Document {
    let mut clean = Document::new();
    for (key, value) in doc {
        if !is_allowed_key(&key) {
            continue;
        }
        if let Some(value) = sanitize_bson(value, depth + 1) {
            clean.insert(key, value);
        }
    }
    clean
}

fn sanitize_bson(value: Bson, depth: usize) -> Option<Bson> {
    match value {
        Bson::Document(_) | Bson::Array(_) if depth > MAX_FILTER_DEPTH => None,
        Bson::Document(doc) => Some(Bson::Document(sanitize_document(doc, depth))),
        Bson::Array(items) => Some(Bson::Array(
            items
                .into_iter()
                .filter_map(|item| sanitize_bson(item, depth + 1))
                .collect(),
        )),
        leaf => Some(leaf),
    }
}

fn sanitize_json_at(value: Value, depth: usize) -> Value {
    match value {
        Value::Object(map) => {
            let mut clean = Map::new();
            for (key, item) in map {
                if !is_allowed_key(&key) {
                    continue;
                }
                if let Some(item) = sanitize_json_child(item, depth + 1) {
                    clean.insert(key, item);
                }
            }
            Value::Object(clean)
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter_map(|item| sanitize_json_child(item, depth + 1))
                .collect(),
        ),
        leaf => leaf,
    }
}

fn sanitize_json_child(value: Value, depth: usize) -> Option<Value> {
    match value {
        Value::Object(_) | Value::Array(_) if depth > MAX_FILTER_DEPTH => None,
        other => Some(sanitize_json_at(other, depth)),
    }
}
