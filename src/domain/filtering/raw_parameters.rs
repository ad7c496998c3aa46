use serde_json::{Map, Value};

/// Untrusted request parameters as an untyped value tree.
///
/// Bracket notation in names expands into nested maps (`a[b]=1` becomes
/// `{"a": {"b": "1"}}`), `a[]=1` appends to an array and repeated names
/// collect into arrays. Nothing in here has been checked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawParameters(Map<String, Value>);

impl RawParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from decoded `name=value` pairs of a query string
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::new();
        for (name, value) in pairs {
            params.push_pair(name.as_ref(), value.into());
        }
        params
    }

    /// Add one decoded pair, expanding bracket notation
    pub fn push_pair(&mut self, name: &str, value: String) {
        let segments = split_key(name);
        insert_path(&mut self.0, &segments, Value::String(value));
    }

    /// Set a parameter to an already-structured value
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.0.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RawParameters {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}

/// Split `a[b][c]` into `["a", "b", "c"]`. Keys that are not well-formed
/// bracket expressions are kept verbatim as a single segment.
fn split_key(name: &str) -> Vec<String> {
    let Some(open) = name.find('[') else {
        return vec![name.to_string()];
    };
    if open == 0 || !name.ends_with(']') {
        return vec![name.to_string()];
    }

    let mut segments = vec![name[..open].to_string()];
    let mut rest = &name[open..];
    while !rest.is_empty() {
        let Some(inner) = rest.strip_prefix('[') else {
            return vec![name.to_string()];
        };
        let Some(close) = inner.find(']') else {
            return vec![name.to_string()];
        };
        segments.push(inner[..close].to_string());
        rest = &inner[close + 1..];
    }
    segments
}

fn insert_path(target: &mut Map<String, Value>, segments: &[String], value: Value) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };

    // `a=1` or `a[]=1`: both append when the name repeats
    if rest.is_empty() || (rest.len() == 1 && rest[0].is_empty()) {
        match target.get_mut(head) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let previous = existing.take();
                *existing = Value::Array(vec![previous, value]);
            }
            None if rest.is_empty() => {
                target.insert(head.clone(), value);
            }
            None => {
                target.insert(head.clone(), Value::Array(vec![value]));
            }
        }
        return;
    }

    let entry = target
        .entry(head.clone())
        .or_insert_with(|| Value::Object(Map::new()));
    match entry {
        Value::Object(map) => insert_path(map, rest, value),
        Value::Array(items) => {
            let mut nested = Map::new();
            insert_path(&mut nested, rest, value);
            items.push(Value::Object(nested));
        }
        scalar => {
            // `a=1&a[b]=2`: keep both shapes so nothing escapes inspection
            let mut nested = Map::new();
            insert_path(&mut nested, rest, value);
            let previous = scalar.take();
            *scalar = Value::Array(vec![previous, Value::Object(nested)]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_pairs() {
        let params = RawParameters::from_pairs([("page", "1"), ("limit", "5")]);

        assert_eq!(params.get("page"), Some(&json!("1")));
        assert_eq!(params.get("limit"), Some(&json!("5")));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_bracket_notation_nests() {
        let params = RawParameters::from_pairs([("name[$gt]", "")]);

        assert_eq!(params.get("name"), Some(&json!({"$gt": ""})));
    }

    #[test]
    fn test_deep_bracket_notation() {
        let params = RawParameters::from_pairs([("a[b][c][d]", "x")]);

        assert_eq!(params.get("a"), Some(&json!({"b": {"c": {"d": "x"}}})));
    }

    #[test]
    fn test_repeated_names_collect_into_array() {
        let params = RawParameters::from_pairs([("page", "1"), ("page", "2"), ("page", "3")]);

        assert_eq!(params.get("page"), Some(&json!(["1", "2", "3"])));
    }

    #[test]
    fn test_empty_brackets_append() {
        let params = RawParameters::from_pairs([("ids[]", "a"), ("ids[]", "b")]);

        assert_eq!(params.get("ids"), Some(&json!(["a", "b"])));
    }

    #[test]
    fn test_scalar_then_nested_keeps_both() {
        let params = RawParameters::from_pairs([("name", "bob"), ("name[$ne]", "x")]);

        assert_eq!(params.get("name"), Some(&json!(["bob", {"$ne": "x"}])));
    }

    #[test]
    fn test_malformed_brackets_are_literal() {
        let params = RawParameters::from_pairs([("a[b", "1"), ("[x]", "2"), ("c]d[", "3")]);

        assert_eq!(params.get("a[b"), Some(&json!("1")));
        assert_eq!(params.get("[x]"), Some(&json!("2")));
        assert_eq!(params.get("c]d["), Some(&json!("3")));
    }

    #[test]
    fn test_json_looking_value_stays_a_string() {
        let params = RawParameters::from_pairs([("name", r#"{"$gt":""}"#)]);

        assert_eq!(params.get("name"), Some(&json!(r#"{"$gt":""}"#)));
    }
}
