//! Structural detection of document-store injection attempts.
//!
//! Every map key and every string reachable from a request's parameters or
//! JSON body is classified against a fixed set of patterns. Detection is a
//! pure predicate; callers turn a violation into a rejection of the whole
//! request.

use once_cell::sync::Lazy;
use regex::RegexSet;
use serde_json::Value;
use thiserror::Error;

use super::operator_filter::OPERATOR_SIGIL;
use super::raw_parameters::RawParameters;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::QueryParam;

/// Nesting depth beyond which a structure is rejected outright
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Patterns that involve the reserved operator sigil
static SIGIL_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?i)\$[a-z]",
        r"(?i)\$(?:or|and|nor)",
        r"(?i)\$(?:where|expr)",
    ])
    .expect("Invalid regex pattern for operator sigils")
});

/// Sub-structure syntax and server-side scripting indicators
static STRUCTURAL_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?s)\[.*\]",
        r"(?s)\{.*\}",
        r"(?i)this\.",
        r"(?i)function",
        r"(?is)while.*\(",
        r"(?is)sleep.*\(",
        r"(?i)benchmark",
    ])
    .expect("Invalid regex pattern for structural injection")
});

/// True when `value` contains any injection-indicative pattern
pub fn is_suspicious(value: &str) -> bool {
    SIGIL_PATTERNS.is_match(value) || STRUCTURAL_PATTERNS.is_match(value)
}

/// Like [`is_suspicious`] but ignoring patterns built on the operator sigil
pub fn has_structural_pattern(value: &str) -> bool {
    STRUCTURAL_PATTERNS.is_match(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// A map key begins with the operator sigil
    OperatorKey,
    /// A map key matched an injection pattern
    SuspiciousKey,
    /// A string value matched an injection pattern
    SuspiciousValue,
    /// Nesting exceeded the configured depth
    TooDeep,
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViolationKind::OperatorKey => write!(f, "operator key"),
            ViolationKind::SuspiciousKey => write!(f, "suspicious key"),
            ViolationKind::SuspiciousValue => write!(f, "suspicious value"),
            ViolationKind::TooDeep => write!(f, "nesting too deep"),
        }
    }
}

/// Where and why inspection failed. The path is meant for logs only and
/// never goes back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at '{path}'")]
pub struct InjectionViolation {
    pub path: String,
    pub kind: ViolationKind,
}

impl From<InjectionViolation> for DomainError {
    fn from(_: InjectionViolation) -> Self {
        DomainError::InjectionDetected
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strictness {
    Strict,
    SigilTolerant,
}

/// Walks untyped request data looking for injection patterns
#[derive(Debug, Clone, Copy)]
pub struct InjectionDetector {
    max_depth: usize,
}

impl Default for InjectionDetector {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl InjectionDetector {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Inspect every parameter name and value of a query
    pub fn inspect_parameters(&self, params: &RawParameters) -> Result<(), InjectionViolation> {
        for (name, value) in params.iter() {
            self.check_key(name, name)?;

            let tolerant = name
                .parse::<QueryParam>()
                .map(|p| p.tolerates_sigil())
                .unwrap_or(false);

            // Tolerance only covers a plain string value, never structure
            match value {
                Value::String(s) if tolerant => {
                    if has_structural_pattern(s) {
                        return Err(violation(name, ViolationKind::SuspiciousValue));
                    }
                }
                _ => self.walk(value, name, 1, Strictness::Strict)?,
            }
        }
        Ok(())
    }

    /// Inspect a JSON request body
    pub fn inspect_body(&self, body: &Value) -> Result<(), InjectionViolation> {
        self.walk(body, "$body", 0, Strictness::Strict)
    }

    fn walk(
        &self,
        value: &Value,
        path: &str,
        depth: usize,
        strictness: Strictness,
    ) -> Result<(), InjectionViolation> {
        if depth > self.max_depth {
            return Err(violation(path, ViolationKind::TooDeep));
        }

        match value {
            Value::String(s) => {
                let suspicious = match strictness {
                    Strictness::Strict => is_suspicious(s),
                    Strictness::SigilTolerant => has_structural_pattern(s),
                };
                if suspicious {
                    return Err(violation(path, ViolationKind::SuspiciousValue));
                }
                Ok(())
            }
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    let child = format!("{}[{}]", path, index);
                    self.walk(item, &child, depth + 1, strictness)?;
                }
                Ok(())
            }
            Value::Object(map) => {
                for (key, item) in map {
                    let child = format!("{}.{}", path, key);
                    self.check_key(key, &child)?;
                    self.walk(item, &child, depth + 1, strictness)?;
                }
                Ok(())
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => Ok(()),
        }
    }

    fn check_key(&self, key: &str, path: &str) -> Result<(), InjectionViolation> {
        if key.starts_with(OPERATOR_SIGIL) {
            return Err(violation(path, ViolationKind::OperatorKey));
        }
        if is_suspicious(key) {
            return Err(violation(path, ViolationKind::SuspiciousKey));
        }
        Ok(())
    }
}

fn violation(path: &str, kind: ViolationKind) -> InjectionViolation {
    InjectionViolation {
        path: path.to_string(),
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sigil_followed_by_letter_is_suspicious() {
        for input in ["$where", "{$ne: 1}", "a$gt", "$REGEX", "x $in y"] {
            assert!(is_suspicious(input), "{} should be suspicious", input);
        }
    }

    #[test]
    fn test_scripting_indicators_are_suspicious() {
        for input in [
            "this.password == 'x'",
            "function() { return true }",
            "while(true) {}",
            "sleep (5000)",
            "BENCHMARK(1000000, md5(1))",
            "1; Function",
        ] {
            assert!(is_suspicious(input), "{} should be suspicious", input);
        }
    }

    #[test]
    fn test_substructure_syntax_is_suspicious() {
        assert!(is_suspicious("[1,2]"));
        assert!(is_suspicious(r#"{"a": 1}"#));
        // Newlines do not hide a structure
        assert!(is_suspicious("{\n}"));
        assert!(is_suspicious("[\n]"));
    }

    #[test]
    fn test_plain_values_pass() {
        for input in [
            "Ada Lovelace",
            "2023-12-31",
            "2023-12-31T10:00:00Z",
            "totalAmount",
            "desc",
            "42",
            "12.50",
            "O'Brien",
            "cost: $5",
            "",
        ] {
            assert!(!is_suspicious(input), "{} should pass", input);
        }
    }

    #[test]
    fn test_sigil_without_letter_is_not_structural() {
        assert!(!has_structural_pattern("$gt"));
        assert!(!has_structural_pattern("price in $"));
        assert!(has_structural_pattern("{$gt: 1}"));
    }

    #[test]
    fn test_operator_key_in_nested_parameter() {
        let detector = InjectionDetector::default();
        let params = RawParameters::from_pairs([("name[$gt]", "")]);

        let err = detector.inspect_parameters(&params).unwrap_err();
        assert_eq!(err.kind, ViolationKind::OperatorKey);
        assert_eq!(err.path, "name.$gt");
    }

    #[test]
    fn test_json_value_in_parameter() {
        let detector = InjectionDetector::default();
        let params = RawParameters::from_pairs([("name", r#"{"$gt":""}"#)]);

        let err = detector.inspect_parameters(&params).unwrap_err();
        assert_eq!(err.kind, ViolationKind::SuspiciousValue);
    }

    #[test]
    fn test_operator_parameter_name() {
        let detector = InjectionDetector::default();
        let params = RawParameters::from_pairs([("$where", "1")]);

        let err = detector.inspect_parameters(&params).unwrap_err();
        assert_eq!(err.kind, ViolationKind::OperatorKey);
    }

    #[test]
    fn test_search_tolerates_sigil_in_value() {
        let detector = InjectionDetector::default();
        let params = RawParameters::from_pairs([("search", "$5 gift card")]);

        assert!(detector.inspect_parameters(&params).is_ok());
    }

    #[test]
    fn test_search_still_rejects_structure() {
        let detector = InjectionDetector::default();

        let braces = RawParameters::from_pairs([("search", "{$ne: null}")]);
        assert!(detector.inspect_parameters(&braces).is_err());

        let nested = RawParameters::from_pairs([("search[$regex]", ".*")]);
        let err = detector.inspect_parameters(&nested).unwrap_err();
        assert_eq!(err.kind, ViolationKind::OperatorKey);
    }

    #[test]
    fn test_name_does_not_tolerate_sigil() {
        let detector = InjectionDetector::default();
        let params = RawParameters::from_pairs([("name", "$gt")]);

        assert!(detector.inspect_parameters(&params).is_err());
    }

    #[test]
    fn test_clean_listing_query_passes() {
        let detector = InjectionDetector::default();
        let params = RawParameters::from_pairs([
            ("page", "2"),
            ("limit", "5"),
            ("sortField", "totalAmount"),
            ("sortOrder", "desc"),
            ("registrationDateFrom", "2023-01-01"),
            ("registrationDateTo", "2023-12-31"),
            ("totalAmountFrom", "100"),
            ("search", "shoe"),
        ]);

        assert!(detector.inspect_parameters(&params).is_ok());
    }

    #[test]
    fn test_depth_limit_fails_closed() {
        let detector = InjectionDetector::default();

        // Five levels below the parameter are accepted
        let ok = RawParameters::from_pairs([("a[b][c][d][e]", "x")]);
        assert!(detector.inspect_parameters(&ok).is_ok());

        let deep = RawParameters::from_pairs([("a[b][c][d][e][f]", "x")]);
        let err = detector.inspect_parameters(&deep).unwrap_err();
        assert_eq!(err.kind, ViolationKind::TooDeep);
    }

    #[test]
    fn test_body_operator_key_at_depth() {
        let detector = InjectionDetector::default();
        let body = json!({"profile": {"address": {"$set": {"city": "x"}}}});

        let err = detector.inspect_body(&body).unwrap_err();
        assert_eq!(err.kind, ViolationKind::OperatorKey);
        assert_eq!(err.path, "$body.profile.address.$set");
    }

    #[test]
    fn test_body_too_deep() {
        let detector = InjectionDetector::new(2);
        let body = json!({"a": {"b": {"c": "d"}}});

        let err = detector.inspect_body(&body).unwrap_err();
        assert_eq!(err.kind, ViolationKind::TooDeep);
    }

    #[test]
    fn test_body_arrays_are_walked() {
        let detector = InjectionDetector::default();
        let body = json!({"tags": ["ok", "this.constructor"]});

        let err = detector.inspect_body(&body).unwrap_err();
        assert_eq!(err.path, "$body.tags[1]");
    }

    #[test]
    fn test_clean_body_passes() {
        let detector = InjectionDetector::default();
        let body = json!({"name": "Ada", "email": "ada@example.com", "age": 36, "vip": true});

        assert!(detector.inspect_body(&body).is_ok());
    }

    #[test]
    fn test_violation_maps_to_generic_error() {
        let err: DomainError = InjectionViolation {
            path: "name.$where".to_string(),
            kind: ViolationKind::OperatorKey,
        }
        .into();

        assert_eq!(err, DomainError::InjectionDetected);
        assert!(!err.to_string().contains("where"));
    }
}
