//! Untrusted input inspection and filter hardening

pub mod injection;
pub mod operator_filter;
pub mod raw_parameters;
pub mod safe_regex;

pub use injection::{InjectionDetector, InjectionViolation, ViolationKind};
pub use operator_filter::{sanitize, sanitize_json, FilterOperator, SanitizedFilter};
pub use raw_parameters::RawParameters;
pub use safe_regex::{PatternOptions, SafePattern};
