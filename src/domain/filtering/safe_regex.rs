use bson::Bson;
use regex::{Regex, RegexBuilder};

/// Characters that carry meaning in a regular expression
const META_CHARACTERS: &[char] = &[
    '.', '*', '+', '?', '^', '$', '{', '}', '(', ')', '|', '[', ']', '\\',
];

/// Upper bound for compiled in-process patterns
const COMPILED_SIZE_LIMIT: usize = 1 << 20;

/// Escape every regex meta-character so the input only ever matches itself
pub fn escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len() * 2);
    for c in input.chars() {
        if META_CHARACTERS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternOptions {
    pub case_insensitive: bool,
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self {
            case_insensitive: true,
        }
    }
}

/// A substring pattern built from user text.
///
/// The raw text is escaped on construction, so the pattern matches the
/// literal input anywhere in a field and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafePattern {
    pattern: String,
    options: PatternOptions,
}

impl SafePattern {
    pub fn new(raw: &str) -> Self {
        Self::with_options(raw, PatternOptions::default())
    }

    pub fn with_options(raw: &str, options: PatternOptions) -> Self {
        Self {
            pattern: escape(raw),
            options,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Store-side option flags
    pub fn flags(&self) -> &'static str {
        if self.options.case_insensitive {
            "i"
        } else {
            ""
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Filter leaf for the document store
    pub fn to_bson(&self) -> Bson {
        Bson::RegularExpression(bson::Regex {
            pattern: self.pattern.clone(),
            options: self.flags().to_string(),
        })
    }

    /// Compile for in-process matching
    pub fn compile(&self) -> Result<Regex, regex::Error> {
        RegexBuilder::new(&self.pattern)
            .case_insensitive(self.options.case_insensitive)
            .size_limit(COMPILED_SIZE_LIMIT)
            .build()
    }
}

impl From<SafePattern> for Bson {
    fn from(pattern: SafePattern) -> Self {
        pattern.to_bson()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_every_meta_character() {
        assert_eq!(escape(".*+?^${}()|[]\\"), r"\.\*\+\?\^\$\{\}\(\)\|\[\]\\");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(escape("Ada Lovelace"), "Ada Lovelace");
        assert_eq!(escape(""), "");
    }

    #[test]
    fn test_wildcard_matches_only_itself() {
        let regex = SafePattern::new(".*").compile().unwrap();

        assert!(regex.is_match("a.*b"));
        assert!(!regex.is_match("anything"));
    }

    #[test]
    fn test_catastrophic_pattern_is_literal() {
        let raw = "(a+)+$";
        let regex = SafePattern::new(raw).compile().unwrap();

        assert!(regex.is_match("xx(a+)+$yy"));
        assert!(!regex.is_match("aaaaaaaaaaaaaaaaaaaaaaaaaaaa!"));
    }

    #[test]
    fn test_case_insensitive_by_default() {
        let pattern = SafePattern::new("ADA");

        assert_eq!(pattern.flags(), "i");
        assert!(pattern.compile().unwrap().is_match("ada lovelace"));
    }

    #[test]
    fn test_case_sensitive_option() {
        let pattern = SafePattern::with_options(
            "ADA",
            PatternOptions {
                case_insensitive: false,
            },
        );

        assert_eq!(pattern.flags(), "");
        assert!(!pattern.compile().unwrap().is_match("ada"));
    }

    #[test]
    fn test_bson_leaf() {
        let bson: Bson = SafePattern::new("a.b").into();

        match bson {
            Bson::RegularExpression(regex) => {
                assert_eq!(regex.pattern, r"a\.b");
                assert_eq!(regex.options, "i");
            }
            other => panic!("expected regex, got {:?}", other),
        }
    }
}
