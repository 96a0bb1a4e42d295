#![forbid(unsafe_code)]

//! Conventional commit header rules
//!
//! Only the header (first line) of a commit message is checked. Extracting
//! it from a full message is the caller's job; [`header_of`] covers the
//! common case.

use crate::error::ConfigError;
use crate::types::Severity;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Default maximum header length in characters
pub const DEFAULT_HEADER_MAX_LENGTH: usize = 72;

/// Commit types accepted by `type-enum`
pub const COMMIT_TYPES: [&str; 11] = [
    "build", "chore", "ci", "docs", "feat", "fix", "perf", "refactor", "revert", "style", "test",
];

const HEADER_PATTERN: &str = r"^(?P<type>\w*)(?:\((?P<scope>.*)\))?(?P<breaking>!)?: (?P<subject>.*)$";

/// A commit header split into its conventional parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitHeader {
    #[serde(rename = "type")]
    pub kind: String,
    pub scope: Option<String>,
    pub breaking: bool,
    pub subject: String,
}

/// One failed header rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitViolation {
    pub rule: &'static str,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for CommitViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.message, self.rule)
    }
}

/// The shared commit header rule set
#[derive(Debug, Clone)]
pub struct CommitRules {
    header_max_length: usize,
    pattern: Regex,
}

impl CommitRules {
    /// Creates the rule set with a custom header length limit
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if `header_max_length` is zero.
    pub fn new(header_max_length: usize) -> Result<Self, ConfigError> {
        if header_max_length == 0 {
            return Err(ConfigError::Validation(
                "header_max_length must be greater than 0".to_string(),
            ));
        }
        let pattern = Regex::new(HEADER_PATTERN).map_err(|e| {
            ConfigError::InvalidRegex(format!("Failed to compile header pattern: {}", e))
        })?;
        Ok(Self {
            header_max_length,
            pattern,
        })
    }

    /// The shared rule set
    pub fn shared() -> Result<Self, ConfigError> {
        Self::new(DEFAULT_HEADER_MAX_LENGTH)
    }

    pub fn header_max_length(&self) -> usize {
        self.header_max_length
    }

    /// Splits a header into type, scope, breaking marker and subject
    ///
    /// Returns `None` if the header does not have the `type(scope)!: subject`
    /// shape.
    pub fn parse_header(&self, header: &str) -> Option<CommitHeader> {
        let caps = self.pattern.captures(header)?;
        Some(CommitHeader {
            kind: caps.name("type").map_or("", |m| m.as_str()).to_string(),
            scope: caps
                .name("scope")
                .map(|m| m.as_str().to_string())
                .filter(|s| !s.is_empty()),
            breaking: caps.name("breaking").is_some(),
            subject: caps.name("subject").map_or("", |m| m.as_str()).to_string(),
        })
    }

    /// Checks a header against every rule
    ///
    /// An empty result means the header passes.
    pub fn check(&self, header: &str) -> Vec<CommitViolation> {
        let mut violations = Vec::new();
        let mut fail = |rule: &'static str, message: String| {
            violations.push(CommitViolation {
                rule,
                severity: Severity::Error,
                message,
            });
        };

        if header.trim() != header {
            fail(
                "header-trim",
                "header must not be surrounded by whitespace".to_string(),
            );
        }

        let length = header.chars().count();
        if length > self.header_max_length {
            fail(
                "header-max-length",
                format!(
                    "header must not be longer than {} characters, current length is {}",
                    self.header_max_length, length
                ),
            );
        }

        let parsed = self.parse_header(header);
        let kind = parsed.as_ref().map_or("", |h| h.kind.as_str());
        let subject = parsed.as_ref().map_or("", |h| h.subject.as_str());

        if kind.is_empty() {
            fail("type-empty", "type may not be empty".to_string());
        } else {
            if kind.chars().any(char::is_uppercase) {
                fail("type-case", "type must be lower-case".to_string());
            }
            if !COMMIT_TYPES.contains(&kind) {
                fail(
                    "type-enum",
                    format!("type must be one of [{}]", COMMIT_TYPES.join(", ")),
                );
            }
        }

        if subject.is_empty() {
            fail("subject-empty", "subject may not be empty".to_string());
        } else {
            if is_forbidden_case(subject) {
                fail(
                    "subject-case",
                    "subject must not be sentence-case, start-case, pascal-case, upper-case"
                        .to_string(),
                );
            }
            if subject.ends_with('.') {
                fail(
                    "subject-full-stop",
                    "subject may not end with full stop".to_string(),
                );
            }
        }

        violations
    }
}

/// Returns the first line of a commit message, skipping leading comment lines
pub fn header_of(message: &str) -> &str {
    message
        .lines()
        .find(|line| !line.starts_with('#'))
        .unwrap_or("")
}

// Sentence, start, pascal and upper case; subjects not starting with a letter are exempt
fn is_forbidden_case(subject: &str) -> bool {
    if !subject.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return false;
    }
    let starts_upper = subject.chars().next().is_some_and(char::is_uppercase);
    let all_upper = !subject.chars().any(char::is_lowercase);
    starts_upper || all_upper
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> CommitRules {
        match CommitRules::shared() {
            Ok(rules) => rules,
            Err(e) => panic!("{}", e),
        }
    }

    fn failed(header: &str) -> Vec<&'static str> {
        rules().check(header).into_iter().map(|v| v.rule).collect()
    }

    #[test]
    fn test_valid_headers() {
        assert!(failed("feat: add flavor layers").is_empty());
        assert!(failed("fix(loader): dedupe warnings").is_empty());
        assert!(failed("refactor!: drop legacy config").is_empty());
        assert!(failed("docs(readme): mention lintstack.toml").is_empty());
    }

    #[test]
    fn test_parse_header() {
        let header = rules().parse_header("feat(api)!: remove v1 routes");
        assert_eq!(
            header,
            Some(CommitHeader {
                kind: "feat".to_string(),
                scope: Some("api".to_string()),
                breaking: true,
                subject: "remove v1 routes".to_string(),
            })
        );
        assert_eq!(rules().parse_header("no colon here"), None);
    }

    #[test]
    fn test_unstructured_header() {
        assert_eq!(failed("updated stuff"), vec!["type-empty", "subject-empty"]);
    }

    #[test]
    fn test_unknown_type() {
        assert_eq!(failed("feature: add thing"), vec!["type-enum"]);
    }

    #[test]
    fn test_type_case() {
        assert_eq!(failed("Fix: handle empty input"), vec!["type-case", "type-enum"]);
        assert_eq!(failed("FEAT: add thing"), vec!["type-case", "type-enum"]);
    }

    #[test]
    fn test_subject_rules() {
        assert_eq!(failed("fix: Handle empty input"), vec!["subject-case"]);
        assert_eq!(failed("fix: HANDLE EMPTY INPUT"), vec!["subject-case"]);
        // A leading acronym still reads as sentence case
        assert_eq!(failed("fix: API change"), vec!["subject-case"]);
        assert_eq!(failed("fix: handle empty input."), vec!["subject-full-stop"]);
        assert_eq!(failed("fix: "), vec!["header-trim", "subject-empty"]);
    }

    #[test]
    fn test_subject_case_exemptions() {
        assert!(failed("fix: `Foo` handles empty input").is_empty());
        assert!(failed("chore: 2 dependencies bumped").is_empty());
        assert!(failed("fix: handle `NULL` values").is_empty());
    }

    #[test]
    fn test_header_length() {
        let header = format!("feat: {}", "a".repeat(66));
        assert_eq!(header.len(), 72);
        assert!(failed(&header).is_empty());

        let header = format!("feat: {}", "a".repeat(67));
        assert_eq!(failed(&header), vec!["header-max-length"]);
    }

    #[test]
    fn test_custom_length() {
        let rules = CommitRules::new(20);
        assert!(rules.is_ok());
        if let Ok(rules) = rules {
            assert_eq!(rules.check("feat: a long enough subject").len(), 1);
        }
        assert!(CommitRules::new(0).is_err());
    }

    #[test]
    fn test_header_trim() {
        assert!(failed(" feat: add thing").contains(&"header-trim"));
        assert_eq!(failed("feat: add thing "), vec!["header-trim"]);
    }

    #[test]
    fn test_header_of() {
        assert_eq!(header_of("feat: x\n\nbody"), "feat: x");
        assert_eq!(header_of("# comment\nfix: y\n"), "fix: y");
        assert_eq!(header_of(""), "");
    }
}
