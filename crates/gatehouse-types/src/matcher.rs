//! Tool-name matcher patterns.
//!
//! A pattern is classified once, at registry load time, into one of four
//! forms: exact literal, `|`-alternation of literals, the universal `*`, or
//! a namespaced wildcard `prefix__*`. Anything else is a configuration
//! error, rejected at load rather than at match time. Matching itself is a
//! pure string comparison with no runtime compilation.

use thiserror::Error;

/// A classified matcher pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatcherPattern {
    /// `*` (or an omitted matcher) — applies to every tool name.
    Universal,
    /// Exact tool name.
    Exact(String),
    /// `a|b|c` — applies to any of the listed names.
    Alternation(Vec<String>),
    /// `prefix__*` — applies to names starting with `prefix__`. Stored
    /// with the trailing separator included.
    Namespace(String),
}

/// A pattern the grammar cannot classify.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("wildcard is only valid alone (`*`) or as a namespace suffix (`prefix__*`): '{0}'")]
    StrayWildcard(String),

    #[error("alternation has an empty branch: '{0}'")]
    EmptyAlternation(String),

    #[error("namespace prefix may not be empty or contain '*' or '|': '{0}'")]
    MalformedNamespace(String),
}

impl MatcherPattern {
    /// Classify a pattern string.
    ///
    /// An empty pattern means the same as `*`: the registration applies to
    /// every tool.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let pattern = pattern.trim();
        if pattern.is_empty() || pattern == "*" {
            return Ok(MatcherPattern::Universal);
        }
        if let Some(prefix) = pattern.strip_suffix("__*") {
            if prefix.is_empty() || prefix.contains('*') || prefix.contains('|') {
                return Err(PatternError::MalformedNamespace(pattern.to_string()));
            }
            return Ok(MatcherPattern::Namespace(format!("{prefix}__")));
        }
        if pattern.contains('*') {
            return Err(PatternError::StrayWildcard(pattern.to_string()));
        }
        if pattern.contains('|') {
            let branches: Vec<String> =
                pattern.split('|').map(|b| b.trim().to_string()).collect();
            if branches.iter().any(String::is_empty) {
                return Err(PatternError::EmptyAlternation(pattern.to_string()));
            }
            return Ok(MatcherPattern::Alternation(branches));
        }
        Ok(MatcherPattern::Exact(pattern.to_string()))
    }

    /// Whether this pattern applies to the given tool name.
    ///
    /// Pure: same inputs always yield the same answer, no side effects.
    pub fn matches(&self, tool_name: &str) -> bool {
        match self {
            MatcherPattern::Universal => true,
            MatcherPattern::Exact(name) => tool_name == name,
            MatcherPattern::Alternation(names) => names.iter().any(|n| n == tool_name),
            MatcherPattern::Namespace(prefix) => tool_name.starts_with(prefix.as_str()),
        }
    }
}

impl std::fmt::Display for MatcherPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatcherPattern::Universal => f.write_str("*"),
            MatcherPattern::Exact(name) => f.write_str(name),
            MatcherPattern::Alternation(names) => f.write_str(&names.join("|")),
            MatcherPattern::Namespace(prefix) => write!(f, "{prefix}*"),
        }
    }
}
