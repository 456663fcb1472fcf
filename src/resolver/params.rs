//! `{name}` placeholder handling for resource segments.
//!
//! One grammar drives detection, extraction and substitution: a token is `{`, one or
//! more ASCII alphanumerics or underscores, then `}`. Anything else in braces (`{}`,
//! `{a-b}`) is plain text.

use super::variables::VariableTable;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

static PARAMETER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("parameter pattern is a valid regex")
});

/// Whether the segment contains at least one `{name}` token.
pub fn is_parameter(segment: &str) -> bool {
    PARAMETER.is_match(segment)
}

/// The name of the first `{name}` token in the segment.
pub fn parameter_name(segment: &str) -> Option<&str> {
    PARAMETER
        .captures(segment)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// All token names in the segment, in order of appearance.
pub fn parameter_names(segment: &str) -> impl Iterator<Item = &str> {
    PARAMETER
        .captures_iter(segment)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}

/// Replaces every bound `{name}` token with its value. Unbound tokens are kept verbatim.
pub fn substitute<'a>(segment: &'a str, variables: &VariableTable) -> Cow<'a, str> {
    PARAMETER.replace_all(segment, |caps: &Captures<'_>| {
        match variables.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        }
    })
}
