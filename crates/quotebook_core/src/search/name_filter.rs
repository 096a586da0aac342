//! Name filter parsing for quote listing and autocomplete.
//!
//! # Invariants
//! - Blank input means "no filter".
//! - Only the first two whitespace-separated tokens are significant.
//! - `LIKE` patterns escape `%`, `_` and `\` with `\`.

/// Escape character used by every pattern built here.
pub const LIKE_ESCAPE: char = '\\';

/// Customer-name filter applied to quote listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameFilter {
    /// No search term; every quote matches.
    All,
    /// First name or last name contains the token.
    Single(String),
    /// Both tokens match, in either first/last order.
    Pair(String, String),
}

impl NameFilter {
    /// Parses raw search text.
    pub fn parse(term: Option<&str>) -> Self {
        let mut tokens = term.unwrap_or_default().split_whitespace();
        match (tokens.next(), tokens.next()) {
            (None, _) => Self::All,
            (Some(first), None) => Self::Single(first.to_string()),
            (Some(first), Some(second)) => Self::Pair(first.to_string(), second.to_string()),
        }
    }
}

/// Builds a `%…%` substring pattern for `LIKE … ESCAPE '\'`.
pub fn contains_pattern(token: &str) -> String {
    let mut pattern = String::with_capacity(token.len() + 2);
    pattern.push('%');
    for ch in token.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
