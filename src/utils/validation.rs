//! Centralized validation and helper functions.

/// Maximum number of entrants accepted from a single file (DOS protection)
pub const MAX_ENTRANTS: usize = 10_000;

/// Maximum number of result rows accepted from a single file
pub const MAX_RESULTS: usize = 1_000_000;

/// Largest magnitude accepted for a game score
pub const MAX_SCORE: i32 = 100_000;

/// Strip a trailing display suffix such as ` (#3)` from a player reference.
///
/// # Examples
///
/// ```
/// use pairing_engine::utils::validation::strip_display_suffix;
///
/// assert_eq!(strip_display_suffix("Ann Lee (#3)"), "Ann Lee");
/// assert_eq!(strip_display_suffix("  bob "), "bob");
/// ```
#[must_use]
pub fn strip_display_suffix(text: &str) -> &str {
    let text = text.trim();
    match text.find(" (") {
        Some(idx) => text[..idx].trim_end(),
        None => text,
    }
}

/// Parse a standing reference of the form `#N`.
///
/// Returns None if `text` is not a standing reference or `N` is not a
/// positive integer.
///
/// # Examples
///
/// ```
/// use pairing_engine::utils::validation::parse_standing_ref;
///
/// assert_eq!(parse_standing_ref("#4"), Some(4));
/// assert_eq!(parse_standing_ref("# 12"), Some(12));
/// assert_eq!(parse_standing_ref("#0"), None);
/// assert_eq!(parse_standing_ref("amy"), None);
/// ```
#[must_use]
pub fn parse_standing_ref(text: &str) -> Option<usize> {
    text.trim()
        .strip_prefix('#')
        .and_then(|n| n.trim().parse().ok())
        .filter(|&n| n > 0)
}

/// Check if a field of `count` players can be paired in full.
///
/// Returns an error message for an odd field, None otherwise.
#[must_use]
pub fn check_even_field(count: usize) -> Option<String> {
    if count % 2 == 0 {
        None
    } else {
        Some(format!(
            "Field has an odd number of players ({count}); add an entrant named \"Bye\""
        ))
    }
}

/// Check if a game score is within `-MAX_SCORE..=MAX_SCORE`.
#[must_use]
pub fn is_valid_score(score: i32) -> bool {
    (-MAX_SCORE..=MAX_SCORE).contains(&score)
}

/// Check if adding another entrant would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new entrant.
#[must_use]
pub fn check_entrant_limit(count: usize) -> Option<String> {
    if count >= MAX_ENTRANTS {
        Some(format!(
            "Too many entrants: adding another would exceed maximum of {MAX_ENTRANTS}"
        ))
    } else {
        None
    }
}

/// Check if adding another result row would exceed the maximum allowed.
#[must_use]
pub fn check_result_limit(count: usize) -> Option<String> {
    if count >= MAX_RESULTS {
        Some(format!(
            "Too many results: adding another would exceed maximum of {MAX_RESULTS}"
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_display_suffix() {
        assert_eq!(strip_display_suffix("amy (#1)"), "amy");
        assert_eq!(strip_display_suffix("amy"), "amy");
        assert_eq!(strip_display_suffix("amy  (#1)"), "amy");
    }

    #[test]
    fn test_parse_standing_ref() {
        assert_eq!(parse_standing_ref(" #7 "), Some(7));
        assert_eq!(parse_standing_ref("#x"), None);
        assert_eq!(parse_standing_ref("#-1"), None);
    }

    #[test]
    fn test_even_field() {
        assert!(check_even_field(16).is_none());
        assert!(check_even_field(0).is_none());
        assert!(check_even_field(15).unwrap().contains("15"));
    }

    #[test]
    fn test_score_range() {
        assert!(is_valid_score(0));
        assert!(is_valid_score(-MAX_SCORE));
        assert!(is_valid_score(MAX_SCORE));
        assert!(!is_valid_score(MAX_SCORE + 1));
        assert!(!is_valid_score(i32::MIN));
        assert!(!is_valid_score(i32::MAX));
    }

    #[test]
    fn test_limits() {
        assert!(check_entrant_limit(MAX_ENTRANTS - 1).is_none());
        assert!(check_entrant_limit(MAX_ENTRANTS).is_some());
        assert!(check_result_limit(0).is_none());
        assert!(check_result_limit(MAX_RESULTS).is_some());
    }
}
