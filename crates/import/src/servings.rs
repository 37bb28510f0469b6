use std::sync::LazyLock;

use regex::Regex;

static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// First run of digits in a descriptive servings string ("Serves 4-6" → 4).
pub fn parse_servings(raw: &str) -> Option<u32> {
    DIGITS_RE
        .find(raw)
        .and_then(|digits| digits.as_str().parse().ok())
}
