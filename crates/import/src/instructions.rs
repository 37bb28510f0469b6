//! Splits free instruction text into step instructions.
//!
//! Numbered lists ("1. Chop. 2. Fry.") give one step per number with the
//! number removed. Anything else is prose and gives one step per sentence.

use std::sync::LazyLock;

use regex::Regex;
use tajine_recipe::Step;

static NUMBER_DOT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\.").unwrap());
static STEP_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s*").unwrap());
static SENTENCE_END_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]\s+").unwrap());

/// A number-dot opens a segment at the start of the text, at the start of a
/// line, or after sentence punctuation. Decimals such as "1.5" never do.
fn opens_segment(text: &str, start: usize, end: usize) -> bool {
    if text[end..].starts_with(|c: char| c.is_ascii_digit()) {
        return false;
    }
    let before = &text[..start];
    let trimmed = before.trim_end();
    if trimmed.is_empty() {
        return true;
    }
    if trimmed.len() == before.len() {
        return false;
    }
    before[trimmed.len()..].contains('\n') || trimmed.ends_with(['.', '!', '?', ':', ';', ')'])
}

fn numbered_segments(text: &str) -> Vec<&str> {
    let mut cuts: Vec<usize> = NUMBER_DOT_RE
        .find_iter(text)
        .filter(|m| opens_segment(text, m.start(), m.end()))
        .map(|m| m.start())
        .collect();
    cuts.push(text.len());

    let mut segments = Vec::with_capacity(cuts.len());
    let mut from = 0;
    for cut in cuts {
        segments.push(text[from..cut].trim());
        from = cut;
    }
    segments.retain(|segment| !segment.is_empty());
    segments
}

fn sentences(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut from = 0;
    for m in SENTENCE_END_RE.find_iter(text) {
        // the punctuation is a single byte and stays with its sentence
        parts.push(text[from..m.start() + 1].trim());
        from = m.end();
    }
    parts.push(text[from..].trim());
    parts.retain(|part| !part.is_empty());
    parts
}

pub fn parse_instructions(raw: &str) -> Vec<String> {
    let text = raw.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let segments = numbered_segments(text);
    let numbered = match segments.as_slice() {
        [] => return Vec::new(),
        [only] => STEP_PREFIX_RE.is_match(only),
        _ => true,
    };

    if numbered {
        segments
            .iter()
            .map(|segment| STEP_PREFIX_RE.replace(segment, "").trim().to_string())
            .filter(|instruction| !instruction.is_empty())
            .collect()
    } else {
        sentences(segments[0]).into_iter().map(str::to_string).collect()
    }
}

/// One [`Step`] per parsed instruction.
pub fn parse_steps(raw: &str) -> Vec<Step> {
    parse_instructions(raw)
        .into_iter()
        .map(Step::with_instruction)
        .collect()
}
