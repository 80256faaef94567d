use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::GenerationError;

static OPENING_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^```[A-Za-z0-9_+-]*").expect("OPENING_FENCE is a valid regex pattern")
});

const CLOSING_FENCE: &str = "```";

/// Extracts the outermost JSON array from a raw model completion.
///
/// Strips a surrounding markdown code fence (with or without a language
/// tag) and returns the text from the first `[` to the last `]`. This is a
/// bracket heuristic, not a JSON parser; validation happens afterwards.
pub fn extract_json_array(raw: &str) -> Result<&str, GenerationError> {
    let mut text = raw.trim();

    if let Some(fence) = OPENING_FENCE.find(text) {
        text = &text[fence.end()..];
    }
    if let Some(stripped) = text.strip_suffix(CLOSING_FENCE) {
        text = stripped;
    }

    let start = text.find('[');
    let end = text.rfind(']');

    match (start, end) {
        (Some(start), Some(end)) if start < end => Ok(&text[start..=end]),
        (None, _) | (_, None) => Err(GenerationError::MalformedModelOutput(
            "no JSON array found in model output".to_string(),
        )),
        _ => Err(GenerationError::MalformedModelOutput(
            "closing bracket precedes opening bracket".to_string(),
        )),
    }
}
