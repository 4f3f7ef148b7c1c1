/// Split freeform vocabulary into trimmed, non-empty words.
///
/// Comma-separated input is split on commas and line breaks so that multi-word
/// phrases survive; anything else is split on whitespace. Duplicates and order
/// are preserved.
pub fn normalize_vocabulary(raw: &str) -> Vec<String> {
    let tokens: Vec<&str> = if raw.contains(',') {
        raw.split([',', '\n', '\r']).collect()
    } else {
        raw.split_whitespace().collect()
    };

    tokens
        .into_iter()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
