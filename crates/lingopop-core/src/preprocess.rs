use unicode_normalization::UnicodeNormalization;

/// Normalize a lookup query before it is sent to the service.
///
/// NFKC normalization, newlines stripped, surrounding whitespace trimmed.
pub fn normalize_query(text: &str) -> String {
    let text = text.trim();

    if text.is_empty() {
        return String::new();
    }

    let text: String = text.nfkc().collect();

    text.replace(['\n', '\r'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
