/// Normalize text for comparison: lowercase, strip everything that is not a
/// letter, digit, or whitespace, and collapse whitespace runs.
///
/// Idempotent; empty input yields an empty string.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
