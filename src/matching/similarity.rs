use strsim::levenshtein;

/// Edit-distance similarity between two strings as a percentage.
///
/// `round((1 - distance / max_len) * 100)`. Either side empty yields 0; both
/// empty yields 100 by definition, though callers normalize and reject empty
/// field values before ever comparing, so that case is not reached in
/// practice.
pub fn similarity(a: &str, b: &str) -> u32 {
    if a.is_empty() && b.is_empty() {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let distance = levenshtein(a, b);
    let max_len = a.chars().count().max(b.chars().count());
    ((1.0 - distance as f64 / max_len as f64) * 100.0).round() as u32
}
