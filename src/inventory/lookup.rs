//! Master-list type-ahead and duplicate detection.

/// Type-ahead suggestions: case-insensitive substring filter over the
/// master ingredient list. Empty or whitespace-only input yields no
/// suggestions (the caller resets its dependent fields in that case).
pub fn suggestions<'a>(master: &'a [String], input: &str) -> Vec<&'a str> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    master
        .iter()
        .filter(|name| name.to_lowercase().contains(&needle))
        .map(String::as_str)
        .collect()
}

/// Case-insensitive exact lookup in the master list, returning the entry's
/// canonical spelling.
pub fn find_existing<'a>(master: &'a [String], name: &str) -> Option<&'a str> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    master
        .iter()
        .find(|entry| entry.to_lowercase() == needle)
        .map(String::as_str)
}
