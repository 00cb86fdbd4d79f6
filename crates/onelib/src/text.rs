//! String transforms. Inputs are borrowed, results are new strings.

/// Marker appended by [`truncate`]
pub const ELLIPSIS: &str = "...";

/// Length used by `truncate` when the caller has no preference
pub const DEFAULT_TRUNCATE_LENGTH: usize = 100;

pub fn trim(text: &str) -> String {
    text.trim().to_string()
}

pub fn upper(text: &str) -> String {
    text.to_uppercase()
}

pub fn lower(text: &str) -> String {
    text.to_lowercase()
}

/// First character uppercased, the rest lowercased
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

/// Lowercase, runs of characters outside `[a-z0-9]` collapsed to one `-`,
/// no leading or trailing `-`
pub fn slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Whitespace-separated words, empty pieces dropped
pub fn words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Keep the first `length` characters and append `...` when anything was cut
pub fn truncate(text: &str, length: usize) -> String {
    match text.char_indices().nth(length) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// [`truncate`] at [`DEFAULT_TRUNCATE_LENGTH`]
pub fn truncate_default(text: &str) -> String {
    truncate(text, DEFAULT_TRUNCATE_LENGTH)
}

/// Reverse by Unicode scalar value
pub fn reverse(text: &str) -> String {
    text.chars().rev().collect()
}
