//! Identifier casing helpers shared by the evaluator and the fixer.
//!
//! Case-insensitive matching is ASCII-only so byte offsets found in a
//! lowercased copy stay valid in the original string.

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().to_string() + chars.as_str(),
    }
}

pub(crate) fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().to_string() + chars.as_str(),
    }
}

/// A lowercase letter that capitalizing would actually change.
pub(crate) fn is_fixable_lowercase(c: char) -> bool {
    c.is_lowercase() && !c.to_uppercase().eq(std::iter::once(c))
}

pub(crate) fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    haystack
        .to_ascii_lowercase()
        .find(&needle.to_ascii_lowercase())
}

pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    find_ignore_case(haystack, needle).is_some()
}

pub(crate) fn starts_with_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.len() >= needle.len()
        && haystack.is_char_boundary(needle.len())
        && haystack[..needle.len()].eq_ignore_ascii_case(needle)
}

/// Remove every case-insensitive occurrence of `needle`.
pub(crate) fn remove_ignore_case(haystack: &str, needle: &str) -> String {
    let mut out = haystack.to_string();
    while let Some(pos) = find_ignore_case(&out, needle) {
        out.replace_range(pos..pos + needle.len(), "");
    }
    out
}

/// Join underscore-separated segments, capitalizing every segment after the
/// first. The first segment keeps its case.
pub(crate) fn camel_join(s: &str) -> String {
    let mut segments = s.split('_');
    let mut out = segments.next().unwrap_or_default().to_string();
    for segment in segments {
        out.push_str(&capitalize(segment));
    }
    out
}

/// Join underscore-separated segments, capitalizing every segment.
pub(crate) fn pascal_join(s: &str) -> String {
    s.split('_').map(capitalize).collect()
}
