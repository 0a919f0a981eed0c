//! Resource naming convention
//!
//! DBpedia resource names follow Wikipedia article titles: the initial letter
//! is capitalized and spaces are written as underscores
//! (`angela merkel` -> `Angela_merkel`, `Angela Merkel` -> `Angela_Merkel`).

/// Convert a free-text name to DBpedia resource-name form
///
/// Surrounding whitespace is trimmed, the first character is uppercased and
/// every space becomes an underscore. The casing of the remaining characters
/// is left alone, so `"otto von Bismarck"` becomes `"Otto_von_Bismarck"`.
///
/// Empty (or whitespace-only) input yields an empty string.
pub fn format_name(name: &str) -> String {
    let trimmed = name.trim();

    let mut chars = trimmed.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut formatted = String::with_capacity(trimmed.len());
    formatted.extend(first.to_uppercase());
    formatted.push_str(chars.as_str());

    formatted.replace(' ', "_")
}
