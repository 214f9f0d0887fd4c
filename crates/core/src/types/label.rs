//! Domain label sanitization.
//!
//! A label is the part of a domain before the TLD. Labels produced here are
//! lowercase, contain only `[a-z0-9-]`, never start or end with a hyphen,
//! and are at most [`MAX_LABEL_LENGTH`] characters long. They may be empty.

/// Maximum length of a single DNS label.
pub const MAX_LABEL_LENGTH: usize = 63;

/// Maximum length of a generated title before it is sanitized.
pub const MAX_TITLE_LENGTH: usize = 30;

const ELLIPSIS: char = '…';

/// Turn arbitrary text into a domain label.
///
/// Lowercases, strips leading dots, removes whitespace, drops anything
/// outside `[a-z0-9-]`, trims hyphens from both ends, and caps the result
/// at 63 characters. The function is idempotent.
///
/// ## Examples
///
/// ```
/// use domain_search_core::domain_label_from_title;
///
/// assert_eq!(domain_label_from_title("My Cool Idea!!"), "mycoolidea");
/// assert_eq!(domain_label_from_title("..--Rust-Lang--"), "rust-lang");
/// assert_eq!(domain_label_from_title("!!!"), "");
/// ```
#[must_use]
pub fn domain_label_from_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    let undotted = lowered.trim_start_matches('.');

    let filtered: String = undotted
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect();

    let capped: String = filtered
        .trim_matches('-')
        .chars()
        .take(MAX_LABEL_LENGTH)
        .collect();

    // Capping can expose a hyphen at the new end.
    capped.trim_end_matches('-').to_owned()
}

/// Tidy raw text returned by the generation provider into a short title.
///
/// Trims, removes one pair of surrounding quotes, and truncates to
/// [`MAX_TITLE_LENGTH`] characters (ending in an ellipsis) when longer.
/// The result still needs [`domain_label_from_title`] before use.
#[must_use]
pub fn tidy_generated_title(raw: &str) -> String {
    let trimmed = raw.trim();
    let unquoted = strip_surrounding_quotes(trimmed).trim();

    if unquoted.chars().count() <= MAX_TITLE_LENGTH {
        return unquoted.to_owned();
    }

    let mut title: String = unquoted.chars().take(MAX_TITLE_LENGTH - 1).collect();
    title.push(ELLIPSIS);
    title
}

fn strip_surrounding_quotes(text: &str) -> &str {
    for quote in ['"', '\'', '`', '“'] {
        let closing = if quote == '“' { '”' } else { quote };
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(closing))
        {
            return inner;
        }
    }
    text
}
