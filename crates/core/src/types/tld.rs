//! Candidate TLD selection.

use std::collections::HashSet;

/// TLDs offered first, in this order, whenever the provider supports them.
pub const PRIORITY_TLDS: &[&str] = &[
    "com", "net", "org", "dev", "io", "app", "ai", "co", "xyz", "tech", "site", "online", "me",
    "info", "store",
];

/// Normalize a TLD as reported by a provider.
///
/// Trims, lowercases, and strips leading dots. Returns `None` when nothing
/// is left.
#[must_use]
pub fn normalize_tld(raw: &str) -> Option<String> {
    let tld = raw.trim().trim_start_matches('.').to_lowercase();
    (!tld.is_empty()).then_some(tld)
}

/// Narrow the supported TLDs to an ordered, bounded candidate list.
///
/// Priority TLDs present in `supported` come first in [`PRIORITY_TLDS`]
/// order, followed by every other supported TLD in provider order. The
/// output has no duplicates and at most `limit` entries.
///
/// ## Examples
///
/// ```
/// use domain_search_core::pick_candidate_tlds;
///
/// let supported = ["xyz", "shop", "com", "io", "shop"].map(String::from);
/// assert_eq!(pick_candidate_tlds(&supported, 3), ["com", "io", "xyz"]);
/// assert_eq!(pick_candidate_tlds(&supported, 10), ["com", "io", "xyz", "shop"]);
/// ```
#[must_use]
pub fn pick_candidate_tlds(supported: &[String], limit: usize) -> Vec<String> {
    let available: HashSet<&str> = supported.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::with_capacity(supported.len());
    let mut picked = Vec::with_capacity(limit.min(supported.len()));

    let priority = PRIORITY_TLDS
        .iter()
        .copied()
        .filter(|tld| available.contains(tld));
    let rest = supported.iter().map(String::as_str);

    for tld in priority.chain(rest) {
        if picked.len() >= limit {
            break;
        }
        if seen.insert(tld) {
            picked.push(tld.to_owned());
        }
    }

    picked
}
