//! Small helpers shared by the page assemblers.

use strsim::levenshtein;

use crate::constants::MAX_SUGGESTION_DISTANCE;

/// Percent-encode a value for use in a link path or query component.
///
/// ```rust
/// use isoftrepo::utils::encode_for_url;
///
/// assert_eq!(encode_for_url("cp2k:8.2"), "cp2k%3A8.2");
/// assert_eq!(encode_for_url("a b"), "a%20b");
/// ```
pub fn encode_for_url(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Up to three candidates closest to `target`, closest first.
///
/// Candidates further than [`MAX_SUGGESTION_DISTANCE`] edits are dropped;
/// equally close candidates keep their input order.
pub fn closest_matches<'a>(target: &str, candidates: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut scored: Vec<(&str, usize)> = candidates
        .into_iter()
        .map(|candidate| (candidate, levenshtein(target, candidate)))
        .filter(|(_, dist)| *dist <= MAX_SUGGESTION_DISTANCE)
        .collect();

    scored.sort_by_key(|(_, dist)| *dist);
    scored.into_iter().take(3).map(|(candidate, _)| candidate.to_string()).collect()
}
