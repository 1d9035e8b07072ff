//! Search-result ordering for the selection UI.
//!
//! The order produced here is exactly what the user sees, so the tie-break
//! precedence (score, then photo presence, then name length) is a documented
//! total order, not an implementation detail.

use crate::types::SearchCandidate;

/// Order candidates for display against a free-text query.
///
/// Blank query: stable partition, candidates with a photo first, both halves
/// keeping their original relative order. Otherwise candidates sort by
/// relevance score descending; ties break on photo presence (photo first),
/// then ascending name length (shorter first). Never drops or duplicates
/// elements.
pub fn rank(candidates: &[SearchCandidate], query: &str) -> Vec<SearchCandidate> {
    let query = query.trim().to_lowercase();

    if query.is_empty() {
        let (with_photo, without): (Vec<_>, Vec<_>) = candidates
            .iter()
            .cloned()
            .partition(SearchCandidate::has_photo);
        return with_photo.into_iter().chain(without).collect();
    }

    let mut scored: Vec<(i64, &SearchCandidate)> = candidates
        .iter()
        .map(|candidate| (relevance_score(candidate, &query), candidate))
        .collect();
    // sort_by is stable, so full ties keep input order.
    scored.sort_by(|(score_a, a), (score_b, b)| {
        score_b
            .cmp(score_a)
            .then_with(|| b.has_photo().cmp(&a.has_photo()))
            .then_with(|| name_len(a).cmp(&name_len(b)))
    });
    scored.into_iter().map(|(_, candidate)| candidate.clone()).collect()
}

/// Relevance of one candidate against a lowercased, trimmed query.
///
/// Exact, prefix and suffix matches score per field and sum across both name
/// fields. The substring component instead takes the larger of the two
/// fields' contributions rather than summing — asymmetric with the other
/// three components, but the ordering users have always seen; preserved
/// as-is.
fn relevance_score(candidate: &SearchCandidate, query: &str) -> i64 {
    let name = normalized(candidate.name.as_deref());
    let en_name = normalized(candidate.en_name.as_deref());

    let mut score = 0;
    for field in [name.as_str(), en_name.as_str()] {
        if field == query {
            score += 100;
        }
        if field.starts_with(query) {
            score += 50;
        }
        if field.ends_with(query) {
            score += 30;
        }
    }

    let query_len = query.chars().count() as i64;
    let name_contains = if name.contains(query) { query_len } else { 0 };
    let en_name_contains = if en_name.contains(query) { query_len } else { 0 };
    score += name_contains.max(en_name_contains) * 10;

    score
}

fn normalized(field: Option<&str>) -> String {
    field.unwrap_or_default().trim().to_lowercase()
}

fn name_len(candidate: &SearchCandidate) -> usize {
    candidate
        .name
        .as_deref()
        .map(|n| n.chars().count())
        .unwrap_or(0)
}
