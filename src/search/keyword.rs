//! Keyword coverage scoring
//!
//! Used when the similarity index is absent or the query cannot be embedded.
//! Matching is plain substring containment against the lower-cased target,
//! so `"script"` matches inside `"javascripter"`.

/// Split a query into lower-cased tokens.
///
/// Every character that is not alphanumeric and not one of `+`, `#`, `.`
/// becomes a separator, so `"C++/C#"` yields `["c++", "c#"]`.
pub fn tokenize(query: &str) -> Vec<String> {
    let cleaned: String = query
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '+' | '#' | '.') {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Fraction of query tokens found anywhere in `text`. `0.0` when the query has no tokens.
pub fn keyword_score(text: &str, query: &str) -> f32 {
    let tokens = tokenize(query);
    if tokens.is_empty() {
        return 0.0;
    }
    let haystack = text.to_lowercase();
    let hits = tokens
        .iter()
        .filter(|token| haystack.contains(token.as_str()))
        .count();

    #[allow(clippy::cast_precision_loss)]
    let score = hits as f32 / tokens.len() as f32;
    score
}
