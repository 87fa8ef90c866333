use super::types::NewsArticle;
use std::collections::HashSet;

/// Keep the first article for each distinct id, in original order.
///
/// Single pass over a seen-id set. Equivalent to keeping the article at
/// position `i` iff no `j < i` has the same id.
pub fn dedup_by_id(articles: Vec<NewsArticle>) -> Vec<NewsArticle> {
    let mut seen: HashSet<String> = HashSet::with_capacity(articles.len());
    let before = articles.len();

    let kept: Vec<NewsArticle> = articles
        .into_iter()
        .filter(|article| seen.insert(article.id_key()))
        .collect();

    if kept.len() < before {
        tracing::debug!(
            total = before,
            unique = kept.len(),
            "Dropped duplicate news entries"
        );
    }
    kept
}
