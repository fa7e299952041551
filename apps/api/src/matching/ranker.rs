//! Similarity ranking — pure cosine scoring, threshold filtering, top-k.
//!
//! No I/O and no shared state: given the same inputs this module always
//! produces the same ordering.

use serde::Serialize;

/// A record paired with its similarity to the query vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scored<T> {
    pub item: T,
    pub score: f32,
}

/// Cosine similarity of two vectors.
///
/// Defined as 0.0 when either vector has zero norm or the lengths differ,
/// so degenerate inputs rank last instead of dividing by zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Scores every candidate against the query, keeps scores strictly above
/// the threshold (when one is given), sorts descending, truncates to
/// `top_k` (when given).
///
/// The sort is stable, so callers control tie order through input order:
/// ascending job id for catalog batches, fetch order for index hits.
pub fn rank<T>(
    query: &[f32],
    candidates: Vec<(T, Vec<f32>)>,
    threshold: Option<f32>,
    top_k: Option<usize>,
) -> Vec<Scored<T>> {
    let mut scored: Vec<Scored<T>> = candidates
        .into_iter()
        .map(|(item, vector)| Scored {
            score: cosine_similarity(query, &vector),
            item,
        })
        .filter(|scored| threshold.map_or(true, |t| scored.score > t))
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if let Some(k) = top_k {
        scored.truncate(k);
    }
    scored
}
