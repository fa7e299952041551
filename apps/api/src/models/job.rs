use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A job row eligible for matching. The catalog applies the eligibility
/// filter (`enable = true`, `end_date` in the future) at query time, so a
/// fetched row is eligible by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct EligibleJob {
    pub id: i32,
    pub name: String,
    pub detail: String,
    pub experience: String,
}

impl EligibleJob {
    /// The text embedded for similarity against a candidate vector.
    pub fn embedding_text(&self) -> String {
        format!("{} {}", self.detail, self.experience)
    }
}
