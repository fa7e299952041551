//! Recommendation flows — fetch, embed, and rank.

use chrono::Utc;
use futures::future::join_all;
use tracing::{info, warn};

use crate::catalog::JobCatalog;
use crate::embedding::Embedder;
use crate::errors::AppError;
use crate::matching::ranker::{rank, Scored};
use crate::models::cv::CvDocument;
use crate::models::job::EligibleJob;
use crate::search::{CvIndex, KNN_POOL_SIZE};

/// Minimum cosine similarity (strict) for a job to be recommended.
pub const JOB_MATCH_THRESHOLD: f32 = 0.2;

pub type ScoredJob = Scored<EligibleJob>;
pub type ScoredCandidate = Scored<CvDocument>;

/// Jobs-for-candidate flow: resolve the candidate's stored vector by email,
/// embed every eligible job, rank in process.
///
/// An unknown email is a user-visible NotFound, not a crash. A failed
/// embedding drops only that job from the ranking; the batch continues.
pub async fn rank_jobs_for_candidate(
    index: &dyn CvIndex,
    catalog: &dyn JobCatalog,
    embedder: &dyn Embedder,
    email: &str,
    top_k: Option<usize>,
) -> Result<Vec<ScoredJob>, AppError> {
    let candidate = index
        .find_by_email(email)
        .await
        .map_err(|e| AppError::Index(e.to_string()))?
        .ok_or_else(|| AppError::NotFound(format!("No CV record for '{email}'")))?;

    // Catalog rows arrive ascending by id; the stable ranking sort keeps
    // that order for equal scores.
    let jobs = catalog.list_eligible_jobs(Utc::now()).await?;
    info!("Ranking {} eligible jobs for {email}", jobs.len());

    // One embedding call per job, run concurrently. Completion order does
    // not matter: zip keeps results aligned with jobs, and the ranker sorts.
    let texts: Vec<String> = jobs.iter().map(EligibleJob::embedding_text).collect();
    let embeddings = join_all(texts.iter().map(|text| embedder.embed(text))).await;

    let mut pairs = Vec::with_capacity(jobs.len());
    for (job, embedding) in jobs.into_iter().zip(embeddings) {
        match embedding {
            Ok(vector) => pairs.push((job, vector)),
            Err(e) => warn!("Dropping job {} from ranking, embedding failed: {e}", job.id),
        }
    }

    Ok(rank(
        &candidate.cv_vector,
        pairs,
        Some(JOB_MATCH_THRESHOLD),
        top_k,
    ))
}

/// Candidates-for-query flow: embed the query text, pull a wide kNN pool
/// from the CV index, re-rank it in process with exact cosine scores.
pub async fn rank_candidates_for_query(
    index: &dyn CvIndex,
    embedder: &dyn Embedder,
    query_text: &str,
    top_k: Option<usize>,
) -> Result<Vec<ScoredCandidate>, AppError> {
    let query_vector = embedder
        .embed(query_text)
        .await
        .map_err(|e| AppError::Embedding(e.to_string()))?;

    let hits = index
        .knn_search(&query_vector, KNN_POOL_SIZE)
        .await
        .map_err(|e| AppError::Index(e.to_string()))?;

    let pairs: Vec<(CvDocument, Vec<f32>)> = hits
        .into_iter()
        .map(|hit| {
            let vector = hit.document.cv_vector.clone();
            (hit.document, vector)
        })
        .collect();

    Ok(rank(&query_vector, pairs, None, top_k))
}

/// Candidates-by-filter flow: exact field matches against the index, hits
/// kept in index score order.
pub async fn rank_candidates_for_filters(
    index: &dyn CvIndex,
    filters: &[(String, String)],
    top_k: Option<usize>,
) -> Result<Vec<ScoredCandidate>, AppError> {
    let size = top_k.unwrap_or(KNN_POOL_SIZE);

    let hits = index
        .search_by_fields(filters, size)
        .await
        .map_err(|e| AppError::Index(e.to_string()))?;

    Ok(hits
        .into_iter()
        .map(|hit| Scored {
            score: hit.score,
            item: hit.document,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::{Embedder, EmbeddingError};
    use crate::models::cv::CvRecord;
    use crate::search::{IndexError, ScoredHit};
    use async_trait::async_trait;
    use chrono::DateTime;
    use std::collections::BTreeSet;

    fn document(email: &str, vector: Vec<f32>) -> CvDocument {
        CvDocument {
            record: CvRecord {
                email: Some(email.to_string()),
                education: vec![],
                experience: vec![],
                skills: BTreeSet::new(),
                languages: BTreeSet::new(),
            },
            cv_vector: vector,
        }
    }

    fn job(id: i32, detail: &str) -> EligibleJob {
        EligibleJob {
            id,
            name: format!("job-{id}"),
            detail: detail.to_string(),
            experience: String::new(),
        }
    }

    /// Index stub holding a single known candidate.
    struct StubIndex {
        known: Option<CvDocument>,
        hits: Vec<ScoredHit>,
    }

    #[async_trait]
    impl CvIndex for StubIndex {
        async fn upsert(&self, _id: &str, _document: &CvDocument) -> Result<(), IndexError> {
            Ok(())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<CvDocument>, IndexError> {
            Ok(self
                .known
                .clone()
                .filter(|doc| doc.record.email.as_deref() == Some(email)))
        }

        async fn knn_search(
            &self,
            _vector: &[f32],
            _size: usize,
        ) -> Result<Vec<ScoredHit>, IndexError> {
            Ok(self.hits.clone())
        }

        async fn search_by_fields(
            &self,
            _filters: &[(String, String)],
            size: usize,
        ) -> Result<Vec<ScoredHit>, IndexError> {
            Ok(self.hits.iter().take(size).cloned().collect())
        }
    }

    struct StubCatalog {
        jobs: Vec<EligibleJob>,
    }

    #[async_trait]
    impl JobCatalog for StubCatalog {
        async fn list_eligible_jobs(
            &self,
            _now: DateTime<Utc>,
        ) -> Result<Vec<EligibleJob>, AppError> {
            Ok(self.jobs.clone())
        }
    }

    /// Embedder mapping known texts to fixed vectors; anything else fails.
    struct StubEmbedder;

    #[async_trait]
    impl Embedder for StubEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
            match text.trim() {
                "aligned" => Ok(vec![1.0, 0.0]),
                "diagonal" => Ok(vec![1.0, 1.0]),
                "orthogonal" => Ok(vec![0.0, 1.0]),
                _ => Err(EmbeddingError::Api {
                    status: 500,
                    message: "unknown text".to_string(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_unknown_email_is_not_found() {
        let index = StubIndex {
            known: None,
            hits: vec![],
        };
        let catalog = StubCatalog { jobs: vec![] };

        let result = rank_jobs_for_candidate(
            &index,
            &catalog,
            &StubEmbedder,
            "nobody@example.com",
            None,
        )
        .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_jobs_ranked_above_threshold_only() {
        let index = StubIndex {
            known: Some(document("ada@example.com", vec![1.0, 0.0])),
            hits: vec![],
        };
        let catalog = StubCatalog {
            jobs: vec![job(1, "orthogonal"), job(2, "aligned"), job(3, "diagonal")],
        };

        let ranked =
            rank_jobs_for_candidate(&index, &catalog, &StubEmbedder, "ada@example.com", None)
                .await
                .unwrap();

        // "orthogonal" scores 0.0, below the 0.2 cutoff.
        let ids: Vec<i32> = ranked.iter().map(|s| s.item.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(ranked[0].score, 1.0);
    }

    #[tokio::test]
    async fn test_failed_job_embedding_drops_only_that_job() {
        let index = StubIndex {
            known: Some(document("ada@example.com", vec![1.0, 0.0])),
            hits: vec![],
        };
        let catalog = StubCatalog {
            jobs: vec![job(1, "aligned"), job(2, "unembeddable")],
        };

        let ranked =
            rank_jobs_for_candidate(&index, &catalog, &StubEmbedder, "ada@example.com", None)
                .await
                .unwrap();

        let ids: Vec<i32> = ranked.iter().map(|s| s.item.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[tokio::test]
    async fn test_job_score_ties_resolve_to_lower_id() {
        let index = StubIndex {
            known: Some(document("ada@example.com", vec![1.0, 0.0])),
            hits: vec![],
        };
        let catalog = StubCatalog {
            jobs: vec![job(4, "aligned"), job(9, "aligned")],
        };

        let ranked =
            rank_jobs_for_candidate(&index, &catalog, &StubEmbedder, "ada@example.com", None)
                .await
                .unwrap();

        let ids: Vec<i32> = ranked.iter().map(|s| s.item.id).collect();
        assert_eq!(ids, vec![4, 9]);
    }

    #[tokio::test]
    async fn test_top_k_limits_job_results() {
        let index = StubIndex {
            known: Some(document("ada@example.com", vec![1.0, 0.0])),
            hits: vec![],
        };
        let catalog = StubCatalog {
            jobs: vec![job(1, "aligned"), job(2, "aligned"), job(3, "diagonal")],
        };

        let ranked =
            rank_jobs_for_candidate(&index, &catalog, &StubEmbedder, "ada@example.com", Some(1))
                .await
                .unwrap();

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].item.id, 1);
    }

    #[tokio::test]
    async fn test_candidates_for_query_reranks_knn_pool() {
        let index = StubIndex {
            known: None,
            hits: vec![
                ScoredHit {
                    document: document("far@example.com", vec![0.0, 1.0]),
                    score: 0.9, // index thinks this one is best
                },
                ScoredHit {
                    document: document("near@example.com", vec![1.0, 0.0]),
                    score: 0.1,
                },
            ],
        };

        let ranked = rank_candidates_for_query(&index, &StubEmbedder, "aligned", None)
            .await
            .unwrap();

        // In-process cosine re-ranking overrides the index's ordering.
        let emails: Vec<&str> = ranked
            .iter()
            .map(|s| s.item.record.email.as_deref().unwrap())
            .collect();
        assert_eq!(emails, vec!["near@example.com", "far@example.com"]);
    }

    #[tokio::test]
    async fn test_candidates_for_query_embedding_failure_is_degraded() {
        let index = StubIndex {
            known: None,
            hits: vec![],
        };
        let result = rank_candidates_for_query(&index, &StubEmbedder, "unembeddable", None).await;
        assert!(matches!(result, Err(AppError::Embedding(_))));
    }

    #[tokio::test]
    async fn test_candidates_by_filter_keeps_index_order() {
        let index = StubIndex {
            known: None,
            hits: vec![
                ScoredHit {
                    document: document("first@example.com", vec![1.0, 0.0]),
                    score: 2.5,
                },
                ScoredHit {
                    document: document("second@example.com", vec![0.0, 1.0]),
                    score: 1.5,
                },
            ],
        };

        let filters = vec![("skills".to_string(), "python".to_string())];
        let ranked = rank_candidates_for_filters(&index, &filters, Some(2))
            .await
            .unwrap();

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].score, 2.5);
        assert_eq!(
            ranked[0].item.record.email.as_deref(),
            Some("first@example.com")
        );
    }
}
