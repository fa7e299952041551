//! Search index client — Elasticsearch-compatible JSON over HTTP.
//!
//! The index engine is opaque to the core: this module exposes upsert,
//! exact-field lookup, kNN search, and filtered search over the CV index,
//! and nothing else reaches the index directly.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::models::cv::CvDocument;

/// Name of the index holding CV documents.
pub const CV_INDEX: &str = "cv_index";

/// How many neighbours the index is asked for per kNN query. Deliberately
/// large: hits are re-ranked in process before truncation to the caller's
/// top_k.
pub const KNN_POOL_SIZE: usize = 1000;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Index error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// A search hit: the stored document plus the index's relevance score.
#[derive(Debug, Clone)]
pub struct ScoredHit {
    pub document: CvDocument,
    pub score: f32,
}

/// The vector/document index capability, carried in `AppState` as
/// `Arc<dyn CvIndex>`.
#[async_trait]
pub trait CvIndex: Send + Sync {
    /// Stores or replaces the document under the given id.
    async fn upsert(&self, id: &str, document: &CvDocument) -> Result<(), IndexError>;

    /// Exact-match lookup on the email field. Returns the first hit, if any.
    async fn find_by_email(&self, email: &str) -> Result<Option<CvDocument>, IndexError>;

    /// Nearest-neighbour search over the stored CV vectors.
    async fn knn_search(&self, vector: &[f32], size: usize) -> Result<Vec<ScoredHit>, IndexError>;

    /// AND-combined exact field matches, in index score order.
    async fn search_by_fields(
        &self,
        filters: &[(String, String)],
        size: usize,
    ) -> Result<Vec<ScoredHit>, IndexError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_score")]
    score: Option<f32>,
    #[serde(rename = "_source")]
    source: CvDocument,
}

/// Elasticsearch client for the CV index.
#[derive(Clone)]
pub struct EsClient {
    client: Client,
    base_url: String,
}

impl EsClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
        }
    }

    async fn search(&self, body: Value) -> Result<Vec<ScoredHit>, IndexError> {
        let url = format!("{}/{}/_search", self.base_url, CV_INDEX);

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(IndexError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: SearchResponse = response.json().await?;
        Ok(parsed
            .hits
            .hits
            .into_iter()
            .map(|hit| ScoredHit {
                score: hit.score.unwrap_or(0.0),
                document: hit.source,
            })
            .collect())
    }
}

#[async_trait]
impl CvIndex for EsClient {
    async fn upsert(&self, id: &str, document: &CvDocument) -> Result<(), IndexError> {
        let url = format!("{}/{}/_doc/{}", self.base_url, CV_INDEX, id);

        let response = self.client.put(&url).json(document).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(IndexError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<CvDocument>, IndexError> {
        let body = json!({
            "size": 1,
            "query": {
                "term": { "email.keyword": email }
            }
        });

        let hits = self.search(body).await?;
        Ok(hits.into_iter().next().map(|hit| hit.document))
    }

    async fn knn_search(&self, vector: &[f32], size: usize) -> Result<Vec<ScoredHit>, IndexError> {
        let body = json!({
            "size": size,
            "query": {
                "knn": {
                    "cv_vector": {
                        "vector": vector,
                        "k": KNN_POOL_SIZE,
                        "num_candidates": KNN_POOL_SIZE
                    }
                }
            }
        });

        self.search(body).await
    }

    async fn search_by_fields(
        &self,
        filters: &[(String, String)],
        size: usize,
    ) -> Result<Vec<ScoredHit>, IndexError> {
        let must: Vec<Value> = filters
            .iter()
            .map(|(field, value)| json!({ "match": { field: value } }))
            .collect();

        let body = json!({
            "size": size,
            "query": {
                "bool": { "must": must }
            }
        });

        self.search(body).await
    }
}
