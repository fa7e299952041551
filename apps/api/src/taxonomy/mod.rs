//! Taxonomy oracle client — resolves raw skill tokens to canonical titles.
//!
//! The taxonomy is network-backed and allowed to fail; callers decide how to
//! degrade. An `Ok(vec![])` is an explicit "no matches" answer and is not an
//! error.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Taxonomy service error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Canonical-title lookup capability, carried in `AppState` as
/// `Arc<dyn TaxonomyLookup>`.
#[async_trait]
pub trait TaxonomyLookup: Send + Sync {
    /// Resolves a raw term to zero or more canonical skill titles.
    async fn lookup(&self, term: &str) -> Result<Vec<String>, TaxonomyError>;
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    results: Vec<LookupResult>,
}

#[derive(Debug, Deserialize)]
struct LookupResult {
    title: String,
}

/// HTTP client for the external skill taxonomy.
#[derive(Clone)]
pub struct HttpTaxonomy {
    client: Client,
    base_url: String,
}

impl HttpTaxonomy {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
        }
    }
}

#[async_trait]
impl TaxonomyLookup for HttpTaxonomy {
    async fn lookup(&self, term: &str) -> Result<Vec<String>, TaxonomyError> {
        let url = format!("{}/api/v1/skills/search", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("q", term)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TaxonomyError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: LookupResponse = response.json().await?;
        Ok(parsed.results.into_iter().map(|r| r.title).collect())
    }
}
