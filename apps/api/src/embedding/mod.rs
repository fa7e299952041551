/// Embedding client — the single point of entry for text→vector calls.
///
/// ARCHITECTURAL RULE: No other module may call the embedding service
/// directly. The model behind the service is opaque to this crate; all we
/// rely on is that identical input text yields an identical vector of
/// `EMBEDDING_DIM` floats.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Output dimensionality of the embedding model (all-MiniLM-L6-v2).
pub const EMBEDDING_DIM: usize = 384;

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Embedding service error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Expected a {EMBEDDING_DIM}-dimensional vector, got {0}")]
    Dimension(usize),

    #[error("Embedding service unavailable after {retries} retries")]
    Unavailable { retries: u32 },
}

/// Text-to-vector capability. Carried in `AppState` as `Arc<dyn Embedder>`
/// so orchestration code and tests never depend on the HTTP implementation.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

/// HTTP client for the embedding service.
/// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
#[derive(Clone)]
pub struct HttpEmbedder {
    client: Client,
    base_url: String,
}

impl HttpEmbedder {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
        }
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let url = format!("{}/embed", self.base_url);
        let request_body = EmbedRequest { text };

        let mut last_error: Option<EmbeddingError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 500ms, 1s
                let delay = std::time::Duration::from_millis(500 * (1 << (attempt - 1)));
                warn!(
                    "Embedding call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self.client.post(&url).json(&request_body).send().await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(EmbeddingError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Embedding service returned {}: {}", status, body);
                last_error = Some(EmbeddingError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(EmbeddingError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let parsed: EmbedResponse = response.json().await?;

            if parsed.embedding.len() != EMBEDDING_DIM {
                return Err(EmbeddingError::Dimension(parsed.embedding.len()));
            }

            return Ok(parsed.embedding);
        }

        Err(last_error.unwrap_or(EmbeddingError::Unavailable {
            retries: MAX_RETRIES,
        }))
    }
}
