use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::builder::build_cv_record;
use crate::models::cv::{CvDocument, CvRecord};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CvTextRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct ParseCvResponse {
    pub status: &'static str,
    pub data: CvRecord,
}

/// POST /api/v1/cv?email=
/// Parses raw résumé text into a structured record, embeds the structured
/// summary, and upserts the document into the CV index keyed by email.
/// Empty text is accepted and produces an empty-but-valid record.
pub async fn handle_parse_cv(
    State(state): State<AppState>,
    Query(params): Query<EmailQuery>,
    Json(req): Json<CvTextRequest>,
) -> Result<Json<ParseCvResponse>, AppError> {
    let email = params.email.trim();
    if email.is_empty() {
        return Err(AppError::Validation("email must not be empty".to_string()));
    }

    let record =
        build_cv_record(&req.text, Some(email.to_string()), state.taxonomy.as_ref()).await;

    let vector = state
        .embedder
        .embed(&record.embedding_text())
        .await
        .map_err(|e| AppError::Embedding(e.to_string()))?;

    let document = CvDocument {
        record,
        cv_vector: vector,
    };

    state
        .index
        .upsert(email, &document)
        .await
        .map_err(|e| AppError::Index(e.to_string()))?;

    info!("Indexed CV for {email}");

    Ok(Json(ParseCvResponse {
        status: "success",
        data: document.record,
    }))
}
