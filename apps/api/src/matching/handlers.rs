use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::AppError;
use crate::matching::orchestrator::{
    rank_candidates_for_filters, rank_candidates_for_query, rank_jobs_for_candidate,
    ScoredCandidate, ScoredJob,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendJobsRequest {
    pub email: String,
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendJobsResponse {
    pub recommended_jobs: Vec<ScoredJob>,
}

/// POST /api/v1/recommendations/jobs
pub async fn handle_recommend_jobs(
    State(state): State<AppState>,
    Json(req): Json<RecommendJobsRequest>,
) -> Result<Json<RecommendJobsResponse>, AppError> {
    if req.email.trim().is_empty() {
        return Err(AppError::Validation("email must not be empty".to_string()));
    }

    let recommended_jobs = rank_jobs_for_candidate(
        state.index.as_ref(),
        state.catalog.as_ref(),
        state.embedder.as_ref(),
        req.email.trim(),
        req.top_k,
    )
    .await?;

    Ok(Json(RecommendJobsResponse { recommended_jobs }))
}

#[derive(Debug, Deserialize)]
pub struct RecommendCandidatesRequest {
    pub job_title: String,
    pub description: String,
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendCandidatesResponse {
    pub recommended_candidates: Vec<ScoredCandidate>,
}

/// POST /api/v1/recommendations/candidates
pub async fn handle_recommend_candidates(
    State(state): State<AppState>,
    Json(req): Json<RecommendCandidatesRequest>,
) -> Result<Json<RecommendCandidatesResponse>, AppError> {
    if req.job_title.trim().is_empty() && req.description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_title and description must not both be empty".to_string(),
        ));
    }

    let query_text = format!("{} {}", req.job_title, req.description);
    let recommended_candidates = rank_candidates_for_query(
        state.index.as_ref(),
        state.embedder.as_ref(),
        &query_text,
        req.top_k,
    )
    .await?;

    Ok(Json(RecommendCandidatesResponse {
        recommended_candidates,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CandidateSearchRequest {
    pub filters: BTreeMap<String, String>,
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct CandidateSearchResponse {
    pub candidates: Vec<ScoredCandidate>,
}

/// POST /api/v1/candidates/search
pub async fn handle_search_candidates(
    State(state): State<AppState>,
    Json(req): Json<CandidateSearchRequest>,
) -> Result<Json<CandidateSearchResponse>, AppError> {
    if req.filters.is_empty() {
        return Err(AppError::Validation(
            "at least one filter field is required".to_string(),
        ));
    }

    let filters: Vec<(String, String)> = req.filters.into_iter().collect();
    let candidates =
        rank_candidates_for_filters(state.index.as_ref(), &filters, req.top_k).await?;

    Ok(Json(CandidateSearchResponse { candidates }))
}
