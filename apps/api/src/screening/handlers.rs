//! Axum route handlers for the Screening API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::screening::state::ScreeningResult;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScreenRequest {
    pub application: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScreenResponse {
    #[serde(flatten)]
    pub result: ScreeningResult,
    pub screened_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct BatchScreenRequest {
    pub applications: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchScreenResponse {
    pub results: Vec<ScreeningResult>,
    pub screened_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/screenings
///
/// Screens one application: experience classification, skill assessment, decision.
pub async fn handle_screen(
    State(state): State<AppState>,
    Json(request): Json<ScreenRequest>,
) -> Result<Json<ScreenResponse>, AppError> {
    let result = state.screener.screen(&request.application).await?;

    Ok(Json(ScreenResponse {
        result,
        screened_at: Utc::now(),
    }))
}

/// POST /api/v1/screenings/batch
///
/// Screens applications sequentially in order. Any failure fails the whole batch.
/// Blank entries are rejected up front so no completion calls are spent on a batch
/// that cannot finish.
pub async fn handle_screen_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchScreenRequest>,
) -> Result<Json<BatchScreenResponse>, AppError> {
    if request.applications.is_empty() {
        return Err(AppError::Validation("applications cannot be empty".to_string()));
    }
    if let Some(index) = request
        .applications
        .iter()
        .position(|a| a.trim().is_empty())
    {
        return Err(AppError::Validation(format!(
            "applications[{index}] cannot be empty"
        )));
    }

    let results = state.screener.screen_batch(&request.applications).await?;

    Ok(Json(BatchScreenResponse {
        results,
        screened_at: Utc::now(),
    }))
}
