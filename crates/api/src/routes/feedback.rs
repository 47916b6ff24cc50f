//! Feedback endpoint handlers.

use axum::{extract::State, http::StatusCode};
use chrono::Utc;
use serde_json::json;

use domain::models::{
    Feedback, FeedbackResponse, FeedbackStats, FeedbackStatus, ListFeedbackQuery,
    SubmitFeedbackRequest, UpdateStatusRequest,
};
use persistence::repositories::FeedbackRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extract::{Json, Path, Query};

/// POST /api/feedback
///
/// Public submission endpoint. Returns 201 with the transformed record.
pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(request): Json<SubmitFeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackResponse>), ApiError> {
    let feedback = state.feedback.submit(&request).await?;
    Ok((StatusCode::CREATED, Json(feedback.into())))
}

/// GET /api/feedback
///
/// Admin listing of all records, newest first by default. Supports
/// `sort` (date|rating), `order` (asc|desc) and `limit` query parameters.
pub async fn list_feedback(
    State(state): State<AppState>,
    Query(query): Query<ListFeedbackQuery>,
) -> Result<Json<Vec<FeedbackResponse>>, ApiError> {
    list(state, query, false).await
}

/// GET /api/feedback/approved
///
/// Same shape as the full listing, restricted to approved records.
pub async fn list_approved_feedback(
    State(state): State<AppState>,
    Query(query): Query<ListFeedbackQuery>,
) -> Result<Json<Vec<FeedbackResponse>>, ApiError> {
    list(state, query, true).await
}

async fn list(
    state: AppState,
    query: ListFeedbackQuery,
    approved_only: bool,
) -> Result<Json<Vec<FeedbackResponse>>, ApiError> {
    let repository = FeedbackRepository::new(state.pool.clone());
    let entities = repository
        .list(
            approved_only,
            query.sort_key(),
            query.sort_order(),
            query.effective_limit(),
        )
        .await?;

    let responses = entities
        .into_iter()
        .map(|entity| Feedback::from(entity).into())
        .collect();
    Ok(Json(responses))
}

/// GET /api/feedback/stats
pub async fn feedback_stats(State(state): State<AppState>) -> Result<Json<FeedbackStats>, ApiError> {
    let repository = FeedbackRepository::new(state.pool.clone());
    let stats = repository.stats(Utc::now()).await?;
    Ok(Json(stats))
}

/// PATCH /api/feedback/:id/status
///
/// Body `{"status": "approved" | "pending" | "hidden"}`. Hidden is stored the
/// same as pending; responses only ever report approved or pending.
pub async fn update_feedback_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let status = FeedbackStatus::parse(&request.status)
        .ok_or_else(|| ApiError::Validation("The selected status is invalid.".to_string()))?;

    let repository = FeedbackRepository::new(state.pool.clone());
    let entity = repository
        .set_approval(id, status.approves())
        .await?
        .ok_or_else(|| ApiError::NotFound("Feedback not found".to_string()))?;

    Ok(Json(Feedback::from(entity).into()))
}

/// DELETE /api/feedback/:id
pub async fn delete_feedback(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repository = FeedbackRepository::new(state.pool.clone());
    let deleted = repository.delete(id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Feedback not found".to_string()));
    }

    Ok(Json(json!({"message": "Feedback deleted"})))
}
