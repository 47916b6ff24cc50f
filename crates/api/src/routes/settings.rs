//! Settings endpoint handlers.

use axum::extract::State;

use domain::models::{PublicSettings, SettingsDocument, UpdateSettingsRequest};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extract::Json;

/// GET /api/settings
///
/// Full merged settings document for the admin dashboard.
pub async fn get_settings(State(state): State<AppState>) -> Result<Json<SettingsDocument>, ApiError> {
    let document = state.settings.get_merged().await?;
    Ok(Json(document))
}

/// GET /api/settings/public
///
/// Subset of settings safe for the public widget.
pub async fn get_public_settings(
    State(state): State<AppState>,
) -> Result<Json<PublicSettings>, ApiError> {
    let view = state.settings.public_view().await?;
    Ok(Json(view))
}

/// PUT /api/settings
///
/// Partial update; returns the merged document after persisting.
pub async fn update_settings(
    State(state): State<AppState>,
    Json(request): Json<UpdateSettingsRequest>,
) -> Result<Json<SettingsDocument>, ApiError> {
    let document = state.settings.update(&request).await?;
    Ok(Json(document))
}
