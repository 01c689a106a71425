//! Sync trigger handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use campsync_common::types::SyncSummary;
use campsync_core::SyncError;
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

use crate::routes::AppState;

/// Error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Result of a single-campaign sync trigger
#[derive(Debug, Serialize)]
pub struct SyncTriggerResponse {
    pub success: bool,
    pub message: String,
}

/// Run a sync over all recently sent campaigns
///
/// POST /api/v1/sync/campaigns
pub async fn sync_all_campaigns(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SyncSummary>, (StatusCode, Json<ErrorResponse>)> {
    let summary = state.orchestrator.sync_all().await.map_err(|e| {
        error!("Campaign sync run failed: {}", e);
        let status =
            StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let code = match &e {
            SyncError::BatchFailed(_) => "upstream_error",
            SyncError::Common(inner) => inner.code(),
            _ => "internal_error",
        };
        (
            status,
            Json(ErrorResponse {
                error: code.to_string(),
                message: e.to_string(),
            }),
        )
    })?;

    Ok(Json(summary))
}

/// Sync one campaign from Zoho by record name
///
/// POST /api/v1/campaigns/:name/sync
pub async fn sync_campaign(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<SyncTriggerResponse>, (StatusCode, Json<ErrorResponse>)> {
    state
        .orchestrator
        .sync_campaign_by_name(&name)
        .await
        .map_err(|e| {
            error!("Failed to sync campaign {}: {}", name, e);
            let status =
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let code = match &e {
                SyncError::CampaignNotFound(_) => "not_found",
                SyncError::NotLinked => "validation_error",
                SyncError::BatchFailed(_) => "upstream_error",
                SyncError::Common(inner) => inner.code(),
            };
            (
                status,
                Json(ErrorResponse {
                    error: code.to_string(),
                    message: e.to_string(),
                }),
            )
        })?;

    Ok(Json(SyncTriggerResponse {
        success: true,
        message: "Campaign synced successfully".to_string(),
    }))
}
