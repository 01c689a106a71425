//! Campaign read handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use campsync_common::types::ActionType;
use campsync_storage::models::{Campaign, CampaignAnalyticsEntry, RecipientAction};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use crate::routes::AppState;

/// Error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Query parameters for listing campaigns
#[derive(Debug, Deserialize)]
pub struct ListCampaignsQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

/// Query parameters for listing recipient actions
#[derive(Debug, Deserialize)]
pub struct ListRecipientsQuery {
    pub action: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// Campaign list response
#[derive(Debug, Serialize)]
pub struct CampaignListResponse {
    pub data: Vec<CampaignResponse>,
    pub limit: i64,
    pub offset: i64,
}

/// Campaign response
#[derive(Debug, Serialize)]
pub struct CampaignResponse {
    pub id: Uuid,
    pub name: String,
    pub campaign_name: String,
    pub zoho_campaign_id: Option<String>,
    pub zoho_campaign_key: Option<String>,
    pub zoho_subject: Option<String>,
    pub zoho_from_email: Option<String>,
    pub zoho_campaign_status: Option<String>,
    pub zoho_campaign_type: Option<String>,
    pub zoho_reply_to: Option<String>,
    pub zoho_preview_url: Option<String>,
    pub zoho_sent_time: Option<DateTime<Utc>>,
    pub last_synced: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Campaign> for CampaignResponse {
    fn from(c: Campaign) -> Self {
        Self {
            id: c.id,
            name: c.name,
            campaign_name: c.campaign_name,
            zoho_campaign_id: c.zoho_campaign_id,
            zoho_campaign_key: c.zoho_campaign_key,
            zoho_subject: c.zoho_subject,
            zoho_from_email: c.zoho_from_email,
            zoho_campaign_status: c.zoho_campaign_status,
            zoho_campaign_type: c.zoho_campaign_type,
            zoho_reply_to: c.zoho_reply_to,
            zoho_preview_url: c.zoho_preview_url,
            zoho_sent_time: c.zoho_sent_time,
            last_synced: c.last_synced,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Campaign detail response with analytics entries
#[derive(Debug, Serialize)]
pub struct CampaignDetailResponse {
    pub campaign: CampaignResponse,
    pub analytics: Vec<AnalyticsEntryResponse>,
}

/// One aggregate metric of a campaign
#[derive(Debug, Serialize)]
pub struct AnalyticsEntryResponse {
    pub idx: i32,
    pub metric: String,
    pub value: String,
    pub percentage: Option<f64>,
}

impl From<CampaignAnalyticsEntry> for AnalyticsEntryResponse {
    fn from(e: CampaignAnalyticsEntry) -> Self {
        Self {
            idx: e.idx,
            metric: e.metric,
            value: e.value,
            percentage: e.percentage,
        }
    }
}

/// Recipient action list response
#[derive(Debug, Serialize)]
pub struct RecipientListResponse {
    pub data: Vec<RecipientActionResponse>,
    pub limit: i64,
    pub offset: i64,
}

/// Recipient action response
#[derive(Debug, Serialize)]
pub struct RecipientActionResponse {
    pub id: Uuid,
    pub campaign: String,
    pub email: String,
    pub action_type: String,
    pub contact: Option<String>,
    pub zoho_contact_id: Option<String>,
    pub sent_time: Option<DateTime<Utc>>,
    pub action_date: Option<DateTime<Utc>>,
    pub open_count: i32,
    pub location: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub is_spam: bool,
    pub is_optout: bool,
    pub contact_status: Option<String>,
    pub full_name: Option<String>,
    pub company_name: Option<String>,
    pub job_title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RecipientAction> for RecipientActionResponse {
    fn from(r: RecipientAction) -> Self {
        Self {
            id: r.id,
            campaign: r.campaign,
            email: r.email,
            action_type: r.action_type,
            contact: r.contact,
            zoho_contact_id: r.zoho_contact_id,
            sent_time: r.sent_time,
            action_date: r.action_date,
            open_count: r.open_count,
            location: r.location,
            country: r.country,
            city: r.city,
            state: r.state,
            is_spam: r.is_spam,
            is_optout: r.is_optout,
            contact_status: r.contact_status,
            full_name: r.full_name,
            company_name: r.company_name,
            job_title: r.job_title,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// List synced campaigns
///
/// GET /api/v1/campaigns
pub async fn list_campaigns(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListCampaignsQuery>,
) -> Result<Json<CampaignListResponse>, (StatusCode, Json<ErrorResponse>)> {
    let campaigns = state
        .store
        .list_campaigns(query.limit, query.offset)
        .await
        .map_err(|e| {
            error!("Failed to list campaigns: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "internal_error".to_string(),
                    message: "Failed to list campaigns".to_string(),
                }),
            )
        })?;

    let data = campaigns.into_iter().map(CampaignResponse::from).collect();

    Ok(Json(CampaignListResponse {
        data,
        limit: query.limit,
        offset: query.offset,
    }))
}

/// Get a campaign with its analytics entries
///
/// GET /api/v1/campaigns/:name
pub async fn get_campaign(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<CampaignDetailResponse>, (StatusCode, Json<ErrorResponse>)> {
    let campaign = state
        .store
        .get_campaign(&name)
        .await
        .map_err(|e| {
            error!("Failed to get campaign {}: {}", name, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "internal_error".to_string(),
                    message: "Failed to get campaign".to_string(),
                }),
            )
        })?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "not_found".to_string(),
                    message: "Campaign not found".to_string(),
                }),
            )
        })?;

    let analytics = state
        .store
        .campaign_analytics(&name)
        .await
        .map_err(|e| {
            error!("Failed to get analytics for campaign {}: {}", name, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "internal_error".to_string(),
                    message: "Failed to get campaign analytics".to_string(),
                }),
            )
        })?
        .into_iter()
        .map(AnalyticsEntryResponse::from)
        .collect();

    Ok(Json(CampaignDetailResponse {
        campaign: CampaignResponse::from(campaign),
        analytics,
    }))
}

/// List the recipient actions of a campaign
///
/// GET /api/v1/campaigns/:name/recipients
pub async fn list_campaign_recipients(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(query): Query<ListRecipientsQuery>,
) -> Result<Json<RecipientListResponse>, (StatusCode, Json<ErrorResponse>)> {
    let action = match query.action.as_deref() {
        Some(raw) => Some(raw.parse::<ActionType>().map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "validation_error".to_string(),
                    message: e.to_string(),
                }),
            )
        })?),
        None => None,
    };

    // The campaign must exist; an empty action list is not a 404
    state
        .store
        .get_campaign(&name)
        .await
        .map_err(|e| {
            error!("Failed to get campaign {}: {}", name, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "internal_error".to_string(),
                    message: "Failed to get campaign".to_string(),
                }),
            )
        })?
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "not_found".to_string(),
                    message: "Campaign not found".to_string(),
                }),
            )
        })?;

    let actions = state
        .store
        .list_recipient_actions(&name, action, query.limit, query.offset)
        .await
        .map_err(|e| {
            error!("Failed to list recipients for campaign {}: {}", name, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "internal_error".to_string(),
                    message: "Failed to list recipient actions".to_string(),
                }),
            )
        })?;

    let data = actions
        .into_iter()
        .map(RecipientActionResponse::from)
        .collect();

    Ok(Json(RecipientListResponse {
        data,
        limit: query.limit,
        offset: query.offset,
    }))
}
