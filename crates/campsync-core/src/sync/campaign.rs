//! Campaign Synchronizer - Upserts one campaign from Zoho metadata

use std::sync::Arc;

use campsync_storage::{Campaign, RecordStore};
use chrono::Utc;
use tracing::{debug, info};

use super::analytics::AnalyticsSyncer;
use super::error::SyncError;
use crate::zoho::{CampaignsApi, ZohoCampaignSummary, ZohoValue};

/// Creates or refreshes the local record for one Zoho campaign, then runs
/// the analytics pass for it.
pub struct CampaignSyncer {
    store: Arc<dyn RecordStore>,
    analytics: AnalyticsSyncer,
}

impl CampaignSyncer {
    /// Create a new campaign syncer
    pub fn new(
        api: Arc<dyn CampaignsApi>,
        store: Arc<dyn RecordStore>,
        recipient_fetch_range: usize,
    ) -> Self {
        let analytics = AnalyticsSyncer::new(api, store.clone(), recipient_fetch_range);
        Self { store, analytics }
    }

    /// Upsert the campaign described by the summary.
    ///
    /// Summaries without a campaign key are skipped with no side effects and
    /// yield `None` — the key is required for every follow-up analytics call.
    pub async fn sync_campaign(
        &self,
        summary: &ZohoCampaignSummary,
    ) -> Result<Option<Campaign>, SyncError> {
        let campaign_key = match summary.campaign_key.as_deref().filter(|k| !k.trim().is_empty()) {
            Some(key) => key,
            None => {
                debug!(
                    "Skipping campaign without a campaign key: {}",
                    summary.campaign_name.as_deref().unwrap_or("Unknown Campaign")
                );
                return Ok(None);
            }
        };

        // Match on the external campaign id
        let zoho_id = summary.campaign_id.clone().filter(|id| !id.is_empty());
        let existing = match zoho_id.as_deref() {
            Some(id) => self.store.find_campaign_by_zoho_id(id).await?,
            None => None,
        };

        let is_new = existing.is_none();
        let mut campaign = match existing {
            Some(campaign) => campaign,
            None => Campaign::new(
                summary
                    .campaign_name
                    .clone()
                    .unwrap_or_else(|| "Unknown Campaign".to_string()),
            ),
        };

        // Zoho-sourced fields are overwritten on every sync
        campaign.zoho_campaign_id = zoho_id;
        campaign.zoho_campaign_key = Some(campaign_key.to_string());
        campaign.zoho_subject = summary.subject.clone();
        campaign.zoho_from_email = summary.from_email.clone();
        campaign.zoho_campaign_status = summary.campaign_status.clone();
        campaign.zoho_campaign_type = summary.campaign_type.clone();
        campaign.zoho_reply_to = summary.reply_to.clone();
        campaign.zoho_preview_url = summary
            .preview_url
            .clone()
            .filter(|url| !url.is_empty())
            .map(|url| normalize_preview_url(&url));
        if let Some(sent) = summary.sent_time.as_ref().and_then(ZohoValue::as_ms_timestamp) {
            campaign.zoho_sent_time = Some(sent);
        }
        campaign.last_synced = Some(Utc::now());

        self.store.save_campaign(&campaign).await?;
        if is_new {
            info!(
                "Created campaign {} for Zoho campaign {}",
                campaign.name,
                campaign.zoho_campaign_id.as_deref().unwrap_or("-")
            );
        }

        // The record is already persisted; analytics failures surface to the
        // caller without undoing the save above
        self.analytics.sync_analytics(&campaign, campaign_key).await?;

        Ok(Some(campaign))
    }
}

/// Prefix scheme-less preview links with https://.
fn normalize_preview_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}
