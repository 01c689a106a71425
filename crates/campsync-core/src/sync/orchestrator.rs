//! Batch Orchestrator - Drives sync runs over recently sent campaigns

use std::sync::Arc;

use campsync_common::config::SyncConfig;
use campsync_common::types::{SyncFailure, SyncSummary};
use campsync_storage::RecordStore;
use tracing::{error, info};

use super::analytics::AnalyticsSyncer;
use super::campaign::CampaignSyncer;
use super::error::SyncError;
use crate::zoho::CampaignsApi;

/// Entry point of the sync pipeline.
///
/// `sync_all` is the batch operation behind the scheduler and the sync
/// endpoint; `sync_campaign_by_name` refreshes a single already-linked
/// campaign on demand.
pub struct SyncOrchestrator {
    api: Arc<dyn CampaignsApi>,
    store: Arc<dyn RecordStore>,
    campaigns: CampaignSyncer,
    analytics: AnalyticsSyncer,
    campaign_fetch_limit: usize,
}

impl SyncOrchestrator {
    /// Create a new orchestrator wired to an API client and a record store
    pub fn new(
        api: Arc<dyn CampaignsApi>,
        store: Arc<dyn RecordStore>,
        config: &SyncConfig,
    ) -> Self {
        let campaigns = CampaignSyncer::new(api.clone(), store.clone(), config.recipient_fetch_range);
        let analytics = AnalyticsSyncer::new(api.clone(), store.clone(), config.recipient_fetch_range);
        Self {
            api,
            store,
            campaigns,
            analytics,
            campaign_fetch_limit: config.campaign_fetch_limit,
        }
    }

    /// Sync every recently sent campaign.
    ///
    /// Per-campaign failures are recorded in the summary and do not abort
    /// the batch; only a failure of the initial campaign-list fetch does.
    /// All writes are committed once at the end of the batch.
    pub async fn sync_all(&self) -> Result<SyncSummary, SyncError> {
        let campaigns = self
            .api
            .recent_campaigns(self.campaign_fetch_limit)
            .await
            .map_err(|e| SyncError::BatchFailed(e.to_string()))?;

        let total_campaigns = campaigns.len();
        let mut synced_count = 0usize;
        let mut errors = Vec::new();

        for summary in &campaigns {
            // Only completed sends carry reports worth pulling
            if summary.campaign_status.as_deref() != Some("Sent") {
                continue;
            }

            let display_name = summary
                .campaign_name
                .as_deref()
                .unwrap_or("Unknown Campaign");

            match self.campaigns.sync_campaign(summary).await {
                Ok(_) => synced_count += 1,
                Err(e) => {
                    error!("Error syncing campaign {}: {}", display_name, e);
                    errors.push(SyncFailure {
                        campaign: display_name.to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        self.store.commit().await?;

        info!(
            "Campaign sync finished: {}/{} synced, {} failed",
            synced_count,
            total_campaigns,
            errors.len()
        );

        Ok(SyncSummary {
            success: true,
            synced_count,
            total_campaigns,
            errors,
        })
    }

    /// Re-run the analytics pass for one campaign, addressed by record name.
    ///
    /// The campaign must already exist and be linked to Zoho.
    pub async fn sync_campaign_by_name(&self, name: &str) -> Result<(), SyncError> {
        let campaign = self
            .store
            .get_campaign(name)
            .await?
            .ok_or_else(|| SyncError::CampaignNotFound(name.to_string()))?;

        if !campaign.is_linked() {
            return Err(SyncError::NotLinked);
        }
        let campaign_key = campaign.zoho_campaign_key.clone().unwrap_or_default();

        self.analytics.sync_analytics(&campaign, &campaign_key).await?;
        self.store.commit().await?;

        info!("Campaign {} synced", name);
        Ok(())
    }
}
