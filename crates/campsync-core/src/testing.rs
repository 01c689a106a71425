//! Canned-response test doubles for the sync pipeline.

use std::collections::HashMap;

use async_trait::async_trait;
use campsync_common::types::ActionType;
use campsync_common::{Error, Result};
use serde_json::Value;

use crate::zoho::{CampaignsApi, ZohoCampaignSummary, ZohoRecipient};

/// In-memory stand-in for the Zoho Campaigns API.
///
/// Responses are keyed by campaign key; the `fail_*` fields force upstream
/// errors for specific calls so failure isolation can be exercised.
#[derive(Default)]
pub struct MockCampaignsApi {
    pub campaigns: Vec<ZohoCampaignSummary>,
    pub reports: HashMap<String, HashMap<String, Value>>,
    pub recipients: HashMap<(String, ActionType), Vec<ZohoRecipient>>,
    pub fail_campaign_list: bool,
    pub fail_report_keys: Vec<String>,
    pub fail_recipient_actions: Vec<(String, ActionType)>,
}

#[async_trait]
impl CampaignsApi for MockCampaignsApi {
    async fn recent_campaigns(&self, limit: usize) -> Result<Vec<ZohoCampaignSummary>> {
        if self.fail_campaign_list {
            return Err(Error::Upstream("campaign list unavailable".to_string()));
        }
        Ok(self.campaigns.iter().take(limit).cloned().collect())
    }

    async fn campaign_report(&self, campaign_key: &str) -> Result<HashMap<String, Value>> {
        if self.fail_report_keys.iter().any(|key| key == campaign_key) {
            return Err(Error::Upstream(format!(
                "report unavailable for {}",
                campaign_key
            )));
        }
        Ok(self.reports.get(campaign_key).cloned().unwrap_or_default())
    }

    async fn campaign_recipients(
        &self,
        campaign_key: &str,
        action: ActionType,
        _range: usize,
    ) -> Result<Vec<ZohoRecipient>> {
        let key = (campaign_key.to_string(), action);
        if self.fail_recipient_actions.contains(&key) {
            return Err(Error::Upstream(format!(
                "recipients unavailable for {} / {}",
                campaign_key, action
            )));
        }
        Ok(self.recipients.get(&key).cloned().unwrap_or_default())
    }
}

/// Campaign summary fixture in "Sent" status.
pub fn sent_summary(zoho_id: &str, campaign_key: &str, name: &str) -> ZohoCampaignSummary {
    ZohoCampaignSummary {
        campaign_id: Some(zoho_id.to_string()),
        campaign_key: Some(campaign_key.to_string()),
        campaign_name: Some(name.to_string()),
        campaign_status: Some("Sent".to_string()),
        ..Default::default()
    }
}

/// Recipient fixture with just an email address.
pub fn recipient(email: &str) -> ZohoRecipient {
    ZohoRecipient {
        email: Some(email.to_string()),
        ..Default::default()
    }
}
