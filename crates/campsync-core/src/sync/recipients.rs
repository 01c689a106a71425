//! Recipient Synchronizer - Per-action recipient activity for one campaign

use std::sync::Arc;

use campsync_common::types::ActionType;
use campsync_storage::{Campaign, RecipientAction, RecordStore};
use tracing::{debug, warn};

use super::contact::ContactResolver;
use super::error::SyncError;
use crate::zoho::{CampaignsApi, ZohoRecipient, ZohoValue};

/// Pulls per-recipient engagement data and upserts recipient action records.
pub struct RecipientSyncer {
    api: Arc<dyn CampaignsApi>,
    store: Arc<dyn RecordStore>,
    contacts: ContactResolver,
    fetch_range: usize,
}

impl RecipientSyncer {
    /// Create a new recipient syncer
    pub fn new(
        api: Arc<dyn CampaignsApi>,
        store: Arc<dyn RecordStore>,
        fetch_range: usize,
    ) -> Self {
        let contacts = ContactResolver::new(store.clone());
        Self {
            api,
            store,
            contacts,
            fetch_range,
        }
    }

    /// Sync recipient activity across every action category.
    ///
    /// Categories are isolated from each other: a fetch or write failure in
    /// one category is logged and the remaining categories still run.
    pub async fn sync_recipients(
        &self,
        campaign: &Campaign,
        campaign_key: &str,
    ) -> Result<(), SyncError> {
        for action in ActionType::ALL {
            if let Err(e) = self.sync_action_category(campaign, campaign_key, action).await {
                warn!(
                    "Error syncing {} recipients for campaign {}: {}",
                    action, campaign.name, e
                );
            }
        }
        Ok(())
    }

    /// Sync one action category for the campaign
    async fn sync_action_category(
        &self,
        campaign: &Campaign,
        campaign_key: &str,
        action: ActionType,
    ) -> Result<(), SyncError> {
        let recipients = self
            .api
            .campaign_recipients(campaign_key, action, self.fetch_range)
            .await?;

        if recipients.is_empty() {
            return Ok(());
        }

        debug!(
            "Syncing {} {} recipients for campaign {}",
            recipients.len(),
            action,
            campaign.name
        );

        for recipient in &recipients {
            self.sync_recipient(campaign, action, recipient).await?;
        }

        Ok(())
    }

    /// Upsert one recipient action record
    async fn sync_recipient(
        &self,
        campaign: &Campaign,
        action: ActionType,
        recipient: &ZohoRecipient,
    ) -> Result<(), SyncError> {
        // Email is the identity signal; rows without one carry nothing usable
        let email = match recipient.email.as_deref().filter(|e| !e.is_empty()) {
            Some(email) => email.to_string(),
            None => return Ok(()),
        };

        let contact = self.contacts.resolve(recipient).await?;

        // Load the record for the identifying triple, or start a fresh one
        let mut record = match self
            .store
            .find_recipient_action(&campaign.name, &email, action)
            .await?
        {
            Some(existing) => existing,
            None => RecipientAction::new(campaign.name.clone(), email.clone(), action),
        };

        record.contact = contact.as_ref().map(|c| c.name.clone());
        record.zoho_contact_id = recipient.contact_id.clone();
        if let Some(occurred) = recipient.sent_time.as_ref().and_then(ZohoValue::as_ms_timestamp) {
            record.sent_time = Some(occurred);
            record.action_date = Some(occurred);
        }
        record.open_count = recipient
            .times_opened
            .as_ref()
            .and_then(ZohoValue::as_i64)
            .unwrap_or(0) as i32;
        record.location = recipient.location.clone();
        record.country = recipient.country.clone();
        record.city = recipient.city.clone();
        record.state = recipient.state.clone();
        record.is_spam = recipient.spam_flag();
        record.is_optout = recipient.optout_flag();
        record.contact_status = recipient.contact_status.clone();
        record.full_name = Some(recipient.full_name()).filter(|name| !name.is_empty());
        record.company_name = recipient.company_name.clone();
        record.job_title = recipient.job_title.clone();
        if let Some(reports) = recipient.open_reports.as_ref().filter(|r| !r.is_null()) {
            record.open_reports = serde_json::to_string(reports).ok();
        }

        self.store.save_recipient_action(&record).await?;
        Ok(())
    }
}
