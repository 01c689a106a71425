//! In-memory record store
//!
//! Backs tests and local development. Mirrors the PostgreSQL backend's
//! upsert semantics, including uniqueness of the external campaign id and
//! of the recipient action triple.

use async_trait::async_trait;
use campsync_common::types::ActionType;
use campsync_common::{Error, Result};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::models::{Campaign, CampaignAnalyticsEntry, Contact, RecipientAction};
use crate::store::RecordStore;

#[derive(Default)]
struct Inner {
    /// Campaigns keyed by record name
    campaigns: HashMap<String, Campaign>,
    /// Analytics entries keyed by campaign name
    analytics: HashMap<String, Vec<CampaignAnalyticsEntry>>,
    /// Recipient actions keyed by (campaign, email, action label)
    recipient_actions: HashMap<(String, String, String), RecipientAction>,
    /// Contacts keyed by record name
    contacts: HashMap<String, Contact>,
    commits: u64,
}

/// In-memory record store
#[derive(Default)]
pub struct MemoryRecordStore {
    inner: RwLock<Inner>,
}

impl MemoryRecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of campaigns held
    pub async fn campaign_count(&self) -> usize {
        self.inner.read().await.campaigns.len()
    }

    /// Number of contacts held
    pub async fn contact_count(&self) -> usize {
        self.inner.read().await.contacts.len()
    }

    /// Number of recipient actions held
    pub async fn recipient_action_count(&self) -> usize {
        self.inner.read().await.recipient_actions.len()
    }

    /// Number of commit checkpoints seen
    pub async fn commit_count(&self) -> u64 {
        self.inner.read().await.commits
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn find_campaign_by_zoho_id(&self, zoho_id: &str) -> Result<Option<Campaign>> {
        let inner = self.inner.read().await;
        Ok(inner
            .campaigns
            .values()
            .find(|c| c.zoho_campaign_id.as_deref() == Some(zoho_id))
            .cloned())
    }

    async fn get_campaign(&self, name: &str) -> Result<Option<Campaign>> {
        let inner = self.inner.read().await;
        Ok(inner.campaigns.get(name).cloned())
    }

    async fn list_campaigns(&self, limit: i64, offset: i64) -> Result<Vec<Campaign>> {
        let inner = self.inner.read().await;
        let mut campaigns: Vec<Campaign> = inner.campaigns.values().cloned().collect();
        campaigns.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(campaigns
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn save_campaign(&self, campaign: &Campaign) -> Result<()> {
        let mut inner = self.inner.write().await;

        if let Some(zoho_id) = campaign.zoho_campaign_id.as_deref() {
            let duplicate = inner.campaigns.values().any(|c| {
                c.name != campaign.name && c.zoho_campaign_id.as_deref() == Some(zoho_id)
            });
            if duplicate {
                return Err(Error::Store(format!(
                    "Duplicate zoho_campaign_id: {}",
                    zoho_id
                )));
            }
        }

        let mut saved = campaign.clone();
        if let Some(existing) = inner.campaigns.get(&campaign.name) {
            saved.id = existing.id;
            saved.created_at = existing.created_at;
        }
        inner.campaigns.insert(saved.name.clone(), saved);
        Ok(())
    }

    async fn replace_campaign_analytics(
        &self,
        campaign_name: &str,
        entries: &[CampaignAnalyticsEntry],
    ) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner
            .analytics
            .insert(campaign_name.to_string(), entries.to_vec());
        Ok(())
    }

    async fn campaign_analytics(&self, campaign_name: &str) -> Result<Vec<CampaignAnalyticsEntry>> {
        let inner = self.inner.read().await;
        let mut entries = inner
            .analytics
            .get(campaign_name)
            .cloned()
            .unwrap_or_default();
        entries.sort_by_key(|e| e.idx);
        Ok(entries)
    }

    async fn find_recipient_action(
        &self,
        campaign: &str,
        email: &str,
        action: ActionType,
    ) -> Result<Option<RecipientAction>> {
        let inner = self.inner.read().await;
        let key = (
            campaign.to_string(),
            email.to_string(),
            action.label().to_string(),
        );
        Ok(inner.recipient_actions.get(&key).cloned())
    }

    async fn save_recipient_action(&self, action: &RecipientAction) -> Result<()> {
        let mut inner = self.inner.write().await;
        let key = (
            action.campaign.clone(),
            action.email.clone(),
            action.action_type.clone(),
        );

        let mut saved = action.clone();
        if let Some(existing) = inner.recipient_actions.get(&key) {
            saved.id = existing.id;
            saved.created_at = existing.created_at;
        }
        inner.recipient_actions.insert(key, saved);
        Ok(())
    }

    async fn list_recipient_actions(
        &self,
        campaign: &str,
        action: Option<ActionType>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RecipientAction>> {
        let inner = self.inner.read().await;
        let mut actions: Vec<RecipientAction> = inner
            .recipient_actions
            .values()
            .filter(|a| a.campaign == campaign)
            .filter(|a| action.map_or(true, |wanted| a.action_type == wanted.label()))
            .cloned()
            .collect();
        actions.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.email.cmp(&b.email)));
        Ok(actions
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn find_contact_by_zoho_id(&self, zoho_id: &str) -> Result<Option<Contact>> {
        let inner = self.inner.read().await;
        Ok(inner
            .contacts
            .values()
            .find(|c| c.zoho_contact_id.as_deref() == Some(zoho_id))
            .cloned())
    }

    async fn find_contact_by_email(&self, email: &str) -> Result<Option<Contact>> {
        let inner = self.inner.read().await;
        Ok(inner
            .contacts
            .values()
            .filter(|c| c.emails.iter().any(|e| e.email == email))
            .min_by(|a, b| {
                a.created_at
                    .cmp(&b.created_at)
                    .then_with(|| a.name.cmp(&b.name))
            })
            .cloned())
    }

    async fn save_contact(&self, contact: &Contact) -> Result<()> {
        let mut inner = self.inner.write().await;

        let mut saved = contact.clone();
        if let Some(existing) = inner.contacts.get(&contact.name) {
            saved.id = existing.id;
            saved.created_at = existing.created_at;
        }
        inner.contacts.insert(saved.name.clone(), saved);
        Ok(())
    }

    async fn commit(&self) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.commits += 1;
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
