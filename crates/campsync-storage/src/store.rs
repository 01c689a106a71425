//! Record store abstraction

use async_trait::async_trait;
use campsync_common::config::DatabaseConfig;
use campsync_common::types::ActionType;
use campsync_common::{Error, Result};
use std::sync::Arc;

use crate::db::DatabasePool;
use crate::memory::MemoryRecordStore;
use crate::models::{Campaign, CampaignAnalyticsEntry, Contact, RecipientAction};
use crate::postgres::PgRecordStore;

/// Record store trait
///
/// Save operations are upserts keyed by the record's surrogate id; lookups
/// return `None` when no record matches.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Find a campaign by its external platform id
    async fn find_campaign_by_zoho_id(&self, zoho_id: &str) -> Result<Option<Campaign>>;

    /// Get a campaign by internal record name
    async fn get_campaign(&self, name: &str) -> Result<Option<Campaign>>;

    /// List campaigns, most recently created first
    async fn list_campaigns(&self, limit: i64, offset: i64) -> Result<Vec<Campaign>>;

    /// Insert or update a campaign
    async fn save_campaign(&self, campaign: &Campaign) -> Result<()>;

    /// Replace the full analytics collection of a campaign
    async fn replace_campaign_analytics(
        &self,
        campaign_name: &str,
        entries: &[CampaignAnalyticsEntry],
    ) -> Result<()>;

    /// Get the analytics collection of a campaign, ordered by idx
    async fn campaign_analytics(&self, campaign_name: &str) -> Result<Vec<CampaignAnalyticsEntry>>;

    /// Find a recipient action by its identifying triple
    async fn find_recipient_action(
        &self,
        campaign: &str,
        email: &str,
        action: ActionType,
    ) -> Result<Option<RecipientAction>>;

    /// Insert or update a recipient action
    async fn save_recipient_action(&self, action: &RecipientAction) -> Result<()>;

    /// List recipient actions for a campaign, optionally filtered by category
    async fn list_recipient_actions(
        &self,
        campaign: &str,
        action: Option<ActionType>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RecipientAction>>;

    /// Find a contact by its external platform id
    async fn find_contact_by_zoho_id(&self, zoho_id: &str) -> Result<Option<Contact>>;

    /// Find a contact by any of its email addresses
    async fn find_contact_by_email(&self, email: &str) -> Result<Option<Contact>>;

    /// Insert or update a contact together with its email/phone rows
    async fn save_contact(&self, contact: &Contact) -> Result<()>;

    /// Mark the end of a batch of writes
    async fn commit(&self) -> Result<()>;

    /// Check store health
    async fn health_check(&self) -> Result<()>;
}

/// Create a record store from configuration
pub fn create_record_store(
    config: &DatabaseConfig,
    pool: Option<&DatabasePool>,
) -> Result<Arc<dyn RecordStore>> {
    match config.backend.as_str() {
        "postgres" => {
            let pool = pool.ok_or_else(|| {
                Error::Config("Database pool required for the postgres backend".to_string())
            })?;
            Ok(Arc::new(PgRecordStore::new(pool.pool().clone())))
        }
        "memory" => Ok(Arc::new(MemoryRecordStore::new())),
        other => Err(Error::Config(format!(
            "Unsupported database backend: {}",
            other
        ))),
    }
}
