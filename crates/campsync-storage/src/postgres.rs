//! PostgreSQL record store

use async_trait::async_trait;
use campsync_common::types::ActionType;
use campsync_common::{Error, Result};
use sqlx::PgPool;
use tracing::debug;

use crate::models::{Campaign, CampaignAnalyticsEntry, Contact, ContactEmail, ContactPhone, RecipientAction};
use crate::store::RecordStore;

/// PostgreSQL-backed record store
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    /// Create a new store over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load email/phone child rows onto a contact
    async fn attach_contact_children(&self, contact: &mut Contact) -> Result<()> {
        contact.emails = sqlx::query_as::<_, ContactEmail>(
            "SELECT * FROM contact_emails WHERE contact = $1 ORDER BY is_primary DESC, id",
        )
        .bind(&contact.name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::Store(format!("Failed to load contact emails: {}", e)))?;

        contact.phones = sqlx::query_as::<_, ContactPhone>(
            "SELECT * FROM contact_phones WHERE contact = $1 ORDER BY is_primary DESC, id",
        )
        .bind(&contact.name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::Store(format!("Failed to load contact phones: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn find_campaign_by_zoho_id(&self, zoho_id: &str) -> Result<Option<Campaign>> {
        sqlx::query_as::<_, Campaign>("SELECT * FROM campaigns WHERE zoho_campaign_id = $1")
            .bind(zoho_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Error::Store(format!("Failed to find campaign: {}", e)))
    }

    async fn get_campaign(&self, name: &str) -> Result<Option<Campaign>> {
        sqlx::query_as::<_, Campaign>("SELECT * FROM campaigns WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Error::Store(format!("Failed to get campaign: {}", e)))
    }

    async fn list_campaigns(&self, limit: i64, offset: i64) -> Result<Vec<Campaign>> {
        sqlx::query_as::<_, Campaign>(
            r#"
            SELECT * FROM campaigns
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::Store(format!("Failed to list campaigns: {}", e)))
    }

    async fn save_campaign(&self, campaign: &Campaign) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO campaigns (
                id, name, campaign_name, zoho_campaign_id, zoho_campaign_key,
                zoho_subject, zoho_from_email, zoho_campaign_status, zoho_campaign_type,
                zoho_reply_to, zoho_preview_url, zoho_sent_time, last_synced,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ON CONFLICT (id) DO UPDATE SET
                campaign_name = EXCLUDED.campaign_name,
                zoho_campaign_id = EXCLUDED.zoho_campaign_id,
                zoho_campaign_key = EXCLUDED.zoho_campaign_key,
                zoho_subject = EXCLUDED.zoho_subject,
                zoho_from_email = EXCLUDED.zoho_from_email,
                zoho_campaign_status = EXCLUDED.zoho_campaign_status,
                zoho_campaign_type = EXCLUDED.zoho_campaign_type,
                zoho_reply_to = EXCLUDED.zoho_reply_to,
                zoho_preview_url = EXCLUDED.zoho_preview_url,
                zoho_sent_time = EXCLUDED.zoho_sent_time,
                last_synced = EXCLUDED.last_synced,
                updated_at = NOW()
            "#,
        )
        .bind(campaign.id)
        .bind(&campaign.name)
        .bind(&campaign.campaign_name)
        .bind(&campaign.zoho_campaign_id)
        .bind(&campaign.zoho_campaign_key)
        .bind(&campaign.zoho_subject)
        .bind(&campaign.zoho_from_email)
        .bind(&campaign.zoho_campaign_status)
        .bind(&campaign.zoho_campaign_type)
        .bind(&campaign.zoho_reply_to)
        .bind(&campaign.zoho_preview_url)
        .bind(campaign.zoho_sent_time)
        .bind(campaign.last_synced)
        .bind(campaign.created_at)
        .bind(campaign.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Store(format!("Failed to save campaign: {}", e)))?;

        debug!(campaign = %campaign.name, "Saved campaign");
        Ok(())
    }

    async fn replace_campaign_analytics(
        &self,
        campaign_name: &str,
        entries: &[CampaignAnalyticsEntry],
    ) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::Store(format!("Failed to begin transaction: {}", e)))?;

        sqlx::query("DELETE FROM campaign_analytics WHERE campaign = $1")
            .bind(campaign_name)
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::Store(format!("Failed to clear analytics: {}", e)))?;

        for entry in entries {
            sqlx::query(
                r#"
                INSERT INTO campaign_analytics (id, campaign, idx, metric, value, percentage)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(entry.id)
            .bind(&entry.campaign)
            .bind(entry.idx)
            .bind(&entry.metric)
            .bind(&entry.value)
            .bind(entry.percentage)
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::Store(format!("Failed to insert analytics entry: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| Error::Store(format!("Failed to commit analytics: {}", e)))?;

        debug!(campaign = %campaign_name, entries = entries.len(), "Replaced campaign analytics");
        Ok(())
    }

    async fn campaign_analytics(&self, campaign_name: &str) -> Result<Vec<CampaignAnalyticsEntry>> {
        sqlx::query_as::<_, CampaignAnalyticsEntry>(
            "SELECT * FROM campaign_analytics WHERE campaign = $1 ORDER BY idx",
        )
        .bind(campaign_name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| Error::Store(format!("Failed to load analytics: {}", e)))
    }

    async fn find_recipient_action(
        &self,
        campaign: &str,
        email: &str,
        action: ActionType,
    ) -> Result<Option<RecipientAction>> {
        sqlx::query_as::<_, RecipientAction>(
            r#"
            SELECT * FROM recipient_actions
            WHERE campaign = $1 AND email = $2 AND action_type = $3
            "#,
        )
        .bind(campaign)
        .bind(email)
        .bind(action.label())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Store(format!("Failed to find recipient action: {}", e)))
    }

    async fn save_recipient_action(&self, action: &RecipientAction) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO recipient_actions (
                id, campaign, email, action_type, contact, zoho_contact_id,
                sent_time, action_date, open_count, location, country, city, state,
                is_spam, is_optout, contact_status, full_name, company_name,
                job_title, open_reports, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    $15, $16, $17, $18, $19, $20, $21, $22)
            ON CONFLICT (campaign, email, action_type) DO UPDATE SET
                contact = EXCLUDED.contact,
                zoho_contact_id = EXCLUDED.zoho_contact_id,
                sent_time = EXCLUDED.sent_time,
                action_date = EXCLUDED.action_date,
                open_count = EXCLUDED.open_count,
                location = EXCLUDED.location,
                country = EXCLUDED.country,
                city = EXCLUDED.city,
                state = EXCLUDED.state,
                is_spam = EXCLUDED.is_spam,
                is_optout = EXCLUDED.is_optout,
                contact_status = EXCLUDED.contact_status,
                full_name = EXCLUDED.full_name,
                company_name = EXCLUDED.company_name,
                job_title = EXCLUDED.job_title,
                open_reports = EXCLUDED.open_reports,
                updated_at = NOW()
            "#,
        )
        .bind(action.id)
        .bind(&action.campaign)
        .bind(&action.email)
        .bind(&action.action_type)
        .bind(&action.contact)
        .bind(&action.zoho_contact_id)
        .bind(action.sent_time)
        .bind(action.action_date)
        .bind(action.open_count)
        .bind(&action.location)
        .bind(&action.country)
        .bind(&action.city)
        .bind(&action.state)
        .bind(action.is_spam)
        .bind(action.is_optout)
        .bind(&action.contact_status)
        .bind(&action.full_name)
        .bind(&action.company_name)
        .bind(&action.job_title)
        .bind(&action.open_reports)
        .bind(action.created_at)
        .bind(action.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Store(format!("Failed to save recipient action: {}", e)))?;

        Ok(())
    }

    async fn list_recipient_actions(
        &self,
        campaign: &str,
        action: Option<ActionType>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RecipientAction>> {
        if let Some(action) = action {
            sqlx::query_as::<_, RecipientAction>(
                r#"
                SELECT * FROM recipient_actions
                WHERE campaign = $1 AND action_type = $2
                ORDER BY created_at DESC
                LIMIT $3 OFFSET $4
                "#,
            )
            .bind(campaign)
            .bind(action.label())
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Error::Store(format!("Failed to list recipient actions: {}", e)))
        } else {
            sqlx::query_as::<_, RecipientAction>(
                r#"
                SELECT * FROM recipient_actions
                WHERE campaign = $1
                ORDER BY created_at DESC
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(campaign)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Error::Store(format!("Failed to list recipient actions: {}", e)))
        }
    }

    async fn find_contact_by_zoho_id(&self, zoho_id: &str) -> Result<Option<Contact>> {
        let contact =
            sqlx::query_as::<_, Contact>("SELECT * FROM contacts WHERE zoho_contact_id = $1")
                .bind(zoho_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| Error::Store(format!("Failed to find contact: {}", e)))?;

        match contact {
            Some(mut contact) => {
                self.attach_contact_children(&mut contact).await?;
                Ok(Some(contact))
            }
            None => Ok(None),
        }
    }

    async fn find_contact_by_email(&self, email: &str) -> Result<Option<Contact>> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            SELECT c.* FROM contacts c
            JOIN contact_emails e ON e.contact = c.name
            WHERE e.email = $1
            ORDER BY c.created_at
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Store(format!("Failed to find contact by email: {}", e)))?;

        match contact {
            Some(mut contact) => {
                self.attach_contact_children(&mut contact).await?;
                Ok(Some(contact))
            }
            None => Ok(None),
        }
    }

    async fn save_contact(&self, contact: &Contact) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Error::Store(format!("Failed to begin transaction: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO contacts (
                id, name, first_name, last_name, company_name, designation,
                zoho_contact_id, zoho_status, zoho_last_synced, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (id) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                company_name = EXCLUDED.company_name,
                designation = EXCLUDED.designation,
                zoho_contact_id = EXCLUDED.zoho_contact_id,
                zoho_status = EXCLUDED.zoho_status,
                zoho_last_synced = EXCLUDED.zoho_last_synced,
                updated_at = NOW()
            "#,
        )
        .bind(contact.id)
        .bind(&contact.name)
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .bind(&contact.company_name)
        .bind(&contact.designation)
        .bind(&contact.zoho_contact_id)
        .bind(&contact.zoho_status)
        .bind(contact.zoho_last_synced)
        .bind(contact.created_at)
        .bind(contact.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| Error::Store(format!("Failed to save contact: {}", e)))?;

        sqlx::query("DELETE FROM contact_emails WHERE contact = $1")
            .bind(&contact.name)
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::Store(format!("Failed to clear contact emails: {}", e)))?;

        for email in &contact.emails {
            sqlx::query(
                "INSERT INTO contact_emails (id, contact, email, is_primary) VALUES ($1, $2, $3, $4)",
            )
            .bind(email.id)
            .bind(&email.contact)
            .bind(&email.email)
            .bind(email.is_primary)
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::Store(format!("Failed to insert contact email: {}", e)))?;
        }

        sqlx::query("DELETE FROM contact_phones WHERE contact = $1")
            .bind(&contact.name)
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::Store(format!("Failed to clear contact phones: {}", e)))?;

        for phone in &contact.phones {
            sqlx::query(
                "INSERT INTO contact_phones (id, contact, phone, is_primary) VALUES ($1, $2, $3, $4)",
            )
            .bind(phone.id)
            .bind(&phone.contact)
            .bind(&phone.phone)
            .bind(phone.is_primary)
            .execute(&mut *tx)
            .await
            .map_err(|e| Error::Store(format!("Failed to insert contact phone: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| Error::Store(format!("Failed to commit contact: {}", e)))?;

        debug!(contact = %contact.name, "Saved contact");
        Ok(())
    }

    async fn commit(&self) -> Result<()> {
        // Writes are durable as issued; this marks the batch boundary.
        debug!("Record store commit checkpoint");
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Store(format!("Health check failed: {}", e)))?;
        Ok(())
    }
}
