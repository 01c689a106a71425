//! Database models

use campsync_common::types::{ActionType, CampaignId, ContactId, RecipientActionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Short uppercase reference derived from a record id
fn short_ref(id: &Uuid) -> String {
    id.simple().to_string()[..8].to_uppercase()
}

/// Campaign model
///
/// `name` is the internal record identity; `zoho_campaign_id` links the
/// record to the external platform and is unique across campaigns.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
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

impl Campaign {
    /// Create a new campaign with a generated record name
    pub fn new(campaign_name: impl Into<String>) -> Self {
        let id = Uuid::new_v4();
        let now = Utc::now();
        Self {
            name: format!("SAL-CAM-{}-{}", now.format("%Y"), short_ref(&id)),
            id,
            campaign_name: campaign_name.into(),
            zoho_campaign_id: None,
            zoho_campaign_key: None,
            zoho_subject: None,
            zoho_from_email: None,
            zoho_campaign_status: None,
            zoho_campaign_type: None,
            zoho_reply_to: None,
            zoho_preview_url: None,
            zoho_sent_time: None,
            last_synced: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this campaign is linked to the external platform
    pub fn is_linked(&self) -> bool {
        self.zoho_campaign_key
            .as_deref()
            .map_or(false, |k| !k.trim().is_empty())
    }
}

/// One aggregate metric entry on a campaign, ordered by `idx`
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CampaignAnalyticsEntry {
    pub id: Uuid,
    pub campaign: String,
    pub idx: i32,
    pub metric: String,
    pub value: String,
    pub percentage: Option<f64>,
}

impl CampaignAnalyticsEntry {
    /// Create a new analytics entry
    pub fn new(
        campaign: impl Into<String>,
        idx: i32,
        metric: impl Into<String>,
        value: impl Into<String>,
        percentage: Option<f64>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            campaign: campaign.into(),
            idx,
            metric: metric.into(),
            value: value.into(),
            percentage,
        }
    }
}

/// Recipient action model
///
/// Business identity is the (campaign, email, action_type) triple.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct RecipientAction {
    pub id: RecipientActionId,
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
    pub open_reports: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecipientAction {
    /// Create a new recipient action for the identifying triple
    pub fn new(campaign: impl Into<String>, email: impl Into<String>, action: ActionType) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            campaign: campaign.into(),
            email: email.into(),
            action_type: action.label().to_string(),
            contact: None,
            zoho_contact_id: None,
            sent_time: None,
            action_date: None,
            open_count: 0,
            location: None,
            country: None,
            city: None,
            state: None,
            is_spam: false,
            is_optout: false,
            contact_status: None,
            full_name: None,
            company_name: None,
            job_title: None,
            open_reports: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Get action type enum
    pub fn action_type_enum(&self) -> Option<ActionType> {
        ActionType::from_label(&self.action_type)
    }
}

/// Contact model
///
/// Emails and phones are child rows loaded alongside the contact.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub designation: Option<String>,
    pub zoho_contact_id: Option<String>,
    pub zoho_status: Option<String>,
    pub zoho_last_synced: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(skip)]
    #[serde(default)]
    pub emails: Vec<ContactEmail>,
    #[sqlx(skip)]
    #[serde(default)]
    pub phones: Vec<ContactPhone>,
}

impl Contact {
    /// Create a new contact with a generated record name
    pub fn new(first_name: impl Into<String>) -> Self {
        let id = Uuid::new_v4();
        let now = Utc::now();
        Self {
            name: format!("CONT-{}", short_ref(&id)),
            id,
            first_name: first_name.into(),
            last_name: None,
            company_name: None,
            designation: None,
            zoho_contact_id: None,
            zoho_status: None,
            zoho_last_synced: None,
            created_at: now,
            updated_at: now,
            emails: Vec::new(),
            phones: Vec::new(),
        }
    }

    /// Primary email address, if any
    pub fn primary_email(&self) -> Option<&str> {
        self.emails
            .iter()
            .find(|e| e.is_primary)
            .or_else(|| self.emails.first())
            .map(|e| e.email.as_str())
    }

    /// Append an email child row
    pub fn add_email(&mut self, email: impl Into<String>, is_primary: bool) {
        self.emails
            .push(ContactEmail::new(&self.name, email, is_primary));
    }

    /// Append a phone child row
    pub fn add_phone(&mut self, phone: impl Into<String>, is_primary: bool) {
        self.phones
            .push(ContactPhone::new(&self.name, phone, is_primary));
    }
}

/// Contact email child row
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ContactEmail {
    pub id: Uuid,
    pub contact: String,
    pub email: String,
    pub is_primary: bool,
}

impl ContactEmail {
    /// Create a new email row for a contact
    pub fn new(contact: impl Into<String>, email: impl Into<String>, is_primary: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            contact: contact.into(),
            email: email.into(),
            is_primary,
        }
    }
}

/// Contact phone child row
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ContactPhone {
    pub id: Uuid,
    pub contact: String,
    pub phone: String,
    pub is_primary: bool,
}

impl ContactPhone {
    /// Create a new phone row for a contact
    pub fn new(contact: impl Into<String>, phone: impl Into<String>, is_primary: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            contact: contact.into(),
            phone: phone.into(),
            is_primary,
        }
    }
}
