//! Common types for CampSync

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for campaigns
pub type CampaignId = Uuid;

/// Unique identifier for recipient actions
pub type RecipientActionId = Uuid;

/// Unique identifier for contacts
pub type ContactId = Uuid;

/// Timestamp wrapper
pub type Timestamp = DateTime<Utc>;

/// Engagement action categories tracked per campaign recipient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    Opened,
    Clicked,
    #[serde(rename = "Hard Bounced")]
    HardBounced,
    #[serde(rename = "Soft Bounced")]
    SoftBounced,
    Unsubscribed,
    Complaint,
}

impl ActionType {
    /// All categories, in sync order
    pub const ALL: [ActionType; 6] = [
        ActionType::Opened,
        ActionType::Clicked,
        ActionType::HardBounced,
        ActionType::SoftBounced,
        ActionType::Unsubscribed,
        ActionType::Complaint,
    ];

    /// Human-readable label, as stored on recipient action records
    pub fn label(&self) -> &'static str {
        match self {
            ActionType::Opened => "Opened",
            ActionType::Clicked => "Clicked",
            ActionType::HardBounced => "Hard Bounced",
            ActionType::SoftBounced => "Soft Bounced",
            ActionType::Unsubscribed => "Unsubscribed",
            ActionType::Complaint => "Complaint",
        }
    }

    /// Action key understood by the Zoho recipients endpoint
    pub fn zoho_key(&self) -> &'static str {
        match self {
            ActionType::Opened => "openedcontacts",
            ActionType::Clicked => "clickedcontacts",
            ActionType::HardBounced => "senthardbounce",
            ActionType::SoftBounced => "sentsoftbounce",
            ActionType::Unsubscribed => "optoutcontacts",
            ActionType::Complaint => "spamcontacts",
        }
    }

    /// Parse from the stored label
    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.label() == s)
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for ActionType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
            .ok_or_else(|| crate::Error::Validation(format!("Unknown action type: {}", s)))
    }
}

/// One failed campaign inside an otherwise-completed batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncFailure {
    /// Campaign display name
    pub campaign: String,

    /// Error message
    pub error: String,
}

/// Result of a full batch sync run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSummary {
    /// The run itself completed (individual campaigns may still have failed)
    pub success: bool,

    /// Campaigns synced without error
    pub synced_count: usize,

    /// Campaigns attempted
    pub total_campaigns: usize,

    /// Per-campaign failures
    #[serde(default)]
    pub errors: Vec<SyncFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_type_labels() {
        assert_eq!(ActionType::Opened.label(), "Opened");
        assert_eq!(ActionType::HardBounced.label(), "Hard Bounced");
        assert_eq!(ActionType::Complaint.label(), "Complaint");
    }

    #[test]
    fn test_action_type_zoho_keys() {
        assert_eq!(ActionType::Opened.zoho_key(), "openedcontacts");
        assert_eq!(ActionType::Clicked.zoho_key(), "clickedcontacts");
        assert_eq!(ActionType::HardBounced.zoho_key(), "senthardbounce");
        assert_eq!(ActionType::SoftBounced.zoho_key(), "sentsoftbounce");
        assert_eq!(ActionType::Unsubscribed.zoho_key(), "optoutcontacts");
        assert_eq!(ActionType::Complaint.zoho_key(), "spamcontacts");
    }

    #[test]
    fn test_action_type_from_label() {
        for action in ActionType::ALL {
            assert_eq!(ActionType::from_label(action.label()), Some(action));
        }
        assert_eq!(ActionType::from_label("Forwarded"), None);
    }

    #[test]
    fn test_action_type_serde_labels() {
        let json = serde_json::to_string(&ActionType::SoftBounced).unwrap();
        assert_eq!(json, "\"Soft Bounced\"");

        let parsed: ActionType = serde_json::from_str("\"Hard Bounced\"").unwrap();
        assert_eq!(parsed, ActionType::HardBounced);
    }

    #[test]
    fn test_sync_summary_serialization() {
        let summary = SyncSummary {
            success: true,
            synced_count: 2,
            total_campaigns: 3,
            errors: vec![SyncFailure {
                campaign: "Spring Sale".to_string(),
                error: "report fetch failed".to_string(),
            }],
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["synced_count"], 2);
        assert_eq!(json["total_campaigns"], 3);
        assert_eq!(json["errors"][0]["campaign"], "Spring Sale");
    }
}
