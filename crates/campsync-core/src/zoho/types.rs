//! Payload types served by the Zoho Campaigns REST API.
//!
//! Zoho field names are lowercase and occasionally camelCase; serde renames
//! keep the Rust side conventional. Numeric fields arrive either as JSON
//! numbers or as quoted strings depending on the endpoint, so scalar fields
//! that need arithmetic go through [`ZohoValue`].

use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Scalar that Zoho serves either as a JSON number or a quoted string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ZohoValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl ZohoValue {
    /// Numeric reading of the value, if it has one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ZohoValue::Integer(n) => Some(*n),
            ZohoValue::Float(f) => Some(*f as i64),
            ZohoValue::Text(s) => s.trim().parse::<i64>().ok(),
        }
    }

    /// Interpret the value as a millisecond epoch and convert to UTC.
    ///
    /// Returns `None` for missing, zero, or non-numeric input so callers can
    /// leave their timestamp fields untouched.
    pub fn as_ms_timestamp(&self) -> Option<DateTime<Utc>> {
        let millis = self.as_i64().filter(|ms| *ms != 0)?;
        Utc.timestamp_millis_opt(millis).single()
    }
}

/// One entry of the recent-campaigns listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZohoCampaignSummary {
    #[serde(rename = "campaignId", default)]
    pub campaign_id: Option<String>,

    #[serde(default)]
    pub campaign_key: Option<String>,

    #[serde(default)]
    pub campaign_name: Option<String>,

    #[serde(default)]
    pub subject: Option<String>,

    #[serde(default)]
    pub from_email: Option<String>,

    /// Millisecond epoch of the send, when the campaign went out.
    #[serde(default)]
    pub sent_time: Option<ZohoValue>,

    #[serde(default)]
    pub campaign_status: Option<String>,

    #[serde(rename = "campaigntype", default)]
    pub campaign_type: Option<String>,

    #[serde(default)]
    pub reply_to: Option<String>,

    /// Preview link, sometimes served without a scheme.
    #[serde(rename = "campaign_preview", default)]
    pub preview_url: Option<String>,
}

/// Envelope of the recent-campaigns endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecentCampaignsResponse {
    #[serde(default)]
    pub campaigns: Vec<ZohoCampaignSummary>,
}

/// Envelope of the campaign-report endpoint. Metric values are kept raw;
/// the analytics pass decides how to render each one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignReportResponse {
    #[serde(default)]
    pub campaign_reports: HashMap<String, Value>,
}

/// Envelope of the per-action recipients endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipientsResponse {
    #[serde(default)]
    pub recipients: Vec<ZohoRecipient>,
}

/// One recipient row of a per-action recipients listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZohoRecipient {
    #[serde(rename = "contactemailaddress", default)]
    pub email: Option<String>,

    #[serde(rename = "contactid", default)]
    pub contact_id: Option<String>,

    /// Millisecond epoch of the action.
    #[serde(default)]
    pub sent_time: Option<ZohoValue>,

    #[serde(rename = "numoftimeopened", default)]
    pub times_opened: Option<ZohoValue>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub country: Option<String>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub state: Option<String>,

    /// Spam flag; Zoho serves the string `"true"`, not a boolean.
    #[serde(rename = "isspam", default)]
    pub is_spam: Option<String>,

    #[serde(rename = "isoptout", default)]
    pub is_optout: Option<String>,

    #[serde(rename = "contactstatus", default)]
    pub contact_status: Option<String>,

    #[serde(rename = "contactfn", default)]
    pub first_name: Option<String>,

    #[serde(rename = "contactln", default)]
    pub last_name: Option<String>,

    #[serde(rename = "companyname", default)]
    pub company_name: Option<String>,

    #[serde(rename = "jobtitle", default)]
    pub job_title: Option<String>,

    /// Raw open-event payload, stored on the action record as serialized JSON.
    #[serde(rename = "openreports", default)]
    pub open_reports: Option<Value>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub mobile: Option<String>,
}

impl ZohoRecipient {
    /// First and last name joined with a single space, trimmed.
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }

    /// Exact-match flag parsing: only the literal string `"true"` counts.
    pub fn spam_flag(&self) -> bool {
        self.is_spam.as_deref() == Some("true")
    }

    /// Exact-match flag parsing: only the literal string `"true"` counts.
    pub fn optout_flag(&self) -> bool {
        self.is_optout.as_deref() == Some("true")
    }

    /// Phone number to record, preferring the landline field over mobile.
    pub fn preferred_phone(&self) -> Option<&str> {
        self.phone
            .as_deref()
            .filter(|p| !p.is_empty())
            .or_else(|| self.mobile.as_deref().filter(|m| !m.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_campaign_summary_field_renames() {
        let summary: ZohoCampaignSummary = serde_json::from_value(json!({
            "campaignId": "12345",
            "campaign_key": "abc-key",
            "campaign_name": "Spring Sale",
            "campaigntype": "Regular",
            "campaign_preview": "example.com/preview",
            "sent_time": "1700000000000",
            "campaign_status": "Sent"
        }))
        .unwrap();

        assert_eq!(summary.campaign_id.as_deref(), Some("12345"));
        assert_eq!(summary.campaign_key.as_deref(), Some("abc-key"));
        assert_eq!(summary.campaign_type.as_deref(), Some("Regular"));
        assert_eq!(summary.preview_url.as_deref(), Some("example.com/preview"));
        assert_eq!(summary.campaign_status.as_deref(), Some("Sent"));
    }

    #[test]
    fn test_campaign_summary_tolerates_missing_fields() {
        let summary: ZohoCampaignSummary = serde_json::from_value(json!({})).unwrap();
        assert_eq!(summary.campaign_id, None);
        assert_eq!(summary.campaign_key, None);
        assert_eq!(summary.sent_time, None);
    }

    #[test]
    fn test_zoho_value_number_or_string() {
        let number: ZohoValue = serde_json::from_value(json!(1700000000000i64)).unwrap();
        let string: ZohoValue = serde_json::from_value(json!("1700000000000")).unwrap();

        assert_eq!(number.as_i64(), Some(1700000000000));
        assert_eq!(string.as_i64(), Some(1700000000000));
        assert_eq!(ZohoValue::Text("not-a-number".to_string()).as_i64(), None);
    }

    #[test]
    fn test_ms_timestamp_conversion() {
        let value = ZohoValue::Text("1700000000000".to_string());
        let ts = value.as_ms_timestamp().unwrap();
        assert_eq!(ts.timestamp(), 1_700_000_000);

        assert_eq!(ZohoValue::Text("garbage".to_string()).as_ms_timestamp(), None);
        assert_eq!(ZohoValue::Integer(0).as_ms_timestamp(), None);
    }

    #[test]
    fn test_recipient_full_name() {
        let recipient = ZohoRecipient {
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            ..Default::default()
        };
        assert_eq!(recipient.full_name(), "Jane Doe");

        let first_only = ZohoRecipient {
            first_name: Some("Jane".to_string()),
            ..Default::default()
        };
        assert_eq!(first_only.full_name(), "Jane");

        assert_eq!(ZohoRecipient::default().full_name(), "");
    }

    #[test]
    fn test_recipient_flags_require_exact_true() {
        let recipient = ZohoRecipient {
            is_spam: Some("true".to_string()),
            is_optout: Some("TRUE".to_string()),
            ..Default::default()
        };
        assert!(recipient.spam_flag());
        assert!(!recipient.optout_flag());
        assert!(!ZohoRecipient::default().spam_flag());
    }

    #[test]
    fn test_recipient_preferred_phone() {
        let both = ZohoRecipient {
            phone: Some("111".to_string()),
            mobile: Some("222".to_string()),
            ..Default::default()
        };
        assert_eq!(both.preferred_phone(), Some("111"));

        let mobile_only = ZohoRecipient {
            phone: Some("".to_string()),
            mobile: Some("222".to_string()),
            ..Default::default()
        };
        assert_eq!(mobile_only.preferred_phone(), Some("222"));

        assert_eq!(ZohoRecipient::default().preferred_phone(), None);
    }

    #[test]
    fn test_recipients_envelope_defaults_to_empty() {
        let response: RecipientsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.recipients.is_empty());

        let report: CampaignReportResponse = serde_json::from_value(json!({})).unwrap();
        assert!(report.campaign_reports.is_empty());
    }
}
