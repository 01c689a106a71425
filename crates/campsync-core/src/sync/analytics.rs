//! Analytics Synchronizer - Aggregate campaign metrics

use std::sync::Arc;

use campsync_storage::{Campaign, CampaignAnalyticsEntry, RecordStore};
use serde_json::Value;
use tracing::{debug, error};

use super::error::SyncError;
use super::recipients::RecipientSyncer;
use crate::zoho::CampaignsApi;

/// Report metric keys paired with display labels, in the order entries are
/// written to the analytics collection.
const METRIC_TABLE: [(&str, &str); 19] = [
    ("emails_sent_count", "Emails Sent"),
    ("delivered_count", "Delivered"),
    ("delivered_percent", "Delivered %"),
    ("opens_count", "Opens"),
    ("open_percent", "Open Rate %"),
    ("unique_clicks_count", "Unique Clicks"),
    ("unique_clicked_percent", "Click Rate %"),
    ("bounces_count", "Bounces"),
    ("bounce_percent", "Bounce Rate %"),
    ("hardbounce_count", "Hard Bounces"),
    ("softbounce_count", "Soft Bounces"),
    ("unsub_count", "Unsubscribes"),
    ("unsubscribe_percent", "Unsubscribe Rate %"),
    ("complaints_count", "Spam Complaints"),
    ("complaints_percent", "Spam Rate %"),
    ("unopened", "Unopened"),
    ("unopened_percent", "Unopened %"),
    ("clicksperopenrate", "Click-to-Open Rate"),
    ("forwards_count", "Forwards"),
];

/// Rewrites the analytics collection of a campaign from its Zoho report,
/// then fans out to recipient activity.
pub struct AnalyticsSyncer {
    api: Arc<dyn CampaignsApi>,
    store: Arc<dyn RecordStore>,
    recipients: RecipientSyncer,
}

impl AnalyticsSyncer {
    /// Create a new analytics syncer
    pub fn new(
        api: Arc<dyn CampaignsApi>,
        store: Arc<dyn RecordStore>,
        recipient_fetch_range: usize,
    ) -> Self {
        let recipients = RecipientSyncer::new(api.clone(), store.clone(), recipient_fetch_range);
        Self {
            api,
            store,
            recipients,
        }
    }

    /// Sync analytics and recipient activity for one campaign.
    ///
    /// An empty report is a no-op that leaves existing entries untouched.
    /// Any other failure is logged and re-raised; the caller decides whether
    /// to isolate it. The campaign record was already saved by that caller,
    /// so a failure here leaves a partially-synced campaign behind.
    pub async fn sync_analytics(
        &self,
        campaign: &Campaign,
        campaign_key: &str,
    ) -> Result<(), SyncError> {
        if let Err(e) = self.sync_analytics_inner(campaign, campaign_key).await {
            error!("Campaign analytics sync error for {}: {}", campaign.name, e);
            return Err(e);
        }
        Ok(())
    }

    async fn sync_analytics_inner(
        &self,
        campaign: &Campaign,
        campaign_key: &str,
    ) -> Result<(), SyncError> {
        let report = self.api.campaign_report(campaign_key).await?;
        if report.is_empty() {
            debug!("Empty report for campaign {}, skipping", campaign.name);
            return Ok(());
        }

        // Rebuild the collection in metric table order
        let mut entries = Vec::new();
        for (key, label) in METRIC_TABLE {
            let value = match report.get(key) {
                Some(value) if !value.is_null() => value,
                _ => continue,
            };
            let idx = entries.len() as i32 + 1;
            entries.push(CampaignAnalyticsEntry::new(
                campaign.name.clone(),
                idx,
                label,
                render_metric_value(value),
                metric_percentage(key, label, value),
            ));
        }

        self.store
            .replace_campaign_analytics(&campaign.name, &entries)
            .await?;
        self.store.save_campaign(campaign).await?;
        debug!(
            "Wrote {} analytics entries for campaign {}",
            entries.len(),
            campaign.name
        );

        self.recipients.sync_recipients(campaign, campaign_key).await?;
        Ok(())
    }
}

/// Render a raw report value the way it is displayed: strings stay as-is,
/// everything else uses its JSON rendering.
fn render_metric_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Numeric percentage for rate-like metrics.
///
/// Attached only when the metric key mentions "percent" or the label
/// mentions "rate"; values that do not parse as a float are left without one.
fn metric_percentage(key: &str, label: &str, value: &Value) -> Option<f64> {
    if !key.contains("percent") && !label.to_lowercase().contains("rate") {
        return None;
    }
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use campsync_storage::MemoryRecordStore;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::testing::{recipient, MockCampaignsApi};
    use campsync_common::types::ActionType;

    async fn syncer_with(
        api: MockCampaignsApi,
    ) -> (Arc<MemoryRecordStore>, AnalyticsSyncer, Campaign) {
        let store = Arc::new(MemoryRecordStore::new());
        let campaign = Campaign::new("Spring Sale");
        store.save_campaign(&campaign).await.unwrap();
        let syncer = AnalyticsSyncer::new(Arc::new(api), store.clone(), 100);
        (store, syncer, campaign)
    }

    #[test]
    fn test_metric_table_shape() {
        assert_eq!(METRIC_TABLE.len(), 19);
        assert_eq!(METRIC_TABLE[0], ("emails_sent_count", "Emails Sent"));
        assert_eq!(METRIC_TABLE[18], ("forwards_count", "Forwards"));
    }

    #[test]
    fn test_render_metric_value() {
        assert_eq!(render_metric_value(&json!("42.5")), "42.5");
        assert_eq!(render_metric_value(&json!(100)), "100");
        assert_eq!(render_metric_value(&json!(42.5)), "42.5");
        assert_eq!(render_metric_value(&json!(true)), "true");
    }

    #[test]
    fn test_metric_percentage_attachment() {
        assert_eq!(
            metric_percentage("open_percent", "Open Rate %", &json!(42.5)),
            Some(42.5)
        );
        assert_eq!(metric_percentage("opens_count", "Opens", &json!(10)), None);
        assert_eq!(
            metric_percentage("clicksperopenrate", "Click-to-Open Rate", &json!("12.3")),
            Some(12.3)
        );
        assert_eq!(
            metric_percentage("delivered_percent", "Delivered %", &json!("n/a")),
            None
        );
    }

    #[tokio::test]
    async fn test_sync_rewrites_entries_in_table_order() {
        let mut api = MockCampaignsApi::default();
        api.reports.insert(
            "key-1".to_string(),
            [
                ("open_percent".to_string(), json!(42.5)),
                ("emails_sent_count".to_string(), json!("100")),
                ("opens_count".to_string(), json!(40)),
            ]
            .into_iter()
            .collect(),
        );
        let (store, syncer, campaign) = syncer_with(api).await;

        syncer.sync_analytics(&campaign, "key-1").await.unwrap();

        let entries = store.campaign_analytics(&campaign.name).await.unwrap();
        assert_eq!(entries.len(), 3);
        // Table order, not report order
        assert_eq!(entries[0].metric, "Emails Sent");
        assert_eq!(entries[0].value, "100");
        assert_eq!(entries[0].idx, 1);
        assert_eq!(entries[0].percentage, None);
        assert_eq!(entries[1].metric, "Opens");
        assert_eq!(entries[1].idx, 2);
        assert_eq!(entries[2].metric, "Open Rate %");
        assert_eq!(entries[2].value, "42.5");
        assert_eq!(entries[2].percentage, Some(42.5));
    }

    #[tokio::test]
    async fn test_second_sync_replaces_collection() {
        let mut api = MockCampaignsApi::default();
        api.reports.insert(
            "key-1".to_string(),
            [("emails_sent_count".to_string(), json!(100))]
                .into_iter()
                .collect(),
        );
        let (store, syncer, campaign) = syncer_with(api).await;

        syncer.sync_analytics(&campaign, "key-1").await.unwrap();
        syncer.sync_analytics(&campaign, "key-1").await.unwrap();

        let entries = store.campaign_analytics(&campaign.name).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].value, "100");
    }

    #[tokio::test]
    async fn test_empty_report_is_a_noop() {
        let (store, syncer, campaign) = syncer_with(MockCampaignsApi::default()).await;
        let seeded = vec![CampaignAnalyticsEntry::new(
            campaign.name.clone(),
            1,
            "Emails Sent",
            "50",
            None,
        )];
        store
            .replace_campaign_analytics(&campaign.name, &seeded)
            .await
            .unwrap();

        syncer.sync_analytics(&campaign, "key-1").await.unwrap();

        // Existing entries survive an empty report
        let entries = store.campaign_analytics(&campaign.name).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].value, "50");
    }

    #[tokio::test]
    async fn test_null_metrics_are_skipped() {
        let mut api = MockCampaignsApi::default();
        api.reports.insert(
            "key-1".to_string(),
            [
                ("opens_count".to_string(), Value::Null),
                ("emails_sent_count".to_string(), json!(100)),
            ]
            .into_iter()
            .collect(),
        );
        let (store, syncer, campaign) = syncer_with(api).await;

        syncer.sync_analytics(&campaign, "key-1").await.unwrap();

        let entries = store.campaign_analytics(&campaign.name).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].metric, "Emails Sent");
    }

    #[tokio::test]
    async fn test_report_failure_propagates() {
        let mut api = MockCampaignsApi::default();
        api.fail_report_keys.push("key-1".to_string());
        let (_store, syncer, campaign) = syncer_with(api).await;

        let err = syncer.sync_analytics(&campaign, "key-1").await.err().unwrap();

        assert!(matches!(err, SyncError::Common(_)));
    }

    #[tokio::test]
    async fn test_recipients_follow_analytics() {
        let mut api = MockCampaignsApi::default();
        api.reports.insert(
            "key-1".to_string(),
            [("emails_sent_count".to_string(), json!(100))]
                .into_iter()
                .collect(),
        );
        api.recipients.insert(
            ("key-1".to_string(), ActionType::Opened),
            vec![recipient("jane@example.com")],
        );
        let (store, syncer, campaign) = syncer_with(api).await;

        syncer.sync_analytics(&campaign, "key-1").await.unwrap();

        assert_eq!(store.recipient_action_count().await, 1);
        assert_eq!(store.contact_count().await, 1);
    }
}
