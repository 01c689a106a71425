//! Zoho Campaigns API client

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use campsync_common::config::ZohoConfig;
use campsync_common::types::ActionType;
use campsync_common::{Error, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::types::{
    CampaignReportResponse, RecentCampaignsResponse, RecipientsResponse, ZohoCampaignSummary,
    ZohoRecipient,
};

/// Read access to the Zoho Campaigns API, as consumed by the sync pipeline.
#[async_trait]
pub trait CampaignsApi: Send + Sync {
    /// Fetch up to `limit` recently sent campaigns.
    async fn recent_campaigns(&self, limit: usize) -> Result<Vec<ZohoCampaignSummary>>;

    /// Fetch the aggregate report for one campaign key.
    async fn campaign_report(&self, campaign_key: &str) -> Result<HashMap<String, Value>>;

    /// Fetch up to `range` recipients of one action category.
    async fn campaign_recipients(
        &self,
        campaign_key: &str,
        action: ActionType,
        range: usize,
    ) -> Result<Vec<ZohoRecipient>>;
}

/// HTTP client for the Zoho Campaigns REST API
pub struct ZohoClient {
    client: Client,
    api_base: String,
    access_token: String,
}

impl ZohoClient {
    /// Create a new Zoho client from configuration
    pub fn new(config: &ZohoConfig) -> Result<Self> {
        let access_token = config
            .access_token
            .clone()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| Error::Config("Zoho access token is not configured".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            access_token,
        })
    }

    /// Build a GET request with auth header and JSON response format
    fn build_request(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.api_base, path);
        self.client
            .get(&url)
            .header(
                "Authorization",
                format!("Zoho-oauthtoken {}", self.access_token),
            )
            .query(&[("resfmt", "JSON")])
    }

    /// Send a request and decode the JSON body, mapping failures to upstream errors
    async fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        context: &str,
    ) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to fetch {}: {}", context, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "Zoho {} request failed: {} - {}",
                context, status, body
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::Upstream(format!("Failed to parse {} response: {}", context, e)))
    }
}

#[async_trait]
impl CampaignsApi for ZohoClient {
    async fn recent_campaigns(&self, limit: usize) -> Result<Vec<ZohoCampaignSummary>> {
        debug!("Fetching up to {} recent campaigns from Zoho", limit);
        let range = limit.to_string();
        let request = self
            .build_request("recentcampaigns")
            .query(&[("fromindex", "1"), ("range", range.as_str())]);

        let response: RecentCampaignsResponse =
            self.fetch_json(request, "recent campaigns").await?;
        Ok(response.campaigns)
    }

    async fn campaign_report(&self, campaign_key: &str) -> Result<HashMap<String, Value>> {
        debug!("Fetching campaign report for key {}", campaign_key);
        let request = self
            .build_request("getcampaignreports")
            .query(&[("campaignkey", campaign_key)]);

        let response: CampaignReportResponse = self.fetch_json(request, "campaign report").await?;
        Ok(response.campaign_reports)
    }

    async fn campaign_recipients(
        &self,
        campaign_key: &str,
        action: ActionType,
        range: usize,
    ) -> Result<Vec<ZohoRecipient>> {
        debug!(
            "Fetching {} recipients for key {} (range {})",
            action, campaign_key, range
        );
        let range = range.to_string();
        let request = self.build_request("getcampaignrecipientsdata").query(&[
            ("campaignkey", campaign_key),
            ("action", action.zoho_key()),
            ("fromindex", "1"),
            ("range", range.as_str()),
        ]);

        let response: RecipientsResponse = self.fetch_json(request, "campaign recipients").await?;
        Ok(response.recipients)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_config(api_base: String) -> ZohoConfig {
        ZohoConfig {
            api_base,
            access_token: Some("test-token".to_string()),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_new_requires_access_token() {
        let config = ZohoConfig {
            api_base: "https://campaigns.zoho.com/api/v1.1".to_string(),
            access_token: None,
            timeout_secs: 5,
        };

        let err = ZohoClient::new(&config).err().unwrap();
        assert!(err.to_string().contains("access token"));
    }

    #[tokio::test]
    async fn test_recent_campaigns_request_shape() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/recentcampaigns"))
            .and(query_param("resfmt", "JSON"))
            .and(query_param("range", "50"))
            .and(header("Authorization", "Zoho-oauthtoken test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "campaigns": [
                    {
                        "campaignId": "c-1",
                        "campaign_key": "key-1",
                        "campaign_name": "Spring Sale",
                        "campaign_status": "Sent"
                    }
                ]
            })))
            .mount(&server)
            .await;

        let client = ZohoClient::new(&test_config(server.uri())).unwrap();
        let campaigns = client.recent_campaigns(50).await.unwrap();

        assert_eq!(campaigns.len(), 1);
        assert_eq!(campaigns[0].campaign_id.as_deref(), Some("c-1"));
        assert_eq!(campaigns[0].campaign_name.as_deref(), Some("Spring Sale"));
    }

    #[tokio::test]
    async fn test_campaign_report_unwraps_envelope() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/getcampaignreports"))
            .and(query_param("campaignkey", "key-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "campaign_reports": {
                    "emails_sent_count": "100",
                    "open_percent": 42.5
                }
            })))
            .mount(&server)
            .await;

        let client = ZohoClient::new(&test_config(server.uri())).unwrap();
        let report = client.campaign_report("key-1").await.unwrap();

        assert_eq!(report.len(), 2);
        assert_eq!(report["emails_sent_count"], json!("100"));
    }

    #[tokio::test]
    async fn test_recipients_request_carries_action_key() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/getcampaignrecipientsdata"))
            .and(query_param("campaignkey", "key-1"))
            .and(query_param("action", "openedcontacts"))
            .and(query_param("range", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "recipients": [
                    { "contactemailaddress": "jane@example.com", "numoftimeopened": "3" }
                ]
            })))
            .mount(&server)
            .await;

        let client = ZohoClient::new(&test_config(server.uri())).unwrap();
        let recipients = client
            .campaign_recipients("key-1", ActionType::Opened, 100)
            .await
            .unwrap();

        assert_eq!(recipients.len(), 1);
        assert_eq!(recipients[0].email.as_deref(), Some("jane@example.com"));
    }

    #[tokio::test]
    async fn test_upstream_failure_maps_to_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/getcampaignreports"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
            .mount(&server)
            .await;

        let client = ZohoClient::new(&test_config(server.uri())).unwrap();
        let err = client.campaign_report("key-1").await.err().unwrap();

        assert!(matches!(err, Error::Upstream(_)));
        assert!(err.to_string().contains("500"));
    }
}
