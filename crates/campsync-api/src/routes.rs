//! API routes

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use campsync_common::config::ApiConfig;
use campsync_core::SyncOrchestrator;
use campsync_storage::RecordStore;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{campaigns, health, sync};
use crate::openapi::create_openapi_routes;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub orchestrator: Arc<SyncOrchestrator>,
}

/// Create the API router
pub fn create_router(
    store: Arc<dyn RecordStore>,
    orchestrator: Arc<SyncOrchestrator>,
    api_config: &ApiConfig,
) -> Router {
    let state = Arc::new(AppState {
        store,
        orchestrator,
    });

    // Health check routes
    let health_routes = Router::new()
        .route("/", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        .route("/detailed", get(health::health_detailed))
        .with_state(state.clone());

    // Campaign routes
    let campaign_routes = Router::new()
        .route("/", get(campaigns::list_campaigns))
        .route("/:name", get(campaigns::get_campaign))
        .route("/:name/recipients", get(campaigns::list_campaign_recipients))
        .route("/:name/sync", post(sync::sync_campaign));

    // Sync routes
    let sync_routes = Router::new().route("/campaigns", post(sync::sync_all_campaigns));

    // API v1 routes
    let api_v1 = Router::new()
        .nest("/campaigns", campaign_routes)
        .nest("/sync", sync_routes)
        .with_state(state.clone());

    // Combine all routes
    let mut router = Router::new()
        .nest("/health", health_routes)
        .nest("/api/v1", api_v1);

    if api_config.enable_swagger {
        router = router.merge(create_openapi_routes());
    }

    let mut router = router.layer(TraceLayer::new_for_http());

    if !api_config.cors_origins.is_empty() {
        let origins: Vec<HeaderValue> = api_config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        router = router.layer(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use campsync_common::config::{ApiConfig, SyncConfig};
    use campsync_common::types::{ActionType, SyncSummary};
    use campsync_core::{CampaignsApi, ZohoCampaignSummary, ZohoRecipient};
    use campsync_storage::models::{Campaign, CampaignAnalyticsEntry, RecipientAction};
    use campsync_storage::MemoryRecordStore;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use super::*;

    #[derive(Default)]
    struct StubApi {
        campaigns: Vec<ZohoCampaignSummary>,
        report: HashMap<String, Value>,
    }

    #[async_trait]
    impl CampaignsApi for StubApi {
        async fn recent_campaigns(
            &self,
            limit: usize,
        ) -> campsync_common::Result<Vec<ZohoCampaignSummary>> {
            Ok(self.campaigns.iter().take(limit).cloned().collect())
        }

        async fn campaign_report(
            &self,
            _campaign_key: &str,
        ) -> campsync_common::Result<HashMap<String, Value>> {
            Ok(self.report.clone())
        }

        async fn campaign_recipients(
            &self,
            _campaign_key: &str,
            _action: ActionType,
            _range: usize,
        ) -> campsync_common::Result<Vec<ZohoRecipient>> {
            Ok(Vec::new())
        }
    }

    fn sent_summary(zoho_id: &str, key: &str, name: &str) -> ZohoCampaignSummary {
        ZohoCampaignSummary {
            campaign_id: Some(zoho_id.to_string()),
            campaign_key: Some(key.to_string()),
            campaign_name: Some(name.to_string()),
            campaign_status: Some("Sent".to_string()),
            ..Default::default()
        }
    }

    fn test_server_with_config(
        api: StubApi,
        store: Arc<MemoryRecordStore>,
        api_config: &ApiConfig,
    ) -> TestServer {
        let store: Arc<dyn RecordStore> = store;
        let orchestrator = Arc::new(SyncOrchestrator::new(
            Arc::new(api),
            store.clone(),
            &SyncConfig::default(),
        ));
        TestServer::new(create_router(store, orchestrator, api_config)).unwrap()
    }

    fn test_server(api: StubApi, store: Arc<MemoryRecordStore>) -> TestServer {
        test_server_with_config(api, store, &ApiConfig::default())
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let server = test_server(StubApi::default(), Arc::new(MemoryRecordStore::new()));

        let response = server.get("/health").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");

        let response = server.get("/health/live").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let response = server.get("/health/ready").await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let response = server.get("/health/detailed").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["checks"]["store"]["status"], "healthy");
    }

    #[tokio::test]
    async fn test_sync_campaigns_creates_records() {
        let api = StubApi {
            campaigns: vec![sent_summary("z-1", "key-1", "Launch")],
            ..Default::default()
        };
        let store = Arc::new(MemoryRecordStore::new());
        let server = test_server(api, store);

        let response = server.post("/api/v1/sync/campaigns").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let summary: SyncSummary = response.json();
        assert!(summary.success);
        assert_eq!(summary.synced_count, 1);
        assert_eq!(summary.total_campaigns, 1);
        assert!(summary.errors.is_empty());

        let response = server.get("/api/v1/campaigns").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["data"][0]["campaign_name"], "Launch");
        assert_eq!(body["data"][0]["zoho_campaign_id"], "z-1");
    }

    #[tokio::test]
    async fn test_get_campaign_not_found() {
        let server = test_server(StubApi::default(), Arc::new(MemoryRecordStore::new()));

        let response = server.get("/api/v1/campaigns/SAL-CAM-2026-MISSING").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["message"], "Campaign not found");
    }

    #[tokio::test]
    async fn test_campaign_detail_includes_analytics() {
        let store = Arc::new(MemoryRecordStore::new());
        let campaign = Campaign::new("Spring Sale");
        store.save_campaign(&campaign).await.unwrap();
        store
            .replace_campaign_analytics(
                &campaign.name,
                &[
                    CampaignAnalyticsEntry::new(campaign.name.clone(), 1, "Emails Sent", "120", None),
                    CampaignAnalyticsEntry::new(
                        campaign.name.clone(),
                        2,
                        "Open Rate %",
                        "42.5",
                        Some(42.5),
                    ),
                ],
            )
            .await
            .unwrap();
        let server = test_server(StubApi::default(), store);

        let response = server
            .get(&format!("/api/v1/campaigns/{}", campaign.name))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["campaign"]["campaign_name"], "Spring Sale");
        assert_eq!(body["analytics"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["analytics"][0]["metric"], "Emails Sent");
        assert_eq!(body["analytics"][1]["percentage"], json!(42.5));
    }

    #[tokio::test]
    async fn test_recipient_list_filters_by_action() {
        let store = Arc::new(MemoryRecordStore::new());
        let campaign = Campaign::new("Spring Sale");
        store.save_campaign(&campaign).await.unwrap();
        store
            .save_recipient_action(&RecipientAction::new(
                campaign.name.clone(),
                "a@example.com",
                ActionType::Opened,
            ))
            .await
            .unwrap();
        store
            .save_recipient_action(&RecipientAction::new(
                campaign.name.clone(),
                "b@example.com",
                ActionType::Clicked,
            ))
            .await
            .unwrap();
        let server = test_server(StubApi::default(), store);

        let response = server
            .get(&format!("/api/v1/campaigns/{}/recipients", campaign.name))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["data"].as_array().map(Vec::len), Some(2));

        let response = server
            .get(&format!("/api/v1/campaigns/{}/recipients", campaign.name))
            .add_query_param("action", "Opened")
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["data"][0]["email"], "a@example.com");
        assert_eq!(body["data"][0]["action_type"], "Opened");
    }

    #[tokio::test]
    async fn test_recipient_list_rejects_unknown_action() {
        let store = Arc::new(MemoryRecordStore::new());
        let campaign = Campaign::new("Spring Sale");
        store.save_campaign(&campaign).await.unwrap();
        let server = test_server(StubApi::default(), store);

        let response = server
            .get(&format!("/api/v1/campaigns/{}/recipients", campaign.name))
            .add_query_param("action", "Bogus")
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_recipient_list_unknown_campaign() {
        let server = test_server(StubApi::default(), Arc::new(MemoryRecordStore::new()));

        let response = server.get("/api/v1/campaigns/NOPE/recipients").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_sync_campaign_by_name_not_found() {
        let server = test_server(StubApi::default(), Arc::new(MemoryRecordStore::new()));

        let response = server.post("/api/v1/campaigns/NOPE/sync").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_sync_campaign_by_name_not_linked() {
        let store = Arc::new(MemoryRecordStore::new());
        let campaign = Campaign::new("Local Draft");
        store.save_campaign(&campaign).await.unwrap();
        let server = test_server(StubApi::default(), store);

        let response = server
            .post(&format!("/api/v1/campaigns/{}/sync", campaign.name))
            .await;
        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["message"], "This campaign is not linked to Zoho");
    }

    #[tokio::test]
    async fn test_sync_campaign_by_name_refreshes_analytics() {
        let store = Arc::new(MemoryRecordStore::new());
        let mut campaign = Campaign::new("Spring Sale");
        campaign.zoho_campaign_id = Some("z-1".to_string());
        campaign.zoho_campaign_key = Some("key-1".to_string());
        store.save_campaign(&campaign).await.unwrap();

        let api = StubApi {
            report: HashMap::from([("opens_count".to_string(), json!(57))]),
            ..Default::default()
        };
        let server = test_server(api, store);

        let response = server
            .post(&format!("/api/v1/campaigns/{}/sync", campaign.name))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Campaign synced successfully");

        let response = server
            .get(&format!("/api/v1/campaigns/{}", campaign.name))
            .await;
        let body: Value = response.json();
        assert_eq!(body["analytics"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["analytics"][0]["metric"], "Opens");
        assert_eq!(body["analytics"][0]["value"], "57");
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let server = test_server(StubApi::default(), Arc::new(MemoryRecordStore::new()));

        let response = server.get("/openapi.json").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["info"]["title"], "CampSync API");
        assert!(body["paths"]["/sync/campaigns"].is_object());

        let response = server.get("/docs").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert!(response.text().contains("swagger-ui"));
    }

    #[tokio::test]
    async fn test_swagger_can_be_disabled() {
        let api_config = ApiConfig {
            enable_swagger: false,
            ..Default::default()
        };
        let server = test_server_with_config(
            StubApi::default(),
            Arc::new(MemoryRecordStore::new()),
            &api_config,
        );

        let response = server.get("/docs").await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

        let response = server.get("/health").await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }
}
