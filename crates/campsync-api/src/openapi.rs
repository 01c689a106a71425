//! OpenAPI documentation
//!
//! Provides OpenAPI 3.0 specification and Swagger UI for the CampSync API.

use axum::{
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde_json::json;

/// Create OpenAPI routes
pub fn create_openapi_routes() -> Router {
    Router::new()
        .route("/openapi.json", get(openapi_json))
        .route("/docs", get(swagger_ui))
}

/// OpenAPI JSON specification endpoint
async fn openapi_json() -> impl IntoResponse {
    Json(get_openapi_spec())
}

/// Swagger UI HTML endpoint
async fn swagger_ui() -> impl IntoResponse {
    Html(SWAGGER_UI_HTML)
}

/// Get the OpenAPI specification as JSON
fn get_openapi_spec() -> serde_json::Value {
    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "CampSync API",
            "description": "REST API for CampSync, a Zoho Campaigns synchronization service.\n\nSync triggers pull campaign metadata, aggregate analytics and per-action recipient lists from Zoho Campaigns into the local record store; read endpoints expose the synced records.",
            "version": "1.0.0",
            "contact": {
                "name": "CampSync Team",
                "url": "https://github.com/example/campsync"
            },
            "license": {
                "name": "Apache-2.0",
                "url": "https://www.apache.org/licenses/LICENSE-2.0"
            }
        },
        "servers": [
            {
                "url": "/api/v1",
                "description": "API v1"
            }
        ],
        "tags": [
            {"name": "health", "description": "Health check endpoints"},
            {"name": "sync", "description": "Sync triggers"},
            {"name": "campaigns", "description": "Synced campaign records"}
        ],
        "paths": {
            // Health endpoints
            "/health": {
                "get": {
                    "tags": ["health"],
                    "summary": "Basic health check",
                    "operationId": "health",
                    "responses": {
                        "200": {
                            "description": "Service is healthy",
                            "content": {
                                "application/json": {
                                    "schema": {"$ref": "#/components/schemas/HealthResponse"}
                                }
                            }
                        }
                    }
                }
            },
            "/health/live": {
                "get": {
                    "tags": ["health"],
                    "summary": "Liveness probe",
                    "operationId": "liveness",
                    "responses": {
                        "200": {"description": "Service is alive"},
                        "503": {"description": "Service is not alive"}
                    }
                }
            },
            "/health/ready": {
                "get": {
                    "tags": ["health"],
                    "summary": "Readiness probe",
                    "operationId": "readiness",
                    "responses": {
                        "200": {"description": "Service is ready"},
                        "503": {"description": "Service is not ready"}
                    }
                }
            },
            "/health/detailed": {
                "get": {
                    "tags": ["health"],
                    "summary": "Detailed health check",
                    "operationId": "healthDetailed",
                    "responses": {
                        "200": {
                            "description": "Detailed health status",
                            "content": {
                                "application/json": {
                                    "schema": {"$ref": "#/components/schemas/DetailedHealthResponse"}
                                }
                            }
                        }
                    }
                }
            },
            // Sync endpoints
            "/sync/campaigns": {
                "post": {
                    "tags": ["sync"],
                    "summary": "Sync all recently sent campaigns",
                    "description": "Fetches the recent-campaigns list from Zoho and syncs every campaign in 'Sent' status: metadata, analytics and recipient actions. Per-campaign failures are reported in the summary without aborting the run.",
                    "operationId": "syncCampaigns",
                    "responses": {
                        "200": {
                            "description": "Sync run summary",
                            "content": {
                                "application/json": {
                                    "schema": {"$ref": "#/components/schemas/SyncSummary"}
                                }
                            }
                        },
                        "502": {"description": "Campaign list could not be fetched from Zoho"}
                    }
                }
            },
            "/campaigns/{name}/sync": {
                "post": {
                    "tags": ["sync"],
                    "summary": "Sync one campaign by record name",
                    "description": "Refreshes analytics and recipient actions of an already-linked campaign.",
                    "operationId": "syncCampaign",
                    "parameters": [
                        {"name": "name", "in": "path", "required": true, "schema": {"type": "string"}}
                    ],
                    "responses": {
                        "200": {
                            "description": "Campaign synced",
                            "content": {
                                "application/json": {
                                    "schema": {"$ref": "#/components/schemas/SyncTriggerResponse"}
                                }
                            }
                        },
                        "404": {"description": "Campaign not found"},
                        "422": {"description": "Campaign is not linked to Zoho"},
                        "502": {"description": "Zoho request failed"}
                    }
                }
            },
            // Campaign endpoints
            "/campaigns": {
                "get": {
                    "tags": ["campaigns"],
                    "summary": "List synced campaigns",
                    "operationId": "listCampaigns",
                    "parameters": [
                        {"name": "limit", "in": "query", "schema": {"type": "integer", "default": 50}},
                        {"name": "offset", "in": "query", "schema": {"type": "integer", "default": 0}}
                    ],
                    "responses": {
                        "200": {
                            "description": "List of campaigns",
                            "content": {
                                "application/json": {
                                    "schema": {"$ref": "#/components/schemas/CampaignListResponse"}
                                }
                            }
                        }
                    }
                }
            },
            "/campaigns/{name}": {
                "get": {
                    "tags": ["campaigns"],
                    "summary": "Get a campaign with its analytics",
                    "operationId": "getCampaign",
                    "parameters": [
                        {"name": "name", "in": "path", "required": true, "schema": {"type": "string"}}
                    ],
                    "responses": {
                        "200": {
                            "description": "Campaign details with analytics entries",
                            "content": {
                                "application/json": {
                                    "schema": {"$ref": "#/components/schemas/CampaignDetailResponse"}
                                }
                            }
                        },
                        "404": {"description": "Campaign not found"}
                    }
                }
            },
            "/campaigns/{name}/recipients": {
                "get": {
                    "tags": ["campaigns"],
                    "summary": "List recipient actions of a campaign",
                    "operationId": "listCampaignRecipients",
                    "parameters": [
                        {"name": "name", "in": "path", "required": true, "schema": {"type": "string"}},
                        {"name": "action", "in": "query", "schema": {"type": "string", "enum": ["Opened", "Clicked", "Hard Bounced", "Soft Bounced", "Unsubscribed", "Complaint"]}},
                        {"name": "limit", "in": "query", "schema": {"type": "integer", "default": 50}},
                        {"name": "offset", "in": "query", "schema": {"type": "integer", "default": 0}}
                    ],
                    "responses": {
                        "200": {
                            "description": "List of recipient actions",
                            "content": {
                                "application/json": {
                                    "schema": {"$ref": "#/components/schemas/RecipientListResponse"}
                                }
                            }
                        },
                        "400": {"description": "Unknown action type"},
                        "404": {"description": "Campaign not found"}
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "HealthResponse": {
                    "type": "object",
                    "properties": {
                        "status": {"type": "string", "example": "healthy"}
                    }
                },
                "DetailedHealthResponse": {
                    "type": "object",
                    "properties": {
                        "status": {"type": "string"},
                        "checks": {
                            "type": "object",
                            "properties": {
                                "store": {"$ref": "#/components/schemas/ComponentHealth"}
                            }
                        }
                    }
                },
                "ComponentHealth": {
                    "type": "object",
                    "properties": {
                        "status": {"type": "string"},
                        "latency_ms": {"type": "integer"},
                        "error": {"type": "string"}
                    }
                },
                "SyncSummary": {
                    "type": "object",
                    "properties": {
                        "success": {"type": "boolean"},
                        "synced_count": {"type": "integer"},
                        "total_campaigns": {"type": "integer"},
                        "errors": {
                            "type": "array",
                            "items": {"$ref": "#/components/schemas/SyncFailure"}
                        }
                    }
                },
                "SyncFailure": {
                    "type": "object",
                    "properties": {
                        "campaign": {"type": "string"},
                        "error": {"type": "string"}
                    }
                },
                "SyncTriggerResponse": {
                    "type": "object",
                    "properties": {
                        "success": {"type": "boolean"},
                        "message": {"type": "string", "example": "Campaign synced successfully"}
                    }
                },
                "Campaign": {
                    "type": "object",
                    "properties": {
                        "id": {"type": "string", "format": "uuid"},
                        "name": {"type": "string", "example": "SAL-CAM-2026-3F9A21D4"},
                        "campaign_name": {"type": "string"},
                        "zoho_campaign_id": {"type": "string"},
                        "zoho_campaign_key": {"type": "string"},
                        "zoho_subject": {"type": "string"},
                        "zoho_from_email": {"type": "string"},
                        "zoho_campaign_status": {"type": "string", "example": "Sent"},
                        "zoho_campaign_type": {"type": "string"},
                        "zoho_reply_to": {"type": "string"},
                        "zoho_preview_url": {"type": "string"},
                        "zoho_sent_time": {"type": "string", "format": "date-time"},
                        "last_synced": {"type": "string", "format": "date-time"},
                        "created_at": {"type": "string", "format": "date-time"},
                        "updated_at": {"type": "string", "format": "date-time"}
                    }
                },
                "CampaignListResponse": {
                    "type": "object",
                    "properties": {
                        "data": {
                            "type": "array",
                            "items": {"$ref": "#/components/schemas/Campaign"}
                        },
                        "limit": {"type": "integer"},
                        "offset": {"type": "integer"}
                    }
                },
                "CampaignDetailResponse": {
                    "type": "object",
                    "properties": {
                        "campaign": {"$ref": "#/components/schemas/Campaign"},
                        "analytics": {
                            "type": "array",
                            "items": {"$ref": "#/components/schemas/AnalyticsEntry"}
                        }
                    }
                },
                "AnalyticsEntry": {
                    "type": "object",
                    "properties": {
                        "idx": {"type": "integer"},
                        "metric": {"type": "string", "example": "Open Rate %"},
                        "value": {"type": "string"},
                        "percentage": {"type": "number", "nullable": true}
                    }
                },
                "RecipientAction": {
                    "type": "object",
                    "properties": {
                        "id": {"type": "string", "format": "uuid"},
                        "campaign": {"type": "string"},
                        "email": {"type": "string", "format": "email"},
                        "action_type": {"type": "string", "example": "Opened"},
                        "contact": {"type": "string"},
                        "zoho_contact_id": {"type": "string"},
                        "sent_time": {"type": "string", "format": "date-time"},
                        "action_date": {"type": "string", "format": "date-time"},
                        "open_count": {"type": "integer"},
                        "location": {"type": "string"},
                        "country": {"type": "string"},
                        "city": {"type": "string"},
                        "state": {"type": "string"},
                        "is_spam": {"type": "boolean"},
                        "is_optout": {"type": "boolean"},
                        "contact_status": {"type": "string"},
                        "full_name": {"type": "string"},
                        "company_name": {"type": "string"},
                        "job_title": {"type": "string"},
                        "created_at": {"type": "string", "format": "date-time"},
                        "updated_at": {"type": "string", "format": "date-time"}
                    }
                },
                "RecipientListResponse": {
                    "type": "object",
                    "properties": {
                        "data": {
                            "type": "array",
                            "items": {"$ref": "#/components/schemas/RecipientAction"}
                        },
                        "limit": {"type": "integer"},
                        "offset": {"type": "integer"}
                    }
                },
                "ErrorResponse": {
                    "type": "object",
                    "properties": {
                        "error": {"type": "string", "example": "not_found"},
                        "message": {"type": "string"}
                    }
                }
            }
        }
    })
}

/// Swagger UI HTML template
const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>CampSync API Documentation</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui.css" />
    <style>
        body { margin: 0; padding: 0; }
        .swagger-ui .topbar { display: none; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5.9.0/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {
            SwaggerUIBundle({
                url: "/openapi.json",
                dom_id: '#swagger-ui',
                deepLinking: true,
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIBundle.SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout"
            });
        };
    </script>
</body>
</html>"#;
