//! Zoho Campaigns API integration
//!
//! This module provides the typed payload structures and the HTTP client for
//! the Zoho Campaigns REST API, behind the [`CampaignsApi`] trait so the sync
//! pipeline can be tested without a live upstream.

pub mod client;
pub mod types;

pub use client::{CampaignsApi, ZohoClient};
pub use types::{
    CampaignReportResponse, RecentCampaignsResponse, RecipientsResponse, ZohoCampaignSummary,
    ZohoRecipient, ZohoValue,
};
