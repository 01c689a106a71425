//! CampSync Core - Zoho Campaigns synchronization
//!
//! This crate provides the core synchronization functionality for CampSync:
//! the Zoho Campaigns API client and the pipeline that reconciles campaigns,
//! analytics, recipient activity, and contacts into the record store.

pub mod sync;
pub mod zoho;

#[cfg(test)]
pub(crate) mod testing;

pub use sync::{AnalyticsSyncer, CampaignSyncer, ContactResolver, RecipientSyncer, SyncError, SyncOrchestrator};
pub use zoho::{CampaignsApi, ZohoCampaignSummary, ZohoClient, ZohoRecipient, ZohoValue};
