//! Synchronization pipeline
//!
//! Control flow runs orchestrator → campaign → analytics → recipients →
//! contacts; each stage owns one record type and its merge rules.

mod analytics;
mod campaign;
mod contact;
mod error;
mod orchestrator;
mod recipients;

pub use analytics::AnalyticsSyncer;
pub use campaign::CampaignSyncer;
pub use contact::ContactResolver;
pub use error::SyncError;
pub use orchestrator::SyncOrchestrator;
pub use recipients::RecipientSyncer;
