//! Sync pipeline errors

use thiserror::Error;

/// Errors raised by the synchronization pipeline
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Campaign not found: {0}")]
    CampaignNotFound(String),

    #[error("This campaign is not linked to Zoho")]
    NotLinked,

    #[error("Failed to sync campaigns: {0}")]
    BatchFailed(String),

    #[error(transparent)]
    Common(#[from] campsync_common::Error),
}

impl SyncError {
    /// HTTP status code this error maps to at the API boundary
    pub fn status_code(&self) -> u16 {
        match self {
            SyncError::CampaignNotFound(_) => 404,
            SyncError::NotLinked => 422,
            SyncError::BatchFailed(_) => 502,
            SyncError::Common(e) => e.status_code(),
        }
    }
}
