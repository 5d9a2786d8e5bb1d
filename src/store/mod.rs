//! In-process data stores.
//!
//! # Design Decisions
//! - Each store wraps an `Arc<DashMap>` and is cheap to clone into handlers
//! - Persistence is an optional JSON snapshot on disk, written on graceful
//!   shutdown and loadable at startup; callers treat the store as opaque
//! - Analytics counters are ephemeral by design

pub mod analytics;
pub mod content;
pub mod leads;

use thiserror::Error;

/// Errors from loading or saving a store snapshot.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub use analytics::{AnalyticsStore, AnalyticsSummary};
pub use content::{ContentStore, EmailTemplate, FaqEntry, Project};
pub use leads::{Lead, LeadStatus, LeadStore, NewLead};

/// Seconds since the Unix epoch.
pub(crate) fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
