//! Analytics event counters.
//!
//! Ingestion is fire-and-forget: events bump in-memory counters that the
//! admin dashboard reads back as a summary. Counters reset with the process.

use dashmap::DashMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::observability::metrics;

/// Aggregated counters for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub total_events: u64,
    pub by_event: BTreeMap<String, u64>,
}

/// Thread-safe per-event counters.
#[derive(Clone, Default)]
pub struct AnalyticsStore {
    counters: Arc<DashMap<String, u64>>,
    total: Arc<AtomicU64>,
}

impl AnalyticsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of a named event.
    pub fn record(&self, name: &str) {
        *self.counters.entry(name.to_string()).or_insert(0) += 1;
        self.total.fetch_add(1, Ordering::Relaxed);
        metrics::record_analytics_event(name);
    }

    pub fn summary(&self) -> AnalyticsSummary {
        AnalyticsSummary {
            total_events: self.total.load(Ordering::Relaxed),
            by_event: self
                .counters
                .iter()
                .map(|r| (r.key().clone(), *r.value()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_accumulate() {
        let store = AnalyticsStore::new();
        store.record("page_view");
        store.record("page_view");
        store.record("cta_click");

        let summary = store.summary();
        assert_eq!(summary.total_events, 3);
        assert_eq!(summary.by_event.get("page_view"), Some(&2));
        assert_eq!(summary.by_event.get("cta_click"), Some(&1));
    }

    #[test]
    fn test_empty_summary() {
        let summary = AnalyticsStore::new().summary();
        assert_eq!(summary.total_events, 0);
        assert!(summary.by_event.is_empty());
    }
}
