//! Outbound integrations.
//!
//! Notification of new leads and forwarding of analytics events are
//! fire-and-forget: failures are logged, never surfaced to the client.
//! The trait seam keeps webhook/email providers out of the core.

use crate::store::Lead;

/// Fire-and-forget sink for outbound notifications.
pub trait NotificationSink: Send + Sync {
    /// A new lead was accepted from the contact form.
    fn notify_lead(&self, lead: &Lead);

    /// An analytics event was ingested.
    fn forward_event(&self, name: &str);
}

/// Default sink: structured log lines only.
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify_lead(&self, lead: &Lead) {
        tracing::info!(lead_id = %lead.id, email = %lead.email, "New lead received");
    }

    fn forward_event(&self, name: &str) {
        tracing::debug!(event = %name, "Analytics event ingested");
    }
}
