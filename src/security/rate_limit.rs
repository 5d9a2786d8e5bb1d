//! Fixed-window rate limiting for write-sensitive endpoints.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::server::AppState;
use crate::observability::metrics;

/// Every N admissions, sweep entries whose window expired long ago.
const SWEEP_INTERVAL: u64 = 256;

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    /// Denied, with the remaining time in the current window.
    Denied { retry_after: Duration },
}

/// Per-client counter for the current window.
struct ClientWindow {
    count: u32,
    window_reset_at: Instant,
}

/// Fixed-window request counter keyed by client identifier.
///
/// Owned by the application state and injected into the middleware; the
/// read-increment-compare sequence runs under the table lock, so two racing
/// requests from the same client cannot both slip past the limit.
pub struct RateLimiter {
    windows: Mutex<HashMap<String, ClientWindow>>,
    window: Duration,
    max_requests: u32,
    admits: AtomicU64,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            window,
            max_requests,
            admits: AtomicU64::new(0),
        }
    }

    /// Check whether a request from `client_id` at `now` may proceed.
    ///
    /// The first request from a client, or the first after its window
    /// expired, opens a fresh window. Denied attempts keep counting, so
    /// hammering a closed window does not earn a grace period.
    pub fn admit(&self, client_id: &str, now: Instant) -> Decision {
        self.maybe_sweep(now);

        let mut windows = self.windows.lock().expect("rate limiter mutex poisoned");
        match windows.get_mut(client_id) {
            Some(record) if now <= record.window_reset_at => {
                record.count += 1;
                if record.count > self.max_requests {
                    Decision::Denied {
                        retry_after: record.window_reset_at - now,
                    }
                } else {
                    Decision::Allowed
                }
            }
            _ => {
                windows.insert(
                    client_id.to_string(),
                    ClientWindow {
                        count: 1,
                        window_reset_at: now + self.window,
                    },
                );
                Decision::Allowed
            }
        }
    }

    /// Number of tracked client entries.
    pub fn tracked_clients(&self) -> usize {
        self.windows.lock().expect("rate limiter mutex poisoned").len()
    }

    /// Opportunistic eviction. Entries whose window expired more than one
    /// full window ago can never influence a future decision, so dropping
    /// them does not change observable behavior.
    fn maybe_sweep(&self, now: Instant) {
        let admits = self.admits.fetch_add(1, Ordering::Relaxed) + 1;
        if admits % SWEEP_INTERVAL == 0 {
            let window = self.window;
            let mut windows = self.windows.lock().expect("rate limiter mutex poisoned");
            windows.retain(|_, record| now <= record.window_reset_at + window);
        }
    }
}

/// Derive the rate-limit key for a request.
///
/// Prefers the leftmost `x-forwarded-for` entry, then `x-real-ip`. Both are
/// only trustworthy behind a reverse proxy that strips client-supplied
/// values. Requests without either share the `"unknown"` bucket and are
/// limited as a single pseudo-client, a deliberately conservative fallback.
pub fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|s| !s.is_empty())
        })
        .unwrap_or("unknown")
        .to_string()
}

fn retry_after_secs(retry_after: Duration) -> u64 {
    let secs = retry_after.as_secs();
    if retry_after.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}

/// Middleware gating a route behind the shared limiter.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !state.config.load().rate_limit.enabled {
        return next.run(request).await;
    }

    let key = client_key(request.headers());
    match state.limiter.admit(&key, Instant::now()) {
        Decision::Allowed => next.run(request).await,
        Decision::Denied { retry_after } => {
            let path = request.uri().path().to_string();
            tracing::warn!(client = %key, path = %path, "Rate limit exceeded");
            metrics::record_rate_limited(&path);

            let mut response =
                (StatusCode::TOO_MANY_REQUESTS, "Too many requests").into_response();
            response.headers_mut().insert(
                header::RETRY_AFTER,
                HeaderValue::from(retry_after_secs(retry_after)),
            );
            response
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter() -> RateLimiter {
        RateLimiter::new(Duration::from_secs(600), 5)
    }

    #[test]
    fn test_sixth_request_denied() {
        let limiter = limiter();
        let start = Instant::now();

        for i in 0..5 {
            assert_eq!(
                limiter.admit("10.0.0.1", start + Duration::from_secs(i)),
                Decision::Allowed
            );
        }
        assert!(matches!(
            limiter.admit("10.0.0.1", start + Duration::from_secs(5)),
            Decision::Denied { .. }
        ));
    }

    #[test]
    fn test_window_expiry_resets_count() {
        let limiter = limiter();
        let start = Instant::now();

        for _ in 0..6 {
            limiter.admit("10.0.0.1", start);
        }

        // Past the reset the client starts a fresh window of five.
        let later = start + Duration::from_secs(601);
        for _ in 0..5 {
            assert_eq!(limiter.admit("10.0.0.1", later), Decision::Allowed);
        }
        assert!(matches!(
            limiter.admit("10.0.0.1", later),
            Decision::Denied { .. }
        ));
    }

    #[test]
    fn test_clients_are_isolated() {
        let limiter = limiter();
        let start = Instant::now();

        for _ in 0..6 {
            limiter.admit("10.0.0.1", start);
        }
        // The second client is unaffected by the first one's exhaustion.
        for _ in 0..5 {
            assert_eq!(limiter.admit("10.0.0.2", start), Decision::Allowed);
        }
    }

    #[test]
    fn test_denied_attempts_keep_counting() {
        let limiter = limiter();
        let start = Instant::now();

        for _ in 0..10 {
            limiter.admit("10.0.0.1", start);
        }
        // Still inside the original window; no grace earned by retrying.
        assert!(matches!(
            limiter.admit("10.0.0.1", start + Duration::from_secs(599)),
            Decision::Denied { .. }
        ));
    }

    #[test]
    fn test_retry_after_is_remaining_window() {
        let limiter = limiter();
        let start = Instant::now();

        for _ in 0..5 {
            limiter.admit("10.0.0.1", start);
        }
        match limiter.admit("10.0.0.1", start + Duration::from_secs(100)) {
            Decision::Denied { retry_after } => {
                assert_eq!(retry_after, Duration::from_secs(500));
            }
            Decision::Allowed => panic!("expected denial"),
        }
    }

    #[test]
    fn test_retry_after_rounds_up_to_whole_seconds() {
        assert_eq!(retry_after_secs(Duration::from_secs(500)), 500);
        assert_eq!(retry_after_secs(Duration::from_millis(499_500)), 500);
        assert_eq!(retry_after_secs(Duration::from_millis(1)), 1);
        assert_eq!(retry_after_secs(Duration::ZERO), 0);
    }

    #[test]
    fn test_sweep_drops_long_expired_entries() {
        let limiter = RateLimiter::new(Duration::from_secs(600), 5);
        let start = Instant::now();
        limiter.admit("10.0.0.1", start);
        assert_eq!(limiter.tracked_clients(), 1);

        // Drive past the sweep interval well after the entry could matter.
        let later = start + Duration::from_secs(1500);
        for _ in 0..SWEEP_INTERVAL {
            limiter.admit("10.0.0.2", later);
        }
        let windows = limiter.windows.lock().unwrap();
        assert!(!windows.contains_key("10.0.0.1"));
    }

    #[test]
    fn test_client_key_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
        headers.insert("x-real-ip", "198.51.100.2".parse().unwrap());
        assert_eq!(client_key(&headers), "203.0.113.7");
    }

    #[test]
    fn test_client_key_falls_back_to_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", "198.51.100.2".parse().unwrap());
        assert_eq!(client_key(&headers), "198.51.100.2");
    }

    #[test]
    fn test_client_key_unknown_without_headers() {
        assert_eq!(client_key(&HeaderMap::new()), "unknown");
    }

    #[test]
    fn test_concurrent_clients_never_exceed_limit() {
        use std::sync::Arc;

        let limiter = Arc::new(RateLimiter::new(Duration::from_secs(600), 5));
        let now = Instant::now();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let limiter = limiter.clone();
            handles.push(std::thread::spawn(move || {
                let mut allowed = 0u32;
                for _ in 0..4 {
                    if limiter.admit("10.0.0.1", now) == Decision::Allowed {
                        allowed += 1;
                    }
                }
                allowed
            }));
        }

        let allowed: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(allowed, 5);
    }
}
