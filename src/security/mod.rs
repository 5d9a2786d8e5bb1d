//! Security subsystem.
//!
//! # Responsibilities
//! - Fixed-window rate limiting on write-sensitive routes
//! - Client identity derivation from trusted proxy headers
//! - Response hardening headers

pub mod headers;
pub mod rate_limit;

pub use rate_limit::{client_key, rate_limit_middleware, Decision, RateLimiter};
