//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → rate limit gate (contact route only)
//!     → contact.rs / quote.rs / analytics.rs (public API)
//!     → admin router (bearer-gated, see crate::admin)
//! ```

pub mod analytics;
pub mod contact;
pub mod quote;
pub mod server;

pub use server::{AppState, HttpServer};
