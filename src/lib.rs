//! Site backend library for the vitrine marketing website.

pub mod admin;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod outbound;
pub mod pricing;
pub mod security;
pub mod store;

pub use config::SiteConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
