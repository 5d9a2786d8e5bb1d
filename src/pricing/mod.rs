//! Quote estimation subsystem.
//!
//! # Data Flow
//! ```text
//! client selection (services, complexity, add-ons)
//!     → types.rs (QuoteSelection, closed enums)
//!     → catalog.rs (base rates and multipliers)
//!     → engine.rs (compute_quote, pure)
//!     → QuoteResult (total EUR, estimated days)
//! ```
//!
//! # Design Decisions
//! - The engine is a pure function over a value type; no shared state
//! - Multipliers are stored as integer percents so the half-up rounding
//!   at the end of the computation is exact
//! - Rounding happens exactly once per output figure

pub mod catalog;
pub mod engine;
pub mod types;

pub use engine::{compute_quote, format_eur};
pub use types::{Addon, Complexity, QuoteResult, QuoteSelection, Service};
