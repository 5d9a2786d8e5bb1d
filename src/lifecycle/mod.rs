//! Process lifecycle: startup ordering and graceful shutdown.
//!
//! On shutdown the server stops accepting connections, in-flight requests
//! drain, and store snapshots are written before the process exits.

pub mod shutdown;

pub use shutdown::Shutdown;
