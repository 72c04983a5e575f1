//! Immutable data types for streaming fetch operations.
//!
//! Configuration, per-transfer progress counters and the long-lived
//! aggregated progress a client exposes to its observers.

pub mod aggregate;
pub mod options;
pub mod progress;

pub use aggregate::{AggregatedProgress, ClientProperty, Failure};
pub use options::{AuthScheme, ClientOptions};
pub use progress::{Direction, ProgressCallback, ProgressSnapshot, ProgressState};
