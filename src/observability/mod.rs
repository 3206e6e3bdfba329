//! Observability
//!
//! Logging and metrics for the engine and the command-line front end.

pub mod logging;
pub mod metrics;

pub use logging::{LogFormat, init_logging};
pub use metrics::describe_metrics;
