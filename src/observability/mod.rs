//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (request counters, latency histogram, store gauge)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Prometheus scrape endpoint (when enabled)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every span
//! - Metrics go through the `metrics` facade and are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
