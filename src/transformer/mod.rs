//! Attribute filtering, coercion and gauge emission
//!
//! Turns decoded bean attributes into DogStatsD gauges:
//! whitelist check, numeric coercion, label construction.

pub mod filter;
pub mod formatter;

pub use filter::{coerce, CoercionSkip};
pub use formatter::{emit, format_gauge_line, gauge_label, GAUGE_NAMESPACE, SAMPLE_RATE};
