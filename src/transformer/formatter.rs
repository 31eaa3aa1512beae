//! Gauge naming and DogStatsD line formatting
//!
//! Gauge names take the form `data.presto.<group>.<attribute>`. The wire
//! format follows the DogStatsD protocol:
//!
//! ```text
//! <METRIC_NAME>:<VALUE>|g|@<SAMPLE_RATE>|#<TAG1>,<TAG2>
//! ```
//!
//! The sample rate section is only written when the rate is below 1, and the
//! tag section only when tags are present.

use std::fmt::Write;

use tracing::trace;

use crate::statsd::GaugeSink;

/// Namespace prefix for every gauge this collector sends
pub const GAUGE_NAMESPACE: &str = "data.presto";

/// Sample rate used for every emission
pub const SAMPLE_RATE: f64 = 1.0;

/// Build the gauge label for an attribute of a logical group
pub fn gauge_label(group: &str, attribute: &str) -> String {
    format!("{}.{}.{}", GAUGE_NAMESPACE, group, attribute)
}

/// Format a gauge as a single DogStatsD line
pub fn format_gauge_line(name: &str, value: f64, tags: &[&str], sample_rate: f64) -> String {
    let mut line = String::with_capacity(name.len() + 24);
    // Writing to a String cannot fail
    let _ = write!(line, "{}:{}|g", name, value);

    if sample_rate < 1.0 {
        let _ = write!(line, "|@{}", sample_rate);
    }

    if !tags.is_empty() {
        line.push_str("|#");
        line.push_str(&tags.join(","));
    }

    line
}

/// Forward one coerced attribute to the metrics transport
///
/// Fire-and-forget: transport failures are handled by the sink.
pub fn emit(sink: &dyn GaugeSink, group: &str, attribute: &str, value: f64) {
    let label = gauge_label(group, attribute);
    trace!(metric = %label, value, "Emitting gauge");
    sink.gauge(&label, value, &[], SAMPLE_RATE);
}
