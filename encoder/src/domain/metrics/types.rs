//! Flattened metric record types

use serde::Serialize;

/// Scalar carried by a flattened record.
///
/// Serializes as the bare JSON number of its variant, so integers stay
/// integers on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// Gauge/Sum point with an integer value
    Int(i64),
    /// Gauge/Sum point with a floating-point value
    Double(f64),
    /// Observation count of Histogram, ExponentialHistogram and Summary points
    Count(u64),
}

impl Default for MetricValue {
    fn default() -> Self {
        MetricValue::Int(0)
    }
}

/// One leaf-addressed record per data point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformedRecord {
    pub path: String,
    pub value: MetricValue,
    pub ts: String,
}
