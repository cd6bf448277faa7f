//! Scalar extraction from typed data points

use opentelemetry_proto::tonic::metrics::v1::{
    ExponentialHistogramDataPoint, HistogramDataPoint, NumberDataPoint, SummaryDataPoint,
    number_data_point,
};

use super::types::MetricValue;

/// Reduces a data point to the single scalar carried by its record
pub trait ExtractValue {
    fn extract_value(&self) -> MetricValue;
}

/// Gauge and Sum points: the declared integer or double value.
/// A point without a value type yields integer zero.
impl ExtractValue for NumberDataPoint {
    fn extract_value(&self) -> MetricValue {
        match self.value {
            Some(number_data_point::Value::AsInt(i)) => MetricValue::Int(i),
            Some(number_data_point::Value::AsDouble(d)) => MetricValue::Double(d),
            None => MetricValue::default(),
        }
    }
}

impl ExtractValue for HistogramDataPoint {
    fn extract_value(&self) -> MetricValue {
        MetricValue::Count(self.count)
    }
}

impl ExtractValue for ExponentialHistogramDataPoint {
    fn extract_value(&self) -> MetricValue {
        MetricValue::Count(self.count)
    }
}

impl ExtractValue for SummaryDataPoint {
    fn extract_value(&self) -> MetricValue {
        MetricValue::Count(self.count)
    }
}
