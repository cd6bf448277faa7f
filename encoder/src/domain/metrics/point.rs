//! Common view over the four OTLP data point shapes

use opentelemetry_proto::tonic::common::v1::KeyValue;
use opentelemetry_proto::tonic::metrics::v1::{
    ExponentialHistogramDataPoint, HistogramDataPoint, NumberDataPoint, SummaryDataPoint,
};

use super::value::ExtractValue;

/// Fields every data point contributes to its flattened record
pub trait DataPoint: ExtractValue {
    /// Point attributes in stored order
    fn attrs(&self) -> &[KeyValue];
    fn current_nanos(&self) -> u64;
    fn start_nanos(&self) -> u64;
}

impl DataPoint for NumberDataPoint {
    fn attrs(&self) -> &[KeyValue] {
        &self.attributes
    }

    fn current_nanos(&self) -> u64 {
        self.time_unix_nano
    }

    fn start_nanos(&self) -> u64 {
        self.start_time_unix_nano
    }
}

impl DataPoint for HistogramDataPoint {
    fn attrs(&self) -> &[KeyValue] {
        &self.attributes
    }

    fn current_nanos(&self) -> u64 {
        self.time_unix_nano
    }

    fn start_nanos(&self) -> u64 {
        self.start_time_unix_nano
    }
}

impl DataPoint for ExponentialHistogramDataPoint {
    fn attrs(&self) -> &[KeyValue] {
        &self.attributes
    }

    fn current_nanos(&self) -> u64 {
        self.time_unix_nano
    }

    fn start_nanos(&self) -> u64 {
        self.start_time_unix_nano
    }
}

impl DataPoint for SummaryDataPoint {
    fn attrs(&self) -> &[KeyValue] {
        &self.attributes
    }

    fn current_nanos(&self) -> u64 {
        self.time_unix_nano
    }

    fn start_nanos(&self) -> u64 {
        self.start_time_unix_nano
    }
}
