//! Metrics Flattening
//!
//! Reduces OTLP metrics to one path/value/timestamp record per data point.
//! Supports all 5 OTLP metric types: Gauge, Sum, Histogram, ExponentialHistogram, Summary.

mod encode;
mod flatten;
mod path;
mod point;
mod timestamp;
mod types;
mod value;

pub use encode::{MetricsMarshaler, encode, encode_records, write_records};
pub use flatten::{EncodingMode, MetricFlattener, count_data_points, flatten};
pub use path::{build_host_path, build_path, host_identifier};
pub use point::DataPoint;
pub use timestamp::{TimestampFormat, format_timestamp};
pub use types::{MetricValue, TransformedRecord};
pub use value::ExtractValue;
