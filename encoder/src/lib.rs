//! Flattens OTLP metric batches into leaf-addressed `{path, value, ts}` records.
//!
//! ```
//! use flatmetrics::domain::metrics::encode;
//! use opentelemetry_proto::tonic::collector::metrics::v1::ExportMetricsServiceRequest;
//!
//! let bytes = encode(&ExportMetricsServiceRequest::default()).unwrap();
//! assert_eq!(bytes, b"[]");
//! ```

mod app;
pub mod core;
pub mod domain;
pub mod error;
pub mod utils;

pub use domain::metrics::{
    EncodingMode, MetricFlattener, MetricValue, MetricsMarshaler, TransformedRecord, encode,
    flatten,
};
pub use error::{DecodeError, EncodeError};
