//! JSON encoding of flattened records

use std::io::Write;

use opentelemetry_proto::tonic::collector::metrics::v1::ExportMetricsServiceRequest;

use super::flatten::{MetricFlattener, flatten};
use super::types::TransformedRecord;
use crate::error::EncodeError;

/// Turns a metrics batch into the bytes handed to a sink
pub trait MetricsMarshaler: Send + Sync {
    fn marshal_metrics(
        &self,
        request: &ExportMetricsServiceRequest,
    ) -> Result<Vec<u8>, EncodeError>;
}

impl MetricsMarshaler for MetricFlattener {
    fn marshal_metrics(
        &self,
        request: &ExportMetricsServiceRequest,
    ) -> Result<Vec<u8>, EncodeError> {
        encode_records(&self.flatten(request))
    }
}

/// Flatten a batch and render it as a JSON array of `{path, value, ts}` objects
pub fn encode(request: &ExportMetricsServiceRequest) -> Result<Vec<u8>, EncodeError> {
    encode_records(&flatten(request))
}

/// Render records as a JSON array, in record order
pub fn encode_records(records: &[TransformedRecord]) -> Result<Vec<u8>, EncodeError> {
    Ok(serde_json::to_vec(records)?)
}

/// Stream records as a JSON array into a writer
pub fn write_records<W: Write>(
    writer: W,
    records: &[TransformedRecord],
) -> Result<(), EncodeError> {
    serde_json::to_writer(writer, records)?;
    Ok(())
}
