//! Host-facing encoding extension
//!
//! The host calls `start` before the first batch and `shutdown` after the
//! last. Neither hook holds resources, so both always succeed.

use anyhow::Result;
use opentelemetry_proto::tonic::collector::metrics::v1::ExportMetricsServiceRequest;

use super::config::EncoderConfig;
use crate::domain::metrics::{EncodingMode, MetricFlattener, MetricsMarshaler};
use crate::error::EncodeError;

/// Metrics marshaler with the host lifecycle hooks
#[derive(Debug, Clone)]
pub struct MetricsEncodingExtension {
    flattener: MetricFlattener,
}

impl MetricsEncodingExtension {
    pub fn new(config: &EncoderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            flattener: MetricFlattener::new(config.mode),
        })
    }

    pub fn mode(&self) -> EncodingMode {
        self.flattener.mode()
    }

    pub fn start(&self) -> Result<()> {
        tracing::info!(mode = %self.mode(), "Metric encoding extension started");
        Ok(())
    }

    pub fn shutdown(&self) -> Result<()> {
        tracing::info!("Metric encoding extension stopped");
        Ok(())
    }
}

impl MetricsMarshaler for MetricsEncodingExtension {
    fn marshal_metrics(
        &self,
        request: &ExportMetricsServiceRequest,
    ) -> Result<Vec<u8>, EncodeError> {
        let bytes = self.flattener.marshal_metrics(request)?;
        tracing::debug!(
            resources = request.resource_metrics.len(),
            bytes = bytes.len(),
            "Marshaled metrics batch"
        );
        Ok(bytes)
    }
}
