//! Metric flattening
//!
//! Walks resource → scope → metric → data point and emits one
//! [`TransformedRecord`] per data point, in traversal order.

use std::fmt;

use opentelemetry_proto::tonic::collector::metrics::v1::ExportMetricsServiceRequest;
use opentelemetry_proto::tonic::metrics::v1::{Metric, metric::Data};
use serde::{Deserialize, Serialize};

use super::path::{build_host_path, build_path, host_identifier};
use super::point::DataPoint;
use super::timestamp::{TimestampFormat, format_timestamp};
use super::types::TransformedRecord;
use crate::utils::otlp::resource_attributes;

/// Path and timestamp layout of emitted records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncodingMode {
    /// `/<metric>/<attrs...>` with the current timestamp only
    #[default]
    Flat,
    /// `/<metric>/<host>/<attrs...>` with `"<start> <current>"` timestamps
    HostQualified,
}

impl EncodingMode {
    pub fn timestamp_format(self) -> TimestampFormat {
        match self {
            EncodingMode::Flat => TimestampFormat::Current,
            EncodingMode::HostQualified => TimestampFormat::Range,
        }
    }
}

impl fmt::Display for EncodingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingMode::Flat => write!(f, "flat"),
            EncodingMode::HostQualified => write!(f, "host-qualified"),
        }
    }
}

/// Flatten a batch with the default [`EncodingMode::Flat`] layout
pub fn flatten(request: &ExportMetricsServiceRequest) -> Vec<TransformedRecord> {
    MetricFlattener::default().flatten(request)
}

/// Stateless batch flattener. A single instance may be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricFlattener {
    mode: EncodingMode,
}

impl MetricFlattener {
    pub fn new(mode: EncodingMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> EncodingMode {
        self.mode
    }

    /// Flatten all data points of a batch, one record per point
    pub fn flatten(&self, request: &ExportMetricsServiceRequest) -> Vec<TransformedRecord> {
        let mut result = Vec::with_capacity(count_data_points(request));

        for resource_metrics in &request.resource_metrics {
            let ctx = ResourceContext {
                host: match self.mode {
                    EncodingMode::Flat => None,
                    EncodingMode::HostQualified => Some(host_identifier(resource_attributes(
                        resource_metrics.resource.as_ref(),
                    ))),
                },
                timestamp_format: self.mode.timestamp_format(),
            };

            for scope_metrics in &resource_metrics.scope_metrics {
                for metric in &scope_metrics.metrics {
                    extract_metric_data_points(&mut result, metric, &ctx);
                }
            }
        }

        tracing::trace!(records = result.len(), mode = %self.mode, "Flattened metrics batch");
        result
    }
}

/// Total data points across every metric of a batch
pub fn count_data_points(request: &ExportMetricsServiceRequest) -> usize {
    request
        .resource_metrics
        .iter()
        .flat_map(|rm| rm.scope_metrics.iter())
        .flat_map(|sm| sm.metrics.iter())
        .map(|metric| match &metric.data {
            Some(Data::Gauge(g)) => g.data_points.len(),
            Some(Data::Sum(s)) => s.data_points.len(),
            Some(Data::Histogram(h)) => h.data_points.len(),
            Some(Data::ExponentialHistogram(eh)) => eh.data_points.len(),
            Some(Data::Summary(s)) => s.data_points.len(),
            None => 0,
        })
        .sum()
}

/// Resource-level context resolved once per resource_metrics
struct ResourceContext {
    host: Option<String>,
    timestamp_format: TimestampFormat,
}

/// Extract data points from a single metric
fn extract_metric_data_points(
    result: &mut Vec<TransformedRecord>,
    metric: &Metric,
    ctx: &ResourceContext,
) {
    let Some(ref data) = metric.data else {
        tracing::trace!(metric = %metric.name, "Skipping metric without data");
        return;
    };

    match data {
        Data::Gauge(g) => push_points(result, &metric.name, &g.data_points, ctx),
        Data::Sum(s) => push_points(result, &metric.name, &s.data_points, ctx),
        Data::Histogram(h) => push_points(result, &metric.name, &h.data_points, ctx),
        Data::ExponentialHistogram(eh) => push_points(result, &metric.name, &eh.data_points, ctx),
        Data::Summary(s) => push_points(result, &metric.name, &s.data_points, ctx),
    }
}

fn push_points<P: DataPoint>(
    result: &mut Vec<TransformedRecord>,
    metric_name: &str,
    points: &[P],
    ctx: &ResourceContext,
) {
    result.extend(points.iter().map(|dp| transform_point(metric_name, dp, ctx)));
}

fn transform_point<P: DataPoint>(
    metric_name: &str,
    dp: &P,
    ctx: &ResourceContext,
) -> TransformedRecord {
    let path = match ctx.host.as_deref() {
        Some(host) => build_host_path(metric_name, host, dp.attrs()),
        None => build_path(metric_name, dp.attrs()),
    };

    TransformedRecord {
        path,
        value: dp.extract_value(),
        ts: format_timestamp(dp, ctx.timestamp_format),
    }
}

#[cfg(test)]
#[path = "flatten_tests.rs"]
mod tests;
