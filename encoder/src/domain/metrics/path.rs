//! Hierarchical path construction
//!
//! A path is `/` + metric name, optionally followed by a host segment, then
//! one `/`-prefixed segment per point attribute value in stored order.
//! Segment text is not escaped: a value containing `/` adds path depth.

use opentelemetry_proto::tonic::common::v1::KeyValue;

use crate::core::constants::UNKNOWN_HOST;
use crate::utils::otlp::{HOST_IDENTIFIER_KEYS, find_attribute, key_value_to_string};

const SEPARATOR: char = '/';

/// Build the path for a point: `/<metric>/<attr value>/<attr value>...`
pub fn build_path(metric_name: &str, attrs: &[KeyValue]) -> String {
    PathBuilder::new(metric_name).attributes(attrs).finish()
}

/// Build the host-qualified path: `/<metric>/<host>/<attr value>...`
pub fn build_host_path(metric_name: &str, host: &str, attrs: &[KeyValue]) -> String {
    PathBuilder::new(metric_name)
        .segment(host)
        .attributes(attrs)
        .finish()
}

/// Resolve the host identifier from resource attributes.
///
/// Priority: `host.name`, `host`, `instance.id`, `service.instance.id`,
/// falling back to `unknown-host`.
pub fn host_identifier(resource_attrs: &[KeyValue]) -> String {
    HOST_IDENTIFIER_KEYS
        .iter()
        .find_map(|key| find_attribute(resource_attrs, key))
        .map(key_value_to_string)
        .unwrap_or_else(|| UNKNOWN_HOST.to_string())
}

/// Incremental path writer
struct PathBuilder {
    path: String,
}

impl PathBuilder {
    fn new(metric_name: &str) -> Self {
        let mut path = String::with_capacity(metric_name.len() + 32);
        path.push(SEPARATOR);
        path.push_str(metric_name);
        Self { path }
    }

    fn segment(mut self, text: &str) -> Self {
        self.path.push(SEPARATOR);
        self.path.push_str(text);
        self
    }

    fn attributes(mut self, attrs: &[KeyValue]) -> Self {
        for kv in attrs {
            self.path.push(SEPARATOR);
            self.path.push_str(&key_value_to_string(kv));
        }
        self
    }

    fn finish(self) -> String {
        self.path
    }
}
