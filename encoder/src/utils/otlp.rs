//! OTLP utility functions
//!
//! Provides reusable functions for working with OTLP protobuf types:
//! - Attribute lookup on resources
//! - Textual rendering of attribute values for path segments
//! - Shared attribute keys for host identification

use opentelemetry_proto::tonic::common::v1::{AnyValue, KeyValue, any_value};
use opentelemetry_proto::tonic::resource::v1::Resource;
use serde_json::Value as JsonValue;

// ============================================================================
// SHARED ATTRIBUTE KEYS
// ============================================================================

/// Resource attribute keys that identify the producing host
pub mod keys {
    pub const HOST_NAME: &str = "host.name";
    pub const HOST: &str = "host";
    pub const INSTANCE_ID: &str = "instance.id";
    pub const SERVICE_INSTANCE_ID: &str = "service.instance.id";
}

/// Lookup order for the host identifier, first match wins
pub const HOST_IDENTIFIER_KEYS: [&str; 4] = [
    keys::HOST_NAME,
    keys::HOST,
    keys::INSTANCE_ID,
    keys::SERVICE_INSTANCE_ID,
];

// ============================================================================
// ATTRIBUTE LOOKUP
// ============================================================================

/// Find the first attribute with the given key
pub fn find_attribute<'a>(attrs: &'a [KeyValue], key: &str) -> Option<&'a KeyValue> {
    attrs.iter().find(|kv| kv.key == key)
}

/// Attributes of an optional resource (empty when the resource is absent)
pub fn resource_attributes(resource: Option<&Resource>) -> &[KeyValue] {
    resource.map(|r| r.attributes.as_slice()).unwrap_or_default()
}

// ============================================================================
// VALUE RENDERING
// ============================================================================

/// Render an attribute's value as it appears in a path segment.
/// A key without a value renders as an empty string.
pub fn key_value_to_string(kv: &KeyValue) -> String {
    kv.value.as_ref().map(any_value_to_string).unwrap_or_default()
}

/// Convert AnyValue to string representation
pub fn any_value_to_string(value: &AnyValue) -> String {
    match &value.value {
        Some(any_value::Value::StringValue(s)) => s.clone(),
        Some(any_value::Value::BoolValue(b)) => b.to_string(),
        Some(any_value::Value::IntValue(i)) => i.to_string(),
        Some(any_value::Value::DoubleValue(d)) => d.to_string(),
        Some(any_value::Value::ArrayValue(_)) | Some(any_value::Value::KvlistValue(_)) => {
            any_value_to_json(value).to_string()
        }
        Some(any_value::Value::BytesValue(b)) => hex::encode(b),
        None => String::new(),
    }
}

/// Convert AnyValue to a JSON value whose leaves are the rendered strings.
/// Key-value lists keep their input order.
fn any_value_to_json(value: &AnyValue) -> JsonValue {
    match &value.value {
        Some(any_value::Value::ArrayValue(arr)) => {
            JsonValue::Array(arr.values.iter().map(any_value_to_json).collect())
        }
        Some(any_value::Value::KvlistValue(kvlist)) => {
            let map: serde_json::Map<String, JsonValue> = kvlist
                .values
                .iter()
                .map(|kv| {
                    let v = kv
                        .value
                        .as_ref()
                        .map(any_value_to_json)
                        .unwrap_or_else(|| JsonValue::String(String::new()));
                    (kv.key.clone(), v)
                })
                .collect();
            JsonValue::Object(map)
        }
        _ => JsonValue::String(any_value_to_string(value)),
    }
}

/// Build a string-valued KeyValue
#[cfg(test)]
pub fn make_str_attr(key: &str, value: &str) -> KeyValue {
    KeyValue {
        key: key.to_string(),
        value: Some(AnyValue {
            value: Some(any_value::Value::StringValue(value.to_string())),
        }),
    }
}
