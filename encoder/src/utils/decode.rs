//! OTLP metrics input decoding
//!
//! Supports protobuf (`application/x-protobuf`), JSON (`application/json`) and
//! JSON lines (one export request per line) per the OpenTelemetry Protocol
//! specification.

use std::fmt;
use std::path::Path;

use opentelemetry_proto::tonic::collector::metrics::v1::ExportMetricsServiceRequest;
use prost::Message;
use serde_json::Value as JsonValue;
use thiserror::Error;

/// OTLP/JSON field carrying a signed 64-bit number data point value
const AS_INT_KEY: &str = "asInt";

/// Wire format of an encoded metrics batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Protobuf,
    Json,
    Jsonl,
}

impl InputFormat {
    /// Guess the format from a file extension.
    /// Unknown or missing extensions default to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("pb" | "bin" | "protobuf") => InputFormat::Protobuf,
            Some("jsonl" | "ndjson") => InputFormat::Jsonl,
            _ => InputFormat::Json,
        }
    }

    /// MIME type of the format
    #[inline]
    pub fn as_content_type(self) -> &'static str {
        match self {
            InputFormat::Protobuf => "application/x-protobuf",
            InputFormat::Json => "application/json",
            InputFormat::Jsonl => "application/jsonl",
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Protobuf => write!(f, "protobuf"),
            InputFormat::Json => write!(f, "json"),
            InputFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}

/// Error returned when decoding fails
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("protobuf decode error: {0}")]
    Protobuf(#[from] prost::DecodeError),

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON decode error on line {line}: {source}")]
    JsonLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {field} value {value:?}: expected a 64-bit integer")]
    InvalidInteger { field: &'static str, value: String },

    #[error("input is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Decode a single metrics export request.
/// `Jsonl` is parsed as one JSON document; use [`decode_lines`] for multi-line input.
pub fn decode_request(
    body: &[u8],
    format: InputFormat,
) -> Result<ExportMetricsServiceRequest, DecodeError> {
    match format {
        InputFormat::Protobuf => Ok(ExportMetricsServiceRequest::decode(body)?),
        InputFormat::Json | InputFormat::Jsonl => decode_json(serde_json::from_slice(body)?),
    }
}

/// Deserialize an OTLP/JSON document.
///
/// OTLP/JSON writes 64-bit integers as strings (`"asInt": "589824"`). The
/// typed deserializer only accepts the numeric form for `asInt` and drops
/// anything else, so string values are rewritten to numbers first.
fn decode_json(mut json: JsonValue) -> Result<ExportMetricsServiceRequest, DecodeError> {
    normalize_int_values(&mut json)?;
    Ok(serde_json::from_value(json)?)
}

fn normalize_int_values(value: &mut JsonValue) -> Result<(), DecodeError> {
    match value {
        JsonValue::Object(map) => {
            for (key, child) in map.iter_mut() {
                if key == AS_INT_KEY
                    && let JsonValue::String(s) = child
                {
                    let parsed: i64 =
                        s.trim().parse().map_err(|_| DecodeError::InvalidInteger {
                            field: AS_INT_KEY,
                            value: s.clone(),
                        })?;
                    *child = JsonValue::from(parsed);
                    continue;
                }
                normalize_int_values(child)?;
            }
        }
        JsonValue::Array(items) => {
            for item in items {
                normalize_int_values(item)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Decode JSON lines, one export request per non-blank line
pub fn decode_lines(body: &[u8]) -> Result<Vec<ExportMetricsServiceRequest>, DecodeError> {
    let text = std::str::from_utf8(body)?;
    let mut requests = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let to_line_error = |source| DecodeError::JsonLine {
            line: idx + 1,
            source,
        };
        let json: JsonValue = serde_json::from_str(line).map_err(to_line_error)?;
        let request = decode_json(json).map_err(|err| match err {
            DecodeError::Json(source) => to_line_error(source),
            other => other,
        })?;
        requests.push(request);
    }

    tracing::trace!(requests = requests.len(), "Decoded JSON lines input");
    Ok(requests)
}
