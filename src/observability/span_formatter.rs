//! OTLP JSON encoding of finished spans.
//!
//! Each exported batch becomes one self-contained OTLP document:
//!
//! ```json
//! {
//!   "resourceSpans": [{
//!     "resource": {
//!       "attributes": [{"key": "service.name", "value": {"stringValue": "Atlasphere"}}]
//!     },
//!     "scopeSpans": [{
//!       "scope": {"name": "Atlasphere"},
//!       "spans": [...]
//!     }]
//!   }]
//! }
//! ```

use opentelemetry::trace::{SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde::Serialize;
use std::time::{Duration, SystemTime};

/// Instrumentation scope reported for every span.
pub const SCOPE_NAME: &str = "Atlasphere";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtlpDocument {
    resource_spans: Vec<ResourceSpans>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResourceSpans {
    resource: OtlpResource,
    scope_spans: Vec<ScopeSpans>,
}

#[derive(Debug, Serialize)]
struct OtlpResource {
    attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
struct ScopeSpans {
    scope: Scope,
    spans: Vec<OtlpSpan>,
}

#[derive(Debug, Serialize)]
struct Scope {
    name: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OtlpSpan {
    trace_id: String,
    span_id: String,
    /// Empty for root spans.
    parent_span_id: String,
    name: String,
    kind: u8,
    start_time_unix_nano: String,
    end_time_unix_nano: String,
    attributes: Vec<Attribute>,
    events: Vec<OtlpEvent>,
    status: OtlpStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OtlpEvent {
    time_unix_nano: String,
    name: String,
    attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
struct OtlpStatus {
    code: u8,
    message: String,
}

#[derive(Debug, PartialEq, Serialize)]
struct Attribute {
    key: String,
    value: AnyValue,
}

/// OTLP `AnyValue`. 64-bit integers travel as strings.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
enum AnyValue {
    BoolValue(bool),
    IntValue(String),
    DoubleValue(f64),
    StringValue(String),
}

impl From<&Value> for AnyValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(b) => Self::BoolValue(*b),
            Value::I64(i) => Self::IntValue(i.to_string()),
            Value::F64(f) => Self::DoubleValue(*f),
            Value::String(s) => Self::StringValue(s.to_string()),
            // Arrays are flattened to their display form.
            array @ Value::Array(_) => Self::StringValue(array.to_string()),
        }
    }
}

fn attribute(key: impl ToString, value: &Value) -> Attribute {
    Attribute {
        key: key.to_string(),
        value: value.into(),
    }
}

fn attributes(pairs: &[KeyValue]) -> Vec<Attribute> {
    pairs.iter().map(|kv| attribute(&kv.key, &kv.value)).collect()
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos()
        .to_string()
}

const fn kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn status(status: &Status) -> OtlpStatus {
    let (code, message) = match status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    };
    OtlpStatus { code, message }
}

impl From<&SpanData> for OtlpSpan {
    fn from(span: &SpanData) -> Self {
        let parent_span_id = if span.parent_span_id == SpanId::INVALID {
            String::new()
        } else {
            format!("{:016x}", span.parent_span_id)
        };

        Self {
            trace_id: format!("{:032x}", span.span_context.trace_id()),
            span_id: format!("{:016x}", span.span_context.span_id()),
            parent_span_id,
            name: span.name.to_string(),
            kind: kind_code(&span.span_kind),
            start_time_unix_nano: unix_nanos(span.start_time),
            end_time_unix_nano: unix_nanos(span.end_time),
            attributes: attributes(&span.attributes),
            events: span
                .events
                .iter()
                .map(|event| OtlpEvent {
                    time_unix_nano: unix_nanos(event.timestamp),
                    name: event.name.to_string(),
                    attributes: attributes(&event.attributes),
                })
                .collect(),
            status: status(&span.status),
        }
    }
}

/// Encodes span batches against a fixed resource.
pub struct SpanFormatter {
    resource: Resource,
}

impl SpanFormatter {
    pub const fn new(resource: Resource) -> Self {
        Self { resource }
    }

    #[must_use]
    pub fn document(&self, batch: &[SpanData]) -> OtlpDocument {
        OtlpDocument {
            resource_spans: vec![ResourceSpans {
                resource: OtlpResource {
                    attributes: self.resource.iter().map(|(key, value)| attribute(key, value)).collect(),
                },
                scope_spans: vec![ScopeSpans {
                    scope: Scope { name: SCOPE_NAME },
                    spans: batch.iter().map(OtlpSpan::from).collect(),
                }],
            }],
        }
    }

    /// One-line JSON for a batch.
    ///
    /// # Errors
    ///
    /// Returns the serializer error.
    pub fn format_batch(&self, batch: &[SpanData]) -> serde_json::Result<String> {
        serde_json::to_string(&self.document(batch))
    }
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_encoding() {
        let encode = |value: Value| serde_json::to_value(AnyValue::from(&value)).unwrap();

        assert_eq!(encode(Value::Bool(true)), serde_json::json!({ "boolValue": true }));
        assert_eq!(encode(Value::I64(42)), serde_json::json!({ "intValue": "42" }));
        assert_eq!(encode(Value::F64(1.5)), serde_json::json!({ "doubleValue": 1.5 }));
        assert_eq!(
            encode(Value::from("Central Park")),
            serde_json::json!({ "stringValue": "Central Park" })
        );
    }

    #[test]
    fn test_empty_batch_document_shape() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "Atlasphere")]);
        let formatter = SpanFormatter::new(resource);

        let json: serde_json::Value = serde_json::from_str(&formatter.format_batch(&[]).unwrap()).unwrap();
        let resource_spans = &json["resourceSpans"][0];

        assert_eq!(resource_spans["scopeSpans"][0]["scope"]["name"], "Atlasphere");
        assert_eq!(resource_spans["scopeSpans"][0]["spans"], serde_json::json!([]));
        assert!(resource_spans["resource"]["attributes"]
            .as_array()
            .unwrap()
            .iter()
            .any(|attr| attr["key"] == "service.name" && attr["value"]["stringValue"] == "Atlasphere"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(status(&Status::Unset).code, 0);
        assert_eq!(status(&Status::Ok).code, 1);

        let error = status(&Status::error("boom"));
        assert_eq!((error.code, error.message.as_str()), (2, "boom"));
    }

    #[test]
    fn test_unix_nanos_before_epoch_is_zero() {
        assert_eq!(unix_nanos(SystemTime::UNIX_EPOCH), "0");
        assert_eq!(unix_nanos(SystemTime::UNIX_EPOCH + Duration::from_millis(2)), "2000000");
    }
}
