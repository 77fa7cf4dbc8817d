//! Span exporter writing one JSON object per finished span.
//!
//! Each line carries the trace and span ids, timing, attributes, events and
//! status, tagged with the service resource. The output is meant to be read
//! with `jq` or loaded into a trace viewer after the fact.

use super::log_file::RotatingFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{json, Map, Value as JsonValue};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

struct JsonLinesExporter {
    file: RotatingFile,
    resource: JsonValue,
    is_shutdown: AtomicBool,
}

impl JsonLinesExporter {
    fn new(path: PathBuf, resource: &Resource) -> Self {
        Self {
            file: RotatingFile::new(path),
            resource: attributes_object(resource.iter().map(|(k, v)| (k.as_str(), v))),
            is_shutdown: AtomicBool::new(false),
        }
    }
}

impl SpanExporter for JsonLinesExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from("exporter is shut down"))));
        }

        let result = batch.iter().try_for_each(|span| {
            let mut record = span_record(span);
            record["resource"] = self.resource.clone();
            self.file.append_line(&record.to_string())
        });

        Box::pin(std::future::ready(result.map_err(|e| TraceError::from(e.to_string()))))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for JsonLinesExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesExporter")
            .field("file", &self.file)
            .field("is_shutdown", &self.is_shutdown)
            .finish_non_exhaustive()
    }
}

/// Builds a provider that exports every span synchronously to `path`.
pub fn create_tracer_provider(path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = JsonLinesExporter::new(path, &resource);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

fn unix_nanos(time: SystemTime) -> u128 {
    time.duration_since(UNIX_EPOCH).map(|d| d.as_nanos()).unwrap_or_default()
}

fn span_record(span: &SpanData) -> JsonValue {
    let parent = if span.parent_span_id == SpanId::INVALID {
        JsonValue::Null
    } else {
        json!(format!("{:016x}", span.parent_span_id))
    };

    let (status, status_message) = match &span.status {
        Status::Unset => ("unset", String::new()),
        Status::Ok => ("ok", String::new()),
        Status::Error { description } => ("error", description.to_string()),
    };

    let start = unix_nanos(span.start_time);
    let end = unix_nanos(span.end_time);

    let events: Vec<JsonValue> = span
        .events
        .iter()
        .map(|event| {
            json!({
                "name": event.name,
                "time_unix_nano": unix_nanos(event.timestamp).to_string(),
                "attributes": key_values(&event.attributes),
            })
        })
        .collect();

    json!({
        "trace_id": format!("{:032x}", span.span_context.trace_id()),
        "span_id": format!("{:016x}", span.span_context.span_id()),
        "parent_span_id": parent,
        "name": span.name,
        "kind": format!("{:?}", span.span_kind).to_lowercase(),
        "start_unix_nano": start.to_string(),
        "duration_us": end.saturating_sub(start) / 1_000,
        "attributes": key_values(&span.attributes),
        "events": events,
        "status": status,
        "status_message": status_message,
    })
}

fn key_values(attributes: &[KeyValue]) -> JsonValue {
    attributes_object(attributes.iter().map(|kv| (kv.key.as_str(), &kv.value)))
}

fn attributes_object<'a>(pairs: impl Iterator<Item = (&'a str, &'a Value)>) -> JsonValue {
    let map: Map<String, JsonValue> = pairs.map(|(k, v)| (k.to_string(), attribute_value(v))).collect();
    JsonValue::Object(map)
}

fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        Value::String(s) => json!(s.as_str()),
        Value::Array(_) => json!(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_become_plain_json() {
        let attrs = [
            KeyValue::new("contact.count", 3_i64),
            KeyValue::new("search.query", "ali"),
            KeyValue::new("flag.set", true),
        ];
        assert_eq!(
            key_values(&attrs),
            json!({ "contact.count": 3, "search.query": "ali", "flag.set": true })
        );
    }

    #[test]
    fn pre_epoch_time_is_zero() {
        assert_eq!(unix_nanos(UNIX_EPOCH), 0);
    }
}
