//! Worker-side processing of photo read requests.
//!
//! [`ContactsWorker`] runs on the thread Zellij spawns for the plugin's worker.
//! It turns each [`WorkerMessage`] into exactly one [`WorkerResponse`]; the
//! plugin shim handles the IPC around it.

use crate::domain::photo;
use crate::infrastructure::paths;
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Worker thread state.
///
/// Stateless apart from tracing setup, which happens once per worker
/// lifetime on the first message.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ContactsWorker {
    #[serde(skip)]
    tracing_initialized: bool,
}

impl ContactsWorker {
    /// Attaches the parent trace context from a message to the current thread.
    ///
    /// Returns a context guard that must be held for the duration of the
    /// operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    fn handle_read_photo(request_id: u64, path: &str) -> WorkerResponse {
        match photo::read_photo(Path::new(path)) {
            Ok(data_uri) => {
                tracing::debug!(request_id = request_id, bytes = data_uri.len(), "photo read");
                WorkerResponse::PhotoLoaded {
                    request_id,
                    data_uri,
                }
            }
            Err(e) => {
                tracing::warn!(request_id = request_id, error = %e, "photo read failed");
                WorkerResponse::PhotoFailed {
                    request_id,
                    message: e.to_string().replace(path, &paths::strip_host_prefix(path)),
                }
            }
        }
    }

    /// Processes a worker message and returns the response to send back.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::ReadPhoto {
                request_id, path, ..
            } => Self::handle_read_photo(request_id, &path),
        }
    }

    /// Decodes a JSON payload, handles it, and encodes the response.
    ///
    /// Returns `None` only if the response cannot be serialized.
    pub fn handle_payload(&mut self, payload: &str) -> Option<String> {
        if !self.tracing_initialized {
            crate::observability::init_tracing(&crate::Config::default());
            self.tracing_initialized = true;
        }

        let response = match serde_json::from_str::<WorkerMessage>(payload) {
            Ok(message) => self.handle_message(message),
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                WorkerResponse::Error {
                    message: format!("invalid worker message: {e}"),
                }
            }
        };

        match serde_json::to_string(&response) {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker response");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_photo_into_data_uri() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.jpg");
        std::fs::write(&path, b"jpegbytes").unwrap();

        let mut worker = ContactsWorker::default();
        let response = worker.handle_message(WorkerMessage::ReadPhoto {
            request_id: 9,
            path: path.to_string_lossy().into_owned(),
            trace_context: None,
        });

        let WorkerResponse::PhotoLoaded { request_id, data_uri } = response else {
            panic!("expected PhotoLoaded, got {response:?}");
        };
        assert_eq!(request_id, 9);
        assert!(data_uri.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn missing_file_reports_failure_with_id() {
        let mut worker = ContactsWorker::default();
        let response = worker.handle_message(WorkerMessage::ReadPhoto {
            request_id: 2,
            path: "/definitely/not/here.png".to_string(),
            trace_context: None,
        });

        assert!(matches!(response, WorkerResponse::PhotoFailed { request_id: 2, .. }));
    }

    #[test]
    fn failure_message_shows_host_path() {
        let mut worker = ContactsWorker::default();
        let response = worker.handle_message(WorkerMessage::read_photo(3, "/host/pics/cat.txt"));

        let WorkerResponse::PhotoFailed { message, .. } = response else {
            panic!("expected PhotoFailed, got {response:?}");
        };
        assert!(message.contains("/pics/cat.txt"));
        assert!(!message.contains("/host/"));
    }
}
