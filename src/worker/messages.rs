//! Worker thread message types for cross-thread communication.
//!
//! This module defines the request and response protocol between the plugin
//! thread and the background worker that reads photo files. It also carries
//! the tracing context across the thread boundary so worker spans join the
//! trace of the key press that requested them.

use crate::domain::error::{ContactsError, Result};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span has no valid OpenTelemetry context,
    /// for instance when tracing is not initialized.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            let trace_id = format!("{:032x}", span_context.trace_id());
            let parent_span_id = format!("{:016x}", span_context.span_id());

            tracing::trace!(trace_id = %trace_id, parent_span_id = %parent_span_id, "capturing trace context");

            Some(Self {
                trace_id,
                parent_span_id,
            })
        } else {
            None
        }
    }
}

/// Messages sent from the plugin thread to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Read an image file and encode it as a data URI.
    ReadPhoto {
        /// Sequence number; only the latest one is accepted by the form.
        request_id: u64,

        /// Path to the image, already resolved into the sandbox.
        path: String,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none", default)]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Creates a `ReadPhoto` message with the current trace context.
    #[must_use]
    pub fn read_photo(request_id: u64, path: impl Into<String>) -> Self {
        Self::ReadPhoto {
            request_id,
            path: path.into(),
            trace_context: TraceContext::from_current(),
        }
    }

    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::ReadPhoto { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker thread back to the plugin thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The photo was read and encoded.
    PhotoLoaded {
        request_id: u64,
        data_uri: String,
    },

    /// The photo could not be read.
    PhotoFailed {
        request_id: u64,
        message: String,
    },

    /// The worker could not process the message at all.
    Error {
        /// Human-readable error message.
        message: String,
    },
}

impl WorkerResponse {
    /// Decodes a response received as a custom message payload.
    ///
    /// # Errors
    ///
    /// Returns [`ContactsError::Worker`] if the payload is not a response.
    pub fn from_payload(payload: &str) -> Result<Self> {
        serde_json::from_str(payload)
            .map_err(|e| ContactsError::Worker(format!("invalid worker response: {e}")))
    }
}
