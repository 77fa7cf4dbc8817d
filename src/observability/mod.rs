//! OpenTelemetry tracing with file-based span export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → JsonLinesExporter → RotatingFile
//! ```
//!
//! Spans land in `zcontacts-trace.jsonl` inside the data directory, one JSON
//! object per line. The file rotates into `.1`, `.2`, `.3` as it fills.
//!
//! The level comes from the `trace_level` plugin option (an `EnvFilter`
//! directive such as `debug` or `zcontacts=trace`), defaulting to `info`.
//! The photo worker runs in its own instance and initializes tracing there;
//! its spans join the plugin's trace through the propagated context carried
//! in each [`WorkerMessage`](crate::worker::WorkerMessage).
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`exporter`]: JSON lines span exporter and tracer provider
//! - [`log_file`]: Size-rotated append-only file

mod exporter;
mod init;
mod log_file;

pub use init::init_tracing;
