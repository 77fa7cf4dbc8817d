//! Tracing subscriber setup.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "zcontacts";
const TRACE_FILE: &str = "zcontacts-trace.jsonl";

/// Installs the global subscriber: an [`EnvFilter`] built from
/// `config.trace_level` (default `info`) feeding an OpenTelemetry layer that
/// exports spans to `<data_dir>/zcontacts-trace.jsonl`.
///
/// Only the first call in a process installs anything. If the data
/// directory cannot be created, tracing stays off and the plugin runs
/// normally.
///
/// ```rust
/// use zcontacts::observability::init_tracing;
/// use zcontacts::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     data_dir: std::env::temp_dir().join("zcontacts-doc"),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    if std::fs::create_dir_all(&config.data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = exporter::create_tracer_provider(config.data_dir.join(TRACE_FILE), resource);
    let tracer = provider.tracer(SERVICE_NAME);

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(tracer))
        .try_init();
}
