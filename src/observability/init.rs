//! Tracing subscriber setup.

use super::tracer;
use crate::infrastructure::{get_data_dir, strip_host_prefix};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the trace file inside the data directory.
pub const TRACE_FILE_NAME: &str = "atlasphere-otlp.json";

/// Installs the global subscriber: an [`EnvFilter`] at `level` feeding an
/// OpenTelemetry layer that exports to the trace file.
///
/// `level` uses `EnvFilter` directive syntax (`"info"`,
/// `"atlasphere=debug"`). Tracing is optional: if the data directory cannot
/// be created nothing is installed, and calling this twice keeps the first
/// subscriber.
///
/// # Example
///
/// ```rust,no_run
/// use atlasphere::observability::init_tracing;
///
/// init_tracing("debug");
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(level: &str) {
    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", "Atlasphere"),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let trace_file = data_dir.join(TRACE_FILE_NAME);
    let provider = tracer::file_tracer_provider(trace_file.clone(), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer("Atlasphere"));

    let installed = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(
            trace_file = %strip_host_prefix(&trace_file.to_string_lossy()),
            level,
            "tracing initialized"
        );
    }
}
