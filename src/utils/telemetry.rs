use std::io;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

/// Installs the global tracing subscriber for the host application. The
/// returned guard must be held for the lifetime of the process or buffered
/// log lines are lost.
pub fn init_telemetry(app_name: &str) -> WorkerGuard {
    LogTracer::init().expect("Unable to setup log tracer");

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(io::stdout());
    let bunyan_formatting_layer =
        BunyanFormattingLayer::new(app_name.to_string(), non_blocking_writer);
    let subscriber = Registry::default()
        .with(EnvFilter::new("INFO"))
        .with(JsonStorageLayer)
        .with(bunyan_formatting_layer);

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to install `tracing` subscriber.");

    guard
}
