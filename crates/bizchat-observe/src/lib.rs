//! Observability for the Bizchat platform: tracing subscriber setup and
//! optional OpenTelemetry export.

pub mod tracing_setup;
