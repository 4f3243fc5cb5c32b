//! Observability for Folksonomy: structured logging with optional
//! OpenTelemetry span export.

pub mod tracing_setup;

/// Environment variable that turns on OpenTelemetry export when set to `1`.
pub const OTEL_ENV: &str = "FOLKSONOMY_OTEL";

/// Whether `FOLKSONOMY_OTEL=1` is set.
pub fn otel_requested() -> bool {
    std::env::var(OTEL_ENV).is_ok_and(|v| v == "1")
}
