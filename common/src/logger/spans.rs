use tracing::{Level, Span};

use super::TraceId;

/// Root span for one tracking session. Everything the session logs inherits
/// the trace id and asset id.
pub fn session_span(asset_id: &str, trace_id: &TraceId) -> Span {
    tracing::span!(
        Level::INFO,
        "tracking_session",
        trace_id = %trace_id,
        asset_id = %asset_id
    )
}

/// Create a child span (inherits trace_id automatically)
pub fn child_span(name: &'static str) -> Span {
    tracing::span!(Level::INFO, "step", name = name)
}
