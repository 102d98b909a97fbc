use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Re-export tracing macros for convenience
pub use tracing::{debug, error, info, instrument, span, trace, warn, Level, Span};

/// Initialize the tracing system
///
/// Output always goes to stderr: stdout carries the JSON-RPC stream when
/// running as an MCP server. The filter comes from `RUST_LOG` and defaults
/// to `info`.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Check if stderr is attached to a terminal
fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}

/// Create a span for one script invocation, covering all of its attempts
pub fn script_span(script: &str) -> Span {
    span!(Level::DEBUG, "script", script = %script)
}

/// Create a span for a compound request
pub fn batch_span(operation: &str, total: usize) -> Span {
    span!(Level::INFO, "batch", operation = %operation, total = %total)
}

/// Emit a structured event for a finished batch
pub fn batch_completed(operation: &str, succeeded: usize, failed: usize, skipped: usize) {
    if failed == 0 {
        info!(
            operation = %operation,
            succeeded = %succeeded,
            skipped = %skipped,
            "batch_completed"
        );
    } else {
        warn!(
            operation = %operation,
            succeeded = %succeeded,
            failed = %failed,
            skipped = %skipped,
            "batch_completed_with_failures"
        );
    }
}

/// Emit a structured event for cache lookups
pub fn cache_event(key: &str, hit: bool) {
    if hit {
        debug!(key = %key, "cache_hit");
    } else {
        debug!(key = %key, "cache_miss");
    }
}
