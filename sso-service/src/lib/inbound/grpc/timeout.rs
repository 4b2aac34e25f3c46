use std::time::Duration;

use tonic::metadata::MetadataMap;

use crate::domain::auth::context::CallContext;

const GRPC_TIMEOUT_HEADER: &str = "grpc-timeout";

/// Build the call context for a request.
///
/// The client's `grpc-timeout` wins; requests without one get `default_timeout`.
pub fn call_context(metadata: &MetadataMap, default_timeout: Duration) -> CallContext {
    let timeout = metadata
        .get(GRPC_TIMEOUT_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_grpc_timeout)
        .unwrap_or(default_timeout);

    CallContext::with_timeout(timeout)
}

/// Parse a `grpc-timeout` value: at most 8 ASCII digits followed by a unit
/// (`H`, `M`, `S`, `m`, `u`, `n`).
fn parse_grpc_timeout(value: &str) -> Option<Duration> {
    if value.len() < 2 || value.len() > 9 {
        return None;
    }

    let (digits, unit) = value.split_at(value.len() - 1);
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let amount: u64 = digits.parse().ok()?;

    match unit {
        "H" => Some(Duration::from_secs(amount * 60 * 60)),
        "M" => Some(Duration::from_secs(amount * 60)),
        "S" => Some(Duration::from_secs(amount)),
        "m" => Some(Duration::from_millis(amount)),
        "u" => Some(Duration::from_micros(amount)),
        "n" => Some(Duration::from_nanos(amount)),
        _ => None,
    }
}
