use metrics::{counter, histogram};
use std::time::Duration;

pub const REQUESTS_TOTAL: &str = "onfido_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "onfido_request_duration_seconds";

/// Status label for a 2xx response whose body could not be read or decoded.
pub const DECODE_ERROR: &str = "decode_error";

/// Record one API call. `status` is the HTTP status code, `"error"` when
/// no response was received, or [`DECODE_ERROR`].
pub fn record_request(operation: &'static str, status: &str, elapsed: Duration) {
    let labels = [
        ("operation", operation.to_string()),
        ("status", status.to_string()),
    ];

    counter!(REQUESTS_TOTAL, &labels).increment(1);
    histogram!(REQUEST_DURATION_SECONDS, &labels).record(elapsed.as_secs_f64());
}
