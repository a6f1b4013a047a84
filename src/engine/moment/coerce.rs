use tracing::trace;

use crate::engine::types::ScalarValue;

/// Coerces a stored value into a double.
///
/// Absent values and values that do not parse as a number both come back as
/// `None`; dirty data never aborts an aggregation.
pub fn coerce(raw: &ScalarValue) -> Option<f64> {
    match raw {
        ScalarValue::Null => None,
        ScalarValue::Utf8(text) => parse_number(text),
        ScalarValue::Binary(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => parse_number(text),
            Err(_) => {
                trace!(target: "moment_agg::coerce", len = bytes.len(), "Dropping non-UTF-8 value");
                None
            }
        },
        ScalarValue::Boolean(b) => {
            trace!(target: "moment_agg::coerce", value = b, "Dropping non-numeric value");
            None
        }
        numeric => numeric.as_f64(),
    }
}

fn parse_number(text: &str) -> Option<f64> {
    match text.trim().parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            trace!(target: "moment_agg::coerce", value = %text, "Dropping malformed value");
            None
        }
    }
}
