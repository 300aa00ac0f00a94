//! Availability API response parsing.

use serde_json::Value;

use super::types::AvailabilitySignal;

/// Extracts the closest-snapshot signal from an availability response.
///
/// Expected shape: `{"archived_snapshots": {"closest": {"available": true,
/// "timestamp": "20200101000000", ...}}}`. A missing or empty `closest` entry,
/// or no response at all, yields `has_snapshot = false`.
pub(crate) fn parse_availability(response: Option<&Value>) -> AvailabilitySignal {
    let closest = response
        .and_then(|body| body.get("archived_snapshots"))
        .and_then(|snapshots| snapshots.get("closest"))
        .and_then(Value::as_object)
        .filter(|closest| !closest.is_empty());

    let Some(closest) = closest else {
        return AvailabilitySignal::default();
    };

    AvailabilitySignal {
        has_snapshot: closest
            .get("available")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        availability_ts: closest
            .get("timestamp")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_closest_available() {
        let body = json!({
            "url": "example.com",
            "archived_snapshots": {
                "closest": {
                    "status": "200",
                    "available": true,
                    "url": "http://web.archive.org/web/20240101000000/http://example.com/",
                    "timestamp": "20240101000000"
                }
            }
        });
        let signal = parse_availability(Some(&body));
        assert!(signal.has_snapshot);
        assert_eq!(signal.availability_ts.as_deref(), Some("20240101000000"));
    }

    #[test]
    fn test_closest_not_available_keeps_timestamp() {
        let body = json!({
            "archived_snapshots": {"closest": {"available": false, "timestamp": "20100101000000"}}
        });
        let signal = parse_availability(Some(&body));
        assert!(!signal.has_snapshot);
        assert_eq!(signal.availability_ts.as_deref(), Some("20100101000000"));
    }

    #[test]
    fn test_no_closest_entry() {
        let body = json!({"url": "nothing.example", "archived_snapshots": {}});
        assert_eq!(parse_availability(Some(&body)), AvailabilitySignal::default());
    }

    #[test]
    fn test_empty_closest_entry() {
        let body = json!({"archived_snapshots": {"closest": {}}});
        assert_eq!(parse_availability(Some(&body)), AvailabilitySignal::default());
    }

    #[test]
    fn test_failed_fetch() {
        let signal = parse_availability(None);
        assert!(!signal.has_snapshot);
        assert!(signal.availability_ts.is_none());
    }

    #[test]
    fn test_unexpected_shape() {
        let body = json!(["not", "an", "object"]);
        assert_eq!(parse_availability(Some(&body)), AvailabilitySignal::default());
    }
}
