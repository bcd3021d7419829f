use chrono::{DateTime, Local, NaiveDateTime, Utc};

/// Parse a `date_generated` value from the service. The service stores
/// timestamps without a timezone designator; they are UTC. RFC 3339 input is
/// accepted too in case the service ever starts sending offsets.
pub fn parse_server_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    None
}

/// Render a server timestamp in the viewer's local zone, "-" when absent or
/// unparseable.
pub fn format_local(raw: Option<&str>) -> String {
    raw.and_then(parse_server_timestamp)
        .map(|utc| utc.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naive_timestamps_are_utc() {
        let naive = parse_server_timestamp("2025-03-01T14:30:00").unwrap();
        let explicit = parse_server_timestamp("2025-03-01T14:30:00Z").unwrap();
        assert_eq!(naive, explicit);
    }

    #[test]
    fn space_separator_and_fraction() {
        let a = parse_server_timestamp("2025-03-01 14:30:00").unwrap();
        let b = parse_server_timestamp("2025-03-01T14:30:00.000000").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn offsets_are_normalized() {
        let plus_two = parse_server_timestamp("2025-03-01T16:30:00+02:00").unwrap();
        let utc = parse_server_timestamp("2025-03-01T14:30:00").unwrap();
        assert_eq!(plus_two, utc);
    }

    #[test]
    fn junk_is_rejected() {
        assert!(parse_server_timestamp("").is_none());
        assert!(parse_server_timestamp("yesterday").is_none());
        assert_eq!(format_local(None), "-");
        assert_eq!(format_local(Some("yesterday")), "-");
    }
}
