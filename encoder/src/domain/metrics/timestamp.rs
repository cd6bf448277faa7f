//! Textual rendering of data point timestamps

use std::fmt;

use super::point::DataPoint;

/// How the `ts` field of a record is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimestampFormat {
    /// Current timestamp in nanoseconds since the epoch, e.g. `1756975296124471296`
    #[default]
    Current,
    /// Start and current timestamps separated by one space
    Range,
}

impl fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampFormat::Current => write!(f, "current"),
            TimestampFormat::Range => write!(f, "range"),
        }
    }
}

/// Render a point's timestamp. Nanoseconds are unsigned decimal, unpadded.
pub fn format_timestamp<P: DataPoint>(point: &P, format: TimestampFormat) -> String {
    match format {
        TimestampFormat::Current => point.current_nanos().to_string(),
        TimestampFormat::Range => format!("{} {}", point.start_nanos(), point.current_nanos()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry_proto::tonic::metrics::v1::{NumberDataPoint, SummaryDataPoint};

    #[test]
    fn test_format_current_timestamp() {
        let dp = NumberDataPoint {
            time_unix_nano: 1_756_975_296_124_471_296,
            start_time_unix_nano: 1_756_975_000_000_000_000,
            ..Default::default()
        };
        assert_eq!(
            format_timestamp(&dp, TimestampFormat::Current),
            "1756975296124471296"
        );
    }

    #[test]
    fn test_format_range_timestamp() {
        let dp = SummaryDataPoint {
            time_unix_nano: 2_000,
            start_time_unix_nano: 1_000,
            ..Default::default()
        };
        assert_eq!(format_timestamp(&dp, TimestampFormat::Range), "1000 2000");
    }

    #[test]
    fn test_format_zero_timestamp() {
        let dp = NumberDataPoint::default();
        assert_eq!(format_timestamp(&dp, TimestampFormat::Current), "0");
        assert_eq!(format_timestamp(&dp, TimestampFormat::Range), "0 0");
    }

    #[test]
    fn test_format_max_timestamp_is_unsigned() {
        let dp = NumberDataPoint {
            time_unix_nano: u64::MAX,
            ..Default::default()
        };
        assert_eq!(
            format_timestamp(&dp, TimestampFormat::Current),
            "18446744073709551615"
        );
    }
}
