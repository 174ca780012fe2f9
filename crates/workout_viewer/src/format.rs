//! Explicitly constructed display formatting.
//!
//! No shared formatter singletons: the formatting configuration is a plain
//! value the caller builds and passes in.

use chrono::{DateTime, TimeDelta, Utc};

#[derive(Clone, Debug)]
pub struct FormatConfig {
    /// Pattern for a span's opening timestamp.
    pub start_pattern: String,
    /// Pattern for a span's closing timestamp (same day, so time only).
    pub end_pattern: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            start_pattern: "%d %b %Y %H:%M:%S".to_owned(),
            end_pattern: "%H:%M:%S".to_owned(),
        }
    }
}

impl FormatConfig {
    /// "20 Aug 2026 10:00:00 - 11:00:00"
    pub fn span(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> String {
        format!(
            "{} - {}",
            start.format(&self.start_pattern),
            end.format(&self.end_pattern)
        )
    }

    /// Zero-padded "HH:MM:SS".
    pub fn duration(&self, duration: TimeDelta) -> String {
        let total = duration.num_seconds().max(0);
        let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
        format!("{h:02}:{m:02}:{s:02}")
    }

    /// Road-style distance: meters under a kilometer, kilometers with two
    /// decimals otherwise.
    pub fn distance(&self, meters: f64) -> String {
        let meters = meters.max(0.0);
        if meters < 1000.0 {
            format!("{meters:.0} m")
        } else {
            format!("{:.2} km", meters / 1000.0)
        }
    }

    /// Whole kilocalories.
    pub fn energy(&self, kcal: f64) -> String {
        format!("{:.0} kcal", kcal.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn span_uses_full_start_and_short_end() {
        let fmt = FormatConfig::default();
        let start = Utc.with_ymd_and_hms(2026, 8, 20, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 8, 20, 10, 40, 5).unwrap();
        assert_eq!(fmt.span(start, end), "20 Aug 2026 10:00:00 - 10:40:05");
    }

    #[test]
    fn duration_is_zero_padded() {
        let fmt = FormatConfig::default();
        assert_eq!(fmt.duration(TimeDelta::seconds(2405)), "00:40:05");
        assert_eq!(fmt.duration(TimeDelta::hours(26)), "26:00:00");
        assert_eq!(fmt.duration(TimeDelta::seconds(-3)), "00:00:00");
    }

    #[test]
    fn distance_switches_units_at_a_kilometer() {
        let fmt = FormatConfig::default();
        assert_eq!(fmt.distance(850.0), "850 m");
        assert_eq!(fmt.distance(10_000.0), "10.00 km");
        assert_eq!(fmt.distance(10_421.0), "10.42 km");
    }

    #[test]
    fn energy_rounds_to_whole_kcal() {
        let fmt = FormatConfig::default();
        assert_eq!(fmt.energy(600.4), "600 kcal");
        assert_eq!(fmt.energy(0.0), "0 kcal");
    }
}
