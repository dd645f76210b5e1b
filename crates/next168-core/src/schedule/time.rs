//! Wall-clock arithmetic on `HH:mm` strings.
//!
//! Times never wrap past midnight: an end time at or before the start time is
//! a negative or zero duration, which validation rejects.

/// Minutes since midnight for a strict `HH:mm` string.
///
/// Returns `None` unless the input is exactly two digits, a colon, and two
/// digits, with the hour at most 23 and the minute at most 59.
pub fn parse_time(time: &str) -> Option<u32> {
    let bytes = time.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }
    let digit = |b: u8| b.is_ascii_digit().then(|| u32::from(b - b'0'));
    let hours = digit(bytes[0])? * 10 + digit(bytes[1])?;
    let minutes = digit(bytes[3])? * 10 + digit(bytes[4])?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// `end - start` in minutes, or `None` if either side is malformed.
pub fn duration_minutes(start: &str, end: &str) -> Option<i32> {
    let start = parse_time(start)? as i32;
    let end = parse_time(end)? as i32;
    Some(end - start)
}

/// Half-open overlap test; touching intervals do not overlap.
pub fn intervals_overlap(s1: u32, e1: u32, s2: u32, e2: u32) -> bool {
    s1 < e2 && e1 > s2
}

/// Minutes to hours, rounded to two decimals.
pub fn minutes_to_hours(minutes: u64) -> f64 {
    (minutes as f64 / 60.0 * 100.0).round() / 100.0
}

/// Compact human form: `45m`, `2h`, `1h 30m`.
pub fn format_duration(minutes: u64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    match (hours, mins) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_fixed_width_times() {
        assert_eq!(parse_time("00:00"), Some(0));
        assert_eq!(parse_time("09:30"), Some(570));
        assert_eq!(parse_time("23:59"), Some(1439));
    }

    #[test]
    fn rejects_loose_formats() {
        for bad in [
            "9:30", "09:3", "24:00", "12:60", "12-30", "", "ab:cd", "09:30:00", " 9:30", "+1:30",
        ] {
            assert_eq!(parse_time(bad), None, "{bad:?} should be rejected");
        }
    }

    #[test]
    fn duration_does_not_wrap() {
        assert_eq!(duration_minutes("10:00", "09:00"), Some(-60));
        assert_eq!(duration_minutes("00:00", "23:59"), Some(1439));
        assert_eq!(duration_minutes("10:00", "10:00"), Some(0));
        assert_eq!(duration_minutes("10:00", "25:00"), None);
    }

    #[test]
    fn adjacent_intervals_do_not_overlap() {
        let nine = 9 * 60;
        let ten = 10 * 60;
        let eleven = 11 * 60;
        assert!(!intervals_overlap(nine, ten, ten, eleven));
        assert!(intervals_overlap(nine, ten + 1, ten, eleven));
        assert!(intervals_overlap(ten, eleven, nine, ten + 1));
    }

    #[test]
    fn hours_round_to_two_decimals() {
        assert_eq!(minutes_to_hours(90), 1.5);
        assert_eq!(minutes_to_hours(20), 0.33);
        assert_eq!(minutes_to_hours(0), 0.0);
    }

    #[test]
    fn formats_durations() {
        assert_eq!(format_duration(45), "45m");
        assert_eq!(format_duration(120), "2h");
        assert_eq!(format_duration(90), "1h 30m");
    }

    proptest! {
        #[test]
        fn every_valid_clock_time_round_trips(h in 0u32..24, m in 0u32..60) {
            let text = format!("{h:02}:{m:02}");
            prop_assert_eq!(parse_time(&text), Some(h * 60 + m));
        }

        #[test]
        fn parse_never_panics(input in "\\PC{0,8}") {
            let _ = parse_time(&input);
        }
    }
}
