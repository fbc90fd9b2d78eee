//! Clock-string formatting and h/m/s parsing.

pub const MS_PER_SECOND: u64 = 1000;
pub const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;

const SECS_PER_HOUR: u64 = 3600;

/// Format a signed millisecond count. Negative input renders as zero.
pub fn format_time(ms: i64, show_centiseconds: bool) -> String {
    format_duration(ms.max(0) as u64, show_centiseconds)
}

/// Format milliseconds as "HH:MM:SS", or "HH:MM:SS.cc" with centiseconds.
/// Hours are not wrapped at 24.
pub fn format_duration(ms: u64, show_centiseconds: bool) -> String {
    let total_secs = ms / MS_PER_SECOND;
    let h = total_secs / SECS_PER_HOUR;
    let m = (total_secs % SECS_PER_HOUR) / 60;
    let s = total_secs % 60;
    if show_centiseconds {
        let cs = (ms % MS_PER_SECOND) / 10;
        format!("{:02}:{:02}:{:02}.{:02}", h, m, s, cs)
    } else {
        format!("{:02}:{:02}:{:02}", h, m, s)
    }
}

/// `((h * 3600) + (m * 60) + s) * 1000`, saturating instead of overflowing.
pub fn parse_to_ms(hours: u64, minutes: u64, seconds: u64) -> u64 {
    hours
        .saturating_mul(SECS_PER_HOUR)
        .saturating_add(minutes.saturating_mul(60))
        .saturating_add(seconds)
        .saturating_mul(MS_PER_SECOND)
}

/// Accepts 00:00:01 through 23:59:59.
pub fn validate(hours: i64, minutes: i64, seconds: i64) -> bool {
    if !(0..=23).contains(&hours) {
        return false;
    }
    if !(0..=59).contains(&minutes) || !(0..=59).contains(&seconds) {
        return false;
    }
    !(hours == 0 && minutes == 0 && seconds == 0)
}

/// Fraction of `total` already consumed, in `[0, 1]`.
pub fn progress(remaining_ms: u64, total_ms: u64) -> f32 {
    if total_ms == 0 {
        return 0.0;
    }
    let frac = 1.0 - remaining_ms as f64 / total_ms as f64;
    frac.clamp(0.0, 1.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0, false), "00:00:00");
        assert_eq!(format_duration(61_000, false), "00:01:01");
        assert_eq!(format_duration(3_661_000, false), "01:01:01");
        // hours keep counting past a day
        assert_eq!(format_duration(90_000_000, false), "25:00:00");
    }

    #[test]
    fn test_format_centiseconds() {
        assert_eq!(format_duration(0, true), "00:00:00.00");
        assert_eq!(format_duration(12_340, true), "00:00:12.34");
        assert_eq!(format_duration(999, true), "00:00:00.99");
        assert_eq!(format_duration(1_005, true), "00:00:01.00");
    }

    #[test]
    fn test_negative_formats_as_zero() {
        assert_eq!(format_time(-1, false), "00:00:00");
        assert_eq!(format_time(-5_000, true), "00:00:00.00");
        assert_eq!(format_time(65_430, true), "00:01:05.43");
    }

    #[test]
    fn test_parse_then_format() {
        for &(h, m, s) in &[(0, 0, 1), (1, 2, 3), (23, 59, 59), (12, 0, 30)] {
            let ms = parse_to_ms(h, m, s);
            assert_eq!(format_duration(ms, false), format!("{:02}:{:02}:{:02}", h, m, s));
        }
        assert_eq!(parse_to_ms(0, 10, 0), 600_000);
    }

    #[test]
    fn test_parse_has_no_upper_bound() {
        assert_eq!(parse_to_ms(100, 0, 0), 360_000_000);
        assert_eq!(parse_to_ms(u64::MAX, 0, 0), u64::MAX);
    }

    #[test]
    fn test_validate() {
        assert!(!validate(0, 0, 0));
        assert!(validate(0, 0, 1));
        assert!(validate(23, 59, 59));
        assert!(!validate(24, 0, 0));
        assert!(!validate(-1, 0, 0));
        assert!(!validate(0, 60, 0));
        assert!(!validate(0, 0, 60));
        assert!(!validate(0, -1, 5));
    }

    #[test]
    fn test_progress() {
        assert_eq!(progress(0, 0), 0.0);
        assert_eq!(progress(10_000, 10_000), 0.0);
        assert_eq!(progress(5_000, 10_000), 0.5);
        assert_eq!(progress(0, 10_000), 1.0);
        assert_eq!(progress(20_000, 10_000), 0.0);
    }
}
