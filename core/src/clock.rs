//! Match countdown logic.
//!
//! Remaining time is recomputed from the fixed start timestamp on every
//! tick rather than decremented, so the clock cannot drift no matter how
//! irregularly the host timer fires.

/// Countdown threshold below which the UI highlights the timer.
pub const CLOSING_STAGE_SECS: i64 = 300;

/// Whole seconds elapsed since the match started. Never negative.
pub fn elapsed_seconds(start_time_ms: i64, now_ms: i64) -> i64 {
    ((now_ms - start_time_ms) / 1000).max(0)
}

/// Whole seconds left in the match. Floors at 0 and never goes negative;
/// monotonically non-increasing as `now_ms` advances.
pub fn remaining_seconds(start_time_ms: i64, duration_minutes: i32, now_ms: i64) -> i64 {
    let total = i64::from(duration_minutes) * 60;
    (total - elapsed_seconds(start_time_ms, now_ms)).max(0)
}

/// True once the countdown is inside its final five minutes.
pub fn in_closing_stage(remaining_secs: i64) -> bool {
    remaining_secs < CLOSING_STAGE_SECS
}

/// Format a second count as `"MM:SS"`, or `"H:MM:SS"` from one hour up.
pub fn format_clock(total_seconds: i64) -> String {
    let total_seconds = total_seconds.max(0);
    let hrs = total_seconds / 3600;
    let mins = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    if hrs > 0 {
        format!("{hrs}:{mins:02}:{secs:02}")
    } else {
        format!("{mins:02}:{secs:02}")
    }
}

/// Format a minute count as `"45m"`, `"2h"` or `"2h 30m"`.
pub fn format_duration(total_minutes: i64) -> String {
    let total_minutes = total_minutes.max(0);
    let hrs = total_minutes / 60;
    let mins = total_minutes % 60;
    if hrs > 0 {
        if mins > 0 {
            format!("{hrs}h {mins}m")
        } else {
            format!("{hrs}h")
        }
    } else {
        format!("{mins}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_remaining_counts_down_from_full_duration() {
        let start = 1_700_000_000_000;
        assert_eq!(remaining_seconds(start, 5, start), 300);
        assert_eq!(remaining_seconds(start, 5, start + 1_000), 299);
        assert_eq!(remaining_seconds(start, 5, start + 299_000), 1);
        assert_eq!(remaining_seconds(start, 5, start + 300_000), 0);
    }

    #[test]
    fn test_remaining_floors_at_zero() {
        let start = 1_700_000_000_000;
        assert_eq!(remaining_seconds(start, 5, start + 301_000), 0);
        assert_eq!(remaining_seconds(start, 5, start + 86_400_000), 0);
    }

    #[test]
    fn test_clock_before_start_is_inert() {
        let start = 1_700_000_000_000;
        assert_eq!(elapsed_seconds(start, start - 5_000), 0);
        assert_eq!(remaining_seconds(start, 5, start - 5_000), 300);
    }

    #[test]
    fn test_closing_stage_threshold() {
        assert!(!in_closing_stage(300));
        assert!(in_closing_stage(299));
        assert!(in_closing_stage(0));
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(300), "05:00");
        assert_eq!(format_clock(3_665), "1:01:05");
        assert_eq!(format_clock(-10), "00:00");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(45), "45m");
        assert_eq!(format_duration(120), "2h");
        assert_eq!(format_duration(150), "2h 30m");
        assert_eq!(format_duration(0), "0m");
    }

    proptest! {
        #[test]
        fn prop_remaining_is_monotonically_non_increasing(
            start in 0i64..2_000_000_000_000,
            duration in 1i32..1_440,
            t1 in 0i64..200_000_000,
            dt in 0i64..200_000_000,
        ) {
            let r1 = remaining_seconds(start, duration, start + t1);
            let r2 = remaining_seconds(start, duration, start + t1 + dt);
            prop_assert!(r2 <= r1);
            prop_assert!(r2 >= 0);
        }
    }
}
