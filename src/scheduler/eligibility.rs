//! Pure due-ness predicates for reminder delivery.
//!
//! Every function takes `now` as a parameter so tests drive them with
//! constructed timestamps instead of the real clock. All comparisons use
//! local wall-clock time.

use chrono::{DateTime, Datelike, Local, NaiveDate, Weekday};

use crate::scheduler::category::Cadence;

/// True when the current local `HH:MM` equals the first five characters of
/// `target`.
///
/// The match window is a single minute: a pass that lands in any other
/// minute misses the period entirely, there is no backfill. Targets shorter
/// than five characters are compared whole and never match a well-formed
/// clock string.
#[must_use]
pub fn minute_matches(now: DateTime<Local>, target: &str) -> bool {
    let target = target.get(..5).unwrap_or(target);
    now.format("%H:%M").to_string() == target
}

/// True when the recency rule for `cadence` allows a delivery at `now`,
/// given the timestamp of the last recorded delivery (if any).
///
/// Daily: the last delivery must not fall on the same local calendar day.
/// Weekly: `now` must be a Monday and the last delivery must fall before
/// the Monday of the current week (local calendar dates).
#[must_use]
pub fn cadence_satisfied(
    cadence: Cadence,
    last_sent: Option<DateTime<Local>>,
    now: DateTime<Local>,
) -> bool {
    match cadence {
        Cadence::Daily => last_sent.is_none_or(|last| last.date_naive() != now.date_naive()),
        Cadence::Weekly => {
            if now.weekday() != Weekday::Mon {
                return false;
            }
            last_sent.is_none_or(|last| last.date_naive() < most_recent_monday(now))
        }
    }
}

/// Local calendar date of the Monday of `now`'s week.
fn most_recent_monday(now: DateTime<Local>) -> NaiveDate {
    let today = now.date_naive();
    today - chrono::Duration::days(i64::from(today.weekday().num_days_from_monday()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use chrono::TimeZone;

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    // 2026-08-17 is a Monday; 2026-08-18 a Tuesday.

    #[test]
    fn minute_matches_exact_minute_any_second() {
        let now = local(2026, 8, 18, 9, 0, 42);
        assert!(minute_matches(now, "09:00"));
    }

    #[test]
    fn minute_matches_rejects_adjacent_minute() {
        let now = local(2026, 8, 18, 9, 1, 0);
        assert!(!minute_matches(now, "09:00"));
    }

    #[test]
    fn minute_matches_uses_first_five_chars_of_longer_target() {
        let now = local(2026, 8, 18, 9, 0, 0);
        assert!(minute_matches(now, "09:00:00"));
    }

    #[test]
    fn minute_matches_requires_zero_padding() {
        let now = local(2026, 8, 18, 9, 0, 0);
        assert!(!minute_matches(now, "9:00"));
    }

    #[test]
    fn minute_matches_early_morning_is_zero_padded() {
        let now = local(2026, 8, 18, 7, 5, 0);
        assert!(minute_matches(now, "07:05"));
    }

    #[test]
    fn daily_allows_first_delivery() {
        let now = local(2026, 8, 18, 9, 0, 0);
        assert!(cadence_satisfied(Cadence::Daily, None, now));
    }

    #[test]
    fn daily_blocks_same_calendar_day() {
        let now = local(2026, 8, 18, 9, 0, 0);
        let earlier_today = local(2026, 8, 18, 6, 15, 0);
        assert!(!cadence_satisfied(Cadence::Daily, Some(earlier_today), now));
    }

    #[test]
    fn daily_blocks_even_when_clock_moved_backward() {
        // Ledger holds a timestamp later in the same day than "now".
        let now = local(2026, 8, 18, 9, 0, 0);
        let later_today = local(2026, 8, 18, 11, 30, 0);
        assert!(!cadence_satisfied(Cadence::Daily, Some(later_today), now));
    }

    #[test]
    fn daily_allows_next_calendar_day() {
        let now = local(2026, 8, 18, 9, 0, 0);
        let yesterday = local(2026, 8, 17, 9, 0, 0);
        assert!(cadence_satisfied(Cadence::Daily, Some(yesterday), now));
    }

    #[test]
    fn weekly_never_fires_off_monday() {
        let tuesday = local(2026, 8, 18, 10, 0, 0);
        assert!(!cadence_satisfied(Cadence::Weekly, None, tuesday));
        let sunday = local(2026, 8, 16, 10, 0, 0);
        assert!(!cadence_satisfied(Cadence::Weekly, None, sunday));
    }

    #[test]
    fn weekly_allows_first_monday_delivery() {
        let monday = local(2026, 8, 17, 10, 0, 0);
        assert!(cadence_satisfied(Cadence::Weekly, None, monday));
    }

    #[test]
    fn weekly_blocks_second_delivery_same_monday() {
        let monday = local(2026, 8, 17, 10, 0, 0);
        let earlier = local(2026, 8, 17, 9, 0, 0);
        assert!(!cadence_satisfied(Cadence::Weekly, Some(earlier), monday));
    }

    #[test]
    fn weekly_allows_delivery_recorded_last_week() {
        let monday = local(2026, 8, 17, 10, 0, 0);
        let previous_monday = local(2026, 8, 10, 10, 0, 0);
        assert!(cadence_satisfied(
            Cadence::Weekly,
            Some(previous_monday),
            monday
        ));
    }

    #[test]
    fn weekly_sunday_delivery_belongs_to_previous_week() {
        // A ledger entry from Sunday night is before Monday 00:00, so the
        // Monday delivery still fires.
        let monday = local(2026, 8, 17, 10, 0, 0);
        let sunday_night = local(2026, 8, 16, 23, 55, 0);
        assert!(cadence_satisfied(
            Cadence::Weekly,
            Some(sunday_night),
            monday
        ));
    }

    #[test]
    fn most_recent_monday_on_a_monday_is_today() {
        let monday = local(2026, 8, 17, 10, 0, 0);
        assert_eq!(most_recent_monday(monday), monday.date_naive());
    }

    #[test]
    fn most_recent_monday_mid_week() {
        let thursday = local(2026, 8, 20, 12, 0, 0);
        assert_eq!(
            most_recent_monday(thursday),
            NaiveDate::from_ymd_opt(2026, 8, 17).unwrap()
        );
    }

    #[test]
    fn most_recent_monday_on_sunday_is_six_days_back() {
        let sunday = local(2026, 8, 23, 12, 0, 0);
        assert_eq!(
            most_recent_monday(sunday),
            NaiveDate::from_ymd_opt(2026, 8, 17).unwrap()
        );
    }
}
