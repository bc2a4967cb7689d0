//! # Timeline Calculator
//!
//! Derives elapsed gestational time, the due date and progress from an
//! anchor date and a reference ("as-of") date. The reference date is always
//! an explicit parameter; "today" is the caller's concern.
//!
//! ## Formulas
//!
//! ```text
//! elapsed_days        = as_of - anchor            (whole days, must be >= 0)
//! current_week        = elapsed_days div 7
//! current_day_of_week = elapsed_days mod 7
//! due date            = anchor + 280
//! percent_complete    = clamp(elapsed_days / 280 * 100, 0, 100)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use gestation_core::timeline::Timeline;
//!
//! let anchor = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let as_of = NaiveDate::from_ymd_opt(2024, 1, 22).unwrap();
//! let timeline = Timeline::calculate(anchor, as_of).unwrap();
//!
//! assert_eq!(timeline.current_week, 3);
//! assert_eq!(timeline.current_day_of_week, 0);
//! assert_eq!(timeline.projected_completion_date, NaiveDate::from_ymd_opt(2024, 10, 7).unwrap());
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::{days_between, round_to, shift_days, GestationalAge, DAYS_PER_WEEK, GESTATION_LENGTH_DAYS};
use crate::errors::{DatingError, DatingResult};

/// Start of early term (37w 0d)
pub const EARLY_TERM_DAYS: i64 = 37 * DAYS_PER_WEEK;

/// Start of full term (39w 0d)
pub const FULL_TERM_DAYS: i64 = 39 * DAYS_PER_WEEK;

/// Last day of late term (41w 6d)
pub const LATE_TERM_END_DAYS: i64 = 42 * DAYS_PER_WEEK - 1;

/// Calendar window in which delivery counts as term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermWindow {
    /// First day of early term (37w 0d)
    pub early_term_start: NaiveDate,
    /// First day of full term (39w 0d)
    pub full_term_start: NaiveDate,
    /// Last day of late term (41w 6d)
    pub late_term_end: NaiveDate,
}

impl TermWindow {
    /// Compute the term window for an anchor date.
    pub fn from_anchor(anchor_date: NaiveDate) -> DatingResult<Self> {
        Ok(TermWindow {
            early_term_start: days_after_anchor(anchor_date, EARLY_TERM_DAYS)?,
            full_term_start: days_after_anchor(anchor_date, FULL_TERM_DAYS)?,
            late_term_end: days_after_anchor(anchor_date, LATE_TERM_END_DAYS)?,
        })
    }

    /// Whether `date` falls inside the window (inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.early_term_start..=self.late_term_end).contains(&date)
    }
}

/// Elapsed time and progress for one anchor date at one reference date.
///
/// ## JSON Example
///
/// ```json
/// {
///   "anchor_date": "2024-01-01",
///   "as_of": "2024-01-22",
///   "elapsed_days": 21,
///   "current_week": 3,
///   "current_day_of_week": 0,
///   "projected_completion_date": "2024-10-07",
///   "days_until_completion": 259,
///   "percent_complete": 7.5,
///   "term_window": { "early_term_start": "2024-09-16", "full_term_start": "2024-09-30", "late_term_end": "2024-10-20" }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    /// Day 0 of the gestation
    pub anchor_date: NaiveDate,

    /// Reference date the timeline was computed for
    pub as_of: NaiveDate,

    /// Whole days since the anchor date (never negative)
    pub elapsed_days: i64,

    /// Completed gestational weeks
    pub current_week: u32,

    /// Days into the current week, 0-6
    pub current_day_of_week: u32,

    /// Estimated due date: anchor + 280 days
    pub projected_completion_date: NaiveDate,

    /// Days left until the due date (negative once past it)
    pub days_until_completion: i64,

    /// Progress toward the due date, 0-100, unrounded
    pub percent_complete: f64,

    /// Term delivery window
    pub term_window: TermWindow,
}

impl Timeline {
    /// Compute the timeline for `anchor_date` as of `as_of`.
    ///
    /// # Errors
    ///
    /// * `InvalidTimeline` - `anchor_date` is after `as_of`
    /// * `OutOfRange` - the due date falls outside the representable calendar
    pub fn calculate(anchor_date: NaiveDate, as_of: NaiveDate) -> DatingResult<Timeline> {
        let elapsed_days = days_between(anchor_date, as_of);
        if elapsed_days < 0 {
            log::warn!("Rejecting timeline: anchor {} is after {}", anchor_date, as_of);
            return Err(DatingError::invalid_timeline(anchor_date, as_of));
        }

        let age = GestationalAge::from_days(elapsed_days);
        let projected_completion_date = days_after_anchor(anchor_date, GESTATION_LENGTH_DAYS)?;
        let days_until_completion = days_between(as_of, projected_completion_date);
        let percent_complete =
            (elapsed_days as f64 / GESTATION_LENGTH_DAYS as f64 * 100.0).clamp(0.0, 100.0);

        let timeline = Timeline {
            anchor_date,
            as_of,
            elapsed_days,
            current_week: age.weeks,
            current_day_of_week: age.days,
            projected_completion_date,
            days_until_completion,
            percent_complete,
            term_window: TermWindow::from_anchor(anchor_date)?,
        };

        log::debug!(
            "Timeline as of {}: {} ({:.1}%), due {}",
            as_of,
            timeline.gestational_age(),
            percent_complete,
            projected_completion_date
        );
        Ok(timeline)
    }

    /// Elapsed time as weeks + days
    pub fn gestational_age(&self) -> GestationalAge {
        GestationalAge {
            weeks: self.current_week,
            days: self.current_day_of_week,
        }
    }

    /// Percent complete rounded to one decimal place, for display
    pub fn percent_complete_display(&self) -> f64 {
        round_to(self.percent_complete, 1)
    }

    /// Whether the reference date is past the due date
    pub fn is_past_due(&self) -> bool {
        self.days_until_completion < 0
    }
}

fn days_after_anchor(anchor_date: NaiveDate, days: i64) -> DatingResult<NaiveDate> {
    shift_days(anchor_date, days).ok_or_else(|| {
        DatingError::out_of_range(
            "anchor_date",
            anchor_date.to_string(),
            "Due date falls outside the supported calendar range",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_lmp_scenario() {
        let timeline = Timeline::calculate(date(2024, 1, 1), date(2024, 1, 22)).unwrap();
        assert_eq!(timeline.elapsed_days, 21);
        assert_eq!(timeline.current_week, 3);
        assert_eq!(timeline.current_day_of_week, 0);
        assert_eq!(timeline.projected_completion_date, date(2024, 10, 7));
        assert_eq!(timeline.days_until_completion, 259);
        assert!((timeline.percent_complete - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_same_day_is_day_zero() {
        let timeline = Timeline::calculate(date(2024, 1, 1), date(2024, 1, 1)).unwrap();
        assert_eq!(timeline.elapsed_days, 0);
        assert_eq!(timeline.current_week, 0);
        assert_eq!(timeline.current_day_of_week, 0);
        assert_eq!(timeline.percent_complete, 0.0);
        assert_eq!(timeline.days_until_completion, 280);
    }

    #[test]
    fn test_future_anchor_rejected_not_clamped() {
        let err = Timeline::calculate(date(2024, 2, 1), date(2024, 1, 31)).unwrap_err();
        assert_eq!(
            err,
            DatingError::InvalidTimeline {
                anchor_date: date(2024, 2, 1),
                as_of: date(2024, 1, 31),
            }
        );
    }

    #[test]
    fn test_past_due_clamps_percent_only() {
        let timeline = Timeline::calculate(date(2024, 1, 1), date(2024, 10, 17)).unwrap();
        assert_eq!(timeline.elapsed_days, 290);
        assert_eq!(timeline.current_week, 41);
        assert_eq!(timeline.current_day_of_week, 3);
        assert_eq!(timeline.days_until_completion, -10);
        assert_eq!(timeline.percent_complete, 100.0);
        assert!(timeline.is_past_due());
    }

    #[test]
    fn test_percent_display_rounding() {
        // 100 / 280 = 35.714...
        let timeline = Timeline::calculate(date(2024, 1, 1), date(2024, 4, 10)).unwrap();
        assert_eq!(timeline.elapsed_days, 100);
        assert_eq!(timeline.percent_complete_display(), 35.7);
        assert!(timeline.percent_complete > 35.71 && timeline.percent_complete < 35.72);
    }

    #[test]
    fn test_term_window() {
        let window = TermWindow::from_anchor(date(2024, 1, 1)).unwrap();
        assert_eq!(window.early_term_start, date(2024, 9, 16));
        assert_eq!(window.full_term_start, date(2024, 9, 30));
        assert_eq!(window.late_term_end, date(2024, 10, 20));
        assert!(window.contains(date(2024, 10, 7)));
        assert!(!window.contains(date(2024, 9, 15)));
        assert!(!window.contains(date(2024, 10, 21)));
    }

    #[test]
    fn test_gestational_age_accessor() {
        let timeline = Timeline::calculate(date(2024, 1, 1), date(2024, 3, 31)).unwrap();
        assert_eq!(timeline.gestational_age().to_string(), "12w 6d");
    }

    #[test]
    fn test_due_date_outside_calendar() {
        let anchor = shift_days(NaiveDate::MAX, -10).unwrap();
        let err = Timeline::calculate(anchor, NaiveDate::MAX).unwrap_err();
        assert_eq!(err.error_code(), "OUT_OF_RANGE");
    }

    #[test]
    fn test_serialization_roundtrip() {
        let timeline = Timeline::calculate(date(2024, 1, 1), date(2024, 1, 22)).unwrap();
        let json = serde_json::to_string_pretty(&timeline).unwrap();
        assert!(json.contains("\"projected_completion_date\": \"2024-10-07\""));
        let roundtrip: Timeline = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, timeline);
    }
}
