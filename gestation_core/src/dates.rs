//! # Date Arithmetic
//!
//! Calendar helpers shared by the method adapters and the timeline
//! calculator, plus the fixed clinical constants of the 280-day model.
//!
//! All arithmetic works on whole calendar days ([`NaiveDate`]); there is no
//! time-of-day or timezone component anywhere in the engine.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use gestation_core::dates::{shift_days, GestationalAge, GESTATION_LENGTH_DAYS};
//!
//! let lmp = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let due = shift_days(lmp, GESTATION_LENGTH_DAYS).unwrap();
//! assert_eq!(due, NaiveDate::from_ymd_opt(2024, 10, 7).unwrap());
//!
//! let age = GestationalAge::from_days(23);
//! assert_eq!(age.to_string(), "3w 2d");
//! ```

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Length of a standard gestation from the anchor date (40 weeks)
pub const GESTATION_LENGTH_DAYS: i64 = 280;

/// Days from the anchor date to conception under the standard 28-day model
pub const ANCHOR_TO_CONCEPTION_DAYS: i64 = 14;

/// Length of the luteal phase; ovulation happens this many days before the next period
pub const LUTEAL_PHASE_DAYS: i64 = 14;

/// Days per gestational week
pub const DAYS_PER_WEEK: i64 = 7;

/// Move `date` by a signed number of days.
///
/// Returns `None` if the result is outside chrono's representable range.
pub fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

/// Whole days from `from` to `to` (negative when `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Round to `places` decimal places (display only).
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Gestational age expressed as completed weeks plus days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GestationalAge {
    /// Completed weeks
    pub weeks: u32,
    /// Additional days, 0-6
    pub days: u32,
}

impl GestationalAge {
    /// Split a non-negative day count into weeks and days.
    ///
    /// Negative counts are treated as zero; callers that must reject
    /// negative ages check before converting.
    pub fn from_days(total_days: i64) -> Self {
        let total = total_days.max(0);
        GestationalAge {
            weeks: (total / DAYS_PER_WEEK) as u32,
            days: (total % DAYS_PER_WEEK) as u32,
        }
    }

    /// Total number of days
    pub fn total_days(&self) -> i64 {
        i64::from(self.weeks) * DAYS_PER_WEEK + i64::from(self.days)
    }
}

impl std::fmt::Display for GestationalAge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}w {}d", self.weeks, self.days)
    }
}
