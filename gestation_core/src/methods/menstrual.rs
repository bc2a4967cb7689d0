//! # Last Menstrual Period (LMP)
//!
//! The traditional clinical reference: the first day of the last period *is*
//! day 0 of the 280-day count, whatever the cycle length.
//!
//! Cycle length only moves the estimated conception date. Ovulation happens
//! a fixed luteal phase (14 days) before the next period, so it falls
//! `cycle_length_days - 14` days after the LMP: day 14 of a 28-day cycle,
//! day 21 of a 35-day cycle.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use gestation_core::methods::MenstrualPeriodInput;
//! use gestation_core::settings::EngineSettings;
//!
//! let lmp = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let resolved = MenstrualPeriodInput::new(lmp)
//!     .with_cycle_length(35)
//!     .resolve(&EngineSettings::default())
//!     .unwrap();
//!
//! assert_eq!(resolved.anchor_date, lmp);
//! assert_eq!(resolved.conception_date, NaiveDate::from_ymd_opt(2024, 1, 22).unwrap());
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{offset, require, MethodKind, ResolvedAnchor};
use crate::dates::LUTEAL_PHASE_DAYS;
use crate::errors::{DatingError, DatingResult};
use crate::settings::EngineSettings;

/// Input for dating from the last menstrual period.
///
/// ## JSON Example
///
/// ```json
/// { "last_period_start": "2024-01-01", "cycle_length_days": 28 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenstrualPeriodInput {
    /// First day of the last menstrual period
    pub last_period_start: Option<NaiveDate>,

    /// Average cycle length; the configured default (28) when blank
    pub cycle_length_days: Option<i64>,
}

impl MenstrualPeriodInput {
    /// Create an input with the default cycle length
    pub fn new(last_period_start: NaiveDate) -> Self {
        MenstrualPeriodInput {
            last_period_start: Some(last_period_start),
            cycle_length_days: None,
        }
    }

    /// Set an explicit cycle length
    pub fn with_cycle_length(mut self, days: i64) -> Self {
        self.cycle_length_days = Some(days);
        self
    }

    /// Cycle length after applying the default
    pub fn effective_cycle_length(&self, settings: &EngineSettings) -> i64 {
        self.cycle_length_days.unwrap_or(settings.default_cycle_length_days)
    }

    /// Validate inputs and resolve the anchor date.
    pub fn resolve(&self, settings: &EngineSettings) -> DatingResult<ResolvedAnchor> {
        let last_period_start = require(self.last_period_start, "last_period_start")?;
        let cycle = self.effective_cycle_length(settings);

        if cycle <= 0 {
            return Err(DatingError::invalid_input(
                "cycle_length_days",
                cycle.to_string(),
                "Cycle length must be positive",
            ));
        }
        if !settings.cycle_length_in_bounds(cycle) {
            return Err(DatingError::out_of_range(
                "cycle_length_days",
                cycle.to_string(),
                format!(
                    "Cycle length must be between {} and {} days",
                    settings.min_cycle_length_days, settings.max_cycle_length_days
                ),
            ));
        }

        let conception_date = offset(last_period_start, cycle - LUTEAL_PHASE_DAYS, "last_period_start")?;

        Ok(ResolvedAnchor {
            method: MethodKind::MenstrualPeriod,
            anchor_date: last_period_start,
            conception_date,
        })
    }
}
