//! # Ultrasound Estimate
//!
//! Dates the pregnancy from a gestational age measured on a scan, e.g.
//! "8 weeks 3 days on 2024-03-01". The anchor is the scan date minus the
//! measured age. Clinically this is the most trusted method because it comes
//! from a measurement rather than a recalled date.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use gestation_core::methods::ImagingEstimateInput;
//! use gestation_core::settings::EngineSettings;
//!
//! let scan = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let resolved = ImagingEstimateInput::new(scan, 8, 3)
//!     .resolve(&EngineSettings::default())
//!     .unwrap();
//! assert_eq!(resolved.anchor_date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{offset, require, MethodKind, ResolvedAnchor};
use crate::dates::{GestationalAge, ANCHOR_TO_CONCEPTION_DAYS, DAYS_PER_WEEK};
use crate::errors::{DatingError, DatingResult};
use crate::settings::EngineSettings;

/// Input for dating from an imaging estimate.
///
/// ## JSON Example
///
/// ```json
/// { "imaging_date": "2024-03-01", "estimated_age_weeks": 8, "estimated_age_days": 3 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagingEstimateInput {
    /// Date the scan was performed
    pub imaging_date: Option<NaiveDate>,

    /// Completed weeks of gestational age reported by the scan
    pub estimated_age_weeks: Option<i64>,

    /// Additional days (0-6); blank means 0
    #[serde(default)]
    pub estimated_age_days: i64,
}

impl ImagingEstimateInput {
    pub fn new(imaging_date: NaiveDate, weeks: i64, days: i64) -> Self {
        ImagingEstimateInput {
            imaging_date: Some(imaging_date),
            estimated_age_weeks: Some(weeks),
            estimated_age_days: days,
        }
    }

    /// Validate inputs and resolve the anchor date.
    pub fn resolve(&self, settings: &EngineSettings) -> DatingResult<ResolvedAnchor> {
        let imaging_date = require(self.imaging_date, "imaging_date")?;
        let weeks = require(self.estimated_age_weeks, "estimated_age_weeks")?;
        let days = self.estimated_age_days;

        if weeks < 0 {
            return Err(DatingError::invalid_input(
                "estimated_age_weeks",
                weeks.to_string(),
                "Weeks cannot be negative",
            ));
        }
        if days < 0 {
            return Err(DatingError::invalid_input(
                "estimated_age_days",
                days.to_string(),
                "Days cannot be negative",
            ));
        }
        if days >= DAYS_PER_WEEK {
            return Err(DatingError::out_of_range(
                "estimated_age_days",
                days.to_string(),
                "Days must be between 0 and 6",
            ));
        }

        let total_days = weeks
            .checked_mul(DAYS_PER_WEEK)
            .and_then(|d| d.checked_add(days))
            .filter(|d| *d <= settings.max_estimated_age_days)
            .ok_or_else(|| {
                DatingError::out_of_range(
                    "estimated_age_weeks",
                    format!("{}w {}d", weeks, days),
                    format!(
                        "Estimated age cannot exceed {}",
                        GestationalAge::from_days(settings.max_estimated_age_days)
                    ),
                )
            })?;

        // total_days >= 0, so the anchor never lands after the scan
        let anchor_date = offset(imaging_date, -total_days, "imaging_date")?;
        let conception_date = offset(anchor_date, ANCHOR_TO_CONCEPTION_DAYS, "imaging_date")?;

        Ok(ResolvedAnchor {
            method: MethodKind::ImagingEstimate,
            anchor_date,
            conception_date,
        })
    }
}
