//! # Dating Methods
//!
//! One adapter per clinical dating method. Each adapter follows the same
//! pattern:
//!
//! - `*Input` - form-shaped input record (JSON-serializable, dates optional
//!   so a blank form field decodes cleanly and fails validation instead)
//! - `resolve(&self, settings) -> DatingResult<ResolvedAnchor>` - validate
//!   and normalize onto the canonical 280-day timeline
//!
//! [`DatingMethod`] is the closed set of supported methods; exactly one
//! variant is active per calculation.
//!
//! ## Available Methods
//!
//! - [`menstrual`] - first day of the last menstrual period (LMP)
//! - [`conception`] - known date of ovulation/fertilization
//! - [`imaging`] - ultrasound gestational-age estimate
//! - [`assisted`] - IVF embryo transfer (day-3 or day-5 embryo)

pub mod assisted;
pub mod conception;
pub mod imaging;
pub mod menstrual;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::shift_days;
use crate::errors::{DatingError, DatingResult};
use crate::settings::EngineSettings;

pub use assisted::AssistedTransferInput;
pub use conception::ConceptionInput;
pub use imaging::ImagingEstimateInput;
pub use menstrual::MenstrualPeriodInput;

/// Discriminant of [`DatingMethod`], for display and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MethodKind {
    MenstrualPeriod,
    Conception,
    ImagingEstimate,
    AssistedTransfer,
}

impl MethodKind {
    /// All methods in form order
    pub const ALL: [MethodKind; 4] = [
        MethodKind::MenstrualPeriod,
        MethodKind::Conception,
        MethodKind::ImagingEstimate,
        MethodKind::AssistedTransfer,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            MethodKind::MenstrualPeriod => "Last menstrual period",
            MethodKind::Conception => "Conception date",
            MethodKind::ImagingEstimate => "Ultrasound estimate",
            MethodKind::AssistedTransfer => "IVF transfer",
        }
    }
}

impl std::fmt::Display for MethodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// The dating method selected on the form, with its inputs.
///
/// ## JSON Example
///
/// ```json
/// { "method": "AssistedTransfer", "transfer_date": "2024-03-01", "embryo_age_days": 5 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum DatingMethod {
    MenstrualPeriod(MenstrualPeriodInput),
    Conception(ConceptionInput),
    ImagingEstimate(ImagingEstimateInput),
    AssistedTransfer(AssistedTransferInput),
}

impl DatingMethod {
    /// Which method this is
    pub fn kind(&self) -> MethodKind {
        match self {
            DatingMethod::MenstrualPeriod(_) => MethodKind::MenstrualPeriod,
            DatingMethod::Conception(_) => MethodKind::Conception,
            DatingMethod::ImagingEstimate(_) => MethodKind::ImagingEstimate,
            DatingMethod::AssistedTransfer(_) => MethodKind::AssistedTransfer,
        }
    }

    /// Normalize the method's inputs into an anchor date.
    pub fn resolve_anchor(&self, settings: &EngineSettings) -> DatingResult<ResolvedAnchor> {
        let resolved = match self {
            DatingMethod::MenstrualPeriod(input) => input.resolve(settings),
            DatingMethod::Conception(input) => input.resolve(settings),
            DatingMethod::ImagingEstimate(input) => input.resolve(settings),
            DatingMethod::AssistedTransfer(input) => input.resolve(settings),
        }?;

        log::debug!(
            "{} resolved to anchor {} (conception {})",
            resolved.method,
            resolved.anchor_date,
            resolved.conception_date
        );
        Ok(resolved)
    }
}

impl From<MenstrualPeriodInput> for DatingMethod {
    fn from(input: MenstrualPeriodInput) -> Self {
        DatingMethod::MenstrualPeriod(input)
    }
}

impl From<ConceptionInput> for DatingMethod {
    fn from(input: ConceptionInput) -> Self {
        DatingMethod::Conception(input)
    }
}

impl From<ImagingEstimateInput> for DatingMethod {
    fn from(input: ImagingEstimateInput) -> Self {
        DatingMethod::ImagingEstimate(input)
    }
}

impl From<AssistedTransferInput> for DatingMethod {
    fn from(input: AssistedTransferInput) -> Self {
        DatingMethod::AssistedTransfer(input)
    }
}

/// Output of a method adapter: "day 0" of the 280-day count, plus the
/// estimated conception date implied by the inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAnchor {
    /// Method that produced this anchor
    pub method: MethodKind,

    /// Canonical start of gestation
    pub anchor_date: NaiveDate,

    /// Estimated date of conception (auxiliary; never used to recompute the anchor)
    pub conception_date: NaiveDate,
}

/// Unwrap a required form field.
pub(crate) fn require<T>(value: Option<T>, field: &str) -> DatingResult<T> {
    value.ok_or_else(|| DatingError::missing_field(field))
}

/// Shift `date` by `days`, reporting an unrepresentable result against `field`.
pub(crate) fn offset(date: NaiveDate, days: i64, field: &str) -> DatingResult<NaiveDate> {
    shift_days(date, days).ok_or_else(|| {
        DatingError::out_of_range(field, date.to_string(), format!("Shifting by {} days leaves the calendar range", days))
    })
}
